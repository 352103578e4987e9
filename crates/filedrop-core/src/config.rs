//! Configuration module
//!
//! Configuration is read from the process environment (optionally seeded from a
//! `.env` file). The upload directory, payload limit, and extension policy are
//! consumed by the ingestion pipeline; the rest drives the HTTP server.

use std::env;
use std::path::PathBuf;

use crate::constants::DEFAULT_MAX_UPLOAD_SIZE_BYTES;
use crate::upload_policy::{ExtensionPolicy, PartialFilePolicy};

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_UPLOADS_DIR: &str = "uploads";
const DEFAULT_HTTP_CONCURRENCY_LIMIT: usize = 10_000;

/// Server-level configuration
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    /// Upper bound on requests served at once
    pub http_concurrency_limit: usize,
    /// Emit logs as JSON instead of the compact console format
    pub log_json: bool,
}

/// Upload pipeline configuration
#[derive(Clone, Debug)]
pub struct UploadConfig {
    /// Flat directory that receives one file per successful upload.
    pub uploads_dir: PathBuf,
    /// `None` means unlimited.
    pub max_upload_size_bytes: Option<u64>,
    pub extension_policy: ExtensionPolicy,
    /// Whether the `uploads` listing query is exposed.
    pub listing_enabled: bool,
    pub partial_file_policy: PartialFilePolicy,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            uploads_dir: PathBuf::from(DEFAULT_UPLOADS_DIR),
            max_upload_size_bytes: Some(DEFAULT_MAX_UPLOAD_SIZE_BYTES),
            extension_policy: ExtensionPolicy::default(),
            listing_enabled: true,
            partial_file_policy: PartialFilePolicy::default(),
        }
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    pub uploads: UploadConfig,
}

impl Config {
    /// Load `.env` (if present) and read the process environment.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins_str = lookup("CORS_ORIGINS").unwrap_or_else(|| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base = BaseConfig {
            server_port: lookup("PORT")
                .unwrap_or_else(|| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            http_concurrency_limit: lookup("HTTP_CONCURRENCY_LIMIT")
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(DEFAULT_HTTP_CONCURRENCY_LIMIT)
                .max(1),
            log_json: lookup("LOG_FORMAT")
                .map(|f| f.trim().eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        };

        let max_upload_size_bytes = match lookup("MAX_UPLOAD_SIZE_BYTES") {
            Some(raw) => {
                let bytes: u64 = raw.trim().parse().map_err(|_| {
                    anyhow::anyhow!("MAX_UPLOAD_SIZE_BYTES must be a non-negative integer")
                })?;
                // 0 disables the limit
                (bytes > 0).then_some(bytes)
            }
            None => Some(DEFAULT_MAX_UPLOAD_SIZE_BYTES),
        };

        let extension_policy = match lookup("ALLOWED_EXTENSIONS") {
            Some(raw) => raw.parse::<ExtensionPolicy>()?,
            None => ExtensionPolicy::default(),
        };

        let partial_file_policy = match lookup("UPLOAD_PARTIAL_FILES") {
            Some(raw) => raw.parse::<PartialFilePolicy>()?,
            None => PartialFilePolicy::default(),
        };

        let uploads = UploadConfig {
            uploads_dir: lookup("UPLOADS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOADS_DIR)),
            max_upload_size_bytes,
            extension_policy,
            listing_enabled: lookup("UPLOADS_LISTING_ENABLED")
                .unwrap_or_else(|| "true".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(true),
            partial_file_policy,
        };

        Ok(Config { base, uploads })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.server_port == 0 {
            return Err(anyhow::anyhow!("PORT must be greater than zero"));
        }

        if self.uploads.uploads_dir.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("UPLOADS_DIR must not be empty"));
        }

        if let ExtensionPolicy::AllowList(allowed) = &self.uploads.extension_policy {
            if allowed.is_empty() {
                return Err(anyhow::anyhow!(
                    "ALLOWED_EXTENSIONS must list at least one extension (or '*')"
                ));
            }
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.base.environment
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.base.http_concurrency_limit
    }

    pub fn log_json(&self) -> bool {
        self.base.log_json
    }

    pub fn uploads_dir(&self) -> &PathBuf {
        &self.uploads.uploads_dir
    }

    pub fn max_upload_size_bytes(&self) -> Option<u64> {
        self.uploads.max_upload_size_bytes
    }

    pub fn extension_policy(&self) -> &ExtensionPolicy {
        &self.uploads.extension_policy
    }

    pub fn listing_enabled(&self) -> bool {
        self.uploads.listing_enabled
    }

    pub fn partial_file_policy(&self) -> PartialFilePolicy {
        self.uploads.partial_file_policy
    }
}
