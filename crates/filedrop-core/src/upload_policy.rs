use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::constants::DEFAULT_ALLOWED_EXTENSIONS;

/// Which file extensions the upload pipeline accepts.
///
/// Callers pick one policy explicitly. Extensions carry their leading dot
/// (`.png`) and are compared case-sensitively, exactly as the client sent them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionPolicy {
    /// Accept every extension, including none at all.
    AllowAny,
    /// Accept only the listed extensions.
    AllowList(Vec<String>),
}

impl ExtensionPolicy {
    /// Strict image policy: `.jpg`, `.jpeg`, `.png`, `.gif`.
    pub fn images() -> Self {
        Self::allow_list(DEFAULT_ALLOWED_EXTENSIONS)
    }

    /// Build an allow-list, adding a leading dot where it is missing.
    pub fn allow_list<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim().to_string())
            .filter(|ext| !ext.is_empty() && ext != ".")
            .map(|ext| {
                if ext.starts_with('.') {
                    ext
                } else {
                    format!(".{}", ext)
                }
            })
            .collect();

        Self::AllowList(extensions)
    }

    pub fn permits(&self, extension: &str) -> bool {
        match self {
            ExtensionPolicy::AllowAny => true,
            ExtensionPolicy::AllowList(allowed) => allowed.iter().any(|ext| ext == extension),
        }
    }
}

impl Default for ExtensionPolicy {
    fn default() -> Self {
        Self::images()
    }
}

impl FromStr for ExtensionPolicy {
    type Err = anyhow::Error;

    /// `*` selects [`ExtensionPolicy::AllowAny`]; anything else is a comma list.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == "*" {
            return Ok(ExtensionPolicy::AllowAny);
        }

        let policy = Self::allow_list(s.split(','));
        match &policy {
            ExtensionPolicy::AllowList(allowed) if allowed.is_empty() => Err(anyhow::anyhow!(
                "Extension allow-list is empty; use '*' to accept every extension"
            )),
            _ => Ok(policy),
        }
    }
}

impl Display for ExtensionPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ExtensionPolicy::AllowAny => write!(f, "*"),
            ExtensionPolicy::AllowList(allowed) => write!(f, "{}", allowed.join(",")),
        }
    }
}

/// What happens to a destination file when an upload fails after it was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PartialFilePolicy {
    /// Leave the partial file on disk (it never reaches the registry).
    #[default]
    Keep,
    /// Best-effort removal of the partial file.
    Remove,
}

impl FromStr for PartialFilePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keep" => Ok(PartialFilePolicy::Keep),
            "remove" => Ok(PartialFilePolicy::Remove),
            _ => Err(anyhow::anyhow!("Invalid partial file policy: {}", s)),
        }
    }
}

impl Display for PartialFilePolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            PartialFilePolicy::Keep => write!(f, "keep"),
            PartialFilePolicy::Remove => write!(f, "remove"),
        }
    }
}
