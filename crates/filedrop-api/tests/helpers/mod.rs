//! Test helpers: build the router against a scratch uploads directory.
//!
//! Run from workspace root: `cargo test -p filedrop-api --test uploads_test`.

#![allow(dead_code)]

pub mod fixtures;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use filedrop_api::setup::build_app;
use filedrop_api::state::AppState;
use filedrop_core::Config;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Test application: server, shared state, and the owned uploads directory.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub _temp_dir: TempDir,
    pub uploads_dir: PathBuf,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }

    /// Names of the files currently in the uploads directory.
    pub fn stored_files(&self) -> Vec<String> {
        std::fs::read_dir(&self.uploads_dir)
            .expect("uploads dir readable")
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect()
    }
}

/// Setup a test app with default settings.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(&[]).await
}

/// Setup a test app; `vars` override the environment-style configuration.
pub async fn setup_test_app_with(vars: &[(&str, &str)]) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let uploads_dir = temp_dir.path().join("uploads");

    let mut env: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    env.insert(
        "UPLOADS_DIR".to_string(),
        uploads_dir.to_string_lossy().into_owned(),
    );

    let config = Config::from_lookup(|key| env.get(key).cloned()).expect("valid test config");
    let (state, app) = build_app(config).await.expect("Failed to build app");

    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        state,
        _temp_dir: temp_dir,
        uploads_dir,
    }
}

/// Multipart body with a single `file` part.
pub fn file_form(filename: &str, mime_type: &str, data: Vec<u8>) -> MultipartForm {
    let part = Part::bytes(bytes::Bytes::from(data))
        .file_name(filename.to_string())
        .mime_type(mime_type.to_string());
    MultipartForm::new().add_part("file", part)
}
