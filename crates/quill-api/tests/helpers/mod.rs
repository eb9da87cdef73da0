//! Test helpers: build AppState and router for integration tests.
//!
//! Each `TestApp` owns a temporary public root, so tests never share files.

#![allow(dead_code)]

pub mod fixtures;
pub mod workflows;

use axum_test::TestServer;
use quill_api::constants;
use quill_api::setup::{build_state, routes};
use quill_core::Config;
use std::path::Path;
use tempfile::TempDir;

/// API path prefix for tests (e.g. `/api/v1`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Test application: server and the temporary public root it writes to.
pub struct TestApp {
    pub server: TestServer,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn root(&self) -> &Path {
        self._temp_dir.path()
    }

    /// Whether a path relative to the public root exists on disk.
    pub fn exists(&self, relative: &str) -> bool {
        self.root().join(relative).exists()
    }

    /// Create a file beneath the public root.
    pub fn write(&self, relative: &str, contents: &[u8]) {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(path, contents).expect("Failed to write test file");
    }
}

/// Build a test app on a fresh temporary public root.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(|_| {}).await
}

/// Build a test app after adjusting the default configuration.
pub async fn setup_test_app_with(configure: impl FnOnce(&mut Config)) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");

    let mut config = Config {
        public_root: temp_dir.path().to_path_buf(),
        ..Config::default()
    };
    configure(&mut config);
    config.validate().expect("Invalid test configuration");

    let state = build_state(config.clone())
        .await
        .expect("Failed to build application state");
    let app = routes::setup_routes(&config, state).expect("Failed to set up routes");

    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        _temp_dir: temp_dir,
    }
}
