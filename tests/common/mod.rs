//! Shared test infrastructure for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use forge_release::api::{
    ApiClient, ApiConfig, Credentials, HttpRequest, HttpResponse, HttpTransport, Method,
};
use forge_release::error::{ApiError, Result};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Version list used by most tests.
pub const VERSIONS_JSON: &str =
    r#"[{"name":"1.4.1","id":10},{"name":"1.4.2","id":11},{"name":"1.5.0","id":12}]"#;

/// Transport answering from canned responses and recording every request.
pub struct FakeTransport {
    versions: HttpResponse,
    upload: HttpResponse,
    project: HttpResponse,
    offline: bool,
    requests: Mutex<Vec<HttpRequest>>,
}

fn response(status: u16, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        body: body.as_bytes().to_vec(),
    }
}

impl FakeTransport {
    pub fn new() -> Self {
        Self {
            versions: response(200, VERSIONS_JSON),
            upload: response(200, r#"{"id":4242}"#),
            project: response(200, r#"{"id":123456,"title":"Kerbal Inventory System"}"#),
            offline: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_versions(mut self, status: u16, body: &str) -> Self {
        self.versions = response(status, body);
        self
    }

    pub fn with_upload(mut self, status: u16, body: &str) -> Self {
        self.upload = response(status, body);
        self
    }

    pub fn with_project(mut self, status: u16, body: &str) -> Self {
        self.project = response(status, body);
        self
    }

    /// Every request fails at the transport level.
    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: Method, url_suffix: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.url.ends_with(url_suffix))
            .count()
    }

    pub fn version_calls(&self) -> usize {
        self.count(Method::Get, "/api/game/versions")
    }

    pub fn upload_calls(&self) -> usize {
        self.count(Method::Post, "/upload-file")
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request.clone());
        if self.offline {
            return Err(ApiError::Network {
                reason: "connection refused".to_string(),
            }
            .into());
        }
        if request.url.ends_with("/api/game/versions") {
            Ok(self.versions.clone())
        } else if request.url.ends_with("/upload-file") {
            Ok(self.upload.clone())
        } else if request.url.contains("cfwidget") {
            Ok(self.project.clone())
        } else {
            Ok(response(404, "not found"))
        }
    }
}

pub fn config(token: Option<&str>) -> ApiConfig {
    ApiConfig::new(
        "https://forge.test/",
        Credentials {
            project_id: "123456".to_string(),
            api_token: token.map(str::to_string),
        },
    )
    .unwrap()
}

pub fn client(transport: FakeTransport) -> ApiClient<FakeTransport> {
    ApiClient::with_transport(config(Some("secret-token")), transport)
}

/// Temporary release directory with a CHANGELOG and an archive.
pub struct ReleaseDir {
    pub dir: TempDir,
    pub changelog: PathBuf,
    pub archive: PathBuf,
}

impl ReleaseDir {
    pub fn new(changelog: &str, archive_name: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let changelog_path = dir.path().join("CHANGELOG.md");
        std::fs::write(&changelog_path, changelog).unwrap();
        let archive = dir.path().join(archive_name);
        std::fs::write(&archive, b"PK\x03\x04 not really a zip").unwrap();
        Self {
            dir,
            changelog: changelog_path,
            archive,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
