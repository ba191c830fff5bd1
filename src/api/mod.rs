//! Client for the mod-hosting service API.
//!
//! The client owns its configuration and the version cache. Every request
//! carries the configured API token (when present) and a user agent; failures
//! are classified into [`ApiError`] without retrying.

mod metadata;
pub mod transport;
mod versions;

pub use metadata::{ChangelogType, ReleaseMetadata, ReleaseType};
pub use transport::{FormPart, HttpRequest, HttpResponse, HttpTransport, Method, ReqwestTransport};
pub use versions::{GameVersion, VersionId, VersionSelector, filter_by_pattern};

use crate::error::{ApiError, Result, ValidationError};
use regex::Regex;
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tokio::sync::OnceCell;

/// Service the client talks to unless told otherwise
pub const DEFAULT_BASE_URL: &str = "https://kerbal.curseforge.com";

/// Header carrying the API token
pub const TOKEN_HEADER: &str = "X-Api-Token";

/// User agent sent with every request; the service CDN rejects empty ones
pub const DEFAULT_USER_AGENT: &str = concat!("forge_release/", env!("CARGO_PKG_VERSION"));

/// Default bound on a single request, upload included
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

const VERSIONS_PATH: &str = "/api/game/versions";
const UPLOAD_PATH: &str = "/api/projects/{project_id}/upload-file";
// Project details are not part of the service API.
const PROJECT_DETAILS_URL: &str = "https://api.cfwidget.com/project/{project_id}";

/// Project and token used for authorized calls
#[derive(Clone)]
pub struct Credentials {
    /// Project to publish to
    pub project_id: String,
    /// API token; requests go out unauthenticated without one
    pub api_token: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("project_id", &self.project_id)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Configuration for an [`ApiClient`]
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Service root, without trailing slash
    pub base_url: String,
    /// Project and token
    pub credentials: Credentials,
    /// Per-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
    /// User agent header value
    pub user_agent: String,
}

impl ApiConfig {
    /// Create a configuration with default timeout and user agent
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self> {
        url::Url::parse(base_url).map_err(|source| ValidationError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            timeout: Some(DEFAULT_TIMEOUT),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        })
    }

    /// Replace the request timeout
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self, path: &str) -> String {
        let path = path.replace("{project_id}", &self.credentials.project_id);
        format!("{}{}", self.base_url, path)
    }
}

/// API client with a lazily filled version cache
pub struct ApiClient<T: HttpTransport = ReqwestTransport> {
    config: ApiConfig,
    transport: T,
    versions: OnceCell<Vec<GameVersion>>,
}

impl ApiClient<ReqwestTransport> {
    /// Create a client using the `reqwest` transport
    pub fn new(config: ApiConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: HttpTransport> ApiClient<T> {
    /// Create a client over a custom transport
    pub fn with_transport(config: ApiConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            versions: OnceCell::new(),
        }
    }

    /// Client configuration
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Get the game versions known to the service.
    ///
    /// The list is requested once per client and cached. With a pattern, only
    /// versions whose name matches it from the first character are returned,
    /// in service order.
    ///
    /// Requires authorization.
    pub async fn get_versions(&self, pattern: Option<&Regex>) -> Result<Vec<GameVersion>> {
        let versions = self
            .versions
            .get_or_try_init(|| self.fetch_versions())
            .await?;
        Ok(match pattern {
            Some(re) => filter_by_pattern(versions, re),
            None => versions.clone(),
        })
    }

    /// Resolve a version selector against the cached version list
    pub async fn select_versions(&self, selector: &VersionSelector) -> Result<Vec<GameVersion>> {
        match selector {
            VersionSelector::Pattern(re) => self.get_versions(Some(re)).await,
            other => other.select(&self.get_versions(None).await?),
        }
    }

    /// Upload the archive with its metadata to the configured project.
    ///
    /// Returns the service response object as-is.
    ///
    /// Requires authorization.
    pub async fn upload_file(&self, path: &Path, metadata: ReleaseMetadata) -> Result<serde_json::Value> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let parts = vec![
            FormPart::Text {
                name: "metadata".to_string(),
                value: metadata.to_json()?,
            },
            FormPart::File {
                name: "file".to_string(),
                path: path.to_path_buf(),
                file_name,
            },
        ];

        let url = self.config.endpoint(UPLOAD_PATH);
        log::info!(
            "Uploading {} as '{}' to project {}",
            path.display(),
            metadata.display_name(),
            self.config.credentials.project_id
        );
        self.call_json(self.authorize(HttpRequest::post_form(url, parts)))
            .await
    }

    /// Get the public project details (title, links).
    ///
    /// Served by a third-party widget site, so the data may be stale or
    /// missing for new projects. Does not require authorization.
    pub async fn project_details(&self) -> Result<serde_json::Value> {
        let url = PROJECT_DETAILS_URL.replace("{project_id}", &self.config.credentials.project_id);
        let request = HttpRequest::get(url).header("User-Agent", self.config.user_agent.as_str());
        self.call_json(request).await
    }

    async fn fetch_versions(&self) -> Result<Vec<GameVersion>> {
        log::debug!("Requesting versions to cache...");
        let url = self.config.endpoint(VERSIONS_PATH);
        let versions: Vec<GameVersion> = self.call_json(self.authorize(HttpRequest::get(url))).await?;
        log::info!("Cached {} game versions", versions.len());
        Ok(versions)
    }

    fn authorize(&self, request: HttpRequest) -> HttpRequest {
        let request = request.header("User-Agent", self.config.user_agent.as_str());
        match self.config.credentials.api_token.as_deref() {
            Some(token) if !token.is_empty() => request.header(TOKEN_HEADER, token),
            _ => {
                log::debug!("No API token configured; sending {} anonymously", request.url);
                request
            }
        }
    }

    async fn call_json<R: DeserializeOwned>(&self, request: HttpRequest) -> Result<R> {
        let response = self.transport.execute(request).await?;
        if !response.is_success() {
            let error = ApiError::from_status(response.status, response.text());
            log::error!("API call failed: {}", error);
            return Err(error.into());
        }
        serde_json::from_slice(&response.body).map_err(|e| {
            ApiError::Protocol {
                reason: format!("cannot parse response: {e}"),
            }
            .into()
        })
    }
}
