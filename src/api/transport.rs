//! HTTP transport used by [`ApiClient`](super::ApiClient).
//!
//! The client builds [`HttpRequest`] values and hands them to an
//! [`HttpTransport`]. [`ReqwestTransport`] performs the real exchange,
//! including multipart encoding and streaming the artifact from disk.

use crate::error::{ApiError, ReleaseError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::io::ReaderStream;

/// HTTP verbs used by the service API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
}

/// One field of a multipart form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    /// Plain text field
    Text {
        /// Field name
        name: String,
        /// Field value
        value: String,
    },
    /// File field streamed from disk
    File {
        /// Field name
        name: String,
        /// Local path to read from
        path: PathBuf,
        /// File name sent in the part header
        file_name: String,
    },
}

/// Request description handed to a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL
    pub url: String,
    /// Header name/value pairs
    pub headers: Vec<(String, String)>,
    /// Multipart body, if any
    pub form: Option<Vec<FormPart>>,
}

impl HttpRequest {
    /// GET request without a body
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
            form: None,
        }
    }

    /// POST request with a multipart body
    pub fn post_form(url: impl Into<String>, parts: Vec<FormPart>) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            headers: Vec::new(),
            form: Some(parts),
        }
    }

    /// Add a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Look up a header value, ignoring name case
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status and body of a completed exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw body bytes
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as UTF-8, lossy
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Executes requests for the API client.
///
/// Implementations return `Ok` for every response the server produced,
/// whatever its status; only transport failures are errors.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Perform a single exchange
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Production transport backed by `reqwest`
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport; `timeout` bounds each whole request
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(network_error)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        log::debug!("{:?} {}", request.method, request.url);

        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(parts) = request.form {
            builder = builder.multipart(create_multipart(parts).await?);
        }

        let response = builder.send().await.map_err(network_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(network_error)?.to_vec();
        log::debug!("{} answered {} ({} bytes)", request.url, status, body.len());

        Ok(HttpResponse { status, body })
    }
}

async fn create_multipart(parts: Vec<FormPart>) -> Result<reqwest::multipart::Form> {
    let mut form = reqwest::multipart::Form::new();
    for part in parts {
        match part {
            FormPart::Text { name, value } => form = form.text(name, value),
            FormPart::File {
                name,
                path,
                file_name,
            } => {
                let file = tokio::fs::File::open(&path).await?;
                let length = file.metadata().await?.len();
                let body = reqwest::Body::wrap_stream(ReaderStream::new(file));
                let part =
                    reqwest::multipart::Part::stream_with_length(body, length).file_name(file_name);
                form = form.part(name, part);
            }
        }
    }
    Ok(form)
}

fn network_error(error: reqwest::Error) -> ReleaseError {
    ApiError::Network {
        reason: error.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_ignores_case() {
        let request = HttpRequest::get("https://example.invalid").header("X-Api-Token", "abc");
        assert_eq!(request.header_value("x-api-token"), Some("abc"));
        assert_eq!(request.header_value("user-agent"), None);
    }

    #[test]
    fn test_success_range() {
        let ok = HttpResponse {
            status: 204,
            body: Vec::new(),
        };
        let redirect = HttpResponse {
            status: 302,
            body: Vec::new(),
        };
        assert!(ok.is_success());
        assert!(!redirect.is_success());
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let transport = ReqwestTransport::new(Some(Duration::from_secs(5))).unwrap();
        let err = transport
            .execute(HttpRequest::get("http://127.0.0.1:9/api/game/versions"))
            .await
            .unwrap_err();
        assert!(matches!(err, ReleaseError::Api(ApiError::Network { .. })));
    }
}
