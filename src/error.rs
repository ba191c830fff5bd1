//! Error types for forge_release operations.
//!
//! This module defines all error types with actionable error messages and recovery suggestions.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for forge_release operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all forge_release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Local input validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Remote API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while checking local inputs, before anything is sent
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Artifact file is missing
    #[error("Cannot find archive: {path}")]
    ArtifactNotFound {
        /// Path that was checked
        path: PathBuf,
    },

    /// Changelog file could not be read
    #[error("Cannot read changelog {path}: {source}")]
    ChangelogUnreadable {
        /// Changelog path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Version selector matched nothing
    #[error("No versions found for selector: {selector}")]
    NoMatchingVersions {
        /// The selector as given by the caller
        selector: String,
    },

    /// Tag extraction did not yield exactly one match
    #[error("Cannot extract version tag from file name '{file_name}' with '{pattern}': expected 1 match, found {matches}")]
    TagExtraction {
        /// Base name of the artifact
        file_name: String,
        /// Extraction pattern
        pattern: String,
        /// Number of matches found
        matches: usize,
    },

    /// A user supplied regular expression failed to compile
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// Pattern text
        pattern: String,
        /// Regex compile error
        #[source]
        source: regex::Error,
    },

    /// Release metadata failed its construction checks
    #[error("Invalid release metadata: {reason}")]
    InvalidMetadata {
        /// Reason for the error
        reason: String,
    },

    /// API base URL is not a valid URL
    #[error("Invalid API base URL '{url}': {source}")]
    InvalidBaseUrl {
        /// URL text
        url: String,
        /// Parse error
        #[source]
        source: url::ParseError,
    },
}

/// Errors from the remote service exchange
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport failure (connect, TLS, timeout, broken stream)
    #[error("Network error: {reason}")]
    Network {
        /// Underlying transport error
        reason: String,
    },

    /// The service refused the credentials (401/403)
    #[error("Authorization failed ({status}): {reason}")]
    Auth {
        /// HTTP status code
        status: u16,
        /// Short reason extracted from the body
        reason: String,
        /// Raw response body
        body: String,
    },

    /// Any other non-success status
    #[error("Request failed ({status}): {reason}")]
    Response {
        /// HTTP status code
        status: u16,
        /// Short reason extracted from the body
        reason: String,
        /// Raw response body
        body: String,
    },

    /// Success status but the body was not what the client expected
    #[error("Unexpected response: {reason}")]
    Protocol {
        /// Reason for the error
        reason: String,
    },
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// An `@file` argument file could not be read
    #[error("Cannot read arguments file {path}: {source}")]
    ArgsFile {
        /// Arguments file path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

impl ReleaseError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ReleaseError::Validation(ValidationError::ArtifactNotFound { path }) => vec![
                format!("Build the release archive first: {}", path.display()),
                "Check that --archive points to a file, not a directory".to_string(),
            ],
            ReleaseError::Validation(ValidationError::ChangelogUnreadable { .. }) => vec![
                "Check the --changelog path and file permissions".to_string(),
                "The changelog must be UTF-8 text".to_string(),
            ],
            ReleaseError::Validation(ValidationError::NoMatchingVersions { .. }) => vec![
                "Patterns match from the start of the version name, e.g. 1\\.4\\.".to_string(),
                "Use 'latest' or 'latest_all_builds' to pick the newest versions".to_string(),
            ],
            ReleaseError::Validation(ValidationError::TagExtraction { .. }) => vec![
                "Adjust --tag-extract so it matches the archive name exactly once".to_string(),
                "Omit --title to name the release after the archive".to_string(),
            ],
            ReleaseError::Validation(ValidationError::InvalidPattern { .. }) => vec![
                "Check the regular expression syntax; put arguments in an @file to avoid shell escaping".to_string(),
            ],
            ReleaseError::Api(ApiError::Auth { .. }) => vec![
                "Verify the API token: Account/Preferences/My API Tokens".to_string(),
                "Check that the token belongs to an author of the project".to_string(),
            ],
            ReleaseError::Api(ApiError::Network { .. }) => vec![
                "Check network connectivity and the --api-url value".to_string(),
                "Raise --timeout for slow uploads".to_string(),
            ],
            ReleaseError::Cli(CliError::ArgsFile { .. }) => vec![
                "Check the path after '@'; each line of the file is one argument".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }

    /// Raw body returned by the server, when the failure came from one
    pub fn server_body(&self) -> Option<&str> {
        match self {
            ReleaseError::Api(ApiError::Auth { body, .. })
            | ReleaseError::Api(ApiError::Response { body, .. }) => Some(body.as_str()),
            _ => None,
        }
    }

    /// Check if this error is a local validation failure
    pub fn is_validation(&self) -> bool {
        matches!(self, ReleaseError::Validation(_) | ReleaseError::Cli(_))
    }
}

impl ApiError {
    /// Classify a non-success HTTP response, keeping the raw body
    ///
    /// JSON error bodies carrying `message` or `errorMessage` contribute that
    /// text as the short reason.
    pub fn from_status(status: u16, body: String) -> Self {
        let reason = extract_error_reason(&body).unwrap_or_else(|| format!("HTTP {status}"));
        match status {
            401 | 403 => ApiError::Auth {
                status,
                reason,
                body,
            },
            _ => ApiError::Response {
                status,
                reason,
                body,
            },
        }
    }
}

fn extract_error_reason(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;
    ["message", "errorMessage"]
        .iter()
        .filter_map(|key| object.get(*key).and_then(|v| v.as_str()))
        .find(|text| !text.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_maps_to_auth() {
        let err = ApiError::from_status(401, "nope".to_string());
        assert!(matches!(err, ApiError::Auth { status: 401, .. }));
    }

    #[test]
    fn test_forbidden_maps_to_auth() {
        let err = ApiError::from_status(403, String::new());
        assert!(matches!(err, ApiError::Auth { status: 403, .. }));
    }

    #[test]
    fn test_reason_from_error_message_field() {
        let body = r#"{"errorCode":1009,"errorMessage":"Invalid game version"}"#;
        match ApiError::from_status(400, body.to_string()) {
            ApiError::Response {
                status,
                reason,
                body: raw,
            } => {
                assert_eq!(status, 400);
                assert_eq!(reason, "Invalid game version");
                assert_eq!(raw, body);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_reason_falls_back_to_status() {
        match ApiError::from_status(500, "<html>oops</html>".to_string()) {
            ApiError::Response { reason, body, .. } => {
                assert_eq!(reason, "HTTP 500");
                assert_eq!(body, "<html>oops</html>");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_server_body_exposed() {
        let err = ReleaseError::from(ApiError::from_status(422, "raw body".to_string()));
        assert_eq!(err.server_body(), Some("raw body"));
        let err = ReleaseError::from(ApiError::Network {
            reason: "refused".to_string(),
        });
        assert_eq!(err.server_body(), None);
    }
}
