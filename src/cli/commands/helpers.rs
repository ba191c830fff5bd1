//! Shared helper functions for command execution.

use crate::cli::RuntimeConfig;
use crate::error::{CliError, ReleaseError, Result};
use std::time::Duration;

/// Validate a GitHub repository string of the form `owner/repo`
pub(super) fn parse_github_repo(repo: &str) -> Result<String> {
    let parts: Vec<&str> = repo.trim().split('/').collect();
    if parts.len() != 2 || parts.iter().any(|part| part.is_empty()) {
        return Err(ReleaseError::Cli(CliError::InvalidArguments {
            reason: format!(
                "Invalid GitHub repository format: '{}'. Expected: owner/repo",
                repo
            ),
        }));
    }

    Ok(format!("{}/{}", parts[0], parts[1]))
}

/// Map the `--timeout` seconds to a request timeout; zero means none
pub(super) fn request_timeout(seconds: u64) -> Option<Duration> {
    (seconds > 0).then(|| Duration::from_secs(seconds))
}

/// Print remediation hints after an error or abort
pub(super) fn print_recovery_suggestions(config: &RuntimeConfig, suggestions: &[String]) {
    if suggestions.is_empty() {
        return;
    }
    config.println("\n💡 Recovery suggestions:");
    for suggestion in suggestions {
        config.println(&format!("  • {}", suggestion));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_github_repo() {
        assert_eq!(parse_github_repo("ihsoft/KIS").unwrap(), "ihsoft/KIS");
        assert_eq!(parse_github_repo(" ihsoft/KIS ").unwrap(), "ihsoft/KIS");
    }

    #[test]
    fn test_parse_github_repo_rejects_bad_format() {
        assert!(parse_github_repo("ihsoft").is_err());
        assert!(parse_github_repo("ihsoft/KIS/extra").is_err());
        assert!(parse_github_repo("/KIS").is_err());
    }

    #[test]
    fn test_request_timeout() {
        assert_eq!(request_timeout(0), None);
        assert_eq!(request_timeout(30), Some(Duration::from_secs(30)));
    }
}
