//! Publish command.

use super::helpers::{parse_github_repo, print_recovery_suggestions, request_timeout};
use crate::api::{ApiClient, ApiConfig, Credentials, VersionSelector};
use crate::cli::{Args, RuntimeConfig};
use crate::error::{ReleaseError, Result, ValidationError};
use crate::pattern;
use crate::publish::{AbortReason, PublishOptions, PublishOutcome, Publisher, TerminalPrompt};

/// Build the client configuration from arguments
pub fn build_api_config(args: &Args) -> Result<ApiConfig> {
    let credentials = Credentials {
        project_id: args.project.trim().to_string(),
        api_token: Some(args.token.clone()).filter(|token| !token.is_empty()),
    };
    Ok(ApiConfig::new(&args.api_url, credentials)?.with_timeout(request_timeout(args.timeout)))
}

/// Compile every pattern and collect workflow inputs.
///
/// Runs before any network call so that malformed expressions fail fast.
pub fn build_publish_options(args: &Args) -> Result<PublishOptions> {
    Ok(PublishOptions {
        versions: VersionSelector::parse(&args.versions)?,
        changelog: args.changelog.clone(),
        changelog_breaker: pattern::compile(&args.changelog_breaker)?,
        archive: args.archive.clone(),
        title_template: args.title.clone(),
        tag_extract: pattern::compile(&args.tag_extract)?,
        github_repo: args.github.as_deref().map(parse_github_repo).transpose()?,
        release_type: args.release_type,
        changelog_type: args.changelog_type,
        show_project: args.show_project,
    })
}

/// Execute the publish workflow and return the process exit code
pub(super) async fn execute_publish(args: &Args, config: &RuntimeConfig) -> Result<i32> {
    let options = build_publish_options(args)?;
    let client = ApiClient::new(build_api_config(args)?)?;

    config.info_println(&format!(
        "Requesting versions from: {}",
        client.config().base_url
    ));

    let mut prompt = TerminalPrompt::new(config.output().clone());
    let mut publisher = Publisher::new(&client, &mut prompt);
    let outcome = publisher.run(&options).await?;

    match &outcome {
        PublishOutcome::Published(response) => {
            log::info!("Upload accepted: {}", response);
            config.success_println("DONE! Watch for the verification status on the project page.");
            if let Some(id) = response.get("id") {
                config.indent(&format!("File id: {}", id));
            }
        }
        PublishOutcome::Aborted(reason) => {
            log::info!("Publish aborted: {}", reason);
            config.warning_println(&format!("ABORTED: {}", reason));
            if let AbortReason::NoMatchingVersions { selector } = reason {
                let hint = ReleaseError::from(ValidationError::NoMatchingVersions {
                    selector: selector.clone(),
                });
                print_recovery_suggestions(config, &hint.recovery_suggestions());
            }
        }
    }

    Ok(outcome.exit_code())
}
