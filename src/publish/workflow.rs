//! Publish state machine.

use super::{
    AbortReason, ConfirmationPrompt, PublishOptions, PublishOutcome, PublishState, ReleaseSummary,
    is_affirmative,
};
use crate::api::{ApiClient, HttpTransport, ReleaseMetadata};
use crate::changelog;
use crate::error::{Result, ValidationError};
use crate::title;

/// Drives one publish attempt against an [`ApiClient`]
pub struct Publisher<'a, T: HttpTransport, P: ConfirmationPrompt> {
    client: &'a ApiClient<T>,
    prompt: &'a mut P,
    state: PublishState,
}

impl<'a, T: HttpTransport, P: ConfirmationPrompt> Publisher<'a, T, P> {
    /// Publisher using `client` for the service and `prompt` for confirmation
    pub fn new(client: &'a ApiClient<T>, prompt: &'a mut P) -> Self {
        Self {
            client,
            prompt,
            state: PublishState::Init,
        }
    }

    /// Last state reached
    pub fn state(&self) -> PublishState {
        self.state
    }

    fn advance(&mut self, next: PublishState) {
        log::debug!("Publish state {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Run the workflow to completion.
    ///
    /// Validation, IO and API failures are returned as errors and leave the
    /// state where the failure happened. Nothing is uploaded unless the
    /// operator confirms.
    pub async fn run(&mut self, options: &PublishOptions) -> Result<PublishOutcome> {
        let versions = self.client.select_versions(&options.versions).await?;
        if versions.is_empty() {
            log::warn!("No versions found for selector: {}", options.versions);
            self.advance(PublishState::Aborted);
            return Ok(PublishOutcome::Aborted(AbortReason::NoMatchingVersions {
                selector: options.versions.to_string(),
            }));
        }
        self.advance(PublishState::VersionsResolved);

        let mut description =
            changelog::read_description(&options.changelog, &options.changelog_breaker)?;
        if let Some(repo) = &options.github_repo {
            description = changelog::expand_github_links(&description, repo)?;
        }
        self.advance(PublishState::DescriptionExtracted);

        let title = title::resolve_title(
            &options.archive,
            options.title_template.as_deref(),
            &options.tag_extract,
        )?;
        self.advance(PublishState::TitleResolved);

        if !options.archive.is_file() {
            return Err(ValidationError::ArtifactNotFound {
                path: options.archive.clone(),
            }
            .into());
        }
        self.advance(PublishState::ArtifactValidated);

        let metadata = ReleaseMetadata::new(
            description.clone(),
            options.changelog_type,
            title.clone(),
            versions.iter().map(|v| v.id),
            options.release_type,
        )?;

        let summary = ReleaseSummary {
            changelog: description,
            project_id: self.client.config().credentials.project_id.clone(),
            project_title: self.project_title(options.show_project).await,
            archive: std::path::absolute(&options.archive)?,
            title,
            versions: versions.into_iter().map(|v| v.name).collect(),
            release_type: options.release_type,
        };

        self.advance(PublishState::AwaitingConfirmation);
        self.prompt.show_summary(&summary)?;
        let answer = self.prompt.read_answer("Continue?")?;
        if !is_affirmative(&answer) {
            log::info!("Publish aborted by user");
            self.advance(PublishState::Aborted);
            return Ok(PublishOutcome::Aborted(AbortReason::OperatorDeclined));
        }

        self.advance(PublishState::Publishing);
        let response = self.client.upload_file(&options.archive, metadata).await?;
        self.advance(PublishState::Done);
        Ok(PublishOutcome::Published(response))
    }

    async fn project_title(&self, enabled: bool) -> Option<String> {
        if !enabled {
            return None;
        }
        match self.client.project_details().await {
            Ok(details) => details
                .get("title")
                .and_then(|title| title.as_str())
                .map(str::to_string),
            Err(e) => {
                log::warn!("Cannot get project details: {}", e);
                None
            }
        }
    }
}
