//! Release publishing workflow.
//!
//! This module drives a single publish attempt: version resolution, changelog
//! extraction, title resolution, artifact check, operator confirmation and the
//! upload itself.

mod prompt;
mod workflow;

pub use prompt::{ConfirmationPrompt, ScriptedPrompt, TerminalPrompt, is_affirmative};
pub use workflow::Publisher;

use crate::api::{ChangelogType, ReleaseType, VersionSelector};
use regex::Regex;
use std::fmt;
use std::path::PathBuf;

/// Steps of a publish attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishState {
    /// Nothing done yet
    Init,
    /// Target versions are known
    VersionsResolved,
    /// Release description is extracted
    DescriptionExtracted,
    /// Release title is known
    TitleResolved,
    /// Archive exists on disk
    ArtifactValidated,
    /// Summary shown, waiting for the operator
    AwaitingConfirmation,
    /// Upload in flight
    Publishing,
    /// Upload accepted
    Done,
    /// Stopped without uploading
    Aborted,
}

/// Inputs of a publish attempt
#[derive(Debug, Clone)]
pub struct PublishOptions {
    /// Target version selector
    pub versions: VersionSelector,
    /// CHANGELOG path
    pub changelog: PathBuf,
    /// Line pattern ending the release description
    pub changelog_breaker: Regex,
    /// Archive to upload
    pub archive: PathBuf,
    /// Title template with `{tag}` placeholder
    pub title_template: Option<String>,
    /// Pattern extracting the tag from the archive name
    pub tag_extract: Regex,
    /// `owner/repo` used to expand GitHub-local links in the changelog
    pub github_repo: Option<String>,
    /// Release channel
    pub release_type: ReleaseType,
    /// Changelog markup
    pub changelog_type: ChangelogType,
    /// Look up the project title for the summary
    pub show_project: bool,
}

/// What the operator reviews before confirming
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSummary {
    /// Extracted release description
    pub changelog: String,
    /// Target project id
    pub project_id: String,
    /// Project title, when looked up
    pub project_title: Option<String>,
    /// Absolute archive path
    pub archive: PathBuf,
    /// Release title
    pub title: String,
    /// Target version names
    pub versions: Vec<String>,
    /// Release channel
    pub release_type: ReleaseType,
}

/// Why a publish attempt stopped without uploading
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbortReason {
    /// The version selector matched nothing
    NoMatchingVersions {
        /// Selector as given
        selector: String,
    },
    /// The operator did not confirm
    OperatorDeclined,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortReason::NoMatchingVersions { selector } => {
                write!(f, "no matching versions for '{}'", selector)
            }
            AbortReason::OperatorDeclined => write!(f, "aborted by user"),
        }
    }
}

/// Terminal result of a publish attempt that did not fail
#[derive(Debug, Clone, PartialEq)]
pub enum PublishOutcome {
    /// Upload accepted; the service response
    Published(serde_json::Value),
    /// Stopped before uploading
    Aborted(AbortReason),
}

impl PublishOutcome {
    /// Process exit code for this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            PublishOutcome::Published(_) => 0,
            PublishOutcome::Aborted(_) => 1,
        }
    }
}
