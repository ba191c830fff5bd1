//! Upload metadata sent alongside the release archive.

use super::versions::VersionId;
use crate::error::{Result, ValidationError};
use serde::Serialize;
use std::fmt;

/// Markup used by the changelog text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChangelogType {
    /// Plain text
    Text,
    /// HTML
    Html,
    /// Markdown
    #[default]
    Markdown,
}

/// Release channel of the uploaded file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseType {
    /// Stable release
    #[default]
    Release,
    /// Alpha build
    Alpha,
    /// Beta build
    Beta,
}

impl fmt::Display for ChangelogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangelogType::Text => write!(f, "text"),
            ChangelogType::Html => write!(f, "html"),
            ChangelogType::Markdown => write!(f, "markdown"),
        }
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseType::Release => write!(f, "release"),
            ReleaseType::Alpha => write!(f, "alpha"),
            ReleaseType::Beta => write!(f, "beta"),
        }
    }
}

/// Metadata part of an upload request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseMetadata {
    changelog: String,
    changelog_type: ChangelogType,
    display_name: String,
    game_versions: Vec<VersionId>,
    release_type: ReleaseType,
}

impl ReleaseMetadata {
    /// Build metadata for one publish attempt.
    ///
    /// Version ids are de-duplicated keeping their first position. Fails when
    /// the display name is blank or no versions are given.
    pub fn new(
        changelog: impl Into<String>,
        changelog_type: ChangelogType,
        display_name: impl Into<String>,
        game_versions: impl IntoIterator<Item = VersionId>,
        release_type: ReleaseType,
    ) -> Result<Self> {
        let display_name = display_name.into();
        if display_name.trim().is_empty() {
            return Err(ValidationError::InvalidMetadata {
                reason: "display name is empty".to_string(),
            }
            .into());
        }

        let mut versions: Vec<VersionId> = Vec::new();
        for id in game_versions {
            if !versions.contains(&id) {
                versions.push(id);
            }
        }
        if versions.is_empty() {
            return Err(ValidationError::InvalidMetadata {
                reason: "no game versions selected".to_string(),
            }
            .into());
        }

        Ok(Self {
            changelog: changelog.into(),
            changelog_type,
            display_name,
            game_versions: versions,
            release_type,
        })
    }

    /// Release description
    pub fn changelog(&self) -> &str {
        &self.changelog
    }

    /// Changelog markup
    pub fn changelog_type(&self) -> ChangelogType {
        self.changelog_type
    }

    /// Title shown on the service
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Target version ids
    pub fn game_versions(&self) -> &[VersionId] {
        &self.game_versions
    }

    /// Release channel
    pub fn release_type(&self) -> ReleaseType {
        self.release_type
    }

    /// Wire form of the metadata field
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let metadata = ReleaseMetadata::new(
            "* Fixed bugs",
            ChangelogType::Markdown,
            "KIS v1.17",
            [VersionId(10), VersionId(11)],
            ReleaseType::Beta,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&metadata.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "changelog": "* Fixed bugs",
                "changelogType": "markdown",
                "displayName": "KIS v1.17",
                "gameVersions": [10, 11],
                "releaseType": "beta",
            })
        );
    }

    #[test]
    fn test_duplicate_versions_collapse() {
        let metadata = ReleaseMetadata::new(
            "",
            ChangelogType::Text,
            "t",
            [VersionId(3), VersionId(1), VersionId(3)],
            ReleaseType::Release,
        )
        .unwrap();
        assert_eq!(metadata.game_versions(), &[VersionId(3), VersionId(1)]);
    }

    #[test]
    fn test_empty_versions_rejected() {
        let err = ReleaseMetadata::new(
            "",
            ChangelogType::Text,
            "t",
            Vec::<VersionId>::new(),
            ReleaseType::Release,
        )
        .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_blank_title_rejected() {
        let err = ReleaseMetadata::new(
            "",
            ChangelogType::Html,
            "  ",
            [VersionId(1)],
            ReleaseType::Alpha,
        )
        .unwrap_err();
        assert!(err.to_string().contains("display name"));
    }
}
