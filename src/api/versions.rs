//! Game versions known to the service and the selectors that pick among them.

use crate::error::Result;
use crate::pattern::{self, matches_at_start};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Service-side identifier of a game version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionId(pub u64);

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A game version as listed by the service
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameVersion {
    /// Human label, e.g. `1.4.5`
    pub name: String,
    /// Identifier used in upload metadata
    pub id: VersionId,
}

/// How the target versions of a release are chosen
#[derive(Debug, Clone)]
pub enum VersionSelector {
    /// The single most recent version
    Latest,
    /// Every build of the most recent `major.minor` line
    LatestAllBuilds,
    /// Versions whose name matches the pattern from its first character
    Pattern(Regex),
}

impl VersionSelector {
    /// Parse the `--versions` argument.
    ///
    /// `latest` and `latest_all_builds` are keywords; anything else is a
    /// regular expression.
    pub fn parse(text: &str) -> Result<Self> {
        match text {
            "latest" => Ok(Self::Latest),
            "latest_all_builds" => Ok(Self::LatestAllBuilds),
            pattern => Ok(Self::Pattern(pattern::compile(pattern)?)),
        }
    }

    /// Apply the selector to a full version list
    pub fn select(&self, versions: &[GameVersion]) -> Result<Vec<GameVersion>> {
        match self {
            Self::Pattern(re) => Ok(filter_by_pattern(versions, re)),
            Self::Latest => Ok(newest_first(versions).into_iter().take(1).collect()),
            Self::LatestAllBuilds => latest_all_builds(versions),
        }
    }
}

impl fmt::Display for VersionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => write!(f, "latest"),
            Self::LatestAllBuilds => write!(f, "latest_all_builds"),
            Self::Pattern(re) => write!(f, "{}", re.as_str()),
        }
    }
}

/// Versions whose name matches `re` from its start, in their original order
pub fn filter_by_pattern(versions: &[GameVersion], re: &Regex) -> Vec<GameVersion> {
    versions
        .iter()
        .filter(|version| matches_at_start(re, &version.name))
        .cloned()
        .collect()
}

fn newest_first(versions: &[GameVersion]) -> Vec<GameVersion> {
    let mut sorted = versions.to_vec();
    sorted.sort_by(|a, b| b.id.cmp(&a.id));
    sorted
}

fn latest_all_builds(versions: &[GameVersion]) -> Result<Vec<GameVersion>> {
    let sorted = newest_first(versions);
    let Some(newest) = sorted.first() else {
        return Ok(Vec::new());
    };

    let line = pattern::compile(r"^(.+?\..+?)(\..+)?$")?;
    let Some(prefix) = line
        .captures(&newest.name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
    else {
        log::warn!("Cannot find a major.minor prefix in version '{}'", newest.name);
        return Ok(Vec::new());
    };

    log::debug!("Selecting all builds of {}", prefix);
    Ok(sorted
        .into_iter()
        .filter(|version| version.name.starts_with(&prefix))
        .collect())
}
