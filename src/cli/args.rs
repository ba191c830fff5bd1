//! Command line argument parsing and validation.
//!
//! Arguments may also come from files: `@params.txt` is replaced by the lines
//! of that file, one argument per line, taken verbatim. This avoids quoting and
//! backslash escaping for regular expressions and titles.

use crate::api::{ChangelogType, DEFAULT_BASE_URL, ReleaseType};
use crate::changelog::DEFAULT_BREAKER;
use crate::error::{CliError, Result};
use crate::title::DEFAULT_TAG_EXTRACT;
use clap::Parser;
use std::path::PathBuf;

/// Publish a release archive to a CurseForge-style project
#[derive(Parser, Debug)]
#[command(
    name = "forge_release",
    version,
    about = "Publish a release archive to a CurseForge-style project",
    long_about = "Publish a release archive to a CurseForge-style project.

The release description is the topmost block of lines in the CHANGELOG, up to
the first empty line (or --changelog-breaker). The summary is shown before
anything is uploaded; answer \"y\" to publish. Releases cannot be deleted from
the service, review them carefully.

Arguments can be provided via a file, one argument per line, no escaping:
  forge_release @params.txt",
    after_help = "Example:
  forge_release --project=123456 --token=<API token> \\
    --changelog=CHANGELOG.md --versions='1\\.4\\.' --archive=./my_mod_v1.5.zip \\
    --title='MyMod {tag}'"
)]
pub struct Args {
    /// ID of the project to publish to (see the project overview page)
    #[arg(long, value_name = "PROJECT_ID")]
    pub project: String,

    /// API token (Account/Preferences/My API Tokens)
    #[arg(long, value_name = "TOKEN", env = "FORGE_API_TOKEN", hide_env_values = true)]
    pub token: String,

    /// File to take the release description from
    #[arg(long, value_name = "PATH")]
    pub changelog: PathBuf,

    /// Archive file to publish
    #[arg(long, value_name = "PATH")]
    pub archive: PathBuf,

    /// Target game versions: "latest", "latest_all_builds" or a regexp matched
    /// from the start of the version name
    #[arg(long, value_name = "SELECTOR")]
    pub versions: String,

    /// Release name pattern; {tag} is replaced by the extracted version tag.
    /// The archive name is used when omitted
    #[arg(long, value_name = "PATTERN")]
    pub title: Option<String>,

    /// Regexp ending the release description in the CHANGELOG, applied per line
    #[arg(long, value_name = "REGEX", default_value = DEFAULT_BREAKER)]
    pub changelog_breaker: String,

    /// Regexp extracting the version tag from the archive name
    #[arg(long, value_name = "REGEX", default_value = DEFAULT_TAG_EXTRACT)]
    pub tag_extract: String,

    /// GitHub "owner/repo" used to expand #123 and wiki/ links in the changelog
    #[arg(long, value_name = "OWNER/REPO")]
    pub github: Option<String>,

    /// Release channel
    #[arg(long, value_enum, default_value_t = ReleaseType::Release)]
    pub release_type: ReleaseType,

    /// Markup of the changelog text
    #[arg(long, value_enum, default_value_t = ChangelogType::Markdown)]
    pub changelog_type: ChangelogType,

    /// Service root URL
    #[arg(long, value_name = "URL", env = "FORGE_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Request timeout in seconds (0 disables the timeout)
    #[arg(long, value_name = "SECONDS", default_value_t = 300)]
    pub timeout: u64,

    /// Look up the project title for the confirmation summary
    #[arg(long)]
    pub show_project: bool,
}

impl Args {
    /// Parse the process arguments, expanding `@file` references
    pub fn parse_args() -> Result<Self> {
        let args = expand_args_files(std::env::args())?;
        Ok(Self::parse_from(args))
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.project.trim().is_empty() {
            return Err("--project must not be empty".to_string());
        }
        if self.versions.is_empty() {
            return Err("--versions must not be empty".to_string());
        }
        if let Some(title) = &self.title
            && title.trim().is_empty()
        {
            return Err("--title must not be empty".to_string());
        }
        Ok(())
    }
}

/// Replace every `@path` argument with the non-empty lines of that file.
///
/// The first argument (program name) is never expanded. Lines are taken as-is
/// apart from the line terminator.
pub fn expand_args_files<I>(args: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = String>,
{
    let mut expanded = Vec::new();
    for (index, arg) in args.into_iter().enumerate() {
        match arg.strip_prefix('@') {
            Some(path) if index > 0 && !path.is_empty() => {
                let path = PathBuf::from(path);
                let content =
                    std::fs::read_to_string(&path).map_err(|source| CliError::ArgsFile {
                        path: path.clone(),
                        source,
                    })?;
                log::debug!("Reading arguments from {}", path.display());
                expanded.extend(
                    content
                        .lines()
                        .filter(|line| !line.is_empty())
                        .map(str::to_string),
                );
            }
            _ => expanded.push(arg),
        }
    }
    Ok(expanded)
}
