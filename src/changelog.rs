//! Release description extraction from a CHANGELOG file.
//!
//! The newest release is expected at the top of the file. Its description is
//! the first block of lines after any leading blank lines, up to the first line
//! matching the breaker pattern (a blank line by default). Markdown is passed
//! through untouched.

use crate::error::{Result, ValidationError};
use crate::pattern::{self, matches_at_start};
use regex::Regex;
use std::path::Path;

/// Breaker used when the caller does not supply one: a whitespace-only line.
pub const DEFAULT_BREAKER: &str = r"^\s*$";

/// Isolate the latest release description from changelog lines.
///
/// Leading blank lines are skipped. Once content has started, the first line
/// whose trimmed text matches `breaker` at its start ends the description.
/// Returns an empty string for empty or all-blank input.
pub fn extract_description<I, S>(lines: I, breaker: &Regex) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut collected: Vec<String> = Vec::new();
    for line in lines {
        let line = line.as_ref();
        let trimmed = line.trim();
        if collected.is_empty() {
            if trimmed.is_empty() {
                continue;
            }
        } else if matches_at_start(breaker, trimmed) {
            break;
        }
        collected.push(line.to_string());
    }
    collected.join("\n").trim().to_string()
}

/// Read `path` and extract the latest release description from it.
pub fn read_description(path: &Path, breaker: &Regex) -> Result<String> {
    let content =
        std::fs::read_to_string(path).map_err(|source| ValidationError::ChangelogUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
    let description = extract_description(content.lines(), breaker);
    log::debug!(
        "Extracted {} bytes of description from {}",
        description.len(),
        path.display()
    );
    Ok(description)
}

/// Rewrite GitHub-local references into absolute links for `repo` (`owner/name`).
///
/// `#123` becomes a link to issue 123; `[text](wiki/Page)` points at the
/// project wiki.
pub fn expand_github_links(markup: &str, repo: &str) -> Result<String> {
    let issues = pattern::compile(r"#(\d+)")?;
    let wiki = pattern::compile(r"\[(.+?)\]\((wiki/.+?)\)")?;

    let issue_link = format!("[#${{1}}](https://github.com/{repo}/issues/${{1}})");
    let markup = issues.replace_all(markup, issue_link.as_str());

    let wiki_link = format!("[${{1}}](https://github.com/{repo}/${{2}})");
    Ok(wiki.replace_all(&markup, wiki_link.as_str()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_breaker() -> Regex {
        pattern::compile(DEFAULT_BREAKER).unwrap()
    }

    #[test]
    fn test_first_paragraph_after_leading_blanks() {
        let lines = ["", "", "Fixed bugs.", "Added stuff.", "", "## Older release"];
        assert_eq!(
            extract_description(lines, &blank_breaker()),
            "Fixed bugs.\nAdded stuff."
        );
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let lines = ["  ", "* Item one", "  * nested", "* Item two", "", "old"];
        let first = extract_description(lines, &blank_breaker());
        let again = extract_description(first.lines(), &blank_breaker());
        assert_eq!(first, again);
    }

    #[test]
    fn test_internal_whitespace_is_kept() {
        let lines = ["# 1.5", "  * indented item", "* item\twith tab"];
        assert_eq!(
            extract_description(lines, &blank_breaker()),
            "# 1.5\n  * indented item\n* item\twith tab"
        );
    }

    #[test]
    fn test_empty_and_blank_input() {
        let empty: [&str; 0] = [];
        assert_eq!(extract_description(empty, &blank_breaker()), "");
        assert_eq!(extract_description(["", "   ", "\t"], &blank_breaker()), "");
    }

    #[test]
    fn test_custom_breaker_stops_at_matching_line() {
        let breaker = pattern::compile("BreakHere").unwrap();
        let lines = ["First.", "", "Still first.", "  BreakHere  ", "Not included."];
        assert_eq!(
            extract_description(lines, &breaker),
            "First.\n\nStill first."
        );
    }

    #[test]
    fn test_breaker_is_anchored_at_line_start() {
        let breaker = pattern::compile("##").unwrap();
        let lines = ["# v1.5", "* mentions ## inline", "## v1.4", "* old"];
        assert_eq!(
            extract_description(lines, &breaker),
            "# v1.5\n* mentions ## inline"
        );
    }

    #[test]
    fn test_breaker_ignored_before_content() {
        let breaker = pattern::compile("#").unwrap();
        let lines = ["", "# v1.5", "* new", "# v1.4"];
        assert_eq!(extract_description(lines, &breaker), "# v1.5\n* new");
    }

    #[test]
    fn test_read_description_missing_file() {
        let err = read_description(Path::new("/nonexistent/CHANGELOG.md"), &blank_breaker())
            .unwrap_err();
        assert!(matches!(
            err,
            crate::ReleaseError::Validation(ValidationError::ChangelogUnreadable { .. })
        ));
    }

    #[test]
    fn test_read_description_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("CHANGELOG.md");
        std::fs::write(&path, "\r\n# 1.5\r\n* Fix\r\n\r\n# 1.4\r\n").unwrap();
        assert_eq!(
            read_description(&path, &blank_breaker()).unwrap(),
            "# 1.5\n* Fix"
        );
    }

    #[test]
    fn test_expand_github_links() {
        let text = "* Fix crash [#12] and #7.\n* See [docs](wiki/Setup).";
        let expanded = expand_github_links(text, "ihsoft/KIS").unwrap();
        assert_eq!(
            expanded,
            "* Fix crash [[#12](https://github.com/ihsoft/KIS/issues/12)] and \
             [#7](https://github.com/ihsoft/KIS/issues/7).\n\
             * See [docs](https://github.com/ihsoft/KIS/wiki/Setup)."
        );
    }
}
