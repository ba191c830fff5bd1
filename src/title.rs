//! Release title derivation from the archive file name.

use crate::error::{Result, ValidationError};
use regex::Regex;
use std::path::Path;

/// Default tag extraction: the `v<version>` suffix before `.zip`.
pub const DEFAULT_TAG_EXTRACT: &str = r".+?_(v.+?)\.zip";

/// Placeholder replaced by the extracted tag in a title template.
pub const TAG_PLACEHOLDER: &str = "{tag}";

/// Resolve the display name of a release.
///
/// Without a template the archive base name minus its extension is used. With
/// a template, `tag_extract` must match the base name exactly once; the first
/// capture group (or the whole match) replaces every `{tag}` in the template.
pub fn resolve_title(archive: &Path, template: Option<&str>, tag_extract: &Regex) -> Result<String> {
    let Some(template) = template else {
        return Ok(archive
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default());
    };

    let file_name = archive
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tag = extract_tag(&file_name, tag_extract)?;
    log::debug!("Extracted tag '{}' from {}", tag, file_name);
    Ok(template.replace(TAG_PLACEHOLDER, &tag))
}

/// Extract the single version tag from `file_name`.
pub fn extract_tag(file_name: &str, tag_extract: &Regex) -> Result<String> {
    let group = if tag_extract.captures_len() > 1 { 1 } else { 0 };
    let tags: Vec<String> = tag_extract
        .captures_iter(file_name)
        .map(|caps| {
            caps.get(group)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default()
        })
        .collect();

    match <[String; 1]>::try_from(tags) {
        Ok([tag]) => Ok(tag),
        Err(tags) => Err(ValidationError::TagExtraction {
            file_name: file_name.to_string(),
            pattern: tag_extract.as_str().to_string(),
            matches: tags.len(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern;

    fn default_extract() -> Regex {
        pattern::compile(DEFAULT_TAG_EXTRACT).unwrap()
    }

    #[test]
    fn test_title_from_template() {
        let title = resolve_title(
            Path::new("my_mod_v1.5.zip"),
            Some("Release_{tag}"),
            &default_extract(),
        )
        .unwrap();
        assert_eq!(title, "Release_v1.5");
    }

    #[test]
    fn test_title_without_template_uses_stem() {
        let title = resolve_title(Path::new("./dist/my_mod_v1.5.zip"), None, &default_extract())
            .unwrap();
        assert_eq!(title, "my_mod_v1.5");
    }

    #[test]
    fn test_template_uses_base_name_only() {
        let title = resolve_title(
            Path::new("/builds/other_v9.zip/my_mod_v2.0.zip"),
            Some("MyMod \"Awesome!\" {tag}"),
            &default_extract(),
        )
        .unwrap();
        assert_eq!(title, "MyMod \"Awesome!\" v2.0");
    }

    #[test]
    fn test_template_passes_other_braces_through() {
        let title = resolve_title(
            Path::new("kis_v1.17.zip"),
            Some("KIS {tag} ({tag}) {build}"),
            &default_extract(),
        )
        .unwrap();
        assert_eq!(title, "KIS v1.17 (v1.17) {build}");
    }

    #[test]
    fn test_zero_matches_fail() {
        let err = resolve_title(Path::new("my_mod.zip"), Some("{tag}"), &default_extract())
            .unwrap_err();
        match err {
            crate::ReleaseError::Validation(ValidationError::TagExtraction { matches, .. }) => {
                assert_eq!(matches, 0)
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_multiple_matches_fail() {
        let extract = pattern::compile(r"(v\d+)").unwrap();
        let err = extract_tag("mod_v1_v2.zip", &extract).unwrap_err();
        match err {
            crate::ReleaseError::Validation(ValidationError::TagExtraction { matches, .. }) => {
                assert_eq!(matches, 2)
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_pattern_without_group_uses_whole_match() {
        let extract = pattern::compile(r"v\d+\.\d+").unwrap();
        assert_eq!(extract_tag("mod_v3.1.zip", &extract).unwrap(), "v3.1");
    }
}
