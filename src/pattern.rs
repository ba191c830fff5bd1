//! Regular expression helpers shared by the version, changelog and title logic.

use crate::error::{Result, ValidationError};
use regex::Regex;

/// Compile a user supplied pattern, reporting the pattern text on failure.
pub fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| {
        ValidationError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        }
        .into()
    })
}

/// True when `re` matches `text` starting at its first character.
///
/// The match may end anywhere: `1\.4` matches `1.4.10`. Leftmost match
/// semantics guarantee that a match at offset 0 is found whenever one exists.
pub fn matches_at_start(re: &Regex, text: &str) -> bool {
    re.find(text).is_some_and(|m| m.start() == 0)
}
