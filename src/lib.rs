//! # Forge Release
//!
//! Publish mod release archives to a CurseForge-style hosting service.
//!
//! A publish run resolves the target game versions, takes the release
//! description from the top of the CHANGELOG, derives the release title from
//! the archive name, shows a summary, and uploads the archive only after the
//! operator confirms.
//!
//! ## Features
//!
//! - **Version selection**: start-anchored regex, `latest` or `latest_all_builds`
//! - **Changelog extraction**: first paragraph or up to a custom breaker line
//! - **Title templates**: `MyMod {tag}` with the tag taken from the archive name
//! - **Confirmation gate**: nothing is uploaded without an explicit `y`
//!
//! ## Usage
//!
//! ```bash
//! forge_release --project=123456 --token=<token> --changelog=CHANGELOG.md \
//!     --versions='1\.4\.' --archive=./my_mod_v1.5.zip --title='MyMod {tag}'
//! forge_release @params.txt
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod api;
pub mod changelog;
pub mod cli;
pub mod error;
pub mod pattern;
pub mod publish;
pub mod title;

pub use api::{ApiClient, ApiConfig, Credentials, GameVersion, ReleaseMetadata, VersionSelector};
pub use cli::Args;
pub use error::{ApiError, CliError, ReleaseError, Result, ValidationError};
pub use publish::{PublishOptions, PublishOutcome, PublishState, Publisher};
