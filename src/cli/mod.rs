//! Command line interface for forge_release.
//!
//! This module provides argument parsing, command execution, and user feedback.

mod args;
pub mod commands;
mod output;

pub use args::{Args, expand_args_files};
pub use commands::{build_api_config, build_publish_options, execute_command};
pub use output::OutputManager;

use crate::error::Result;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args()?;
    execute_command(args).await
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    output: OutputManager,
}

impl RuntimeConfig {
    /// Create runtime configuration
    pub fn new() -> Self {
        Self {
            output: OutputManager::new(),
        }
    }

    /// Get a reference to the output manager
    pub fn output(&self) -> &OutputManager {
        &self.output
    }

    /// Print message
    pub fn println(&self, message: &str) {
        let _ = self.output.println(message);
    }

    /// Print error message (always shown)
    pub fn error_println(&self, message: &str) {
        self.output.error(message);
    }

    /// Print warning message
    pub fn warning_println(&self, message: &str) {
        let _ = self.output.warn(message);
    }

    /// Print success message
    pub fn success_println(&self, message: &str) {
        let _ = self.output.success(message);
    }

    /// Print info message
    pub fn info_println(&self, message: &str) {
        let _ = self.output.info(message);
    }

    /// Print indented text
    pub fn indent(&self, message: &str) {
        let _ = self.output.indent(message);
    }
}
