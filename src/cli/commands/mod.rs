//! Command execution coordinating the publish workflow.
//!
//! This module turns parsed arguments into client and workflow configuration,
//! runs the workflow, and maps the result to an exit code with user feedback.

mod helpers;
mod publish;

pub use publish::{build_api_config, build_publish_options};

use crate::cli::{Args, RuntimeConfig};
use crate::error::Result;

use helpers::print_recovery_suggestions;
use publish::execute_publish;

/// Execute the publish command based on parsed arguments
pub async fn execute_command(args: Args) -> Result<i32> {
    let config = RuntimeConfig::new();

    if let Err(validation_error) = args.validate() {
        config.error_println(&format!("Invalid arguments: {}", validation_error));
        return Ok(1);
    }

    log::info!("Starting new publish session for project {}", args.project);

    match execute_publish(&args, &config).await {
        Ok(exit_code) => Ok(exit_code),
        Err(e) => {
            let headline = if e.is_validation() {
                "Cannot publish"
            } else {
                "Publish failed"
            };
            config.error_println(&format!("{}: {}", headline, e));

            if let Some(body) = e.server_body()
                && !body.trim().is_empty()
            {
                config.println("\nServer response:");
                config.indent(body.trim());
            }

            print_recovery_suggestions(&config, &e.recovery_suggestions());

            Ok(1)
        }
    }
}
