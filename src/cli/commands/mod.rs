//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod completions;
pub mod validate;
pub mod version;

use crate::cli::args::{Cli, Commands};
use crate::error::{ExitCode, Result};

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// Returns the process exit code on completion. A failed validation is a
/// completed command with a non-zero code, not an error.
///
/// # Errors
///
/// Returns an error if the dispatched command cannot write its output.
pub fn dispatch(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Validate(args) => validate::run(&args),
        Commands::Completions(args) => {
            completions::run(&args);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Version(args) => {
            version::run(&args)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
