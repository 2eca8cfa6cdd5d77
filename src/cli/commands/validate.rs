//! `validate` command handler
//!
//! Reads the configuration and build config from disk, runs the validation
//! pipeline, prints the report and picks the exit code.

use std::io::Write;
use std::path::Path;

use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::error::{AdvisoryError, Result, ValidationError};
use crate::validation::{ValidateOptions, ValidationReport, validate};

/// Validate a configuration file.
///
/// Returns the exit code: `0` when every mandatory check passed, `1`
/// otherwise. The build-config advisory check never affects it.
///
/// # Errors
///
/// Returns an error only if the report cannot be written.
pub fn run(args: &ValidateArgs) -> Result<i32> {
    let label = args.config.display().to_string();
    tracing::info!(config = %label, "validating configuration");

    let options = ValidateOptions {
        label: label.clone(),
        suppression_scope: args.suppression_scope,
    };

    let report = match std::fs::read_to_string(&args.config) {
        Ok(text) => validate(&text, || read_build_config(&args.build_config), &options),
        Err(source) => ValidationReport {
            failure: Some(ValidationError::Read {
                path: args.config.clone(),
                source,
            }),
            ..ValidationReport::default()
        },
    };

    match &report.failure {
        None => tracing::info!(config = %label, "configuration valid"),
        Some(err) => tracing::info!(config = %label, kind = err.kind(), "configuration invalid"),
    }

    match args.format {
        OutputFormat::Human => {
            let stdout = std::io::stdout();
            let stderr = std::io::stderr();
            report.render_human(&label, &mut stdout.lock(), &mut stderr.lock())?;
        }
        OutputFormat::Json => {
            let mut stdout = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &report.to_json(&label))?;
            writeln!(stdout)?;
        }
    }

    Ok(report.exit_code())
}

fn read_build_config(path: &Path) -> std::result::Result<String, AdvisoryError> {
    tracing::debug!(build_config = %path.display(), "reading build config");
    std::fs::read_to_string(path).map_err(|source| AdvisoryError::Read {
        path: path.to_path_buf(),
        source,
    })
}
