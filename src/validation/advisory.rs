//! Build-config advisory check.
//!
//! Looks at the JSON build-tool configuration for a
//! `compilerOptions.outFile` setting. Failures here are warnings only.

use serde_json::Value;

use crate::error::AdvisoryError;

/// What the build config says about bundled output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildConfigStatus {
    /// `compilerOptions.outFile` is set to this value.
    OutFile(String),
    /// No truthy `compilerOptions.outFile`.
    NotConfigured,
}

/// Parses the build config text and inspects `compilerOptions.outFile`.
///
/// # Errors
///
/// Returns [`AdvisoryError::Parse`] if the text is not valid JSON.
pub fn inspect_build_config(text: &str) -> Result<BuildConfigStatus, AdvisoryError> {
    let root: Value = serde_json::from_str(text)?;

    let status = root
        .get("compilerOptions")
        .and_then(|options| options.get("outFile"))
        .filter(|out_file| is_truthy(out_file))
        .map_or(BuildConfigStatus::NotConfigured, |out_file| {
            BuildConfigStatus::OutFile(
                out_file
                    .as_str()
                    .map_or_else(|| out_file.to_string(), str::to_string),
            )
        });

    Ok(status)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() > 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
