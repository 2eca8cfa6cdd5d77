//! Error types for `configguard`
//!
//! This module provides the error hierarchy for the validation pipeline:
//! fatal validation failures, non-fatal advisory failures, and the
//! top-level error that maps onto process exit codes.

use std::path::PathBuf;
use thiserror::Error;

use crate::validation::secrets::SecretKind;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `configguard` CLI operations.
///
/// Every mandatory-check failure maps to [`ExitCode::FAILURE`].
pub struct ExitCode;

impl ExitCode {
    /// All mandatory checks passed
    pub const SUCCESS: i32 = 0;

    /// A mandatory check failed (read, parse, fields, models, secrets)
    pub const FAILURE: i32 = 1;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `configguard` operations.
#[derive(Debug, Error)]
pub enum ConfigGuardError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigGuardError {
    /// Returns the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) | Self::Json(_) => ExitCode::FAILURE,
        }
    }
}

// ============================================================================
// Validation Errors
// ============================================================================

/// Fatal failures of the validation pipeline.
///
/// The first one encountered aborts the remaining stages.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The configuration file could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path to the configuration file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid YAML
    #[error("YAML validation failed: {message}")]
    Parse {
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Column number where the error occurred (if available)
        column: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// One or more of `name`, `version`, `schema` is absent or falsy
    #[error("Missing required fields: {}", fields.join(", "))]
    MissingFields {
        /// Missing field names in fixed order
        fields: Vec<&'static str>,
        /// Likely misspellings found among the top-level keys
        hints: Vec<FieldHint>,
    },

    /// A `models` entry lacks `name`, `provider` or `model`
    #[error(
        "Model {index} missing required fields (name, provider, model): missing {}",
        missing.join(", ")
    )]
    InvalidModelEntry {
        /// 1-based position in the `models` sequence
        index: usize,
        /// Which of the entry fields are absent or falsy
        missing: Vec<&'static str>,
    },

    /// A hardcoded credential was found in the raw text
    #[error("Potential sensitive data found: {kind} on line {line}")]
    SensitiveData {
        /// Which pattern matched
        kind: SecretKind,
        /// 1-based line where the match starts
        line: usize,
    },
}

impl ValidationError {
    /// Stable identifier used in machine-readable output.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Read { .. } => "read",
            Self::Parse { .. } => "parse",
            Self::MissingFields { .. } => "missing_fields",
            Self::InvalidModelEntry { .. } => "invalid_model_entry",
            Self::SensitiveData { .. } => "sensitive_data",
        }
    }

    /// Follow-up lines printed under the error message.
    #[must_use]
    pub fn details(&self) -> Vec<String> {
        match self {
            Self::MissingFields { hints, .. } => hints.iter().map(ToString::to_string).collect(),
            Self::SensitiveData { .. } => vec![SECRET_REMEDIATION.to_string()],
            _ => Vec::new(),
        }
    }

    /// 1-based line the failure points at, if any.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::Parse { line, .. } => *line,
            Self::SensitiveData { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// 1-based column the failure points at, if any.
    #[must_use]
    pub const fn column(&self) -> Option<usize> {
        match self {
            Self::Parse { column, .. } => *column,
            _ => None,
        }
    }
}

/// Guidance attached to sensitive-data failures.
pub const SECRET_REMEDIATION: &str =
    "Use ${{ secrets.SECRET_NAME }} instead of hardcoded values";

/// A top-level key that looks like a misspelled required field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldHint {
    /// The required field that is missing
    pub field: &'static str,
    /// The key actually present in the document
    pub candidate: String,
}

impl std::fmt::Display for FieldHint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "did you mean '{}' instead of '{}'?", self.field, self.candidate)
    }
}

// ============================================================================
// Advisory Errors
// ============================================================================

/// Failures of the build-config advisory check.
///
/// These are reported as warnings and never change the exit status.
#[derive(Debug, Error)]
pub enum AdvisoryError {
    /// The build config could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path to the build config
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The build config is not valid JSON
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `configguard` operations.
pub type Result<T> = std::result::Result<T, ConfigGuardError>;

// ============================================================================
// Tests
// ============================================================================
