//! Validation report and its renderings.
//!
//! The report collects the notices emitted by each pipeline stage and the
//! fatal failure (if any). The CLI renders it either as glyph-prefixed
//! status lines or as a single JSON object.

use std::io::{self, Write};

use serde::Serialize;

use crate::error::{ExitCode, ValidationError};

/// Pipeline stage that produced a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Reading and parsing the configuration.
    Parse,
    /// Required top-level fields.
    RequiredFields,
    /// `models` entries.
    Models,
    /// Raw-text credential scan.
    SensitiveData,
    /// Build-config advisory check.
    Advisory,
    /// End of the pipeline.
    Complete,
}

/// Severity of a non-fatal notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    /// A stage passed.
    Success,
    /// Informational.
    Info,
    /// Something worth a look that does not fail the run.
    Warning,
}

/// One status line of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Stage that emitted it.
    pub stage: Stage,
    /// Human-readable text.
    pub message: String,
}

impl Notice {
    /// Returns the glyph prefix used in human output.
    #[must_use]
    pub const fn glyph(&self) -> &'static str {
        match (self.stage, self.level) {
            (Stage::Complete, _) => "🎉",
            (_, NoticeLevel::Success) => "✅",
            (_, NoticeLevel::Info) => "ℹ️ ",
            (_, NoticeLevel::Warning) => "⚠️ ",
        }
    }
}

/// Facts gathered by the mandatory stages of a passing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConfigSummary {
    /// Number of `models` entries, `None` when `models` is absent.
    pub models: Option<usize>,
}

/// Outcome of one validation run.
#[derive(Debug, Default)]
pub struct ValidationReport {
    /// Status lines in emission order.
    pub notices: Vec<Notice>,
    /// Set when every mandatory stage passed.
    pub summary: Option<ConfigSummary>,
    /// The fatal failure that stopped the pipeline.
    pub failure: Option<ValidationError>,
}

impl ValidationReport {
    /// Appends a notice.
    pub fn push(&mut self, level: NoticeLevel, stage: Stage, message: impl Into<String>) {
        self.notices.push(Notice {
            level,
            stage,
            message: message.into(),
        });
    }

    /// Returns `true` if no mandatory stage failed.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.failure.is_none()
    }

    /// Returns the process exit code for this outcome.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        if self.is_valid() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }

    /// Writes glyph-prefixed status lines.
    ///
    /// Success and info lines go to `out`; warnings and the failure go to
    /// `err`.
    ///
    /// # Errors
    ///
    /// Returns an error if either writer fails.
    pub fn render_human(
        &self,
        label: &str,
        out: &mut impl Write,
        err: &mut impl Write,
    ) -> io::Result<()> {
        writeln!(out, "🔍 Validating {label}...")?;
        writeln!(out)?;

        for notice in &self.notices {
            match notice.level {
                NoticeLevel::Warning => writeln!(err, "{} {}", notice.glyph(), notice.message)?,
                _ if notice.stage == Stage::Complete => {
                    writeln!(out)?;
                    writeln!(out, "{} {}", notice.glyph(), notice.message)?;
                }
                _ => writeln!(out, "{} {}", notice.glyph(), notice.message)?,
            }
        }

        if let Some(failure) = &self.failure {
            writeln!(err, "❌ {failure}")?;
            for detail in failure.details() {
                writeln!(err, "   {detail}")?;
            }
        }

        Ok(())
    }

    /// Builds the machine-readable form of the report.
    #[must_use]
    pub fn to_json(&self, label: &str) -> serde_json::Value {
        let error = self.failure.as_ref().map(|failure| JsonFailure {
            kind: failure.kind(),
            message: failure.to_string(),
            details: failure.details(),
            line: failure.line(),
            column: failure.column(),
        });

        serde_json::json!({
            "valid": self.is_valid(),
            "config": label,
            "summary": self.summary,
            "notices": self.notices,
            "error": error,
        })
    }
}

#[derive(Debug, Serialize)]
struct JsonFailure {
    kind: &'static str,
    message: String,
    details: Vec<String>,
    line: Option<usize>,
    column: Option<usize>,
}
