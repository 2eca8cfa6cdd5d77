//! Configuration validation pipeline.
//!
//! Runs a fixed sequence of stages over one configuration text:
//!
//! 1. parse the YAML
//! 2. required top-level fields (`name`, `version`, `schema`)
//! 3. `models` entries (`name`, `provider`, `model`)
//! 4. raw-text credential scan
//! 5. build-config advisory check
//!
//! Stages 1-4 are fatal and fail fast: the first failure is recorded in the
//! report and nothing after it runs. Stage 5 only ever adds warnings.
//!
//! [`validate`] performs no I/O. The build config is supplied through a
//! closure so it is only read once the mandatory stages have passed.

pub mod advisory;
pub mod document;
pub mod report;
pub mod secrets;
pub mod yaml;

pub use advisory::{BuildConfigStatus, inspect_build_config};
pub use report::{ConfigSummary, Notice, NoticeLevel, Stage, ValidationReport};
pub use secrets::{SecretKind, SuppressionScope};

use serde_yaml::Value;

use crate::error::{AdvisoryError, ValidationError};

/// Options for a validation run.
#[derive(Debug, Clone)]
pub struct ValidateOptions {
    /// Name of the configuration shown in notices (usually its path).
    pub label: String,
    /// Reach of the credential-scan suppression markers.
    pub suppression_scope: SuppressionScope,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            label: "config.yaml".to_string(),
            suppression_scope: SuppressionScope::default(),
        }
    }
}

/// Validates a configuration text.
///
/// `build_config` is called at most once, and only if every mandatory
/// stage passed.
pub fn validate<F>(config_text: &str, build_config: F, options: &ValidateOptions) -> ValidationReport
where
    F: FnOnce() -> Result<String, AdvisoryError>,
{
    let mut report = ValidationReport::default();

    match check_mandatory(config_text, options, &mut report) {
        Ok(summary) => {
            report.summary = Some(summary);
            check_build_config(build_config(), &mut report);
            report.push(
                NoticeLevel::Success,
                Stage::Complete,
                "Configuration validation complete!",
            );
        }
        Err(err) => {
            tracing::debug!(kind = err.kind(), "mandatory check failed");
            report.failure = Some(err);
        }
    }

    report
}

fn check_mandatory(
    text: &str,
    options: &ValidateOptions,
    report: &mut ValidationReport,
) -> Result<ConfigSummary, ValidationError> {
    let doc = parse_document(text)?;
    report.push(
        NoticeLevel::Success,
        Stage::Parse,
        format!("{} syntax is valid", options.label),
    );

    let missing = document::missing_required_fields(&doc);
    if !missing.is_empty() {
        let hints = document::field_hints(&doc, &missing);
        return Err(ValidationError::MissingFields {
            fields: missing,
            hints,
        });
    }
    report.push(
        NoticeLevel::Success,
        Stage::RequiredFields,
        "Required fields present",
    );

    let models = match document::model_entries(&doc) {
        Some(entries) => {
            report.push(
                NoticeLevel::Success,
                Stage::Models,
                format!("Found {} model(s) configured", entries.len()),
            );
            if let Some((index, missing)) = document::first_invalid_model(entries) {
                return Err(ValidationError::InvalidModelEntry { index, missing });
            }
            Some(entries.len())
        }
        None => {
            report.push(NoticeLevel::Info, Stage::Models, "No models configured");
            None
        }
    };

    if let Some(finding) = secrets::scan(text, options.suppression_scope) {
        return Err(ValidationError::SensitiveData {
            kind: finding.kind,
            line: finding.line,
        });
    }
    report.push(
        NoticeLevel::Success,
        Stage::SensitiveData,
        "No sensitive data detected",
    );

    Ok(ConfigSummary { models })
}

fn parse_document(text: &str) -> Result<Value, ValidationError> {
    yaml::parse_document(text).map_err(|e| {
        let location = e.location();
        ValidationError::Parse {
            line: location.as_ref().map(serde_yaml::Location::line),
            column: location.as_ref().map(serde_yaml::Location::column),
            message: e.to_string(),
        }
    })
}

fn check_build_config(input: Result<String, AdvisoryError>, report: &mut ValidationReport) {
    let status = input.and_then(|text| inspect_build_config(&text));

    match status {
        Ok(BuildConfigStatus::OutFile(out_file)) => report.push(
            NoticeLevel::Success,
            Stage::Advisory,
            format!("TypeScript configured (outFile: {out_file})"),
        ),
        Ok(BuildConfigStatus::NotConfigured) => {
            tracing::debug!("build config has no compilerOptions.outFile");
        }
        Err(err) => report.push(
            NoticeLevel::Warning,
            Stage::Advisory,
            format!("Build config validation failed: {err}"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExitCode;

    const VALID: &str = r#"name: "x"
version: "1.0"
schema: "v1"
models:
  - name: "m1"
    provider: "openai"
    model: "gpt-4"
"#;

    fn no_build_config() -> Result<String, AdvisoryError> {
        Err(AdvisoryError::Read {
            path: "tsconfig.json".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        })
    }

    fn run(text: &str) -> ValidationReport {
        validate(text, no_build_config, &ValidateOptions::default())
    }

    fn stages(report: &ValidationReport) -> Vec<Stage> {
        report.notices.iter().map(|n| n.stage).collect()
    }

    #[test]
    fn valid_document_passes() {
        let report = validate(
            VALID,
            || Ok(r#"{"compilerOptions": {"outFile": "out.js"}}"#.to_string()),
            &ValidateOptions::default(),
        );
        assert!(report.is_valid(), "unexpected failure: {:?}", report.failure);
        assert_eq!(report.exit_code(), ExitCode::SUCCESS);
        assert_eq!(report.summary, Some(ConfigSummary { models: Some(1) }));
        assert_eq!(
            stages(&report),
            vec![
                Stage::Parse,
                Stage::RequiredFields,
                Stage::Models,
                Stage::SensitiveData,
                Stage::Advisory,
                Stage::Complete,
            ]
        );
        let last = report.notices.last().expect("notices");
        assert_eq!(last.message, "Configuration validation complete!");
    }

    #[test]
    fn parse_error_stops_pipeline() {
        let report = run("name: [unclosed\nversion: 1\n");
        assert!(matches!(report.failure, Some(ValidationError::Parse { .. })));
        assert!(report.notices.is_empty());
        assert_eq!(report.exit_code(), ExitCode::FAILURE);
    }

    #[test]
    fn missing_fields_reported_in_order() {
        let report = run("schema: v1\nmodels: []\n");
        match &report.failure {
            Some(ValidationError::MissingFields { fields, .. }) => {
                assert_eq!(*fields, vec!["name", "version"]);
            }
            other => panic!("expected MissingFields, got {other:?}"),
        }
        assert_eq!(stages(&report), vec![Stage::Parse]);
    }

    #[test]
    fn missing_fields_carry_hints() {
        let report = run("name: x\nversion: '1'\nschem: v1\n");
        match report.failure {
            Some(ValidationError::MissingFields { fields, hints }) => {
                assert_eq!(fields, vec!["schema"]);
                assert_eq!(hints.len(), 1);
                assert_eq!(hints[0].candidate, "schem");
            }
            other => panic!("expected MissingFields, got {other:?}"),
        }
    }

    #[test]
    fn invalid_model_entry_reports_index() {
        let text = "name: x\nversion: '1'\nschema: v1\nmodels:\n  - {name: a, provider: b, model: c}\n  - {name: a, provider: b, model: c}\n  - {name: a, provider: b}\n  - {}\n";
        let report = run(text);
        match &report.failure {
            Some(ValidationError::InvalidModelEntry { index, missing }) => {
                assert_eq!(*index, 3);
                assert_eq!(*missing, vec!["model"]);
            }
            other => panic!("expected InvalidModelEntry, got {other:?}"),
        }
        assert!(!stages(&report).contains(&Stage::SensitiveData));
    }

    #[test]
    fn absent_models_is_informational() {
        let report = run("name: x\nversion: '1'\nschema: v1\n");
        assert!(report.is_valid());
        assert_eq!(report.summary, Some(ConfigSummary { models: None }));
        assert!(report.notices.iter().any(|n| n.level == NoticeLevel::Info
            && n.stage == Stage::Models
            && n.message == "No models configured"));
        assert!(!report.notices.iter().any(|n| n.level == NoticeLevel::Warning));
    }

    #[test]
    fn oversized_integer_version_is_present() {
        let report = run("name: a\nversion: 99999999999999999999999999\nschema: v1\n");
        assert!(report.is_valid(), "unexpected failure: {:?}", report.failure);
        assert_eq!(report.notices[0].stage, Stage::Parse);
    }

    #[test]
    fn sensitive_data_fails() {
        let report = run("name: x\nversion: '1'\nschema: v1\napikey: abcdefghij1234\n");
        match report.failure {
            Some(ValidationError::SensitiveData { kind, line }) => {
                assert_eq!(kind, SecretKind::ApiKey);
                assert_eq!(line, 4);
            }
            other => panic!("expected SensitiveData, got {other:?}"),
        }
    }

    #[test]
    fn hash_anywhere_suppresses_in_file_scope() {
        let report = run("# team config\nname: x\nversion: '1'\nschema: v1\napikey: abcdefghij1234\n");
        assert!(report.is_valid());
    }

    #[test]
    fn line_scope_flags_despite_hash_elsewhere() {
        let options = ValidateOptions {
            suppression_scope: SuppressionScope::Line,
            ..ValidateOptions::default()
        };
        let report = validate(
            "# team config\nname: x\nversion: '1'\nschema: v1\napikey: abcdefghij1234\n",
            no_build_config,
            &options,
        );
        assert!(matches!(
            report.failure,
            Some(ValidationError::SensitiveData { line: 5, .. })
        ));
    }

    #[test]
    fn build_config_not_read_after_failure() {
        let mut called = false;
        let report = validate(
            "name: x\n",
            || {
                called = true;
                Ok("{}".to_string())
            },
            &ValidateOptions::default(),
        );
        assert!(!report.is_valid());
        assert!(!called);
    }

    #[test]
    fn advisory_failures_never_fail_the_run() {
        for build_config in [no_build_config(), Ok("{not json".to_string())] {
            let report = validate(VALID, || build_config, &ValidateOptions::default());
            assert!(report.is_valid());
            assert!(report.notices.iter().any(|n| n.stage == Stage::Advisory
                && n.level == NoticeLevel::Warning
                && n.message.starts_with("Build config validation failed")));
        }
    }

    #[test]
    fn advisory_without_out_file_is_silent() {
        let report = validate(VALID, || Ok("{}".to_string()), &ValidateOptions::default());
        assert!(report.is_valid());
        assert!(!stages(&report).contains(&Stage::Advisory));
    }

    #[test]
    fn label_appears_in_parse_notice() {
        let options = ValidateOptions {
            label: "assistant.yaml".to_string(),
            ..ValidateOptions::default()
        };
        let report = validate(VALID, no_build_config, &options);
        assert_eq!(report.notices[0].message, "assistant.yaml syntax is valid");
    }
}
