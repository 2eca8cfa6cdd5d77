//! Shared integration-test harness for running the `configguard` binary
//! as a child process.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Helpers for invoking the compiled `configguard` binary.
pub struct ConfigGuardProcess;

impl ConfigGuardProcess {
    /// Runs the binary with `args` in the crate root and waits for it.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn_command(args: &[&str]) -> Output {
        Self::spawn_in(Path::new(env!("CARGO_MANIFEST_DIR")), args)
    }

    /// Runs the binary with `args` from `dir`, so default relative paths
    /// (`config.yaml`, `tsconfig.json`) resolve inside it.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn_in(dir: &Path, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_configguard"))
            .args(args)
            .current_dir(dir)
            .env_remove("CONFIGGUARD_CONFIG")
            .env_remove("CONFIGGUARD_BUILD_CONFIG")
            .env_remove("CONFIGGUARD_SUPPRESSION_SCOPE")
            .env_remove("CONFIGGUARD_LOG_LEVEL")
            .output()
            .expect("failed to spawn configguard")
    }

    /// Runs `validate` against a fixture, with a build config that does
    /// not exist.
    #[allow(clippy::missing_panics_doc)]
    pub fn validate_fixture(name: &str, extra: &[&str]) -> Output {
        let config = Self::fixture_path(name);
        let mut args = vec![
            "validate",
            "--config",
            config.to_str().expect("non-UTF-8 fixture path"),
            "--build-config",
            "/nonexistent/configguard/tsconfig.json",
        ];
        args.extend_from_slice(extra);
        Self::spawn_command(&args)
    }

    /// Returns the absolute path of a file under `tests/fixtures`.
    pub fn fixture_path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }

    /// Captured stdout as text.
    pub fn stdout(output: &Output) -> String {
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    /// Captured stderr as text.
    pub fn stderr(output: &Output) -> String {
        String::from_utf8_lossy(&output.stderr).into_owned()
    }
}
