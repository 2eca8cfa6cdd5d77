//! Observability module
//!
//! Diagnostic logging for `configguard`. Status lines of the validation
//! report are written separately by the CLI.

pub mod logging;

pub use logging::{LogFormat, init_logging};
