//! `configguard` - structural and secret-leak validation for model
//! configuration files
//!
//! The validation pipeline in [`validation`] is pure: it takes the
//! configuration text and returns a report. The [`cli`] module reads files,
//! renders the report and maps it onto an exit code.

pub mod cli;
pub mod error;
pub mod observability;
pub mod validation;
