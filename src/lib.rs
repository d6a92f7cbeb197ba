//! raise-error - report a CI step error as an output or as a failed run
//!
//! This crate provides the error reporter used by the `raise-error` action,
//! the output channels it writes to, and a small step runner for reporting
//! from a steps file.

pub mod annotations;
pub mod apply;
pub mod config;
pub mod error;
pub mod outputs;
pub mod reporter;

pub use error::{OutputError, ReportError, ReportedFailure};
pub use outputs::OutputSink;
pub use reporter::{report, ErrorReporter, ERROR_MESSAGE_OUTPUT};
