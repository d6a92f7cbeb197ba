//! Error reporter
//!
//! Reports a message in one of two ways. With `output_error_message` set,
//! the message is recorded as the `ERROR_MESSAGE` output so a later step
//! can decide what to do with it, and the call succeeds. Otherwise the
//! message is raised as a [`ReportedFailure`] for the runner to turn into
//! a failed run. The two branches never mix: a failure writes no output.

use crate::error::{ReportError, ReportedFailure};
use crate::outputs::OutputSink;
use tracing::debug;

/// Output name the message is recorded under
pub const ERROR_MESSAGE_OUTPUT: &str = "ERROR_MESSAGE";

/// Report `message` through `sink` or as a failure
pub fn report<S>(sink: &mut S, message: &str, output_error_message: bool) -> Result<(), ReportError>
where
    S: OutputSink + ?Sized,
{
    if output_error_message {
        debug!("Recording error message as {} output", ERROR_MESSAGE_OUTPUT);
        sink.set_output(ERROR_MESSAGE_OUTPUT, message)?;
        return Ok(());
    }

    Err(ReportedFailure::new(message).into())
}

/// Error reporter bound to an output sink
pub struct ErrorReporter<S: OutputSink> {
    sink: S,
}

impl<S: OutputSink> ErrorReporter<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Report a message, see [`report`]
    pub fn report(&mut self, message: &str, output_error_message: bool) -> Result<(), ReportError> {
        report(&mut self.sink, message, output_error_message)
    }

    /// The underlying sink
    pub fn sink(&self) -> &S {
        &self.sink
    }
}
