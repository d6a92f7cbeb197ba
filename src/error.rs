//! Error types for error reporting
//!
//! A reported failure is the only error the reporter produces on purpose.
//! Output channel problems are kept separate so the runner can tell a
//! deliberate failure apart from a broken environment.

/// Process exit status used for every failed run
pub const EXIT_FAILURE: i32 = 1;

/// Failure deliberately raised by the reporter
///
/// The message is carried through unchanged, including the empty string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ReportedFailure {
    /// Failure reason surfaced to the host
    pub message: String,
}

impl ReportedFailure {
    /// Create a new reported failure
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors raised by output channels
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// The output name or value collides with the heredoc delimiter
    #[error("unexpected input: {field} should not contain the delimiter \"{delimiter}\"")]
    DelimiterCollision {
        field: &'static str,
        delimiter: String,
    },

    /// No output file path is configured or exported by the runner
    #[error("output file is not configured and GITHUB_OUTPUT is not set")]
    MissingOutputFile,

    /// Writing to the output channel failed
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of a failed report
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The message was raised as a failure
    #[error(transparent)]
    Failed(#[from] ReportedFailure),

    /// The message could not be recorded as an output
    #[error(transparent)]
    Output(#[from] OutputError),
}

impl ReportError {
    /// The reported failure, if this is one
    pub fn as_reported_failure(&self) -> Option<&ReportedFailure> {
        match self {
            ReportError::Failed(failure) => Some(failure),
            ReportError::Output(_) => None,
        }
    }

    /// Convert into an `anyhow::Error` that still downcasts to the inner error
    pub fn into_anyhow(self) -> anyhow::Error {
        match self {
            ReportError::Failed(failure) => failure.into(),
            ReportError::Output(err) => err.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reported_failure_displays_message_verbatim() {
        let failure = ReportedFailure::new("build failed");
        assert_eq!(failure.to_string(), "build failed");
        assert_eq!(ReportedFailure::new("").to_string(), "");
    }

    #[test]
    fn test_reported_failure_survives_anyhow() {
        let err: anyhow::Error = ReportedFailure::new("deploy blocked").into();
        let failure = err.downcast_ref::<ReportedFailure>().unwrap();
        assert_eq!(failure.message, "deploy blocked");
    }
}
