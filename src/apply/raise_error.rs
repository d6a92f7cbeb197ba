//! Raise error step
//!
//! Reports an error message either as the `ERROR_MESSAGE` step output or by
//! failing the run. Recording the message as an output lets a later step
//! branch on the failure without aborting immediately.
//!
//! # Examples
//!
//! ## Fail the run with a message
//!
//! **YAML Format:**
//! ```yaml
//! - type: raise_error
//!   description: "Stop when the build is broken"
//!   message: "build failed"
//! ```
//!
//! ## Record the message for a later step
//!
//! **YAML Format:**
//! ```yaml
//! - type: raise_error
//!   message: "build failed"
//!   output_error_message: true
//! ```

use serde::{Deserialize, Serialize};

/// Raise error step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaiseErrorTask {
    /// Optional description of what this step does
    ///
    /// Human-readable description of the step's purpose. Shown in logs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Message to report
    ///
    /// Passed through unchanged, may be empty.
    #[serde(default)]
    pub message: String,

    /// Record the message as an output instead of failing
    #[serde(default)]
    pub output_error_message: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_defaults() {
        let task: RaiseErrorTask = serde_yaml::from_str("message: build failed\n").unwrap();
        assert_eq!(task.message, "build failed");
        assert!(!task.output_error_message);
        assert_eq!(task.description, None);

        let task: RaiseErrorTask = serde_yaml::from_str("output_error_message: true\n").unwrap();
        assert_eq!(task.message, "");
        assert!(task.output_error_message);
    }
}
