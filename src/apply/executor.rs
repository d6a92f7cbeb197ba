//! Step executor
//!
//! Runs the steps of a [`StepsConfig`] in order. Every step is invoked as
//! an async operation so the runner has one calling convention; the raise
//! error step itself is synchronous and completes before its future
//! resolves.

use crate::apply::{RaiseErrorTask, StepsConfig, Task};
use crate::error::ReportError;
use crate::outputs::{MemoryOutput, OutputSink};
use crate::reporter::report;
use anyhow::Result;
use tracing::{info, warn};

/// Executor for steps
pub struct StepExecutor {
    dry_run: bool,
    sink: Box<dyn OutputSink>,
}

impl StepExecutor {
    /// Create an executor writing outputs to `sink`
    ///
    /// In dry-run mode outputs go to an in-memory sink instead.
    pub fn new(dry_run: bool, sink: Box<dyn OutputSink>) -> Self {
        let sink: Box<dyn OutputSink> = if dry_run {
            Box::new(MemoryOutput::new())
        } else {
            sink
        };
        Self { dry_run, sink }
    }

    /// Get the dry_run flag
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Execute a single step
    pub async fn execute_single_task(&mut self, task: &Task) -> Result<()> {
        match task {
            Task::RaiseError(raise_task) => execute_raise_error_task(raise_task, self.sink.as_mut())
                .await
                .map_err(ReportError::into_anyhow),
        }
    }

    /// Execute all steps, stopping at the first failure
    pub async fn execute(&mut self, config: &StepsConfig) -> Result<()> {
        info!(
            "Executing {} steps{}",
            config.steps.len(),
            if self.dry_run { " (dry run)" } else { "" }
        );

        for (i, task) in config.steps.iter().enumerate() {
            info!(
                "Executing step {} of {} [{}]: {}",
                i + 1,
                config.steps.len(),
                task.task_type(),
                task.label()
            );

            if let Err(e) = self.execute_single_task(task).await {
                warn!("Step {} failed", i + 1);
                return Err(e);
            }
        }

        info!(
            "All steps completed{}",
            if self.dry_run { " (dry run)" } else { "" }
        );
        Ok(())
    }

    /// Validate steps without executing them
    pub fn validate(&self, config: &StepsConfig) -> Result<()> {
        if config.steps.is_empty() {
            return Err(anyhow::anyhow!("Steps file contains no steps"));
        }
        info!("Validated {} steps", config.steps.len());
        Ok(())
    }
}

/// Execute raise error step
pub async fn execute_raise_error_task(
    task: &RaiseErrorTask,
    sink: &mut dyn OutputSink,
) -> Result<(), ReportError> {
    report(sink, &task.message, task.output_error_message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OutputTarget, ReporterConfig};
    use crate::error::ReportedFailure;
    use crate::outputs::{FileCommandOutput, LazySink};
    use tempfile::tempdir;

    fn raise(message: &str, output_error_message: bool) -> Task {
        Task::RaiseError(RaiseErrorTask {
            description: None,
            message: message.to_string(),
            output_error_message,
        })
    }

    #[tokio::test]
    async fn test_execute_raise_error_task_output() {
        let mut sink = MemoryOutput::new();
        let task = RaiseErrorTask {
            description: None,
            message: "build failed".to_string(),
            output_error_message: true,
        };

        execute_raise_error_task(&task, &mut sink).await.unwrap();
        assert_eq!(sink.get("ERROR_MESSAGE"), Some("build failed"));
    }

    #[tokio::test]
    async fn test_execute_raise_error_task_failure() {
        let mut sink = MemoryOutput::new();
        let task = RaiseErrorTask {
            description: None,
            message: "build failed".to_string(),
            output_error_message: false,
        };

        let err = execute_raise_error_task(&task, &mut sink).await.unwrap_err();
        assert_eq!(err.to_string(), "build failed");
        assert!(sink.writes().is_empty());
    }

    #[tokio::test]
    async fn test_execute_stops_at_first_failure() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("output");
        let config = StepsConfig {
            steps: vec![
                raise("recorded", true),
                raise("fatal", false),
                raise("never reached", true),
            ],
        };

        let mut executor = StepExecutor::new(false, Box::new(FileCommandOutput::new(&path)));
        let err = executor.execute(&config).await.unwrap_err();

        let failure = err.downcast_ref::<ReportedFailure>().unwrap();
        assert_eq!(failure.message, "fatal");

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\nrecorded\n"));
        assert!(!content.contains("never reached"));
    }

    #[tokio::test]
    async fn test_failure_step_with_unusable_output_channel() {
        let reporter_config = ReporterConfig {
            output: OutputTarget::File,
            ..ReporterConfig::default()
        };
        let config = StepsConfig {
            steps: vec![raise("build failed", false)],
        };

        let sink = LazySink::new(reporter_config, None);
        let mut executor = StepExecutor::new(false, Box::new(sink));
        let err = executor.execute(&config).await.unwrap_err();

        let failure = err.downcast_ref::<ReportedFailure>().unwrap();
        assert_eq!(failure.message, "build failed");
    }

    #[tokio::test]
    async fn test_dry_run_leaves_output_file_untouched() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("output");
        let config = StepsConfig {
            steps: vec![raise("recorded", true)],
        };

        let mut executor = StepExecutor::new(true, Box::new(FileCommandOutput::new(&path)));
        assert!(executor.dry_run());
        executor.execute(&config).await.unwrap();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_dry_run_still_fails() {
        let config = StepsConfig {
            steps: vec![raise("fatal", false)],
        };

        let mut executor = StepExecutor::new(true, Box::new(MemoryOutput::new()));
        assert!(executor.execute(&config).await.is_err());
    }

    #[test]
    fn test_validate_rejects_empty_steps() {
        let executor = StepExecutor::new(true, Box::new(MemoryOutput::new()));
        let result = executor.validate(&StepsConfig::default());
        assert!(result.unwrap_err().to_string().contains("no steps"));

        let config = StepsConfig {
            steps: vec![raise("ok", true)],
        };
        assert!(executor.validate(&config).is_ok());
    }
}
