//! Step definitions run by `raise-error apply`
//!
//! A steps file lists the steps to run in order. Each step is tagged with
//! its `type`; the only built-in type is `raise_error`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

pub mod executor;
pub mod raise_error;

pub use raise_error::RaiseErrorTask;

/// Base name of the steps file
pub const STEPS_FILE_STEM: &str = "steps";

/// Steps configuration schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepsConfig {
    /// Steps to execute, in order
    #[serde(default)]
    pub steps: Vec<Task>,
}

/// Types of steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Task {
    /// Report an error message as an output or a failure
    RaiseError(RaiseErrorTask),
}

impl Task {
    /// Get the string representation of the step type
    pub fn task_type(&self) -> &'static str {
        match self {
            Task::RaiseError(_) => "raise_error",
        }
    }

    /// Description for logs, falling back to the step type
    pub fn label(&self) -> &str {
        match self {
            Task::RaiseError(task) => task.description.as_deref().unwrap_or(self.task_type()),
        }
    }
}

/// Load the steps file from the config directory
///
/// Looks for `steps.yml`, `steps.yaml`, `steps.json` and `steps.toml`, in
/// that order.
pub fn load_steps_config(config_dir: &Path) -> Result<StepsConfig> {
    if !config_dir.exists() {
        return Err(anyhow::anyhow!(
            "Config directory does not exist: {}",
            config_dir.display()
        ));
    }

    for ext in ["yml", "yaml", "json", "toml"] {
        let path = config_dir.join(format!("{}.{}", STEPS_FILE_STEM, ext));
        if !path.is_file() {
            continue;
        }

        info!("Loading steps from: {}", path.display());
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read steps file '{}'", path.display()))?;
        let config: StepsConfig = crate::config::parse_config_contents(&path, &content)
            .with_context(|| format!("Failed to parse steps file '{}'", path.display()))?;
        return Ok(config);
    }

    Err(anyhow::anyhow!(
        "No steps file found in {}",
        config_dir.display()
    ))
}
