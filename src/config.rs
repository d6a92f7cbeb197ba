//! Configuration management for raise-error
//!
//! This module provides the reporter configuration, its loading from the
//! config directory, and the action inputs read from the environment.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Base name of the reporter configuration file
pub const CONFIG_FILE_STEM: &str = "raise-error";

/// Input holding the message to report
pub const MESSAGE_INPUT: &str = "message";

/// Input selecting output reporting instead of failing
pub const OUTPUT_ERROR_MESSAGE_INPUT: &str = "output-error-message";

/// Where outputs are recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    /// Output file if `GITHUB_OUTPUT` is set, workflow commands otherwise
    #[default]
    Auto,
    /// Always the output file
    File,
    /// Always `::set-output` workflow commands on stdout
    Stdout,
    /// Keep outputs in memory and log them
    Memory,
}

/// Reporter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReporterConfig {
    /// Output channel selection
    pub output: OutputTarget,
    /// Explicit output file, overrides `GITHUB_OUTPUT`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_file: Option<PathBuf>,
    /// Emit an `::error::` annotation when the run fails
    pub annotate_failures: bool,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            output: OutputTarget::Auto,
            output_file: None,
            annotate_failures: true,
        }
    }
}

/// Load the reporter configuration from the config directory
///
/// Looks for `raise-error.yml`, `raise-error.yaml`, `raise-error.json` and
/// `raise-error.toml`, in that order. A missing file yields the defaults.
pub fn load_reporter_config(config_dir: &Path) -> anyhow::Result<ReporterConfig> {
    let candidates = ["yml", "yaml", "json", "toml"]
        .iter()
        .map(|ext| config_dir.join(format!("{}.{}", CONFIG_FILE_STEM, ext)));

    for path in candidates {
        if !path.exists() {
            continue;
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = parse_config_contents(&path, &contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        return Ok(config);
    }

    Ok(ReporterConfig::default())
}

/// Deserialize a config file based on its extension
pub fn parse_config_contents<T>(path: &Path, contents: &str) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let value = match path.extension().and_then(|s| s.to_str()) {
        Some("json") => serde_json::from_str(contents)?,
        Some("toml") => toml::from_str(contents)?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(contents)?,
        _ => {
            return Err(anyhow::anyhow!(
                "Unsupported config file format: {}",
                path.display()
            ))
        }
    };
    Ok(value)
}

/// Resolve the config directory
///
/// Precedence: explicit path, then `/etc/raise-error` if it exists, then
/// the user config directory.
pub fn resolve_config_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| {
        let system_config = PathBuf::from("/etc/raise-error");
        if system_config.exists() {
            system_config
        } else {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("raise-error")
        }
    })
}

/// Name of the environment variable carrying an action input
pub fn input_env_name(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

/// Read an action input from the environment, trimmed
///
/// A missing input reads as the empty string.
pub fn get_input(name: &str) -> String {
    std::env::var(input_env_name(name))
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

/// Parse a boolean input using the YAML 1.2 core schema spellings
pub fn parse_boolean_input(name: &str, value: &str) -> anyhow::Result<bool> {
    match value {
        "true" | "True" | "TRUE" => Ok(true),
        "false" | "False" | "FALSE" => Ok(false),
        _ => Err(anyhow::anyhow!(
            "Input does not meet YAML 1.2 \"Core Schema\" specification: {}\n\
             Support boolean input list: `true | True | TRUE | false | False | FALSE`",
            name
        )),
    }
}

/// Inputs of the reporter step
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionInputs {
    /// Message to report
    pub message: String,
    /// Record the message as an output instead of failing
    pub output_error_message: bool,
}

impl ActionInputs {
    /// Read the inputs from `INPUT_*` environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| {
            let value = get_input(name);
            (!value.is_empty()).then_some(value)
        })
    }

    /// Read the inputs through a lookup function
    ///
    /// An absent `output-error-message` defaults to `false`.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let message = lookup(MESSAGE_INPUT).unwrap_or_default();
        let output_error_message = match lookup(OUTPUT_ERROR_MESSAGE_INPUT) {
            Some(value) => parse_boolean_input(OUTPUT_ERROR_MESSAGE_INPUT, &value)?,
            None => false,
        };

        Ok(Self {
            message,
            output_error_message,
        })
    }

    /// Apply command line overrides field by field
    pub fn with_overrides(
        mut self,
        message: Option<String>,
        output_error_message: Option<bool>,
    ) -> Self {
        if let Some(message) = message {
            self.message = message;
        }
        if let Some(flag) = output_error_message {
            self.output_error_message = flag;
        }
        self
    }
}
