//! Deferred output sink
//!
//! The configured channel is only built on the first write. Reporting a
//! failure never writes, so a misconfigured channel cannot hide the
//! failure message.

use crate::config::ReporterConfig;
use crate::error::OutputError;
use crate::outputs::{create_sink, OutputSink};

/// Output sink created on first use
pub struct LazySink {
    config: ReporterConfig,
    env_output_file: Option<String>,
    inner: Option<Box<dyn OutputSink>>,
}

impl LazySink {
    /// `env_output_file` is the value of `GITHUB_OUTPUT`, if any
    pub fn new(config: ReporterConfig, env_output_file: Option<String>) -> Self {
        Self {
            config,
            env_output_file,
            inner: None,
        }
    }

    /// Whether the underlying channel has been built
    pub fn is_initialized(&self) -> bool {
        self.inner.is_some()
    }
}

impl OutputSink for LazySink {
    fn set_output(&mut self, name: &str, value: &str) -> Result<(), OutputError> {
        let sink = match self.inner.take() {
            Some(sink) => sink,
            None => create_sink(&self.config, self.env_output_file.clone())?,
        };
        self.inner.insert(sink).set_output(name, value)
    }
}
