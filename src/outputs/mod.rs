//! Output channels for step results
//!
//! A step exposes named string values to later pipeline steps through an
//! output channel. The runner provides two mechanisms: an output file whose
//! path is exported in `GITHUB_OUTPUT`, and the older `::set-output`
//! workflow command written to stdout. Both are hidden behind the
//! [`OutputSink`] trait so the reporter never depends on a global.

use crate::config::{OutputTarget, ReporterConfig};
use crate::error::OutputError;
use std::path::PathBuf;
use tracing::debug;

pub mod file_command;
pub mod lazy;
pub mod memory;
pub mod stdout_command;

pub use file_command::FileCommandOutput;
pub use lazy::LazySink;
pub use memory::MemoryOutput;
pub use stdout_command::StdoutCommandOutput;

/// Environment variable holding the output file path
pub const GITHUB_OUTPUT_ENV: &str = "GITHUB_OUTPUT";

/// Something that records named outputs for the pipeline
pub trait OutputSink: Send {
    /// Record `value` under `name`
    fn set_output(&mut self, name: &str, value: &str) -> Result<(), OutputError>;
}

impl<S: OutputSink + ?Sized> OutputSink for Box<S> {
    fn set_output(&mut self, name: &str, value: &str) -> Result<(), OutputError> {
        (**self).set_output(name, value)
    }
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn set_output(&mut self, name: &str, value: &str) -> Result<(), OutputError> {
        (**self).set_output(name, value)
    }
}

/// Build the output sink selected by the configuration
///
/// `env_output_file` is the value of `GITHUB_OUTPUT`, passed in so callers
/// decide where the environment is read.
pub fn create_sink(
    config: &ReporterConfig,
    env_output_file: Option<String>,
) -> Result<Box<dyn OutputSink>, OutputError> {
    let env_output_file: Option<PathBuf> = env_output_file
        .filter(|path| !path.is_empty())
        .map(Into::into);

    let sink: Box<dyn OutputSink> = match config.output {
        OutputTarget::Auto => match config.output_file.clone().or(env_output_file) {
            Some(path) => {
                debug!("Using output file {}", path.display());
                Box::new(FileCommandOutput::new(path))
            }
            None => {
                debug!("No output file available, using workflow commands on stdout");
                Box::new(StdoutCommandOutput::stdout())
            }
        },
        OutputTarget::File => {
            let path = config
                .output_file
                .clone()
                .or(env_output_file)
                .ok_or(OutputError::MissingOutputFile)?;
            debug!("Using output file {}", path.display());
            Box::new(FileCommandOutput::new(path))
        }
        OutputTarget::Stdout => Box::new(StdoutCommandOutput::stdout()),
        OutputTarget::Memory => Box::new(MemoryOutput::new()),
    };

    Ok(sink)
}

/// Deferred output sink using the process environment
///
/// Nothing is opened until the first output is written.
pub fn lazy_sink_from_env(config: &ReporterConfig) -> LazySink {
    LazySink::new(config.clone(), std::env::var(GITHUB_OUTPUT_ENV).ok())
}
