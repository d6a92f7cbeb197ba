//! Workflow command output sink
//!
//! Fallback used when the runner does not export an output file. Each
//! output is written as a `::set-output` command, preceded by a newline so
//! the command always starts at the beginning of a line.

use crate::annotations::format_command;
use crate::error::OutputError;
use crate::outputs::OutputSink;
use std::io::Write;

/// Output sink writing `::set-output` commands
pub struct StdoutCommandOutput<W: Write + Send> {
    writer: W,
}

impl StdoutCommandOutput<std::io::Stdout> {
    /// Create a sink writing to the process stdout
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> StdoutCommandOutput<W> {
    /// Create a sink writing to any writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the sink and return the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> OutputSink for StdoutCommandOutput<W> {
    fn set_output(&mut self, name: &str, value: &str) -> Result<(), OutputError> {
        let command = format_command("set-output", &[("name", name)], value);
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", command)?;
        self.writer.flush()?;
        Ok(())
    }
}
