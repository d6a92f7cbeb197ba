//! In-memory output sink

use crate::error::OutputError;
use crate::outputs::OutputSink;
use tracing::info;

/// Output sink that keeps every write in order
#[derive(Debug, Clone, Default)]
pub struct MemoryOutput {
    writes: Vec<(String, String)>,
}

impl MemoryOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded writes, oldest first
    pub fn writes(&self) -> &[(String, String)] {
        &self.writes
    }

    /// Latest value recorded for `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.writes
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl OutputSink for MemoryOutput {
    fn set_output(&mut self, name: &str, value: &str) -> Result<(), OutputError> {
        info!("Output {} = {:?}", name, value);
        self.writes.push((name.to_string(), value.to_string()));
        Ok(())
    }
}
