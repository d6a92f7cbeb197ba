//! Output file sink
//!
//! Appends outputs to the file exported by the runner in `GITHUB_OUTPUT`.
//! Values use the multiline heredoc form so any text, newlines included,
//! survives unchanged:
//!
//! ```text
//! ERROR_MESSAGE<<ghadelimiter_5f0c...
//! build failed
//! ghadelimiter_5f0c...
//! ```

use crate::error::OutputError;
use crate::outputs::OutputSink;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use uuid::Uuid;

/// Output sink writing to a runner output file
#[derive(Debug, Clone)]
pub struct FileCommandOutput {
    path: PathBuf,
}

impl FileCommandOutput {
    /// Create a sink for the given output file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Build a heredoc entry for the output file
pub fn prepare_key_value_message(
    name: &str,
    value: &str,
    delimiter: &str,
) -> Result<String, OutputError> {
    if name.contains(delimiter) {
        return Err(OutputError::DelimiterCollision {
            field: "name",
            delimiter: delimiter.to_string(),
        });
    }
    if value.contains(delimiter) {
        return Err(OutputError::DelimiterCollision {
            field: "value",
            delimiter: delimiter.to_string(),
        });
    }

    Ok(format!("{name}<<{delimiter}\n{value}\n{delimiter}\n"))
}

impl OutputSink for FileCommandOutput {
    fn set_output(&mut self, name: &str, value: &str) -> Result<(), OutputError> {
        let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
        let entry = prepare_key_value_message(name, value, &delimiter)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(entry.as_bytes())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_prepare_key_value_message() {
        let entry = prepare_key_value_message("ERROR_MESSAGE", "a\nb", "EOF").unwrap();
        assert_eq!(entry, "ERROR_MESSAGE<<EOF\na\nb\nEOF\n");

        let entry = prepare_key_value_message("ERROR_MESSAGE", "", "EOF").unwrap();
        assert_eq!(entry, "ERROR_MESSAGE<<EOF\n\nEOF\n");
    }

    #[test]
    fn test_prepare_rejects_delimiter_in_value() {
        let result = prepare_key_value_message("ERROR_MESSAGE", "before EOF after", "EOF");
        assert!(matches!(
            result,
            Err(OutputError::DelimiterCollision { field: "value", .. })
        ));

        let result = prepare_key_value_message("EOF_NAME", "fine", "EOF");
        assert!(matches!(
            result,
            Err(OutputError::DelimiterCollision { field: "name", .. })
        ));
    }

    #[test]
    fn test_writes_append() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("github_output");
        let mut sink = FileCommandOutput::new(&path);

        sink.set_output("ERROR_MESSAGE", "first").unwrap();
        sink.set_output("ERROR_MESSAGE", "second").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("ERROR_MESSAGE<<ghadelimiter_"));
        assert_eq!(lines[1], "first");
        assert_eq!(lines[2], &lines[0]["ERROR_MESSAGE<<".len()..]);
        assert_eq!(lines[4], "second");
        // Each write gets its own delimiter
        assert_ne!(lines[2], lines[5]);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let mut sink = FileCommandOutput::new(temp_dir.path().join("missing").join("output"));
        let result = sink.set_output("ERROR_MESSAGE", "boom");
        assert!(matches!(result, Err(OutputError::Io(_))));
    }
}
