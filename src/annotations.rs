//! Workflow command formatting
//!
//! Workflow commands are single stdout lines of the form
//! `::command key=value,key=value::message` that the CI runner parses.
//! Values must be escaped so that newlines and the separators cannot
//! terminate the command early.
//!
//! # Examples
//!
//! ```
//! use raise_error::annotations::error_annotation;
//!
//! assert_eq!(error_annotation("line one\nline two"), "::error::line one%0Aline two");
//! ```

/// Escape a command message
pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escape a command property value
pub fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

/// Format a workflow command line (without the trailing newline)
pub fn format_command(command: &str, properties: &[(&str, &str)], message: &str) -> String {
    let mut line = format!("::{}", command);

    if !properties.is_empty() {
        let props = properties
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| format!("{}={}", key, escape_property(value)))
            .collect::<Vec<_>>()
            .join(",");
        if !props.is_empty() {
            line.push(' ');
            line.push_str(&props);
        }
    }

    line.push_str("::");
    line.push_str(&escape_data(message));
    line
}

/// Format an error annotation for a failed run
pub fn error_annotation(message: &str) -> String {
    format_command("error", &[], message)
}
