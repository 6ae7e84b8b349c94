//! Terminal output: readable text by default, pretty JSON with `--json`

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    /// Render `value`, using `text` for the human-readable form
    pub fn render<T, F>(self, value: &T, text: F) -> serde_json::Result<String>
    where
        T: Serialize,
        F: FnOnce(&T) -> String,
    {
        match self {
            OutputFormat::Text => Ok(text(value)),
            OutputFormat::Json => serde_json::to_string_pretty(value),
        }
    }
}

/// Print a command result on stdout
pub fn print_formatted<T, F>(value: &T, format: OutputFormat, text: F) -> anyhow::Result<()>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    println!("{}", format.render(value, text)?);
    Ok(())
}

/// Confirmation line after a change; hidden by `--quiet`
pub fn print_success(message: &str, quiet: bool) {
    if !quiet {
        println!("{}", message);
    }
}

/// Failures always reach stderr
pub fn print_error(message: &str) {
    eprintln!("Error: {}", message);
}
