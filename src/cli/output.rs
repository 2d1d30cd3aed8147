//! Console output helpers.
//!
//! Shared formatting for the task commands, and the `--dry-run` prompt
//! output to stdout or the clipboard.

use std::fmt::Write as _;
use std::path::Path;

/// Width of the separator rule around task text.
const RULE_WIDTH: usize = 50;

/// Error type for output operations.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// Failed to copy content to the system clipboard.
    #[error("Failed to copy to clipboard: {0}")]
    ClipboardError(String),
}

/// Where a dry-run prompt goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptDestination {
    /// Printed as-is.
    Stdout,
    /// Placed on the system clipboard.
    Clipboard,
}

impl PromptDestination {
    /// Pick the destination from the `--copy` flag.
    pub fn from_copy_flag(copy: bool) -> Self {
        if copy {
            PromptDestination::Clipboard
        } else {
            PromptDestination::Stdout
        }
    }
}

/// Output a rendered prompt.
pub fn emit_prompt(prompt: &str, destination: PromptDestination) -> Result<(), OutputError> {
    match destination {
        PromptDestination::Stdout => {
            print_to_stdout(prompt);
            Ok(())
        }
        PromptDestination::Clipboard => copy_to_clipboard(prompt),
    }
}

/// Copy prompt to system clipboard.
///
/// If clipboard access fails, falls back to stdout and returns an error.
pub fn copy_to_clipboard(prompt: &str) -> Result<(), OutputError> {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => match clipboard.set_text(prompt.to_string()) {
            Ok(()) => {
                println!("\x1b[32mPrompt copied to clipboard!\x1b[0m");
                println!("\x1b[2m({} characters)\x1b[0m", prompt.len());
                Ok(())
            }
            Err(e) => {
                eprintln!("\x1b[2mFalling back to stdout...\x1b[0m");
                print_to_stdout(prompt);
                Err(OutputError::ClipboardError(e.to_string()))
            }
        },
        Err(e) => {
            eprintln!("\x1b[2mFalling back to stdout...\x1b[0m");
            print_to_stdout(prompt);
            Err(OutputError::ClipboardError(e.to_string()))
        }
    }
}

/// Print prompt to stdout.
pub fn print_to_stdout(prompt: &str) {
    println!("{prompt}");
}

/// A dim horizontal rule.
pub fn rule() -> String {
    format!("\x1b[2m{}\x1b[0m", "─".repeat(RULE_WIDTH))
}

/// Format task text under a heading, between rules.
pub fn task_block(heading: &str, body: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n\x1b[36m{heading}\x1b[0m");
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "{body}");
    let _ = write!(out, "{}", rule());
    out
}

/// Print a dim `label: path` line.
pub fn print_path(label: &str, path: &Path) {
    println!("\x1b[2m{label}: {}\x1b[0m", path.display());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_from_copy_flag() {
        assert_eq!(
            PromptDestination::from_copy_flag(true),
            PromptDestination::Clipboard
        );
        assert_eq!(
            PromptDestination::from_copy_flag(false),
            PromptDestination::Stdout
        );
    }

    #[test]
    fn test_emit_to_stdout_succeeds() {
        assert!(emit_prompt("hello", PromptDestination::Stdout).is_ok());
    }

    #[test]
    fn test_task_block_layout() {
        let block = task_block("Task description:", "fix null pointer in parser");
        let lines: Vec<&str> = block.lines().collect();
        assert_eq!(lines[0], "");
        assert!(lines[1].contains("Task description:"));
        assert!(lines[2].contains(&"─".repeat(50)));
        assert_eq!(lines[3], "fix null pointer in parser");
        assert!(lines[4].contains(&"─".repeat(50)));
    }

    #[test]
    fn test_output_error_display() {
        let err = OutputError::ClipboardError("access denied".to_string());
        assert!(err.to_string().contains("Failed to copy to clipboard"));
        assert!(err.to_string().contains("access denied"));
    }

    // Clipboard operations need a display server, so they are not covered
    // here.
}
