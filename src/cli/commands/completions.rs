//! Completions command implementation.
//!
//! This module implements the `completions` command for generating shell
//! completions for either program.

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io;

/// Result type for completions command operations.
pub type CompletionsCommandResult = Result<(), CompletionsCommandError>;

/// Error type for completions command operations.
#[derive(Debug, thiserror::Error)]
pub enum CompletionsCommandError {
    /// The specified shell is not supported for completions.
    #[error("Unsupported shell: {0}")]
    UnsupportedShell(String),
}

/// Map a shell name to a completion generator.
pub fn parse_shell(shell: &str) -> Result<Shell, CompletionsCommandError> {
    match shell {
        "bash" => Ok(Shell::Bash),
        "zsh" => Ok(Shell::Zsh),
        "fish" => Ok(Shell::Fish),
        _ => Err(CompletionsCommandError::UnsupportedShell(shell.to_string())),
    }
}

/// Execute the completions command for the CLI `C`, installed as `bin_name`.
pub fn completions<C: CommandFactory>(shell: &str, bin_name: &str) -> CompletionsCommandResult {
    let shell = parse_shell(shell)?;

    let mut cmd = C::command();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
