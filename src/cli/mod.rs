//! CLI commands and argument handling.
//!
//! This module contains the clap definitions for both programs
//! ([`cloud`] for `claude-cloud`, [`designer`] for `figma-designer`) and the
//! command implementations they dispatch to.

pub mod cloud;
pub mod commands;
pub mod designer;
pub mod interact;
pub mod output;

pub use std::process::ExitCode;

/// Result of running one command.
pub type CliResult = anyhow::Result<ExitCode>;

/// Print a command's error, if any, and pick the process exit code.
pub fn handle_result(result: CliResult) -> ExitCode {
    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {e}");
            ExitCode::FAILURE
        }
    }
}

/// Install the diagnostic log subscriber.
///
/// Diagnostics go to stderr at `warn` by default, `debug` with `--verbose`;
/// `RUST_LOG` can refine either.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Current working directory, used for setup defaults.
pub(crate) fn current_dir() -> anyhow::Result<std::path::PathBuf> {
    use anyhow::Context;
    std::env::current_dir().context("Could not determine the current directory")
}
