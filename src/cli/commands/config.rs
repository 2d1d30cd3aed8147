//! Config command implementation.
//!
//! This module implements the `config` command of both programs, which
//! shows the stored settings with credentials masked.

use std::path::Path;

use crate::cli::output;
use crate::config::{ConfigError, ConfigRecord};

/// Result type for config command operations.
pub type ConfigCommandResult = Result<(), ConfigCommandError>;

/// Error type for config command operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigCommandError {
    /// The config file exists but could not be read.
    #[error("Config error: {0}")]
    ConfigError(#[from] ConfigError),
}

/// Show the config stored at `path`.
///
/// A missing file is not an error: the user is told to run `setup` and
/// nothing is created.
pub fn config_show<T: ConfigRecord>(path: &Path, program: &str) -> ConfigCommandResult {
    let config = match T::load(path) {
        Ok(config) => config,
        Err(ConfigError::NotFound(_)) => {
            println!("\x1b[33mNo configuration found. Run \"{program} setup\" first.\x1b[0m");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    print!("{}", render_summary(&config.summary()));
    println!(
        "\x1b[2mStored in plain text at {} (readable only by you)\x1b[0m",
        path.display()
    );
    Ok(())
}

fn render_summary(rows: &[(&'static str, String)]) -> String {
    let mut out = String::from("\n\x1b[1mCurrent Configuration:\x1b[0m\n");
    out.push_str(&output::rule());
    out.push('\n');
    for (label, value) in rows {
        out.push_str(&format!("\x1b[36m{label}:\x1b[0m {value}\n"));
    }
    out.push_str(&output::rule());
    out.push('\n');
    out
}
