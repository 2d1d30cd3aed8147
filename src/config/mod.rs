//! Configuration store for the per-user credential files.
//!
//! Each program keeps one flat JSON object in the user's home directory
//! (`~/.claude-cloud-config.json`, `~/.figma-designer-config.json`). The
//! file is written whole by `setup` and read by every other command.

pub mod assistant;
pub mod contributor;
pub mod designer;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub use contributor::ContributorConfig;
pub use designer::DesignerConfig;

/// File name of the `claude-cloud` config, relative to the home directory.
pub const CLOUD_CONFIG_FILE: &str = ".claude-cloud-config.json";
/// File name of the `figma-designer` config, relative to the home directory.
pub const DESIGNER_CONFIG_FILE: &str = ".figma-designer-config.json";
/// Directory holding the assistant's own settings, relative to the home directory.
pub const ASSISTANT_DIR: &str = ".claude";
/// Default host that repositories are cloned from.
pub const DEFAULT_GIT_BASE_URL: &str = "https://github.com";

/// Placeholder shown instead of a stored secret.
const MASK: &str = "********";

/// Error type for config operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No config file exists yet; `setup` has not been run.
    #[error("Configuration not found at {}", .0.display())]
    NotFound(PathBuf),
    /// Error reading or writing the config file.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Error parsing the config file JSON.
    #[error("Failed to parse config JSON: {0}")]
    ParseError(#[from] serde_json::Error),
    /// The home directory could not be determined.
    #[error("Could not determine the home directory")]
    NoHome,
}

/// Per-user file locations.
///
/// Resolved once when a program starts and handed to every command, so
/// nothing below the entry point reads `HOME` itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    home: PathBuf,
}

impl Paths {
    /// Build paths rooted at an explicit home directory.
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// Resolve paths from the current user's home directory.
    pub fn from_env() -> Result<Self, ConfigError> {
        dirs::home_dir().map(Self::new).ok_or(ConfigError::NoHome)
    }

    /// Path of the `claude-cloud` config file.
    pub fn cloud_config(&self) -> PathBuf {
        self.home.join(CLOUD_CONFIG_FILE)
    }

    /// Path of the `figma-designer` config file.
    pub fn designer_config(&self) -> PathBuf {
        self.home.join(DESIGNER_CONFIG_FILE)
    }

    /// Directory of the assistant's settings.
    pub fn assistant_dir(&self) -> PathBuf {
        self.home.join(ASSISTANT_DIR)
    }

    /// The assistant's `settings.json`.
    pub fn assistant_settings(&self) -> PathBuf {
        self.assistant_dir().join("settings.json")
    }

    /// The assistant's MCP server registry.
    pub fn mcp_config(&self) -> PathBuf {
        self.assistant_dir().join(".mcp.json")
    }
}

/// A configuration record persisted as a single JSON file.
///
/// Records are never partially updated: `save` replaces the whole file.
pub trait ConfigRecord: Serialize + DeserializeOwned {
    /// Load the record, failing with [`ConfigError::NotFound`] if the file is absent.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path)?;
        let record = serde_json::from_str(&contents)?;
        Ok(record)
    }

    /// Save the record, overwriting any existing file.
    ///
    /// Creates parent directories if they don't exist.
    fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)?;
        write_private(path, &contents)?;
        Ok(())
    }

    /// Label/value pairs for `config` output, with secrets masked.
    fn summary(&self) -> Vec<(&'static str, String)>;
}

/// Mask a secret for display.
pub fn mask(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => MASK.to_string(),
        _ => "Not set".to_string(),
    }
}

/// Write a file that may contain credentials.
///
/// On Unix the file is restricted to the owner (0600).
pub(crate) fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(contents.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }

    Ok(())
}
