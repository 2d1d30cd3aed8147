//! Config record for `claude-cloud`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::{mask, ConfigRecord};

/// Settings written by `claude-cloud setup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributorConfig {
    /// GitHub username, used as the local git `user.name`.
    pub github_username: String,
    /// GitHub email, used as the local git `user.email`.
    pub github_email: String,
    /// Where repositories are cloned.
    pub work_dir: PathBuf,
    /// Personal access token embedded in clone URLs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_token: Option<String>,
    /// API key handed to the assistant as `ANTHROPIC_API_KEY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Clone host override (GitHub Enterprise, mirrors).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_base_url: Option<String>,
}

impl ContributorConfig {
    /// Create a config with only the required fields.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        work_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            github_username: username.into(),
            github_email: email.into(),
            work_dir: work_dir.into(),
            github_token: None,
            api_key: None,
            git_base_url: None,
        }
    }
}

impl ConfigRecord for ContributorConfig {
    fn summary(&self) -> Vec<(&'static str, String)> {
        let mut rows = vec![
            ("GitHub Username", self.github_username.clone()),
            ("GitHub Email", self.github_email.clone()),
            ("Working Directory", self.work_dir.display().to_string()),
            ("GitHub Token", mask(self.github_token.as_deref())),
            ("API Key", mask(self.api_key.as_deref())),
        ];
        if let Some(ref base) = self.git_base_url {
            rows.push(("Git Host", base.clone()));
        }
        rows
    }
}
