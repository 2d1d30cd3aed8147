//! Config record for `figma-designer`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::{mask, ConfigRecord};

/// Settings written by `figma-designer setup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignerConfig {
    /// Figma personal access token.
    pub figma_api_token: String,
    /// Z.AI key the assistant authenticates with.
    pub zai_api_key: String,
    /// GitHub username, used as the local git `user.name`.
    pub github_username: String,
    /// GitHub email, used as the local git `user.email`.
    pub github_email: String,
    /// Token used to clone conversion targets.
    pub github_token: String,
    /// Where task directories and clones are created.
    pub work_dir: PathBuf,
    /// Clone host override (GitHub Enterprise, mirrors).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_base_url: Option<String>,
}

impl ConfigRecord for DesignerConfig {
    fn summary(&self) -> Vec<(&'static str, String)> {
        let or_unset = |v: &str| {
            if v.is_empty() {
                "Not set".to_string()
            } else {
                v.to_string()
            }
        };

        let mut rows = vec![
            ("Figma API Token", mask(Some(&self.figma_api_token))),
            ("Z.AI API Key", mask(Some(&self.zai_api_key))),
            ("GitHub Token", mask(Some(&self.github_token))),
            ("GitHub Username", or_unset(&self.github_username)),
            ("GitHub Email", or_unset(&self.github_email)),
            ("Working Directory", self.work_dir.display().to_string()),
        ];
        if let Some(ref base) = self.git_base_url {
            rows.push(("Git Host", base.clone()));
        }
        rows
    }
}

#[cfg(test)]
pub(crate) fn sample() -> DesignerConfig {
    DesignerConfig {
        figma_api_token: "figd_token".to_string(),
        zai_api_key: "zai-key".to_string(),
        github_username: "octocat".to_string(),
        github_email: "octocat@github.com".to_string(),
        github_token: "ghp_token".to_string(),
        work_dir: PathBuf::from("/tmp/figma_tasks"),
        git_base_url: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");

        let config = sample();
        config.save(&path).unwrap();

        assert_eq!(DesignerConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_uses_original_key_names() {
        let json = serde_json::to_value(sample()).unwrap();
        for key in [
            "figmaApiToken",
            "zaiApiKey",
            "githubUsername",
            "githubEmail",
            "githubToken",
            "workDir",
        ] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
    }

    #[test]
    fn test_summary_never_shows_secrets() {
        let rows = sample().summary();
        for (_, value) in &rows {
            assert!(!value.contains("figd_token"));
            assert!(!value.contains("zai-key"));
            assert!(!value.contains("ghp_token"));
        }
        assert!(rows.contains(&("GitHub Username", "octocat".to_string())));
    }

    #[test]
    fn test_summary_empty_username_not_set() {
        let config = DesignerConfig {
            github_username: String::new(),
            ..sample()
        };
        assert!(config
            .summary()
            .contains(&("GitHub Username", "Not set".to_string())));
    }
}
