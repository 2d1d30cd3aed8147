//! Repository preparation.
//!
//! Turns `org/repo` plus credentials into a ready local clone under the
//! working directory: clone or update, set the local git identity, and
//! optionally switch to a task branch.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{ContributorConfig, DesignerConfig, DEFAULT_GIT_BASE_URL};
use crate::git::{self, GitError};

/// The git operations the preparer needs.
pub trait GitBackend {
    /// Clone `url` into `dest`.
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), GitError>;
    /// Update an existing clone.
    fn pull(&self, dir: &Path) -> Result<(), GitError>;
    /// Set `user.name` and `user.email` locally.
    fn set_identity(&self, dir: &Path, name: &str, email: &str) -> Result<(), GitError>;
    /// Create and checkout a new branch.
    fn create_branch(&self, dir: &Path, name: &str) -> Result<(), GitError>;
    /// Checkout an existing branch.
    fn checkout(&self, dir: &Path, name: &str) -> Result<(), GitError>;
}

/// [`GitBackend`] backed by the `git` executable.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemGit;

impl GitBackend for SystemGit {
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), GitError> {
        git::clone(url, dest)
    }

    fn pull(&self, dir: &Path) -> Result<(), GitError> {
        git::pull(dir)
    }

    fn set_identity(&self, dir: &Path, name: &str, email: &str) -> Result<(), GitError> {
        git::config_set(dir, "user.name", name)?;
        git::config_set(dir, "user.email", email)
    }

    fn create_branch(&self, dir: &Path, name: &str) -> Result<(), GitError> {
        git::checkout_new_branch(dir, name)
    }

    fn checkout(&self, dir: &Path, name: &str) -> Result<(), GitError> {
        git::checkout(dir, name)
    }
}

/// A GitHub repository coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoTarget {
    /// Organisation or user.
    pub org: String,
    /// Repository name.
    pub repo: String,
}

impl RepoTarget {
    /// Create a target.
    pub fn new(org: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            org: org.into(),
            repo: repo.into(),
        }
    }

    /// Name of the clone directory: `{org}_{repo}`.
    pub fn dir_name(&self) -> String {
        format!("{}_{}", self.org, self.repo)
    }

    /// Clone URL on `base`, embedding `token` for http(s) hosts.
    pub fn clone_url(&self, base: &str, token: Option<&str>) -> String {
        let base = base.trim_end_matches('/');
        let base = match token.filter(|t| !t.is_empty()) {
            Some(token) => match base.split_once("://") {
                Some((scheme, rest)) if scheme.starts_with("http") => {
                    format!("{scheme}://{token}@{rest}")
                }
                _ => base.to_string(),
            },
            None => base.to_string(),
        };
        format!("{base}/{}/{}.git", self.org, self.repo)
    }
}

impl fmt::Display for RepoTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.org, self.repo)
    }
}

/// Identity and credentials used while preparing a clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCredentials {
    /// Local `user.name`.
    pub name: String,
    /// Local `user.email`.
    pub email: String,
    /// Token embedded in the clone URL.
    pub token: Option<String>,
    /// Host repositories are cloned from.
    pub base_url: String,
}

impl From<&ContributorConfig> for GitCredentials {
    fn from(config: &ContributorConfig) -> Self {
        Self {
            name: config.github_username.clone(),
            email: config.github_email.clone(),
            token: config.github_token.clone(),
            base_url: config
                .git_base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_GIT_BASE_URL.to_string()),
        }
    }
}

impl From<&DesignerConfig> for GitCredentials {
    fn from(config: &DesignerConfig) -> Self {
        Self {
            name: config.github_username.clone(),
            email: config.github_email.clone(),
            token: Some(config.github_token.clone()).filter(|t| !t.is_empty()),
            base_url: config
                .git_base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_GIT_BASE_URL.to_string()),
        }
    }
}

/// Hide credentials embedded in a URL.
pub fn redact_url(url: &str) -> String {
    if let Some((scheme, rest)) = url.split_once("://") {
        if let Some((userinfo, host)) = rest.split_once('@') {
            if !userinfo.contains('/') {
                return format!("{scheme}://***@{host}");
            }
        }
    }
    url.to_string()
}

/// Fatal preparation failures.
#[derive(Debug, thiserror::Error)]
pub enum PrepareError {
    /// The working directory could not be created.
    #[error("Failed to create working directory {}: {source}", .path.display())]
    WorkDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// No usable clone could be made.
    #[error("Failed to clone {url}: {source}")]
    Clone {
        /// Redacted clone URL.
        url: String,
        /// Underlying git error.
        source: GitError,
    },
    /// Local identity could not be configured.
    #[error("Failed to configure git identity: {0}")]
    Identity(GitError),
}

/// Recoverable conditions; preparation continues after these.
#[derive(Debug, thiserror::Error)]
pub enum PrepareWarning {
    /// Updating an existing clone failed; it may be stale.
    #[error("Pull failed, continuing with the existing clone: {0}")]
    Pull(GitError),
    /// The branch could not be created, most likely because it exists.
    #[error("Could not create branch {branch}, reusing it: {source}")]
    Branch {
        /// Branch name.
        branch: String,
        /// Underlying git error.
        source: GitError,
    },
}

/// Progress notifications emitted while preparing.
#[derive(Debug)]
pub enum PrepareEvent<'a> {
    /// An existing clone is being updated.
    Updating(&'a Path),
    /// A fresh clone is starting; the URL is redacted.
    Cloning(&'a str),
    /// Local identity is being configured.
    ConfiguringIdentity,
    /// A branch is being created.
    CreatingBranch(&'a str),
    /// A recoverable problem occurred.
    Warning(&'a PrepareWarning),
}

/// A ready clone.
#[derive(Debug)]
pub struct PreparedRepo {
    /// Clone location.
    pub path: PathBuf,
    /// Whether this run created the clone.
    pub cloned: bool,
    /// Branch requested for this task, if any.
    pub branch: Option<String>,
    /// Recoverable problems encountered.
    pub warnings: Vec<PrepareWarning>,
}

/// Ensure a clone of `target` exists under `work_dir` and is ready for work.
pub fn prepare(
    git: &dyn GitBackend,
    target: &RepoTarget,
    credentials: &GitCredentials,
    work_dir: &Path,
    branch: Option<&str>,
    on_event: &mut dyn FnMut(PrepareEvent<'_>),
) -> Result<PreparedRepo, PrepareError> {
    fs::create_dir_all(work_dir).map_err(|source| PrepareError::WorkDir {
        path: work_dir.to_path_buf(),
        source,
    })?;

    let path = work_dir.join(target.dir_name());
    let mut warnings = Vec::new();
    let cloned;

    if path.exists() {
        on_event(PrepareEvent::Updating(&path));
        if let Err(e) = git.pull(&path) {
            tracing::warn!(repo = %target, error = %e, "pull failed");
            let warning = PrepareWarning::Pull(e);
            on_event(PrepareEvent::Warning(&warning));
            warnings.push(warning);
        }
        cloned = false;
    } else {
        let url = target.clone_url(&credentials.base_url, credentials.token.as_deref());
        let shown = redact_url(&url);
        on_event(PrepareEvent::Cloning(&shown));
        git.clone_repo(&url, &path)
            .map_err(|source| PrepareError::Clone { url: shown, source })?;
        cloned = true;
    }

    on_event(PrepareEvent::ConfiguringIdentity);
    git.set_identity(&path, &credentials.name, &credentials.email)
        .map_err(PrepareError::Identity)?;

    if let Some(name) = branch {
        on_event(PrepareEvent::CreatingBranch(name));
        if let Err(e) = git.create_branch(&path, name) {
            tracing::warn!(branch = name, error = %e, "branch creation failed");
            if let Err(checkout_err) = git.checkout(&path, name) {
                tracing::debug!(branch = name, error = %checkout_err, "checkout also failed");
            }
            let warning = PrepareWarning::Branch {
                branch: name.to_string(),
                source: e,
            };
            on_event(PrepareEvent::Warning(&warning));
            warnings.push(warning);
        }
    }

    Ok(PreparedRepo {
        path,
        cloned,
        branch: branch.map(str::to_string),
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::TempDir;

    /// Records calls and fails the ones it is told to.
    #[derive(Default)]
    struct FakeGit {
        calls: RefCell<Vec<String>>,
        fail_clone: bool,
        fail_pull: bool,
        fail_identity: bool,
        fail_branch: bool,
    }

    impl FakeGit {
        fn failed() -> GitError {
            GitError::Failed {
                command: "fake".to_string(),
                status: "exit status: 1".to_string(),
            }
        }

        fn record(&self, call: String) {
            self.calls.borrow_mut().push(call);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl GitBackend for FakeGit {
        fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), GitError> {
            self.record(format!("clone {url}"));
            if self.fail_clone {
                return Err(Self::failed());
            }
            fs::create_dir_all(dest).unwrap();
            Ok(())
        }

        fn pull(&self, _dir: &Path) -> Result<(), GitError> {
            self.record("pull".to_string());
            if self.fail_pull {
                Err(Self::failed())
            } else {
                Ok(())
            }
        }

        fn set_identity(&self, _dir: &Path, name: &str, email: &str) -> Result<(), GitError> {
            self.record(format!("identity {name} <{email}>"));
            if self.fail_identity {
                Err(Self::failed())
            } else {
                Ok(())
            }
        }

        fn create_branch(&self, _dir: &Path, name: &str) -> Result<(), GitError> {
            self.record(format!("branch {name}"));
            if self.fail_branch {
                Err(Self::failed())
            } else {
                Ok(())
            }
        }

        fn checkout(&self, _dir: &Path, name: &str) -> Result<(), GitError> {
            self.record(format!("checkout {name}"));
            Ok(())
        }
    }

    fn credentials() -> GitCredentials {
        GitCredentials {
            name: "octocat".to_string(),
            email: "octocat@github.com".to_string(),
            token: None,
            base_url: DEFAULT_GIT_BASE_URL.to_string(),
        }
    }

    fn prepare_with(
        git: &FakeGit,
        work_dir: &Path,
        branch: Option<&str>,
    ) -> Result<PreparedRepo, PrepareError> {
        prepare(
            git,
            &RepoTarget::new("acme", "widgets"),
            &credentials(),
            work_dir,
            branch,
            &mut |_| {},
        )
    }

    #[test]
    fn test_dir_name_and_display() {
        let target = RepoTarget::new("acme", "widgets");
        assert_eq!(target.dir_name(), "acme_widgets");
        assert_eq!(target.to_string(), "acme/widgets");
    }

    #[test]
    fn test_clone_url_without_token() {
        let target = RepoTarget::new("acme", "widgets");
        assert_eq!(
            target.clone_url("https://github.com", None),
            "https://github.com/acme/widgets.git"
        );
        assert_eq!(
            target.clone_url("https://github.com/", Some("")),
            "https://github.com/acme/widgets.git"
        );
    }

    #[test]
    fn test_clone_url_embeds_token() {
        let target = RepoTarget::new("acme", "widgets");
        assert_eq!(
            target.clone_url("https://github.com", Some("ghp_abc")),
            "https://ghp_abc@github.com/acme/widgets.git"
        );
    }

    #[test]
    fn test_clone_url_local_base_ignores_token() {
        let target = RepoTarget::new("acme", "widgets");
        assert_eq!(
            target.clone_url("/srv/git", Some("ghp_abc")),
            "/srv/git/acme/widgets.git"
        );
        assert_eq!(
            target.clone_url("file:///srv/git", Some("ghp_abc")),
            "file:///srv/git/acme/widgets.git"
        );
    }

    #[test]
    fn test_redact_url() {
        assert_eq!(
            redact_url("https://ghp_abc@github.com/acme/widgets.git"),
            "https://***@github.com/acme/widgets.git"
        );
        assert_eq!(
            redact_url("https://github.com/acme/widgets.git"),
            "https://github.com/acme/widgets.git"
        );
        assert_eq!(
            redact_url("https://github.com/acme/we@ird.git"),
            "https://github.com/acme/we@ird.git"
        );
    }

    #[test]
    fn test_credentials_from_designer_config() {
        let config = crate::config::designer::sample();
        let creds = GitCredentials::from(&config);
        assert_eq!(creds.name, "octocat");
        assert_eq!(creds.token, Some("ghp_token".to_string()));
        assert_eq!(creds.base_url, DEFAULT_GIT_BASE_URL);
    }

    #[test]
    fn test_credentials_from_contributor_config() {
        let config = ContributorConfig {
            git_base_url: Some("https://git.example.com".to_string()),
            ..ContributorConfig::new("octocat", "octocat@github.com", "/tmp")
        };
        let creds = GitCredentials::from(&config);
        assert!(creds.token.is_none());
        assert_eq!(creds.base_url, "https://git.example.com");
    }

    #[test]
    fn test_creates_work_dir_before_clone() {
        let temp = TempDir::new().unwrap();
        let work_dir = temp.path().join("deep/nested/work");
        let git = FakeGit::default();

        let prepared = prepare_with(&git, &work_dir, None).unwrap();

        assert!(work_dir.is_dir());
        assert_eq!(prepared.path, work_dir.join("acme_widgets"));
        assert!(prepared.cloned);
        assert_eq!(
            git.calls(),
            vec![
                "clone https://github.com/acme/widgets.git".to_string(),
                "identity octocat <octocat@github.com>".to_string(),
            ]
        );
    }

    #[test]
    fn test_existing_clone_is_pulled_not_recloned() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("acme_widgets")).unwrap();
        let git = FakeGit::default();

        let prepared = prepare_with(&git, temp.path(), None).unwrap();

        assert!(!prepared.cloned);
        assert!(prepared.warnings.is_empty());
        assert!(!git.calls().iter().any(|c| c.starts_with("clone")));
        assert_eq!(git.calls()[0], "pull");
    }

    #[test]
    fn test_pull_failure_is_a_warning() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("acme_widgets")).unwrap();
        let git = FakeGit {
            fail_pull: true,
            ..Default::default()
        };

        let prepared = prepare_with(&git, temp.path(), None).unwrap();

        assert!(matches!(prepared.warnings[..], [PrepareWarning::Pull(_)]));
        assert!(!git.calls().iter().any(|c| c.starts_with("clone")));
        assert!(git.calls().iter().any(|c| c.starts_with("identity")));
    }

    #[test]
    fn test_clone_failure_is_fatal_and_redacted() {
        let temp = TempDir::new().unwrap();
        let git = FakeGit {
            fail_clone: true,
            ..Default::default()
        };

        let result = prepare(
            &git,
            &RepoTarget::new("acme", "widgets"),
            &GitCredentials {
                token: Some("ghp_secret".to_string()),
                ..credentials()
            },
            temp.path(),
            None,
            &mut |_| {},
        );

        let err = result.unwrap_err();
        assert!(matches!(err, PrepareError::Clone { .. }));
        assert!(!err.to_string().contains("ghp_secret"));
        assert!(!git.calls().iter().any(|c| c.starts_with("identity")));
    }

    #[test]
    fn test_identity_failure_is_fatal() {
        let temp = TempDir::new().unwrap();
        let git = FakeGit {
            fail_identity: true,
            ..Default::default()
        };

        let err = prepare_with(&git, temp.path(), None).unwrap_err();
        assert!(matches!(err, PrepareError::Identity(_)));
    }

    #[test]
    fn test_identity_set_on_every_run() {
        let temp = TempDir::new().unwrap();
        let git = FakeGit::default();

        prepare_with(&git, temp.path(), None).unwrap();
        prepare_with(&git, temp.path(), None).unwrap();

        let identity_calls = git
            .calls()
            .iter()
            .filter(|c| c.starts_with("identity"))
            .count();
        assert_eq!(identity_calls, 2);
    }

    #[test]
    fn test_branch_created() {
        let temp = TempDir::new().unwrap();
        let git = FakeGit::default();

        let prepared = prepare_with(&git, temp.path(), Some("figma-conversion-1")).unwrap();

        assert_eq!(prepared.branch.as_deref(), Some("figma-conversion-1"));
        assert!(prepared.warnings.is_empty());
        assert_eq!(git.calls().last().unwrap(), "branch figma-conversion-1");
    }

    #[test]
    fn test_existing_branch_is_checked_out_with_warning() {
        let temp = TempDir::new().unwrap();
        let git = FakeGit {
            fail_branch: true,
            ..Default::default()
        };

        let prepared = prepare_with(&git, temp.path(), Some("feature")).unwrap();

        assert!(matches!(
            prepared.warnings[..],
            [PrepareWarning::Branch { ref branch, .. }] if branch == "feature"
        ));
        assert_eq!(git.calls().last().unwrap(), "checkout feature");
    }

    #[test]
    fn test_events_are_reported_in_order() {
        let temp = TempDir::new().unwrap();
        let git = FakeGit::default();
        let mut events = Vec::new();

        prepare(
            &git,
            &RepoTarget::new("acme", "widgets"),
            &credentials(),
            temp.path(),
            Some("b"),
            &mut |event| events.push(format!("{event:?}")),
        )
        .unwrap();

        assert!(events[0].starts_with("Cloning"));
        assert!(events[1].starts_with("ConfiguringIdentity"));
        assert!(events[2].starts_with("CreatingBranch"));
    }

    #[test]
    fn test_system_git_end_to_end() {
        let temp = TempDir::new().unwrap();
        let remotes = temp.path().join("remotes");
        crate::git::test_support::init_bare(&remotes.join("acme/widgets.git"));

        let creds = GitCredentials {
            base_url: remotes.display().to_string(),
            ..credentials()
        };
        let work_dir = temp.path().join("work");

        let prepared = prepare(
            &SystemGit,
            &RepoTarget::new("acme", "widgets"),
            &creds,
            &work_dir,
            None,
            &mut |_| {},
        )
        .unwrap();

        assert_eq!(prepared.path, work_dir.join("acme_widgets"));
        assert_eq!(
            crate::git::test_support::config_get(&prepared.path, "user.email"),
            Some("octocat@github.com".to_string())
        );
    }
}
