//! Git operations.
//!
//! Thin wrappers over the `git` executable: cloning, pulling, local
//! identity, and branch checkout. Every call runs against an explicit
//! directory rather than the process working directory.

use std::path::Path;
use std::process::{Command, Output, Stdio};

/// Error type for git operations.
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    /// The git executable could not be started.
    #[error("Failed to run git: {0}")]
    Spawn(#[from] std::io::Error),
    /// Git ran but reported failure.
    #[error("git {command} failed ({status})")]
    Failed {
        /// The git subcommand that failed.
        command: String,
        /// Exit status description.
        status: String,
    },
}

/// Build a git command, optionally rooted at `dir`.
fn git(dir: Option<&Path>) -> Command {
    let mut cmd = Command::new("git");
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }
    cmd
}

/// Run a command whose output is shown to the user.
fn run_inherited(mut cmd: Command, label: &str) -> Result<(), GitError> {
    tracing::debug!(command = label, "running git");
    let status = cmd
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;

    if status.success() {
        Ok(())
    } else {
        Err(GitError::Failed {
            command: label.to_string(),
            status: status.to_string(),
        })
    }
}

/// Run a command quietly, capturing its output.
fn run_captured(mut cmd: Command, label: &str) -> Result<Output, GitError> {
    tracing::debug!(command = label, "running git");
    let output = cmd.stdin(Stdio::null()).output()?;

    if output.status.success() {
        Ok(output)
    } else {
        tracing::debug!(
            command = label,
            stderr = %String::from_utf8_lossy(&output.stderr).trim(),
            "git failed"
        );
        Err(GitError::Failed {
            command: label.to_string(),
            status: output.status.to_string(),
        })
    }
}

/// Clone `url` into `dest`.
///
/// The URL may carry credentials, so it is never included in errors or logs.
pub fn clone(url: &str, dest: &Path) -> Result<(), GitError> {
    let mut cmd = git(None);
    cmd.arg("clone").arg(url).arg(dest);
    run_inherited(cmd, "clone")
}

/// Pull the current branch of the clone at `dir`.
pub fn pull(dir: &Path) -> Result<(), GitError> {
    let mut cmd = git(Some(dir));
    cmd.arg("pull");
    run_inherited(cmd, "pull")
}

/// Set a repository-local config value.
pub fn config_set(dir: &Path, key: &str, value: &str) -> Result<(), GitError> {
    let mut cmd = git(Some(dir));
    cmd.args(["config", key, value]);
    run_captured(cmd, &format!("config {key}")).map(|_| ())
}

/// Create and checkout a new branch.
pub fn checkout_new_branch(dir: &Path, name: &str) -> Result<(), GitError> {
    let mut cmd = git(Some(dir));
    cmd.args(["checkout", "-b", name]);
    run_inherited(cmd, "checkout -b")
}

/// Checkout an existing branch.
pub fn checkout(dir: &Path, name: &str) -> Result<(), GitError> {
    let mut cmd = git(Some(dir));
    cmd.args(["checkout", name]);
    run_inherited(cmd, "checkout")
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::{git, run_captured};
    use std::path::Path;
    use std::process::Command;

    /// Read a repository-local config value.
    pub fn config_get(dir: &Path, key: &str) -> Option<String> {
        let mut cmd = git(Some(dir));
        cmd.args(["config", "--local", key]);
        let output = run_captured(cmd, &format!("config {key}")).ok()?;
        Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Get the current branch name.
    ///
    /// Works on freshly cloned empty repositories too, where `HEAD` points at
    /// an unborn branch.
    pub fn current_branch(dir: &Path) -> Option<String> {
        let mut cmd = git(Some(dir));
        cmd.args(["symbolic-ref", "--short", "HEAD"]);
        let output = run_captured(cmd, "symbolic-ref").ok()?;
        let branch = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Some(branch).filter(|b| !b.is_empty())
    }

    /// Initialise an empty bare repository to act as a clone source.
    pub fn init_bare(path: &Path) {
        std::fs::create_dir_all(path).unwrap();
        let status = Command::new("git")
            .args(["init", "--bare", "--quiet"])
            .arg(path)
            .status()
            .unwrap();
        assert!(status.success());
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{config_get, current_branch, init_bare};
    use super::*;
    use tempfile::TempDir;

    fn cloned_repo(temp: &TempDir) -> std::path::PathBuf {
        let remote = temp.path().join("remote.git");
        init_bare(&remote);

        let dest = temp.path().join("clone");
        clone(remote.to_str().unwrap(), &dest).unwrap();
        dest
    }

    #[test]
    fn test_clone_local_bare_repo() {
        let temp = TempDir::new().unwrap();
        let dest = cloned_repo(&temp);
        assert!(dest.join(".git").exists());
    }

    #[test]
    fn test_clone_missing_source_fails() {
        let temp = TempDir::new().unwrap();
        let result = clone(
            temp.path().join("missing.git").to_str().unwrap(),
            &temp.path().join("dest"),
        );
        assert!(matches!(result, Err(GitError::Failed { .. })));
    }

    #[test]
    fn test_config_set_and_get() {
        let temp = TempDir::new().unwrap();
        let dest = cloned_repo(&temp);

        config_set(&dest, "user.name", "octocat").unwrap();
        assert_eq!(config_get(&dest, "user.name"), Some("octocat".to_string()));
    }

    #[test]
    fn test_checkout_new_branch() {
        let temp = TempDir::new().unwrap();
        let dest = cloned_repo(&temp);

        checkout_new_branch(&dest, "feature-x").unwrap();
        assert_eq!(current_branch(&dest), Some("feature-x".to_string()));
    }

    #[test]
    fn test_pull_outside_repository_fails() {
        let temp = TempDir::new().unwrap();
        assert!(pull(temp.path()).is_err());
    }

    #[test]
    fn test_git_error_display_has_no_url() {
        let err = GitError::Failed {
            command: "clone".to_string(),
            status: "exit status: 128".to_string(),
        };
        assert_eq!(err.to_string(), "git clone failed (exit status: 128)");
    }
}
