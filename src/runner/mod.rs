//! Assistant task runner.
//!
//! Spawns the assistant with a generated prompt, routes its output to the
//! terminal or a log file, waits for it to exit, and removes the temporary
//! files written for the task. A run moves through
//! `NotStarted -> Spawning -> Running -> {Succeeded, Failed, SpawnError} -> Cleaned`.

mod assistant;
mod task;

use std::fmt;
use std::path::PathBuf;

pub use assistant::{AssistantCommand, DEFAULT_ASSISTANT, INSTALL_HINTS, UNATTENDED_FLAG};
pub use task::{run_blocking, spawn, RunHandle};

/// Where the assistant's output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Inherit the terminal; the user watches the run live.
    Terminal,
    /// Capture stdout and stderr into this file.
    LogFile(PathBuf),
}

impl OutputTarget {
    /// Pick a target from the show-logs toggle.
    pub fn from_show_logs(show_logs: bool, log_file: PathBuf) -> Self {
        if show_logs {
            OutputTarget::Terminal
        } else {
            OutputTarget::LogFile(log_file)
        }
    }

    /// The log file, when output is captured.
    pub fn log_file(&self) -> Option<&PathBuf> {
        match self {
            OutputTarget::Terminal => None,
            OutputTarget::LogFile(path) => Some(path),
        }
    }
}

/// Everything needed to run the assistant once.
#[derive(Debug, Clone)]
pub struct RunRequest {
    /// Program to execute.
    pub program: String,
    /// Arguments, prompt included.
    pub args: Vec<String>,
    /// Directory the assistant runs in.
    pub working_dir: PathBuf,
    /// Variables added to the child's environment only.
    pub env: Vec<(String, String)>,
    /// Output routing.
    pub output: OutputTarget,
    /// Files removed once the assistant exits.
    pub temp_files: Vec<PathBuf>,
}

/// Lifecycle states of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Request built, nothing started.
    NotStarted,
    /// Launching the process.
    Spawning,
    /// Process is running.
    Running,
    /// Exited with status 0.
    Succeeded,
    /// Exited non-zero or was killed.
    Failed,
    /// Could not be launched.
    SpawnError,
    /// Temporary files removed and log closed.
    Cleaned,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitOutcome {
    /// Exit status 0.
    Succeeded,
    /// Non-zero exit; `code` is `None` when killed by a signal.
    Failed {
        /// Exit code, if any.
        code: Option<i32>,
    },
    /// The process never started.
    SpawnError {
        /// Why the launch failed.
        message: String,
        /// Whether the executable was missing.
        not_found: bool,
    },
}

impl ExitOutcome {
    /// Whether the assistant exited cleanly.
    pub fn is_success(&self) -> bool {
        matches!(self, ExitOutcome::Succeeded)
    }

    /// Terminal state for this outcome.
    pub fn state(&self) -> RunState {
        match self {
            ExitOutcome::Succeeded => RunState::Succeeded,
            ExitOutcome::Failed { .. } => RunState::Failed,
            ExitOutcome::SpawnError { .. } => RunState::SpawnError,
        }
    }
}

impl fmt::Display for ExitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitOutcome::Succeeded => write!(f, "completed successfully"),
            ExitOutcome::Failed { code: Some(code) } => write!(f, "exited with code {code}"),
            ExitOutcome::Failed { code: None } => write!(f, "was terminated by a signal"),
            ExitOutcome::SpawnError { message, .. } => write!(f, "could not be started: {message}"),
        }
    }
}

/// Result of a finished run.
#[derive(Debug)]
pub struct RunReport {
    /// How the run ended.
    pub outcome: ExitOutcome,
    /// Captured output, when logging to a file.
    pub log_file: Option<PathBuf>,
    /// States visited, in order.
    pub transitions: Vec<RunState>,
}

/// Error type for the runner itself (not the assistant).
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The async runtime could not be created.
    #[error("Failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    /// The supervising task panicked or was cancelled.
    #[error("Runner task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
