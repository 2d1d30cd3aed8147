//! Plumbing shared by the task commands.
//!
//! `contribute`, `create` and `convert` all load a config, collect missing
//! inputs, hand a prompt to the assistant and report how it went. The steps
//! they have in common live here.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::cli::interact::{InteractError, Prompter, Question};
use crate::cli::output::{self, OutputError, PromptDestination};
use crate::config::{ConfigError, ConfigRecord};
use crate::prompt::PromptError;
use crate::repo::{PrepareError, PrepareEvent};
use crate::resolve::{resolve, resolve_show_logs, Candidates, Resolved};
use crate::runner::{
    self, AssistantCommand, ExitOutcome, RunReport, RunRequest, RunnerError, INSTALL_HINTS,
};

/// Result type for task command operations.
pub type TaskCommandResult = Result<(), TaskCommandError>;

/// Error type for task command operations.
#[derive(Debug, thiserror::Error)]
pub enum TaskCommandError {
    /// `setup` has not been run.
    #[error("Configuration not found. Please run \"{program} setup\" first.")]
    NotConfigured {
        /// Program whose setup is missing.
        program: &'static str,
    },
    /// The config file exists but could not be used.
    #[error("{0}")]
    Config(#[from] ConfigError),
    /// An interactive question could not be answered.
    #[error("{0}")]
    Interact(#[from] InteractError),
    /// The task file named on the command line could not be read.
    #[error("Failed to read task file {}: {source}", .path.display())]
    TaskFile {
        /// File that was named.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The repository could not be prepared.
    #[error("{0}")]
    Prepare(#[from] PrepareError),
    /// The prompt could not be rendered.
    #[error("{0}")]
    Prompt(#[from] PromptError),
    /// Writing task files or directories failed.
    #[error("Failed to write task files: {0}")]
    Io(#[from] io::Error),
    /// The runner itself failed.
    #[error("{0}")]
    Runner(#[from] RunnerError),
    /// The assistant could not be launched.
    #[error("Could not start {program}: {message}")]
    AssistantNotStarted {
        /// Program that was run.
        program: String,
        /// Launch error.
        message: String,
    },
    /// The dry-run prompt could not be copied.
    #[error("{0}")]
    Output(#[from] OutputError),
}

/// Load a config, turning a missing file into a setup hint.
pub fn load_config<T: ConfigRecord>(
    path: &Path,
    program: &'static str,
) -> Result<T, TaskCommandError> {
    match T::load(path) {
        Ok(config) => Ok(config),
        Err(ConfigError::NotFound(_)) => Err(TaskCommandError::NotConfigured { program }),
        Err(e) => Err(e.into()),
    }
}

/// Use `value` when given, otherwise ask.
pub fn ask_if_missing(
    value: Option<String>,
    question: &Question,
    prompter: &mut dyn Prompter,
) -> Result<String, TaskCommandError> {
    match value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        Some(v) => Ok(v),
        None => Ok(prompter.input(question)?),
    }
}

/// Where the task text may come from.
#[derive(Debug, Clone, Copy)]
pub struct TaskSources<'a> {
    /// Value of the task flag.
    pub flag: Option<&'a str>,
    /// File named by the task-file flag.
    pub file: Option<&'a Path>,
    /// Environment variable consulted after the flag and file.
    pub env_var: &'static str,
    /// Editor message when nothing else supplied the text.
    pub editor_message: &'static str,
}

/// Resolve the task text: flag, then file, then environment, then editor.
pub fn resolve_task(
    sources: TaskSources<'_>,
    prompter: &mut dyn Prompter,
) -> Result<Resolved, TaskCommandError> {
    let file = match sources.file {
        Some(path) => Some(fs::read_to_string(path).map_err(|source| {
            TaskCommandError::TaskFile {
                path: path.to_path_buf(),
                source,
            }
        })?),
        None => None,
    };

    let candidates = Candidates {
        flag: sources.flag.map(str::to_string),
        file,
        env: std::env::var(sources.env_var).ok(),
    };

    let resolved = match resolve(candidates) {
        Some(resolved) => resolved,
        None => Resolved::interactive(prompter.editor(sources.editor_message)?),
    };
    tracing::debug!(source = %resolved.source, "task text resolved");
    Ok(resolved)
}

/// Show-logs toggle from the flag and `env_var`.
pub fn show_logs(flag: bool, env_var: &str, default: bool) -> bool {
    resolve_show_logs(flag, std::env::var(env_var).ok().as_deref(), default)
}

/// Print or copy a prompt instead of running it.
pub fn dry_run(prompt: &str, copy: bool) -> TaskCommandResult {
    output::emit_prompt(prompt, PromptDestination::from_copy_flag(copy))?;
    Ok(())
}

/// Milliseconds since the epoch, for task directory and branch names.
pub fn timestamp_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Create `{work_dir}/{prefix}_{millis}`.
pub fn create_task_dir(work_dir: &Path, prefix: &str) -> io::Result<PathBuf> {
    fs::create_dir_all(work_dir)?;

    let mut stamp = timestamp_millis();
    loop {
        let dir = work_dir.join(format!("{prefix}_{stamp}"));
        match fs::create_dir(&dir) {
            Ok(()) => return Ok(dir),
            // Two runs in the same millisecond
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => stamp += 1,
            Err(e) => return Err(e),
        }
    }
}

/// Write files the assistant reads; they are removed after the run.
pub fn write_temp_files(files: &[(&Path, &str)]) -> io::Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len());
    for (path, contents) in files {
        fs::write(path, contents)?;
        written.push(path.to_path_buf());
    }
    Ok(written)
}

/// Print repository preparation progress.
pub fn print_prepare_event(event: PrepareEvent<'_>) {
    match event {
        PrepareEvent::Updating(_) => {
            println!("\x1b[33mRepository already exists, pulling latest changes...\x1b[0m");
        }
        PrepareEvent::Cloning(url) => println!("\x1b[2mCloning from {url}...\x1b[0m"),
        PrepareEvent::ConfiguringIdentity => println!("\x1b[1mConfiguring git user...\x1b[0m"),
        PrepareEvent::CreatingBranch(branch) => {
            println!("\x1b[1mCreating branch: {branch}\x1b[0m");
        }
        PrepareEvent::Warning(warning) => {
            println!("\x1b[33mWarning:\x1b[0m {warning}");
        }
    }
}

/// Run the assistant to completion.
pub fn run_assistant(
    assistant: &AssistantCommand,
    request: RunRequest,
) -> Result<RunReport, TaskCommandError> {
    println!("\n\x1b[1mLaunching assistant...\x1b[0m");
    println!("\x1b[2mThis will execute: {}\x1b[0m", assistant.display());
    Ok(runner::run_blocking(request)?)
}

/// Report the end of a run.
///
/// `on_success` prints the command's own success details. A non-zero exit
/// is a warning; a failed launch is an error.
pub fn finish(report: &RunReport, program: &str, on_success: impl FnOnce()) -> TaskCommandResult {
    match report.outcome {
        ExitOutcome::Succeeded => {
            println!("\n\x1b[32m✓\x1b[0m Assistant completed successfully!");
            on_success();
            if let Some(ref log) = report.log_file {
                output::print_path("Logs saved to", log);
            }
            Ok(())
        }
        ExitOutcome::Failed { .. } => {
            println!("\n\x1b[33mWarning:\x1b[0m Assistant {}", report.outcome);
            if let Some(ref log) = report.log_file {
                output::print_path("Check logs at", log);
            }
            Ok(())
        }
        ExitOutcome::SpawnError {
            ref message,
            not_found,
        } => {
            if not_found {
                eprintln!("\n\x1b[33mMake sure the assistant CLI is installed:\x1b[0m");
                for hint in INSTALL_HINTS {
                    eprintln!("\x1b[2m   {hint}\x1b[0m");
                }
            }
            if let Some(ref log) = report.log_file {
                eprintln!("\x1b[2mError written to: {}\x1b[0m", log.display());
            }
            Err(TaskCommandError::AssistantNotStarted {
                program: program.to_string(),
                message: message.clone(),
            })
        }
    }
}
