//! Contribute command implementation.
//!
//! This module implements `claude-cloud contribute`: clone a repository,
//! set the local identity and hand the issue to the assistant.

use std::path::PathBuf;

use crate::cli::interact::{Prompter, Question};
use crate::cli::output;
use crate::config::{ContributorConfig, Paths};
use crate::prompt::{build_prompt, Author, TaskPrompt};
use crate::repo::{prepare, GitBackend, GitCredentials, RepoTarget};
use crate::runner::{AssistantCommand, OutputTarget};

use super::task::{self, TaskCommandResult, TaskSources};

/// Program name used in messages.
pub const PROGRAM: &str = "claude-cloud";
/// Environment variable holding the issue text.
pub const ISSUE_ENV: &str = "CLAUDE_CLOUD_ISSUE";
/// Environment variable toggling terminal output.
pub const SHOW_LOGS_ENV: &str = "CLAUDE_CLOUD_SHOW_LOGS";
/// Environment variable overriding the assistant executable.
pub const ASSISTANT_ENV: &str = "CLAUDE_CLOUD_ASSISTANT";

/// Issue text handed to the assistant, inside the task directory.
pub const TASK_FILE: &str = ".claude-task.md";
/// Full prompt, inside the task directory.
pub const PROMPT_FILE: &str = ".claude-prompt-temp.txt";
/// Captured assistant output, inside the task directory.
pub const LOG_FILE: &str = ".claude-cloud-logs.txt";
/// Prefix of the per-run task directory, kept outside the clone so nothing
/// we write can be committed.
pub const TASK_DIR_PREFIX: &str = "contribution";

/// Options for the contribute command.
#[derive(Debug, Clone, Default)]
pub struct ContributeOptions {
    /// GitHub organization or user.
    pub org: Option<String>,
    /// Repository name.
    pub repo: Option<String>,
    /// Issue text.
    pub issue: Option<String>,
    /// File to read the issue text from.
    pub issue_file: Option<PathBuf>,
    /// Mirror assistant output to the terminal.
    pub show_logs: bool,
    /// Print the prompt instead of running it.
    pub dry_run: bool,
    /// With `dry_run`, copy the prompt to the clipboard.
    pub copy: bool,
}

/// Execute the contribute command.
pub fn contribute(
    paths: &Paths,
    options: ContributeOptions,
    prompter: &mut dyn Prompter,
    git: &dyn GitBackend,
) -> TaskCommandResult {
    let config: ContributorConfig = task::load_config(&paths.cloud_config(), PROGRAM)?;

    let org = task::ask_if_missing(
        options.org,
        &Question::required("Enter the GitHub organization or username"),
        prompter,
    )?;
    let repo = task::ask_if_missing(
        options.repo,
        &Question::required("Enter the repository name"),
        prompter,
    )?;
    let issue = task::resolve_task(
        TaskSources {
            flag: options.issue.as_deref(),
            file: options.issue_file.as_deref(),
            env_var: ISSUE_ENV,
            editor_message: "Describe the issue/task",
        },
        prompter,
    )?;

    let target = RepoTarget::new(org, repo);
    let author = Author {
        username: &config.github_username,
        email: &config.github_email,
    };
    let prompt = build_prompt(&TaskPrompt::Contribute {
        target: &target,
        task: &issue.value,
        author,
    })?;

    if options.dry_run {
        return task::dry_run(&prompt, options.copy);
    }

    println!("\n\x1b[1mStarting contribution to {target}...\x1b[0m");
    let prepared = prepare(
        git,
        &target,
        &GitCredentials::from(&config),
        &config.work_dir,
        None,
        &mut task::print_prepare_event,
    )?;

    println!("{}", output::task_block("Task description:", &issue.value));

    let task_dir = task::create_task_dir(&config.work_dir, TASK_DIR_PREFIX)?;
    let task_file = task_dir.join(TASK_FILE);
    let prompt_file = task_dir.join(PROMPT_FILE);
    let temp_files = task::write_temp_files(&[
        (task_file.as_path(), issue.value.as_str()),
        (prompt_file.as_path(), prompt.as_str()),
    ])?;

    let show_logs = task::show_logs(options.show_logs, SHOW_LOGS_ENV, true);
    let routing = OutputTarget::from_show_logs(show_logs, task_dir.join(LOG_FILE));

    let mut env = Vec::new();
    if let Some(ref key) = config.api_key {
        env.push(("ANTHROPIC_API_KEY".to_string(), key.clone()));
    }

    let assistant =
        AssistantCommand::new(std::env::var(ASSISTANT_ENV).ok()).with_prompt_flag("--message");
    let request = assistant.request(&prompt, prepared.path.clone(), env, routing, temp_files);
    let report = task::run_assistant(&assistant, request)?;

    task::finish(&report, assistant.program(), || {
        output::print_path("Repository location", &prepared.path);
    })
}
