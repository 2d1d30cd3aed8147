//! Convert command implementation.
//!
//! This module implements `figma-designer convert`: clone the target
//! repository onto a fresh branch and have the assistant turn a Figma
//! design into code there.

use std::path::PathBuf;

use crate::cli::interact::{Prompter, Question};
use crate::cli::output;
use crate::config::{DesignerConfig, Paths};
use crate::prompt::{build_prompt, Author, TaskPrompt};
use crate::repo::{prepare, GitBackend, GitCredentials, PrepareError, RepoTarget};
use crate::runner::{AssistantCommand, OutputTarget};

use super::create::{
    ask_figma_target, child_env, print_design, ASSISTANT_ENV, LOG_FILE, PROGRAM, SHOW_LOGS_ENV,
};
use super::task::{self, TaskCommandResult, TaskSources};

/// Environment variable holding the conversion task text.
pub const CONVERSION_TASK_ENV: &str = "FIGMA_CONVERSION_TASK";

/// Prompt copy written into the task directory.
pub const TASK_FILE: &str = "conversion-task.md";

/// Prefix of generated branch names.
pub const BRANCH_PREFIX: &str = "figma-conversion";

/// Options for the convert command.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Target GitHub organization or user.
    pub org: Option<String>,
    /// Target repository name.
    pub repo: Option<String>,
    /// Figma file URL.
    pub file: Option<String>,
    /// Node to focus on.
    pub node: Option<String>,
    /// Task text.
    pub task: Option<String>,
    /// File to read the task text from.
    pub task_file: Option<PathBuf>,
    /// Branch to do the work on.
    pub branch: Option<String>,
    /// Mirror assistant output to the terminal.
    pub show_logs: bool,
    /// Print the prompt instead of running it.
    pub dry_run: bool,
    /// With `dry_run`, copy the prompt to the clipboard.
    pub copy: bool,
}

/// Execute the convert command.
pub fn convert(
    paths: &Paths,
    options: ConvertOptions,
    prompter: &mut dyn Prompter,
    git: &dyn GitBackend,
) -> TaskCommandResult {
    let config: DesignerConfig = task::load_config(&paths.designer_config(), PROGRAM)?;

    let org = task::ask_if_missing(
        options.org,
        &Question::required("Enter the target GitHub organization or username"),
        prompter,
    )?;
    let repo = task::ask_if_missing(
        options.repo,
        &Question::required("Enter the target repository name"),
        prompter,
    )?;
    let design = ask_figma_target(
        options.file,
        options.node,
        "Enter the Figma file URL to convert",
        prompter,
    )?;
    let branch = match options.branch {
        Some(branch) => branch,
        None => prompter.input(&Question::optional(
            "Enter target branch name (optional, press Enter for auto-generated)",
        ))?,
    };
    let branch = branch_or_default(&branch, task::timestamp_millis());
    let conversion = task::resolve_task(
        TaskSources {
            flag: options.task.as_deref(),
            file: options.task_file.as_deref(),
            env_var: CONVERSION_TASK_ENV,
            editor_message: "Describe the conversion task",
        },
        prompter,
    )?;

    let target = RepoTarget::new(org, repo);
    let repo_path = config.work_dir.join(target.dir_name());
    let prompt = build_prompt(&TaskPrompt::Convert {
        target: &target,
        repo_path: &repo_path,
        branch: &branch,
        design: &design,
        task: &conversion.value,
        author: Author {
            username: &config.github_username,
            email: &config.github_email,
        },
    })?;

    if options.dry_run {
        return task::dry_run(&prompt, options.copy);
    }

    println!("\n\x1b[1mStarting Figma to Code conversion...\x1b[0m");
    println!("\x1b[2mTarget Repository: {target}\x1b[0m");
    print_design(&design);
    println!("\x1b[2mBranch: {branch}\x1b[0m");

    let task_dir = task::create_task_dir(&config.work_dir, "conversion")?;

    println!("\x1b[1mCloning target repository...\x1b[0m");
    let prepared = prepare(
        git,
        &target,
        &GitCredentials::from(&config),
        &config.work_dir,
        Some(&branch),
        &mut task::print_prepare_event,
    )
    .inspect_err(|e| {
        if matches!(e, PrepareError::Clone { .. }) {
            eprintln!("\x1b[31mFailed to clone. Check your GitHub Token in config.\x1b[0m");
        }
    })?;

    let task_file = task_dir.join(TASK_FILE);
    let temp_files = task::write_temp_files(&[(task_file.as_path(), prompt.as_str())])?;

    println!("{}", output::task_block("Conversion task:", &conversion.value));

    let show_logs = task::show_logs(options.show_logs, SHOW_LOGS_ENV, false);
    let routing = OutputTarget::from_show_logs(show_logs, task_dir.join(LOG_FILE));

    let assistant = AssistantCommand::new(std::env::var(ASSISTANT_ENV).ok());
    let request = assistant.request(
        &prompt,
        prepared.path.clone(),
        child_env(&config),
        routing,
        temp_files,
    );
    let report = task::run_assistant(&assistant, request)?;

    task::finish(&report, assistant.program(), || {
        output::print_path("Repository location", &prepared.path);
        println!("\x1b[2mBranch: {branch}\x1b[0m");
        println!("\n\x1b[33mNext steps:\x1b[0m");
        println!("\x1b[2m   1. Review the changes in the repository\x1b[0m");
        println!("\x1b[2m   2. Push the branch: git push -u origin {branch}\x1b[0m");
        println!("\x1b[2m   3. Create a pull request\x1b[0m");
    })
}

/// The requested branch, or `figma-conversion-{millis}` when blank.
pub fn branch_or_default(requested: &str, millis: i64) -> String {
    let requested = requested.trim();
    if requested.is_empty() {
        format!("{BRANCH_PREFIX}-{millis}")
    } else {
        requested.to_string()
    }
}
