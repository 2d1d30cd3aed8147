//! Create command implementation.
//!
//! This module implements `figma-designer create`, which hands a design
//! task to the assistant in a fresh task directory. The pieces shared with
//! `convert` (Figma target collection, child environment) also live here.

use std::path::PathBuf;

use crate::cli::interact::{Prompter, Question};
use crate::cli::output;
use crate::config::{DesignerConfig, Paths};
use crate::figma::{node_id_from_url, FigmaTarget, FIGMA_HOST};
use crate::prompt::{build_prompt, TaskPrompt};
use crate::runner::{AssistantCommand, OutputTarget};

use super::task::{self, TaskCommandError, TaskCommandResult, TaskSources};

/// Program name used in messages.
pub const PROGRAM: &str = "figma-designer";
/// Environment variable holding the design task text.
pub const DESIGN_TASK_ENV: &str = "FIGMA_DESIGN_TASK";
/// Environment variable toggling terminal output.
pub const SHOW_LOGS_ENV: &str = "FIGMA_DESIGNER_SHOW_LOGS";
/// Environment variable overriding the assistant executable.
pub const ASSISTANT_ENV: &str = "FIGMA_DESIGNER_ASSISTANT";

/// Prompt copy written into the task directory.
pub const TASK_FILE: &str = "design-task.md";
/// Captured assistant output, inside the task directory.
pub const LOG_FILE: &str = "claude-logs.txt";

/// Options for the create command.
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    /// Figma file URL.
    pub file: Option<String>,
    /// Node to focus on.
    pub node: Option<String>,
    /// Task text.
    pub task: Option<String>,
    /// File to read the task text from.
    pub task_file: Option<PathBuf>,
    /// Mirror assistant output to the terminal.
    pub show_logs: bool,
    /// Print the prompt instead of running it.
    pub dry_run: bool,
    /// With `dry_run`, copy the prompt to the clipboard.
    pub copy: bool,
}

/// Execute the create command.
pub fn create(
    paths: &Paths,
    options: CreateOptions,
    prompter: &mut dyn Prompter,
) -> TaskCommandResult {
    let config: DesignerConfig = task::load_config(&paths.designer_config(), PROGRAM)?;

    let design = ask_figma_target(
        options.file,
        options.node,
        "Enter the Figma file URL",
        prompter,
    )?;
    let design_task = task::resolve_task(
        TaskSources {
            flag: options.task.as_deref(),
            file: options.task_file.as_deref(),
            env_var: DESIGN_TASK_ENV,
            editor_message: "Describe the design task",
        },
        prompter,
    )?;

    let prompt = build_prompt(&TaskPrompt::Design {
        design: &design,
        task: &design_task.value,
    })?;

    if options.dry_run {
        return task::dry_run(&prompt, options.copy);
    }

    println!("\n\x1b[1mStarting Figma design task...\x1b[0m");
    print_design(&design);

    let task_dir = task::create_task_dir(&config.work_dir, "task")?;
    let task_file = task_dir.join(TASK_FILE);
    let temp_files = task::write_temp_files(&[(task_file.as_path(), prompt.as_str())])?;

    println!("{}", output::task_block("Design task:", &design_task.value));

    let show_logs = task::show_logs(options.show_logs, SHOW_LOGS_ENV, false);
    let routing = OutputTarget::from_show_logs(show_logs, task_dir.join(LOG_FILE));

    let assistant = AssistantCommand::new(std::env::var(ASSISTANT_ENV).ok());
    let request = assistant.request(
        &prompt,
        task_dir.clone(),
        child_env(&config),
        routing,
        temp_files,
    );
    let report = task::run_assistant(&assistant, request)?;

    task::finish(&report, assistant.program(), || {
        output::print_path("Task location", &task_dir);
    })
}

/// Collect the Figma URL and node.
///
/// The node prompt is skipped when the URL already names one.
pub(super) fn ask_figma_target(
    file: Option<String>,
    node: Option<String>,
    url_label: &str,
    prompter: &mut dyn Prompter,
) -> Result<FigmaTarget, TaskCommandError> {
    let url = task::ask_if_missing(
        file,
        &Question::required(url_label).containing(FIGMA_HOST, "Must be a valid Figma URL"),
        prompter,
    )?;

    let node = match node {
        Some(node) => Some(node),
        None if node_id_from_url(&url).is_some() => None,
        None => Some(prompter.input(&Question::optional(
            "Enter specific Figma node ID (optional, press Enter to skip)",
        ))?),
    };

    Ok(FigmaTarget::new(url, node))
}

/// Print the design file and node.
pub(super) fn print_design(design: &FigmaTarget) {
    println!("\x1b[2mFigma File: {}\x1b[0m", design.url);
    if let Some(ref node) = design.node_id {
        println!("\x1b[2mNode ID: {node}\x1b[0m");
    }
}

/// Credentials handed to the assistant process only.
pub(super) fn child_env(config: &DesignerConfig) -> Vec<(String, String)> {
    vec![
        ("ANTHROPIC_API_KEY".to_string(), config.zai_api_key.clone()),
        ("FIGMA_API_TOKEN".to_string(), config.figma_api_token.clone()),
    ]
}
