//! Setup command implementations.
//!
//! Interactive first-run configuration for both programs. The answers are
//! written as a whole new config file; `figma-designer` also writes the
//! assistant's settings and MCP registry.

use std::path::Path;

use crate::cli::interact::{InteractError, Prompter, Question};
use crate::config::assistant::write_assistant_config;
use crate::config::{ConfigError, ConfigRecord, ContributorConfig, DesignerConfig, Paths};

/// Result type for setup command operations.
pub type SetupCommandResult<T> = Result<T, SetupCommandError>;

/// Error type for setup command operations.
#[derive(Debug, thiserror::Error)]
pub enum SetupCommandError {
    /// A question could not be answered.
    #[error("{0}")]
    Interact(#[from] InteractError),
    /// The configuration could not be written.
    #[error("Failed to save configuration: {0}")]
    Config(#[from] ConfigError),
}

fn email_question() -> Question {
    Question::required("Enter your GitHub email").containing("@", "Valid email is required")
}

fn optional_secret(answer: String) -> Option<String> {
    Some(answer).filter(|a| !a.is_empty())
}

/// Host override from an existing config, which `setup` does not ask for.
fn existing_git_base_url<T: ConfigRecord>(
    path: &Path,
    base_url: impl FnOnce(T) -> Option<String>,
) -> Option<String> {
    T::load(path).ok().and_then(base_url)
}

/// Run `claude-cloud setup`.
pub fn setup_contributor(
    paths: &Paths,
    prompter: &mut dyn Prompter,
    cwd: &Path,
) -> SetupCommandResult<ContributorConfig> {
    println!("\x1b[1mSetting up Claude Cloud...\x1b[0m");

    let github_username = prompter.input(&Question::required("Enter your GitHub username"))?;
    let github_email = prompter.input(&email_question())?;
    let work_dir = prompter.input(
        &Question::required("Enter working directory for cloning repos")
            .with_default(cwd.join("temp_repos").display().to_string()),
    )?;
    let github_token = prompter.secret(&Question::optional(
        "Enter your GitHub Personal Access Token (optional, for private repos)",
    ))?;
    let api_key = prompter.secret(&Question::optional(
        "Enter your Anthropic API key (optional)",
    ))?;

    let path = paths.cloud_config();
    let config = ContributorConfig {
        github_token: optional_secret(github_token),
        api_key: optional_secret(api_key),
        git_base_url: existing_git_base_url(&path, |c: ContributorConfig| c.git_base_url),
        ..ContributorConfig::new(github_username, github_email, work_dir)
    };
    config.save(&path)?;
    tracing::debug!(path = %path.display(), "saved config");

    println!("\x1b[32m✓\x1b[0m Configuration saved successfully!");
    println!("\x1b[2mConfiguration file: {}\x1b[0m", path.display());
    Ok(config)
}

/// Run `figma-designer setup`.
pub fn setup_designer(
    paths: &Paths,
    prompter: &mut dyn Prompter,
    cwd: &Path,
) -> SetupCommandResult<DesignerConfig> {
    println!("\x1b[1mSetting up Figma Designer...\x1b[0m");

    let figma_api_token = prompter.secret(&Question::required(
        "Enter your Figma API Token (from figma.com/dev)",
    ))?;
    let zai_api_key = prompter.secret(&Question::required("Enter your Z.AI API Key"))?;
    let github_username = prompter.input(&Question::required("Enter your GitHub username"))?;
    let github_email = prompter.input(&email_question())?;
    let github_token = prompter.secret(&Question::required(
        "Enter your GitHub Personal Access Token (for code conversion)",
    ))?;
    let work_dir = prompter.input(
        &Question::required("Enter working directory for design tasks")
            .with_default(cwd.join("figma_tasks").display().to_string()),
    )?;

    let path = paths.designer_config();
    let config = DesignerConfig {
        figma_api_token,
        zai_api_key,
        github_username,
        github_email,
        github_token,
        work_dir: work_dir.into(),
        git_base_url: existing_git_base_url(&path, |c: DesignerConfig| c.git_base_url),
    };
    config.save(&path)?;
    println!("\x1b[32m✓\x1b[0m Configuration saved successfully!");

    let files = write_assistant_config(paths, &config)?;
    println!(
        "\x1b[2mCreated assistant configuration at {}\x1b[0m",
        files.settings.display()
    );
    println!("\x1b[2mCreated MCP configuration at {}\x1b[0m", files.mcp.display());
    println!("\x1b[32m✓\x1b[0m Figma MCP configured successfully!");
    println!("\x1b[33mYou can now run: figma-designer create\x1b[0m");
    Ok(config)
}
