//! Argument definitions for `claude-cloud`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::commands::{self, contribute::ContributeOptions};
use super::interact::TerminalPrompter;
use super::{CliResult, ExitCode};
use crate::config::{ContributorConfig, Paths};
use crate::repo::SystemGit;

/// Contribute to any GitHub repository with an AI coding assistant.
///
/// Clones the repository, configures your git identity in it, and hands the
/// issue to the assistant with instructions to open a pull request.
#[derive(Parser, Debug)]
#[command(name = "claude-cloud")]
#[command(author, version = crate::VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Show debug diagnostics on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands for claude-cloud.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Set up your GitHub credentials and preferences.
    Setup(SetupCommand),

    /// Work on an issue in a GitHub repository.
    ///
    /// Anything not given on the command line is asked for. The issue text
    /// is taken from --issue, then --issue-file, then CLAUDE_CLOUD_ISSUE,
    /// and finally your editor.
    ///
    /// Examples:
    ///   claude-cloud contribute -o acme -r widgets -i "fix null pointer in parser"
    ///   claude-cloud contribute -o acme -r widgets -I issue.md --dry-run
    Contribute(ContributeCommand),

    /// Show the current configuration.
    Config(ConfigCommand),

    /// Generate shell completions.
    ///
    /// Outputs completion script to stdout for bash, zsh, or fish.
    Completions(CompletionsCommand),
}

/// Arguments for the 'setup' command.
#[derive(Args, Debug)]
pub struct SetupCommand {}

/// Arguments for the 'contribute' command.
#[derive(Args, Debug)]
pub struct ContributeCommand {
    /// GitHub organization or username.
    #[arg(short = 'o', long)]
    pub org: Option<String>,

    /// Repository name.
    #[arg(short = 'r', long)]
    pub repo: Option<String>,

    /// Issue or task description.
    #[arg(short = 'i', long)]
    pub issue: Option<String>,

    /// Read the issue description from a file.
    #[arg(short = 'I', long, value_name = "FILE")]
    pub issue_file: Option<PathBuf>,

    /// Mirror the assistant's output to the terminal (the default).
    ///
    /// Set CLAUDE_CLOUD_SHOW_LOGS=false to capture it in
    /// .claude-cloud-logs.txt in a contribution_<millis> directory instead.
    #[arg(long)]
    pub show_logs: bool,

    /// Print the prompt instead of cloning and running the assistant.
    #[arg(long)]
    pub dry_run: bool,

    /// With --dry-run, copy the prompt to the clipboard.
    #[arg(short = 'c', long, requires = "dry_run")]
    pub copy: bool,
}

/// Arguments for the 'config' command.
#[derive(Args, Debug)]
pub struct ConfigCommand {}

/// Arguments for the 'completions' command.
#[derive(Args, Debug)]
pub struct CompletionsCommand {
    /// Shell to generate completions for.
    #[arg(value_parser = ["bash", "zsh", "fish"])]
    pub shell: String,
}

impl SetupCommand {
    /// Execute the setup command.
    pub fn execute(&self, paths: &Paths) -> CliResult {
        let cwd = super::current_dir()?;
        commands::setup::setup_contributor(paths, &mut TerminalPrompter::new(), &cwd)?;
        Ok(ExitCode::SUCCESS)
    }
}

impl ContributeCommand {
    /// Execute the contribute command.
    pub fn execute(&self, paths: &Paths) -> CliResult {
        let options = ContributeOptions {
            org: self.org.clone(),
            repo: self.repo.clone(),
            issue: self.issue.clone(),
            issue_file: self.issue_file.clone(),
            show_logs: self.show_logs,
            dry_run: self.dry_run,
            copy: self.copy,
        };
        commands::contribute::contribute(paths, options, &mut TerminalPrompter::new(), &SystemGit)?;
        Ok(ExitCode::SUCCESS)
    }
}

impl ConfigCommand {
    /// Execute the config command.
    pub fn execute(&self, paths: &Paths) -> CliResult {
        commands::config::config_show::<ContributorConfig>(
            &paths.cloud_config(),
            commands::contribute::PROGRAM,
        )?;
        Ok(ExitCode::SUCCESS)
    }
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(&self) -> CliResult {
        commands::completions::completions::<Cli>(&self.shell, "claude-cloud")?;
        Ok(ExitCode::SUCCESS)
    }
}

/// Run a parsed `claude-cloud` command line.
pub fn run(cli: Cli) -> CliResult {
    let Some(command) = cli.command else {
        println!("claude-cloud - contribute to GitHub repositories with an AI assistant.");
        println!();
        println!("Run 'claude-cloud --help' for available commands.");
        println!();
        println!("Quick start:");
        println!("  claude-cloud setup                        # Save your GitHub details");
        println!("  claude-cloud contribute -o acme -r app    # Work on an issue");
        return Ok(ExitCode::SUCCESS);
    };

    if let Commands::Completions(c) = &command {
        return c.execute();
    }

    let paths = Paths::from_env()?;
    match command {
        Commands::Setup(c) => c.execute(&paths),
        Commands::Contribute(c) => c.execute(&paths),
        Commands::Config(c) => c.execute(&paths),
        Commands::Completions(c) => c.execute(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_contribute_flags() {
        let cli = Cli::parse_from([
            "claude-cloud",
            "contribute",
            "-o",
            "acme",
            "-r",
            "widgets",
            "-i",
            "fix null pointer in parser",
            "--dry-run",
            "--copy",
        ]);
        match cli.command {
            Some(Commands::Contribute(c)) => {
                assert_eq!(c.org.as_deref(), Some("acme"));
                assert_eq!(c.repo.as_deref(), Some("widgets"));
                assert_eq!(c.issue.as_deref(), Some("fix null pointer in parser"));
                assert!(c.dry_run);
                assert!(c.copy);
                assert!(!c.show_logs);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_copy_requires_dry_run() {
        let result = Cli::try_parse_from(["claude-cloud", "contribute", "--copy"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::parse_from(["claude-cloud", "config", "-v"]);
        assert!(cli.verbose);
    }

    #[test]
    fn test_completions_rejects_unknown_shell() {
        assert!(Cli::try_parse_from(["claude-cloud", "completions", "powershell"]).is_err());
    }
}
