//! Argument definitions for `figma-designer`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::commands::{self, convert::ConvertOptions, create::CreateOptions};
use super::interact::TerminalPrompter;
use super::{CliResult, ExitCode};
use crate::config::{DesignerConfig, Paths};
use crate::repo::SystemGit;

/// Automate Figma design work with an AI assistant over MCP.
///
/// `create` works on a design file; `convert` turns a design into code in a
/// repository on a fresh branch.
#[derive(Parser, Debug)]
#[command(name = "figma-designer")]
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

/// Top-level commands for figma-designer.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Set up your Figma, Z.AI and GitHub credentials.
    ///
    /// Also writes the assistant's settings and registers the Figma MCP
    /// server under ~/.claude.
    Setup(SetupCommand),

    /// Work on a Figma design.
    ///
    /// The task text is taken from --task, then --task-file, then
    /// FIGMA_DESIGN_TASK, and finally your editor.
    ///
    /// Examples:
    ///   figma-designer create -f https://www.figma.com/design/KEY/Name -t "Tidy the layers"
    Create(CreateCommand),

    /// Convert a Figma design to code in a repository.
    ///
    /// The task text is taken from --task, then --task-file, then
    /// FIGMA_CONVERSION_TASK, and finally your editor.
    ///
    /// Examples:
    ///   figma-designer convert -o acme -r web -f https://www.figma.com/design/KEY/Name -T task.md
    Convert(ConvertCommand),

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

/// Arguments shared by the task commands.
#[derive(Args, Debug, Clone)]
pub struct TaskArgs {
    /// Figma file URL.
    #[arg(short = 'f', long, value_name = "URL")]
    pub file: Option<String>,

    /// Specific Figma node ID; taken from the URL's node-id when omitted.
    #[arg(short = 'n', long, value_name = "ID")]
    pub node: Option<String>,

    /// Task description.
    #[arg(short = 't', long)]
    pub task: Option<String>,

    /// Read the task description from a file.
    #[arg(short = 'T', long, value_name = "FILE")]
    pub task_file: Option<PathBuf>,

    /// Mirror the assistant's output to the terminal instead of claude-logs.txt.
    ///
    /// Also enabled by FIGMA_DESIGNER_SHOW_LOGS=true.
    #[arg(long)]
    pub show_logs: bool,

    /// Print the prompt instead of running the assistant.
    #[arg(long)]
    pub dry_run: bool,

    /// With --dry-run, copy the prompt to the clipboard.
    #[arg(short = 'c', long, requires = "dry_run")]
    pub copy: bool,
}

/// Arguments for the 'create' command.
#[derive(Args, Debug)]
pub struct CreateCommand {
    /// Design and task options.
    #[command(flatten)]
    pub task: TaskArgs,
}

/// Arguments for the 'convert' command.
#[derive(Args, Debug)]
pub struct ConvertCommand {
    /// Target GitHub organization or username.
    #[arg(short = 'o', long)]
    pub org: Option<String>,

    /// Target repository name.
    #[arg(short = 'r', long)]
    pub repo: Option<String>,

    /// Target branch name (default: figma-conversion-<timestamp>).
    #[arg(short = 'b', long)]
    pub branch: Option<String>,

    /// Design and task options.
    #[command(flatten)]
    pub task: TaskArgs,
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
        commands::setup::setup_designer(paths, &mut TerminalPrompter::new(), &cwd)?;
        Ok(ExitCode::SUCCESS)
    }
}

impl CreateCommand {
    /// Execute the create command.
    pub fn execute(&self, paths: &Paths) -> CliResult {
        let args = self.task.clone();
        let options = CreateOptions {
            file: args.file,
            node: args.node,
            task: args.task,
            task_file: args.task_file,
            show_logs: args.show_logs,
            dry_run: args.dry_run,
            copy: args.copy,
        };
        commands::create::create(paths, options, &mut TerminalPrompter::new())?;
        Ok(ExitCode::SUCCESS)
    }
}

impl ConvertCommand {
    /// Execute the convert command.
    pub fn execute(&self, paths: &Paths) -> CliResult {
        let args = self.task.clone();
        let options = ConvertOptions {
            org: self.org.clone(),
            repo: self.repo.clone(),
            file: args.file,
            node: args.node,
            task: args.task,
            task_file: args.task_file,
            branch: self.branch.clone(),
            show_logs: args.show_logs,
            dry_run: args.dry_run,
            copy: args.copy,
        };
        commands::convert::convert(paths, options, &mut TerminalPrompter::new(), &SystemGit)?;
        Ok(ExitCode::SUCCESS)
    }
}

impl ConfigCommand {
    /// Execute the config command.
    pub fn execute(&self, paths: &Paths) -> CliResult {
        commands::config::config_show::<DesignerConfig>(
            &paths.designer_config(),
            commands::create::PROGRAM,
        )?;
        Ok(ExitCode::SUCCESS)
    }
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(&self) -> CliResult {
        commands::completions::completions::<Cli>(&self.shell, "figma-designer")?;
        Ok(ExitCode::SUCCESS)
    }
}

/// Run a parsed `figma-designer` command line.
pub fn run(cli: Cli) -> CliResult {
    let Some(command) = cli.command else {
        println!("figma-designer - Figma design tasks with an AI assistant.");
        println!();
        println!("Run 'figma-designer --help' for available commands.");
        println!();
        println!("Quick start:");
        println!("  figma-designer setup                 # Save credentials, configure MCP");
        println!("  figma-designer create -f <url>       # Work on a design");
        println!("  figma-designer convert -o acme -r web -f <url>");
        return Ok(ExitCode::SUCCESS);
    };

    if let Commands::Completions(c) = &command {
        return c.execute();
    }

    let paths = Paths::from_env()?;
    match command {
        Commands::Setup(c) => c.execute(&paths),
        Commands::Create(c) => c.execute(&paths),
        Commands::Convert(c) => c.execute(&paths),
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
    fn test_parse_convert_flags() {
        let cli = Cli::parse_from([
            "figma-designer",
            "convert",
            "-o",
            "acme",
            "-r",
            "web",
            "-f",
            "https://www.figma.com/design/KEY/Name",
            "-n",
            "1:2",
            "-T",
            "task.md",
            "-b",
            "feature/pricing",
            "--show-logs",
        ]);
        match cli.command {
            Some(Commands::Convert(c)) => {
                assert_eq!(c.org.as_deref(), Some("acme"));
                assert_eq!(c.branch.as_deref(), Some("feature/pricing"));
                assert_eq!(c.task.node.as_deref(), Some("1:2"));
                assert_eq!(c.task.task_file, Some(PathBuf::from("task.md")));
                assert!(c.task.show_logs);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_create_flags() {
        let cli = Cli::parse_from([
            "figma-designer",
            "create",
            "--file",
            "https://www.figma.com/design/KEY/Name",
            "--task",
            "Tidy the layers",
        ]);
        match cli.command {
            Some(Commands::Create(c)) => {
                assert_eq!(c.task.task.as_deref(), Some("Tidy the layers"));
                assert!(!c.task.dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_no_subcommand_is_allowed() {
        let cli = Cli::parse_from(["figma-designer"]);
        assert!(cli.command.is_none());
    }
}
