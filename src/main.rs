//! claude-cloud - contribute to GitHub repositories with an AI assistant.
//!
//! This is the main entry point for the claude-cloud CLI tool.

use claude_cloud::cli::{cloud, handle_result, init_tracing};
use clap::Parser;

fn main() -> std::process::ExitCode {
    let cli = cloud::Cli::parse();
    init_tracing(cli.verbose);
    handle_result(cloud::run(cli))
}
