//! figma-designer - Figma design tasks with an AI assistant.
//!
//! Entry point for the figma-designer CLI tool.

use claude_cloud::cli::{designer, handle_result, init_tracing};
use clap::Parser;

fn main() -> std::process::ExitCode {
    let cli = designer::Cli::parse();
    init_tracing(cli.verbose);
    handle_result(designer::run(cli))
}
