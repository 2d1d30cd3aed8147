//! claude-cloud - hand GitHub issues and Figma designs to an AI coding assistant.
//!
//! This library backs two programs. `claude-cloud` clones a repository and
//! asks the assistant to resolve an issue and open a pull request.
//! `figma-designer` drives the assistant through a Figma MCP server, either
//! on a design file alone or to convert a design into code on a new branch.

#![deny(missing_docs)]

/// Version string from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod figma;
pub mod git;
pub mod prompt;
pub mod repo;
pub mod resolve;
pub mod runner;

pub use config::{ContributorConfig, DesignerConfig, Paths};
