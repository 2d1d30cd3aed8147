//! Command implementations for both CLIs.
//!
//! This module contains the actual implementations of CLI commands,
//! separated from the argument parsing definitions in `cli::cloud` and
//! `cli::designer`.

pub mod completions;
pub mod config;
pub mod contribute;
pub mod convert;
pub mod create;
pub mod setup;
pub mod task;
