//! Library exports for cwdeploy-cli.
//!
//! This module exports the argument parser and CLI error type for the
//! binary and its tests.

pub mod cli;
pub mod error;

pub use cli::{parse_args, Cli, Parsed};
pub use error::CliError;
