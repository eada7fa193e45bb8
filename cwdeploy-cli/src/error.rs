//! CLI-specific error types with exit codes.
//!
//! This module defines error types specific to the CLI layer, wrapping
//! library errors and providing the process exit code.

use cwdeploy::Error as LibError;
use std::fmt;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// A token the tool does not accept: an unknown flag, a stray
    /// positional, or a flag given a value it does not take.
    UnknownArgument(String),

    /// `--config` was given without a value.
    MissingConfigValue,

    /// I/O error.
    Io(std::io::Error),
}

impl CliError {
    /// Get the exit code for this error.
    ///
    /// Every error exits with 1. Exit code 2 is reserved for a run where
    /// no route matched, which is not an error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Library(_)
            | CliError::UnknownArgument(_)
            | CliError::MissingConfigValue
            | CliError::Io(_) => 1,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::UnknownArgument(arg) => write!(f, "Unknown argument: {arg}"),
            CliError::MissingConfigValue => write!(f, "Missing value for --config"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        CliError::Library(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}
