//! Error types for the cwdeploy library.
//!
//! This module provides the error hierarchy for config lookup, config
//! parsing, path resolution and script launching, using `thiserror` for
//! ergonomic error handling.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{ConfigSource, ValidationIssue};

/// Result type alias for operations that may fail with a cwdeploy error.
///
/// # Examples
///
/// ```
/// use cwdeploy::{Error, Result};
///
/// fn example_operation() -> Result<i32> {
///     Ok(0)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the cwdeploy library.
///
/// Every variant is fatal for a run except per-route resolution failures,
/// which the route matcher downgrades to an invalid report entry.
#[derive(Debug, Error)]
pub enum Error {
    /// An explicit config override points at a file that does not exist.
    #[error("config file not found: {} (from {origin})", path.display())]
    ConfigOverrideNotFound {
        /// The resolved override path.
        path: PathBuf,
        /// Which override supplied the path.
        origin: ConfigSource,
    },

    /// None of the default config locations contains a file.
    #[error("no config file found; checked: {}", join_paths(checked))]
    ConfigNotFound {
        /// Every candidate that was checked, in lookup order.
        checked: Vec<PathBuf>,
    },

    /// No default config location can be built from the environment.
    #[error(
        "no config lookup possible: neither XDG_CONFIG_HOME nor HOME is set \
         (use --config or CWDEPLOY_CONFIG)"
    )]
    NoConfigLookup,

    /// The config file exists but could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        /// The config file path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON.
    #[error("Invalid JSON in config {}: {source}", path.display())]
    InvalidJson {
        /// The config file path.
        path: PathBuf,
        /// The parser error.
        #[source]
        source: serde_json::Error,
    },

    /// The config file is JSON but does not have the expected structure.
    #[error("Config {} {issue}.", path.display())]
    InvalidConfig {
        /// The config file path.
        path: PathBuf,
        /// The first structural problem found.
        issue: ValidationIssue,
    },

    /// A `~` path needs expanding but no home directory is known.
    #[error("cannot expand '~' in {raw}: neither HOME nor USERPROFILE is set")]
    HomeUnavailable {
        /// The raw path that needed expansion.
        raw: String,
    },

    /// A path does not exist.
    #[error("path not found: {}", path.display())]
    PathNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Permission denied accessing a path.
    #[error("permission denied: {}", path.display())]
    PermissionDenied {
        /// The path that could not be accessed.
        path: PathBuf,
    },

    /// The script interpreter could not be started.
    #[error("failed to launch {program}: {source}")]
    Launch {
        /// The interpreter program.
        program: String,
        /// The spawn error.
        #[source]
        source: std::io::Error,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Error {
    /// Check if error indicates a path does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use cwdeploy::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::PathNotFound { path: PathBuf::from("/nonexistent") };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PathNotFound { .. })
    }

    pub(crate) fn from_io_at(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::PathNotFound {
                path: path.to_path_buf(),
            },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => Self::Io(err),
        }
    }
}
