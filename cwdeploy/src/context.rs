//! Process environment snapshot.
//!
//! Every part of the pipeline that needs an environment variable or the
//! current working directory reads it from an [`Environment`] instead of
//! the live process, so a run is fully determined by its inputs.

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Environment variable holding an explicit config path.
pub const CONFIG_ENV_VAR: &str = "CWDEPLOY_CONFIG";
/// XDG base directory for user configuration.
pub const XDG_CONFIG_HOME_VAR: &str = "XDG_CONFIG_HOME";
/// Primary home directory variable.
pub const HOME_VAR: &str = "HOME";
/// Home directory variable used when `HOME` is unset.
pub const USER_PROFILE_VAR: &str = "USERPROFILE";
/// Environment variable selecting the log level.
pub const LOG_MODE_ENV_VAR: &str = "CWDEPLOY_LOG_MODE";

/// An immutable view of environment variables and the working directory.
///
/// # Examples
///
/// ```
/// use cwdeploy::Environment;
/// use std::path::Path;
///
/// let env = Environment::new("/work")
///     .with_var("HOME", "/home/op")
///     .with_var("XDG_CONFIG_HOME", "");
///
/// assert_eq!(env.cwd(), Path::new("/work"));
/// assert_eq!(env.var("HOME"), Some("/home/op"));
/// // Empty values count as unset
/// assert_eq!(env.var("XDG_CONFIG_HOME"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    vars: HashMap<String, String>,
    cwd: PathBuf,
}

impl Environment {
    /// Create an empty environment rooted at `cwd`.
    #[must_use]
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            vars: HashMap::new(),
            cwd: cwd.into(),
        }
    }

    /// Capture the current process environment and working directory.
    ///
    /// Variables whose names or values are not valid UTF-8 are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn from_process() -> Result<Self> {
        let cwd = env::current_dir()?;
        let vars = env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Ok(Self { vars, cwd })
    }

    /// Return a copy of this environment with `name` set to `value`.
    #[must_use]
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Look up a variable, treating an empty value as unset.
    #[must_use]
    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// The working directory captured for this run.
    #[must_use]
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// The operator's home directory, from `HOME` or else `USERPROFILE`.
    #[must_use]
    pub fn home_dir(&self) -> Option<PathBuf> {
        self.home_var().map(|(_, value)| PathBuf::from(value))
    }

    /// The variable that supplies the home directory, with its value.
    #[must_use]
    pub fn home_var(&self) -> Option<(&'static str, &str)> {
        [HOME_VAR, USER_PROFILE_VAR]
            .into_iter()
            .find_map(|name| self.var(name).map(|value| (name, value)))
    }
}
