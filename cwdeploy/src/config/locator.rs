//! Configuration file discovery.
//!
//! This module decides which routes file a run uses, walking the lookup
//! sources in precedence order.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::context::{
    Environment, CONFIG_ENV_VAR, HOME_VAR, USER_PROFILE_VAR, XDG_CONFIG_HOME_VAR,
};
use crate::error::{Error, Result};
use crate::path;

/// Directory name used under the config home.
const APP_DIR: &str = "cwdeploy";
/// File name of the routes file in default locations.
const CONFIG_FILE: &str = "config.json";

/// Where the selected config file came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// The `--config` command-line flag.
    CliFlag,
    /// The `CWDEPLOY_CONFIG` environment variable.
    EnvOverride,
    /// `$XDG_CONFIG_HOME/cwdeploy/config.json`.
    XdgConfigHome,
    /// `$HOME/.config/cwdeploy/config.json`.
    Home,
    /// `$USERPROFILE/.config/cwdeploy/config.json`, used when `HOME` is unset.
    UserProfile,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CliFlag => write!(f, "--config"),
            Self::EnvOverride => write!(f, "{CONFIG_ENV_VAR}"),
            Self::XdgConfigHome => write!(f, "{XDG_CONFIG_HOME_VAR}"),
            Self::Home => write!(f, "{HOME_VAR}"),
            Self::UserProfile => write!(f, "{USER_PROFILE_VAR}"),
        }
    }
}

/// The config file chosen for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    /// Path to the config file.
    pub path: PathBuf,
    /// The lookup source that produced the path.
    pub source: ConfigSource,
}

/// Locates the routes file for an environment.
///
/// # Examples
///
/// ```no_run
/// use cwdeploy::config::{ConfigLocator, ConfigSource};
/// use cwdeploy::Environment;
///
/// let env = Environment::new("/work").with_var("HOME", "/home/op");
/// let location = ConfigLocator::new(&env).locate(Some("routes.json")).unwrap();
/// assert_eq!(location.source, ConfigSource::CliFlag);
/// ```
pub struct ConfigLocator<'a> {
    env: &'a Environment,
}

impl<'a> ConfigLocator<'a> {
    /// Create a locator reading from `env`.
    #[must_use]
    pub const fn new(env: &'a Environment) -> Self {
        Self { env }
    }

    /// Find the config file, honouring `cli_override` first.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An override is given but does not exist (`ConfigOverrideNotFound`)
    /// - Neither `XDG_CONFIG_HOME` nor `HOME` is available (`NoConfigLookup`)
    /// - No default candidate exists (`ConfigNotFound`)
    /// - Probing the filesystem fails
    pub fn locate(&self, cli_override: Option<&str>) -> Result<ConfigLocation> {
        if let Some(raw) = cli_override {
            return self.explicit(raw, ConfigSource::CliFlag);
        }

        if let Some(raw) = self.env.var(CONFIG_ENV_VAR) {
            return self.explicit(raw, ConfigSource::EnvOverride);
        }

        let candidates = self.default_candidates();
        if candidates.is_empty() {
            return Err(Error::NoConfigLookup);
        }

        for candidate in &candidates {
            log::debug!(
                "Checking config candidate {} ({})",
                candidate.path.display(),
                candidate.source
            );
            if path::exists(&candidate.path)? {
                return Ok(candidate.clone());
            }
        }

        Err(Error::ConfigNotFound {
            checked: candidates.into_iter().map(|c| c.path).collect(),
        })
    }

    /// The default lookup locations that the environment allows, in order.
    #[must_use]
    pub fn default_candidates(&self) -> Vec<ConfigLocation> {
        let mut candidates = Vec::new();

        if let Some(xdg) = self.env.var(XDG_CONFIG_HOME_VAR) {
            candidates.push(ConfigLocation {
                path: self.anchor(Path::new(xdg)).join(APP_DIR).join(CONFIG_FILE),
                source: ConfigSource::XdgConfigHome,
            });
        }

        if let Some((var, home)) = self.env.home_var() {
            let source = if var == USER_PROFILE_VAR {
                ConfigSource::UserProfile
            } else {
                ConfigSource::Home
            };
            candidates.push(ConfigLocation {
                path: self
                    .anchor(Path::new(home))
                    .join(".config")
                    .join(APP_DIR)
                    .join(CONFIG_FILE),
                source,
            });
        }

        candidates
    }

    fn explicit(&self, raw: &str, source: ConfigSource) -> Result<ConfigLocation> {
        let resolved = path::resolve_relative_to_cwd(raw, self.env)?;
        log::debug!("Using config override {} ({source})", resolved.display());

        if !path::exists(&resolved)? {
            return Err(Error::ConfigOverrideNotFound {
                path: resolved,
                origin: source,
            });
        }

        Ok(ConfigLocation {
            path: resolved,
            source,
        })
    }

    fn anchor(&self, dir: &Path) -> PathBuf {
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            self.env.cwd().join(dir)
        }
    }
}
