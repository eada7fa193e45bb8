//! Configuration file loading.
//!
//! Reads the located routes file, parses it as JSON and validates its
//! structure.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::config::locator::ConfigLocation;
use crate::config::schema::RouteDeclaration;
use crate::config::validator::ConfigValidator;
use crate::error::{Error, Result};

/// A validated routes file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    /// Path the routes were read from.
    pub path: PathBuf,
    /// Declared routes in file order.
    pub routes: Vec<RouteDeclaration>,
}

/// Loads routes files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the file at a located config path.
    ///
    /// # Errors
    ///
    /// See [`ConfigLoader::load_file`].
    pub fn load(location: &ConfigLocation) -> Result<LoadedConfig> {
        Self::load_file(&location.path)
    }

    /// Read, parse and validate a routes file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read (`ConfigRead`), is not
    /// JSON (`InvalidJson`) or does not have the routes structure
    /// (`InvalidConfig`).
    pub fn load_file(path: &Path) -> Result<LoadedConfig> {
        let contents = fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(path, &contents)
    }

    /// Parse and validate routes file contents read from `path`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidJson` or `InvalidConfig` on malformed input.
    ///
    /// # Examples
    ///
    /// ```
    /// use cwdeploy::config::ConfigLoader;
    /// use std::path::Path;
    ///
    /// let config = ConfigLoader::parse(
    ///     Path::new("/etc/cwdeploy/config.json"),
    ///     r#"{ "routes": [ { "path": "app", "script": "deploy.sh" } ] }"#,
    /// )
    /// .unwrap();
    /// assert_eq!(config.routes.len(), 1);
    ///
    /// let err = ConfigLoader::parse(Path::new("/c.json"), "{}").unwrap_err();
    /// assert!(err.to_string().contains("'routes'"));
    /// ```
    pub fn parse(path: &Path, contents: &str) -> Result<LoadedConfig> {
        let value: Value = serde_json::from_str(contents).map_err(|e| Error::InvalidJson {
            path: path.to_path_buf(),
            source: e,
        })?;

        let routes = ConfigValidator::validate(&value).map_err(|issue| Error::InvalidConfig {
            path: path.to_path_buf(),
            issue,
        })?;

        log::debug!("Loaded {} route(s) from {}", routes.len(), path.display());

        Ok(LoadedConfig {
            path: path.to_path_buf(),
            routes,
        })
    }
}
