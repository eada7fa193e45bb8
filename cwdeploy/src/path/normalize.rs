//! Path normalization functions.
//!
//! This module provides functionality to normalize paths by:
//! - Expanding tilde (~) to the home directory
//! - Converting relative paths to absolute paths against a base directory

use std::path::{Path, PathBuf};

use crate::context::Environment;
use crate::error::{Error, Result};

/// Expand a leading tilde (~) to the home directory.
///
/// `~` maps to the home directory and `~/rest` (or `~\rest`) to the home
/// directory joined with `rest`. Other tilde forms such as `~user` are
/// returned unchanged.
///
/// # Errors
///
/// Returns [`Error::HomeUnavailable`] if expansion is needed but neither
/// `HOME` nor `USERPROFILE` is set.
///
/// # Examples
///
/// ```
/// use cwdeploy::path::normalize::expand_home;
/// use cwdeploy::Environment;
/// use std::path::Path;
///
/// let env = Environment::new("/").with_var("HOME", "/home/op");
///
/// assert_eq!(expand_home("~", &env).unwrap(), Path::new("/home/op"));
/// assert_eq!(expand_home("~/app", &env).unwrap(), Path::new("/home/op/app"));
/// assert_eq!(expand_home("~bob/app", &env).unwrap(), Path::new("~bob/app"));
/// assert_eq!(expand_home("/srv", &env).unwrap(), Path::new("/srv"));
/// ```
pub fn expand_home(raw: &str, env: &Environment) -> Result<PathBuf> {
    let rest = if raw == "~" {
        ""
    } else if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        rest
    } else {
        return Ok(PathBuf::from(raw));
    };

    let home = env.home_dir().ok_or_else(|| Error::HomeUnavailable {
        raw: raw.to_string(),
    })?;

    if rest.is_empty() {
        Ok(home)
    } else {
        Ok(home.join(rest))
    }
}

/// Resolve a raw path against `base_dir`.
///
/// The home directory is expanded first; a path that is still relative is
/// joined onto `base_dir`. Absolute paths pass through unchanged.
///
/// # Errors
///
/// Returns an error if tilde expansion fails.
///
/// # Examples
///
/// ```
/// use cwdeploy::path::normalize::resolve_relative_to;
/// use cwdeploy::Environment;
/// use std::path::Path;
///
/// let env = Environment::new("/");
/// let base = Path::new("/etc/cwdeploy");
///
/// assert_eq!(
///     resolve_relative_to(base, "scripts/deploy.sh", &env).unwrap(),
///     Path::new("/etc/cwdeploy/scripts/deploy.sh")
/// );
/// assert_eq!(
///     resolve_relative_to(base, "/srv/app", &env).unwrap(),
///     Path::new("/srv/app")
/// );
/// ```
pub fn resolve_relative_to(base_dir: &Path, raw: &str, env: &Environment) -> Result<PathBuf> {
    let expanded = expand_home(raw, env)?;
    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(base_dir.join(expanded))
    }
}

/// Resolve a raw path against the working directory of `env`.
///
/// # Errors
///
/// Returns an error if tilde expansion fails.
pub fn resolve_relative_to_cwd(raw: &str, env: &Environment) -> Result<PathBuf> {
    resolve_relative_to(env.cwd(), raw, env)
}
