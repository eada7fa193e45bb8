//! Path canonicalization functions.
//!
//! This module asks the filesystem for real paths (following symlinks) and
//! checks for existence, mapping I/O failures onto library errors.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Canonicalize a path by following symlinks.
///
/// The path must exist for canonicalization to succeed.
///
/// # Errors
///
/// Returns an error if:
/// - The path does not exist (`PathNotFound`)
/// - Permission is denied (`PermissionDenied`)
/// - Any other I/O error occurs (`Io`)
///
/// # Examples
///
/// ```no_run
/// use cwdeploy::path::canonicalize;
/// use std::path::Path;
///
/// let canonical = canonicalize(Path::new("/tmp")).unwrap();
/// assert!(canonical.is_absolute());
/// ```
pub fn canonicalize(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).map_err(|e| Error::from_io_at(path, e))
}

/// Check whether a path exists.
///
/// # Errors
///
/// Returns an error for any failure other than "not found", such as a
/// permission problem on a parent directory.
///
/// # Examples
///
/// ```no_run
/// use cwdeploy::path::exists;
/// use std::path::Path;
///
/// assert!(exists(Path::new("/tmp")).unwrap());
/// assert!(!exists(Path::new("/nonexistent/xyz")).unwrap());
/// ```
pub fn exists(path: &Path) -> Result<bool> {
    match fs::metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::from_io_at(path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_canonicalize_nonexistent() {
        let result = canonicalize(Path::new("/nonexistent/path/xyz"));
        assert!(matches!(result.unwrap_err(), Error::PathNotFound { .. }));
    }

    #[test]
    fn test_canonicalize_existing() {
        let dir = tempdir().unwrap();
        let canonical = canonicalize(dir.path()).unwrap();
        assert_eq!(canonical, fs::canonicalize(dir.path()).unwrap());
        assert!(canonical.is_absolute());
    }

    #[test]
    fn test_canonicalize_resolves_dot_components() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("app")).unwrap();
        let dotted = dir.path().join("app").join("..").join("app").join(".");
        assert_eq!(
            canonicalize(&dotted).unwrap(),
            fs::canonicalize(dir.path().join("app")).unwrap()
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_canonicalize_symlink() {
        use std::os::unix::fs::symlink;

        let dir = tempdir().unwrap();
        let target = dir.path().join("target");
        let link = dir.path().join("link");

        fs::create_dir(&target).unwrap();
        symlink(&target, &link).unwrap();

        assert_eq!(
            canonicalize(&link).unwrap(),
            fs::canonicalize(&target).unwrap()
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_canonicalize_dangling_symlink_not_found() {
        use std::os::unix::fs::symlink;

        let dir = tempdir().unwrap();
        let link = dir.path().join("dangling");
        symlink(dir.path().join("missing"), &link).unwrap();

        assert!(canonicalize(&link).unwrap_err().is_not_found());
    }

    #[test]
    fn test_exists() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("config.json");
        assert!(!exists(&file).unwrap());
        fs::write(&file, "{}").unwrap();
        assert!(exists(&file).unwrap());
    }
}
