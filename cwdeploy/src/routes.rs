//! Route resolution and directory matching.
//!
//! Each declared route is resolved relative to the directory holding the
//! config file. Routes whose directory resolves become matchable; every
//! route, resolvable or not, gets an entry for the no-match report.

use std::path::{Path, PathBuf};

use crate::config::{LoadedConfig, RouteDeclaration};
use crate::context::Environment;
use crate::error::Result;
use crate::path;

/// A route whose directory exists and can be matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    /// Declared name, or the raw path when unnamed.
    pub name: String,
    /// Canonical (symlink-free) route directory.
    pub canonical_path: PathBuf,
    /// Absolute script path. Canonicalized again right before launch.
    pub script_path: PathBuf,
}

/// One line of the route report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRoute {
    /// Declared name, or the raw path when unnamed.
    pub name: String,
    /// Canonical path if resolution succeeded, otherwise the best effort.
    pub path: PathBuf,
    /// Resolved script path, or the raw string if resolution failed early.
    pub script: PathBuf,
    /// Whether the route could not be resolved.
    pub invalid: bool,
}

/// Resolved routes ready for matching, plus the full report listing.
///
/// `display` always has one entry per declared route; `resolved` only
/// holds the routes that resolved. Both keep declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    /// Matchable routes.
    pub resolved: Vec<ResolvedRoute>,
    /// Report entries for every declared route.
    pub display: Vec<DisplayRoute>,
}

impl RouteTable {
    /// Resolve every route declared in `config`.
    ///
    /// Per-route failures never abort the scan; they mark that route's
    /// report entry invalid.
    #[must_use]
    pub fn build(config: &LoadedConfig, env: &Environment) -> Self {
        let base_dir = config_dir(&config.path, env);
        let mut table = Self::default();

        for declaration in &config.routes {
            table.push(declaration, &base_dir, env);
        }

        table
    }

    /// Find the first route whose canonical path equals `canonical_cwd`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cwdeploy::routes::{ResolvedRoute, RouteTable};
    /// use std::path::{Path, PathBuf};
    ///
    /// let table = RouteTable {
    ///     resolved: vec![ResolvedRoute {
    ///         name: "App".into(),
    ///         canonical_path: PathBuf::from("/srv/app"),
    ///         script_path: PathBuf::from("/srv/deploy.sh"),
    ///     }],
    ///     display: Vec::new(),
    /// };
    ///
    /// assert!(table.find_match(Path::new("/srv/app")).is_some());
    /// // No prefix matching
    /// assert!(table.find_match(Path::new("/srv/app/src")).is_none());
    /// ```
    #[must_use]
    pub fn find_match(&self, canonical_cwd: &Path) -> Option<&ResolvedRoute> {
        self.resolved
            .iter()
            .find(|route| route.canonical_path == canonical_cwd)
    }

    fn push(&mut self, declaration: &RouteDeclaration, base_dir: &Path, env: &Environment) {
        let name = declaration.display_name().to_string();
        let mut display = DisplayRoute {
            name: name.clone(),
            path: PathBuf::from(&declaration.path),
            script: PathBuf::from(&declaration.script),
            invalid: false,
        };

        match resolve(declaration, base_dir, env, &mut display) {
            Ok((canonical_path, script_path)) => {
                self.resolved.push(ResolvedRoute {
                    name,
                    canonical_path,
                    script_path,
                });
            }
            Err(e) => {
                log::info!("Route '{}' is invalid: {e}", display.name);
                display.invalid = true;
            }
        }

        self.display.push(display);
    }
}

/// Resolve one declaration, recording partial progress in `display`.
fn resolve(
    declaration: &RouteDeclaration,
    base_dir: &Path,
    env: &Environment,
    display: &mut DisplayRoute,
) -> Result<(PathBuf, PathBuf)> {
    let route_path = path::resolve_relative_to(base_dir, &declaration.path, env)?;
    display.path.clone_from(&route_path);

    let script_path = path::resolve_relative_to(base_dir, &declaration.script, env)?;
    display.script.clone_from(&script_path);

    let canonical_path = path::canonicalize(&route_path)?;
    display.path.clone_from(&canonical_path);

    Ok((canonical_path, script_path))
}

/// Directory routes are resolved against, anchored at the context cwd.
fn config_dir(config_path: &Path, env: &Environment) -> PathBuf {
    let dir = config_path.parent().unwrap_or_else(|| Path::new(""));
    if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        env.cwd().join(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_in(dir: &Path, routes: Vec<RouteDeclaration>) -> LoadedConfig {
        LoadedConfig {
            path: dir.join("config.json"),
            routes,
        }
    }

    fn env_for(temp: &TempDir) -> Environment {
        let home = temp.path().join("home");
        Environment::new(temp.path()).with_var("HOME", home.display().to_string())
    }

    #[test]
    fn test_relative_paths_resolve_against_config_dir() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("app")).unwrap();

        let config = config_in(
            temp.path(),
            vec![RouteDeclaration::new("app", "scripts/deploy.sh").with_name("App")],
        );
        let table = RouteTable::build(&config, &env_for(&temp));

        assert_eq!(table.resolved.len(), 1);
        let route = &table.resolved[0];
        assert_eq!(route.name, "App");
        assert_eq!(
            route.canonical_path,
            fs::canonicalize(temp.path().join("app")).unwrap()
        );
        assert_eq!(route.script_path, temp.path().join("scripts/deploy.sh"));

        assert_eq!(table.display.len(), 1);
        assert!(!table.display[0].invalid);
        assert_eq!(table.display[0].path, route.canonical_path);
    }

    #[test]
    fn test_home_relative_route() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("home/sites/app")).unwrap();

        let config = config_in(
            temp.path(),
            vec![RouteDeclaration::new("~/sites/app", "/bin/deploy.sh")],
        );
        let table = RouteTable::build(&config, &env_for(&temp));

        assert_eq!(table.resolved[0].name, "~/sites/app");
        assert_eq!(table.resolved[0].script_path, PathBuf::from("/bin/deploy.sh"));
    }

    #[test]
    fn test_missing_route_is_invalid_but_scan_continues() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("present")).unwrap();

        let config = config_in(
            temp.path(),
            vec![
                RouteDeclaration::new("missing", "missing.sh").with_name("Missing"),
                RouteDeclaration::new("present", "present.sh").with_name("Present"),
            ],
        );
        let table = RouteTable::build(&config, &env_for(&temp));

        assert_eq!(table.resolved.len(), 1);
        assert_eq!(table.resolved[0].name, "Present");

        assert_eq!(table.display.len(), 2);
        let missing = &table.display[0];
        assert!(missing.invalid);
        assert_eq!(missing.path, temp.path().join("missing"));
        assert_eq!(missing.script, temp.path().join("missing.sh"));
        assert!(!table.display[1].invalid);
    }

    #[test]
    fn test_home_expansion_failure_keeps_raw_strings() {
        let temp = TempDir::new().unwrap();
        let config = config_in(
            temp.path(),
            vec![RouteDeclaration::new("~/app", "~/app.sh")],
        );
        let env = Environment::new(temp.path());

        let table = RouteTable::build(&config, &env);
        assert!(table.resolved.is_empty());
        let entry = &table.display[0];
        assert!(entry.invalid);
        assert_eq!(entry.path, PathBuf::from("~/app"));
        assert_eq!(entry.script, PathBuf::from("~/app.sh"));
    }

    #[test]
    fn test_script_expansion_failure_keeps_resolved_path() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("app")).unwrap();
        let config = config_in(
            temp.path(),
            vec![RouteDeclaration::new("app", "~/deploy.sh")],
        );
        let env = Environment::new(temp.path());

        let table = RouteTable::build(&config, &env);
        let entry = &table.display[0];
        assert!(entry.invalid);
        assert_eq!(entry.path, temp.path().join("app"));
        assert_eq!(entry.script, PathBuf::from("~/deploy.sh"));
    }

    #[test]
    fn test_relative_config_path_anchored_at_cwd() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("conf/app")).unwrap();

        let config = LoadedConfig {
            path: PathBuf::from("conf/config.json"),
            routes: vec![RouteDeclaration::new("app", "deploy.sh")],
        };
        let table = RouteTable::build(&config, &env_for(&temp));

        assert_eq!(table.resolved.len(), 1);
        assert_eq!(
            table.resolved[0].script_path,
            temp.path().join("conf/deploy.sh")
        );
    }

    #[test]
    fn test_first_match_wins_for_duplicates() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("app")).unwrap();

        let config = config_in(
            temp.path(),
            vec![
                RouteDeclaration::new("app", "first.sh").with_name("First"),
                RouteDeclaration::new("./app", "second.sh").with_name("Second"),
            ],
        );
        let table = RouteTable::build(&config, &env_for(&temp));
        let cwd = fs::canonicalize(temp.path().join("app")).unwrap();

        assert_eq!(table.find_match(&cwd).unwrap().name, "First");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_route_matches_target() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("real")).unwrap();
        symlink(temp.path().join("real"), temp.path().join("link")).unwrap();

        let config = config_in(
            temp.path(),
            vec![RouteDeclaration::new("link", "deploy.sh")],
        );
        let table = RouteTable::build(&config, &env_for(&temp));
        let cwd = fs::canonicalize(temp.path().join("real")).unwrap();

        assert_eq!(table.find_match(&cwd).unwrap().name, "link");
    }

    #[test]
    fn test_no_match_for_parent_or_child() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("app/src")).unwrap();

        let config = config_in(
            temp.path(),
            vec![RouteDeclaration::new("app", "deploy.sh")],
        );
        let table = RouteTable::build(&config, &env_for(&temp));

        let parent = fs::canonicalize(temp.path()).unwrap();
        let child = fs::canonicalize(temp.path().join("app/src")).unwrap();
        assert!(table.find_match(&parent).is_none());
        assert!(table.find_match(&child).is_none());
    }
}
