//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - An isolated environment with a temporary home directory
//! - Command builders that clear the inherited environment
//! - Fixtures for routes files and deploy scripts

use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment with an isolated home directory.
///
/// Commands built from a `TestEnv` see only `PATH` and `HOME` from the
/// outside world, so the developer's own routes file never leaks in.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Home directory used for default lookup and `~` expansion
    pub home: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The temp path is canonicalized so it can be compared with the
    /// tool's canonical output.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir
            .path()
            .canonicalize()
            .expect("Failed to canonicalize temp dir");
        let home = temp_path.join("home");
        fs::create_dir_all(&home).expect("Failed to create home dir");

        Self {
            temp_dir,
            temp_path,
            home,
        }
    }

    /// Get a command builder with a cleared environment and no `HOME`.
    pub fn command_bare(&self, cwd: &Path) -> Command {
        let mut cmd = Command::cargo_bin("cwdeploy").expect("Failed to find cwdeploy binary");
        cmd.env_clear().current_dir(cwd);
        if let Some(path) = std::env::var_os("PATH") {
            cmd.env("PATH", path);
        }
        cmd
    }

    /// Get a command builder running in `cwd` with `HOME` set.
    pub fn command(&self, cwd: &Path) -> Command {
        let mut cmd = self.command_bare(cwd);
        cmd.env("HOME", &self.home);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Create a subdirectory in the test environment.
    pub fn create_dir(&self, name: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        fs::create_dir_all(&path).expect("Failed to create test directory");
        path
    }

    /// Path of the default routes file under the test home.
    pub fn home_config_path(&self) -> PathBuf {
        self.home.join(".config/cwdeploy/config.json")
    }

    /// Write `config` to the default home location and return its path.
    pub fn write_config(&self, config: &Value) -> PathBuf {
        let path = self.home_config_path();
        self.write_config_at(&path, config);
        path
    }

    /// Write `config` to an arbitrary path.
    pub fn write_config_at(&self, path: &Path, config: &Value) {
        self.write_raw(path, &config.to_string());
    }

    /// Write raw text to a path, creating parent directories.
    pub fn write_raw(&self, path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(path, contents).expect("Failed to write file");
    }

    /// Write a bash script under the temp directory and return its path.
    pub fn write_script(&self, name: &str, body: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        self.write_raw(&path, body);
        path
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a route object for a routes file.
#[allow(dead_code)]
pub fn route(name: &str, path: &Path, script: &Path) -> Value {
    serde_json::json!({
        "name": name,
        "path": path.display().to_string(),
        "script": script.display().to_string(),
    })
}

/// Wrap route objects in a routes file.
#[allow(dead_code)]
pub fn routes(routes: Vec<Value>) -> Value {
    serde_json::json!({ "routes": routes })
}
