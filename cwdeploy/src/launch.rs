//! Script execution.
//!
//! The matched script runs under a shell interpreter with the caller's
//! working directory and all three standard streams inherited. Its exit
//! status is returned unchanged.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use crate::error::{Error, Result};
use crate::path;

/// Interpreter used for deploy scripts.
pub const DEFAULT_SHELL: &str = "bash";

/// Starts a script and waits for it to finish.
#[cfg_attr(test, mockall::automock)]
pub trait ProcessLauncher {
    /// Run `script` with `cwd` as its working directory and return its
    /// exit code.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be started.
    fn launch(&self, script: &Path, cwd: &Path) -> Result<i32>;
}

/// Runs scripts through a shell with inherited stdio.
#[derive(Debug, Clone)]
pub struct ShellLauncher {
    program: PathBuf,
}

impl Default for ShellLauncher {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_SHELL),
        }
    }
}

impl ShellLauncher {
    /// Create a launcher using [`DEFAULT_SHELL`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different interpreter program.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }
}

impl ProcessLauncher for ShellLauncher {
    fn launch(&self, script: &Path, cwd: &Path) -> Result<i32> {
        log::debug!(
            "Running {} {} in {}",
            self.program.display(),
            script.display(),
            cwd.display()
        );

        let status = Command::new(&self.program)
            .arg(script)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| Error::Launch {
                program: self.program.display().to_string(),
                source: e,
            })?;

        Ok(exit_code(status))
    }
}

/// Map a child status to a process exit code.
///
/// A child killed by a signal reports `128 + signal` on Unix, the shell
/// convention.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

/// Re-checks the script and hands it to a [`ProcessLauncher`].
///
/// # Examples
///
/// ```no_run
/// use cwdeploy::launch::{ExecutionLauncher, ShellLauncher};
/// use std::path::Path;
///
/// let launcher = ExecutionLauncher::new(ShellLauncher::new());
/// let code = launcher.run(Path::new("/srv/deploy.sh"), Path::new("/srv/app")).unwrap();
/// std::process::exit(code);
/// ```
pub struct ExecutionLauncher<L> {
    launcher: L,
}

impl<L: ProcessLauncher> ExecutionLauncher<L> {
    /// Wrap a process launcher.
    pub const fn new(launcher: L) -> Self {
        Self { launcher }
    }

    /// Canonicalize `script` and run it in `cwd`.
    ///
    /// The script is resolved again here even though it was resolved at
    /// match time, so a script removed in between is reported as missing.
    ///
    /// # Errors
    ///
    /// Returns `PathNotFound` if the script no longer exists, or any error
    /// from the launcher.
    pub fn run(&self, script: &Path, cwd: &Path) -> Result<i32> {
        let canonical = path::canonicalize(script)?;
        self.launcher.launch(&canonical, cwd)
    }
}
