//! End-to-end dispatch: locate config, match the working directory, confirm
//! and run.
//!
//! # Flow
//!
//! 1. Locate the routes file ([`ConfigLocator`])
//! 2. Read and validate it ([`ConfigLoader`])
//! 3. Resolve every route ([`RouteTable`])
//! 4. Canonicalize the working directory and find the first equal route
//! 5. On a match, print the match block, confirm unless `assume_yes`, and
//!    run the script
//! 6. Otherwise print the route report
//!
//! Any error along the way ends the run; only per-route resolution
//! failures are tolerated (they show up as invalid report entries).

use std::io::Write;

use crate::config::{ConfigLoader, ConfigLocator};
use crate::confirm::{self, Confirmation, KeyReader};
use crate::context::Environment;
use crate::error::Result;
use crate::launch::{ExecutionLauncher, ProcessLauncher};
use crate::path;
use crate::report;
use crate::routes::{ResolvedRoute, RouteTable};

/// Exit code used when no route matches the working directory.
pub const NO_MATCH_EXIT_CODE: i32 = 2;

/// Per-run options from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchOptions {
    /// Explicit config path (`--config`).
    pub config_override: Option<String>,
    /// Skip the confirmation prompt (`-y`/`--yes`).
    pub assume_yes: bool,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The script ran and exited with `exit_code`.
    Executed {
        /// The matched route.
        route: ResolvedRoute,
        /// The script's exit code.
        exit_code: i32,
    },
    /// The operator declined to run the matched script.
    Declined {
        /// The matched route.
        route: ResolvedRoute,
    },
    /// No route matched the working directory.
    NoMatch,
}

impl Outcome {
    /// Process exit code for this outcome.
    ///
    /// # Examples
    ///
    /// ```
    /// use cwdeploy::Outcome;
    ///
    /// assert_eq!(Outcome::NoMatch.exit_code(), 2);
    /// ```
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Executed { exit_code, .. } => *exit_code,
            Self::Declined { .. } => 0,
            Self::NoMatch => NO_MATCH_EXIT_CODE,
        }
    }
}

/// Runs the dispatch pipeline against injected collaborators.
///
/// # Examples
///
/// ```no_run
/// use cwdeploy::confirm::TerminalKeyReader;
/// use cwdeploy::launch::ShellLauncher;
/// use cwdeploy::{DispatchOptions, Dispatcher, Environment};
///
/// let env = Environment::from_process().unwrap();
/// let mut keys = TerminalKeyReader::new();
/// let mut stdout = std::io::stdout();
///
/// let outcome = Dispatcher::new(&env, &mut keys, ShellLauncher::new(), &mut stdout)
///     .run(&DispatchOptions::default())
///     .unwrap();
/// std::process::exit(outcome.exit_code());
/// ```
pub struct Dispatcher<'a, K: ?Sized, L, W: ?Sized> {
    env: &'a Environment,
    keys: &'a mut K,
    launcher: ExecutionLauncher<L>,
    out: &'a mut W,
}

impl<'a, K, L, W> Dispatcher<'a, K, L, W>
where
    K: KeyReader + ?Sized,
    L: ProcessLauncher,
    W: Write + ?Sized,
{
    /// Create a dispatcher.
    pub fn new(env: &'a Environment, keys: &'a mut K, launcher: L, out: &'a mut W) -> Self {
        Self {
            env,
            keys,
            launcher: ExecutionLauncher::new(launcher),
            out,
        }
    }

    /// Run the pipeline once.
    ///
    /// # Errors
    ///
    /// Returns an error if config lookup, loading, working directory
    /// canonicalization, confirmation or launching fails, or if output
    /// cannot be written.
    pub fn run(&mut self, options: &DispatchOptions) -> Result<Outcome> {
        let location = ConfigLocator::new(self.env).locate(options.config_override.as_deref())?;
        log::info!(
            "Using config {} (from {})",
            location.path.display(),
            location.source
        );

        let config = ConfigLoader::load(&location)?;
        let table = RouteTable::build(&config, self.env);
        let cwd = path::canonicalize(self.env.cwd())?;

        let Some(route) = table.find_match(&cwd).cloned() else {
            write!(
                self.out,
                "{}",
                report::render_no_match(&cwd, &config.path, &table.display)
            )?;
            self.out.flush()?;
            return Ok(Outcome::NoMatch);
        };

        write!(self.out, "{}", report::render_match(&route))?;
        self.out.flush()?;

        if !options.assume_yes
            && confirm::confirm(&mut *self.keys, &mut *self.out)? == Confirmation::Declined
        {
            writeln!(self.out, "Cancelled.")?;
            return Ok(Outcome::Declined { route });
        }

        let exit_code = self.launcher.run(&route.script_path, self.env.cwd())?;
        log::debug!("Script exited with code {exit_code}");

        Ok(Outcome::Executed { route, exit_code })
    }
}
