#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # cwdeploy
//!
//! A library for running the deploy script registered for a directory.
//!
//! A JSON routes file maps project directories to scripts. The working
//! directory is canonicalized and compared against every route; on an exact
//! match the route's script runs in the working directory, otherwise a
//! report of all routes is printed.
//!
//! ## Core Types
//!
//! - [`Environment`]: Snapshot of environment variables and the working directory
//! - [`config::ConfigLocator`] and [`config::ConfigLoader`]: Routes file lookup and parsing
//! - [`routes::RouteTable`]: Resolved routes and directory matching
//! - [`Dispatcher`] and [`Outcome`]: The end-to-end run
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use cwdeploy::config::ConfigLoader;
//! use cwdeploy::routes::RouteTable;
//! use cwdeploy::Environment;
//! use std::path::Path;
//!
//! let config = ConfigLoader::parse(
//!     Path::new("/etc/cwdeploy/config.json"),
//!     r#"{"routes":[{"name":"App","path":"/no/such/app","script":"app.sh"}]}"#,
//! )
//! .unwrap();
//!
//! let table = RouteTable::build(&config, &Environment::new("/"));
//! assert!(table.resolved.is_empty());
//! assert!(table.display[0].invalid);
//! ```

pub mod config;
pub mod confirm;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod launch;
pub mod logging;
pub mod path;
pub mod report;
pub mod routes;

// Re-export key types at crate root for convenience
pub use config::{ConfigLoader, ConfigLocation, ConfigLocator, ConfigSource, LoadedConfig};
pub use confirm::{Confirmation, KeyReader, TerminalKeyReader};
pub use context::Environment;
pub use dispatch::{DispatchOptions, Dispatcher, Outcome, NO_MATCH_EXIT_CODE};
pub use error::{Error, Result};
pub use launch::{ProcessLauncher, ShellLauncher};
pub use logging::{init_logger, LogLevel, Logger};
pub use routes::{DisplayRoute, ResolvedRoute, RouteTable};
