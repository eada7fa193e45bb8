//! Configuration discovery, loading and validation.
//!
//! The routes file is a JSON object with a `routes` array:
//!
//! ```json
//! { "routes": [ { "name": "App", "path": "~/sites/app", "script": "deploy/app.sh" } ] }
//! ```
//!
//! # Lookup Precedence
//!
//! The file is located using the first source that applies (highest to
//! lowest):
//!
//! 1. The `--config` command-line flag
//! 2. The `CWDEPLOY_CONFIG` environment variable
//! 3. `$XDG_CONFIG_HOME/cwdeploy/config.json`
//! 4. `$HOME/.config/cwdeploy/config.json`
//!
//! An explicit override (1 or 2) must exist; the default locations (3 and
//! 4) are checked in order and the first existing file wins.
//!
//! # Examples
//!
//! ```no_run
//! use cwdeploy::config::{ConfigLoader, ConfigLocator};
//! use cwdeploy::Environment;
//!
//! let env = Environment::from_process().unwrap();
//! let location = ConfigLocator::new(&env).locate(None).unwrap();
//! let config = ConfigLoader::load(&location).unwrap();
//! println!("{} routes in {}", config.routes.len(), config.path.display());
//! ```

pub mod loader;
pub mod locator;
pub mod schema;
pub mod validator;

pub use loader::{ConfigLoader, LoadedConfig};
pub use locator::{ConfigLocation, ConfigLocator, ConfigSource};
pub use schema::{RouteDeclaration, RoutesFile};
pub use validator::{ConfigValidator, ValidationIssue};
