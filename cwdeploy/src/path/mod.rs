//! Path handling for route and config resolution.
//!
//! # Normalization
//!
//! [`normalize`] turns a raw path string from the config file or the
//! command line into an absolute path by:
//! - Expanding a leading `~` to the home directory
//! - Joining relative paths onto a base directory
//!
//! No symlinks are followed and `.`/`..` components are left in place.
//!
//! # Canonicalization
//!
//! [`canonicalize`] asks the filesystem for the real path, following
//! symlinks. Route directories and the working directory are compared in
//! canonical form, so a symlinked checkout matches the route declared for
//! its target.
//!
//! # Examples
//!
//! ```
//! use cwdeploy::path::normalize::resolve_relative_to;
//! use cwdeploy::Environment;
//! use std::path::Path;
//!
//! let env = Environment::new("/work").with_var("HOME", "/home/op");
//!
//! let script = resolve_relative_to(Path::new("/etc/cwdeploy"), "deploy.sh", &env).unwrap();
//! assert_eq!(script, Path::new("/etc/cwdeploy/deploy.sh"));
//!
//! let app = resolve_relative_to(Path::new("/etc/cwdeploy"), "~/app", &env).unwrap();
//! assert_eq!(app, Path::new("/home/op/app"));
//! ```

pub mod canonicalize;
pub mod normalize;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use canonicalize::{canonicalize, exists};
pub use normalize::{expand_home, resolve_relative_to, resolve_relative_to_cwd};
