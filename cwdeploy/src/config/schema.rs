//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

/// Top-level structure of the routes file.
///
/// # Examples
///
/// ```
/// use cwdeploy::config::{RouteDeclaration, RoutesFile};
///
/// let file = RoutesFile {
///     routes: vec![RouteDeclaration::new("~/sites/app", "deploy.sh").with_name("App")],
/// };
/// let json = serde_json::to_string(&file).unwrap();
/// assert!(json.contains("\"routes\""));
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct RoutesFile {
    /// Declared routes, in file order.
    pub routes: Vec<RouteDeclaration>,
}

/// A route as written in the config file, before any path resolution.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RouteDeclaration {
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Directory the route applies to. May be absolute, `~`-relative or
    /// relative to the config file's directory.
    pub path: String,

    /// Script to run. Resolved like `path`.
    pub script: String,
}

impl RouteDeclaration {
    /// Create an unnamed route declaration.
    #[must_use]
    pub fn new(path: impl Into<String>, script: impl Into<String>) -> Self {
        Self {
            name: None,
            path: path.into(),
            script: script.into(),
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The name shown in reports: the declared name, or the raw path.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.path)
    }
}
