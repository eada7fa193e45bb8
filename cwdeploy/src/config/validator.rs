//! Configuration validation.
//!
//! This module checks the structure of a parsed routes file and turns it
//! into typed [`RouteDeclaration`] values. Validation is fail-fast: the
//! first problem in file order is reported.

use std::fmt;

use serde_json::{Map, Value};

use crate::config::schema::RouteDeclaration;

/// A structural problem in the routes file.
///
/// Route numbers are 1-based, matching what an operator counts in the
/// file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// The document is not an object with a `routes` key.
    NotAnObject,
    /// `routes` is present but is not an array.
    RoutesNotArray,
    /// A route entry is not an object.
    RouteNotObject {
        /// 1-based route number.
        route: usize,
    },
    /// A required string field is missing, empty or not a string.
    MissingField {
        /// 1-based route number.
        route: usize,
        /// The field name (`path` or `script`).
        field: &'static str,
    },
    /// `name` is present but is not a non-empty string.
    InvalidName {
        /// 1-based route number.
        route: usize,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "must be an object with a 'routes' array"),
            Self::RoutesNotArray => write!(f, "has invalid 'routes'; expected an array"),
            Self::RouteNotObject { route } => {
                write!(f, "route #{route} is invalid; expected an object")
            }
            Self::MissingField { route, field } => {
                write!(f, "route #{route} must include a non-empty string '{field}'")
            }
            Self::InvalidName { route } => {
                write!(f, "route #{route} has invalid 'name'; expected a non-empty string")
            }
        }
    }
}

/// Validates a parsed routes document.
///
/// # Examples
///
/// ```
/// use cwdeploy::config::{ConfigValidator, ValidationIssue};
/// use serde_json::json;
///
/// let routes = ConfigValidator::validate(&json!({
///     "routes": [{ "name": "App", "path": "/srv/app", "script": "deploy.sh" }]
/// }))
/// .unwrap();
/// assert_eq!(routes[0].display_name(), "App");
///
/// let err = ConfigValidator::validate(&json!({})).unwrap_err();
/// assert_eq!(err, ValidationIssue::NotAnObject);
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a document and return its routes in declaration order.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationIssue`] found.
    pub fn validate(value: &Value) -> Result<Vec<RouteDeclaration>, ValidationIssue> {
        Self::route_entries(value)?
            .iter()
            .enumerate()
            .map(|(index, entry)| Self::validate_route(index + 1, entry))
            .collect()
    }

    /// Collect every issue in a document instead of stopping at the first.
    ///
    /// A document-level issue (not an object, `routes` not an array) is
    /// returned alone since no routes can be inspected.
    #[must_use]
    pub fn issues(value: &Value) -> Vec<ValidationIssue> {
        match Self::route_entries(value) {
            Ok(entries) => entries
                .iter()
                .enumerate()
                .filter_map(|(index, entry)| Self::validate_route(index + 1, entry).err())
                .collect(),
            Err(issue) => vec![issue],
        }
    }

    fn route_entries(value: &Value) -> Result<&[Value], ValidationIssue> {
        let routes = value
            .as_object()
            .and_then(|obj| obj.get("routes"))
            .ok_or(ValidationIssue::NotAnObject)?;

        routes
            .as_array()
            .map(Vec::as_slice)
            .ok_or(ValidationIssue::RoutesNotArray)
    }

    fn validate_route(route: usize, entry: &Value) -> Result<RouteDeclaration, ValidationIssue> {
        let obj = entry
            .as_object()
            .ok_or(ValidationIssue::RouteNotObject { route })?;

        let path = Self::required_string(obj, route, "path")?;
        let script = Self::required_string(obj, route, "script")?;

        let name = match obj.get("name") {
            None => None,
            Some(Value::String(name)) if !name.is_empty() => Some(name.clone()),
            Some(_) => return Err(ValidationIssue::InvalidName { route }),
        };

        Ok(RouteDeclaration { name, path, script })
    }

    fn required_string(
        obj: &Map<String, Value>,
        route: usize,
        field: &'static str,
    ) -> Result<String, ValidationIssue> {
        match obj.get(field) {
            Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
            _ => Err(ValidationIssue::MissingField { route, field }),
        }
    }
}
