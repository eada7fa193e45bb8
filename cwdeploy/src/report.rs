//! Text rendering for match and no-match reports.
//!
//! Rendering is pure: the same inputs always produce the same text.

use std::fmt::Write;
use std::path::Path;

use crate::routes::{DisplayRoute, ResolvedRoute};

/// Render the label block printed when a route matched.
///
/// Labels are right-aligned to the longest label.
///
/// # Examples
///
/// ```
/// use cwdeploy::report::render_match;
/// use cwdeploy::routes::ResolvedRoute;
/// use std::path::PathBuf;
///
/// let route = ResolvedRoute {
///     name: "App".into(),
///     canonical_path: PathBuf::from("/srv/app"),
///     script_path: PathBuf::from("/srv/deploy.sh"),
/// };
/// assert_eq!(
///     render_match(&route),
///     "Matched: App\n Script: /srv/deploy.sh\n"
/// );
/// ```
#[must_use]
pub fn render_match(route: &ResolvedRoute) -> String {
    let script = route.script_path.display().to_string();
    let rows = [("Matched:", route.name.as_str()), ("Script:", script.as_str())];
    render_rows(&rows)
}

/// Render the report printed when no route matched `canonical_cwd`.
///
/// # Examples
///
/// ```
/// use cwdeploy::report::render_no_match;
/// use std::path::Path;
///
/// let text = render_no_match(Path::new("/srv/other"), Path::new("/etc/c.json"), &[]);
/// assert!(text.contains("No route matched the current directory."));
/// assert!(text.contains("(none)"));
/// ```
#[must_use]
pub fn render_no_match(
    canonical_cwd: &Path,
    config_path: &Path,
    routes: &[DisplayRoute],
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Current directory: {}", canonical_cwd.display());
    let _ = writeln!(out, "No route matched the current directory.");
    let _ = writeln!(out);
    let _ = writeln!(out, "Routes ({}):", config_path.display());

    if routes.is_empty() {
        let _ = writeln!(out, "  (none)");
        return out;
    }

    for route in routes {
        let tag = if route.invalid { " (invalid)" } else { "" };
        let _ = writeln!(out, "  {}{tag}", route.name);
        let _ = writeln!(out, "    path:   {}", route.path.display());
        let _ = writeln!(out, "    script: {}", route.script.display());
    }

    out
}

fn render_rows(rows: &[(&str, &str)]) -> String {
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    rows.iter().fold(String::new(), |mut out, (label, value)| {
        let _ = writeln!(out, "{label:>width$} {value}");
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn display(name: &str, path: &str, script: &str, invalid: bool) -> DisplayRoute {
        DisplayRoute {
            name: name.to_string(),
            path: PathBuf::from(path),
            script: PathBuf::from(script),
            invalid,
        }
    }

    #[test]
    fn test_match_block_alignment() {
        let route = ResolvedRoute {
            name: "Site".to_string(),
            canonical_path: PathBuf::from("/srv/site"),
            script_path: PathBuf::from("/srv/bin/site.sh"),
        };
        let text = render_match(&route);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["Matched: Site", " Script: /srv/bin/site.sh"]);
    }

    #[test]
    fn test_no_match_lists_every_route_in_order() {
        let routes = vec![
            display("App", "/srv/app", "/srv/app.sh", false),
            display("Gone", "/srv/gone", "/srv/gone.sh", true),
        ];
        let text = render_no_match(Path::new("/home/op"), Path::new("/etc/c.json"), &routes);

        assert_eq!(
            text,
            "Current directory: /home/op\n\
             No route matched the current directory.\n\
             \n\
             Routes (/etc/c.json):\n\
             \x20 App\n\
             \x20   path:   /srv/app\n\
             \x20   script: /srv/app.sh\n\
             \x20 Gone (invalid)\n\
             \x20   path:   /srv/gone\n\
             \x20   script: /srv/gone.sh\n"
        );
    }

    #[test]
    fn test_no_match_empty_routes() {
        let text = render_no_match(Path::new("/x"), Path::new("/etc/c.json"), &[]);
        assert!(text.ends_with("Routes (/etc/c.json):\n  (none)\n"));
    }
}
