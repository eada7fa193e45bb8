//! Property-based tests for path normalization.

use proptest::prelude::*;
use std::path::{Path, PathBuf};

use crate::context::Environment;
use crate::path::normalize::{expand_home, resolve_relative_to};

fn segment() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.-]{1,12}".prop_filter("not a dot segment", |s| s != "." && s != "..")
}

proptest! {
    #[test]
    fn prop_paths_without_tilde_pass_through(segments in prop::collection::vec(segment(), 1..5)) {
        let raw = segments.join("/");
        let env = Environment::new("/work").with_var("HOME", "/home/op");
        prop_assume!(!raw.starts_with('~'));
        prop_assert_eq!(expand_home(&raw, &env).unwrap(), PathBuf::from(&raw));
    }

    #[test]
    fn prop_home_relative_lands_under_home(segments in prop::collection::vec(segment(), 1..5)) {
        let raw = format!("~/{}", segments.join("/"));
        let env = Environment::new("/work").with_var("HOME", "/home/op");
        let expanded = expand_home(&raw, &env).unwrap();
        prop_assert!(expanded.starts_with("/home/op"));
    }

    #[test]
    fn prop_relative_resolution_is_under_base(segments in prop::collection::vec(segment(), 1..5)) {
        let raw = segments.join("/");
        prop_assume!(!raw.starts_with('~'));
        let env = Environment::new("/work");
        let base = Path::new("/etc/cwdeploy");
        let resolved = resolve_relative_to(base, &raw, &env).unwrap();
        prop_assert!(resolved.starts_with(base));
        prop_assert!(resolved.is_absolute());
    }
}
