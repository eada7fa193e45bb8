//! Build script for cwdeploy-cli.
//!
//! This script generates the man page at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
fn build_cli() -> Command {
    Command::new("cwdeploy")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Run the deploy script registered for the current directory")
        .long_about(
            "Match the current directory against the routes file and run the \
             route's script with bash. Prints every configured route when \
             nothing matches.",
        )
        .arg(
            Arg::new("yes")
                .short('y')
                .long("yes")
                .help("Run the matched script without asking for confirmation")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Use this routes file instead of the default lookup")
                .value_name("PATH"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress diagnostic output")
                .action(ArgAction::SetTrue),
        )
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("cwdeploy.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
}
