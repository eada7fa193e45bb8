//! CLI structure and argument parsing.
//!
//! This module defines the command-line options using clap's derive macros
//! and maps clap's parse failures onto the tool's own argument errors.

use clap::builder::NonEmptyStringValueParser;
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::Parser;
use std::ffi::OsString;

use crate::error::CliError;

/// Long flag naming an explicit routes file.
const CONFIG_FLAG: &str = "--config";
/// End-of-options marker; accepted by clap but meaningless here.
const ESCAPE_TOKEN: &str = "--";

/// Run the deploy script registered for the current directory.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "cwdeploy")]
#[command(
    version,
    about = "Run the deploy script registered for the current directory",
    long_about = None,
    args_override_self = true
)]
pub struct Cli {
    /// Run the matched script without asking for confirmation
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Use this routes file instead of the default lookup
    #[arg(long, value_name = "PATH", value_parser = NonEmptyStringValueParser::new())]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Suppress diagnostic output
    #[arg(long)]
    pub quiet: bool,
}

/// Result of parsing the command line.
#[derive(Debug)]
pub enum Parsed {
    /// Arguments were valid; run the dispatcher.
    Run(Cli),
    /// `--help` or `--version` was requested; print it and exit 0.
    Info(clap::Error),
}

/// Parse `args` (including the program name).
///
/// # Errors
///
/// Returns [`CliError::MissingConfigValue`] when `--config` has no usable
/// value, and [`CliError::UnknownArgument`] naming the offending token for
/// anything else clap rejects. A bare `--` is rejected the same way since
/// there are no positionals for it to introduce.
pub fn parse_args<I, T>(args: I) -> Result<Parsed, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let argv: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let tokens: Vec<String> = argv
        .iter()
        .skip(1)
        .map(|t| t.to_string_lossy().into_owned())
        .collect();

    match Cli::try_parse_from(&argv) {
        Ok(_) if tokens.iter().any(|t| t == ESCAPE_TOKEN) => {
            Err(CliError::UnknownArgument(ESCAPE_TOKEN.to_string()))
        }
        Ok(cli) => Ok(Parsed::Run(cli)),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            Ok(Parsed::Info(e))
        }
        Err(e) => Err(map_clap_error(&e, &tokens)),
    }
}

fn map_clap_error(e: &clap::Error, tokens: &[String]) -> CliError {
    let invalid_arg = context_string(e, ContextKind::InvalidArg);

    if matches!(e.kind(), ErrorKind::InvalidValue | ErrorKind::NoEquals)
        && invalid_arg.is_some_and(|arg| arg.starts_with(CONFIG_FLAG))
    {
        return CliError::MissingConfigValue;
    }

    CliError::UnknownArgument(offending_token(e, invalid_arg, tokens))
}

/// The raw command-line token clap rejected.
///
/// clap reports flags by their display form (`--config <PATH>`), so the
/// flag name is matched back against the raw tokens to recover forms
/// such as `--yes=foo`.
fn offending_token(e: &clap::Error, invalid_arg: Option<&str>, tokens: &[String]) -> String {
    if let Some(flag) = invalid_arg.and_then(|arg| arg.split_whitespace().next()) {
        let with_value = format!("{flag}=");
        return tokens
            .iter()
            .find(|t| *t == flag || t.starts_with(&with_value))
            .cloned()
            .unwrap_or_else(|| flag.to_string());
    }

    context_string(e, ContextKind::InvalidValue)
        .map(str::to_string)
        .or_else(|| tokens.last().cloned())
        .unwrap_or_default()
}

fn context_string(e: &clap::Error, kind: ContextKind) -> Option<&str> {
    match e.get(kind) {
        Some(ContextValue::String(value)) => Some(value.as_str()),
        _ => None,
    }
}
