//! Main entry point for the cwdeploy CLI.
//!
//! Runs the deploy script registered for the current directory, or prints
//! the route report when nothing matches.

use cwdeploy::{
    init_logger, DispatchOptions, Dispatcher, Environment, ShellLauncher, TerminalKeyReader,
};
use cwdeploy_cli::{parse_args, Cli, CliError, Parsed};

fn main() {
    let cli = match parse_args(std::env::args_os()) {
        Ok(Parsed::Run(cli)) => cli,
        Ok(Parsed::Info(info)) => {
            // Help and version output
            let _ = info.print();
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    };

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<i32, CliError> {
    let env = Environment::from_process()?;
    init_logger(cli.verbose, cli.quiet, &env).install();

    let options = DispatchOptions {
        config_override: cli.config,
        assume_yes: cli.yes,
    };

    let mut keys = TerminalKeyReader::new();
    let mut stdout = std::io::stdout().lock();
    let outcome =
        Dispatcher::new(&env, &mut keys, ShellLauncher::new(), &mut stdout).run(&options)?;

    Ok(outcome.exit_code())
}
