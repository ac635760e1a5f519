//! Entry point for the `abac` binary.

use std::io::IsTerminal;
use std::process::ExitCode;

use abac_cli::cli::Cli;
use abac_cli::error::CliError;
use abac_common_log::{vars, LogConfig, LogLevel};
use clap::Parser;
use tracing::error;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli) {
        eprintln!("warning: {e}");
    }

    match run(cli) {
        Ok(exit) => exit.into(),
        Err(e) => {
            error!(code = e.code(), "{e}");
            if let Some(hint) = e.hint() {
                eprintln!("hint: {hint}");
            }
            e.exit_code()
        }
    }
}

fn run(cli: Cli) -> Result<abac_cli::Exit, CliError> {
    let _span = abac_common_log::spans::command_span(command_name(&cli)).entered();
    cli.execute()
}

fn command_name(cli: &Cli) -> &'static str {
    use abac_cli::cli::Command;

    match cli.command {
        Command::Validate(_) => "validate",
        Command::Matrix(_) => "matrix",
        Command::Check(_) => "check",
        Command::Admin(_) => "admin",
        Command::Export(_) => "export",
    }
}

/// `-v`/`-q` win over the environment; without either, an explicit
/// `ABAC_LOG_LEVEL` or `RUST_LOG` is honoured and the default is `warn`.
fn init_logging(cli: &Cli) -> Result<(), CliError> {
    let mut config = LogConfig::from_env();
    config.ansi = std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none();

    let env_level_set = std::env::var_os(vars::ABAC_LOG_LEVEL).is_some()
        || std::env::var_os(vars::RUST_LOG).is_some();
    if cli.verbose > 0 || cli.quiet || !env_level_set {
        config = config.with_level(LogLevel::from_verbosity(cli.verbose, cli.quiet));
    }

    abac_common_log::init(config)?;
    Ok(())
}
