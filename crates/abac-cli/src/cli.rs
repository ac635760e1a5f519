//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use auth_abac::{Authorizer, AuthorizerConfig, InvalidPairPolicy};
use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::commands::{AdminCommand, CheckCommand, ExportCommand, MatrixCommand, ValidateCommand};
use crate::error::{CliError, Exit};

/// Authorization engine for the lending platform
///
/// Inspect the permission matrix and evaluate access decisions against the
/// built-in lending policy or a YAML policy document.
#[derive(Debug, Parser)]
#[command(
    name = "abac",
    author,
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Policy document to use instead of the built-in lending policy
    #[arg(
        short,
        long,
        global = true,
        env = "ABAC_POLICY_PATH",
        value_hint = ValueHint::FilePath
    )]
    pub policy: Option<PathBuf>,

    /// How to handle checks of an action the resource does not declare
    #[arg(long, global = true, value_name = "POLICY")]
    pub invalid_pair: Option<InvalidPairPolicy>,

    /// Output format
    #[arg(long, global = true, default_value = "text", value_enum)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load the policy and report schema violations
    Validate(ValidateCommand),

    /// Print the permission matrix
    Matrix(MatrixCommand),

    /// Evaluate an access decision
    Check(CheckCommand),

    /// Evaluate the coarse admin gate
    Admin(AdminCommand),

    /// Write the active policy as a YAML document
    Export(ExportCommand),
}

impl Cli {
    /// Resolve authorizer settings from the environment and the flags.
    pub fn authorizer_config(&self) -> Result<AuthorizerConfig, CliError> {
        let mut config = AuthorizerConfig::from_env()?;
        if let Some(path) = &self.policy {
            config.policy_path = Some(path.clone());
        }
        if let Some(invalid_pair) = self.invalid_pair {
            config.invalid_pair = invalid_pair;
        }
        Ok(config)
    }

    /// Execute the selected command
    pub fn execute(self) -> Result<Exit, CliError> {
        let ctx = CommandContext {
            config: self.authorizer_config()?,
            format: self.format,
        };

        match self.command {
            Command::Validate(cmd) => cmd.execute(&ctx),
            Command::Matrix(cmd) => cmd.execute(&ctx),
            Command::Check(cmd) => cmd.execute(&ctx),
            Command::Admin(cmd) => cmd.execute(&ctx),
            Command::Export(cmd) => cmd.execute(&ctx),
        }
    }
}

/// Context passed to all commands
#[derive(Debug)]
pub struct CommandContext {
    pub config: AuthorizerConfig,
    pub format: OutputFormat,
}

impl CommandContext {
    pub fn authorizer(&self) -> Result<Authorizer, CliError> {
        Ok(self.config.build()?)
    }

    /// Human-readable name of the policy source.
    pub fn source(&self) -> String {
        match &self.config.policy_path {
            Some(path) => path.display().to_string(),
            None => "built-in lending policy".to_string(),
        }
    }
}
