//! Export command implementation.

use std::path::PathBuf;

use clap::{Parser, ValueHint};

use auth_abac::{PolicyDocument, PolicyLoader};

use crate::cli::CommandContext;
use crate::error::{CliError, Exit};

/// Write the active policy as a YAML document
#[derive(Debug, Parser)]
pub struct ExportCommand {
    /// File to write instead of stdout
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

impl ExportCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<Exit, CliError> {
        let authorizer = ctx.authorizer()?;
        let document = PolicyDocument::from_matrix(authorizer.matrix(), authorizer.registry());

        match &self.output {
            Some(path) => {
                PolicyLoader::new(path).save(&document)?;
                tracing::info!(path = %path.display(), "Policy exported");
            }
            None => {
                let yaml = serde_yaml::to_string(&document).map_err(|e| {
                    CliError::Other(anyhow::anyhow!("YAML serialization failed: {e}"))
                })?;
                print!("{yaml}");
            }
        }
        Ok(Exit::Success)
    }
}
