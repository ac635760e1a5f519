//! Matrix command implementation.

use clap::Parser;
use serde::Serialize;

use auth_abac::{Action, MatrixEntry, Resource, Role};

use crate::cli::CommandContext;
use crate::error::{CliError, Exit};
use crate::output::{columns, print_output, FormattedOutput};

/// Print the permission matrix
#[derive(Debug, Parser)]
pub struct MatrixCommand {
    /// Only show grants held by this role
    #[arg(long)]
    pub role: Option<Role>,
}

#[derive(Debug, Serialize)]
struct Row {
    role: Role,
    resource: Resource,
    action: Action,
    grant: String,
}

impl From<&MatrixEntry<'_>> for Row {
    fn from(entry: &MatrixEntry<'_>) -> Self {
        Self {
            role: entry.role,
            resource: entry.resource,
            action: entry.action,
            grant: entry.grant.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
struct MatrixListing {
    rows: Vec<Row>,
}

impl FormattedOutput for MatrixListing {
    fn format_text(&self) -> String {
        if self.rows.is_empty() {
            return "no grants".to_string();
        }
        self.rows
            .iter()
            .map(|row| {
                columns(
                    &[
                        row.role.as_ref(),
                        row.resource.as_ref(),
                        row.action.as_ref(),
                        &row.grant,
                    ],
                    &[14, 9, 6],
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl MatrixCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<Exit, CliError> {
        let authorizer = ctx.authorizer()?;
        let listing = MatrixListing {
            rows: authorizer
                .matrix()
                .entries()
                .iter()
                .filter(|entry| self.role.map_or(true, |role| entry.role == role))
                .map(Row::from)
                .collect(),
        };

        print_output(ctx, &listing)?;
        Ok(Exit::Success)
    }
}
