//! Admin command implementation.

use clap::Parser;
use serde::Serialize;

use auth_abac::{Decision, User};

use crate::cli::CommandContext;
use crate::error::{CliError, Exit};
use crate::output::{print_output, FormattedOutput};

/// Evaluate the coarse admin gate
#[derive(Debug, Parser)]
pub struct AdminCommand {
    /// Identifier of the acting user
    #[arg(long, default_value = "cli")]
    pub uid: String,

    /// Role held by the user (repeatable, unknown names allowed)
    #[arg(long = "role", value_name = "ROLE")]
    pub roles: Vec<String>,

    /// Evaluate without an authenticated user
    #[arg(long, conflicts_with = "roles")]
    pub anonymous: bool,
}

#[derive(Debug, Serialize)]
struct AdminReport {
    admin: Decision,
}

impl FormattedOutput for AdminReport {
    fn format_text(&self) -> String {
        format!("admin: {}", self.admin)
    }
}

impl AdminCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<Exit, CliError> {
        let authorizer = ctx.authorizer()?;
        let user = (!self.anonymous)
            .then(|| User::new(self.uid.as_str()).with_roles(self.roles.iter().cloned()));

        let admin = authorizer.is_admin(user.as_ref());
        print_output(ctx, &AdminReport { admin })?;
        Ok(admin.into())
    }
}
