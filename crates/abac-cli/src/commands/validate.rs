//! Validate command implementation.

use clap::Parser;
use serde::Serialize;

use auth_abac::{ConfigError, Role};

use crate::cli::CommandContext;
use crate::error::{CliError, Exit};
use crate::output::{print_output, FormattedOutput};

/// Load the policy and report schema violations
#[derive(Debug, Parser)]
pub struct ValidateCommand {}

#[derive(Debug, Serialize)]
struct ValidationReport {
    source: String,
    valid: bool,
    roles: usize,
    entries: usize,
    admin_roles: Vec<Role>,
    violations: Vec<String>,
}

impl FormattedOutput for ValidationReport {
    fn format_text(&self) -> String {
        if self.valid {
            let admins: Vec<String> = self.admin_roles.iter().map(ToString::to_string).collect();
            format!(
                "{}: OK ({} roles, {} entries, admin roles: {})",
                self.source,
                self.roles,
                self.entries,
                if admins.is_empty() { "none".to_string() } else { admins.join(", ") }
            )
        } else {
            let mut lines = vec![format!(
                "{}: {} violation(s)",
                self.source,
                self.violations.len()
            )];
            lines.extend(self.violations.iter().map(|v| format!("  - {v}")));
            lines.join("\n")
        }
    }
}

impl ValidateCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<Exit, CliError> {
        let _span = abac_common_log::spans::policy_span(&ctx.source()).entered();

        let report = match ctx.config.build() {
            Ok(authorizer) => ValidationReport {
                source: ctx.source(),
                valid: true,
                roles: authorizer.matrix().roles().len(),
                entries: authorizer.matrix().len(),
                admin_roles: authorizer.registry().admin_roles(),
                violations: Vec::new(),
            },
            Err(ConfigError::Schema { violations }) => ValidationReport {
                source: ctx.source(),
                valid: false,
                roles: 0,
                entries: 0,
                admin_roles: Vec::new(),
                violations: violations.iter().map(ToString::to_string).collect(),
            },
            Err(other) => return Err(other.into()),
        };

        print_output(ctx, &report)?;
        Ok(if report.valid {
            Exit::Success
        } else {
            Exit::ValidationError
        })
    }
}
