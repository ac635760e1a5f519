//! Check command implementation.

use clap::Parser;
use serde::Serialize;

use auth_abac::{Action, Decision, Evaluation, Resource, ResourceData, User};

use crate::cli::CommandContext;
use crate::error::{CliError, Exit};
use crate::output::{print_output, FormattedOutput};

/// Evaluate an access decision
#[derive(Debug, Parser)]
pub struct CheckCommand {
    /// Resource to access
    #[arg(long)]
    pub resource: Resource,

    /// Action to perform
    #[arg(long)]
    pub action: Action,

    /// Identifier of the acting user
    #[arg(long, default_value = "cli")]
    pub uid: String,

    /// Role held by the user (repeatable, unknown names allowed)
    #[arg(long = "role", value_name = "ROLE")]
    pub roles: Vec<String>,

    /// User who has blocked the acting user (repeatable)
    #[arg(long = "blocked-by", value_name = "UID")]
    pub blocked_by: Vec<String>,

    /// Record to evaluate against, e.g. '{"resource":"blogs","addedBy":"u1"}'
    #[arg(long, value_name = "JSON")]
    pub data: Option<String>,

    /// Evaluate without an authenticated user
    #[arg(long, conflicts_with_all = ["roles", "blocked_by"])]
    pub anonymous: bool,

    /// Report the verdict of every role
    #[arg(long)]
    pub explain: bool,
}

const DATA_HINT: &str = r#"Records are JSON objects tagged with their resource, e.g. {"resource":"comments","addedBy":"u2"}"#;

#[derive(Debug, Serialize)]
struct CheckReport {
    resource: Resource,
    action: Action,
    decision: Decision,
}

impl FormattedOutput for CheckReport {
    fn format_text(&self) -> String {
        format!("{}/{}: {}", self.resource, self.action, self.decision)
    }
}

impl FormattedOutput for Evaluation {
    fn format_text(&self) -> String {
        let mut lines = vec![format!("{}/{}: {}", self.resource, self.action, self.decision)];
        if let Some(role) = &self.granted_by {
            lines.push(format!("granted by: {role}"));
        }
        lines.extend(
            self.roles
                .iter()
                .map(|outcome| format!("  {}: {}", outcome.role, outcome.verdict)),
        );
        lines.join("\n")
    }
}

impl CheckCommand {
    fn user(&self) -> Option<User> {
        if self.anonymous {
            return None;
        }
        let user = self
            .blocked_by
            .iter()
            .fold(User::new(self.uid.as_str()), |user, uid| user.blocked_by(uid.as_str()));
        Some(user.with_roles(self.roles.iter().cloned()))
    }

    fn data(&self) -> Result<Option<ResourceData>, CliError> {
        self.data
            .as_deref()
            .map(|json| {
                serde_json::from_str(json).map_err(|e| {
                    CliError::validation_with_hint(
                        format!("Invalid --data record: {e}"),
                        DATA_HINT,
                    )
                })
            })
            .transpose()
    }

    pub fn execute(&self, ctx: &CommandContext) -> Result<Exit, CliError> {
        let _span = abac_common_log::spans::check_span(
            (!self.anonymous).then_some(self.uid.as_str()),
            self.resource.as_ref(),
            self.action.as_ref(),
        )
        .entered();

        if !self.resource.supports(self.action) {
            let declared: Vec<String> =
                self.resource.actions().iter().map(ToString::to_string).collect();
            return Err(CliError::validation_with_hint(
                format!(
                    "action '{}' is not defined for resource '{}'",
                    self.action, self.resource
                ),
                format!("{} supports: {}", self.resource, declared.join(", ")),
            ));
        }

        let authorizer = ctx.authorizer()?;
        let user = self.user();
        let data = self.data()?;

        let decision = if self.explain {
            let evaluation =
                authorizer.explain(user.as_ref(), self.resource, self.action, data.as_ref());
            print_output(ctx, &evaluation)?;
            evaluation.decision
        } else {
            let decision = authorizer
                .check(user.as_ref(), self.resource, self.action, data.as_ref())
                .map_err(|e| CliError::validation(e.to_string()))?;
            print_output(
                ctx,
                &CheckReport {
                    resource: self.resource,
                    action: self.action,
                    decision,
                },
            )?;
            decision
        };

        Ok(decision.into())
    }
}
