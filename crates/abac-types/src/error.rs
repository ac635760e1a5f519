//! Error types for schema and configuration failures.

use crate::{Action, Resource, Role};
use thiserror::Error;

/// A single permission matrix entry that does not conform to the schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("{role}: action '{action}' is not defined for resource '{resource}'")]
    IllegalAction {
        role: Role,
        resource: Resource,
        action: Action,
    },

    #[error(
        "{role}: predicate '{predicate}' on {resource}/{action} reads {predicate_resource} records"
    )]
    PredicateResourceMismatch {
        role: Role,
        resource: Resource,
        action: Action,
        predicate: String,
        predicate_resource: Resource,
    },
}

/// Authorization engine errors.
///
/// None of these are produced by ordinary denials; they signal a broken
/// configuration or a caller passing an undeclared `(resource, action)` pair.
#[derive(Debug, Error)]
pub enum AbacError {
    #[error("action '{action}' is not defined for resource '{resource}'")]
    IllegalAction { resource: Resource, action: Action },

    #[error("invalid permission matrix: {}", join(.violations))]
    InvalidMatrix { violations: Vec<Violation> },
}

impl AbacError {
    /// Schema violations carried by this error, if any.
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::InvalidMatrix { violations } => violations,
            _ => &[],
        }
    }
}

fn join(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
