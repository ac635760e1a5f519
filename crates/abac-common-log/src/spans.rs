//! Spans for authorization work.

use tracing::{info_span, Span};

/// Span around a single authorization check.
pub fn check_span(uid: Option<&str>, resource: &str, action: &str) -> Span {
    info_span!("check", uid = uid.unwrap_or("-"), resource = %resource, action = %action)
}

/// Span around loading a policy document.
pub fn policy_span(path: &str) -> Span {
    info_span!("policy", path = %path)
}

/// Span around a CLI command.
pub fn command_span(name: &'static str) -> Span {
    info_span!("command", command = name)
}
