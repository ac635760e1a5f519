//! The evaluator: `has_permission` and `is_admin`.

use crate::guard::catch_panic;
use crate::matrix::PermissionMatrix;
use crate::registry::RoleRegistry;
use abac_types::{
    AbacError, Action, Decision, Grant, Predicate, Resource, ResourceData, Role, User,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumString};
use tracing::{debug, error, trace, warn};

/// What to do when a caller asks about an action the resource does not declare.
///
/// Such a call is a programming error. `Panic` surfaces it immediately;
/// `Deny` logs it at `error` and refuses access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum InvalidPairPolicy {
    Panic,
    Deny,
}

impl Default for InvalidPairPolicy {
    /// `Panic` in debug builds, `Deny` in release builds.
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::Panic
        } else {
            Self::Deny
        }
    }
}

/// How one of the user's roles answered a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum RoleVerdict {
    /// The name does not match any known role.
    UnknownRole,
    /// The role has no entry for this resource and action.
    NoGrant,
    Allowed,
    Denied,
    PredicateHeld { predicate: &'static str },
    PredicateFailed { predicate: &'static str },
    /// A predicate grant was selected but no record was supplied.
    MissingData { predicate: &'static str },
    /// The supplied record belongs to another resource.
    DataMismatch {
        predicate: &'static str,
        expected: Resource,
        actual: Resource,
    },
    PredicatePanicked {
        predicate: &'static str,
        message: String,
    },
}

impl RoleVerdict {
    pub fn grants(&self) -> bool {
        matches!(self, Self::Allowed | Self::PredicateHeld { .. })
    }
}

impl fmt::Display for RoleVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownRole => f.write_str("unknown role"),
            Self::NoGrant => f.write_str("no grant"),
            Self::Allowed => f.write_str("allowed"),
            Self::Denied => f.write_str("denied"),
            Self::PredicateHeld { predicate } => write!(f, "{predicate} held"),
            Self::PredicateFailed { predicate } => write!(f, "{predicate} failed"),
            Self::MissingData { predicate } => write!(f, "{predicate} needs a record"),
            Self::DataMismatch {
                predicate,
                expected,
                actual,
            } => write!(f, "{predicate} reads {expected} records, got {actual}"),
            Self::PredicatePanicked { predicate, message } => {
                write!(f, "{predicate} panicked: {message}")
            }
        }
    }
}

/// Verdict of a single role, as reported by [`Authorizer::explain`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleOutcome {
    pub role: String,
    #[serde(flatten)]
    pub verdict: RoleVerdict,
}

/// Full account of an authorization check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub resource: Resource,
    pub action: Action,
    pub decision: Decision,
    /// First role (in the user's order) that granted access.
    pub granted_by: Option<String>,
    pub roles: Vec<RoleOutcome>,
}

/// Authorization evaluator over an immutable matrix and role registry.
///
/// Holds no mutable state; share it behind an `Arc` and call it from any
/// number of threads.
#[derive(Debug, Clone)]
pub struct Authorizer {
    matrix: PermissionMatrix,
    registry: RoleRegistry,
    invalid_pair: InvalidPairPolicy,
}

impl Authorizer {
    pub fn new(matrix: PermissionMatrix, registry: RoleRegistry) -> Self {
        Self {
            matrix,
            registry,
            invalid_pair: InvalidPairPolicy::default(),
        }
    }

    pub fn with_invalid_pair_policy(mut self, policy: InvalidPairPolicy) -> Self {
        self.invalid_pair = policy;
        self
    }

    pub fn matrix(&self) -> &PermissionMatrix {
        &self.matrix
    }

    pub fn registry(&self) -> &RoleRegistry {
        &self.registry
    }

    pub fn invalid_pair_policy(&self) -> InvalidPairPolicy {
        self.invalid_pair
    }

    /// Decide whether `user` may perform `action` on `resource`.
    ///
    /// Access is granted if any of the user's roles grants it. `data` is only
    /// read by predicate grants; a predicate grant without data does not
    /// grant. An absent user yields [`Decision::NoPrincipal`].
    ///
    /// # Panics
    ///
    /// If `action` is not declared for `resource` and the invalid pair policy
    /// is [`InvalidPairPolicy::Panic`].
    pub fn has_permission(
        &self,
        user: Option<&User>,
        resource: Resource,
        action: Action,
        data: Option<&ResourceData>,
    ) -> Decision {
        if !resource.supports(action) {
            return self.illegal_pair(resource, action);
        }
        let Some(user) = user else {
            return Decision::NoPrincipal;
        };

        for name in &user.roles {
            if self.role_verdict(user, name, resource, action, data).grants() {
                trace!(
                    uid = %user.uid,
                    role = %name,
                    resource = %resource,
                    action = %action,
                    "Authorization granted"
                );
                return Decision::Granted;
            }
        }

        debug!(
            uid = %user.uid,
            roles = ?user.roles,
            resource = %resource,
            action = %action,
            "Authorization denied"
        );
        Decision::Denied
    }

    /// Like [`has_permission`](Self::has_permission), but reports an
    /// undeclared `(resource, action)` pair as an error instead of applying
    /// the invalid pair policy.
    pub fn check(
        &self,
        user: Option<&User>,
        resource: Resource,
        action: Action,
        data: Option<&ResourceData>,
    ) -> Result<Decision, AbacError> {
        if !resource.supports(action) {
            return Err(AbacError::IllegalAction { resource, action });
        }
        Ok(self.has_permission(user, resource, action, data))
    }

    /// Evaluate every role without short-circuiting and report each verdict.
    ///
    /// # Panics
    ///
    /// Same as [`has_permission`](Self::has_permission).
    pub fn explain(
        &self,
        user: Option<&User>,
        resource: Resource,
        action: Action,
        data: Option<&ResourceData>,
    ) -> Evaluation {
        let mut evaluation = Evaluation {
            resource,
            action,
            decision: Decision::Denied,
            granted_by: None,
            roles: Vec::new(),
        };

        if !resource.supports(action) {
            evaluation.decision = self.illegal_pair(resource, action);
            return evaluation;
        }
        let Some(user) = user else {
            evaluation.decision = Decision::NoPrincipal;
            return evaluation;
        };

        for name in &user.roles {
            let verdict = self.role_verdict(user, name, resource, action, data);
            if verdict.grants() && evaluation.granted_by.is_none() {
                evaluation.granted_by = Some(name.clone());
                evaluation.decision = Decision::Granted;
            }
            evaluation.roles.push(RoleOutcome {
                role: name.clone(),
                verdict,
            });
        }
        evaluation
    }

    /// Coarse gate: does any of the user's roles belong to the admin set?
    ///
    /// Ignores the permission matrix entirely.
    pub fn is_admin(&self, user: Option<&User>) -> Decision {
        let Some(user) = user else {
            return Decision::NoPrincipal;
        };

        for name in &user.roles {
            if let Some(role) = self.registry.resolve(name) {
                if self.registry.is_admin_role(role) {
                    return Decision::Granted;
                }
            }
        }
        Decision::Denied
    }

    fn role_verdict(
        &self,
        user: &User,
        name: &str,
        resource: Resource,
        action: Action,
        data: Option<&ResourceData>,
    ) -> RoleVerdict {
        let Some(role) = self.registry.resolve(name) else {
            debug!(uid = %user.uid, role = %name, "Ignoring unknown role");
            return RoleVerdict::UnknownRole;
        };

        match self.matrix.grant(role, resource, action) {
            None => RoleVerdict::NoGrant,
            Some(Grant::Allow) => RoleVerdict::Allowed,
            Some(Grant::Deny) => RoleVerdict::Denied,
            Some(Grant::Predicate(predicate)) => {
                run_predicate(predicate, role, user, resource, action, data)
            }
        }
    }

    fn illegal_pair(&self, resource: Resource, action: Action) -> Decision {
        let err = AbacError::IllegalAction { resource, action };
        match self.invalid_pair {
            InvalidPairPolicy::Panic => panic!("authorization check misuse: {err}"),
            InvalidPairPolicy::Deny => {
                error!(resource = %resource, action = %action, "Authorization check misuse: {err}");
                Decision::Denied
            }
        }
    }
}

fn run_predicate(
    predicate: &Predicate,
    role: Role,
    user: &User,
    resource: Resource,
    action: Action,
    data: Option<&ResourceData>,
) -> RoleVerdict {
    let name = predicate.name();
    let Some(data) = data else {
        debug!(
            role = %role,
            resource = %resource,
            action = %action,
            predicate = name,
            "Predicate grant without data"
        );
        return RoleVerdict::MissingData { predicate: name };
    };

    match catch_panic(|| predicate.evaluate(user, data)) {
        Ok(Some(true)) => RoleVerdict::PredicateHeld { predicate: name },
        Ok(Some(false)) => RoleVerdict::PredicateFailed { predicate: name },
        Ok(None) => {
            warn!(
                role = %role,
                resource = %resource,
                action = %action,
                predicate = name,
                data = %data.resource(),
                "Predicate received a record of another resource"
            );
            RoleVerdict::DataMismatch {
                predicate: name,
                expected: predicate.resource(),
                actual: data.resource(),
            }
        }
        Err(message) => {
            error!(
                uid = %user.uid,
                role = %role,
                resource = %resource,
                action = %action,
                predicate = name,
                panic = %message,
                "Predicate panicked, treating as denied"
            );
            RoleVerdict::PredicatePanicked {
                predicate: name,
                message,
            }
        }
    }
}
