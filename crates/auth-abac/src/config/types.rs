//! Policy document types.

use super::loader::ConfigError;
use crate::authorizer::{Authorizer, InvalidPairPolicy};
use crate::catalog::PredicateCatalog;
use crate::matrix::{MatrixBuilder, PermissionMatrix, RoleGrants};
use crate::registry::RoleRegistry;
use abac_types::{Action, Grant, Resource, Role};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Grant as written in a policy document.
///
/// `true` allows, `false` denies, `{ when: <name> }` refers to a predicate in
/// the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GrantSpec {
    Static(bool),
    When(WhenGrant),
}

/// The `{ when: <name> }` form of a grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WhenGrant {
    pub when: String,
}

impl GrantSpec {
    pub fn when(name: impl Into<String>) -> Self {
        Self::When(WhenGrant { when: name.into() })
    }

    /// Resolve against `catalog`; an unknown predicate name is returned as the error.
    fn resolve(&self, catalog: &PredicateCatalog) -> Result<Grant, &str> {
        match self {
            Self::Static(allowed) => Ok(Grant::from(*allowed)),
            Self::When(WhenGrant { when }) => catalog
                .get(when)
                .cloned()
                .map(Grant::Predicate)
                .ok_or(when.as_str()),
        }
    }
}

impl From<&Grant> for GrantSpec {
    fn from(grant: &Grant) -> Self {
        match grant {
            Grant::Allow => Self::Static(true),
            Grant::Deny => Self::Static(false),
            Grant::Predicate(predicate) => Self::when(predicate.name()),
        }
    }
}

pub type ResourceGrants = BTreeMap<Resource, BTreeMap<Action, GrantSpec>>;

/// A permission matrix in serializable form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyDocument {
    /// Roles that pass the coarse admin gate.
    #[serde(default)]
    pub admin_roles: Vec<Role>,

    #[serde(default)]
    pub roles: BTreeMap<Role, ResourceGrants>,
}

impl PolicyDocument {
    /// Capture an existing matrix and admin set.
    pub fn from_matrix(matrix: &PermissionMatrix, registry: &RoleRegistry) -> Self {
        let mut roles: BTreeMap<Role, ResourceGrants> = BTreeMap::new();
        for entry in matrix.entries() {
            roles
                .entry(entry.role)
                .or_default()
                .entry(entry.resource)
                .or_default()
                .insert(entry.action, GrantSpec::from(entry.grant));
        }
        Self {
            admin_roles: registry.admin_roles(),
            roles,
        }
    }

    /// Resolve predicate names against `catalog` and build the matrix.
    pub fn build_matrix(
        &self,
        catalog: &PredicateCatalog,
    ) -> Result<PermissionMatrix, ConfigError> {
        let mut builder = MatrixBuilder::new();
        for (role, resources) in &self.roles {
            let mut grants = RoleGrants::new(*role);
            for (resource, actions) in resources {
                for (action, spec) in actions {
                    let grant = spec.resolve(catalog).map_err(|name| ConfigError::UnknownPredicate {
                        role: *role,
                        resource: *resource,
                        action: *action,
                        name: name.to_string(),
                    })?;
                    grants = grants.with_grant(*resource, *action, grant);
                }
            }
            builder = builder.role(grants);
        }
        Ok(builder.build()?)
    }

    pub fn registry(&self) -> RoleRegistry {
        RoleRegistry::new(self.admin_roles.iter().copied())
    }

    /// Check the document without keeping the result.
    pub fn validate(&self, catalog: &PredicateCatalog) -> Result<(), ConfigError> {
        self.ensure_roles()?;
        self.build_matrix(catalog).map(|_| ())
    }

    /// Validate and build the authorizer in one pass.
    pub fn into_authorizer(
        self,
        catalog: &PredicateCatalog,
        invalid_pair: InvalidPairPolicy,
    ) -> Result<Authorizer, ConfigError> {
        self.ensure_roles()?;
        let matrix = self.build_matrix(catalog)?;
        Ok(Authorizer::new(matrix, self.registry()).with_invalid_pair_policy(invalid_pair))
    }

    fn ensure_roles(&self) -> Result<(), ConfigError> {
        if self.roles.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "policy defines no roles".to_string(),
            });
        }
        Ok(())
    }
}
