//! The role → resource → action permission matrix.

use abac_types::{AbacError, Action, Grant, Predicate, Resource, Role, Violation};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::debug;

/// Grants held by a single role.
#[derive(Debug, Clone)]
pub struct RoleGrants {
    pub role: Role,
    grants: HashMap<Resource, HashMap<Action, Grant>>,
}

impl RoleGrants {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            grants: HashMap::new(),
        }
    }

    /// Attach `grant` to `(resource, action)`, replacing any earlier grant.
    pub fn with_grant(
        mut self,
        resource: Resource,
        action: Action,
        grant: impl Into<Grant>,
    ) -> Self {
        self.grants
            .entry(resource)
            .or_default()
            .insert(action, grant.into());
        self
    }

    pub fn with_permission(self, resource: Resource, action: Action) -> Self {
        self.with_grant(resource, action, Grant::Allow)
    }

    pub fn with_actions(self, resource: Resource, actions: &[Action]) -> Self {
        actions
            .iter()
            .fold(self, |grants, action| grants.with_permission(resource, *action))
    }

    /// Allow every action declared for `resource`.
    pub fn with_full_access(self, resource: Resource) -> Self {
        self.with_actions(resource, resource.actions())
    }

    pub fn with_predicate(self, resource: Resource, action: Action, predicate: Predicate) -> Self {
        self.with_grant(resource, action, predicate)
    }

    pub fn with_denial(self, resource: Resource, action: Action) -> Self {
        self.with_grant(resource, action, Grant::Deny)
    }

    pub fn grant(&self, resource: Resource, action: Action) -> Option<&Grant> {
        self.grants.get(&resource)?.get(&action)
    }

    /// Number of `(resource, action)` entries.
    pub fn len(&self) -> usize {
        self.grants.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn merge(&mut self, other: RoleGrants) {
        for (resource, actions) in other.grants {
            self.grants.entry(resource).or_default().extend(actions);
        }
    }

    fn iter(&self) -> impl Iterator<Item = (Resource, Action, &Grant)> + '_ {
        self.grants.iter().flat_map(|(resource, actions)| {
            actions
                .iter()
                .map(move |(action, grant)| (*resource, *action, grant))
        })
    }
}

/// One row of the matrix, as yielded by [`PermissionMatrix::entries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixEntry<'a> {
    pub role: Role,
    pub resource: Resource,
    pub action: Action,
    pub grant: &'a Grant,
}

/// Immutable `Role → Resource → Action → Grant` table.
///
/// Obtained from [`MatrixBuilder::build`], which refuses entries that do not
/// conform to the resource schema. A triple with no entry is not permitted.
#[derive(Debug, Clone, Default)]
pub struct PermissionMatrix {
    roles: HashMap<Role, RoleGrants>,
}

impl PermissionMatrix {
    pub fn builder() -> MatrixBuilder {
        MatrixBuilder::new()
    }

    pub fn grant(&self, role: Role, resource: Resource, action: Action) -> Option<&Grant> {
        self.roles.get(&role)?.grant(resource, action)
    }

    pub fn role(&self, role: Role) -> Option<&RoleGrants> {
        self.roles.get(&role)
    }

    /// Roles with at least one entry, sorted.
    pub fn roles(&self) -> Vec<Role> {
        let mut roles: Vec<Role> = self.roles.keys().copied().collect();
        roles.sort();
        roles
    }

    /// All entries sorted by role, resource and action.
    pub fn entries(&self) -> Vec<MatrixEntry<'_>> {
        let mut entries: Vec<MatrixEntry<'_>> = self
            .roles
            .values()
            .flat_map(|grants| {
                grants.iter().map(move |(resource, action, grant)| MatrixEntry {
                    role: grants.role,
                    resource,
                    action,
                    grant,
                })
            })
            .collect();
        entries.sort_by_key(|e| (e.role, e.resource, e.action));
        entries
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.roles.values().map(RoleGrants::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check every entry against the resource schema.
    pub fn validate(&self) -> Vec<Violation> {
        self.entries()
            .into_iter()
            .filter_map(|entry| {
                if !entry.resource.supports(entry.action) {
                    return Some(Violation::IllegalAction {
                        role: entry.role,
                        resource: entry.resource,
                        action: entry.action,
                    });
                }
                match entry.grant.predicate() {
                    Some(predicate) if predicate.resource() != entry.resource => {
                        Some(Violation::PredicateResourceMismatch {
                            role: entry.role,
                            resource: entry.resource,
                            action: entry.action,
                            predicate: predicate.name().to_string(),
                            predicate_resource: predicate.resource(),
                        })
                    }
                    _ => None,
                }
            })
            .collect()
    }
}

/// Collects role grants and produces a validated [`PermissionMatrix`].
#[derive(Debug, Default)]
pub struct MatrixBuilder {
    roles: HashMap<Role, RoleGrants>,
}

impl MatrixBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a role's grants.
    ///
    /// Adding the same role again merges the grants; a later grant for the
    /// same `(resource, action)` replaces the earlier one.
    pub fn role(mut self, grants: RoleGrants) -> Self {
        match self.roles.entry(grants.role) {
            Entry::Occupied(mut existing) => existing.get_mut().merge(grants),
            Entry::Vacant(slot) => {
                slot.insert(grants);
            }
        }
        self
    }

    /// Validate and freeze the matrix.
    pub fn build(self) -> Result<PermissionMatrix, AbacError> {
        let matrix = PermissionMatrix { roles: self.roles };
        let violations = matrix.validate();
        if !violations.is_empty() {
            return Err(AbacError::InvalidMatrix { violations });
        }

        debug!(
            roles = matrix.roles.len(),
            entries = matrix.len(),
            "Permission matrix built"
        );
        Ok(matrix)
    }
}
