//! Known roles and the administrative subset.

use abac_types::{IntoEnumIterator, Role};
use std::collections::HashSet;

/// Role registry.
///
/// Resolves raw role names handed over by the identity layer and answers the
/// coarse "is this an administrative role" question, independently of what
/// the permission matrix grants.
#[derive(Debug, Clone)]
pub struct RoleRegistry {
    admin_roles: HashSet<Role>,
}

impl RoleRegistry {
    pub fn new(admin_roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            admin_roles: admin_roles.into_iter().collect(),
        }
    }

    /// Resolve a raw role name. Unknown names yield `None`.
    pub fn resolve(&self, name: &str) -> Option<Role> {
        name.parse().ok()
    }

    pub fn is_admin_role(&self, role: Role) -> bool {
        self.admin_roles.contains(&role)
    }

    /// Administrative roles, sorted.
    pub fn admin_roles(&self) -> Vec<Role> {
        let mut roles: Vec<Role> = self.admin_roles.iter().copied().collect();
        roles.sort();
        roles
    }

    pub fn known_roles(&self) -> impl Iterator<Item = Role> {
        Role::iter()
    }
}
