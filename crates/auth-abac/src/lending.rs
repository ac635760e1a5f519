//! Built-in policy of the lending platform.
//!
//! | role             | summary                                                      |
//! |------------------|--------------------------------------------------------------|
//! | `super`          | everything                                                   |
//! | `admin`          | everything except deleting users                             |
//! | `subAdmin`       | back office: loans, payments, invoices, content moderation   |
//! | `representative` | originates loans and handles those assigned to them          |
//! | `manager`        | runs organisations and their ledgers                         |
//! | `subManager`     | assists in organisations they belong to                      |
//! | `user`           | borrowers: own loans, payments, invoices and content         |
//! | `driver`         | field collection of payments                                 |

use crate::authorizer::Authorizer;
use crate::matrix::{MatrixBuilder, PermissionMatrix, RoleGrants};
use crate::predicates::grant;
use crate::registry::RoleRegistry;
use abac_types::{AbacError, Action, IntoEnumIterator, Resource, Role};

use Action::{Create, Delete, Print, Share, Update, View};
use Resource::{Blogs, Comments, Dashboard, Invoices, Loans, Orgs, Payments, Users};

/// Roles that pass the coarse admin gate.
pub const ADMIN_ROLES: [Role; 3] = [Role::Super, Role::Admin, Role::SubAdmin];

/// Build and validate the lending permission matrix.
pub fn matrix() -> Result<PermissionMatrix, AbacError> {
    MatrixBuilder::new()
        .role(super_admin())
        .role(admin())
        .role(sub_admin())
        .role(representative())
        .role(manager())
        .role(sub_manager())
        .role(user())
        .role(driver())
        .build()
}

pub fn registry() -> RoleRegistry {
    RoleRegistry::new(ADMIN_ROLES)
}

/// Authorizer over the built-in matrix with the default invalid pair policy.
pub fn authorizer() -> Result<Authorizer, AbacError> {
    Ok(Authorizer::new(matrix()?, registry()))
}

fn super_admin() -> RoleGrants {
    Resource::iter().fold(RoleGrants::new(Role::Super), RoleGrants::with_full_access)
}

fn admin() -> RoleGrants {
    Resource::iter()
        .filter(|resource| *resource != Users)
        .fold(RoleGrants::new(Role::Admin), RoleGrants::with_full_access)
        .with_actions(Users, &[View, Create, Update])
}

fn sub_admin() -> RoleGrants {
    RoleGrants::new(Role::SubAdmin)
        .with_permission(Dashboard, View)
        .with_permission(Users, View)
        .with_actions(Orgs, &[View, Update])
        .with_actions(Loans, &[View, Update, Print])
        .with_actions(Payments, &[View, Print])
        .with_actions(Invoices, &[View, Share, Print])
        .with_full_access(Blogs)
        .with_full_access(Comments)
}

fn representative() -> RoleGrants {
    RoleGrants::new(Role::Representative)
        .with_permission(Dashboard, View)
        .with_permission(Users, View)
        .with_permission(Loans, Create)
        .with_predicate(Loans, View, grant::assigned_loan())
        .with_predicate(Loans, Print, grant::assigned_loan())
        .with_predicate(Loans, Update, grant::assigned_pending_loan())
        .with_actions(Payments, &[View, Create])
        .with_actions(Invoices, &[View, Create, Print])
        .with_predicate(Comments, View, grant::comment_not_blocked())
        .with_permission(Comments, Create)
}

fn manager() -> RoleGrants {
    RoleGrants::new(Role::Manager)
        .with_permission(Dashboard, View)
        .with_permission(Users, View)
        .with_full_access(Orgs)
        .with_actions(Loans, &[View, Update, Print])
        .with_actions(Payments, &[View, Print])
        .with_actions(Invoices, &[View, Create, Update, Share, Print])
        .with_actions(Blogs, &[View, Create])
        .with_predicate(Blogs, Update, grant::own_blog())
        .with_predicate(Blogs, Delete, grant::own_blog())
        .with_actions(Comments, &[View, Create])
        .with_predicate(Comments, Update, grant::own_comment())
        .with_predicate(Comments, Delete, grant::own_comment())
}

fn sub_manager() -> RoleGrants {
    RoleGrants::new(Role::SubManager)
        .with_permission(Dashboard, View)
        .with_predicate(Orgs, View, grant::org_member())
        .with_predicate(Orgs, Update, grant::org_member())
        .with_actions(Loans, &[View, Print])
        .with_permission(Payments, View)
        .with_actions(Invoices, &[View, Create, Print])
        .with_predicate(Comments, View, grant::comment_not_blocked())
        .with_permission(Comments, Create)
}

fn user() -> RoleGrants {
    RoleGrants::new(Role::User)
        .with_denial(Dashboard, View)
        .with_predicate(Orgs, View, grant::org_member())
        .with_predicate(Loans, View, grant::own_loan())
        .with_predicate(Loans, Print, grant::own_loan())
        .with_permission(Loans, Create)
        .with_predicate(Loans, Update, grant::own_draft_loan())
        .with_predicate(Loans, Delete, grant::own_draft_loan())
        .with_predicate(Payments, View, grant::own_payment())
        .with_predicate(Payments, Print, grant::own_payment())
        .with_permission(Payments, Create)
        .with_predicate(Invoices, View, grant::billed_invoice())
        .with_predicate(Invoices, Print, grant::billed_invoice())
        .with_predicate(Invoices, Share, grant::billed_invoice())
        .with_predicate(Blogs, View, grant::blog_not_blocked())
        .with_permission(Blogs, Create)
        .with_predicate(Blogs, Update, grant::own_blog())
        .with_predicate(Blogs, Delete, grant::own_completed_blog())
        .with_predicate(Comments, View, grant::comment_not_blocked())
        .with_permission(Comments, Create)
        .with_predicate(Comments, Update, grant::own_comment())
        .with_predicate(Comments, Delete, grant::own_comment())
}

fn driver() -> RoleGrants {
    RoleGrants::new(Role::Driver)
        .with_predicate(Payments, View, grant::collected_payment())
        .with_predicate(Payments, Update, grant::collected_payment())
        .with_predicate(Payments, Print, grant::collected_payment())
        .with_permission(Payments, Create)
        .with_predicate(Loans, View, grant::assigned_loan())
}

#[cfg(test)]
mod tests {
    use super::*;
    use abac_types::Grant;

    #[test]
    fn test_matrix_is_valid() {
        let matrix = matrix().unwrap();
        assert!(matrix.validate().is_empty());
        assert_eq!(matrix.roles().len(), 8);
    }

    #[test]
    fn test_super_has_every_pair() {
        let matrix = matrix().unwrap();
        for (resource, action) in Resource::pairs() {
            assert_eq!(
                matrix.grant(Role::Super, resource, action),
                Some(&Grant::Allow),
                "{resource}/{action}"
            );
        }
    }

    #[test]
    fn test_admin_cannot_delete_users() {
        let matrix = matrix().unwrap();
        assert!(matrix.grant(Role::Admin, Users, Delete).is_none());
        assert_eq!(matrix.grant(Role::Admin, Invoices, Share), Some(&Grant::Allow));
    }

    #[test]
    fn test_required_entries() {
        let matrix = matrix().unwrap();
        assert_eq!(matrix.grant(Role::User, Comments, Create), Some(&Grant::Allow));
        assert_eq!(
            matrix.grant(Role::User, Comments, View),
            Some(&Grant::Predicate(grant::comment_not_blocked()))
        );
        assert_eq!(
            matrix.grant(Role::User, Blogs, Delete),
            Some(&Grant::Predicate(grant::own_completed_blog()))
        );
        assert_eq!(matrix.grant(Role::Manager, Orgs, Delete), Some(&Grant::Allow));
        assert_eq!(matrix.grant(Role::User, Dashboard, View), Some(&Grant::Deny));
    }

    #[test]
    fn test_driver_has_no_invoice_entries() {
        let matrix = matrix().unwrap();
        for action in Invoices.actions() {
            assert!(matrix.grant(Role::Driver, Invoices, *action).is_none());
        }
    }

    #[test]
    fn test_admin_set() {
        let registry = registry();
        assert_eq!(registry.admin_roles(), ADMIN_ROLES.to_vec());
        assert!(!registry.is_admin_role(Role::Manager));
    }
}
