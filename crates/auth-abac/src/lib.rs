//! Attribute-based authorization for the lending platform.
//!
//! Access is decided from a [`PermissionMatrix`] mapping
//! `Role → Resource → Action → Grant`. A grant is static (`Allow`/`Deny`) or a
//! named [`Predicate`] over the user and the record being accessed. A user
//! holding several roles is granted access if any one of them grants it.
//!
//! ```
//! use auth_abac::{lending, Action, Blog, Decision, Resource, ResourceData, User};
//!
//! let authz = lending::authorizer().unwrap();
//! let user = User::new("u1").with_role("user");
//! let draft = ResourceData::from(Blog {
//!     id: "b1".into(),
//!     added_by: "u1".into(),
//!     completed: false,
//! });
//!
//! assert_eq!(
//!     authz.has_permission(Some(&user), Resource::Comments, Action::Create, None),
//!     Decision::Granted
//! );
//! assert_eq!(
//!     authz.has_permission(Some(&user), Resource::Blogs, Action::Delete, Some(&draft)),
//!     Decision::Denied
//! );
//! assert_eq!(authz.is_admin(None), Decision::NoPrincipal);
//! ```

pub mod authorizer;
pub mod catalog;
pub mod config;
mod guard;
pub mod handle;
pub mod lending;
pub mod matrix;
pub mod predicates;
pub mod registry;

pub use authorizer::{Authorizer, Evaluation, InvalidPairPolicy, RoleOutcome, RoleVerdict};
pub use catalog::PredicateCatalog;
pub use config::{AuthorizerConfig, ConfigError, PolicyDocument, PolicyLoader};
pub use handle::AuthorizerHandle;
pub use matrix::{MatrixBuilder, MatrixEntry, PermissionMatrix, RoleGrants};
pub use registry::RoleRegistry;

pub use abac_types::{
    AbacError, Action, Blog, Comment, Decision, Grant, Invoice, Loan, LoanStatus, Org, Payment,
    Predicate, Resource, ResourceData, ResourceRecord, Role, Uid, User, Violation,
};
