//! Policy documents and environment configuration.
//!
//! A policy document is the YAML form of a permission matrix. Data-dependent
//! grants name a predicate from a [`PredicateCatalog`](crate::PredicateCatalog):
//!
//! ```yaml
//! admin_roles: [super, admin]
//! roles:
//!   user:
//!     comments:
//!       create: true
//!       view: { when: comment_not_blocked }
//! ```

pub mod env;
pub mod loader;
pub mod types;

pub use env::{vars, AuthorizerConfig};
pub use loader::{ConfigError, PolicyLoader};
pub use types::{GrantSpec, PolicyDocument, ResourceGrants, WhenGrant};
