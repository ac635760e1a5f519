//! Core types for the lending platform authorization engine.
//!
//! This crate declares the closed schema the permission matrix is checked
//! against, and the values that flow through an authorization check:
//!
//! - [`Resource`] and [`Action`]: what is protected and what can be done to it.
//!   The legal actions are declared per resource ([`Resource::actions`]).
//! - [`Role`]: flat role identifiers, with no ordering or inheritance.
//! - [`User`]: the authenticated principal as handed over by the identity layer.
//! - [`ResourceData`]: the record a data-dependent grant is evaluated against.
//! - [`Grant`]: `Allow`, `Deny` or a named [`Predicate`].
//! - [`Decision`]: `Granted`, `Denied` or `NoPrincipal`.
//!
//! Evaluation lives in `auth-abac`.

mod decision;
mod error;
mod grant;
mod record;
mod resource;
mod role;
mod user;

pub use decision::Decision;
pub use error::{AbacError, Violation};
pub use grant::{Grant, Predicate};
pub use record::{
    Blog, Comment, Invoice, Loan, LoanStatus, Org, Payment, ResourceData, ResourceRecord,
};
pub use resource::{Action, Resource};
pub use role::Role;
pub use user::{Uid, User};

/// Re-exported so callers can enumerate roles, resources and actions.
pub use strum::IntoEnumIterator;
