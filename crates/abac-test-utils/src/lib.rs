//! Test utilities for the authorization crates.

use abac_types::{
    Action, Blog, Comment, IntoEnumIterator, Invoice, Loan, LoanStatus, Org, Payment, Resource,
    ResourceData, Role, Uid, User,
};
use proptest::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Creates a temporary directory that is cleaned up on drop.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Writes `content` to `policy.yaml` in a fresh temporary directory.
pub fn policy_file(content: &str) -> (TempDir, PathBuf) {
    let dir = temp_dir();
    let path = dir.path().join("policy.yaml");
    std::fs::write(&path, content).expect("Failed to write policy file");
    (dir, path)
}

/// A user holding the given raw role names.
pub fn user(uid: &str, roles: &[&str]) -> User {
    User::new(uid).with_roles(roles.iter().copied())
}

pub fn blog(added_by: &str, completed: bool) -> ResourceData {
    Blog {
        id: "b1".to_string(),
        added_by: added_by.into(),
        completed,
    }
    .into()
}

pub fn comment(added_by: &str) -> ResourceData {
    Comment {
        id: "c1".to_string(),
        added_by: added_by.into(),
    }
    .into()
}

pub fn org(owner: &str, members: &[&str]) -> ResourceData {
    Org {
        id: "o1".to_string(),
        owner_id: owner.into(),
        members: members.iter().copied().map(Uid::from).collect(),
    }
    .into()
}

pub fn loan(applicant: &str, assigned_to: Option<&str>, status: LoanStatus) -> ResourceData {
    Loan {
        id: "l1".to_string(),
        applicant_id: applicant.into(),
        assigned_to: assigned_to.map(Uid::from),
        status,
    }
    .into()
}

pub fn payment(payer: &str, collected_by: Option<&str>) -> ResourceData {
    Payment {
        id: "p1".to_string(),
        loan_id: "l1".to_string(),
        payer_id: payer.into(),
        collected_by: collected_by.map(Uid::from),
    }
    .into()
}

pub fn invoice(added_by: &str, billed_to: &str) -> ResourceData {
    Invoice {
        id: "i1".to_string(),
        added_by: added_by.into(),
        billed_to: billed_to.into(),
    }
    .into()
}

/// Any role.
pub fn arb_role() -> impl Strategy<Value = Role> {
    proptest::sample::select(Role::iter().collect::<Vec<_>>())
}

/// Any declared `(resource, action)` pair.
pub fn arb_pair() -> impl Strategy<Value = (Resource, Action)> {
    proptest::sample::select(Resource::pairs().collect::<Vec<_>>())
}

/// A user id from the small pool shared by [`arb_data`] and [`arb_subject`].
pub fn arb_uid() -> impl Strategy<Value = &'static str> {
    proptest::sample::select(vec!["u1", "u2", "u3"])
}

pub fn arb_loan_status() -> impl Strategy<Value = LoanStatus> {
    proptest::sample::select(vec![
        LoanStatus::Draft,
        LoanStatus::Submitted,
        LoanStatus::Approved,
        LoanStatus::Rejected,
        LoanStatus::Disbursed,
        LoanStatus::Closed,
    ])
}

/// An optional record of any resource, with ids drawn from a small pool so
/// that ownership checks both hold and fail.
pub fn arb_data() -> impl Strategy<Value = Option<ResourceData>> {
    let uid = arb_uid;
    proptest::option::of(prop_oneof![
        (uid(), any::<bool>()).prop_map(|(by, completed)| blog(by, completed)),
        uid().prop_map(comment),
        (uid(), uid()).prop_map(|(by, to)| invoice(by, to)),
        (uid(), proptest::option::of(uid()))
            .prop_map(|(payer, collector)| payment(payer, collector)),
        (uid(), proptest::option::of(uid()), arb_loan_status())
            .prop_map(|(applicant, assigned, status)| loan(applicant, assigned, status)),
        (uid(), proptest::collection::vec(uid(), 0..3))
            .prop_map(|(owner, members)| org(owner, &members)),
    ])
}

/// A user from the id pool, blocked by some of the other ids. Roles are left
/// to the caller.
pub fn arb_subject() -> impl Strategy<Value = User> {
    (arb_uid(), proptest::collection::vec(arb_uid(), 0..3)).prop_map(|(uid, blockers)| {
        blockers
            .into_iter()
            .fold(User::new(uid), |user, blocker| user.blocked_by(blocker))
    })
}

/// Assert that a Result is Ok and return the value.
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a Result is Err and return the error.
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
