//! Data-dependent rules used by the lending policy.
//!
//! Each rule is a plain function over the user and one record type. The
//! [`grant`] module wraps every rule into a named [`Predicate`], and
//! [`catalog`] collects them so policy documents can refer to them by name.

use crate::catalog::PredicateCatalog;
use abac_types::{Blog, Comment, Invoice, Loan, LoanStatus, Org, Payment, Predicate, User};

/// The comment's author has not blocked the user.
pub fn comment_not_blocked(user: &User, comment: &Comment) -> bool {
    !user.is_blocked_by(&comment.added_by)
}

pub fn own_comment(user: &User, comment: &Comment) -> bool {
    comment.added_by == user.uid
}

/// The blog's author has not blocked the user.
pub fn blog_not_blocked(user: &User, blog: &Blog) -> bool {
    !user.is_blocked_by(&blog.added_by)
}

pub fn own_blog(user: &User, blog: &Blog) -> bool {
    blog.added_by == user.uid
}

/// Authors may only remove blogs they have marked completed.
pub fn own_completed_blog(user: &User, blog: &Blog) -> bool {
    own_blog(user, blog) && blog.completed
}

pub fn own_invoice(user: &User, invoice: &Invoice) -> bool {
    invoice.added_by == user.uid
}

pub fn billed_invoice(user: &User, invoice: &Invoice) -> bool {
    invoice.billed_to == user.uid
}

/// Owner or listed member.
pub fn org_member(user: &User, org: &Org) -> bool {
    org_owner(user, org) || org.members.contains(&user.uid)
}

pub fn org_owner(user: &User, org: &Org) -> bool {
    org.owner_id == user.uid
}

pub fn own_loan(user: &User, loan: &Loan) -> bool {
    loan.applicant_id == user.uid
}

/// Applicants may edit or withdraw an application until it is submitted.
pub fn own_draft_loan(user: &User, loan: &Loan) -> bool {
    own_loan(user, loan) && loan.status == LoanStatus::Draft
}

pub fn assigned_loan(user: &User, loan: &Loan) -> bool {
    loan.assigned_to.as_ref() == Some(&user.uid)
}

/// Assigned and still awaiting a decision.
pub fn assigned_pending_loan(user: &User, loan: &Loan) -> bool {
    assigned_loan(user, loan) && matches!(loan.status, LoanStatus::Draft | LoanStatus::Submitted)
}

pub fn own_payment(user: &User, payment: &Payment) -> bool {
    payment.payer_id == user.uid
}

pub fn collected_payment(user: &User, payment: &Payment) -> bool {
    payment.collected_by.as_ref() == Some(&user.uid)
}

macro_rules! named_predicates {
    ($($name:ident: $record:ty),* $(,)?) => {
        /// Constructors for the named predicates, one per rule.
        pub mod grant {
            use super::*;

            $(
                pub fn $name() -> Predicate {
                    Predicate::new::<$record>(stringify!($name), super::$name)
                }
            )*
        }

        /// Every named predicate.
        pub fn catalog() -> PredicateCatalog {
            PredicateCatalog::new()$(.with(grant::$name()))*
        }
    };
}

named_predicates! {
    comment_not_blocked: Comment,
    own_comment: Comment,
    blog_not_blocked: Blog,
    own_blog: Blog,
    own_completed_blog: Blog,
    own_invoice: Invoice,
    billed_invoice: Invoice,
    org_member: Org,
    org_owner: Org,
    own_loan: Loan,
    own_draft_loan: Loan,
    assigned_loan: Loan,
    assigned_pending_loan: Loan,
    own_payment: Payment,
    collected_payment: Payment,
}

#[cfg(test)]
mod tests {
    use super::*;
    use abac_types::{Resource, ResourceData, Uid};
    use test_case::test_case;

    fn user() -> User {
        User::new("u1")
    }

    fn loan(applicant: &str, assigned: Option<&str>, status: LoanStatus) -> Loan {
        Loan {
            id: "l1".to_string(),
            applicant_id: applicant.into(),
            assigned_to: assigned.map(Uid::from),
            status,
        }
    }

    #[test]
    fn test_blocking() {
        let comment = Comment {
            id: "c1".to_string(),
            added_by: "u2".into(),
        };
        assert!(comment_not_blocked(&user(), &comment));
        assert!(!comment_not_blocked(&user().blocked_by("u2"), &comment));
        assert!(comment_not_blocked(&user().blocked_by("u3"), &comment));
    }

    #[test_case(true, true ; "own and completed")]
    #[test_case(false, false ; "own but unfinished")]
    fn test_own_completed_blog(completed: bool, expected: bool) {
        let blog = Blog {
            id: "b1".to_string(),
            added_by: "u1".into(),
            completed,
        };
        assert_eq!(own_completed_blog(&user(), &blog), expected);
    }

    #[test]
    fn test_foreign_completed_blog() {
        let blog = Blog {
            id: "b1".to_string(),
            added_by: "u2".into(),
            completed: true,
        };
        assert!(!own_completed_blog(&user(), &blog));
    }

    #[test]
    fn test_org_membership() {
        let org = Org {
            id: "o1".to_string(),
            owner_id: "u9".into(),
            members: vec!["u1".into()],
        };
        assert!(org_member(&user(), &org));
        assert!(!org_owner(&user(), &org));
        assert!(org_member(&User::new("u9"), &org));
        assert!(!org_member(&User::new("u5"), &org));
    }

    #[test_case(LoanStatus::Draft, true ; "draft")]
    #[test_case(LoanStatus::Submitted, false ; "submitted")]
    #[test_case(LoanStatus::Closed, false ; "closed")]
    fn test_own_draft_loan(status: LoanStatus, expected: bool) {
        assert_eq!(own_draft_loan(&user(), &loan("u1", None, status)), expected);
    }

    #[test_case(LoanStatus::Submitted, true ; "submitted")]
    #[test_case(LoanStatus::Approved, false ; "approved")]
    fn test_assigned_pending_loan(status: LoanStatus, expected: bool) {
        assert_eq!(
            assigned_pending_loan(&user(), &loan("u2", Some("u1"), status)),
            expected
        );
    }

    #[test]
    fn test_unassigned_loan() {
        let loan = loan("u2", None, LoanStatus::Submitted);
        assert!(!assigned_loan(&user(), &loan));
        assert!(!own_loan(&user(), &loan));
    }

    #[test]
    fn test_payments_and_invoices() {
        let payment = Payment {
            id: "p1".to_string(),
            loan_id: "l1".to_string(),
            payer_id: "u2".into(),
            collected_by: Some("u1".into()),
        };
        assert!(collected_payment(&user(), &payment));
        assert!(!own_payment(&user(), &payment));

        let invoice = Invoice {
            id: "i1".to_string(),
            added_by: "u2".into(),
            billed_to: "u1".into(),
        };
        assert!(billed_invoice(&user(), &invoice));
        assert!(!own_invoice(&user(), &invoice));
    }

    #[test]
    fn test_named_constructors() {
        let predicate = grant::own_completed_blog();
        assert_eq!(predicate.name(), "own_completed_blog");
        assert_eq!(predicate.resource(), Resource::Blogs);

        let data = ResourceData::from(Blog {
            id: "b1".to_string(),
            added_by: "u1".into(),
            completed: true,
        });
        assert_eq!(predicate.evaluate(&user(), &data), Some(true));
    }

    #[test]
    fn test_catalog_lists_every_rule() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 15);
        for predicate in catalog.iter() {
            assert!(catalog.contains(predicate.name()));
        }
        assert_eq!(
            catalog.get("collected_payment").map(Predicate::resource),
            Some(Resource::Payments)
        );
    }
}
