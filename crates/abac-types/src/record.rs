//! Records that data-dependent grants are evaluated against.
//!
//! Each resource that supports predicate grants has exactly one record type.
//! `dashboard` and `users` have none: every grant on them is static.

use crate::{Resource, Uid};
use serde::{Deserialize, Serialize};

/// A record type bound to the resource it describes.
pub trait ResourceRecord: Sized + 'static {
    /// The resource this record belongs to.
    const RESOURCE: Resource;

    /// Borrow the record out of [`ResourceData`], if it holds this type.
    fn from_data(data: &ResourceData) -> Option<&Self>;
}

/// An organisation a manager or member belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Org {
    #[serde(default)]
    pub id: String,
    pub owner_id: Uid,
    #[serde(default)]
    pub members: Vec<Uid>,
}

/// Loan application lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    /// Being filled in by the applicant.
    #[default]
    Draft,
    /// Waiting for a representative.
    Submitted,
    Approved,
    Rejected,
    Disbursed,
    Closed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    #[serde(default)]
    pub id: String,
    pub applicant_id: Uid,
    /// Representative handling the application.
    #[serde(default)]
    pub assigned_to: Option<Uid>,
    #[serde(default)]
    pub status: LoanStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub loan_id: String,
    pub payer_id: Uid,
    /// Driver who collected a cash payment.
    #[serde(default)]
    pub collected_by: Option<Uid>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[serde(default)]
    pub id: String,
    pub added_by: Uid,
    pub billed_to: Uid,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    #[serde(default)]
    pub id: String,
    pub added_by: Uid,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default)]
    pub id: String,
    pub added_by: Uid,
}

/// Any record a predicate grant may be evaluated against.
///
/// Serialized with a `resource` tag:
/// `{"resource": "blogs", "addedBy": "u1", "completed": false}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "resource", rename_all = "lowercase")]
pub enum ResourceData {
    Orgs(Org),
    Loans(Loan),
    Payments(Payment),
    Invoices(Invoice),
    Blogs(Blog),
    Comments(Comment),
}

impl ResourceData {
    /// The resource this record describes.
    pub fn resource(&self) -> Resource {
        match self {
            Self::Orgs(_) => Resource::Orgs,
            Self::Loans(_) => Resource::Loans,
            Self::Payments(_) => Resource::Payments,
            Self::Invoices(_) => Resource::Invoices,
            Self::Blogs(_) => Resource::Blogs,
            Self::Comments(_) => Resource::Comments,
        }
    }
}

macro_rules! resource_record {
    ($record:ident => $variant:ident) => {
        impl ResourceRecord for $record {
            const RESOURCE: Resource = Resource::$variant;

            fn from_data(data: &ResourceData) -> Option<&Self> {
                match data {
                    ResourceData::$variant(record) => Some(record),
                    _ => None,
                }
            }
        }

        impl From<$record> for ResourceData {
            fn from(record: $record) -> Self {
                ResourceData::$variant(record)
            }
        }
    };
}

resource_record!(Org => Orgs);
resource_record!(Loan => Loans);
resource_record!(Payment => Payments);
resource_record!(Invoice => Invoices);
resource_record!(Blog => Blogs);
resource_record!(Comment => Comments);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_json() {
        let json = r#"{"resource":"blogs","addedBy":"u1","completed":false}"#;
        let data: ResourceData = serde_json::from_str(json).unwrap();

        assert_eq!(data.resource(), Resource::Blogs);
        let blog = Blog::from_data(&data).unwrap();
        assert_eq!(blog.added_by, "u1");
        assert!(!blog.completed);
    }

    #[test]
    fn test_loan_defaults() {
        let json = r#"{"resource":"loans","applicantId":"u3"}"#;
        let data: ResourceData = serde_json::from_str(json).unwrap();

        let loan = Loan::from_data(&data).unwrap();
        assert_eq!(loan.status, LoanStatus::Draft);
        assert!(loan.assigned_to.is_none());
    }

    #[test]
    fn test_from_data_rejects_other_records() {
        let data = ResourceData::from(Comment {
            id: "c1".into(),
            added_by: "u2".into(),
        });

        assert!(Comment::from_data(&data).is_some());
        assert!(Blog::from_data(&data).is_none());
        assert_eq!(Comment::RESOURCE, data.resource());
    }

    #[test]
    fn test_unknown_resource_tag_is_rejected() {
        let json = r#"{"resource":"dashboard"}"#;
        assert!(serde_json::from_str::<ResourceData>(json).is_err());
    }
}
