//! Grants: the rule attached to one `(role, resource, action)` triple.

use crate::{Resource, ResourceData, ResourceRecord, User};
use std::fmt;
use std::sync::Arc;

type Check = dyn Fn(&User, &ResourceData) -> Option<bool> + Send + Sync;

/// A named, data-dependent grant.
///
/// Wraps a plain `fn(&User, &R) -> bool` over one record type. Function
/// pointers cannot capture state, so a predicate sees nothing beyond the user
/// and the record it is handed; it must not perform I/O.
#[derive(Clone)]
pub struct Predicate {
    name: &'static str,
    resource: Resource,
    check: Arc<Check>,
}

impl Predicate {
    /// Create a predicate over record type `R`.
    ///
    /// The predicate's resource is `R::RESOURCE`.
    pub fn new<R: ResourceRecord>(name: &'static str, check: fn(&User, &R) -> bool) -> Self {
        let erased: Arc<Check> = Arc::new(move |user: &User, data: &ResourceData| {
            R::from_data(data).map(|record| check(user, record))
        });
        Self {
            name,
            resource: R::RESOURCE,
            check: erased,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Resource whose record this predicate reads.
    pub fn resource(&self) -> Resource {
        self.resource
    }

    /// Evaluate against `data`.
    ///
    /// Returns `None` if `data` is a record of some other resource.
    pub fn evaluate(&self, user: &User, data: &ResourceData) -> Option<bool> {
        (self.check)(user, data)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("name", &self.name)
            .field("resource", &self.resource)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.resource == other.resource
    }
}

impl Eq for Predicate {}

/// Authorization rule for one `(role, resource, action)` triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grant {
    /// Granted regardless of context.
    Allow,
    /// Refused regardless of context.
    ///
    /// Another role of the same user may still grant the action.
    Deny,
    /// Granted when the predicate holds for the user and the record.
    Predicate(Predicate),
}

impl Grant {
    /// Whether the outcome is fixed without looking at data.
    pub fn is_static(&self) -> bool {
        !matches!(self, Self::Predicate(_))
    }

    /// The predicate, for data-dependent grants.
    pub fn predicate(&self) -> Option<&Predicate> {
        match self {
            Self::Predicate(predicate) => Some(predicate),
            _ => None,
        }
    }
}

impl From<bool> for Grant {
    fn from(allowed: bool) -> Self {
        if allowed {
            Self::Allow
        } else {
            Self::Deny
        }
    }
}

impl From<Predicate> for Grant {
    fn from(predicate: Predicate) -> Self {
        Self::Predicate(predicate)
    }
}

impl fmt::Display for Grant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allow => f.write_str("allow"),
            Self::Deny => f.write_str("deny"),
            Self::Predicate(predicate) => write!(f, "when {}", predicate.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Blog, Comment};

    fn own_blog(user: &User, blog: &Blog) -> bool {
        blog.added_by == user.uid
    }

    fn blog(added_by: &str) -> ResourceData {
        Blog {
            added_by: added_by.into(),
            ..Blog::default()
        }
        .into()
    }

    #[test]
    fn test_predicate_takes_resource_from_record() {
        let predicate = Predicate::new("own_blog", own_blog);
        assert_eq!(predicate.name(), "own_blog");
        assert_eq!(predicate.resource(), Resource::Blogs);
    }

    #[test]
    fn test_predicate_evaluates_matching_record() {
        let predicate = Predicate::new("own_blog", own_blog);
        let user = User::new("u1");

        assert_eq!(predicate.evaluate(&user, &blog("u1")), Some(true));
        assert_eq!(predicate.evaluate(&user, &blog("u2")), Some(false));
    }

    #[test]
    fn test_predicate_skips_foreign_record() {
        let predicate = Predicate::new("own_blog", own_blog);
        let comment = ResourceData::from(Comment {
            id: String::new(),
            added_by: "u1".into(),
        });

        assert_eq!(predicate.evaluate(&User::new("u1"), &comment), None);
    }

    #[test]
    fn test_grant_display() {
        assert_eq!(Grant::Allow.to_string(), "allow");
        assert_eq!(Grant::from(false).to_string(), "deny");
        assert_eq!(
            Grant::from(Predicate::new("own_blog", own_blog)).to_string(),
            "when own_blog"
        );
    }

    #[test]
    fn test_grant_is_static() {
        assert!(Grant::Allow.is_static());
        assert!(Grant::Deny.is_static());
        let grant = Grant::from(Predicate::new("own_blog", own_blog));
        assert!(!grant.is_static());
        assert_eq!(grant.predicate().map(Predicate::name), Some("own_blog"));
    }
}
