//! The authenticated principal.

use serde::{Deserialize, Serialize};
use std::fmt;

/// User identifier as issued by the identity layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uid(String);

impl Uid {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Uid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Uid {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for Uid {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for Uid {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Uid {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Authenticated user context.
///
/// Roles are kept as the raw names the identity layer supplied. Names that
/// do not match a known [`Role`](crate::Role) are carried along and simply
/// grant nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub uid: Uid,
    #[serde(default)]
    pub roles: Vec<String>,
    /// Users who have blocked this user.
    #[serde(default)]
    pub blocked_by: Vec<Uid>,
}

impl User {
    /// Create a user with no roles.
    pub fn new(uid: impl Into<Uid>) -> Self {
        Self {
            uid: uid.into(),
            roles: Vec::new(),
            blocked_by: Vec::new(),
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }

    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles.extend(roles.into_iter().map(Into::into));
        self
    }

    pub fn blocked_by(mut self, uid: impl Into<Uid>) -> Self {
        self.blocked_by.push(uid.into());
        self
    }

    /// Check if user holds a role by name.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Check if `uid` has blocked this user.
    pub fn is_blocked_by(&self, uid: &Uid) -> bool {
        self.blocked_by.contains(uid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let user = User::new("u1")
            .with_role("user")
            .with_roles(["manager", "auditor"])
            .blocked_by("u2");

        assert_eq!(user.uid, "u1");
        assert_eq!(user.roles, vec!["user", "manager", "auditor"]);
        assert!(user.has_role("manager"));
        assert!(!user.has_role("admin"));
        assert!(user.is_blocked_by(&Uid::from("u2")));
        assert!(!user.is_blocked_by(&Uid::from("u3")));
    }

    #[test]
    fn test_deserialize_from_identity_payload() {
        let json = r#"{"uid":"u7","roles":["driver"],"blockedBy":["u1","u2"]}"#;
        let user: User = serde_json::from_str(json).unwrap();

        assert_eq!(user.uid.as_str(), "u7");
        assert_eq!(user.roles, vec!["driver"]);
        assert_eq!(user.blocked_by.len(), 2);
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let user: User = serde_json::from_str(r#"{"uid":"u1"}"#).unwrap();
        assert!(user.roles.is_empty());
        assert!(user.blocked_by.is_empty());
    }
}
