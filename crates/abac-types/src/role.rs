//! Role identifiers.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Roles known to the platform.
///
/// Roles are flat: none implies another, and every role lists its own grants
/// even where they repeat those of a "lesser" role. Wire names are camelCase
/// (`subAdmin`, `subManager`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter, AsRefStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Role {
    Super,
    Admin,
    SubAdmin,
    Representative,
    Manager,
    SubManager,
    User,
    Driver,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_role_names_round_trip() {
        for role in Role::iter() {
            let name = role.to_string();
            assert_eq!(name.parse::<Role>().unwrap(), role);

            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{name}\""));
        }
    }

    #[test]
    fn test_camel_case_names() {
        assert_eq!(Role::SubAdmin.as_ref(), "subAdmin");
        assert_eq!(Role::SubManager.as_ref(), "subManager");
        assert_eq!(Role::Super.as_ref(), "super");
    }

    #[test]
    fn test_unknown_role_does_not_parse() {
        assert!("auditor".parse::<Role>().is_err());
        assert!("SubAdmin".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    proptest::proptest! {
        #[test]
        fn prop_parse_is_exact(name in "[a-zA-Z]{0,12}") {
            let known = Role::iter().any(|role| role.as_ref() == name);
            proptest::prop_assert_eq!(name.parse::<Role>().is_ok(), known);
        }
    }
}
