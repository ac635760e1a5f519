//! Authorization outcomes.

use serde::{Deserialize, Serialize};
use strum::Display;

/// Three-valued result of an authorization check.
///
/// `NoPrincipal` keeps "nobody is signed in" apart from "signed in but not
/// allowed", so a caller can send a login redirect instead of a refusal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Decision {
    Granted,
    Denied,
    NoPrincipal,
}

impl Decision {
    #[must_use]
    pub fn from_bool(granted: bool) -> Self {
        if granted {
            Self::Granted
        } else {
            Self::Denied
        }
    }

    #[must_use]
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }

    #[must_use]
    pub fn is_denied(self) -> bool {
        matches!(self, Self::Denied)
    }

    #[must_use]
    pub fn is_no_principal(self) -> bool {
        matches!(self, Self::NoPrincipal)
    }

    /// `Some(granted)` for an authenticated principal, `None` otherwise.
    #[must_use]
    pub fn as_option(self) -> Option<bool> {
        match self {
            Self::Granted => Some(true),
            Self::Denied => Some(false),
            Self::NoPrincipal => None,
        }
    }

    /// HTTP status a route handler would typically answer with.
    #[must_use]
    pub fn status_code(self) -> u16 {
        match self {
            Self::Granted => 200,
            Self::Denied => 403,
            Self::NoPrincipal => 401,
        }
    }
}

impl From<Decision> for Option<bool> {
    fn from(decision: Decision) -> Self {
        decision.as_option()
    }
}
