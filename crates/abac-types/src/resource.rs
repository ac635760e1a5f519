//! Protected resources and the actions declared for each of them.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Operations that can be performed on a resource.
///
/// Not every action is meaningful for every resource; see [`Resource::actions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Action {
    View,
    Create,
    Update,
    Delete,
    Share,
    Print,
}

/// Resource types protected by the permission matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Resource {
    /// Back-office landing page.
    Dashboard,
    /// Platform accounts.
    Users,
    Orgs,
    /// Loan applications.
    Loans,
    Payments,
    Invoices,
    Blogs,
    Comments,
}

impl Resource {
    /// Actions declared for this resource.
    ///
    /// A `(resource, action)` pair outside this set is a configuration error
    /// wherever it appears.
    pub fn actions(self) -> &'static [Action] {
        use Action::*;
        match self {
            Self::Dashboard => &[View],
            Self::Users | Self::Orgs | Self::Blogs | Self::Comments => {
                &[View, Create, Update, Delete]
            }
            Self::Loans | Self::Payments => &[View, Create, Update, Delete, Print],
            Self::Invoices => &[View, Create, Update, Delete, Share, Print],
        }
    }

    /// Whether `action` is declared for this resource.
    pub fn supports(self, action: Action) -> bool {
        self.actions().contains(&action)
    }

    /// Every resource together with each of its declared actions.
    pub fn pairs() -> impl Iterator<Item = (Resource, Action)> {
        Self::iter().flat_map(|resource| {
            resource
                .actions()
                .iter()
                .map(move |action| (resource, *action))
        })
    }
}
