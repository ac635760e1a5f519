//! Environment-driven authorizer setup.

use super::loader::{ConfigError, PolicyLoader};
use crate::authorizer::{Authorizer, InvalidPairPolicy};
use crate::{lending, predicates};
use std::env;
use std::path::PathBuf;
use tracing::info;

/// Environment variable names.
pub mod vars {
    /// Policy document to load instead of the built-in lending policy.
    pub const ABAC_POLICY_PATH: &str = "ABAC_POLICY_PATH";
    /// `panic` or `deny`.
    pub const ABAC_INVALID_PAIR: &str = "ABAC_INVALID_PAIR";
}

/// Where the matrix comes from and how misuse is handled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorizerConfig {
    /// `None` selects the built-in lending policy.
    pub policy_path: Option<PathBuf>,
    pub invalid_pair: InvalidPairPolicy,
}

impl AuthorizerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let policy_path = lookup(vars::ABAC_POLICY_PATH)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let invalid_pair = match lookup(vars::ABAC_INVALID_PAIR) {
            Some(value) => value.parse::<InvalidPairPolicy>().map_err(|_| ConfigError::InvalidEnv {
                var: vars::ABAC_INVALID_PAIR.to_string(),
                value,
            })?,
            None => InvalidPairPolicy::default(),
        };

        Ok(Self {
            policy_path,
            invalid_pair,
        })
    }

    pub fn with_policy_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.policy_path = Some(path.into());
        self
    }

    /// Build the authorizer this configuration describes.
    pub fn build(&self) -> Result<Authorizer, ConfigError> {
        match &self.policy_path {
            Some(path) => {
                PolicyLoader::new(path).load_authorizer(&predicates::catalog(), self.invalid_pair)
            }
            None => {
                let authorizer = lending::authorizer()?.with_invalid_pair_policy(self.invalid_pair);
                info!(
                    entries = authorizer.matrix().len(),
                    invalid_pair = %self.invalid_pair,
                    "Authorizer built from lending policy"
                );
                Ok(authorizer)
            }
        }
    }
}
