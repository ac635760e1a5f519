//! Policy file loading and parsing.

use super::types::PolicyDocument;
use crate::authorizer::{Authorizer, InvalidPairPolicy};
use crate::catalog::PredicateCatalog;
use abac_types::{AbacError, Action, Resource, Role, Violation};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Policy loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("policy file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read policy: {source}")]
    ReadError {
        #[from]
        source: std::io::Error,
    },

    /// `message` is the parser's own text, which already names the location.
    #[error("invalid YAML: {message}")]
    ParseError { line: Option<usize>, message: String },

    #[error("failed to serialize policy: {message}")]
    SerializeError { message: String },

    #[error("failed to write policy to {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{role}/{resource}/{action}: unknown predicate '{name}'")]
    UnknownPredicate {
        role: Role,
        resource: Resource,
        action: Action,
        name: String,
    },

    #[error("validation error: {message}")]
    ValidationError { message: String },

    #[error(
        "policy violates the resource schema: {}",
        .violations.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
    )]
    Schema { violations: Vec<Violation> },

    #[error("invalid value for {var}: {value}")]
    InvalidEnv { var: String, value: String },
}

impl From<AbacError> for ConfigError {
    fn from(err: AbacError) -> Self {
        match err {
            AbacError::InvalidMatrix { violations } => Self::Schema { violations },
            other => Self::ValidationError {
                message: other.to_string(),
            },
        }
    }
}

/// Reads and writes policy documents.
pub struct PolicyLoader {
    path: PathBuf,
}

impl PolicyLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the policy file and check it against `catalog` and the resource
    /// schema.
    pub fn load(&self, catalog: &PredicateCatalog) -> Result<PolicyDocument, ConfigError> {
        let document = self.read()?;
        document.validate(catalog)?;

        debug!(path = %self.path.display(), roles = document.roles.len(), "Policy loaded");
        Ok(document)
    }

    /// Parse a policy document without validating it.
    pub fn parse(contents: &str) -> Result<PolicyDocument, ConfigError> {
        serde_yaml::from_str(contents).map_err(|e| ConfigError::ParseError {
            line: e.location().map(|l| l.line()),
            message: e.to_string(),
        })
    }

    /// Load the policy file and build an authorizer from it.
    pub fn load_authorizer(
        &self,
        catalog: &PredicateCatalog,
        invalid_pair: InvalidPairPolicy,
    ) -> Result<Authorizer, ConfigError> {
        let authorizer = self.read()?.into_authorizer(catalog, invalid_pair)?;
        info!(
            path = %self.path.display(),
            entries = authorizer.matrix().len(),
            invalid_pair = %invalid_pair,
            "Authorizer built from policy file"
        );
        Ok(authorizer)
    }

    /// Write `document` to the policy file, creating parent directories.
    pub fn save(&self, document: &PolicyDocument) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(document).map_err(|e| ConfigError::SerializeError {
            message: e.to_string(),
        })?;

        let write_error = |source| ConfigError::WriteError {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
        std::fs::write(&self.path, yaml).map_err(write_error)
    }

    fn read(&self) -> Result<PolicyDocument, ConfigError> {
        if !self.path.exists() {
            return Err(ConfigError::NotFound {
                path: self.path.clone(),
            });
        }

        let contents = std::fs::read_to_string(&self.path)?;
        Self::parse(&contents)
    }
}
