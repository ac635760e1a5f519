//! CLI error handling and exit codes.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use auth_abac::{ConfigError, Decision};
use thiserror::Error;

/// Application exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Exit {
    Success = 0,
    GeneralError = 1,
    ConfigError = 2,
    IoError = 3,
    ValidationError = 5,
    Denied = 10,
    NoPrincipal = 11,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit as u8)
    }
}

impl From<Decision> for Exit {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Granted => Exit::Success,
            Decision::Denied => Exit::Denied,
            Decision::NoPrincipal => Exit::NoPrincipal,
        }
    }
}

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        hint: Option<String>,
    },

    #[error("{message}")]
    Io {
        message: String,
        #[source]
        source: io::Error,
        path: Option<PathBuf>,
    },

    #[error("{message}")]
    Validation {
        message: String,
        hint: Option<String>,
    },

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Get the error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "E001",
            Self::Io { .. } => "E002",
            Self::Validation { .. } => "E004",
            Self::Other(_) => "E999",
        }
    }

    pub fn exit(&self) -> Exit {
        match self {
            Self::Config { .. } => Exit::ConfigError,
            Self::Io { .. } => Exit::IoError,
            Self::Validation { .. } => Exit::ValidationError,
            Self::Other(_) => Exit::GeneralError,
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        self.exit().into()
    }

    /// Get hint for this error if available
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Config { hint, .. } | Self::Validation { hint, .. } => hint.as_deref(),
            _ => None,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            hint: None,
        }
    }

    /// Create a validation error with hint
    pub fn validation_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create an IO error with path
    pub fn io_with_path(
        message: impl Into<String>,
        source: io::Error,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source,
            path: Some(path.into()),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: err,
            path: None,
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Validation {
            message: format!("Invalid JSON: {err}"),
            hint: None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NotFound { path } => Self::Config {
                message: format!("Policy file not found: {}", path.display()),
                source: None,
                hint: Some("Pass --policy or set ABAC_POLICY_PATH".to_string()),
            },
            ConfigError::ReadError { source } => Self::Io {
                message: format!("Failed to read policy: {source}"),
                source,
                path: None,
            },
            ConfigError::WriteError { path, source } => Self::io_with_path(
                format!("Failed to write policy to {}: {source}", path.display()),
                source,
                path,
            ),
            ConfigError::Schema { .. } => Self::Validation {
                message: err.to_string(),
                hint: Some("Run `abac validate` for the full list".to_string()),
            },
            other => Self::Config {
                message: format!("Policy error: {other}"),
                source: Some(Box::new(other)),
                hint: None,
            },
        }
    }
}

impl From<abac_common_log::LogError> for CliError {
    fn from(err: abac_common_log::LogError) -> Self {
        Self::Config {
            message: err.to_string(),
            source: Some(Box::new(err)),
            hint: None,
        }
    }
}
