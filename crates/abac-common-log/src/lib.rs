//! Logging infrastructure for the authorization crates.
//!
//! Libraries only emit `tracing` events; binaries call [`init`] once with a
//! [`LogConfig`], usually built by [`LogConfig::from_env`]. Output goes to
//! stderr and, optionally, to an append-only log file.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Environment variable names.
pub mod vars {
    pub const ABAC_LOG_LEVEL: &str = "ABAC_LOG_LEVEL";
    pub const ABAC_LOG_FORMAT: &str = "ABAC_LOG_FORMAT";
    pub const ABAC_LOG_FILE: &str = "ABAC_LOG_FILE";
    pub const ABAC_LOG_SOURCE: &str = "ABAC_LOG_SOURCE";
    pub const RUST_LOG: &str = "RUST_LOG";
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Minimum log level.
    pub level: LogLevel,
    /// Full filter directives (`auth_abac=debug,info`); overrides `level`.
    pub directives: Option<String>,
    /// Output format.
    pub format: LogFormat,
    /// Log file path (if file logging enabled).
    pub file_path: Option<PathBuf>,
    /// Include source location.
    pub source_location: bool,
    /// Colour stderr output.
    pub ansi: bool,
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing_subscriber::filter::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing_subscriber::filter::LevelFilter::TRACE,
            LogLevel::Debug => tracing_subscriber::filter::LevelFilter::DEBUG,
            LogLevel::Info => tracing_subscriber::filter::LevelFilter::INFO,
            LogLevel::Warn => tracing_subscriber::filter::LevelFilter::WARN,
            LogLevel::Error => tracing_subscriber::filter::LevelFilter::ERROR,
        }
    }
}

impl LogLevel {
    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Level for a `-v`/`-q` style verbosity count, starting from `warn`.
    pub fn from_verbosity(verbose: u8, quiet: bool) -> Self {
        if quiet {
            return Self::Error;
        }
        match verbose {
            0 => Self::Warn,
            1 => Self::Info,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-field format.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON structured format.
    Json,
}

impl LogFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Some(Self::Pretty),
            "compact" => Some(Self::Compact),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            directives: None,
            format: LogFormat::default(),
            file_path: None,
            source_location: false,
            ansi: true,
        }
    }
}

impl LogConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Create config from an arbitrary variable source.
    ///
    /// `ABAC_LOG_LEVEL` wins over `RUST_LOG`. A value that is not a plain
    /// level is kept as filter directives.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(filter) = lookup(vars::ABAC_LOG_LEVEL).or_else(|| lookup(vars::RUST_LOG)) {
            match LogLevel::parse(&filter) {
                Some(level) => config.level = level,
                None if !filter.trim().is_empty() => config.directives = Some(filter),
                None => {}
            }
        }

        if let Some(format) = lookup(vars::ABAC_LOG_FORMAT) {
            config.format = LogFormat::parse(&format).unwrap_or_default();
        }

        if let Some(file_path) = lookup(vars::ABAC_LOG_FILE).filter(|p| !p.is_empty()) {
            config.file_path = Some(PathBuf::from(file_path));
        }

        if let Some(source) = lookup(vars::ABAC_LOG_SOURCE) {
            config.source_location = source.eq_ignore_ascii_case("true") || source == "1";
        }

        config
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self.directives = None;
        self
    }

    fn filter(&self) -> Result<EnvFilter, LogError> {
        let directives = self.directives.as_deref().unwrap_or(self.level.as_str());
        EnvFilter::try_new(directives).map_err(|e| LogError::InvalidFilter {
            directives: directives.to_string(),
            message: e.to_string(),
        })
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn fmt_layer<W>(format: LogFormat, writer: W, ansi: bool, source_location: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(true)
        .with_file(source_location)
        .with_line_number(source_location);

    match format {
        LogFormat::Pretty => layer.boxed(),
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}

/// Initialize logging with the given configuration.
///
/// Fails if a global subscriber is already installed.
pub fn init(config: LogConfig) -> Result<(), LogError> {
    let filter = config.filter()?;

    let mut layers: Vec<BoxedLayer> = vec![fmt_layer(
        config.format,
        io::stderr,
        config.ansi,
        config.source_location,
    )];

    if let Some(file_path) = &config.file_path {
        let file: File = OpenOptions::new().create(true).append(true).open(file_path)?;
        layers.push(fmt_layer(
            config.format,
            Mutex::new(file),
            false,
            config.source_location,
        ));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| LogError::InitError(e.to_string()))
}

/// Logging errors.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("failed to initialize logging: {0}")]
    InitError(String),

    #[error("invalid log filter '{directives}': {message}")]
    InvalidFilter { directives: String, message: String },

    #[error("failed to open log file: {0}")]
    FileError(#[from] io::Error),
}

/// Convenience macros re-exported from tracing.
pub use tracing::{debug, error, info, trace, warn};

pub mod spans;
