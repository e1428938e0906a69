//! Error types for locale-sync
//!
//! This module provides the error taxonomy for the library:
//! - Configuration errors, detected before any network or filesystem activity
//! - Pattern errors, detected while parsing and expanding a target's file pattern
//! - Remote errors, passed through from the translation service
//! - Filesystem errors, always carrying the path that failed
//!
//! Context wrappers ([`Error::LocaleListing`], [`Error::Fetch`]) are added at the
//! orchestrator boundary. They never change the kind of the error: use
//! [`Error::category`] or [`Error::root_cause`] to classify it.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for locale-sync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for locale-sync
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration document or resolved target is unusable
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// File pattern could not be parsed or expanded
    #[error("pattern error: {0}")]
    Pattern(#[from] PatternError),

    /// The translation service answered with a non-success status
    #[error("remote error (HTTP {status}): {message}")]
    Remote {
        /// HTTP status code returned by the service
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// Network error talking to the translation service
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response payload could not be decoded
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem operation failed
    #[error("I/O error at {path}: {source}")]
    Io {
        /// The path being read, created or written
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Listing the locales of a project failed
    #[error("failed to list locales of project {project_id}: {source}")]
    LocaleListing {
        /// The project whose locales were requested
        project_id: String,
        /// The underlying error
        #[source]
        source: Box<Error>,
    },

    /// Downloading or writing one locale file failed
    #[error("{source} for {path}")]
    Fetch {
        /// Destination path of the locale file
        path: PathBuf,
        /// Locale that was being downloaded
        locale_id: String,
        /// The underlying error
        #[source]
        source: Box<Error>,
    },
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A target's file pattern is blank
    #[error("file pattern for target{} may not be empty", position(.index))]
    EmptyFilePattern {
        /// Position of the target in the `pull.targets` list, when known
        index: Option<usize>,
    },

    /// No usable pull targets in the configuration
    #[error("no targets for download specified, refine the pull.targets list in your config")]
    NoTargetsConfigured,

    /// No project id on the target nor at project level
    #[error("no project id configured for target {pattern}")]
    MissingProjectId {
        /// The target's file pattern
        pattern: String,
    },

    /// The configuration document is not valid YAML for the expected shape
    #[error("malformed configuration {}: {source}", origin(.path))]
    Malformed {
        /// File the document was read from, if any
        path: Option<PathBuf>,
        /// The YAML error
        #[source]
        source: serde_yaml::Error,
    },

    /// No configuration document could be found
    #[error("no configuration file found (searched from {searched})")]
    NotFound {
        /// Directory the search started from
        searched: PathBuf,
    },
}

fn position(index: &Option<usize>) -> String {
    index.map(|i| format!(" {i}")).unwrap_or_default()
}

fn origin(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<inline>".to_string())
}

/// File pattern errors
#[derive(Debug, Error)]
pub enum PatternError {
    /// The pattern cannot be used for pulling
    #[error("invalid file pattern {pattern:?}: {reason}")]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// Why it was rejected
        reason: String,
    },

    /// Two locales resolve to the same local path
    #[error(
        "locales {first_locale} and {second_locale} both resolve to {path}, add a locale placeholder to the file pattern"
    )]
    AmbiguousPath {
        /// The shared resolved path
        path: PathBuf,
        /// Locale id that claimed the path first
        first_locale: String,
        /// Locale id that collided with it
        second_locale: String,
    },

    /// The configured locale id is not known to the project
    #[error("locale {locale_id} not found in project {project_id}")]
    LocaleNotFound {
        /// The requested locale id
        locale_id: String,
        /// The project that was searched
        project_id: String,
    },
}

/// Broad classification of an error, independent of context wrapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Invalid or missing configuration
    Configuration,
    /// Invalid pattern or locale expansion
    Pattern,
    /// Remote service or transport failure
    Remote,
    /// Local filesystem failure
    Filesystem,
}

impl Error {
    /// Build an [`Error::Io`] for the given path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// The innermost error, skipping context wrappers
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::LocaleListing { source, .. } | Error::Fetch { source, .. } => {
                source.root_cause()
            }
            other => other,
        }
    }

    /// Category of the root cause
    pub fn category(&self) -> ErrorCategory {
        match self.root_cause() {
            Error::Config(_) => ErrorCategory::Configuration,
            Error::Pattern(_) => ErrorCategory::Pattern,
            Error::Remote { .. } | Error::Network(_) | Error::Serialization(_) => {
                ErrorCategory::Remote
            }
            Error::Io { .. } => ErrorCategory::Filesystem,
            // root_cause never returns a wrapper
            Error::LocaleListing { .. } | Error::Fetch { .. } => ErrorCategory::Remote,
        }
    }
}
