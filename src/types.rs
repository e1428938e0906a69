//! Core types shared between the expander, the orchestrator and the client

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A locale as listed by the translation service
///
/// Fetched fresh for every target pull and never cached across targets,
/// since two targets may point at different projects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteLocale {
    /// Service-assigned locale id
    pub id: String,
    /// Human-readable locale name (e.g. "English")
    #[serde(default)]
    pub name: String,
    /// Locale code (e.g. "en", "de-CH")
    #[serde(default)]
    pub code: String,
}

impl RemoteLocale {
    /// Create a remote locale from its parts
    pub fn new(id: impl Into<String>, name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            code: code.into(),
        }
    }
}

/// One remote locale bound to one concrete local path
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocaleFile {
    /// Locale id the content is downloaded for
    pub locale_id: String,
    /// Tag filter forwarded with the download (empty when unset)
    pub tag: String,
    /// Resolved local path, relative paths are relative to the pull root
    pub path: PathBuf,
}

/// Locale selection for one expansion
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LocaleFilter {
    /// Restrict the expansion to this locale id
    pub locale_id: Option<String>,
    /// Tag forwarded to the service, also substituted for `<tag>`
    pub tag: Option<String>,
}

/// Outcome of pulling a list of targets
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PullSummary {
    /// Number of targets pulled
    pub targets: usize,
    /// Every file written, in pull order
    pub files: Vec<LocaleFile>,
}
