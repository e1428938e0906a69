//! Configuration document and target resolution
//!
//! The document is YAML with a single `phraseapp` root:
//!
//! ```yaml
//! phraseapp:
//!   access_token: "0123abcd"
//!   project_id: "p1"
//!   file_format: yml
//!   pull:
//!     targets:
//!       - file: ./locales/<locale_code>.yml
//!       - file: ./config/main.json
//!         file_format: nested_json
//!         params:
//!           locale_id: "a1"
//!           include_empty_translations: true
//! ```
//!
//! Every target field falls back independently to the project-level value
//! when it is not set on the target itself.

use crate::error::{ConfigError, Error, Result};
use crate::types::LocaleFilter;
use crate::utils::non_blank;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = ".phraseapp.yml";

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "PHRASEAPP_CONFIG";

/// Environment variable holding an access token
pub const ACCESS_TOKEN_ENV: &str = "PHRASEAPP_ACCESS_TOKEN";

/// The whole configuration document
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConfigDocument {
    /// Project-level settings and the pull section
    #[serde(default)]
    pub phraseapp: ProjectConfig,
}

/// Project-level settings
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Default access token for every target
    #[serde(default)]
    pub access_token: String,

    /// Default project id for every target
    #[serde(default)]
    pub project_id: String,

    /// Default file format for every target
    #[serde(default)]
    pub file_format: String,

    /// Pull settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull: Option<PullConfig>,
}

/// The `pull` section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PullConfig {
    /// Configured targets, `null` entries are skipped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<Option<TargetConfig>>>,
}

/// One target as written in the document
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TargetConfig {
    /// File pattern with placeholders
    #[serde(default)]
    pub file: String,

    /// Project id override
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project_id: String,

    /// Access token override
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub access_token: String,

    /// File format override
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub file_format: String,

    /// Download parameter overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<ParamOverrides>,
}

/// Download parameter overrides for one target
///
/// Booleans are tri-state: `None` falls through to the service default,
/// `Some(false)` is sent explicitly. Blank strings count as unset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamOverrides {
    /// File format, wins over the target's `file_format`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_format: Option<String>,

    /// Pull only this locale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale_id: Option<String>,

    /// Only keys with this tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Convert emoji symbols
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub convert_emoji: Option<bool>,

    /// Include keys without a translation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_empty_translations: Option<bool>,

    /// Keep notranslate tags in the output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_notranslate_tags: Option<bool>,

    /// Format-specific options, passed through as-is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_options: Option<BTreeMap<String, serde_json::Value>>,
}

/// Project-level fallbacks applied to every target
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectDefaults {
    /// Access token
    pub access_token: String,
    /// Project id
    pub project_id: String,
    /// File format
    pub file_format: String,
}

/// Caller-supplied credentials
///
/// A token given here replaces the document's project-level token. Targets
/// that carry their own token keep it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Access token
    pub token: Option<String>,
}

impl Credentials {
    /// Credentials with an explicit token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// Read the token from `PHRASEAPP_ACCESS_TOKEN`
    pub fn from_env() -> Self {
        Self {
            token: std::env::var(ACCESS_TOKEN_ENV)
                .ok()
                .filter(|t| !t.trim().is_empty()),
        }
    }
}

/// A fully resolved pull target
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Target {
    /// File pattern with placeholders
    pub file_pattern: String,
    /// Project to pull from
    pub project_id: String,
    /// Token used for every request of this target
    pub access_token: String,
    /// File format after target/project fallback
    pub file_format: String,
    /// Download parameter overrides
    pub params: Option<ParamOverrides>,
}

impl Target {
    /// Effective file format, `params.file_format` first
    pub fn format(&self) -> &str {
        self.params
            .as_ref()
            .and_then(|p| non_blank(p.file_format.as_deref()))
            .unwrap_or(&self.file_format)
    }

    /// Locale id filter, if any
    pub fn locale_id(&self) -> Option<&str> {
        self.params
            .as_ref()
            .and_then(|p| non_blank(p.locale_id.as_deref()))
    }

    /// Tag filter, if any
    pub fn tag(&self) -> Option<&str> {
        self.params.as_ref().and_then(|p| non_blank(p.tag.as_deref()))
    }

    /// Locale filter for the expander
    pub fn filter(&self) -> LocaleFilter {
        LocaleFilter {
            locale_id: self.locale_id().map(str::to_string),
            tag: self.tag().map(str::to_string),
        }
    }
}

impl TargetConfig {
    /// Resolve against project defaults
    ///
    /// `index` is the target's position in the document, used in errors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyFilePattern`] if `file` is blank.
    pub fn resolve(self, index: usize, defaults: &ProjectDefaults) -> Result<Target> {
        if self.file.trim().is_empty() {
            return Err(ConfigError::EmptyFilePattern { index: Some(index) }.into());
        }

        Ok(Target {
            file_pattern: self.file,
            project_id: or_default(self.project_id, &defaults.project_id),
            access_token: or_default(self.access_token, &defaults.access_token),
            file_format: or_default(self.file_format, &defaults.file_format),
            params: self.params,
        })
    }
}

fn or_default(value: String, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value
    }
}

impl ConfigDocument {
    /// Parse a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        parse(content, None)
    }

    /// Project-level defaults, with the caller's token taking precedence
    pub fn defaults(&self, credentials: &Credentials) -> ProjectDefaults {
        let project = &self.phraseapp;
        ProjectDefaults {
            access_token: credentials
                .token
                .clone()
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| project.access_token.clone()),
            project_id: project.project_id.clone(),
            file_format: project.file_format.clone(),
        }
    }

    /// Resolve every configured pull target
    ///
    /// # Errors
    ///
    /// - [`ConfigError::EmptyFilePattern`] for the first target with a blank `file`
    /// - [`ConfigError::NoTargetsConfigured`] when no target remains
    pub fn targets(&self, credentials: &Credentials) -> Result<Vec<Target>> {
        let entries = self
            .phraseapp
            .pull
            .as_ref()
            .and_then(|pull| pull.targets.as_ref())
            .ok_or(ConfigError::NoTargetsConfigured)?;

        let defaults = self.defaults(credentials);
        let mut targets = Vec::with_capacity(entries.len());

        for (index, entry) in entries.iter().enumerate() {
            let Some(entry) = entry else {
                tracing::warn!(index, "skipping empty pull target entry");
                continue;
            };
            targets.push(entry.clone().resolve(index, &defaults)?);
        }

        if targets.is_empty() {
            return Err(ConfigError::NoTargetsConfigured.into());
        }
        Ok(targets)
    }
}

fn parse(content: &str, path: Option<&Path>) -> Result<ConfigDocument> {
    // An empty document deserializes to unit, not to a mapping
    if content.trim().is_empty() {
        return Ok(ConfigDocument::default());
    }
    serde_yaml::from_str(content).map_err(|source| {
        Error::Config(ConfigError::Malformed {
            path: path.map(Path::to_path_buf),
            source,
        })
    })
}

/// Locates and reads configuration documents
pub struct ConfigLoader;

impl ConfigLoader {
    /// Read and parse a document from `path`
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<ConfigDocument> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let document = parse(&content, Some(path))?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(document)
    }

    /// Find the configuration file for the current process
    ///
    /// `PHRASEAPP_CONFIG` wins; otherwise [`CONFIG_FILE_NAME`] is searched
    /// from the working directory upward.
    pub fn discover() -> Result<PathBuf> {
        let cwd = std::env::current_dir().map_err(|e| Error::io(".", e))?;
        let explicit = std::env::var_os(CONFIG_PATH_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self::discover_from(&cwd, explicit)
    }

    /// Find the configuration file starting at `start`
    ///
    /// An `explicit` path is returned as-is when it exists.
    pub fn discover_from(start: &Path, explicit: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            if path.is_file() {
                return Ok(path);
            }
            return Err(Error::io(
                &path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "configuration file not found"),
            ));
        }

        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| {
                ConfigError::NotFound {
                    searched: start.to_path_buf(),
                }
                .into()
            })
    }

    /// Discover, load and resolve in one step
    pub fn load_targets(credentials: &Credentials) -> Result<Vec<Target>> {
        let path = Self::discover()?;
        Self::load_from_file(path)?.targets(credentials)
    }
}
