//! Build information
//!
//! Release builds embed a JSON object in the `LOCALE_SYNC_BUILD_INFO`
//! environment variable at compile time, e.g.
//! `{"version":"0.1.0","revision":"3f2a9c1","built_at":"2026-10-01T12:00:00Z"}`.

use serde::{Deserialize, Serialize};

const EMBEDDED: Option<&str> = option_env!("LOCALE_SYNC_BUILD_INFO");

/// Information about the build that produced this library
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildInfo {
    /// Build timestamp
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub built_at: String,
    /// Released version
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    /// Whether the tree had uncommitted changes
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub changes: bool,
    /// Build host
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hostname: String,
    /// Build user
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user: String,
    /// Source revision
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub revision: String,
    /// Documentation revision
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub docs_revision: String,
}

impl BuildInfo {
    /// Parse build information from its JSON form
    pub fn parse(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build information of this binary
    ///
    /// Falls back to the crate version when nothing was embedded or the
    /// embedded value does not parse.
    pub fn current() -> Self {
        let from_crate = || Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            ..Default::default()
        };

        match EMBEDDED.map(Self::parse) {
            Some(Ok(mut info)) => {
                if info.version.is_empty() {
                    info.version = env!("CARGO_PKG_VERSION").to_string();
                }
                info
            }
            Some(Err(e)) => {
                tracing::warn!(error = %e, "ignoring malformed embedded build info");
                from_crate()
            }
            None => from_crate(),
        }
    }
}

impl std::fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "locale-sync {}", self.version)?;
        if !self.revision.is_empty() {
            write!(f, " ({}", self.revision)?;
            if self.changes {
                f.write_str(", dirty")?;
            }
            f.write_str(")")?;
        }
        if !self.built_at.is_empty() {
            write!(f, " built {}", self.built_at)?;
        }
        Ok(())
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_build_info() {
        let info = BuildInfo::parse(r#"{"version":"1.2.0","revision":"abc123","changes":true}"#)
            .unwrap();
        assert_eq!(info.version, "1.2.0");
        assert_eq!(info.revision, "abc123");
        assert!(info.changes);
        assert!(info.hostname.is_empty());
        assert_eq!(info.to_string(), "locale-sync 1.2.0 (abc123, dirty)");
    }

    #[test]
    fn malformed_build_info_is_serialization_error() {
        let err = BuildInfo::parse("{not json").unwrap_err();
        assert!(matches!(err, crate::Error::Serialization(_)));
    }

    #[test]
    fn current_always_has_a_version() {
        assert!(!BuildInfo::current().version.is_empty());
    }

    #[test]
    fn unset_fields_are_omitted_when_serialized() {
        let info = BuildInfo {
            version: "0.1.0".to_string(),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&info).unwrap(), r#"{"version":"0.1.0"}"#);
    }
}
