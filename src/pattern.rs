//! File pattern parsing
//!
//! A pull pattern is literal path text interleaved with placeholders:
//!
//! | Token           | Substituted with     |
//! |-----------------|----------------------|
//! | `<locale_name>` | the locale's name    |
//! | `<locale_code>` | the locale's code    |
//! | `<locale_id>`   | the locale's id      |
//! | `<tag>`         | the target's tag     |
//!
//! Any other `<...>` token is kept as literal text.

use crate::error::{PatternError, Result};
use crate::types::RemoteLocale;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"<[^<>]*>").expect("placeholder regex is valid")
});

/// A typed placeholder in a file pattern
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Placeholder {
    /// `<locale_name>`
    LocaleName,
    /// `<locale_code>`
    LocaleCode,
    /// `<locale_id>`
    LocaleId,
    /// `<tag>`
    Tag,
}

impl Placeholder {
    /// Look up a placeholder by its full token, brackets included
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "<locale_name>" => Some(Placeholder::LocaleName),
            "<locale_code>" => Some(Placeholder::LocaleCode),
            "<locale_id>" => Some(Placeholder::LocaleId),
            "<tag>" => Some(Placeholder::Tag),
            _ => None,
        }
    }

    /// The token as written in a pattern
    pub fn token(&self) -> &'static str {
        match self {
            Placeholder::LocaleName => "<locale_name>",
            Placeholder::LocaleCode => "<locale_code>",
            Placeholder::LocaleId => "<locale_id>",
            Placeholder::Tag => "<tag>",
        }
    }

    /// Whether this placeholder distinguishes one locale from another
    pub fn identifies_locale(&self) -> bool {
        !matches!(self, Placeholder::Tag)
    }
}

/// One parsed piece of a pattern
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathComponent {
    /// Literal path text, separators included
    Literal(String),
    /// A placeholder substituted per locale
    Placeholder(Placeholder),
}

/// A parsed file pattern
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    components: Vec<PathComponent>,
}

impl PathPattern {
    /// Parse a pull file pattern
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::InvalidPattern`] if the pattern is blank or
    /// contains the `*` wildcard, which only push patterns may use.
    pub fn parse(pattern: &str) -> Result<Self> {
        if pattern.trim().is_empty() {
            return Err(PatternError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: "file pattern may not be empty".to_string(),
            }
            .into());
        }
        if pattern.contains('*') {
            return Err(PatternError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: "pull patterns may not contain the '*' wildcard, specify a direct path with a file name".to_string(),
            }
            .into());
        }

        let mut components = Vec::new();
        let mut literal = String::new();
        let mut last = 0;

        for token in TOKEN.find_iter(pattern) {
            literal.push_str(&pattern[last..token.start()]);
            last = token.end();

            match Placeholder::from_token(token.as_str()) {
                Some(placeholder) => {
                    if !literal.is_empty() {
                        components.push(PathComponent::Literal(std::mem::take(&mut literal)));
                    }
                    components.push(PathComponent::Placeholder(placeholder));
                }
                None => literal.push_str(token.as_str()),
            }
        }
        literal.push_str(&pattern[last..]);
        if !literal.is_empty() {
            components.push(PathComponent::Literal(literal));
        }

        Ok(Self {
            raw: pattern.to_string(),
            components,
        })
    }

    /// The pattern as written
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parsed components in order
    pub fn components(&self) -> &[PathComponent] {
        &self.components
    }

    /// Whether any placeholder distinguishes locales
    pub fn has_locale_placeholder(&self) -> bool {
        self.placeholders().any(|p| p.identifies_locale())
    }

    /// Iterate over the placeholders in order
    pub fn placeholders(&self) -> impl Iterator<Item = Placeholder> + '_ {
        self.components.iter().filter_map(|c| match c {
            PathComponent::Placeholder(p) => Some(*p),
            PathComponent::Literal(_) => None,
        })
    }

    /// Substitute every placeholder for one locale
    ///
    /// The result still uses the separators written in the pattern; see
    /// [`crate::utils::normalize_path`].
    pub fn substitute(&self, locale: &RemoteLocale, tag: &str) -> String {
        let mut out = String::with_capacity(self.raw.len());
        for component in &self.components {
            match component {
                PathComponent::Literal(text) => out.push_str(text),
                PathComponent::Placeholder(Placeholder::LocaleName) => out.push_str(&locale.name),
                PathComponent::Placeholder(Placeholder::LocaleCode) => out.push_str(&locale.code),
                PathComponent::Placeholder(Placeholder::LocaleId) => out.push_str(&locale.id),
                PathComponent::Placeholder(Placeholder::Tag) => out.push_str(tag),
            }
        }
        out
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
