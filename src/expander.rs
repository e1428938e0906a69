//! Locale expansion: one pattern and a locale listing become concrete paths

use crate::error::{PatternError, Result};
use crate::pattern::PathPattern;
use crate::types::{LocaleFile, LocaleFilter, RemoteLocale};
use crate::utils::{non_blank, normalize_path};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

/// Expand a parsed pattern over the locales of a project
///
/// With `filter.locale_id` set only that locale is expanded; otherwise every
/// remote locale is, in the order the service listed them. The tag is never
/// used to prune locales locally: it is substituted for `<tag>` and forwarded
/// with each download.
///
/// `project_id` is only used to name the project in errors.
///
/// # Errors
///
/// - [`PatternError::LocaleNotFound`] if the filtered locale id is not listed
/// - [`PatternError::InvalidPattern`] if a locale's values move the path out of
///   the location the pattern names (empty path, relative pattern turned
///   absolute, extra `..` segments)
/// - [`PatternError::AmbiguousPath`] if two locales resolve to the same path
pub fn expand(
    pattern: &PathPattern,
    project_id: &str,
    remote_locales: &[RemoteLocale],
    filter: &LocaleFilter,
) -> Result<Vec<LocaleFile>> {
    let candidates: Vec<&RemoteLocale> = match non_blank(filter.locale_id.as_deref()) {
        Some(locale_id) => {
            let locale = remote_locales
                .iter()
                .find(|l| l.id == locale_id)
                .ok_or_else(|| PatternError::LocaleNotFound {
                    locale_id: locale_id.to_string(),
                    project_id: project_id.to_string(),
                })?;
            vec![locale]
        }
        None => remote_locales.iter().collect(),
    };

    let tag = non_blank(filter.tag.as_deref()).unwrap_or_default();
    let template = normalize_path(pattern.as_str());
    let mut claimed: HashMap<PathBuf, &str> = HashMap::with_capacity(candidates.len());
    let mut files = Vec::with_capacity(candidates.len());

    for locale in candidates {
        let path = normalize_path(&pattern.substitute(locale, tag));
        confine(pattern, &template, &path, &locale.id)?;

        if let Some(first) = claimed.get(&path) {
            return Err(PatternError::AmbiguousPath {
                path,
                first_locale: (*first).to_string(),
                second_locale: locale.id.clone(),
            }
            .into());
        }
        claimed.insert(path.clone(), &locale.id);

        files.push(LocaleFile {
            locale_id: locale.id.clone(),
            tag: tag.to_string(),
            path,
        });
    }

    tracing::debug!(
        pattern = %pattern,
        project_id,
        files = files.len(),
        "expanded file pattern"
    );

    Ok(files)
}

/// Reject a substituted path that leaves the place `template` names
///
/// `template` is the normalized raw pattern. Remote values may add directory
/// levels but never an anchor or extra `..` segments.
fn confine(pattern: &PathPattern, template: &Path, path: &Path, locale_id: &str) -> Result<()> {
    let reason = if path.as_os_str().is_empty() {
        format!("locale {locale_id} resolves to an empty path")
    } else if is_anchored(path) && !is_anchored(template) {
        format!(
            "locale {locale_id} turns the relative pattern into the absolute path {}",
            path.display()
        )
    } else if parent_segments(path) > parent_segments(template) {
        format!(
            "locale {locale_id} resolves to {}, outside the pattern's directory",
            path.display()
        )
    } else {
        return Ok(());
    };

    Err(PatternError::InvalidPattern {
        pattern: pattern.as_str().to_string(),
        reason,
    }
    .into())
}

fn is_anchored(path: &Path) -> bool {
    path.has_root() || matches!(path.components().next(), Some(Component::Prefix(_)))
}

fn parent_segments(path: &Path) -> usize {
    path.components()
        .filter(|c| matches!(c, Component::ParentDir))
        .count()
}
