//! Utility functions for file operations and path manipulation

use crate::error::{Error, Result};
use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};

/// Permission mode for created directories and locale files (owner only)
#[cfg(unix)]
pub const OWNER_ONLY_MODE: u32 = 0o700;

/// Normalize a substituted pattern into a local filesystem path
///
/// Both `/` and `\` are treated as separators. Repeated separators and `.`
/// segments are dropped, and `x/..` is collapsed lexically. Leading `..`
/// segments of a relative path are kept; `..` at the root stays at the root.
///
/// Two strings naming the same location relative to a directory normalize to
/// the same path.
///
/// # Examples
///
/// ```
/// use locale_sync::utils::normalize_path;
/// use std::path::PathBuf;
///
/// assert_eq!(
///     normalize_path("./locales//en/./app.yml"),
///     ["locales", "en", "app.yml"].iter().collect::<PathBuf>()
/// );
/// assert_eq!(
///     normalize_path("locales/tmp/../de.yml"),
///     ["locales", "de.yml"].iter().collect::<PathBuf>()
/// );
/// ```
pub fn normalize_path(raw: &str) -> PathBuf {
    let native: String = raw
        .chars()
        .map(|c| if c == '/' || c == '\\' { MAIN_SEPARATOR } else { c })
        .collect();

    let mut normalized = PathBuf::new();
    for component in Path::new(&native).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let last = normalized.components().next_back();
                let climbs = matches!(last, Some(Component::Normal(_)));
                let at_root = matches!(last, Some(Component::RootDir | Component::Prefix(_)));
                if climbs {
                    normalized.pop();
                } else if !at_root {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Treat blank strings as unset
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Join a relative path onto `root`, leaving absolute paths untouched
pub fn resolve_under(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    // "./x" under root is just root/x
    let relative: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    root.join(relative)
}

/// Make sure `path` exists as a file, creating parent directories as needed
///
/// Existing files are left untouched. New directories and files are created
/// owner-only on Unix.
pub async fn ensure_file(path: &Path) -> Result<()> {
    match tokio::fs::metadata(path).await {
        Ok(_) => return Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(Error::io(path, e)),
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        let mut builder = tokio::fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(OWNER_ONLY_MODE);
        builder
            .create(parent)
            .await
            .map_err(|e| Error::io(parent, e))?;
    }

    open_for_write(path).await.map(|_| ())
}

/// Replace the content of `path` with `content`
///
/// The file is truncated first, so a shorter download never leaves stale
/// bytes behind.
pub async fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    use tokio::io::AsyncWriteExt;

    let mut file = open_for_write(path).await?;
    file.write_all(content)
        .await
        .map_err(|e| Error::io(path, e))?;
    file.flush().await.map_err(|e| Error::io(path, e))?;
    Ok(())
}

async fn open_for_write(path: &Path) -> Result<tokio::fs::File> {
    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(OWNER_ONLY_MODE);
    options.open(path).await.map_err(|e| Error::io(path, e))
}
