//! Pull orchestration
//!
//! For every target, in order:
//! 1. parse the file pattern
//! 2. list the project's locales
//! 3. expand the pattern into one path per locale
//! 4. for each path: create it if missing, download the locale and
//!    replace the file's content
//!
//! Execution is strictly sequential and stops at the first error. Files
//! written before the failure stay on disk.

use crate::client::TranslationClient;
use crate::config::Target;
use crate::error::{ConfigError, Error, Result};
use crate::expander::expand;
use crate::params::DownloadParams;
use crate::pattern::PathPattern;
use crate::types::{LocaleFile, PullSummary};
use crate::utils::{ensure_file, resolve_under, write_file};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Options for a pull run
#[derive(Clone, Debug)]
pub struct PullOptions {
    /// Log every request's merged parameters at `info` instead of `debug`
    pub debug: bool,
    /// Directory relative file patterns are resolved against
    pub root_dir: PathBuf,
}

impl Default for PullOptions {
    fn default() -> Self {
        Self {
            debug: false,
            root_dir: PathBuf::from("."),
        }
    }
}

/// Drives pulls for resolved targets
#[derive(Clone)]
pub struct Puller {
    client: Arc<dyn TranslationClient>,
    options: PullOptions,
}

impl Puller {
    /// Create a puller using `client` for every remote call
    pub fn new(client: Arc<dyn TranslationClient>, options: PullOptions) -> Self {
        Self { client, options }
    }

    /// The options this puller runs with
    pub fn options(&self) -> &PullOptions {
        &self.options
    }

    /// Pull every target in order, stopping at the first failure
    pub async fn pull_all(&self, targets: &[Target]) -> Result<PullSummary> {
        let mut summary = PullSummary::default();
        for target in targets {
            let files = self.pull(target).await?;
            summary.targets += 1;
            summary.files.extend(files);
        }
        info!(
            targets = summary.targets,
            files = summary.files.len(),
            "pull finished"
        );
        Ok(summary)
    }

    /// Pull one target and return the files written
    ///
    /// Returned paths are the resolved paths, joined onto
    /// [`PullOptions::root_dir`] when relative.
    ///
    /// # Errors
    ///
    /// - Configuration errors for a blank pattern or a missing project id,
    ///   before any remote call
    /// - Pattern errors from parsing and expansion, before any download
    /// - [`Error::LocaleListing`] wrapping a client failure to list locales
    /// - [`Error::Fetch`] wrapping a download or write failure, with the path
    pub async fn pull(&self, target: &Target) -> Result<Vec<LocaleFile>> {
        if target.file_pattern.trim().is_empty() {
            return Err(ConfigError::EmptyFilePattern { index: None }.into());
        }
        let pattern = PathPattern::parse(&target.file_pattern)?;
        if target.project_id.trim().is_empty() {
            return Err(ConfigError::MissingProjectId {
                pattern: target.file_pattern.clone(),
            }
            .into());
        }

        let remote_locales = self
            .client
            .list_project_locales(&target.project_id, &target.access_token)
            .await
            .map_err(|e| Error::LocaleListing {
                project_id: target.project_id.clone(),
                source: Box::new(e),
            })?;

        let files = expand(
            &pattern,
            &target.project_id,
            &remote_locales,
            &target.filter(),
        )?;

        let mut written = Vec::with_capacity(files.len());
        for file in files {
            let file = LocaleFile {
                path: resolve_under(&self.options.root_dir, &file.path),
                ..file
            };
            self.pull_file(target, &file)
                .await
                .map_err(|e| Error::Fetch {
                    path: file.path.clone(),
                    locale_id: file.locale_id.clone(),
                    source: Box::new(e),
                })?;
            info!(
                path = %file.path.display(),
                locale_id = %file.locale_id,
                "pulled locale file"
            );
            written.push(file);
        }

        Ok(written)
    }

    async fn pull_file(&self, target: &Target, file: &LocaleFile) -> Result<()> {
        ensure_file(&file.path).await?;

        let params = DownloadParams::build(target, file);
        self.log_request(target, file, &params);

        let content = self
            .client
            .download_locale(&target.project_id, &target.access_token, &params)
            .await?;

        write_file(&file.path, &content).await
    }

    fn log_request(&self, target: &Target, file: &LocaleFile, params: &DownloadParams) {
        let format_options = params
            .format_options
            .as_ref()
            .and_then(|o| serde_json::to_string(o).ok())
            .unwrap_or_default();

        macro_rules! request_event {
            ($level:ident) => {
                $level!(
                    pattern = %target.file_pattern,
                    path = %file.path.display(),
                    locale_id = %params.locale_id,
                    project_id = %target.project_id,
                    file_format = %params.file_format,
                    convert_emoji = ?params.convert_emoji,
                    include_empty_translations = ?params.include_empty_translations,
                    keep_notranslate_tags = ?params.keep_notranslate_tags,
                    tag = ?params.tag,
                    format_options = %format_options,
                    client = self.client.name(),
                    "downloading locale"
                )
            };
        }

        if self.options.debug {
            request_event!(info);
        } else {
            request_event!(debug);
        }
    }
}
