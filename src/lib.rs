//! # locale-sync
//!
//! Pull localized translation files from a translation-management service
//! into the local tree.
//!
//! A configuration document declares pull *targets*: a file pattern such as
//! `locales/<locale_code>.yml` plus optional filters. For each target the
//! library lists the project's locales, expands the pattern into one path
//! per locale, downloads every locale and replaces the file's content.
//!
//! ## Design Philosophy
//!
//! - **Deterministic** - paths follow the service's locale order, and two
//!   locales never share a path
//! - **Fail fast** - the first error stops the run, files already written stay
//! - **Library-first** - no CLI, the remote side is a pluggable trait
//!
//! ## Quick Start
//!
//! ```no_run
//! use locale_sync::{ConfigLoader, Credentials, PhraseClient, PullOptions, Puller};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let targets = ConfigLoader::load_targets(&Credentials::from_env())?;
//!
//!     let puller = Puller::new(Arc::new(PhraseClient::new()?), PullOptions::default());
//!     let summary = puller.pull_all(&targets).await?;
//!
//!     for file in &summary.files {
//!         println!("{} -> {}", file.locale_id, file.path.display());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Translation service client
pub mod client;
/// Configuration document and target resolution
pub mod config;
/// Error types
pub mod error;
/// Locale expansion
pub mod expander;
/// Download parameter building
pub mod params;
/// File pattern parsing
pub mod pattern;
/// Pull orchestration
pub mod pull;
/// Core types
pub mod types;
/// Utility functions
pub mod utils;
/// Build information
pub mod version;

// Re-export commonly used types
pub use client::{PhraseClient, TranslationClient};
pub use config::{ConfigDocument, ConfigLoader, Credentials, ParamOverrides, Target};
pub use error::{ConfigError, Error, ErrorCategory, PatternError, Result};
pub use expander::expand;
pub use params::DownloadParams;
pub use pattern::{PathComponent, PathPattern, Placeholder};
pub use pull::{PullOptions, Puller};
pub use types::{LocaleFile, LocaleFilter, PullSummary, RemoteLocale};
pub use version::BuildInfo;
