//! Download parameter building

use crate::config::Target;
use crate::types::LocaleFile;
use crate::utils::non_blank;
use serde::Serialize;
use std::collections::BTreeMap;

/// Fully merged parameters for one locale download
///
/// Optional fields left as `None` are not sent, so the service applies its
/// own default.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DownloadParams {
    /// Locale to download, part of the request path
    #[serde(skip)]
    pub locale_id: String,

    /// Output file format
    pub file_format: String,

    /// Convert emoji symbols
    #[serde(skip_serializing_if = "Option::is_none")]
    pub convert_emoji: Option<bool>,

    /// Include keys without a translation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_empty_translations: Option<bool>,

    /// Keep notranslate tags in the output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_notranslate_tags: Option<bool>,

    /// Only keys with this tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Format-specific options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_options: Option<BTreeMap<String, serde_json::Value>>,
}

impl DownloadParams {
    /// Build the parameters for downloading `file` of `target`
    ///
    /// Every field set in `target.params` wins over the target-level value.
    /// A `params.locale_id` wins over the expanded locale's id.
    pub fn build(target: &Target, file: &LocaleFile) -> Self {
        let mut params = Self {
            locale_id: file.locale_id.clone(),
            file_format: target.file_format.clone(),
            ..Default::default()
        };

        let Some(overrides) = target.params.as_ref() else {
            return params;
        };

        if let Some(format) = non_blank(overrides.file_format.as_deref()) {
            params.file_format = format.to_string();
        }
        if let Some(locale_id) = non_blank(overrides.locale_id.as_deref()) {
            params.locale_id = locale_id.to_string();
        }
        params.convert_emoji = overrides.convert_emoji;
        params.include_empty_translations = overrides.include_empty_translations;
        params.keep_notranslate_tags = overrides.keep_notranslate_tags;
        params.tag = non_blank(overrides.tag.as_deref()).map(str::to_string);
        params.format_options = overrides.format_options.clone();

        params
    }

    /// Query string pairs for the download request
    ///
    /// `format_options` entries are encoded as `format_options[<key>]`.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if !self.file_format.is_empty() {
            pairs.push(("file_format".to_string(), self.file_format.clone()));
        }
        let flags = [
            ("convert_emoji", self.convert_emoji),
            ("include_empty_translations", self.include_empty_translations),
            ("keep_notranslate_tags", self.keep_notranslate_tags),
        ];
        for (name, value) in flags {
            if let Some(value) = value {
                pairs.push((name.to_string(), value.to_string()));
            }
        }
        if let Some(tag) = &self.tag {
            pairs.push(("tag".to_string(), tag.clone()));
        }
        if let Some(options) = &self.format_options {
            for (key, value) in options {
                let value = match value {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                pairs.push((format!("format_options[{key}]"), value));
            }
        }
        pairs
    }
}
