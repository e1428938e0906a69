//! Translation service client
//!
//! The orchestrator only talks to the service through [`TranslationClient`],
//! so tests and embedders can plug in their own implementation.
//! [`PhraseClient`] is the HTTP implementation for the Phrase v2 API.

use crate::error::{Error, Result};
use crate::params::DownloadParams;
use crate::types::RemoteLocale;
use async_trait::async_trait;
use std::time::Duration;

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.phraseapp.com/api/v2";

/// Page size used when listing locales
pub const LOCALES_PER_PAGE: usize = 100;

/// Access to a remote translation project
#[async_trait]
pub trait TranslationClient: Send + Sync {
    /// List the locales of a project, in the order the service returns them
    async fn list_project_locales(
        &self,
        project_id: &str,
        access_token: &str,
    ) -> Result<Vec<RemoteLocale>>;

    /// Download the content of one locale
    ///
    /// The locale is `params.locale_id`.
    async fn download_locale(
        &self,
        project_id: &str,
        access_token: &str,
        params: &DownloadParams,
    ) -> Result<Vec<u8>>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}

/// HTTP client for the Phrase v2 API
#[derive(Clone, Debug)]
pub struct PhraseClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl PhraseClient {
    /// Create a client for the public API
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client for another API endpoint
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .user_agent(concat!("locale-sync/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// The base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        for segment in segments {
            url.push('/');
            url.push_str(&urlencoding::encode(segment));
        }
        url
    }

    async fn get(
        &self,
        url: &str,
        access_token: &str,
        query: &[(String, String)],
    ) -> Result<reqwest::Response> {
        let mut request = self.http_client.get(url).query(query);
        if !access_token.is_empty() {
            request = request.header("Authorization", format!("token {access_token}"));
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                body
            };
            return Err(Error::Remote {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl TranslationClient for PhraseClient {
    async fn list_project_locales(
        &self,
        project_id: &str,
        access_token: &str,
    ) -> Result<Vec<RemoteLocale>> {
        let url = self.url(&["projects", project_id, "locales"]);
        let mut locales = Vec::new();

        for page in 1.. {
            let query = [
                ("page".to_string(), page.to_string()),
                ("per_page".to_string(), LOCALES_PER_PAGE.to_string()),
            ];
            let body = self.get(&url, access_token, &query).await?.bytes().await?;
            let batch: Vec<RemoteLocale> = serde_json::from_slice(&body)?;

            let done = batch.len() < LOCALES_PER_PAGE;
            locales.extend(batch);
            if done {
                break;
            }
        }

        tracing::debug!(project_id, count = locales.len(), "listed remote locales");
        Ok(locales)
    }

    async fn download_locale(
        &self,
        project_id: &str,
        access_token: &str,
        params: &DownloadParams,
    ) -> Result<Vec<u8>> {
        let url = self.url(&[
            "projects",
            project_id,
            "locales",
            &params.locale_id,
            "download",
        ]);
        let response = self.get(&url, access_token, &params.query_pairs()).await?;
        Ok(response.bytes().await?.to_vec())
    }

    fn name(&self) -> &'static str {
        "phrase"
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn locale_json(id: &str, code: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "name": format!("Locale {code}"),
            "code": code,
            "default": false,
            "main": false,
            "rtl": false
        })
    }

    #[tokio::test]
    async fn lists_locales_with_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/projects/p1/locales"))
            .and(header("Authorization", "token secret"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                locale_json("a1", "en"),
                locale_json("a2", "de"),
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = PhraseClient::with_base_url(server.uri()).unwrap();
        let locales = client.list_project_locales("p1", "secret").await.unwrap();

        assert_eq!(
            locales,
            vec![
                RemoteLocale::new("a1", "Locale en", "en"),
                RemoteLocale::new("a2", "Locale de", "de"),
            ]
        );
    }

    #[tokio::test]
    async fn follows_full_pages() {
        let server = MockServer::start().await;
        let first: Vec<_> = (0..LOCALES_PER_PAGE)
            .map(|i| locale_json(&format!("id{i}"), &format!("c{i}")))
            .collect();
        Mock::given(method("GET"))
            .and(path("/projects/p1/locales"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(first))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/projects/p1/locales"))
            .and(query_param("page", "2"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([locale_json("last", "zz")])),
            )
            .mount(&server)
            .await;

        let client = PhraseClient::with_base_url(server.uri()).unwrap();
        let locales = client.list_project_locales("p1", "t").await.unwrap();

        assert_eq!(locales.len(), LOCALES_PER_PAGE + 1);
        assert_eq!(locales[0].id, "id0");
        assert_eq!(locales[LOCALES_PER_PAGE].id, "last");
    }

    #[tokio::test]
    async fn unauthorized_listing_is_remote_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/projects/p1/locales"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
            .mount(&server)
            .await;

        let client = PhraseClient::with_base_url(server.uri()).unwrap();
        let err = client.list_project_locales("p1", "bad").await.unwrap_err();

        match err {
            Error::Remote { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "invalid token");
            }
            other => panic!("expected Remote error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_error_body_uses_reason_phrase() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = PhraseClient::with_base_url(server.uri()).unwrap();
        let err = client.list_project_locales("missing", "t").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Remote { status: 404, ref message } if message == "Not Found"
        ));
    }

    #[tokio::test]
    async fn malformed_listing_is_serialization_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = PhraseClient::with_base_url(server.uri()).unwrap();
        let err = client.list_project_locales("p1", "t").await.unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[tokio::test]
    async fn downloads_with_set_parameters_only() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/projects/p1/locales/a1/download"))
            .and(query_param("file_format", "yml"))
            .and(query_param("include_empty_translations", "false"))
            .and(query_param("tag", "web"))
            .and(query_param("format_options[indent]", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"en:\n  hello: Hello\n"))
            .expect(1)
            .mount(&server)
            .await;

        let mut options = std::collections::BTreeMap::new();
        options.insert("indent".to_string(), serde_json::json!(2));
        let params = DownloadParams {
            locale_id: "a1".to_string(),
            file_format: "yml".to_string(),
            include_empty_translations: Some(false),
            tag: Some("web".to_string()),
            format_options: Some(options),
            ..Default::default()
        };

        let client = PhraseClient::with_base_url(format!("{}/", server.uri())).unwrap();
        let body = client.download_locale("p1", "t", &params).await.unwrap();

        assert_eq!(body, b"en:\n  hello: Hello\n");
    }

    #[tokio::test]
    async fn download_error_carries_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/projects/p1/locales/a9/download"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let params = DownloadParams {
            locale_id: "a9".to_string(),
            file_format: "yml".to_string(),
            ..Default::default()
        };
        let client = PhraseClient::with_base_url(server.uri()).unwrap();
        let err = client.download_locale("p1", "t", &params).await.unwrap_err();
        assert!(matches!(err, Error::Remote { status: 429, .. }));
    }

    #[test]
    fn path_segments_are_encoded() {
        let client = PhraseClient::with_base_url("https://api.example.com/v2/").unwrap();
        assert_eq!(client.base_url(), "https://api.example.com/v2");
        assert_eq!(
            client.url(&["projects", "a b/c", "locales"]),
            "https://api.example.com/v2/projects/a%20b%2Fc/locales"
        );
    }
}
