//! Mock translation service and configuration fixtures

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Access token the mock service accepts
pub const TOKEN: &str = "test-token";

/// Project id served by the mock service
pub const PROJECT: &str = "proj-1";

/// Locales served by the mock service: (id, name, code)
pub const LOCALES: &[(&str, &str, &str)] = &[
    ("a1", "English", "en"),
    ("a2", "German", "de"),
    ("a3", "French", "fr"),
];

/// Body served for a locale download
pub fn locale_body(code: &str) -> String {
    format!("{code}:\n  greeting: hello from {code}\n")
}

/// Start a mock service with [`LOCALES`] in [`PROJECT`]
///
/// Every locale download answers with [`locale_body`].
pub async fn start_service() -> MockServer {
    let server = MockServer::start().await;

    let listing: Vec<_> = LOCALES
        .iter()
        .map(|(id, name, code)| json!({"id": id, "name": name, "code": code, "default": false}))
        .collect();
    Mock::given(method("GET"))
        .and(path(format!("/projects/{PROJECT}/locales")))
        .and(header("Authorization", format!("token {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing))
        .mount(&server)
        .await;

    for (id, _, code) in LOCALES {
        Mock::given(method("GET"))
            .and(path(format!("/projects/{PROJECT}/locales/{id}/download")))
            .and(header("Authorization", format!("token {TOKEN}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_string(locale_body(code)))
            .mount(&server)
            .await;
    }

    server
}

/// A configuration document pulling one target with `pattern`
pub fn single_target_config(pattern: &str) -> String {
    format!(
        r#"phraseapp:
  access_token: {TOKEN}
  project_id: {PROJECT}
  file_format: yml
  pull:
    targets:
      - file: {pattern}
"#
    )
}
