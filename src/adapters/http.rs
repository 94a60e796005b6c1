use crate::domain::model::{CountryCode, SelectionSet, SuggestionList};
use crate::domain::ports::{ServiceConfig, SuggestionProvider};
use crate::utils::error::{Result, SuggestError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct SuggestionRequestBody<'a> {
    visited: &'a [CountryCode],
    limit: usize,
}

#[derive(Debug, Deserialize)]
struct SuggestionResponseBody {
    suggestions: Vec<CountryCode>,
}

/// 呼叫建議服務的 HTTP 實作。單次嘗試,不重試
pub struct HttpSuggestionProvider {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    timeout: Duration,
    max_suggestions: usize,
}

impl HttpSuggestionProvider {
    pub fn new(config: &impl ServiceConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.api_endpoint().to_string(),
            api_key: config.api_key().map(|key| key.to_string()),
            timeout: Duration::from_secs(config.timeout_seconds()),
            max_suggestions: config.max_suggestions(),
        }
    }
}

/// 接受兩種回覆形狀:{"suggestions": [...]} 或直接是代碼陣列
fn parse_suggestions(payload: serde_json::Value) -> Result<SuggestionList> {
    match payload {
        serde_json::Value::Array(items) => {
            let mut suggestions = Vec::new();
            for item in items {
                match item {
                    serde_json::Value::String(code) => suggestions.push(CountryCode::from(code)),
                    other => {
                        tracing::debug!("Skipping non-string suggestion entry: {}", other);
                    }
                }
            }
            Ok(suggestions)
        }
        payload @ serde_json::Value::Object(_) => {
            let body: SuggestionResponseBody = serde_json::from_value(payload)?;
            Ok(body.suggestions)
        }
        other => Err(SuggestError::SuggestionRequestFailed {
            status: 200,
            message: format!("Unexpected response shape: {}", other),
        }),
    }
}

#[async_trait]
impl SuggestionProvider for HttpSuggestionProvider {
    async fn request_suggestions(&self, selection: &SelectionSet) -> Result<SuggestionList> {
        let body = SuggestionRequestBody {
            visited: selection.codes(),
            limit: self.max_suggestions,
        };

        tracing::debug!("Posting suggestion request to: {}", self.endpoint);
        let mut request = self
            .client
            .post(self.endpoint.as_str())
            .timeout(self.timeout)
            .json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("Suggestion service status: {}", status);

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message: String = text.trim().chars().take(200).collect();
            return Err(SuggestError::SuggestionRequestFailed {
                status: status.as_u16(),
                message,
            });
        }

        let payload: serde_json::Value = response.json().await?;
        let mut suggestions = parse_suggestions(payload)?;

        if suggestions.len() > self.max_suggestions {
            tracing::debug!(
                "Truncating {} suggestions to the configured limit of {}",
                suggestions.len(),
                self.max_suggestions
            );
            suggestions.truncate(self.max_suggestions);
        }

        Ok(suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    struct MockConfig {
        endpoint: String,
        api_key: Option<String>,
        timeout_seconds: u64,
        max_suggestions: usize,
    }

    impl MockConfig {
        fn new(endpoint: String) -> Self {
            Self {
                endpoint,
                api_key: None,
                timeout_seconds: 5,
                max_suggestions: 5,
            }
        }
    }

    impl ServiceConfig for MockConfig {
        fn api_endpoint(&self) -> &str {
            &self.endpoint
        }

        fn api_key(&self) -> Option<&str> {
            self.api_key.as_deref()
        }

        fn timeout_seconds(&self) -> u64 {
            self.timeout_seconds
        }

        fn max_suggestions(&self) -> usize {
            self.max_suggestions
        }
    }

    fn selection(raw: &[&str]) -> SelectionSet {
        SelectionSet::from_codes(raw.iter().map(|c| CountryCode::from(*c)))
    }

    #[tokio::test]
    async fn test_request_posts_visited_codes_and_limit() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/suggestions")
                .json_body(serde_json::json!({"visited": ["FR", "JP"], "limit": 5}));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"suggestions": ["IT", "ES"]}));
        });

        let config = MockConfig::new(server.url("/api/suggestions"));
        let provider = HttpSuggestionProvider::new(&config);

        let result = provider
            .request_suggestions(&selection(&["FR", "JP"]))
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(
            result,
            vec![CountryCode::from("IT"), CountryCode::from("ES")]
        );
    }

    #[tokio::test]
    async fn test_bare_array_response_is_accepted() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/api/suggestions");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!(["DE", "PT"]));
        });

        let config = MockConfig::new(server.url("/api/suggestions"));
        let provider = HttpSuggestionProvider::new(&config);

        let result = provider
            .request_suggestions(&selection(&["FR"]))
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(
            result,
            vec![CountryCode::from("DE"), CountryCode::from("PT")]
        );
    }

    #[tokio::test]
    async fn test_api_key_is_sent_as_bearer_token() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/suggestions")
                .header("Authorization", "Bearer secret-key");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"suggestions": []}));
        });

        let mut config = MockConfig::new(server.url("/api/suggestions"));
        config.api_key = Some("secret-key".to_string());
        let provider = HttpSuggestionProvider::new(&config);

        provider
            .request_suggestions(&selection(&["FR"]))
            .await
            .unwrap();

        api_mock.assert();
    }

    #[tokio::test]
    async fn test_error_status_becomes_request_failed() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/api/suggestions");
            then.status(500).body("upstream exploded");
        });

        let config = MockConfig::new(server.url("/api/suggestions"));
        let provider = HttpSuggestionProvider::new(&config);

        let result = provider.request_suggestions(&selection(&["FR"])).await;

        api_mock.assert();
        match result {
            Err(SuggestError::SuggestionRequestFailed { status, message }) => {
                assert_eq!(status, 500);
                assert!(message.contains("upstream exploded"));
            }
            other => panic!("expected SuggestionRequestFailed, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn test_configured_timeout_cuts_off_slow_replies() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/api/suggestions");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"suggestions": ["IT"]}))
                .delay(Duration::from_secs(3));
        });

        let mut config = MockConfig::new(server.url("/api/suggestions"));
        config.timeout_seconds = 1;
        let provider = HttpSuggestionProvider::new(&config);

        let started = std::time::Instant::now();
        let result = provider.request_suggestions(&selection(&["FR"])).await;

        api_mock.assert();
        assert!(started.elapsed() < Duration::from_secs(3));
        match result {
            Err(SuggestError::ApiError(e)) => assert!(e.is_timeout()),
            other => panic!("expected a timeout ApiError, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn test_reply_is_truncated_to_max_suggestions() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/api/suggestions");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"suggestions": ["IT", "ES", "DE", "PT"]}));
        });

        let mut config = MockConfig::new(server.url("/api/suggestions"));
        config.max_suggestions = 2;
        let provider = HttpSuggestionProvider::new(&config);

        let result = provider
            .request_suggestions(&selection(&["FR"]))
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(
            result,
            vec![CountryCode::from("IT"), CountryCode::from("ES")]
        );
    }

    #[tokio::test]
    async fn test_non_string_entries_in_bare_array_are_skipped() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/api/suggestions");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!(["IT", 42, "ES"]));
        });

        let config = MockConfig::new(server.url("/api/suggestions"));
        let provider = HttpSuggestionProvider::new(&config);

        let result = provider
            .request_suggestions(&selection(&["FR"]))
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(
            result,
            vec![CountryCode::from("IT"), CountryCode::from("ES")]
        );
    }

    #[tokio::test]
    async fn test_scalar_response_shape_is_rejected() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/api/suggestions");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!("not a list"));
        });

        let config = MockConfig::new(server.url("/api/suggestions"));
        let provider = HttpSuggestionProvider::new(&config);

        let result = provider.request_suggestions(&selection(&["FR"])).await;

        api_mock.assert();
        assert!(matches!(
            result,
            Err(SuggestError::SuggestionRequestFailed { .. })
        ));
    }
}
