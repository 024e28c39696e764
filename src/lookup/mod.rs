//! IPA to text reverse lookup through a hosted chat-completion model.

pub mod azure;

use serde::Serialize;

use crate::config::UpstreamConfig;
use crate::error::AppError;
use azure::{chat_completions_url, AzureChatClient, ChatMessage, ChatRequest};

pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that converts IPA symbols \
into English words. Output only the spelled-out English word(s), no extra commentary. \
If multiple words are possible, pick the most common.";

pub const TEMPERATURE: f32 = 0.0;
pub const MAX_TOKENS: u32 = 50;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IpaToTextResponse {
    pub text: String,
    /// 1.0 for a normal completion, 0.0 otherwise. Not a probability.
    pub confidence: Option<f32>,
    pub completed: bool,
}

pub struct ReverseLookup {
    config: UpstreamConfig,
    client: AzureChatClient,
}

impl ReverseLookup {
    pub fn new(config: UpstreamConfig) -> Self {
        Self {
            config,
            client: AzureChatClient::new(),
        }
    }

    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    pub async fn guess_word(&self, ipa: &str) -> Result<IpaToTextResponse, AppError> {
        let (endpoint, api_key, deployment) = match (
            &self.config.endpoint,
            &self.config.api_key,
            &self.config.deployment,
        ) {
            (Some(endpoint), Some(api_key), Some(deployment)) => (endpoint, api_key, deployment),
            _ => {
                let missing = self.config.missing();
                tracing::error!("Reverse lookup not configured, missing: {}", missing.join(", "));
                return Err(AppError::Configuration(format!(
                    "Azure OpenAI not configured. Please set {} environment variables.",
                    missing.join(", ")
                )));
            }
        };

        let url = chat_completions_url(endpoint, deployment, &self.config.api_version)
            .map_err(AppError::Configuration)?;
        let request = build_request(ipa);

        let response = self
            .client
            .complete(url, api_key, &request)
            .await
            .map_err(|e| {
                tracing::error!("Azure OpenAI call to deployment {} failed: {}", deployment, e);
                e
            })?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Upstream("Azure OpenAI returned no choices".to_string()))?;

        let completed = choice.finish_reason.as_deref() == Some("stop");
        let text = choice.message.content.unwrap_or_default().trim().to_string();

        tracing::info!("Guessed {:?} for IPA {:?} (completed: {})", text, ipa, completed);

        Ok(IpaToTextResponse {
            text,
            confidence: Some(if completed { 1.0 } else { 0.0 }),
            completed,
        })
    }
}

pub fn build_request(ipa: &str) -> ChatRequest {
    ChatRequest {
        messages: vec![
            ChatMessage {
                role: "system",
                content: SYSTEM_PROMPT.to_string(),
            },
            ChatMessage {
                role: "user",
                content: format!("IPA: {}", ipa),
            },
        ],
        temperature: TEMPERATURE,
        max_tokens: MAX_TOKENS,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const DEPLOYMENT: &str = "gpt-test";

    pub fn configured(endpoint: String) -> UpstreamConfig {
        UpstreamConfig {
            endpoint: Some(endpoint),
            api_key: Some("test-key".into()),
            deployment: Some(DEPLOYMENT.into()),
            api_version: "2023-05-15".into(),
        }
    }

    pub fn completion(content: &str, finish_reason: &str) -> serde_json::Value {
        json!({
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": finish_reason
            }]
        })
    }

    #[test]
    fn test_build_request() {
        let request = build_request("kæt");
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, "system");
        assert_eq!(request.messages[0].content, SYSTEM_PROMPT);
        assert_eq!(request.messages[1].content, "IPA: kæt");
        assert_eq!(request.temperature, 0.0);
        assert_eq!(request.max_tokens, 50);
    }

    #[tokio::test]
    async fn test_unconfigured_fails_fast() {
        let lookup = ReverseLookup::new(UpstreamConfig::default());
        let err = lookup.guess_word("kæt").await.unwrap_err();
        match err {
            AppError::Configuration(msg) => {
                assert!(msg.contains("AZURE_OPENAI_ENDPOINT"));
                assert!(msg.contains("AZURE_OPENAI_API_KEY"));
                assert!(msg.contains("AZURE_OPENAI_ENGINE"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_partially_configured_names_missing_value() {
        let mut config = configured("http://127.0.0.1:9".into());
        config.deployment = None;
        let err = ReverseLookup::new(config).guess_word("kæt").await.unwrap_err();
        match err {
            AppError::Configuration(msg) => {
                assert!(msg.contains("AZURE_OPENAI_ENGINE"));
                assert!(!msg.contains("AZURE_OPENAI_API_KEY"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_guess_word_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/openai/deployments/{}/chat/completions", DEPLOYMENT)))
            .and(query_param("api-version", "2023-05-15"))
            .and(header("api-key", "test-key"))
            .and(body_partial_json(json!({ "temperature": 0.0, "max_tokens": 50 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("  cat \n", "stop")))
            .expect(1)
            .mount(&server)
            .await;

        let lookup = ReverseLookup::new(configured(server.uri()));
        let response = lookup.guess_word("kæt").await.unwrap();
        assert_eq!(response.text, "cat");
        assert!(response.completed);
        assert_eq!(response.confidence, Some(1.0));
    }

    #[tokio::test]
    async fn test_truncated_completion_not_completed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("categor", "length")))
            .mount(&server)
            .await;

        let response = ReverseLookup::new(configured(server.uri()))
            .guess_word("kætəɡɔɹi")
            .await
            .unwrap();
        assert_eq!(response.text, "categor");
        assert!(!response.completed);
        assert_eq!(response.confidence, Some(0.0));
    }

    #[tokio::test]
    async fn test_upstream_error_carries_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": { "code": "401", "message": "Access denied due to invalid subscription key." }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = ReverseLookup::new(configured(server.uri()))
            .guess_word("kæt")
            .await
            .unwrap_err();
        match err {
            AppError::Upstream(msg) => {
                assert!(msg.contains("401"));
                assert!(msg.contains("invalid subscription key"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_choices_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let err = ReverseLookup::new(configured(server.uri()))
            .guess_word("kæt")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }
}
