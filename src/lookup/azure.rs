//! Minimal Azure OpenAI chat-completions client.

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChoiceMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// `{endpoint}/openai/deployments/{deployment}/chat/completions?api-version={version}`,
/// with the deployment encoded as a single path segment.
pub fn chat_completions_url(
    endpoint: &str,
    deployment: &str,
    api_version: &str,
) -> Result<Url, String> {
    let mut url = Url::parse(endpoint)
        .map_err(|e| format!("Invalid AZURE_OPENAI_ENDPOINT {:?}: {}", endpoint, e))?;

    url.path_segments_mut()
        .map_err(|_| format!("Invalid AZURE_OPENAI_ENDPOINT {:?}: not a base URL", endpoint))?
        .pop_if_empty()
        .extend(["openai", "deployments", deployment, "chat", "completions"]);

    url.set_query(None);
    url.set_fragment(None);
    url.query_pairs_mut().append_pair("api-version", api_version);

    Ok(url)
}

pub struct AzureChatClient {
    http: reqwest::Client,
}

impl AzureChatClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    pub async fn complete(
        &self,
        url: Url,
        api_key: &str,
        request: &ChatRequest,
    ) -> Result<ChatResponse, AppError> {
        let response = self
            .http
            .post(url)
            .header("api-key", api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Error during API call: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            return Err(AppError::Upstream(format!(
                "Azure OpenAI API error ({}): {}",
                status.as_u16(),
                message
            )));
        }

        response
            .json::<ChatResponse>()
            .await
            .map_err(|e| AppError::Upstream(format!("Invalid Azure OpenAI response: {}", e)))
    }
}

impl Default for AzureChatClient {
    fn default() -> Self {
        Self::new()
    }
}
