//! HTTP client for an OpenAI-compatible API.
//!
//! Wraps the `/embeddings` and `/chat/completions` endpoints using
//! [`reqwest`], with and without streaming.

use async_trait::async_trait;
use futures::TryStreamExt;
use idea_garden_core::chat::PromptMessage;
use serde::{Deserialize, Serialize};

use crate::config::AiConfig;
use crate::error::AiError;
use crate::provider::{AiProvider, CompletionOptions, TokenStream};
use crate::stream::decode_tokens;

/// Client for one OpenAI-compatible endpoint.
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    chat_model: String,
    embedding_model: String,
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
    encoding_format: &'static str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [PromptMessage],
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiClient {
    /// Build a client from configuration. Returns `None` when no API key
    /// is set.
    pub fn from_config(config: &AiConfig) -> Option<Self> {
        let api_key = config.api_key.clone()?;
        Some(Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            chat_model: config.chat_model.clone(),
            embedding_model: config.embedding_model.clone(),
        })
    }

    fn chat_request<'a>(
        &'a self,
        messages: &'a [PromptMessage],
        options: CompletionOptions,
        stream: bool,
    ) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.chat_model,
            messages,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            stream,
        }
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<reqwest::Response, AiError> {
        let response = self
            .client
            .post(format!("{}/{path}", self.base_url))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;
        Self::ensure_success(response).await
    }

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or [`AiError::Api`] with the status and body.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, AiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(AiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl AiProvider for OpenAiClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, AiError> {
        if text.trim().is_empty() {
            return Err(AiError::EmptyInput);
        }

        let request = EmbeddingRequest {
            model: &self.embedding_model,
            input: text,
            encoding_format: "float",
        };
        let response: EmbeddingResponse = self.post("embeddings", &request).await?.json().await?;

        response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .filter(|v| !v.is_empty())
            .ok_or(AiError::EmptyResponse)
    }

    async fn complete(
        &self,
        messages: &[PromptMessage],
        options: CompletionOptions,
    ) -> Result<String, AiError> {
        let request = self.chat_request(messages, options, false);
        let response: ChatCompletionResponse =
            self.post("chat/completions", &request).await?.json().await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.is_empty())
            .ok_or(AiError::EmptyResponse)
    }

    async fn stream(
        &self,
        messages: &[PromptMessage],
        options: CompletionOptions,
    ) -> Result<TokenStream, AiError> {
        let request = self.chat_request(messages, options, true);
        let response = self.post("chat/completions", &request).await?;

        let bytes = response.bytes_stream().map_ok(|chunk| chunk.to_vec());
        Ok(decode_tokens(Box::pin(bytes)))
    }
}

#[cfg(test)]
mod tests {
    use idea_garden_core::chat::Role;

    use super::*;

    fn client() -> OpenAiClient {
        OpenAiClient::from_config(&AiConfig {
            api_key: Some("sk-test".into()),
            ..AiConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn no_key_means_no_client() {
        assert!(OpenAiClient::from_config(&AiConfig::default()).is_none());
    }

    #[test]
    fn chat_request_serializes_openai_shape() {
        let client = client();
        let messages = vec![PromptMessage::new(Role::System, "be kind")];
        let json =
            serde_json::to_value(client.chat_request(&messages, CompletionOptions::CHAT, true)).unwrap();

        assert_eq!(json["model"], "gpt-4");
        assert_eq!(json["max_tokens"], 500);
        assert_eq!(json["stream"], true);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], "be kind");
    }

    #[test]
    fn blocking_request_omits_stream_flag() {
        let client = client();
        let json =
            serde_json::to_value(client.chat_request(&[], CompletionOptions::DOCUMENT, false)).unwrap();

        assert!(json.get("stream").is_none());
        assert_eq!(json["max_tokens"], 2000);
    }

    #[test]
    fn embedding_request_asks_for_floats() {
        let json = serde_json::to_value(EmbeddingRequest {
            model: "text-embedding-3-small",
            input: "hello",
            encoding_format: "float",
        })
        .unwrap();
        assert_eq!(json["encoding_format"], "float");
    }
}
