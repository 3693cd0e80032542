//! Client for OpenAI-compatible chat-completion endpoints

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::LlmProvider;
use crate::config::LlmConfig;
use crate::error::{Error, Result};

/// Chat-completion API client.
///
/// One POST per prompt. No retry; no timeout unless one is configured.
pub struct ChatCompletionClient {
    /// HTTP client
    client: Client,
    /// Endpoint URL
    endpoint: String,
    /// Model id
    model: String,
    /// Sampling temperature
    temperature: f32,
    /// Bearer credential
    api_key: Option<String>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl ChatCompletionClient {
    /// Create a new client from configuration
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            api_key: config.api_key.clone(),
        })
    }

    /// Extract the first completion's text from a response body
    fn parse_completion(body: &str) -> Result<String> {
        let parsed: ChatResponse = serde_json::from_str(body)
            .map_err(|e| Error::ResponseFormat(format!("invalid body: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::ResponseFormat("no choices in response".to_string()))?
            .message
            .and_then(|m| m.content)
            .ok_or_else(|| Error::ResponseFormat("first choice has no message content".to_string()))
    }
}

#[async_trait]
impl LlmProvider for ChatCompletionClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::Auth("no API credential configured".to_string()))?;

        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
        };

        tracing::info!("Generating answer with model: {}", self.model);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Generation request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(format!("Failed to read response body: {}", e)))?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::Auth(format!("HTTP {} - {}", status.as_u16(), body)));
        }

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        let answer = Self::parse_completion(&body)?;
        tracing::debug!("Received {} characters from {}", answer.len(), self.model);

        Ok(answer)
    }

    fn name(&self) -> &str {
        "chat-completions"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{spawn_mock_llm, MockReply};
    use serde_json::json;

    fn config(endpoint: String, api_key: Option<&str>) -> LlmConfig {
        LlmConfig {
            endpoint,
            api_key: api_key.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_completion() {
        let body = json!({
            "choices": [
                {"message": {"role": "assistant", "content": "first"}},
                {"message": {"role": "assistant", "content": "second"}}
            ]
        })
        .to_string();
        assert_eq!(ChatCompletionClient::parse_completion(&body).unwrap(), "first");
    }

    #[test]
    fn test_parse_completion_malformed() {
        for body in [
            "not json",
            r#"{"id": "x"}"#,
            r#"{"choices": []}"#,
            r#"{"choices": [{"index": 0}]}"#,
            r#"{"choices": [{"message": {"role": "assistant"}}]}"#,
        ] {
            let err = ChatCompletionClient::parse_completion(body).unwrap_err();
            assert!(matches!(err, Error::ResponseFormat(_)), "body {}", body);
        }
    }

    #[tokio::test]
    async fn test_generate_sends_expected_request() {
        let mock = spawn_mock_llm(MockReply::answer("Paris")).await;
        let client = ChatCompletionClient::new(&config(mock.endpoint(), Some("test-key"))).unwrap();

        let answer = client.generate("What is the capital of France?").await.unwrap();
        assert_eq!(answer, "Paris");

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        let (auth, body) = &requests[0];
        assert_eq!(auth.as_deref(), Some("Bearer test-key"));
        assert_eq!(body["model"], "llama3-70b-8192");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "What is the capital of France?");
        assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_missing_credential_sends_nothing() {
        let mock = spawn_mock_llm(MockReply::answer("unused")).await;
        let client = ChatCompletionClient::new(&config(mock.endpoint(), None)).unwrap();

        let err = client.generate("hi").await.unwrap_err();
        assert!(matches!(err, Error::Auth(_)));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_credential() {
        let mock = spawn_mock_llm(MockReply::status(401, r#"{"error":"invalid api key"}"#)).await;
        let client = ChatCompletionClient::new(&config(mock.endpoint(), Some("bad"))).unwrap();

        let err = client.generate("hi").await.unwrap_err();
        match err {
            Error::Auth(msg) => assert!(msg.contains("invalid api key")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_server_error() {
        let mock = spawn_mock_llm(MockReply::status(500, "upstream exploded")).await;
        let client = ChatCompletionClient::new(&config(mock.endpoint(), Some("key"))).unwrap();

        let err = client.generate("hi").await.unwrap_err();
        match err {
            Error::Api { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "upstream exploded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_success_body() {
        let mock = spawn_mock_llm(MockReply::status(200, r#"{"choices": []}"#)).await;
        let client = ChatCompletionClient::new(&config(mock.endpoint(), Some("key"))).unwrap();

        let err = client.generate("hi").await.unwrap_err();
        assert!(matches!(err, Error::ResponseFormat(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        // Bind then drop to get a port with nothing listening
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let endpoint = format!("http://{}/v1/chat/completions", addr);
        let client = ChatCompletionClient::new(&config(endpoint, Some("key"))).unwrap();

        let err = client.generate("hi").await.unwrap_err();
        assert!(matches!(err, Error::Network(_)));
    }
}
