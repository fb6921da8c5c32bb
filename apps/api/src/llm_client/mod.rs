//! Hosted completion client. The single point of entry for calls to the
//! OpenAI-compatible `/completions` endpoint.
//!
//! The API key is supplied per request by the caller; nothing is stored.
//! Failures surface immediately, there is no retry loop.

use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("completion returned no choices")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f64,
    n: u32,
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub text: String,
}

impl CompletionResponse {
    /// First choice, trimmed of surrounding whitespace.
    pub fn first_text(&self) -> Option<String> {
        self.choices.first().map(|c| c.text.trim().to_string())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct CompletionClient {
    client: Client,
    base_url: String,
    model: String,
}

impl CompletionClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url: String = base_url.into();
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends one completion request and returns the first choice's text.
    pub async fn complete(
        &self,
        api_key: &str,
        prompt: &str,
        max_tokens: u32,
        temperature: f64,
    ) -> Result<String, CompletionError> {
        let request_body = CompletionRequest {
            model: &self.model,
            prompt,
            max_tokens,
            temperature,
            n: 1,
        };

        let response = self
            .client
            .post(format!("{}/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: CompletionResponse = response.json().await?;
        debug!("Completion succeeded: {} choice(s)", completion.choices.len());

        completion.first_text().ok_or(CompletionError::EmptyContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client_for(server: &mockito::Server) -> CompletionClient {
        CompletionClient::new(server.url(), "gpt-3.5-turbo-instruct", Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_complete_returns_trimmed_first_choice() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(Matcher::PartialJson(json!({
                "model": "gpt-3.5-turbo-instruct",
                "prompt": "Write a cover letter",
                "max_tokens": 300,
                "n": 1
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"text":"\n\n  Dear hiring manager  \n"},{"text":"ignored"}]}"#)
            .create_async()
            .await;

        let text = client_for(&server)
            .complete("sk-test", "Write a cover letter", 300, 0.7)
            .await
            .unwrap();

        assert_eq!(text, "Dear hiring manager");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_api_error_message_is_extracted() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/completions")
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .complete("sk-wrong", "prompt", 10, 0.7)
            .await
            .unwrap_err();

        match err {
            CompletionError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_error_body_is_passed_through() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/completions")
            .with_status(502)
            .with_body("bad gateway")
            .create_async()
            .await;

        let err = client_for(&server).complete("k", "p", 10, 0.7).await.unwrap_err();
        assert!(err.to_string().contains("bad gateway"));
    }

    #[tokio::test]
    async fn test_empty_choices_is_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let err = client_for(&server).complete("k", "p", 10, 0.7).await.unwrap_err();
        assert!(matches!(err, CompletionError::EmptyContent));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client =
            CompletionClient::new("http://localhost:9/v1/", "m", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url, "http://localhost:9/v1");
        assert_eq!(client.model(), "m");
    }
}
