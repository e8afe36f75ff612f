use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Serialize)]
struct ResponderRequest<'a> {
    user_input: &'a str,
}

#[derive(Deserialize)]
struct ResponderResponse {
    response: String,
}

/// Ways a remote exchange can fail. All of them end up as the same
/// fallback entry in the transcript.
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error! status: {0}")]
    Status(StatusCode),

    #[error("malformed response body: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Something that turns user input into a reply
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, user_input: &str) -> Result<String, ExchangeError>;
}

/// HTTP client for the `/get_response` endpoint
#[derive(Clone)]
pub struct ResponderClient {
    client: Client,
    base_url: String,
}

impl ResponderClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}/get_response", self.base_url)
    }
}

#[async_trait]
impl Responder for ResponderClient {
    async fn respond(&self, user_input: &str) -> Result<String, ExchangeError> {
        let request = ResponderRequest { user_input };

        let response = self
            .client
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ExchangeError::Status(response.status()));
        }

        let body = response.bytes().await?;
        let parsed: ResponderResponse = serde_json::from_slice(&body)?;
        Ok(parsed.response)
    }
}
