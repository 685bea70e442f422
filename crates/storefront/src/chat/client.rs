//! Gemini API client for the support chat.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::instrument;
use url::Url;

use crate::config::ChatConfig;

use super::error::{ApiErrorResponse, ChatError};
use super::types::{GenerateContentRequest, GenerateContentResponse, GenerationConfig};

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";

/// A text-in, text-out completion service.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Complete `prompt` and return the generated text.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError`] when the service fails or returns no text.
    async fn complete(&self, prompt: &str) -> Result<String, ChatError>;
}

/// Gemini `generateContent` client.
///
/// Cheaply cloneable; clones share the HTTP client.
#[derive(Clone)]
pub struct GeminiClient {
    inner: Arc<GeminiClientInner>,
}

struct GeminiClientInner {
    client: reqwest::Client,
    model: String,
    endpoint: Url,
    generation: GenerationConfig,
}

impl GeminiClient {
    /// Create a client for the public Gemini endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not a valid header value or the
    /// HTTP client cannot be built.
    pub fn new(config: &ChatConfig) -> Result<Self, ChatError> {
        let base = Url::parse(GEMINI_API_URL)
            .map_err(|e| ChatError::Parse(format!("Invalid API URL: {e}")))?;
        Self::with_base_url(config, &base)
    }

    /// Create a client against another base URL (proxy or test server).
    ///
    /// # Errors
    ///
    /// Same as [`GeminiClient::new`].
    pub fn with_base_url(config: &ChatConfig, base: &Url) -> Result<Self, ChatError> {
        let mut key = HeaderValue::from_str(config.api_key.expose_secret())
            .map_err(|_| ChatError::InvalidApiKey)?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("x-goog-api-key", key);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        let endpoint = base
            .join(&format!("models/{}:generateContent", config.model))
            .map_err(|e| ChatError::Parse(format!("Invalid model name: {e}")))?;

        Ok(Self {
            inner: Arc::new(GeminiClientInner {
                client,
                model: config.model.clone(),
                endpoint,
                generation: GenerationConfig::default(),
            }),
        })
    }

    /// Model used for completions.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.inner.model
    }

    /// Handle an error status code.
    async fn handle_error_status(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ChatError {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return ChatError::RateLimited(retry_after);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return ChatError::Unauthorized("API key rejected".to_string());
        }

        match response.text().await {
            Ok(body) => match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_error) => ChatError::Api {
                    status: api_error.error.status,
                    message: api_error.error.message,
                },
                Err(_) => ChatError::Api {
                    status: status.to_string(),
                    message: body,
                },
            },
            Err(e) => ChatError::Http(e),
        }
    }
}

#[async_trait]
impl ChatCompletion for GeminiClient {
    #[instrument(skip(self, prompt), fields(model = %self.inner.model, prompt_len = prompt.len()))]
    async fn complete(&self, prompt: &str) -> Result<String, ChatError> {
        let request = GenerateContentRequest::prompt(prompt, self.inner.generation);

        let response = self
            .inner
            .client
            .post(self.inner.endpoint.clone())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_status(status, response).await);
        }

        let body = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| ChatError::Parse(format!("Failed to parse response: {e}")))?;
        parsed.text().ok_or(ChatError::EmptyCompletion)
    }
}
