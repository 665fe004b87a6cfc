use crate::config::{BackendConfig, Provider};
use crate::llm::{
    Backend, BackendError, ChatRequest, ChatResponse, GenerateContentRequest,
    GenerateContentResponse,
};
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;
use url::Url;

const GEMINI_KEY_HEADER: &str = "x-goog-api-key";

/// HTTP client for the configured provider.
///
/// One attempt per call, bounded by `timeout_secs`. Without an API key the
/// backend reports itself unconfigured and `generate` fails fast with
/// [`BackendError::Unavailable`] before touching the network.
pub struct HttpBackend {
    config: BackendConfig,
    client: Client,
}

impl HttpBackend {
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BackendError::Call(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// `{api_url}/models/{model}:generateContent`
    ///
    /// The key travels in the `x-goog-api-key` header, never in the URL.
    fn gemini_url(&self) -> Result<Url, BackendError> {
        let base = self.config.api_url().trim_end_matches('/');
        Url::parse(&format!(
            "{}/models/{}:generateContent",
            base,
            self.config.model()
        ))
        .map_err(|e| BackendError::Call(format!("Invalid API URL: {}", e)))
    }

    async fn call_gemini(&self, key: &str, prompt: &str) -> Result<String, BackendError> {
        let body = GenerateContentRequest::new(
            prompt,
            self.config.max_tokens,
            self.config.temperature,
        );

        let response = self
            .client
            .post(self.gemini_url()?)
            .header(GEMINI_KEY_HEADER, key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let parsed: GenerateContentResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(parse_error)?;

        parsed.into_text()
    }

    async fn call_openai(&self, key: &str, prompt: &str) -> Result<String, BackendError> {
        let body = ChatRequest::new(
            self.config.model(),
            prompt,
            self.config.max_tokens,
            self.config.temperature,
        );

        let response = self
            .client
            .post(self.config.api_url())
            .bearer_auth(key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let parsed: ChatResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(parse_error)?;

        parsed.into_text()
    }
}

#[async_trait]
impl Backend for HttpBackend {
    fn is_configured(&self) -> bool {
        self.config.has_credential()
    }

    async fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        let key = self.config.api_key.as_ref().ok_or(BackendError::Unavailable)?;

        debug!(
            provider = %self.config.provider,
            model = self.config.model(),
            prompt_chars = prompt.chars().count(),
            "Calling backend"
        );

        match self.config.provider {
            Provider::Gemini => self.call_gemini(key, prompt).await,
            Provider::OpenAi => self.call_openai(key, prompt).await,
        }
    }
}

// reqwest errors print the request URL; strip it before the text reaches logs.
fn transport_error(e: reqwest::Error) -> BackendError {
    let e = e.without_url();
    let message = if e.is_timeout() {
        "Request timeout - the API took too long to respond".to_string()
    } else if e.is_connect() {
        "Connection error - unable to reach the API".to_string()
    } else {
        format!("Network error: {}", e)
    };
    BackendError::Call(message)
}

fn parse_error(e: reqwest::Error) -> BackendError {
    BackendError::Call(format!(
        "Failed to parse API response as JSON: {}",
        e.without_url()
    ))
}

async fn check_status(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(BackendError::Call(match status.as_u16() {
        401 => "Authentication failed - check your API key".to_string(),
        403 => "Access forbidden - insufficient permissions".to_string(),
        429 => "Rate limit exceeded - too many requests".to_string(),
        500..=599 => format!("Server error ({}): {}", status, error_text),
        _ => format!("HTTP error {}: {}", status, error_text),
    }))
}
