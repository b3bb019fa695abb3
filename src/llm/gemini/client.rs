//! Gemini client implementation

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::llm::core::{
    error::LlmError,
    provider::GenerationProvider,
    retry::RetryPolicy,
    types::GenerationResult,
};

use super::mapper::{from_gemini_response, generation_model_names, model_resource, to_gemini_request};
use super::types::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse, ListModelsResponse};

/// Public endpoint of the Generative Language API
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

const API_KEY_HEADER: &str = "x-goog-api-key";
const MODELS_PAGE_SIZE: u32 = 100;

/// Client for the Gemini API authenticated with an API key
pub struct GeminiClient {
    /// HTTP client for making requests
    http_client: Client,
    /// API credential sent with every request
    api_key: String,
    /// Scheme and host, without a trailing slash
    base_url: String,
    /// Retry policy for generation calls
    retry: RetryPolicy,
}

impl GeminiClient {
    /// Create a new Gemini client against the public endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is empty or the HTTP client can't be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::InvalidRequest("API key must not be empty".to_string()));
        }

        let http_client = Client::builder()
            .connect_timeout(std::time::Duration::from_secs(5))
            .build()
            .map_err(|e| LlmError::HttpError {
                status: 0,
                body: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http_client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            retry: RetryPolicy::default(),
        })
    }

    /// Point the client at another endpoint (proxies, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the retry policy used for generation
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Build the endpoint URL for content generation
    fn generate_url(&self, model: &str) -> String {
        format!(
            "{}/v1beta/{}:generateContent",
            self.base_url,
            model_resource(model)
        )
    }

    fn models_url(&self) -> String {
        format!("{}/v1beta/models", self.base_url)
    }

    /// Make one generation request
    async fn send_generate(
        &self,
        url: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, LlmError> {
        let response = self
            .http_client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(request)
            .send()
            .await?;

        parse_response(response).await
    }

    /// Fetch one page of the model listing
    async fn fetch_models_page(&self, page_token: Option<&str>) -> Result<ListModelsResponse, LlmError> {
        let mut request = self
            .http_client
            .get(self.models_url())
            .header(API_KEY_HEADER, &self.api_key)
            .query(&[("pageSize", MODELS_PAGE_SIZE.to_string())]);
        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }

        parse_response(request.send().await?).await
    }
}

/// Decode a successful body, or turn an error status into `LlmError`
async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, LlmError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(match serde_json::from_str::<ErrorEnvelope>(&body) {
            Ok(envelope) if !envelope.error.message.is_empty() => LlmError::ProviderError {
                code: if envelope.error.status.is_empty() {
                    status.as_u16().to_string()
                } else {
                    envelope.error.status
                },
                message: envelope.error.message,
            },
            _ => LlmError::HttpError {
                status: status.as_u16(),
                body,
            },
        });
    }

    Ok(serde_json::from_str(&body)?)
}

#[async_trait]
impl GenerationProvider for GeminiClient {
    async fn generate(&self, model: &str, prompt: &str) -> Result<GenerationResult, LlmError> {
        if model.trim().is_empty() {
            return Err(LlmError::InvalidRequest("model must not be empty".to_string()));
        }

        let url = self.generate_url(model);
        let request = to_gemini_request(prompt);
        debug!(model, prompt_chars = prompt.len(), "sending generation request");

        let response = self
            .retry
            .run("Gemini generateContent", || self.send_generate(&url, &request))
            .await?;

        from_gemini_response(response)
    }

    async fn list_models(&self) -> Result<Vec<String>, LlmError> {
        let mut names = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self.fetch_models_page(page_token.as_deref()).await?;
            names.extend(generation_model_names(page.models));

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(names)
    }
}
