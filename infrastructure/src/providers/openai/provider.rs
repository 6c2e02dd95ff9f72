//! OpenAI-compatible chat-completions provider over `reqwest`.

use super::types::{ChatCompletionRequest, parse_completion, status_error, transport_error};
use async_trait::async_trait;
use mabrur_application::ports::inference::{InferenceProvider, ProviderError};
use mabrur_domain::Message;
use std::time::Duration;
use tracing::{debug, trace};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// [`InferenceProvider`] backed by any OpenAI-compatible endpoint.
///
/// One network request per [`complete`](InferenceProvider::complete) call.
/// Deadlines and retries belong to the caller.
pub struct OpenAiProvider {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiProvider {
    pub fn new(
        base_url: &str,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(concat!("mabrur/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            model: model.into(),
            api_key,
            max_tokens: 1500,
            temperature: 0.7,
        })
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl InferenceProvider for OpenAiProvider {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, messages: &[Message]) -> Result<String, ProviderError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(ProviderError::MissingCredentials);
        };

        let body = ChatCompletionRequest {
            model: &self.model,
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        debug!(
            "POST {} ({} messages, model {})",
            self.endpoint,
            messages.len(),
            self.model
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;
        trace!("Provider responded {} with {} bytes", status, text.len());

        if !status.is_success() {
            return Err(status_error(status.as_u16(), &text));
        }

        parse_completion(&text)
    }
}
