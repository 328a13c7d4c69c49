use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use super::TextGenerator;
use crate::config::AppConfig;
use crate::config::GenerationOptions;
use crate::errors::HoopRagError;
use crate::Result;

/// Ollama generation client
#[derive(Debug, Clone)]
pub struct LlmService {
    model: String,
    endpoint: String,
    options: GenerationOptions,
    client: Client,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: &'a GenerationOptions,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl LlmService {
    pub fn new(
        model: impl Into<String>,
        endpoint: impl Into<String>,
        options: GenerationOptions,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HoopRagError::HttpError(e.to_string()))?;

        Ok(Self {
            model: model.into(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            options,
            client,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            &config.llm.model,
            &config.llm.endpoint,
            config.llm.options,
            Duration::from_secs(config.llm.timeout_secs),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub const fn options(&self) -> &GenerationOptions {
        &self.options
    }

    /// Generate a completion with explicit decoding options
    ///
    /// # Errors
    /// - Transport failures and timeouts
    /// - Any non-2xx status
    /// - A body without a `response` string
    pub async fn generate_with_options(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String> {
        let url = format!("{}/api/generate", self.endpoint);
        debug!(
            "Calling Ollama generate API: {} (model={}, num_predict={})",
            url, self.model, options.num_predict
        );

        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| HoopRagError::HttpError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(HoopRagError::LlmError(format!(
                "Ollama API error ({status}): {error_text}"
            )));
        }

        let result: GenerateResponse = response
            .json()
            .await
            .map_err(|e| HoopRagError::LlmError(format!("Failed to parse response: {e}")))?;

        Ok(result.response)
    }
}

#[async_trait]
impl TextGenerator for LlmService {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_with_options(prompt, &self.options).await
    }
}
