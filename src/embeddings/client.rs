//! Ollama embeddings client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use super::Embedder;
use crate::config::AppConfig;
use crate::errors::HoopRagError;
use crate::Result;

/// Client for generating embeddings from an Ollama server
#[derive(Debug, Clone)]
pub struct EmbeddingClient {
    model: String,
    endpoint: String,
    client: Client,
}

#[derive(Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct OllamaResponse {
    embedding: Vec<f32>,
}

impl EmbeddingClient {
    /// Create a new embedding client
    ///
    /// # Errors
    /// - HTTP client build errors (invalid configuration)
    pub fn new(model: impl Into<String>, endpoint: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .pool_idle_timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| HoopRagError::HttpError(e.to_string()))?;

        Ok(Self {
            model: model.into(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(&config.embeddings.model, &config.embeddings.endpoint)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate embedding using Ollama API
    ///
    /// # Errors
    /// - Transport failures (connection refused, reset)
    /// - Any non-2xx status
    /// - A body without an `embedding` array
    pub async fn generate(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/api/embeddings", self.endpoint);
        debug!("Calling Ollama embeddings API: {}", url);

        let request = OllamaRequest {
            model: &self.model,
            prompt: text,
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
            return Err(HoopRagError::EmbeddingError(format!(
                "Ollama API error ({status}): {error_text}"
            )));
        }

        let result: OllamaResponse = response
            .json()
            .await
            .map_err(|e| HoopRagError::EmbeddingError(format!("Failed to parse response: {e}")))?;

        Ok(result.embedding)
    }
}

#[async_trait]
impl Embedder for EmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.generate(text).await
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use mockito::Server;

    use super::*;

    #[tokio::test]
    async fn test_embed_posts_model_and_prompt() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/embeddings")
            .match_body(Matcher::Json(serde_json::json!({
                "model": "nomic-embed-text",
                "prompt": "Who won the game?"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"embedding": [0.5, -0.25, 1.0]}"#)
            .create_async()
            .await;

        let client = EmbeddingClient::new("nomic-embed-text", server.url()).unwrap();
        let embedding = client.embed("Who won the game?").await.unwrap();

        assert_eq!(embedding, vec![0.5, -0.25, 1.0]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_hard_failure() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/embeddings")
            .with_status(500)
            .with_body("model not loaded")
            .create_async()
            .await;

        let client = EmbeddingClient::new("nomic-embed-text", server.url()).unwrap();
        let err = client.embed("anything").await.unwrap_err();

        assert!(err.is_provider_unavailable());
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("model not loaded"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/embeddings")
            .with_status(200)
            .with_body(r#"{"vector": []}"#)
            .create_async()
            .await;

        let client = EmbeddingClient::new("nomic-embed-text", server.url()).unwrap();
        let err = client.embed("anything").await.unwrap_err();
        assert!(matches!(err, HoopRagError::EmbeddingError(_)));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = EmbeddingClient::new("m", "http://localhost:11434/").unwrap();
        assert_eq!(client.endpoint, "http://localhost:11434");
        assert_eq!(client.model(), "m");
    }
}
