//! Text generation
//!
//! [`LlmService`] calls Ollama's `/api/generate` synchronously (no streaming)
//! with the decoding options from `[llm.options]`.

use async_trait::async_trait;

use crate::Result;

pub mod client;

pub use client::LlmService;

/// Turns a prompt into a completion.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}
