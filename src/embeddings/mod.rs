//! Embeddings generation module
//!
//! - [`EmbeddingClient`]: Ollama `/api/embeddings` over HTTP
//! - [`text`]: the sentences each stored row is embedded as
//! - [`backfill`]: offline population of the `embedding` columns
//!
//! # Examples
//!
//! ```rust,no_run
//! use hooprag::config::AppConfig;
//! use hooprag::embeddings::{Embedder, EmbeddingClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let client = EmbeddingClient::from_config(&config)?;
//!
//!     let embedding = client.embed("Who won the game on Jan 5?").await?;
//!     println!("Generated embedding with {} dimensions", embedding.len());
//!
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;

use crate::errors::HoopRagError;
use crate::Result;

pub mod backfill;
pub mod client;
pub mod text;

pub use backfill::backfill_embeddings;
pub use backfill::BackfillStats;
pub use client::EmbeddingClient;

/// Turns text into a fixed-length vector.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Fail unless `embedding` has exactly `expected` components.
pub fn check_dimension(embedding: &[f32], expected: usize) -> Result<()> {
    if embedding.len() == expected {
        Ok(())
    } else {
        Err(HoopRagError::DimensionMismatch {
            expected,
            actual: embedding.len(),
        })
    }
}
