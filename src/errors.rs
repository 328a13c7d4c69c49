use thiserror::Error;

#[derive(Error, Debug)]
pub enum HoopRagError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The vector store could not answer a nearest-neighbor query.
    /// Distinct from an empty result, which is not an error.
    #[error("Retrieval unavailable: {0}")]
    RetrievalUnavailable(String),

    #[error("Embedding error: {0}")]
    EmbeddingError(String),

    #[error("LLM error: {0}")]
    LlmError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Custom(String),
}

impl HoopRagError {
    /// Wrap a store failure that happened while answering a similarity query.
    pub fn retrieval(err: impl std::fmt::Display) -> Self {
        Self::RetrievalUnavailable(err.to_string())
    }

    /// True for failures of the embedding or generation service.
    pub fn is_provider_unavailable(&self) -> bool {
        matches!(
            self,
            Self::EmbeddingError(_) | Self::LlmError(_) | Self::HttpError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, HoopRagError>;
