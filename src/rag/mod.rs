//! Retrieval-augmented question answering over the stats store
//!
//! - [`QuestionClassifier`]: keyword routing to game or box-score search
//! - [`Retriever`]: k-nearest rows by cosine distance
//! - [`ContextBuilder`]: one text line per retrieved row
//! - [`AnswerGenerator`]: JSON-mode (batch) and free-text (online) prompting
//! - [`RagService`]: wires the above per question
//!
//! # Examples
//!
//! ```rust,no_run
//! use hooprag::config::AppConfig;
//! use hooprag::rag::RagService;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let service = RagService::open(&config).await?;
//!
//!     let reply = service.answer_online("Who won the game on Jan 10?").await?;
//!     println!("Answer: {}", reply.answer);
//!     println!("Evidence: {} rows", reply.evidence.len());
//!
//!     service.close().await;
//!     Ok(())
//! }
//! ```

pub mod answer;
pub mod classifier;
pub mod context;
pub mod pipeline;
pub mod retriever;

pub use answer::AnswerGenerator;
pub use answer::AnswerRecord;
pub use answer::AnswerResult;
pub use answer::OnlineAnswer;
pub use answer::QuestionCategory;
pub use answer::StructuredAnswer;
pub use classifier::QuestionClassifier;
pub use classifier::SearchTarget;
pub use context::ContextBuilder;
pub use pipeline::RagService;
pub use retriever::RetrievedRows;
pub use retriever::RetrievedSummaries;
pub use retriever::Retriever;
