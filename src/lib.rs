//! hooprag: retrieval-augmented question answering over NBA game data
//!
//! Questions are embedded, routed to game or box-score search, answered
//! from the nearest rows by a local language model, and returned with the
//! rows they were grounded on.

pub mod api;
pub mod batch;
pub mod cli;
pub mod config;
pub mod database;
pub mod embeddings;
pub mod errors;
pub mod llm;
pub mod logging;
pub mod models;
pub mod rag;
pub mod reference;
pub mod store;


pub use config::AppConfig;
pub use errors::*;
