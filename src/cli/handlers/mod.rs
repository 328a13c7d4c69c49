//! CLI command handlers
//!
//! - init: vector columns and indexes
//! - embeddings: embedding backfill
//! - batch: questions file to answers file
//! - ask: one online question
//! - serve: API server
//! - info: configuration display

pub mod ask;
pub mod batch;
pub mod embeddings;
pub mod info;
pub mod init;
pub mod serve;

pub use ask::*;
pub use batch::*;
pub use embeddings::*;
pub use info::*;
pub use init::*;
pub use serve::*;
