//! Vector-indexed storage of games and box scores
//!
//! The retrieval core only sees the [`StatsStore`] trait. Two backends exist:
//! - [`crate::database::Database`]: Postgres with the pgvector extension
//! - [`MemoryStore`]: brute-force cosine search for development and tests
//!
//! All `nearest_*` methods share one contract:
//! - only rows with a non-null embedding are candidates
//! - at most `k` rows come back, ordered by ascending cosine distance
//! - equal distances keep the backend's natural order, so a fixed dataset and
//!   query always give the same answer
//! - a backend failure is an error, never an empty `Vec`

use async_trait::async_trait;

use crate::models::GameHit;
use crate::models::GameRecord;
use crate::models::GameSummary;
use crate::models::PerformanceHit;
use crate::models::PerformanceSummary;
use crate::models::Player;
use crate::models::Team;
use crate::Result;

mod memory;

pub use memory::cosine_distance;
pub use memory::MemoryStore;

#[async_trait]
pub trait StatsStore: Send + Sync {
    /// Every row of `teams`.
    async fn teams(&self) -> Result<Vec<Team>>;

    /// Every row of `players`.
    async fn players(&self) -> Result<Vec<Player>>;

    /// Nearest games by embedding.
    async fn nearest_games(&self, query: &[f32], k: usize) -> Result<Vec<GameHit>>;

    /// Nearest box scores by embedding.
    async fn nearest_performances(&self, query: &[f32], k: usize) -> Result<Vec<PerformanceHit>>;

    /// Look up one game by id.
    async fn game(&self, game_id: i64) -> Result<Option<GameRecord>>;

    /// Nearest games with team names joined in.
    async fn nearest_game_summaries(&self, query: &[f32], k: usize) -> Result<Vec<GameSummary>>;

    /// Nearest box scores with player name and game date joined in.
    async fn nearest_performance_summaries(
        &self,
        query: &[f32],
        k: usize,
    ) -> Result<Vec<PerformanceSummary>>;
}
