use async_trait::async_trait;

use super::Database;
use crate::errors::HoopRagError;
use crate::models::GameHit;
use crate::models::GameRecord;
use crate::models::GameSummary;
use crate::models::PerformanceHit;
use crate::models::PerformanceSummary;
use crate::models::Player;
use crate::models::Team;
use crate::store::StatsStore;
use crate::Result;

/// Anything that goes wrong while the pool answers a similarity query
/// surfaces as `RetrievalUnavailable`.
fn unavailable(err: HoopRagError) -> HoopRagError {
    match err {
        HoopRagError::Database(e) => HoopRagError::retrieval(e),
        other => other,
    }
}

#[async_trait]
impl StatsStore for Database {
    async fn teams(&self) -> Result<Vec<Team>> {
        self.list_teams().await
    }

    async fn players(&self) -> Result<Vec<Player>> {
        self.list_players().await
    }

    async fn nearest_games(&self, query: &[f32], k: usize) -> Result<Vec<GameHit>> {
        self.semantic_search_games(query, k as i64)
            .await
            .map_err(unavailable)
    }

    async fn nearest_performances(&self, query: &[f32], k: usize) -> Result<Vec<PerformanceHit>> {
        self.semantic_search_performances(query, k as i64)
            .await
            .map_err(unavailable)
    }

    async fn game(&self, game_id: i64) -> Result<Option<GameRecord>> {
        self.get_game(game_id).await.map_err(unavailable)
    }

    async fn nearest_game_summaries(&self, query: &[f32], k: usize) -> Result<Vec<GameSummary>> {
        self.semantic_search_game_summaries(query, k as i64)
            .await
            .map_err(unavailable)
    }

    async fn nearest_performance_summaries(
        &self,
        query: &[f32],
        k: usize,
    ) -> Result<Vec<PerformanceSummary>> {
        self.semantic_search_performance_summaries(query, k as i64)
            .await
            .map_err(unavailable)
    }
}
