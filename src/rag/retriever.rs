//! Nearest-neighbor retrieval against the store

use std::sync::Arc;

use tracing::debug;

use super::classifier::SearchTarget;
use crate::config::RetrievalLimits;
use crate::embeddings::check_dimension;
use crate::models::Evidence;
use crate::models::GameHit;
use crate::models::GameSummary;
use crate::models::PerformanceHit;
use crate::models::PerformanceSummary;
use crate::store::StatsStore;
use crate::Result;

/// Ranked rows for the batch path, best match first.
#[derive(Debug, Clone, PartialEq)]
pub enum RetrievedRows {
    Games(Vec<GameHit>),
    Players(Vec<PerformanceHit>),
}

impl RetrievedRows {
    pub fn target(&self) -> SearchTarget {
        match self {
            Self::Games(_) => SearchTarget::Game,
            Self::Players(_) => SearchTarget::Player,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Games(rows) => rows.len(),
            Self::Players(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Provenance for the top `cap` rows.
    pub fn evidence(&self, cap: usize) -> Vec<Evidence> {
        match self {
            Self::Games(rows) => rows.iter().take(cap).map(|r| Evidence::game(r.game_id)).collect(),
            Self::Players(rows) => rows
                .iter()
                .take(cap)
                .map(|r| Evidence::box_score(r.game_id))
                .collect(),
        }
    }
}

/// Ranked rows for the online path, with names joined in by the store.
#[derive(Debug, Clone, PartialEq)]
pub enum RetrievedSummaries {
    Games(Vec<GameSummary>),
    Players(Vec<PerformanceSummary>),
}

impl RetrievedSummaries {
    pub fn len(&self) -> usize {
        match self {
            Self::Games(rows) => rows.len(),
            Self::Players(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn evidence(&self, cap: usize) -> Vec<Evidence> {
        match self {
            Self::Games(rows) => rows.iter().take(cap).map(|r| Evidence::game(r.game_id)).collect(),
            Self::Players(rows) => rows
                .iter()
                .take(cap)
                .map(|r| Evidence::box_score(r.game_id))
                .collect(),
        }
    }
}

/// Retriever over any [`StatsStore`]
#[derive(Clone)]
pub struct Retriever {
    store: Arc<dyn StatsStore>,
    dimension: usize,
}

impl Retriever {
    pub fn new(store: Arc<dyn StatsStore>, dimension: usize) -> Self {
        Self { store, dimension }
    }

    pub fn store(&self) -> &dyn StatsStore {
        self.store.as_ref()
    }

    /// Rows nearest to `query` in the table chosen by `target`, at most
    /// `limits.games` or `limits.players` of them.
    ///
    /// # Errors
    /// - `DimensionMismatch` if `query` has the wrong length
    /// - `RetrievalUnavailable` if the store cannot be queried
    pub async fn retrieve(
        &self,
        query: &[f32],
        target: SearchTarget,
        limits: &RetrievalLimits,
    ) -> Result<RetrievedRows> {
        check_dimension(query, self.dimension)?;

        let rows = match target {
            SearchTarget::Game => {
                RetrievedRows::Games(self.store.nearest_games(query, limits.games).await?)
            }
            SearchTarget::Player => RetrievedRows::Players(
                self.store
                    .nearest_performances(query, limits.players)
                    .await?,
            ),
        };

        debug!("Retrieved {} {} rows", rows.len(), target);
        Ok(rows)
    }

    /// Same contract as [`Self::retrieve`], returning the joined projections
    /// used by the online path.
    pub async fn retrieve_summaries(
        &self,
        query: &[f32],
        target: SearchTarget,
        limits: &RetrievalLimits,
    ) -> Result<RetrievedSummaries> {
        check_dimension(query, self.dimension)?;

        let rows = match target {
            SearchTarget::Game => RetrievedSummaries::Games(
                self.store
                    .nearest_game_summaries(query, limits.games)
                    .await?,
            ),
            SearchTarget::Player => RetrievedSummaries::Players(
                self.store
                    .nearest_performance_summaries(query, limits.players)
                    .await?,
            ),
        };

        debug!("Retrieved {} {} summaries", rows.len(), target);
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;
    use crate::errors::HoopRagError;
    use crate::models::GameRecord;
    use crate::models::PlayerPerformance;
    use crate::models::Scored;
    use crate::store::MemoryStore;

    fn game(id: i64, embedding: Option<Vec<f32>>) -> GameRecord {
        GameRecord {
            game_id: id,
            season: 2023,
            game_timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            home_team_id: 1,
            away_team_id: 2,
            home_points: 100,
            away_points: 90,
            embedding,
        }
    }

    fn performance(game_id: i64, person_id: i64, embedding: Option<Vec<f32>>) -> PlayerPerformance {
        PlayerPerformance {
            game_id,
            person_id,
            team_id: 1,
            starter: true,
            seconds: 2000,
            points: 20,
            fg2_made: 0,
            fg2_attempted: 0,
            fg3_made: 0,
            fg3_attempted: 0,
            ft_made: 0,
            ft_attempted: 0,
            offensive_reb: 1,
            defensive_reb: 4,
            assists: 3,
            steals: 1,
            blocks: 0,
            turnovers: 2,
            defensive_fouls: 1,
            offensive_fouls: 0,
            embedding,
        }
    }

    fn store() -> MemoryStore {
        let mut store = MemoryStore::new(3);
        store.insert_game(game(1, Some(vec![1.0, 0.0, 0.0]))).unwrap();
        store.insert_game(game(2, Some(vec![0.0, 1.0, 0.0]))).unwrap();
        store.insert_game(game(3, None)).unwrap();
        store.insert_game(game(4, Some(vec![0.7, 0.7, 0.0]))).unwrap();
        store.insert_game(game(5, Some(vec![0.0, 0.0, 1.0]))).unwrap();
        store
            .insert_performance(performance(1, 10, Some(vec![0.0, 1.0, 0.0])))
            .unwrap();
        store
            .insert_performance(performance(2, 11, Some(vec![1.0, 0.0, 0.0])))
            .unwrap();
        store
    }

    fn retriever(store: MemoryStore) -> Retriever {
        Retriever::new(Arc::new(store), 3)
    }

    #[tokio::test]
    async fn test_games_ranked_by_ascending_distance() {
        let rows = retriever(store())
            .retrieve(&[1.0, 0.1, 0.0], SearchTarget::Game, &RetrievalLimits::BATCH)
            .await
            .unwrap();

        let RetrievedRows::Games(hits) = rows else {
            panic!("expected game rows");
        };
        let ids: Vec<i64> = hits.iter().map(|h| h.game_id).collect();
        assert_eq!(ids, vec![1, 4, 2, 5]);
        assert!(hits.windows(2).all(|w| w[0].distance() <= w[1].distance()));
    }

    #[tokio::test]
    async fn test_length_bounded_by_k() {
        let rows = retriever(store())
            .retrieve(&[1.0, 0.0, 0.0], SearchTarget::Game, &RetrievalLimits::ONLINE)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.evidence(5), vec![Evidence::game(1)]);
    }

    #[tokio::test]
    async fn test_unembedded_rows_never_returned() {
        let mut store = MemoryStore::new(3);
        store.insert_game(game(1, None)).unwrap();
        store.insert_performance(performance(1, 10, None)).unwrap();
        let retriever = retriever(store);

        for target in [SearchTarget::Game, SearchTarget::Player] {
            let rows = retriever
                .retrieve(&[1.0, 0.0, 0.0], target, &RetrievalLimits::BATCH)
                .await
                .unwrap();
            assert!(rows.is_empty());
            assert_eq!(rows.target(), target);
        }
    }

    #[tokio::test]
    async fn test_player_target_uses_box_scores() {
        let rows = retriever(store())
            .retrieve(&[0.0, 1.0, 0.0], SearchTarget::Player, &RetrievalLimits::BATCH)
            .await
            .unwrap();

        let RetrievedRows::Players(hits) = &rows else {
            panic!("expected player rows");
        };
        assert_eq!(hits[0].person_id, 10);
        assert!((hits[0].similarity - 1.0).abs() < 1e-9);
        assert_eq!(
            rows.evidence(3),
            vec![Evidence::box_score(1), Evidence::box_score(2)]
        );
    }

    #[tokio::test]
    async fn test_deterministic_for_fixed_query() {
        let retriever = retriever(store());
        let query = [0.3, 0.3, 0.3];

        let first = retriever
            .retrieve(&query, SearchTarget::Game, &RetrievalLimits::BATCH)
            .await
            .unwrap();
        let second = retriever
            .retrieve(&query, SearchTarget::Game, &RetrievalLimits::BATCH)
            .await
            .unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_query_dimension_checked() {
        let err = retriever(store())
            .retrieve(&[1.0, 0.0], SearchTarget::Game, &RetrievalLimits::BATCH)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            HoopRagError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[tokio::test]
    async fn test_summaries_respect_online_limits() {
        let rows = retriever(store())
            .retrieve_summaries(&[0.0, 1.0, 0.0], SearchTarget::Player, &RetrievalLimits::ONLINE)
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows.evidence(1), vec![Evidence::box_score(1)]);
    }
}
