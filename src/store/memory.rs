use std::collections::HashMap;

use async_trait::async_trait;

use super::StatsStore;
use crate::errors::HoopRagError;
use crate::models::GameHit;
use crate::models::GameRecord;
use crate::models::GameSummary;
use crate::models::PerformanceHit;
use crate::models::PerformanceSummary;
use crate::models::Player;
use crate::models::PlayerPerformance;
use crate::models::Team;
use crate::Result;

/// In-memory stats store for development and testing.
///
/// Uses brute-force cosine distance. Rows at equal distance keep insertion order.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    dimension: usize,
    teams: Vec<Team>,
    players: Vec<Player>,
    games: Vec<GameRecord>,
    performances: Vec<PlayerPerformance>,
}

impl MemoryStore {
    /// Create an empty store accepting embeddings of `dimension` floats.
    #[must_use]
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            teams: Vec::new(),
            players: Vec::new(),
            games: Vec::new(),
            performances: Vec::new(),
        }
    }

    pub fn insert_team(&mut self, team: Team) {
        self.teams.push(team);
    }

    pub fn insert_player(&mut self, player: Player) {
        self.players.push(player);
    }

    pub fn insert_game(&mut self, game: GameRecord) -> Result<()> {
        self.check_dimension(game.embedding.as_deref())?;
        self.games.push(game);
        Ok(())
    }

    pub fn insert_performance(&mut self, performance: PlayerPerformance) -> Result<()> {
        self.check_dimension(performance.embedding.as_deref())?;
        self.performances.push(performance);
        Ok(())
    }

    fn check_dimension(&self, embedding: Option<&[f32]>) -> Result<()> {
        match embedding {
            Some(e) if e.len() != self.dimension => Err(HoopRagError::DimensionMismatch {
                expected: self.dimension,
                actual: e.len(),
            }),
            _ => Ok(()),
        }
    }

    /// Indices of embedded rows nearest to `query`, with their distances.
    fn rank<'a, I>(&self, query: &[f32], embeddings: I, k: usize) -> Result<Vec<(usize, f64)>>
    where
        I: Iterator<Item = Option<&'a Vec<f32>>>,
    {
        if query.len() != self.dimension {
            return Err(HoopRagError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let mut ranked: Vec<(usize, f64)> = embeddings
            .enumerate()
            .filter_map(|(idx, e)| e.map(|e| (idx, cosine_distance(query, e))))
            .collect();

        // stable: equal distances stay in insertion order
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
        ranked.truncate(k);
        Ok(ranked)
    }

    fn team_names(&self) -> HashMap<i64, String> {
        self.teams
            .iter()
            .map(|t| (t.team_id, t.display_name()))
            .collect()
    }
}

#[async_trait]
impl StatsStore for MemoryStore {
    async fn teams(&self) -> Result<Vec<Team>> {
        Ok(self.teams.clone())
    }

    async fn players(&self) -> Result<Vec<Player>> {
        Ok(self.players.clone())
    }

    async fn nearest_games(&self, query: &[f32], k: usize) -> Result<Vec<GameHit>> {
        let ranked = self.rank(query, self.games.iter().map(|g| g.embedding.as_ref()), k)?;
        Ok(ranked
            .into_iter()
            .map(|(idx, distance)| {
                let g = &self.games[idx];
                GameHit {
                    game_id: g.game_id,
                    game_timestamp: g.game_timestamp,
                    home_team_id: g.home_team_id,
                    away_team_id: g.away_team_id,
                    home_points: g.home_points,
                    away_points: g.away_points,
                    similarity: 1.0 - distance,
                }
            })
            .collect())
    }

    async fn nearest_performances(&self, query: &[f32], k: usize) -> Result<Vec<PerformanceHit>> {
        let ranked = self.rank(
            query,
            self.performances.iter().map(|p| p.embedding.as_ref()),
            k,
        )?;
        Ok(ranked
            .into_iter()
            .map(|(idx, distance)| {
                let p = &self.performances[idx];
                PerformanceHit {
                    game_id: p.game_id,
                    person_id: p.person_id,
                    team_id: p.team_id,
                    points: p.points,
                    assists: p.assists,
                    offensive_reb: p.offensive_reb,
                    defensive_reb: p.defensive_reb,
                    steals: p.steals,
                    blocks: p.blocks,
                    starter: p.starter,
                    seconds: p.seconds,
                    similarity: 1.0 - distance,
                }
            })
            .collect())
    }

    async fn game(&self, game_id: i64) -> Result<Option<GameRecord>> {
        Ok(self.games.iter().find(|g| g.game_id == game_id).cloned())
    }

    async fn nearest_game_summaries(&self, query: &[f32], k: usize) -> Result<Vec<GameSummary>> {
        let names = self.team_names();
        let hits = self.nearest_games(query, k).await?;
        Ok(hits
            .into_iter()
            .map(|h| GameSummary {
                game_id: h.game_id,
                game_timestamp: Some(h.game_timestamp),
                home_team_id: h.home_team_id,
                away_team_id: h.away_team_id,
                home_points: h.home_points,
                away_points: h.away_points,
                home_team: names.get(&h.home_team_id).cloned(),
                away_team: names.get(&h.away_team_id).cloned(),
                similarity: h.similarity,
            })
            .collect())
    }

    async fn nearest_performance_summaries(
        &self,
        query: &[f32],
        k: usize,
    ) -> Result<Vec<PerformanceSummary>> {
        let hits = self.nearest_performances(query, k).await?;
        Ok(hits
            .into_iter()
            .map(|h| PerformanceSummary {
                game_id: h.game_id,
                person_id: h.person_id,
                points: h.points,
                rebounds: h.total_rebounds(),
                assists: h.assists,
                player_name: self
                    .players
                    .iter()
                    .find(|p| p.player_id == h.person_id)
                    .map(Player::display_name),
                game_timestamp: self
                    .games
                    .iter()
                    .find(|g| g.game_id == h.game_id)
                    .map(|g| g.game_timestamp),
                similarity: h.similarity,
            })
            .collect())
    }
}

/// Cosine distance `1 - cos(a, b)`; zero vectors are treated as orthogonal.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same length");

    let dot: f64 = a.iter().zip(b).map(|(x, y)| f64::from(*x) * f64::from(*y)).sum();
    let norm_a: f64 = a.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }

    1.0 - dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;

    fn game(id: i64, embedding: Option<Vec<f32>>) -> GameRecord {
        GameRecord {
            game_id: id,
            season: 2023,
            game_timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 19, 30, 0).unwrap(),
            home_team_id: 1,
            away_team_id: 2,
            home_points: 100,
            away_points: 90,
            embedding,
        }
    }

    #[test]
    fn test_cosine_distance_identical() {
        let a = vec![1.0, 2.0, 3.0];
        assert!(cosine_distance(&a, &a).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_distance_orthogonal() {
        let d = cosine_distance(&[1.0, 0.0], &[0.0, 1.0]);
        assert!((d - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_distance_opposite() {
        let d = cosine_distance(&[1.0, 0.0], &[-1.0, 0.0]);
        assert!((d - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_insert_rejects_wrong_dimension() {
        let mut store = MemoryStore::new(3);
        let err = store.insert_game(game(1, Some(vec![1.0, 0.0]))).unwrap_err();
        assert!(matches!(
            err,
            HoopRagError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        ));
        assert!(store.insert_game(game(2, None)).is_ok());
    }

    #[tokio::test]
    async fn test_equal_distances_keep_insertion_order() {
        let mut store = MemoryStore::new(2);
        store.insert_game(game(30, Some(vec![1.0, 0.0]))).unwrap();
        store.insert_game(game(10, Some(vec![2.0, 0.0]))).unwrap();
        store.insert_game(game(20, Some(vec![3.0, 0.0]))).unwrap();

        let hits = store.nearest_games(&[1.0, 0.0], 3).await.unwrap();
        let ids: Vec<i64> = hits.iter().map(|h| h.game_id).collect();
        assert_eq!(ids, vec![30, 10, 20]);
    }

    #[tokio::test]
    async fn test_query_dimension_checked() {
        let store = MemoryStore::new(2);
        assert!(store.nearest_games(&[1.0, 0.0, 0.0], 1).await.is_err());
    }
}
