use pgvector::Vector;

use super::Database;
use crate::models::GameHit;
use crate::models::GameRecord;
use crate::models::GameSummary;
use crate::Result;

impl Database {
    /// Nearest games by cosine distance
    pub async fn semantic_search_games(&self, query: &[f32], limit: i64) -> Result<Vec<GameHit>> {
        let hits = sqlx::query_as::<_, GameHit>(
            r"
            SELECT
                game_id::bigint AS game_id,
                game_timestamp::timestamptz AS game_timestamp,
                home_team_id::bigint AS home_team_id,
                away_team_id::bigint AS away_team_id,
                home_points::int AS home_points,
                away_points::int AS away_points,
                (1 - (embedding <=> $1))::float8 AS similarity
            FROM game_details
            WHERE embedding IS NOT NULL
            ORDER BY embedding <=> $1
            LIMIT $2
            ",
        )
        .bind(Vector::from(query.to_vec()))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(hits)
    }

    /// Nearest games with team display names joined inline
    pub async fn semantic_search_game_summaries(
        &self,
        query: &[f32],
        limit: i64,
    ) -> Result<Vec<GameSummary>> {
        let summaries = sqlx::query_as::<_, GameSummary>(
            r"
            SELECT
                g.game_id::bigint AS game_id,
                g.game_timestamp::timestamptz AS game_timestamp,
                g.home_team_id::bigint AS home_team_id,
                g.away_team_id::bigint AS away_team_id,
                g.home_points::int AS home_points,
                g.away_points::int AS away_points,
                ht.city || ' ' || ht.name AS home_team,
                awt.city || ' ' || awt.name AS away_team,
                (1 - (g.embedding <=> $1))::float8 AS similarity
            FROM game_details g
            LEFT JOIN teams ht ON g.home_team_id = ht.team_id
            LEFT JOIN teams awt ON g.away_team_id = awt.team_id
            WHERE g.embedding IS NOT NULL
            ORDER BY g.embedding <=> $1
            LIMIT $2
            ",
        )
        .bind(Vector::from(query.to_vec()))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }

    pub async fn get_game(&self, game_id: i64) -> Result<Option<GameRecord>> {
        let game = sqlx::query_as::<_, GameRecord>(
            r"
            SELECT
                game_id::bigint AS game_id,
                season::int AS season,
                game_timestamp::timestamptz AS game_timestamp,
                home_team_id::bigint AS home_team_id,
                away_team_id::bigint AS away_team_id,
                home_points::int AS home_points,
                away_points::int AS away_points
            FROM game_details
            WHERE game_id = $1
            ",
        )
        .bind(game_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(game)
    }

    /// Every game, newest first, for the embedding backfill
    pub async fn list_games_for_embedding(&self) -> Result<Vec<GameRecord>> {
        let games = sqlx::query_as::<_, GameRecord>(
            r"
            SELECT
                game_id::bigint AS game_id,
                season::int AS season,
                game_timestamp::timestamptz AS game_timestamp,
                home_team_id::bigint AS home_team_id,
                away_team_id::bigint AS away_team_id,
                home_points::int AS home_points,
                away_points::int AS away_points
            FROM game_details
            ORDER BY game_timestamp DESC, game_id DESC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(games)
    }

    pub async fn store_game_embedding(&self, game_id: i64, embedding: &[f32]) -> Result<()> {
        sqlx::query("UPDATE game_details SET embedding = $1 WHERE game_id = $2")
            .bind(Vector::from(embedding.to_vec()))
            .bind(game_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
