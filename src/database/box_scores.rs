use pgvector::Vector;

use super::Database;
use crate::models::PerformanceHit;
use crate::models::PerformanceSummary;
use crate::models::PlayerPerformance;
use crate::Result;

impl Database {
    /// Nearest box scores by cosine distance
    pub async fn semantic_search_performances(
        &self,
        query: &[f32],
        limit: i64,
    ) -> Result<Vec<PerformanceHit>> {
        let hits = sqlx::query_as::<_, PerformanceHit>(
            r"
            SELECT
                game_id::bigint AS game_id,
                person_id::bigint AS person_id,
                team_id::bigint AS team_id,
                points::int AS points,
                assists::int AS assists,
                offensive_reb::int AS offensive_reb,
                defensive_reb::int AS defensive_reb,
                steals::int AS steals,
                blocks::int AS blocks,
                starter::boolean AS starter,
                seconds::int AS seconds,
                (1 - (embedding <=> $1))::float8 AS similarity
            FROM player_box_scores
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

    /// Nearest box scores with player name and game date joined inline
    pub async fn semantic_search_performance_summaries(
        &self,
        query: &[f32],
        limit: i64,
    ) -> Result<Vec<PerformanceSummary>> {
        let summaries = sqlx::query_as::<_, PerformanceSummary>(
            r"
            SELECT
                p.game_id::bigint AS game_id,
                p.person_id::bigint AS person_id,
                p.points::int AS points,
                (p.offensive_reb + p.defensive_reb)::int AS rebounds,
                p.assists::int AS assists,
                pl.first_name || ' ' || pl.last_name AS player_name,
                g.game_timestamp::timestamptz AS game_timestamp,
                (1 - (p.embedding <=> $1))::float8 AS similarity
            FROM player_box_scores p
            LEFT JOIN players pl ON p.person_id = pl.player_id
            LEFT JOIN game_details g ON p.game_id = g.game_id
            WHERE p.embedding IS NOT NULL
            ORDER BY p.embedding <=> $1
            LIMIT $2
            ",
        )
        .bind(Vector::from(query.to_vec()))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }

    /// Box scores worth embedding: big scoring, passing or rebounding lines,
    /// best first
    pub async fn list_notable_performances(&self, limit: i64) -> Result<Vec<PlayerPerformance>> {
        let rows = sqlx::query_as::<_, PlayerPerformance>(
            r"
            SELECT
                game_id::bigint AS game_id,
                person_id::bigint AS person_id,
                team_id::bigint AS team_id,
                starter::boolean AS starter,
                seconds::int AS seconds,
                points::int AS points,
                fg2_made::int AS fg2_made,
                fg2_attempted::int AS fg2_attempted,
                fg3_made::int AS fg3_made,
                fg3_attempted::int AS fg3_attempted,
                ft_made::int AS ft_made,
                ft_attempted::int AS ft_attempted,
                offensive_reb::int AS offensive_reb,
                defensive_reb::int AS defensive_reb,
                assists::int AS assists,
                steals::int AS steals,
                blocks::int AS blocks,
                turnovers::int AS turnovers,
                defensive_fouls::int AS defensive_fouls,
                offensive_fouls::int AS offensive_fouls
            FROM player_box_scores
            WHERE points >= 20
               OR assists >= 8
               OR (defensive_reb + offensive_reb) >= 10
               OR (points >= 10 AND assists >= 10 AND (defensive_reb + offensive_reb) >= 10)
            ORDER BY points DESC, assists DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn store_performance_embedding(
        &self,
        game_id: i64,
        person_id: i64,
        embedding: &[f32],
    ) -> Result<()> {
        sqlx::query(
            "UPDATE player_box_scores SET embedding = $1 WHERE game_id = $2 AND person_id = $3",
        )
        .bind(Vector::from(embedding.to_vec()))
        .bind(game_id)
        .bind(person_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
