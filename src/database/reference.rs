use super::Database;
use crate::models::Player;
use crate::models::Team;
use crate::Result;

impl Database {
    pub async fn list_teams(&self) -> Result<Vec<Team>> {
        let teams = sqlx::query_as::<_, Team>(
            r"
            SELECT team_id::bigint AS team_id, city, name, abbreviation
            FROM teams
            ORDER BY team_id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(teams)
    }

    pub async fn list_players(&self) -> Result<Vec<Player>> {
        let players = sqlx::query_as::<_, Player>(
            r"
            SELECT player_id::bigint AS player_id, first_name, last_name
            FROM players
            ORDER BY player_id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(players)
    }
}
