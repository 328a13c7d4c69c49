//! Rendering retrieved rows into the generator's context block
//!
//! One line per row, in ranked order, joined with `\n`. The batch and online
//! paths render game lines with different token orders:
//!
//! - batch: `Game 15 on 2024-01-10: LA Lakers vs Boston Celtics, Final: Boston Celtics 110, LA Lakers 108`
//! - online: `LA Lakers 108-110 Boston Celtics 2024-01-10`
//!
//! Both formats are fixed; do not unify them.

use std::sync::Arc;

use chrono::DateTime;
use chrono::Utc;

use super::retriever::RetrievedRows;
use super::retriever::RetrievedSummaries;
use crate::models::GameHit;
use crate::models::GameSummary;
use crate::models::PerformanceHit;
use crate::models::PerformanceSummary;
use crate::reference::unresolved_player;
use crate::reference::unresolved_team;
use crate::reference::ReferenceData;
use crate::store::StatsStore;
use crate::Result;

fn date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d").to_string()
}

/// Builds context text, resolving ids through the run's reference data.
#[derive(Debug, Clone)]
pub struct ContextBuilder {
    refs: Arc<ReferenceData>,
}

impl ContextBuilder {
    pub fn new(refs: Arc<ReferenceData>) -> Self {
        Self { refs }
    }

    pub fn reference_data(&self) -> &ReferenceData {
        &self.refs
    }

    /// Batch context for either target.
    ///
    /// Player rows look up their game in `store` to name the date and
    /// both teams, so this can fail with `RetrievalUnavailable`.
    pub async fn build(&self, rows: &RetrievedRows, store: &dyn StatsStore) -> Result<String> {
        match rows {
            RetrievedRows::Games(rows) => Ok(self.game_context(rows)),
            RetrievedRows::Players(rows) => self.player_context(rows, store).await,
        }
    }

    pub fn game_context(&self, rows: &[GameHit]) -> String {
        rows.iter()
            .map(|r| self.game_line(r))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn game_line(&self, row: &GameHit) -> String {
        let home_team = self.refs.team_name(row.home_team_id);
        let away_team = self.refs.team_name(row.away_team_id);
        format!(
            "Game {} on {}: {away_team} vs {home_team}, Final: {home_team} {}, {away_team} {}",
            row.game_id,
            date(&row.game_timestamp),
            row.home_points,
            row.away_points
        )
    }

    pub async fn player_context(
        &self,
        rows: &[PerformanceHit],
        store: &dyn StatsStore,
    ) -> Result<String> {
        let mut lines = Vec::with_capacity(rows.len());
        for row in rows {
            lines.push(self.player_line(row, store).await?);
        }
        Ok(lines.join("\n"))
    }

    /// `Game {id} on {date} ({away} vs {home}): {player} ({team}) - {pts} pts, ...`
    ///
    /// Falls back to `Game {id}: ...` when the game row is missing.
    pub async fn player_line(&self, row: &PerformanceHit, store: &dyn StatsStore) -> Result<String> {
        let player_name = self.refs.player_name(row.person_id);
        let team_name = self.refs.team_name(row.team_id);
        let stats = format!(
            "{player_name} ({team_name}) - {} pts, {} ast, {} reb, {} stl, {} blk",
            row.points,
            row.assists,
            row.total_rebounds(),
            row.steals,
            row.blocks
        );

        let line = match store.game(row.game_id).await? {
            Some(game) => format!(
                "Game {} on {} ({} vs {}): {stats}",
                row.game_id,
                date(&game.game_timestamp),
                self.refs.team_name(game.away_team_id),
                self.refs.team_name(game.home_team_id)
            ),
            None => format!("Game {}: {stats}", row.game_id),
        };
        Ok(line)
    }

    /// Online context; names come from the store's join.
    pub fn build_online(&self, rows: &RetrievedSummaries) -> String {
        let lines: Vec<String> = match rows {
            RetrievedSummaries::Games(rows) => rows.iter().map(online_game_line).collect(),
            RetrievedSummaries::Players(rows) => rows.iter().map(online_player_line).collect(),
        };
        lines.join("\n")
    }
}

/// `{away} {away_pts}-{home_pts} {home} {date}`
pub fn online_game_line(row: &GameSummary) -> String {
    let home_team = row
        .home_team
        .clone()
        .unwrap_or_else(|| unresolved_team(row.home_team_id));
    let away_team = row
        .away_team
        .clone()
        .unwrap_or_else(|| unresolved_team(row.away_team_id));
    let date = row.game_timestamp.as_ref().map(date).unwrap_or_default();

    format!(
        "{away_team} {}-{} {home_team} {date}",
        row.away_points, row.home_points
    )
    .trim_end()
    .to_string()
}

/// `{player}: {pts} points, {reb} rebounds, {ast} assists {date}`
pub fn online_player_line(row: &PerformanceSummary) -> String {
    let player_name = row
        .player_name
        .clone()
        .unwrap_or_else(|| unresolved_player(row.person_id));
    let date = row.game_timestamp.as_ref().map(date).unwrap_or_default();

    format!(
        "{player_name}: {} points, {} rebounds, {} assists {date}",
        row.points, row.rebounds, row.assists
    )
    .trim_end()
    .to_string()
}
