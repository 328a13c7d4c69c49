//! Team and player lookup tables, loaded once per run

use std::collections::HashMap;

use tracing::info;

use crate::models::Player;
use crate::models::Team;
use crate::store::StatsStore;
use crate::Result;

/// Read-only id -> name maps shared by every question in a run.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    teams: HashMap<i64, Team>,
    players: HashMap<i64, Player>,
}

impl ReferenceData {
    pub fn new(teams: Vec<Team>, players: Vec<Player>) -> Self {
        Self {
            teams: teams.into_iter().map(|t| (t.team_id, t)).collect(),
            players: players.into_iter().map(|p| (p.player_id, p)).collect(),
        }
    }

    /// Load both tables from the store.
    pub async fn load(store: &dyn StatsStore) -> Result<Self> {
        let teams = store.teams().await?;
        let players = store.players().await?;
        info!(
            "Loaded reference data: {} teams, {} players",
            teams.len(),
            players.len()
        );
        Ok(Self::new(teams, players))
    }

    /// "City Name", or `Team_<id>` when the id is missing from `teams`.
    pub fn team_name(&self, team_id: i64) -> String {
        self.teams
            .get(&team_id)
            .map_or_else(|| unresolved_team(team_id), Team::display_name)
    }

    /// "First Last", or `Player_<id>` when the id is missing from `players`.
    pub fn player_name(&self, player_id: i64) -> String {
        self.players
            .get(&player_id)
            .map_or_else(|| unresolved_player(player_id), Player::display_name)
    }

    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }
}

/// Placeholder rendered for a team id with no reference row.
pub fn unresolved_team(team_id: i64) -> String {
    format!("Team_{team_id}")
}

/// Placeholder rendered for a player id with no reference row.
pub fn unresolved_player(player_id: i64) -> String {
    format!("Player_{player_id}")
}
