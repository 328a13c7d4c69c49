//! Sentences that stored rows are embedded as
//!
//! These are written for the embedding model, not for the generator: names
//! are spelled out and notable thresholds are named so that a question like
//! "who recorded a triple-double" lands near the right rows.

use crate::models::GameRecord;
use crate::models::PlayerPerformance;
use crate::reference::ReferenceData;

pub fn game_row_text(game: &GameRecord, refs: &ReferenceData) -> String {
    let date = game.game_timestamp.format("%B %d, %Y");
    let home_team = refs.team_name(game.home_team_id);
    let away_team = refs.team_name(game.away_team_id);

    let (winner, final_score) = if game.winner_is_home() {
        (&home_team, format!("{}-{}", game.home_points, game.away_points))
    } else {
        (&away_team, format!("{}-{}", game.away_points, game.home_points))
    };

    format!(
        "NBA Game on {date}: {away_team} vs {home_team}. \
         Final score: {home_team} {}, {away_team} {}. \
         Winner: {winner} ({final_score}). \
         Season: {}-{}. \
         Game ID: {}",
        game.home_points,
        game.away_points,
        game.season,
        game.season + 1,
        game.game_id
    )
}

pub fn player_row_text(performance: &PlayerPerformance, refs: &ReferenceData) -> String {
    let player_name = refs.player_name(performance.person_id);
    let team_name = refs.team_name(performance.team_id);

    let mut stats_parts = Vec::new();
    if performance.points > 0 {
        stats_parts.push(format!("{} points", performance.points));
    }
    if performance.assists > 0 {
        stats_parts.push(format!("{} assists", performance.assists));
    }
    if performance.total_rebounds() > 0 {
        stats_parts.push(format!("{} rebounds", performance.total_rebounds()));
    }
    if performance.steals > 0 {
        stats_parts.push(format!("{} steals", performance.steals));
    }
    if performance.blocks > 0 {
        stats_parts.push(format!("{} blocks", performance.blocks));
    }
    let stats_text = if stats_parts.is_empty() {
        "0 points".to_string()
    } else {
        stats_parts.join(", ")
    };

    let notes = performance.notable_notes();
    let notes_text = if notes.is_empty() {
        String::new()
    } else {
        format!(" ({})", notes.join(", "))
    };

    format!(
        "Player performance: {player_name} from {team_name} scored {stats_text} \
         in game {}{notes_text}. \
         Starter: {}. \
         Minutes played: {:.1}",
        performance.game_id,
        if performance.starter { "Yes" } else { "No" },
        performance.minutes_played()
    )
}
