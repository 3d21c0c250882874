use std::collections::{HashMap, HashSet};

use super::ScoringEvent;
use crate::league::{Event, Game};

/// Players with at least one scoring record linked to each game.
#[derive(Debug, Default)]
pub struct ScorersByGame {
    scorers: HashMap<String, HashSet<String>>,
}

impl ScorersByGame {
    pub fn from_records(records: &[ScoringEvent]) -> Self {
        let mut scorers: HashMap<String, HashSet<String>> = HashMap::new();
        for record in records {
            if let (Some(game_id), Some(player_id)) = (&record.game_id, &record.player_id) {
                scorers
                    .entry(game_id.clone())
                    .or_default()
                    .insert(player_id.clone());
            }
        }
        Self { scorers }
    }

    pub fn scored_in(&self, player_id: &str, game_id: &str) -> bool {
        self.scorers
            .get(game_id)
            .is_some_and(|players| players.contains(player_id))
    }
}

/// A player played a game when any roster source lists them or when they
/// scored in it.
///
/// Roster sources, in the order they are checked:
/// 1. the game's own `jogadoresEscalados`;
/// 2. the rosters of the two teams of an internal game;
/// 3. the event's `jogadoresEscalados`, only for games with neither of the above.
pub fn did_player_participate(
    player_id: &str,
    game: &Game,
    event: &Event,
    scorers: &ScorersByGame,
) -> bool {
    if scorers.scored_in(player_id, &game.id) {
        return true;
    }

    if let Some(roster) = game.explicit_roster() {
        if roster.iter().any(|id| id == player_id) {
            return true;
        }
    }

    if let Some((team_a, team_b)) = game.team_ids() {
        return [team_a, team_b]
            .into_iter()
            .filter_map(|team_id| event.team(team_id))
            .any(|team| team.players.iter().any(|id| id == player_id));
    }

    game.explicit_roster().is_none()
        && event
            .roster
            .as_deref()
            .is_some_and(|roster| roster.iter().any(|id| id == player_id))
}
