use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::league::{Event, Game, Player};
use crate::stats::participation::{did_player_participate, ScorersByGame};
use crate::stats::scoring::is_long_range;
use crate::stats::{ContextIndex, PlayerLine, RankingMode, ScoringEvent, ShotBreakdown};

/// A game paired with the event that contains it.
#[derive(Debug, Clone, Copy)]
pub struct ScopedGame<'a> {
    pub game: &'a Game,
    pub event: &'a Event,
}

#[derive(Debug, Default)]
struct Tally {
    total: u32,
    shots: ShotBreakdown,
    games: HashSet<String>,
}

/// Folds canonical scoring records and roster data into per-player lines.
pub struct PlayerAggregator {
    mode: RankingMode,
    include_inactive: bool,
}

impl PlayerAggregator {
    pub fn new(mode: RankingMode) -> Self {
        Self {
            mode,
            include_inactive: false,
        }
    }

    /// Box scores list every known player, not only active ones.
    pub fn including_inactive(mut self) -> Self {
        self.include_inactive = true;
        self
    }

    pub fn aggregate(
        &self,
        players: &[Player],
        games: &[ScopedGame<'_>],
        records: &[ScoringEvent],
        index: &ContextIndex,
    ) -> Vec<PlayerLine> {
        let eligible: HashMap<&str, &Player> = players
            .iter()
            .filter(|p| self.include_inactive || p.is_active())
            .map(|p| (p.id.as_str(), p))
            .collect();
        let mut tallies: HashMap<&str, Tally> = HashMap::new();

        for record in records {
            let Some(player_id) = record.player_id.as_deref() else {
                continue;
            };
            let Some(player) = eligible.get(player_id) else {
                debug!(record_id = %record.id, player_id, "Record for unknown or inactive player");
                continue;
            };
            let Some(modality) = index.modality_of(record) else {
                debug!(record_id = %record.id, "Record context does not resolve to an event");
                continue;
            };
            if !self.mode.includes(modality) {
                continue;
            }

            let tally = tallies.entry(player.id.as_str()).or_default();
            tally.shots.record(record.points);
            tally.total += match self.mode {
                RankingMode::Points(_) => u32::from(record.points),
                RankingMode::Shooters => u32::from(is_long_range(record.points, modality)),
            };
        }

        let scorers = ScorersByGame::from_records(records);
        for scoped in games {
            for player in eligible.values() {
                if did_player_participate(&player.id, scoped.game, scoped.event, &scorers) {
                    tallies
                        .entry(player.id.as_str())
                        .or_default()
                        .games
                        .insert(scoped.game.id.clone());
                }
            }
        }

        let mut lines: Vec<PlayerLine> = tallies
            .into_iter()
            .filter_map(|(player_id, tally)| {
                let player = eligible.get(player_id)?;
                let games_played = tally.games.len() as u32;
                if games_played == 0 && tally.total == 0 {
                    return None;
                }
                Some(PlayerLine {
                    player_id: player.id.clone(),
                    player_name: player.name.clone(),
                    total_metric: tally.total,
                    shots: tally.shots,
                    games_played,
                    per_game_average: per_game_average(tally.total, games_played),
                })
            })
            .collect();

        sort_lines(&mut lines);
        lines
    }
}

/// Total divided by games, rounded to one decimal; 0 without games.
pub fn per_game_average(total: u32, games_played: u32) -> f64 {
    if games_played == 0 {
        return 0.0;
    }
    (f64::from(total) / f64::from(games_played) * 10.0).round() / 10.0
}

/// Highest total first; on equal totals fewer games ranks higher. Name and id
/// keep the order stable.
fn sort_lines(lines: &mut [PlayerLine]) {
    lines.sort_by(|a, b| {
        b.total_metric
            .cmp(&a.total_metric)
            .then(a.games_played.cmp(&b.games_played))
            .then_with(|| a.player_name.cmp(&b.player_name))
            .then_with(|| a.player_id.cmp(&b.player_id))
    });
}
