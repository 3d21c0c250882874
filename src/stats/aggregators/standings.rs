use std::collections::HashMap;
use tracing::debug;

use crate::league::{resolve_score, Event, Game, GameStatus};
use crate::stats::StandingRow;

#[derive(Debug, Default, Clone, Copy)]
struct TeamTally {
    wins: u32,
    losses: u32,
    points_for: u32,
    points_against: u32,
}

/// Win/loss table for the teams of an internal tournament.
pub struct StandingsAggregator;

impl StandingsAggregator {
    /// Every team of `event` gets a row, even without games. Only finished
    /// games between two known teams are folded in; the differential is
    /// derived from the folded totals.
    pub fn aggregate(event: &Event, games: &[Game]) -> Vec<StandingRow> {
        let mut tallies: HashMap<&str, TeamTally> = event
            .teams
            .iter()
            .map(|team| (team.id.as_str(), TeamTally::default()))
            .collect();

        for game in games {
            if game.status != GameStatus::Finished {
                continue;
            }
            let Some((team_a, team_b)) = game.team_ids() else {
                continue;
            };
            if !tallies.contains_key(team_a) || !tallies.contains_key(team_b) {
                debug!(game_id = %game.id, team_a, team_b, "Game references unknown team, skipping");
                continue;
            }

            let (score_a, score_b) = resolve_score(game);
            credit(&mut tallies, team_a, score_a, score_b);
            credit(&mut tallies, team_b, score_b, score_a);
        }

        let mut rows: Vec<StandingRow> = event
            .teams
            .iter()
            .filter_map(|team| {
                let tally = tallies.get(team.id.as_str())?;
                Some(StandingRow {
                    team_id: team.id.clone(),
                    team_name: team.name.clone(),
                    wins: tally.wins,
                    losses: tally.losses,
                    points_for: tally.points_for,
                    points_against: tally.points_against,
                    diff: i64::from(tally.points_for) - i64::from(tally.points_against),
                })
            })
            .collect();

        rank(&mut rows);
        rows
    }
}

fn credit(tallies: &mut HashMap<&str, TeamTally>, team_id: &str, scored: u32, conceded: u32) {
    if let Some(tally) = tallies.get_mut(team_id) {
        tally.points_for += scored;
        tally.points_against += conceded;
        if scored > conceded {
            tally.wins += 1;
        } else if scored < conceded {
            tally.losses += 1;
        }
    }
}

/// Wins, then differential, then points scored, all descending.
fn rank(rows: &mut [StandingRow]) {
    rows.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then(b.diff.cmp(&a.diff))
            .then(b.points_for.cmp(&a.points_for))
            .then_with(|| a.team_name.cmp(&b.team_name))
    });
}
