//! Test assertion helpers - fluent API for verifying ranking tables
#![allow(dead_code)] // Test utilities may not all be used in every test

use ancb_stats::{PlayerLine, StandingRow};

// ============================================================================
// Lookup Helpers
// ============================================================================

pub fn line_for<'a>(lines: &'a [PlayerLine], player_id: &str) -> &'a PlayerLine {
    lines
        .iter()
        .find(|line| line.player_id == player_id)
        .unwrap_or_else(|| panic!("{} should appear in the ranking", player_id))
}

pub fn row_for<'a>(rows: &'a [StandingRow], team_id: &str) -> &'a StandingRow {
    rows.iter()
        .find(|row| row.team_id == team_id)
        .unwrap_or_else(|| panic!("{} should appear in the standings", team_id))
}

// ============================================================================
// Ranking Assertions
// ============================================================================

pub struct RankingAssertion<'a> {
    line: &'a PlayerLine,
}

impl<'a> RankingAssertion<'a> {
    pub fn for_player(lines: &'a [PlayerLine], player_id: &str) -> Self {
        Self {
            line: line_for(lines, player_id),
        }
    }

    pub fn total(self, expected: u32) -> Self {
        assert_eq!(
            self.line.total_metric, expected,
            "{} has wrong total",
            self.line.player_id
        );
        self
    }

    pub fn makes(self, one: u32, two: u32, three: u32) -> Self {
        let shots = self.line.shots;
        assert_eq!(
            (shots.makes1, shots.makes2, shots.makes3),
            (one, two, three),
            "{} has wrong shot breakdown",
            self.line.player_id
        );
        self
    }

    pub fn games(self, expected: u32) -> Self {
        assert_eq!(
            self.line.games_played, expected,
            "{} has wrong games played",
            self.line.player_id
        );
        self
    }

    pub fn average(self, expected: f64) -> Self {
        assert!(
            (self.line.per_game_average - expected).abs() < f64::EPSILON,
            "{} average {} != {}",
            self.line.player_id,
            self.line.per_game_average,
            expected
        );
        self
    }
}
