mod player;
mod standings;

pub use player::{per_game_average, PlayerAggregator, ScopedGame};
pub use standings::StandingsAggregator;
