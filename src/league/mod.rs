pub mod models;
pub mod repository;

pub use models::{
    resolve_score, Event, EventType, Game, GameStatus, Matchup, Modality, Player, Team, TeamSlot,
};
pub use repository::LeagueRepository;

/// Collection layout of the association's document store.
pub mod paths {
    use crate::store::CollectionPath;

    pub const EVENTS: &str = "eventos";
    pub const GAMES: &str = "jogos";
    pub const PLAYERS: &str = "jogadores";
    pub const SCORING_EVENTS: &str = "cestas";

    pub fn events() -> CollectionPath {
        CollectionPath::root(EVENTS)
    }

    pub fn games(event_id: &str) -> CollectionPath {
        events().nested(event_id, GAMES)
    }

    pub fn players() -> CollectionPath {
        CollectionPath::root(PLAYERS)
    }

    /// Scoring records nested under one game.
    pub fn game_scoring_events(event_id: &str, game_id: &str) -> CollectionPath {
        games(event_id).nested(game_id, SCORING_EVENTS)
    }

    /// Legacy season-wide scoring records.
    pub fn flat_scoring_events() -> CollectionPath {
        CollectionPath::root(SCORING_EVENTS)
    }
}
