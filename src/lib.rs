// Library crate for the ANCB statistics service
// This file exposes the public API for integration tests

pub mod config;
pub mod league;
pub mod shared;
pub mod stats;
pub mod store;

// Re-export commonly used types for easier access in tests
pub use config::AppConfig;
pub use league::{Event, Game, LeagueRepository, Modality, Player, Team};
pub use shared::{router, AppError, AppState};
pub use stats::{
    BoxScoreLine, PlayerLine, RankingMode, ScoreRecordCollector, StandingRow, StatsError,
    StatsService,
};
pub use store::{DocumentStore, InMemoryDocumentStore, PostgresDocumentStore};
