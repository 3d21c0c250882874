pub mod aggregators;
pub mod collectors;
pub mod handlers;
pub mod participation;
pub mod scoring;
pub mod season;
pub mod service;

mod errors;
pub mod models;

pub use aggregators::{PlayerAggregator, ScopedGame, StandingsAggregator};
pub use collectors::{FlatSeasonSource, NestedGameSource, ScoreRecordCollector};
pub use errors::StatsError;
pub use models::*;
pub use season::SeasonYear;
pub use service::{StatsService, StatsServiceBuilder};

use async_trait::async_trait;

/// Priority constants for record sources.
/// Lower values run first; on duplicate ids the earlier source's copy is kept.
pub mod source_priority {
    /// Per-game nested collections (authoritative)
    pub const NESTED: u32 = 100;
    /// Legacy season-wide flat collection
    pub const FLAT: u32 = 200;
}

/// One storage location of scoring records.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch(&self, scope: &RecordScope) -> Result<Vec<ScoringEvent>, StatsError>;

    fn name(&self) -> &'static str;

    fn priority(&self) -> u32;
}
