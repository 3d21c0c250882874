mod flat;
mod nested;

pub use flat::FlatSeasonSource;
pub use nested::NestedGameSource;

use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use super::{RecordScope, RecordSource, ScoringEvent};
use crate::store::DocumentStore;

/// Gathers the canonical set of scoring records for a scope.
///
/// Sources run in priority order and share one seen-id set, so a record
/// stored in more than one location is kept once, from the first source that
/// returned it. A source that fails contributes nothing; the others still run.
pub struct ScoreRecordCollector {
    sources: Vec<Arc<dyn RecordSource>>,
}

impl ScoreRecordCollector {
    /// Collector over the nested per-game collections and the flat legacy
    /// collection.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_sources(vec![
            Arc::new(NestedGameSource::new(Arc::clone(&store))),
            Arc::new(FlatSeasonSource::new(store)),
        ])
    }

    pub fn with_sources(mut sources: Vec<Arc<dyn RecordSource>>) -> Self {
        sources.sort_by_key(|s| s.priority());
        Self { sources }
    }

    pub fn push_source(&mut self, source: Arc<dyn RecordSource>) {
        self.sources.push(source);
        self.sources.sort_by_key(|s| s.priority());
    }

    #[instrument(skip(self, scope), fields(game_count = scope.games().len()))]
    pub async fn collect(&self, scope: &RecordScope) -> Vec<ScoringEvent> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut records = Vec::new();

        if scope.is_empty() {
            return records;
        }

        for source in &self.sources {
            let fetched = match source.fetch(scope).await {
                Ok(fetched) => fetched,
                Err(err) => {
                    warn!(source = source.name(), error = %err, "Record source failed, skipping");
                    continue;
                }
            };

            let fetched_count = fetched.len();
            let mut duplicates = 0usize;
            for record in fetched {
                if seen.insert(record.id.clone()) {
                    records.push(record);
                } else {
                    duplicates += 1;
                }
            }
            debug!(
                source = source.name(),
                fetched_count, duplicates, "Merged records from source"
            );
        }

        debug!(record_count = records.len(), "Collected canonical records");
        records
    }
}
