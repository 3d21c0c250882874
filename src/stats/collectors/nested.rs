use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::league::paths;
use crate::stats::{source_priority, GameRef, RecordScope, RecordSource, ScoringEvent, StatsError};
use crate::store::{DocumentStore, StoreError};

/// Records stored under each game (`eventos/{e}/jogos/{g}/cestas`).
///
/// Reads for every game in scope are issued together. A game whose
/// collection is missing or unreadable contributes no records.
pub struct NestedGameSource {
    store: Arc<dyn DocumentStore>,
}

impl NestedGameSource {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    async fn fetch_game(&self, game: &GameRef) -> Vec<ScoringEvent> {
        let path = paths::game_scoring_events(&game.event_id, &game.game_id);
        let docs = match self.store.list(&path).await {
            Ok(docs) => docs,
            Err(StoreError::CollectionNotFound(_)) => {
                debug!(game_id = %game.game_id, "No nested records for game");
                return Vec::new();
            }
            Err(err) => {
                warn!(game_id = %game.game_id, error = %err, "Failed to read nested records");
                return Vec::new();
            }
        };

        docs.iter()
            .filter_map(|doc| match ScoringEvent::from_document(doc, Some(game)) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!(doc_id = %doc.id, error = %err, "Skipping nested record");
                    None
                }
            })
            .collect()
    }
}

#[async_trait]
impl RecordSource for NestedGameSource {
    async fn fetch(&self, scope: &RecordScope) -> Result<Vec<ScoringEvent>, StatsError> {
        let batches = join_all(scope.games().iter().map(|game| self.fetch_game(game))).await;
        Ok(batches.into_iter().flatten().collect())
    }

    fn name(&self) -> &'static str {
        "nested"
    }

    fn priority(&self) -> u32 {
        source_priority::NESTED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryDocumentStore;
    use serde_json::json;

    #[tokio::test]
    async fn reads_every_game_and_tolerates_missing_collections() {
        let store = InMemoryDocumentStore::new();
        store
            .put(
                &paths::game_scoring_events("E1", "G1"),
                "c1",
                json!({"playerId": "P1", "points": 3}),
            )
            .await;
        store
            .put(
                &paths::game_scoring_events("E1", "G1"),
                "bad",
                json!({"playerId": "P1", "points": 7}),
            )
            .await;
        let source = NestedGameSource::new(Arc::new(store));

        let scope = RecordScope::Contexts {
            games: vec![GameRef::new("E1", "G1"), GameRef::new("E1", "G2")],
            context_ids: Default::default(),
        };
        let records = source.fetch(&scope).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "c1");
        assert_eq!(records[0].game_id.as_deref(), Some("G1"));
        assert_eq!(records[0].event_id.as_deref(), Some("E1"));
    }
}
