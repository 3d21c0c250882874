use async_trait::async_trait;
use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::league::paths;
use crate::stats::{source_priority, RecordScope, RecordSource, ScoringEvent, StatsError};
use crate::store::{Document, DocumentStore, Query, StoreError};

/// Field names a flat record may use for its game link.
const GAME_LINK_FIELDS: [&str; 2] = ["jogoId", "gameId"];

/// The legacy season-wide `cestas` collection. Records here carry their own
/// linkage fields. A single-game scope is filtered by the store on the game
/// link; wider scopes read the collection and filter after decoding.
pub struct FlatSeasonSource {
    store: Arc<dyn DocumentStore>,
}

impl FlatSeasonSource {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    async fn read(&self, scope: &RecordScope) -> Result<Vec<Document>, StoreError> {
        let path = paths::flat_scoring_events();
        let queries: Vec<Query> = match scope {
            RecordScope::Game(game) => GAME_LINK_FIELDS
                .iter()
                .map(|field| Query::all().where_eq(field, game.game_id.as_str()))
                .collect(),
            RecordScope::Contexts { .. } => vec![Query::all()],
        };

        let results = join_all(queries.iter().map(|query| self.store.query(&path, query))).await;

        let mut seen = HashSet::new();
        let mut docs = Vec::new();
        for result in results {
            for doc in result? {
                if seen.insert(doc.id.clone()) {
                    docs.push(doc);
                }
            }
        }
        Ok(docs)
    }
}

#[async_trait]
impl RecordSource for FlatSeasonSource {
    async fn fetch(&self, scope: &RecordScope) -> Result<Vec<ScoringEvent>, StatsError> {
        let docs = match self.read(scope).await {
            Ok(docs) => docs,
            Err(StoreError::CollectionNotFound(_)) => {
                debug!("Flat record collection absent");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        let total = docs.len();
        let records: Vec<ScoringEvent> = docs
            .iter()
            .filter_map(|doc| match ScoringEvent::from_document(doc, None) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!(doc_id = %doc.id, error = %err, "Skipping flat record");
                    None
                }
            })
            .filter(|record| scope.admits(record))
            .collect();

        debug!(total, in_scope = records.len(), "Filtered flat records");
        Ok(records)
    }

    fn name(&self) -> &'static str {
        "flat"
    }

    fn priority(&self) -> u32 {
        source_priority::FLAT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::GameRef;
    use crate::store::{CollectionPath, InMemoryDocumentStore};
    use serde_json::json;
    use std::collections::HashSet;
    use tokio::sync::Mutex;

    #[tokio::test]
    async fn keeps_records_anchored_in_scope() {
        let store = InMemoryDocumentStore::new();
        let flat = paths::flat_scoring_events();
        store
            .put(&flat, "c1", json!({"jogoId": "G1", "playerId": "P1", "points": 2}))
            .await;
        store
            .put(&flat, "c2", json!({"timeId": "T1", "playerId": "P2", "points": 1}))
            .await;
        store
            .put(&flat, "c3", json!({"eventoId": "E9", "playerId": "P3", "points": 3}))
            .await;
        store
            .put(
                &flat,
                "c4",
                json!({"jogoId": "G2", "eventoId": "E1", "playerId": "P1", "points": 3}),
            )
            .await;
        let source = FlatSeasonSource::new(Arc::new(store));

        let scope = RecordScope::Contexts {
            games: vec![GameRef::new("E1", "G1")],
            context_ids: HashSet::from(["G1".to_string(), "T1".to_string(), "E1".to_string()]),
        };
        let mut ids: Vec<String> = source
            .fetch(&scope)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["c1", "c2"]);
    }

    /// Store that records every query it answers.
    struct RecordingStore {
        inner: InMemoryDocumentStore,
        queries: Mutex<Vec<Query>>,
    }

    #[async_trait]
    impl DocumentStore for RecordingStore {
        async fn query(
            &self,
            path: &CollectionPath,
            query: &Query,
        ) -> Result<Vec<Document>, StoreError> {
            self.queries.lock().await.push(query.clone());
            self.inner.query(path, query).await
        }

        async fn get(
            &self,
            path: &CollectionPath,
            id: &str,
        ) -> Result<Option<Document>, StoreError> {
            self.inner.get(path, id).await
        }
    }

    #[tokio::test]
    async fn game_scope_filters_in_the_store() {
        let inner = InMemoryDocumentStore::new();
        let flat = paths::flat_scoring_events();
        inner
            .put(&flat, "c1", json!({"jogoId": "G1", "playerId": "P1", "points": 2}))
            .await;
        inner
            .put(&flat, "c2", json!({"gameId": "G1", "playerId": "P2", "points": 1}))
            .await;
        inner
            .put(
                &flat,
                "c3",
                json!({"jogoId": "G1", "gameId": "G1", "playerId": "P3", "points": 3}),
            )
            .await;
        inner
            .put(&flat, "c4", json!({"jogoId": "G2", "playerId": "P1", "points": 3}))
            .await;
        let store = Arc::new(RecordingStore {
            inner,
            queries: Mutex::new(Vec::new()),
        });
        let source = FlatSeasonSource::new(store.clone());

        let mut ids: Vec<String> = source
            .fetch(&RecordScope::Game(GameRef::new("E1", "G1")))
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["c1", "c2", "c3"]);

        let queries = store.queries.lock().await;
        assert_eq!(queries.len(), 2);
        assert!(queries.iter().all(|q| q.filters.len() == 1));
        let fields: Vec<&str> = queries.iter().map(|q| q.filters[0].field.as_str()).collect();
        assert_eq!(fields, vec!["jogoId", "gameId"]);
    }

    #[tokio::test]
    async fn missing_flat_collection_is_empty() {
        let source = FlatSeasonSource::new(Arc::new(InMemoryDocumentStore::new()));
        let scope = RecordScope::Game(GameRef::new("E1", "G1"));
        assert!(source.fetch(&scope).await.unwrap().is_empty());
    }
}
