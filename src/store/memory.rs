use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use super::{CollectionPath, Document, DocumentStore, Query, StoreError};

/// In-memory implementation of DocumentStore for development and testing
///
/// Mirrors the behaviour of a hosted document database closely enough for the
/// aggregation core: a collection that never had a document written to it is
/// reported as missing rather than empty.
#[derive(Debug, Default, Clone)]
pub struct InMemoryDocumentStore {
    collections: Arc<RwLock<HashMap<CollectionPath, BTreeMap<String, Value>>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            collections: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Inserts or replaces a document. Only used to seed fixtures; the
    /// aggregation core itself never writes.
    pub async fn put(&self, path: &CollectionPath, id: &str, data: Value) {
        let mut collections = self.collections.write().await;
        collections
            .entry(path.clone())
            .or_default()
            .insert(id.to_string(), data);
    }

    pub async fn document_count(&self, path: &CollectionPath) -> usize {
        let collections = self.collections.read().await;
        collections.get(path).map(|c| c.len()).unwrap_or_default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    #[instrument(skip(self, query), fields(path = %path))]
    async fn query(
        &self,
        path: &CollectionPath,
        query: &Query,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        let collection = collections
            .get(path)
            .ok_or_else(|| StoreError::CollectionNotFound(path.to_string()))?;

        let mut docs: Vec<Document> = collection
            .iter()
            .map(|(id, data)| Document::new(id.clone(), data.clone()))
            .filter(|doc| query.matches(doc))
            .collect();
        query.sort(&mut docs);

        debug!(document_count = docs.len(), "Queried collection in memory");
        Ok(docs)
    }

    #[instrument(skip(self), fields(path = %path))]
    async fn get(&self, path: &CollectionPath, id: &str) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        let doc = collections
            .get(path)
            .and_then(|c| c.get(id))
            .map(|data| Document::new(id, data.clone()));

        match &doc {
            Some(_) => debug!(doc_id = %id, "Document found in memory"),
            None => debug!(doc_id = %id, "Document not found in memory"),
        }
        Ok(doc)
    }
}
