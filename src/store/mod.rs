pub mod errors;
pub mod memory;
pub mod models;
pub mod postgres;

pub use errors::StoreError;
pub use memory::InMemoryDocumentStore;
pub use models::{CollectionPath, Document, Filter, OrderBy, Query};
pub use postgres::PostgresDocumentStore;

use async_trait::async_trait;

/// Read interface over the external document store.
///
/// The aggregation core never writes; implementations only need to answer
/// collection queries and single-document lookups.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn query(
        &self,
        path: &CollectionPath,
        query: &Query,
    ) -> Result<Vec<Document>, StoreError>;

    async fn get(&self, path: &CollectionPath, id: &str) -> Result<Option<Document>, StoreError>;

    async fn list(&self, path: &CollectionPath) -> Result<Vec<Document>, StoreError> {
        self.query(path, &Query::all()).await
    }
}
