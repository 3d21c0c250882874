use async_trait::async_trait;
use serde_json::Value;
use sqlx::{types::Json, PgPool, Postgres, QueryBuilder, Row};
use tracing::{debug, instrument, warn};

use super::{CollectionPath, Document, DocumentStore, Query, StoreError};

/// PostgreSQL implementation of the document store
///
/// Documents live in a single JSONB table keyed by collection path and id:
///
/// ```sql
/// CREATE TABLE documents (
///     collection_path TEXT NOT NULL,
///     id TEXT NOT NULL,
///     data JSONB NOT NULL,
///     PRIMARY KEY (collection_path, id)
/// );
/// ```
pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Builds the SELECT for a collection query. Filters compare the JSONB value
/// of a top-level field; ordering puts documents missing the field first.
fn select_query(path: &CollectionPath, query: &Query) -> QueryBuilder<'static, Postgres> {
    let mut builder: QueryBuilder<Postgres> =
        QueryBuilder::new("SELECT id, data FROM documents WHERE collection_path = ");
    builder.push_bind(path.as_str().to_string());

    for filter in &query.filters {
        builder
            .push(" AND data -> ")
            .push_bind(filter.field.clone())
            .push(" = ")
            .push_bind(Json(filter.value.clone()));
    }

    if let Some(order) = &query.order_by {
        builder
            .push(" ORDER BY data -> ")
            .push_bind(order.field.clone())
            .push(if order.descending {
                " DESC NULLS LAST"
            } else {
                " ASC NULLS FIRST"
            });
    }

    builder
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    #[instrument(skip(self, query), fields(path = %path))]
    async fn query(
        &self,
        path: &CollectionPath,
        query: &Query,
    ) -> Result<Vec<Document>, StoreError> {
        let mut builder = select_query(path, query);

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to query collection in database");
                StoreError::from(e)
            })?;

        let docs = rows
            .into_iter()
            .map(|row| {
                let id: String = row.try_get("id")?;
                let data: Json<Value> = row.try_get("data")?;
                Ok(Document::new(id, data.0))
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        debug!(document_count = docs.len(), "Queried collection in database");
        Ok(docs)
    }

    #[instrument(skip(self), fields(path = %path))]
    async fn get(&self, path: &CollectionPath, id: &str) -> Result<Option<Document>, StoreError> {
        let row = sqlx::query("SELECT id, data FROM documents WHERE collection_path = $1 AND id = $2")
            .bind(path.as_str())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, doc_id = %id, "Failed to fetch document from database");
                StoreError::from(e)
            })?;

        let doc = match row {
            Some(row) => {
                let data: Json<Value> = row.try_get("data")?;
                debug!(doc_id = %id, "Document found in database");
                Some(Document::new(id, data.0))
            }
            None => {
                debug!(doc_id = %id, "Document not found in database");
                None
            }
        };

        Ok(doc)
    }
}
