use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::PgPool;
use tokio::sync::broadcast;
use uuid::Uuid;

use super::{DocumentStore, StoreError, WriteMode};
use crate::document::{merge_fields, Collection, DocumentPath, DocumentRow, Fields, StoredDocument};
use crate::events::{ChangeEvent, ChangeKind, ContentEvent, EventBus};

const SELECT_COLUMNS: &str =
    "SELECT id, collection, doc_id, revision, content, created_at, updated_at FROM documents";

/// PostgreSQL-backed store over the `documents` table (see `migrations/`).
///
/// Change events are published on the in-process bus after commit, so
/// subscribers only see writes made through this process.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
    bus: EventBus,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool, bus: EventBus) -> Self {
        Self { pool, bus }
    }

    async fn write(
        &self,
        path: &DocumentPath,
        fields: Fields,
        mode: WriteMode,
    ) -> Result<StoredDocument, StoreError> {
        let failed = |e: sqlx::Error| StoreError::WriteFailed(format!("{path}: {e}"));

        let mut tx = self.pool.begin().await.map_err(failed)?;
        let existing: Option<DocumentRow> = sqlx::query_as(&format!(
            "{SELECT_COLUMNS} WHERE collection = $1 AND doc_id = $2 FOR UPDATE"
        ))
        .bind(path.collection.as_str())
        .bind(&path.id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(failed)?;

        let previous_rev = existing.as_ref().map(|row| row.revision.to_string());
        let (content, kind) = match (existing, mode) {
            (None, _) => (fields, ChangeKind::Created),
            (Some(_), WriteMode::Replace) => (fields, ChangeKind::Replaced),
            (Some(row), WriteMode::Merge) => {
                let mut current = match row.content {
                    Value::Object(map) => map,
                    _ => Fields::new(),
                };
                merge_fields(&mut current, fields);
                (current, ChangeKind::Merged)
            }
        };

        let now = Utc::now();
        let revision = Uuid::new_v4();
        let row: DocumentRow = sqlx::query_as(
            "INSERT INTO documents (id, collection, doc_id, revision, content, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $6) \
             ON CONFLICT (collection, doc_id) DO UPDATE \
             SET revision = EXCLUDED.revision, content = EXCLUDED.content, updated_at = EXCLUDED.updated_at \
             RETURNING id, collection, doc_id, revision, content, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(path.collection.as_str())
        .bind(&path.id)
        .bind(revision)
        .bind(Value::Object(content))
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(failed)?;

        tx.commit().await.map_err(failed)?;

        let doc = row
            .into_document()
            .ok_or_else(|| {
                StoreError::WriteFailed(format!("{path}: stored row is not addressable"))
            })?;

        self.bus.publish(ContentEvent::DocumentChanged(ChangeEvent {
            path: path.clone(),
            kind,
            previous_rev,
            result_rev: doc.revision.clone(),
            timestamp: now,
        }));
        tracing::debug!(%path, ?kind, "postgres write committed");
        Ok(doc)
    }
}

fn unavailable(e: sqlx::Error) -> StoreError {
    tracing::error!("Database error: {e}");
    StoreError::Unavailable(e.to_string())
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    fn backend_tag(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(unavailable)
    }

    async fn get(&self, path: &DocumentPath) -> Result<Option<StoredDocument>, StoreError> {
        let row: Option<DocumentRow> =
            sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE collection = $1 AND doc_id = $2"))
                .bind(path.collection.as_str())
                .bind(&path.id)
                .fetch_optional(&self.pool)
                .await
                .map_err(unavailable)?;
        Ok(row.and_then(DocumentRow::into_document))
    }

    async fn list(&self, collection: Collection) -> Result<Vec<StoredDocument>, StoreError> {
        let rows: Vec<DocumentRow> =
            sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE collection = $1 ORDER BY doc_id"))
                .bind(collection.as_str())
                .fetch_all(&self.pool)
                .await
                .map_err(unavailable)?;
        Ok(rows.into_iter().filter_map(DocumentRow::into_document).collect())
    }

    async fn set(&self, path: &DocumentPath, fields: Fields) -> Result<StoredDocument, StoreError> {
        self.write(path, fields, WriteMode::Replace).await
    }

    async fn set_merge(
        &self,
        path: &DocumentPath,
        fields: Fields,
    ) -> Result<StoredDocument, StoreError> {
        self.write(path, fields, WriteMode::Merge).await
    }

    async fn add(
        &self,
        collection: Collection,
        fields: Fields,
    ) -> Result<StoredDocument, StoreError> {
        let path = DocumentPath::new(collection, Uuid::new_v4().simple().to_string())
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        self.write(&path, fields, WriteMode::Replace).await
    }

    fn events(&self) -> broadcast::Receiver<ContentEvent> {
        self.bus.subscribe()
    }
}
