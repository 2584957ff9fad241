use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::id::{Collection, DocumentPath};

/// Raw document body as stored remotely.
pub type Fields = serde_json::Map<String, Value>;

/// A document as read back from the store, before any normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDocument {
    pub path: DocumentPath,
    /// Fresh UUID per committed write.
    pub revision: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub fields: Fields,
}

/// Database row representation of a document.
/// Maps to the `documents` PostgreSQL table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DocumentRow {
    pub id: Uuid,
    pub collection: String,
    pub doc_id: String,
    pub revision: Uuid,
    pub content: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DocumentRow {
    /// Convert into a [`StoredDocument`]; `None` when the row does not name
    /// a known collection or a valid id.
    pub fn into_document(self) -> Option<StoredDocument> {
        let collection = Collection::parse(&self.collection)?;
        let path = DocumentPath::new(collection, self.doc_id).ok()?;
        let fields = match self.content {
            Value::Object(map) => map,
            other => {
                tracing::warn!(%path, kind = json_kind(&other), "document body is not an object");
                Fields::new()
            }
        };
        Some(StoredDocument {
            path,
            revision: self.revision.to_string(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            fields,
        })
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
