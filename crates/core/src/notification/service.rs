use std::sync::Arc;

use serde_json::{json, Value};
use uuid::Uuid;

use super::clock::Clock;
use super::model::{parse_all, NotificationDocument, NotificationDraft};
use crate::document::{Collection, DocumentPath, Fields};
use crate::error::{ContentError, Result};
use crate::store::DocumentStore;

/// Editor actions on notification documents.
#[derive(Clone)]
pub struct NotificationService {
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
}

impl NotificationService {
    pub fn new(store: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    fn path(id: &str) -> Result<DocumentPath> {
        DocumentPath::new(Collection::Notifications, id)
            .map_err(|e| ContentError::NotFound(format!("notification {id}: {e}")))
    }

    pub async fn list(&self) -> Result<Vec<NotificationDocument>> {
        let docs = self.store.list(Collection::Notifications).await?;
        Ok(parse_all(&docs))
    }

    /// Create or update a notification. `None` id creates a new document.
    pub async fn save(
        &self,
        id: Option<&str>,
        draft: &NotificationDraft,
    ) -> Result<NotificationDocument> {
        let id = match id {
            Some(id) => id.to_string(),
            None => Uuid::new_v4().simple().to_string(),
        };
        let path = Self::path(&id)?;
        let now = self.clock.now();

        let mut fields = draft.to_fields();
        fields.insert("updatedAt".into(), json!(now));
        let existing = self.store.get(&path).await?;
        if existing.is_none() {
            fields.insert("createdAt".into(), json!(now));
        }
        if draft.is_active {
            fields.insert("deletedAt".into(), Value::Null);
        }

        let stored = self.store.set_merge(&path, fields).await?;
        tracing::info!(%path, active = draft.is_active, "notification saved");
        NotificationDocument::from_stored(&stored)
    }

    /// Switch a notification on or off. Re-activating clears a soft delete.
    pub async fn set_active(&self, id: &str, active: bool) -> Result<NotificationDocument> {
        let path = self.existing(id).await?;
        let now = self.clock.now();
        let mut fields = Fields::new();
        fields.insert("isActive".into(), json!(active));
        fields.insert("updatedAt".into(), json!(now));
        if active {
            fields.insert("deletedAt".into(), Value::Null);
        }
        let stored = self.store.set_merge(&path, fields).await?;
        tracing::info!(%path, active, "notification activation changed");
        NotificationDocument::from_stored(&stored)
    }

    /// Soft delete: deactivate and stamp `deletedAt`. The default banner is
    /// refused and left untouched.
    pub async fn delete(&self, id: &str) -> Result<NotificationDocument> {
        let path = Self::path(id)?;
        if path.is_default() {
            tracing::warn!(%path, "refusing to delete the default notification");
            return Err(ContentError::CannotDeleteDefault);
        }
        let path = self.existing(id).await?;
        let now = self.clock.now();
        let mut fields = Fields::new();
        fields.insert("isActive".into(), json!(false));
        fields.insert("deletedAt".into(), json!(now));
        fields.insert("updatedAt".into(), json!(now));
        let stored = self.store.set_merge(&path, fields).await?;
        tracing::info!(%path, "notification soft-deleted");
        NotificationDocument::from_stored(&stored)
    }

    async fn existing(&self, id: &str) -> Result<DocumentPath> {
        let path = Self::path(id)?;
        match self.store.get(&path).await? {
            Some(_) => Ok(path),
            None => Err(ContentError::NotFound(format!("notification {id}"))),
        }
    }
}
