use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use super::{DocumentStore, StoreError, WriteMode};
use crate::document::{merge_fields, Collection, DocumentPath, Fields, StoredDocument};
use crate::events::{ChangeEvent, ChangeKind, ContentEvent, EventBus};

/// In-process store for development and tests.
///
/// `set_offline(true)` makes every call fail the way an unreachable remote
/// store would.
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: RwLock<BTreeMap<DocumentPath, StoredDocument>>,
    bus: EventBus,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new(bus: EventBus) -> Self {
        Self {
            docs: RwLock::new(BTreeMap::new()),
            bus,
            offline: AtomicBool::new(false),
        }
    }

    /// Toggle simulated connectivity loss. Coming back online publishes
    /// [`ContentEvent::Reconnect`].
    pub fn set_offline(&self, offline: bool) {
        let was = self.offline.swap(offline, Ordering::SeqCst);
        if was && !offline {
            self.bus.publish(ContentEvent::Reconnect);
        }
    }

    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.docs.read().await.is_empty()
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("memory store is offline".into()))
        } else {
            Ok(())
        }
    }

    async fn write(
        &self,
        path: &DocumentPath,
        fields: Fields,
        mode: WriteMode,
    ) -> Result<StoredDocument, StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::WriteFailed(format!("{path}: memory store is offline")));
        }

        let now = Utc::now();
        let revision = Uuid::new_v4().to_string();
        let mut docs = self.docs.write().await;
        let previous = docs.get(path).cloned();

        let (doc, kind) = match previous.clone() {
            None => (
                StoredDocument {
                    path: path.clone(),
                    revision: revision.clone(),
                    created_at: now,
                    updated_at: now,
                    fields,
                },
                ChangeKind::Created,
            ),
            Some(mut existing) => {
                let kind = match mode {
                    WriteMode::Replace => {
                        existing.fields = fields;
                        ChangeKind::Replaced
                    }
                    WriteMode::Merge => {
                        merge_fields(&mut existing.fields, fields);
                        ChangeKind::Merged
                    }
                };
                existing.revision = revision.clone();
                existing.updated_at = now;
                (existing, kind)
            }
        };
        docs.insert(path.clone(), doc.clone());
        // Publish while holding the lock so events follow commit order.
        self.bus.publish(ContentEvent::DocumentChanged(ChangeEvent {
            path: path.clone(),
            kind,
            previous_rev: previous.map(|p| p.revision),
            result_rev: revision,
            timestamp: now,
        }));
        drop(docs);

        tracing::debug!(%path, ?kind, "memory store write committed");
        Ok(doc)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_online()
    }

    async fn get(&self, path: &DocumentPath) -> Result<Option<StoredDocument>, StoreError> {
        self.check_online()?;
        Ok(self.docs.read().await.get(path).cloned())
    }

    async fn list(&self, collection: Collection) -> Result<Vec<StoredDocument>, StoreError> {
        self.check_online()?;
        Ok(self
            .docs
            .read()
            .await
            .values()
            .filter(|doc| doc.path.collection == collection)
            .cloned()
            .collect())
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
