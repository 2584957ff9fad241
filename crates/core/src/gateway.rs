//! Reads domain documents from the store and keeps live snapshots.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{broadcast, watch, RwLock};
use tokio::task::JoinHandle;

use crate::content::{ContentDomain, ContentSnapshot, ListSource};
use crate::document::{Collection, DocumentPath, DEFAULT_DOCUMENT_ID};
use crate::error::{ContentError, Result};
use crate::events::ContentEvent;
use crate::notification::model::parse_all;
use crate::notification::NotificationDocument;
use crate::store::DocumentStore;

pub struct ContentGateway {
    store: Arc<dyn DocumentStore>,
    /// Last good snapshot per domain, tagged with the ticket of the read
    /// that produced it.
    last_good: RwLock<HashMap<ContentDomain, (u64, Arc<ContentSnapshot>)>>,
    reads: AtomicU64,
}

impl ContentGateway {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            last_good: RwLock::new(HashMap::new()),
            reads: AtomicU64::new(0),
        }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// One-shot read of a domain. A missing document yields the skeleton;
    /// only transport failures are errors.
    pub async fn fetch(&self, domain: ContentDomain) -> Result<ContentSnapshot> {
        let ticket = self.reads.fetch_add(1, Ordering::SeqCst);
        let path = domain.text_path();
        let mut snapshot = match self.store.get(&path).await? {
            Some(doc) => ContentSnapshot::from_document(domain, &doc),
            None => ContentSnapshot::skeleton(domain),
        };

        if let Some(ListSource::Collection(collection)) = domain.list().map(|l| l.source) {
            let docs = self.store.list(collection).await?;
            snapshot = snapshot.with_collection_items(&docs);
        }

        self.remember(domain, ticket, Arc::new(snapshot.clone())).await;
        Ok(snapshot)
    }

    /// Cache `snapshot` unless a read that started later already landed.
    async fn remember(&self, domain: ContentDomain, ticket: u64, snapshot: Arc<ContentSnapshot>) {
        let mut cache = self.last_good.write().await;
        let stale = cache
            .get(&domain)
            .is_some_and(|(newest, _)| *newest > ticket);
        if stale {
            tracing::debug!(%domain, ticket, "dropping stale read");
        } else {
            cache.insert(domain, (ticket, snapshot));
        }
    }

    /// Fresh snapshot when the store answers, else the last good one, else
    /// the skeleton. Never fails.
    pub async fn snapshot_or_last_good(&self, domain: ContentDomain) -> Arc<ContentSnapshot> {
        match self.fetch(domain).await {
            Ok(snapshot) => Arc::new(snapshot),
            Err(err) => {
                tracing::warn!(%domain, error = %err, "serving cached content");
                self.cached(domain).await
            }
        }
    }

    async fn cached(&self, domain: ContentDomain) -> Arc<ContentSnapshot> {
        self.last_good
            .read()
            .await
            .get(&domain)
            .map(|(_, snapshot)| Arc::clone(snapshot))
            .unwrap_or_else(|| Arc::new(ContentSnapshot::skeleton(domain)))
    }

    /// All notification documents, malformed ones skipped.
    pub async fn notifications(&self) -> Result<Vec<NotificationDocument>> {
        let docs = self.store.list(Collection::Notifications).await?;
        Ok(parse_all(&docs))
    }

    /// A single notification; `None` id reads the default one.
    pub async fn notification(&self, id: Option<&str>) -> Result<Option<NotificationDocument>> {
        let id = id.unwrap_or(DEFAULT_DOCUMENT_ID);
        let path = DocumentPath::new(Collection::Notifications, id)
            .map_err(|e| ContentError::NotFound(format!("notification {id}: {e}")))?;
        match self.store.get(&path).await? {
            Some(doc) => NotificationDocument::from_stored(&doc).map(Some),
            None => Ok(None),
        }
    }

    /// Keep a live snapshot of `domain`. The returned guard owns the
    /// background task; dropping it releases the subscription.
    pub fn subscribe(self: &Arc<Self>, domain: ContentDomain) -> Subscription {
        let initial = self
            .last_good
            .try_read()
            .ok()
            .and_then(|cache| cache.get(&domain).map(|(_, snapshot)| Arc::clone(snapshot)))
            .unwrap_or_else(|| Arc::new(ContentSnapshot::skeleton(domain)));
        let (tx, rx) = watch::channel(initial);
        let events = self.store.events();
        let gateway = Arc::clone(self);
        let task = tokio::spawn(async move {
            gateway.follow(domain, tx, events).await;
        });
        Subscription { receiver: rx, task }
    }

    async fn follow(
        &self,
        domain: ContentDomain,
        tx: watch::Sender<Arc<ContentSnapshot>>,
        mut events: broadcast::Receiver<ContentEvent>,
    ) {
        self.refresh(domain, &tx).await;
        loop {
            tokio::select! {
                _ = tx.closed() => break,
                event = events.recv() => match event {
                    Ok(ContentEvent::DocumentChanged(change)) => {
                        if domain.watches(&change.path) {
                            self.refresh(domain, &tx).await;
                        }
                    }
                    Ok(ContentEvent::Reconnect) => self.refresh(domain, &tx).await,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::debug!(%domain, skipped, "subscription lagged, re-reading");
                        self.refresh(domain, &tx).await;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
            }
        }
        tracing::debug!(%domain, "content subscription released");
    }

    async fn refresh(&self, domain: ContentDomain, tx: &watch::Sender<Arc<ContentSnapshot>>) {
        match self.fetch(domain).await {
            Ok(snapshot) => {
                tx.send_if_modified(|current| {
                    if **current == snapshot {
                        false
                    } else {
                        *current = Arc::new(snapshot);
                        true
                    }
                });
            }
            Err(err) => {
                tracing::warn!(%domain, error = %err, "keeping last snapshot");
            }
        }
    }
}

/// Live view of one domain. Dropping it stops the background task.
pub struct Subscription {
    receiver: watch::Receiver<Arc<ContentSnapshot>>,
    task: JoinHandle<()>,
}

impl Subscription {
    /// Most recently delivered snapshot.
    pub fn current(&self) -> Arc<ContentSnapshot> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next snapshot. `false` once the feed has ended.
    pub async fn changed(&mut self) -> bool {
        self.receiver.changed().await.is_ok()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn snapshot(revision: &str) -> Arc<ContentSnapshot> {
        let mut snapshot = ContentSnapshot::skeleton(ContentDomain::Hero);
        snapshot.revision = Some(revision.to_string());
        Arc::new(snapshot)
    }

    #[tokio::test]
    async fn late_finishing_older_read_keeps_newer_cache_entry() {
        let gateway = ContentGateway::new(Arc::new(MemoryStore::default()));

        gateway.remember(ContentDomain::Hero, 2, snapshot("newer")).await;
        gateway.remember(ContentDomain::Hero, 1, snapshot("older")).await;
        let cached = gateway.cached(ContentDomain::Hero).await;
        assert_eq!(cached.revision.as_deref(), Some("newer"));

        gateway.remember(ContentDomain::Hero, 3, snapshot("newest")).await;
        let cached = gateway.cached(ContentDomain::Hero).await;
        assert_eq!(cached.revision.as_deref(), Some("newest"));
    }
}
