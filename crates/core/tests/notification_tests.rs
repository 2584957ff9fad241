use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use visa_site_core::catalog;
use visa_site_core::document::{Collection, DocumentPath};
use visa_site_core::gateway::ContentGateway;
use visa_site_core::notification::{
    select_active, Clock, NotificationDraft, NotificationService, NotificationWatcher,
    SystemClock,
};
use visa_site_core::store::{DocumentStore, MemoryStore};
use visa_site_core::ContentError;

/// Wall clock that advances with tokio's (pausable) timer.
struct TokioClock {
    base: DateTime<Utc>,
    start: tokio::time::Instant,
}

impl TokioClock {
    fn new() -> Self {
        Self {
            base: Utc::now(),
            start: tokio::time::Instant::now(),
        }
    }
}

impl Clock for TokioClock {
    fn now(&self) -> DateTime<Utc> {
        let elapsed = tokio::time::Instant::now() - self.start;
        self.base + chrono::Duration::from_std(elapsed).unwrap()
    }
}

fn draft(scheduled: Option<DateTime<Utc>>) -> NotificationDraft {
    let base = catalog::site().default_notification(Utc::now());
    NotificationDraft {
        english: base.english,
        indonesia: base.indonesia,
        image_type: base.image_type,
        scheduled_date: scheduled,
        is_active: true,
    }
}

fn service(store: &Arc<MemoryStore>, clock: Arc<dyn Clock>) -> NotificationService {
    NotificationService::new(store.clone(), clock)
}

#[tokio::test]
async fn default_notification_cannot_be_deleted() {
    let store = Arc::new(MemoryStore::default());
    let notifications = service(&store, Arc::new(SystemClock));
    let saved = notifications.save(Some("default"), &draft(None)).await.unwrap();

    let err = notifications.delete("default").await.unwrap_err();
    assert!(matches!(err, ContentError::CannotDeleteDefault));

    let path = DocumentPath::new(Collection::Notifications, "default").unwrap();
    let after = store.get(&path).await.unwrap().unwrap();
    let reread = visa_site_core::notification::NotificationDocument::from_stored(&after).unwrap();
    assert_eq!(reread, saved);
}

#[tokio::test]
async fn delete_soft_deletes_and_deselects() {
    let store = Arc::new(MemoryStore::default());
    let notifications = service(&store, Arc::new(SystemClock));
    notifications.save(Some("nyepi"), &draft(None)).await.unwrap();

    let deleted = notifications.delete("nyepi").await.unwrap();
    assert!(!deleted.is_active);
    assert!(deleted.deleted_at.is_some());

    let all = notifications.list().await.unwrap();
    assert_eq!(all.len(), 1);
    assert!(select_active(Utc::now(), &all).is_none());
}

#[tokio::test]
async fn reactivation_clears_soft_delete() {
    let store = Arc::new(MemoryStore::default());
    let notifications = service(&store, Arc::new(SystemClock));
    notifications.save(Some("promo"), &draft(None)).await.unwrap();
    notifications.delete("promo").await.unwrap();

    let restored = notifications.set_active("promo", true).await.unwrap();
    assert!(restored.is_active);
    assert!(restored.deleted_at.is_none());
}

#[tokio::test]
async fn missing_notification_is_not_found() {
    let store = Arc::new(MemoryStore::default());
    let notifications = service(&store, Arc::new(SystemClock));
    assert!(matches!(
        notifications.delete("ghost").await,
        Err(ContentError::NotFound(_))
    ));
    assert!(matches!(
        notifications.set_active("ghost", false).await,
        Err(ContentError::NotFound(_))
    ));
}

#[tokio::test]
async fn save_keeps_created_at_on_update() {
    let store = Arc::new(MemoryStore::default());
    let notifications = service(&store, Arc::new(SystemClock));
    let first = notifications.save(Some("promo"), &draft(None)).await.unwrap();
    let second = notifications.save(Some("promo"), &draft(None)).await.unwrap();
    assert_eq!(first.created_at, second.created_at);
    assert!(second.updated_at >= first.updated_at);
}

#[tokio::test(start_paused = true)]
async fn watcher_shows_scheduled_notification_on_time() {
    let clock = Arc::new(TokioClock::new());
    let store = Arc::new(MemoryStore::default());
    let gateway = Arc::new(ContentGateway::new(store.clone()));
    let notifications = service(&store, clock.clone());

    let due = clock.now() + chrono::Duration::hours(1);
    notifications.save(Some("promo"), &draft(Some(due))).await.unwrap();

    let watcher = NotificationWatcher::spawn(gateway, clock.clone());
    let mut rx = watcher.receiver();
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert!(watcher.active().is_none());

    let active = tokio::time::timeout(Duration::from_secs(3 * 3600), rx.wait_for(Option::is_some))
        .await
        .expect("scheduled notification never activated")
        .unwrap()
        .clone();

    assert_eq!(active.map(|d| d.id), Some("promo".to_string()));
    assert!(clock.now() >= due);
}

#[tokio::test]
async fn watcher_reacts_to_writes() {
    let store = Arc::new(MemoryStore::default());
    let gateway = Arc::new(ContentGateway::new(store.clone()));
    let notifications = service(&store, Arc::new(SystemClock));
    notifications.save(Some("default"), &draft(None)).await.unwrap();

    let watcher = NotificationWatcher::spawn(gateway, Arc::new(SystemClock));
    let mut rx = watcher.receiver();
    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(Option::is_some))
        .await
        .expect("default never selected")
        .unwrap();

    notifications.set_active("default", false).await.unwrap();
    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(Option::is_none))
        .await
        .expect("deactivation not observed")
        .unwrap();
}
