use std::sync::Arc;

use visa_site_core::catalog;
use visa_site_core::gateway::ContentGateway;
use visa_site_core::import::Importer;
use visa_site_core::notification::{
    Clock, NotificationDocument, NotificationService, NotificationWatcher,
};
use visa_site_core::store::DocumentStore;

use crate::config::AppConfig;

/// Shared application state, passed to all handlers via Axum's `State` extractor.
/// Wrapped in `Arc` so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    config: AppConfig,
    gateway: Arc<ContentGateway>,
    notifications: NotificationService,
    importer: Importer,
    watcher: NotificationWatcher,
}

impl AppState {
    /// Wire the core services over `store`. Spawns the notification watcher,
    /// so this must run inside a tokio runtime.
    pub fn new(store: Arc<dyn DocumentStore>, config: AppConfig, clock: Arc<dyn Clock>) -> Self {
        let gateway = Arc::new(ContentGateway::new(store.clone()));
        let watcher = NotificationWatcher::spawn(gateway.clone(), clock.clone());
        Self {
            inner: Arc::new(InnerState {
                config,
                notifications: NotificationService::new(store.clone(), clock),
                importer: Importer::new(store, catalog::site()),
                gateway,
                watcher,
            }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn gateway(&self) -> &ContentGateway {
        &self.inner.gateway
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        self.inner.gateway.store()
    }

    pub fn notifications(&self) -> &NotificationService {
        &self.inner.notifications
    }

    pub fn importer(&self) -> &Importer {
        &self.inner.importer
    }

    pub fn active_notification(&self) -> Option<NotificationDocument> {
        self.inner.watcher.active()
    }
}
