use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use super::clock::Clock;
use super::model::NotificationDocument;
use super::selector::{next_recheck, select_active};
use crate::document::Collection;
use crate::events::ContentEvent;
use crate::gateway::ContentGateway;

/// Keeps the active banner current.
///
/// Re-selects whenever a notification document changes and, while a future
/// schedule exists, wakes up exactly when the nearest one falls due.
pub struct NotificationWatcher {
    receiver: watch::Receiver<Option<NotificationDocument>>,
    task: JoinHandle<()>,
}

impl NotificationWatcher {
    pub fn spawn(gateway: Arc<ContentGateway>, clock: Arc<dyn Clock>) -> Self {
        let (tx, rx) = watch::channel(None);
        let events = gateway.store().events();
        let task = tokio::spawn(run(gateway, clock, tx, events));
        Self { receiver: rx, task }
    }

    pub fn active(&self) -> Option<NotificationDocument> {
        self.receiver.borrow().clone()
    }

    pub fn receiver(&self) -> watch::Receiver<Option<NotificationDocument>> {
        self.receiver.clone()
    }
}

impl Drop for NotificationWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn load(
    gateway: &ContentGateway,
    previous: Vec<NotificationDocument>,
) -> Vec<NotificationDocument> {
    match gateway.notifications().await {
        Ok(docs) => docs,
        Err(err) => {
            tracing::warn!(error = %err, "keeping previous notifications");
            previous
        }
    }
}

async fn run(
    gateway: Arc<ContentGateway>,
    clock: Arc<dyn Clock>,
    tx: watch::Sender<Option<NotificationDocument>>,
    mut events: broadcast::Receiver<ContentEvent>,
) {
    let mut docs = load(&gateway, Vec::new()).await;
    loop {
        let now = clock.now();
        let active = select_active(now, &docs).cloned();
        tx.send_if_modified(|current| {
            if *current == active {
                false
            } else {
                tracing::info!(
                    active = active.as_ref().map(|d| d.id.as_str()),
                    "active notification changed"
                );
                *current = active;
                true
            }
        });

        let wake = next_recheck(now, &docs)
            .and_then(|at| (at - now).to_std().ok());
        let timer = async {
            match wake {
                Some(delay) => tokio::time::sleep(delay).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            _ = tx.closed() => break,
            _ = timer => {}
            event = events.recv() => match event {
                Ok(ContentEvent::DocumentChanged(change)) => {
                    if change.path.collection == Collection::Notifications {
                        docs = load(&gateway, docs).await;
                    }
                }
                Ok(ContentEvent::Reconnect) | Err(broadcast::error::RecvError::Lagged(_)) => {
                    docs = load(&gateway, docs).await;
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
        }
    }
    tracing::debug!("notification watcher stopped");
}
