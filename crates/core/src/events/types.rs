use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::DocumentPath;

/// Events emitted after a write commits, in commit order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ContentEvent {
    DocumentChanged(ChangeEvent),
    /// Connectivity to the backing store was restored; cached snapshots may
    /// be stale.
    Reconnect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChangeKind {
    Created,
    Replaced,
    Merged,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEvent {
    pub path: DocumentPath,
    pub kind: ChangeKind,
    pub previous_rev: Option<String>,
    pub result_rev: String,
    pub timestamp: DateTime<Utc>,
}
