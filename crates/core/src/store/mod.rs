//! Document store port.
//!
//! The resolution core only needs get / list / set / merge / add plus a
//! commit-ordered change feed.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::broadcast;

use crate::document::{Collection, DocumentPath, Fields, StoredDocument};
use crate::events::ContentEvent;

pub use memory::MemoryStore;
pub use postgres::PgDocumentStore;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Transport or connectivity failure.
    #[error("store unavailable: {0}")]
    Unavailable(String),
    /// A write did not commit.
    #[error("write failed: {0}")]
    WriteFailed(String),
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short label for logs.
    fn backend_tag(&self) -> &'static str;

    /// Cheap connectivity check.
    async fn ping(&self) -> Result<(), StoreError>;

    async fn get(&self, path: &DocumentPath) -> Result<Option<StoredDocument>, StoreError>;

    /// Every document of a collection, ordered by id.
    async fn list(&self, collection: Collection) -> Result<Vec<StoredDocument>, StoreError>;

    /// Create or fully replace a document.
    async fn set(&self, path: &DocumentPath, fields: Fields) -> Result<StoredDocument, StoreError>;

    /// Create a document or merge `fields` into it at field level.
    async fn set_merge(
        &self,
        path: &DocumentPath,
        fields: Fields,
    ) -> Result<StoredDocument, StoreError>;

    /// Create a document under a fresh id.
    async fn add(
        &self,
        collection: Collection,
        fields: Fields,
    ) -> Result<StoredDocument, StoreError>;

    /// Change feed, delivered in commit order.
    fn events(&self) -> broadcast::Receiver<ContentEvent>;
}

/// How a write treats an existing document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WriteMode {
    Replace,
    Merge,
}
