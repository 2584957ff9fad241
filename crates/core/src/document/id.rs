/// Document addressing.
///
/// Every document lives at `{collection}/{id}`:
/// - Domain copy: `content/{domain}`
/// - UI strings: `uiText/{section}`
/// - Banners: `notifications/{id}`
/// - Testimonials: `testimonials/{autoId}`
use std::fmt;

use serde::{Deserialize, Serialize};

use super::validate::{validate_document_id, ValidationError};

/// Id of the single well-known document each domain reads by default.
pub const DEFAULT_DOCUMENT_ID: &str = "default";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Collection {
    #[serde(rename = "content")]
    Content,
    #[serde(rename = "uiText")]
    UiText,
    #[serde(rename = "notifications")]
    Notifications,
    #[serde(rename = "testimonials")]
    Testimonials,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Content,
        Collection::UiText,
        Collection::Notifications,
        Collection::Testimonials,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Collection::Content => "content",
            Collection::UiText => "uiText",
            Collection::Notifications => "notifications",
            Collection::Testimonials => "testimonials",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentPath {
    pub collection: Collection,
    pub id: String,
}

impl DocumentPath {
    /// Build a path, rejecting ids that would not round-trip through `parse`.
    pub fn new(collection: Collection, id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        validate_document_id(&id)?;
        Ok(Self { collection, id })
    }

    /// Path for ids known at compile time (domain names, `default`).
    pub(crate) fn fixed(collection: Collection, id: &'static str) -> Self {
        Self {
            collection,
            id: id.to_string(),
        }
    }

    /// Parse a `collection/id` string.
    pub fn parse(path: &str) -> Option<Self> {
        let (collection, id) = path.split_once('/')?;
        let collection = Collection::parse(collection)?;
        Self::new(collection, id).ok()
    }

    pub fn is_default(&self) -> bool {
        self.id == DEFAULT_DOCUMENT_ID
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}
