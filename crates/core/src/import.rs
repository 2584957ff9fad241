//! Bulk copy of the static catalog into the remote store.
//!
//! Domain imports overwrite one document and are idempotent. Testimonials
//! live one per document, so the operator picks between appending and
//! upserting by author name.

use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::StaticCatalog;
use crate::content::{ContentDomain, ItemId, Language, ListItem};
use crate::document::{Collection, DocumentPath, Fields, DEFAULT_DOCUMENT_ID};
use crate::error::{ContentError, Result};
use crate::store::DocumentStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImportMode {
    /// Always add new testimonial documents.
    Append,
    /// Update the testimonial with the same `name`, add it otherwise.
    #[default]
    #[serde(alias = "upsert")]
    UpsertByKey,
}

impl FromStr for ImportMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "append" => Ok(ImportMode::Append),
            "upsert" | "upsertByKey" => Ok(ImportMode::UpsertByKey),
            other => Err(format!("unknown import mode `{other}`")),
        }
    }
}

/// Outcome of one domain inside a batch import.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub domain: ContentDomain,
    /// Documents written, when the import committed.
    pub written: Option<usize>,
    pub error: Option<String>,
}

impl ImportReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

pub struct Importer {
    store: Arc<dyn DocumentStore>,
    catalog: &'static StaticCatalog,
}

impl Importer {
    pub fn new(store: Arc<dyn DocumentStore>, catalog: &'static StaticCatalog) -> Self {
        Self { store, catalog }
    }

    /// Overwrite one domain's remote content from the catalog. Returns the
    /// number of documents written.
    pub async fn import_domain(&self, domain: ContentDomain, mode: ImportMode) -> Result<usize> {
        let mut written = 0;
        self.store
            .set(&domain.text_path(), self.catalog.document(domain))
            .await?;
        written += 1;

        match domain {
            ContentDomain::Testimonial => {
                written += self.import_testimonials(mode).await?;
            }
            ContentDomain::Notification => {
                let default = self.catalog.default_notification(Utc::now());
                let path = DocumentPath::fixed(Collection::Notifications, DEFAULT_DOCUMENT_ID);
                self.store.set(&path, default.to_fields()).await?;
                written += 1;
            }
            _ => {}
        }

        tracing::info!(%domain, written, "domain imported");
        Ok(written)
    }

    pub async fn import_testimonials(&self, mode: ImportMode) -> Result<usize> {
        let seeds = self.catalog.testimonial_documents();
        let existing: Vec<(String, DocumentPath)> = match mode {
            ImportMode::Append => Vec::new(),
            ImportMode::UpsertByKey => self
                .store
                .list(Collection::Testimonials)
                .await?
                .into_iter()
                .filter_map(|doc| upsert_key(&doc.fields).map(|key| (key, doc.path)))
                .collect(),
        };

        let mut written = 0;
        for seed in seeds {
            let target = upsert_key(&seed)
                .and_then(|key| existing.iter().find(|(name, _)| *name == key))
                .map(|(_, path)| path);
            match target {
                Some(path) => {
                    self.store.set(path, seed).await?;
                }
                None => {
                    self.store.add(Collection::Testimonials, seed).await?;
                }
            }
            written += 1;
        }
        tracing::info!(?mode, written, "testimonials imported");
        Ok(written)
    }

    /// Import every domain. A failing domain is reported and the rest still
    /// run.
    pub async fn import_all(&self, mode: ImportMode) -> Vec<ImportReport> {
        let mut reports = Vec::with_capacity(ContentDomain::ALL.len());
        for domain in ContentDomain::ALL {
            let report = match self.import_domain(domain, mode).await {
                Ok(written) => ImportReport {
                    domain,
                    written: Some(written),
                    error: None,
                },
                Err(err) => {
                    tracing::error!(%domain, error = %err, "domain import failed");
                    ImportReport {
                        domain,
                        written: None,
                        error: Some(write_failure(err).to_string()),
                    }
                }
            };
            reports.push(report);
        }
        reports
    }
}

/// Author name a testimonial is matched on, read through the list schema so
/// legacy keys such as `author` count too.
fn upsert_key(fields: &Fields) -> Option<String> {
    let schema = ContentDomain::Testimonial.list()?;
    let raw = Value::Object(fields.clone());
    let item = ListItem::normalize(schema, &raw, ItemId::Number(0)).ok()?;
    item.field("name")?
        .text_for(Language::English)
        .map(|name| name.trim().to_string())
}

/// Imports are writes; any failure is reported as one.
fn write_failure(err: ContentError) -> ContentError {
    match err {
        ContentError::StoreUnavailable(msg) => ContentError::WriteFailed(msg),
        other => other,
    }
}

