use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::content::Language;
use crate::document::{Fields, StoredDocument};
use crate::error::ContentError;

/// Banner copy for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationText {
    /// Badge label.
    pub update: String,
    /// Call-to-action label.
    pub ck: String,
    pub title: String,
    pub sub: String,
    pub desc: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    #[default]
    Default,
    Nyepi,
}

/// A stored banner. `id` mirrors the document path and is not persisted in
/// the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDocument {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "English", default)]
    pub english: NotificationText,
    #[serde(rename = "Indonesia", default)]
    pub indonesia: NotificationText,
    #[serde(default)]
    pub image_type: ImageType,
    /// `None` shows the banner immediately.
    #[serde(default)]
    pub scheduled_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl NotificationDocument {
    pub fn from_stored(doc: &StoredDocument) -> Result<Self, ContentError> {
        let mut parsed: Self = serde_json::from_value(Value::Object(doc.fields.clone()))
            .map_err(|e| ContentError::MalformedDocument {
                path: doc.path.to_string(),
                field: "*".to_string(),
                reason: e.to_string(),
            })?;
        parsed.id = doc.path.id.clone();
        Ok(parsed)
    }

    /// Body to persist; the id lives in the path.
    pub fn to_fields(&self) -> Fields {
        match serde_json::to_value(self) {
            Ok(Value::Object(mut map)) => {
                map.remove("id");
                map
            }
            _ => Fields::new(),
        }
    }

    pub fn text(&self, language: Language) -> &NotificationText {
        match language {
            Language::English => &self.english,
            Language::Indonesia => &self.indonesia,
        }
    }

    /// Active and either unscheduled or past its scheduled time.
    pub fn is_eligible(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.scheduled_date.map_or(true, |at| at <= now)
    }
}

/// Parse a collection listing, skipping documents that do not fit the shape.
pub fn parse_all(docs: &[StoredDocument]) -> Vec<NotificationDocument> {
    docs.iter()
        .filter_map(|doc| match NotificationDocument::from_stored(doc) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                tracing::warn!(error = %err, "skipping notification");
                None
            }
        })
        .collect()
}

/// Editable part of a notification as submitted by the editor form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDraft {
    #[serde(rename = "English")]
    pub english: NotificationText,
    #[serde(rename = "Indonesia")]
    pub indonesia: NotificationText,
    #[serde(default)]
    pub image_type: ImageType,
    #[serde(default)]
    pub scheduled_date: Option<DateTime<Utc>>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

fn active_by_default() -> bool {
    true
}

impl NotificationDraft {
    pub(crate) fn to_fields(&self) -> Fields {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Fields::new(),
        }
    }
}
