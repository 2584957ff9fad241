use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use super::domain::{ContentDomain, ListSource};
use super::list::{normalize_items, ItemId, ListItem};
use super::localized::LocalizedField;
use crate::document::{Fields, StoredDocument};
use crate::error::ContentError;

/// Typed, normalized view of one domain's remote content.
///
/// Immutable once built; the gateway hands out new snapshots rather than
/// editing existing ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSnapshot {
    pub domain: ContentDomain,
    /// Revision of the text document, `None` for a skeleton.
    pub revision: Option<String>,
    pub fields: BTreeMap<String, LocalizedField>,
    /// `None` when the remote store holds no list at all.
    pub list: Option<Vec<ListItem>>,
}

impl ContentSnapshot {
    /// The empty shape used before any remote document exists.
    pub fn skeleton(domain: ContentDomain) -> Self {
        Self {
            domain,
            revision: None,
            fields: BTreeMap::new(),
            list: None,
        }
    }

    pub fn is_skeleton(&self) -> bool {
        self.revision.is_none() && self.fields.is_empty() && self.list.is_none()
    }

    /// Normalize a domain's text document. Only schema keys are kept; fields
    /// of the wrong shape are logged and treated as absent.
    pub fn from_document(domain: ContentDomain, document: &StoredDocument) -> Self {
        let mut snapshot = Self::from_fields(domain, &document.path.to_string(), &document.fields);
        snapshot.revision = Some(document.revision.clone());
        snapshot
    }

    pub fn from_fields(domain: ContentDomain, origin: &str, raw: &Fields) -> Self {
        let mut fields = BTreeMap::new();
        for key in domain.fields() {
            let Some(value) = raw.get(*key) else {
                continue;
            };
            match normalize_field(origin, key, value) {
                Ok(Some(field)) => {
                    fields.insert((*key).to_string(), field);
                }
                Ok(None) => {}
                Err(err) => tracing::warn!(%domain, error = %err, "treating field as absent"),
            }
        }

        let list = domain.list().and_then(|schema| match schema.source {
            ListSource::Embedded => match raw.get(schema.key) {
                Some(Value::Array(items)) => Some(normalize_items(schema, items)),
                Some(Value::Null) | None => None,
                Some(_) => {
                    tracing::warn!(
                        %domain,
                        list = schema.key,
                        origin,
                        "list field is not an array"
                    );
                    None
                }
            },
            ListSource::Collection(_) => None,
        });

        Self {
            domain,
            revision: None,
            fields,
            list,
        }
    }

    /// Attach items read from a per-item collection.
    pub fn with_collection_items(mut self, documents: &[StoredDocument]) -> Self {
        let Some(schema) = self.domain.list() else {
            return self;
        };
        if documents.is_empty() {
            return self;
        }
        let items = documents
            .iter()
            .filter_map(|doc| {
                let raw = Value::Object(doc.fields.clone());
                match ListItem::normalize(schema, &raw, ItemId::Text(doc.path.id.clone())) {
                    Ok(item) => Some(item),
                    Err(reason) => {
                        tracing::warn!(path = %doc.path, %reason, "dropping list document");
                        None
                    }
                }
            })
            .collect();
        self.list = Some(items);
        self
    }

    pub fn field(&self, key: &str) -> Option<&LocalizedField> {
        self.fields.get(key)
    }
}

fn normalize_field(
    origin: &str,
    key: &str,
    value: &Value,
) -> Result<Option<LocalizedField>, ContentError> {
    LocalizedField::from_value(value).map_err(|reason| ContentError::MalformedDocument {
        path: origin.to_string(),
        field: key.to_string(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Language, LocalizedText};
    use serde_json::json;

    fn raw(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn keeps_schema_fields_only() {
        let snapshot = ContentSnapshot::from_fields(
            ContentDomain::Hero,
            "content/hero",
            &raw(json!({
                "title": { "English": "Hello", "Indonesia": "Halo" },
                "subtitle": "Legacy subtitle",
                "unrelated": "ignored"
            })),
        );

        assert_eq!(
            snapshot.field("title"),
            Some(&LocalizedField::Localized(LocalizedText::new("Hello", "Halo")))
        );
        assert_eq!(
            snapshot.field("subtitle"),
            Some(&LocalizedField::Legacy("Legacy subtitle".into()))
        );
        assert!(snapshot.field("unrelated").is_none());
        assert!(snapshot.list.is_none());
    }

    #[test]
    fn malformed_field_is_absent() {
        let snapshot = ContentSnapshot::from_fields(
            ContentDomain::Hero,
            "content/hero",
            &raw(json!({ "title": 12, "subtitle": ["x"] })),
        );
        assert!(snapshot.fields.is_empty());
    }

    #[test]
    fn embedded_list_is_normalized() {
        let snapshot = ContentSnapshot::from_fields(
            ContentDomain::Team,
            "content/team",
            &raw(json!({
                "heading": "Our team",
                "members": [
                    { "id": 1, "name": "Putu", "desc": "Founder" },
                    { "id": 2, "name": "Kadek", "description": "Operations" }
                ]
            })),
        );
        let members = snapshot.list.as_ref().unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(
            members[0]
                .field("description")
                .and_then(|f| f.text_for(Language::Indonesia)),
            Some("Founder")
        );
    }

    #[test]
    fn skeleton_is_empty() {
        let skeleton = ContentSnapshot::skeleton(ContentDomain::Gallery);
        assert!(skeleton.is_skeleton());
        assert!(skeleton.field("heading").is_none());
    }
}
