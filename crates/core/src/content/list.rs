use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::domain::ListSchema;
use super::language::Language;
use super::localized::LocalizedField;

/// Stable identifier of a list item. Bundled data uses numbers, store
/// auto-ids are strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Number(n) => write!(f, "{n}"),
            ItemId::Text(s) => f.write_str(s),
        }
    }
}

/// One entry of a structured list with every legacy key already mapped to
/// its canonical name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub id: ItemId,
    pub fields: BTreeMap<String, LocalizedField>,
}

impl ListItem {
    pub fn new(id: ItemId, fields: BTreeMap<String, LocalizedField>) -> Self {
        Self { id, fields }
    }

    /// Normalize a raw item. Unknown keys are dropped, malformed values are
    /// skipped with a warning, and a canonical key with text beats its
    /// legacy alias.
    pub fn normalize(
        schema: &ListSchema,
        raw: &Value,
        fallback_id: ItemId,
    ) -> Result<Self, String> {
        let Value::Object(map) = raw else {
            return Err("list item is not an object".to_string());
        };

        let id = match map.get("id") {
            Some(Value::Number(n)) => n.as_i64().map(ItemId::Number),
            Some(Value::String(s)) if !s.trim().is_empty() => Some(ItemId::Text(s.clone())),
            _ => None,
        }
        .unwrap_or(fallback_id);

        let mut fields: BTreeMap<String, (LocalizedField, bool)> = BTreeMap::new();
        for (key, value) in map {
            if key == "id" {
                continue;
            }
            let Some(canonical) = schema.canonical_key(key) else {
                tracing::debug!(list = schema.key, key = %key, "ignoring unknown list item key");
                continue;
            };
            let field = match value {
                Value::Number(n) => LocalizedField::Legacy(n.to_string()),
                Value::Bool(b) => LocalizedField::Legacy(b.to_string()),
                other => match LocalizedField::from_value(other) {
                    Ok(Some(field)) => field,
                    Ok(None) => continue,
                    Err(reason) => {
                        tracing::warn!(
                            list = schema.key,
                            item = %id,
                            key = %key,
                            %reason,
                            "skipping malformed list item field"
                        );
                        continue;
                    }
                },
            };
            let is_canonical = canonical == key;
            let replace = match fields.get(canonical) {
                None => true,
                Some((existing, existing_canonical)) => {
                    (!existing.has_text() && field.has_text())
                        || (is_canonical && !existing_canonical && field.has_text())
                }
            };
            if replace {
                fields.insert(canonical.to_string(), (field, is_canonical));
            }
        }

        Ok(Self {
            id,
            fields: fields.into_iter().map(|(k, (v, _))| (k, v)).collect(),
        })
    }

    pub fn field(&self, key: &str) -> Option<&LocalizedField> {
        self.fields.get(key)
    }

    /// Whether the schema's title-equivalent field carries text in
    /// `language`.
    pub fn has_title(&self, schema: &ListSchema, language: Language) -> bool {
        self.field(schema.title_key)
            .and_then(|field| field.text_for(language))
            .is_some()
    }
}

/// Normalize a raw embedded array; items that are not objects are dropped.
pub fn normalize_items(schema: &ListSchema, raw: &[Value]) -> Vec<ListItem> {
    raw.iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let fallback = ItemId::Number(index as i64);
            match ListItem::normalize(schema, value, fallback) {
                Ok(item) => Some(item),
                Err(reason) => {
                    tracing::warn!(list = schema.key, index, %reason, "dropping list item");
                    None
                }
            }
        })
        .collect()
}
