use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::language::Language;
use crate::document::model::json_kind;

/// Both language variants of one piece of copy. Either may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    #[serde(rename = "English", default, skip_serializing_if = "Option::is_none")]
    pub english: Option<String>,
    #[serde(rename = "Indonesia", default, skip_serializing_if = "Option::is_none")]
    pub indonesia: Option<String>,
}

impl LocalizedText {
    pub fn new(english: impl Into<String>, indonesia: impl Into<String>) -> Self {
        Self {
            english: Some(english.into()),
            indonesia: Some(indonesia.into()),
        }
    }

    /// Text for `language` only; blank counts as missing.
    pub fn get(&self, language: Language) -> Option<&str> {
        let text = match language {
            Language::English => self.english.as_deref(),
            Language::Indonesia => self.indonesia.as_deref(),
        };
        text.and_then(non_blank)
    }

    fn has_any(&self) -> bool {
        Language::ALL.into_iter().any(|lang| self.get(lang).is_some())
    }
}

/// A field as it appears after normalization. Decided once per fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LocalizedField {
    /// Pre-bilingual shape: one string shared by both languages.
    Legacy(String),
    Localized(LocalizedText),
}

impl LocalizedField {
    /// Classify a raw value. `Ok(None)` for null; `Err` carries the reason
    /// the value is neither a legacy string nor a localized mapping.
    pub fn from_value(value: &Value) -> Result<Option<Self>, String> {
        match value {
            Value::Null => Ok(None),
            Value::String(text) => Ok(Some(LocalizedField::Legacy(text.clone()))),
            Value::Object(map) => {
                let english = language_entry(map, Language::English)?;
                let indonesia = language_entry(map, Language::Indonesia)?;
                if english.is_none() && indonesia.is_none() {
                    return Err("is a mapping without English or Indonesia keys".to_string());
                }
                Ok(Some(LocalizedField::Localized(LocalizedText {
                    english,
                    indonesia,
                })))
            }
            other => Err(format!(
                "is a {} rather than text or a localized mapping",
                json_kind(other)
            )),
        }
    }

    /// The displayable text for `language`. A legacy string serves both
    /// languages; a localized mapping never leaks the other language.
    pub fn text_for(&self, language: Language) -> Option<&str> {
        match self {
            LocalizedField::Legacy(text) => non_blank(text),
            LocalizedField::Localized(text) => text.get(language),
        }
    }

    /// True when the field has displayable text in at least one language.
    pub fn has_text(&self) -> bool {
        match self {
            LocalizedField::Legacy(text) => non_blank(text).is_some(),
            LocalizedField::Localized(text) => text.has_any(),
        }
    }
}

fn language_entry(
    map: &serde_json::Map<String, Value>,
    language: Language,
) -> Result<Option<String>, String> {
    match map.get(language.key()) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(other) => Err(format!(
            "has a {} under `{}`",
            json_kind(other),
            language.key()
        )),
    }
}

pub(crate) fn non_blank(text: &str) -> Option<&str> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classifies_shapes() {
        assert_eq!(
            LocalizedField::from_value(&json!("Bonjour")).unwrap(),
            Some(LocalizedField::Legacy("Bonjour".into()))
        );
        assert_eq!(
            LocalizedField::from_value(&json!({ "English": "Hi", "Indonesia": "Hai" })).unwrap(),
            Some(LocalizedField::Localized(LocalizedText::new("Hi", "Hai")))
        );
        assert_eq!(LocalizedField::from_value(&json!(null)).unwrap(), None);
    }

    #[test]
    fn rejects_malformed_shapes() {
        assert!(LocalizedField::from_value(&json!(42)).is_err());
        assert!(LocalizedField::from_value(&json!(["a"])).is_err());
        assert!(LocalizedField::from_value(&json!({ "en": "Hi" })).is_err());
        assert!(LocalizedField::from_value(&json!({ "English": 3 })).is_err());
    }

    #[test]
    fn never_exposes_other_language() {
        let field = LocalizedField::Localized(LocalizedText {
            english: Some("Hello".into()),
            indonesia: None,
        });
        assert_eq!(field.text_for(Language::English), Some("Hello"));
        assert_eq!(field.text_for(Language::Indonesia), None);
    }

    #[test]
    fn blank_text_is_absent() {
        let field = LocalizedField::Localized(LocalizedText::new("  ", "Halo"));
        assert_eq!(field.text_for(Language::English), None);
        assert!(field.has_text());
        assert!(!LocalizedField::Legacy(String::new()).has_text());
    }
}
