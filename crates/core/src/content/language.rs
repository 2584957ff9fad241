use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ContentError;

/// Display language of the site. Serialized with the exact keys used inside
/// localized documents.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Language {
    #[default]
    English,
    Indonesia,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Indonesia];

    /// Key of this language inside a localized mapping.
    pub const fn key(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Indonesia => "Indonesia",
        }
    }

    /// Accepts the mapping keys and short tags (`en`, `id`, `en-US`, `id_ID`),
    /// case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        let tag = normalized.split(['-', '_']).next().unwrap_or("");
        match tag {
            "english" | "en" => Some(Language::English),
            "indonesia" | "indonesian" | "id" | "in" => Some(Language::Indonesia),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Language {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ContentError::UnknownLanguage(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keys_and_tags() {
        assert_eq!(Language::parse("English"), Some(Language::English));
        assert_eq!(Language::parse("Indonesia"), Some(Language::Indonesia));
        assert_eq!(Language::parse("en-US"), Some(Language::English));
        assert_eq!(Language::parse("ID_id"), Some(Language::Indonesia));
        assert_eq!(Language::parse("fr"), None);
        assert_eq!(Language::parse(""), None);
    }

    #[test]
    fn from_str_reports_unknown() {
        let err = "jv".parse::<Language>().unwrap_err();
        assert!(matches!(err, ContentError::UnknownLanguage(tag) if tag == "jv"));
    }

    #[test]
    fn serializes_as_mapping_key() {
        assert_eq!(
            serde_json::to_string(&Language::Indonesia).unwrap(),
            "\"Indonesia\""
        );
    }
}
