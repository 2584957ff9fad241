//! Compiled-in default copy and structured data.
//!
//! Last-resort source for the resolver and the seed payload for imports.

mod defaults;

use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::content::{ContentDomain, Language, ListItem, ListSource};
use crate::document::{Fields, DEFAULT_DOCUMENT_ID};
use crate::notification::{ImageType, NotificationDocument, NotificationText};

/// Default text of one `(domain, field)` pair.
#[derive(Debug, Clone, Copy)]
pub struct TextDefault {
    pub domain: ContentDomain,
    pub field: &'static str,
    pub english: &'static str,
    pub indonesia: &'static str,
}

impl TextDefault {
    pub fn get(&self, language: Language) -> &'static str {
        match language {
            Language::English => self.english,
            Language::Indonesia => self.indonesia,
        }
    }
}

/// A schema field without a usable default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingEntry {
    pub domain: ContentDomain,
    pub field: &'static str,
    pub language: Language,
}

type Lists = BTreeMap<ContentDomain, Vec<ListItem>>;

#[derive(Debug)]
pub struct StaticCatalog {
    texts: &'static [TextDefault],
    build_lists: fn() -> Lists,
    lists: OnceLock<Lists>,
}

static SITE: StaticCatalog = StaticCatalog::new(defaults::TEXTS, defaults::lists);

/// The catalog bundled with the site.
pub fn site() -> &'static StaticCatalog {
    &SITE
}

impl StaticCatalog {
    pub const fn new(texts: &'static [TextDefault], build_lists: fn() -> Lists) -> Self {
        Self {
            texts,
            build_lists,
            lists: OnceLock::new(),
        }
    }

    fn entry(&self, domain: ContentDomain, field: &str) -> Option<&'static TextDefault> {
        self.texts
            .iter()
            .find(|t| t.domain == domain && t.field == field)
    }

    pub fn text(
        &self,
        domain: ContentDomain,
        field: &str,
        language: Language,
    ) -> Option<&'static str> {
        self.entry(domain, field).map(|t| t.get(language))
    }

    /// Total lookup: a field with no default renders as its own key.
    pub fn text_or_key<'a>(
        &'a self,
        domain: ContentDomain,
        field: &'a str,
        language: Language,
    ) -> &'a str {
        match self.text(domain, field, language) {
            Some(text) => text,
            None => {
                tracing::warn!(%domain, field, %language, "no bundled default for field");
                field
            }
        }
    }

    /// Default list of a domain; empty for domains without one.
    pub fn list(&self, domain: ContentDomain) -> &[ListItem] {
        self.lists
            .get_or_init(self.build_lists)
            .get(&domain)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Schema fields lacking a non-blank default in either language.
    pub fn missing_entries(&self) -> Vec<MissingEntry> {
        let mut missing = Vec::new();
        for domain in ContentDomain::ALL {
            for &field in domain.fields() {
                for language in Language::ALL {
                    let present = self
                        .text(domain, field, language)
                        .is_some_and(|t| !t.trim().is_empty());
                    if !present {
                        missing.push(MissingEntry {
                            domain,
                            field,
                            language,
                        });
                    }
                }
            }
        }
        missing
    }

    /// Seed payload for a domain's text document, in the localized shape.
    /// Embedded lists are included; collection-backed lists are not.
    pub fn document(&self, domain: ContentDomain) -> Fields {
        let mut fields = Fields::new();
        for field in domain.fields() {
            if let Some(entry) = self.entry(domain, field) {
                fields.insert(
                    (*field).to_string(),
                    json!({ "English": entry.english, "Indonesia": entry.indonesia }),
                );
            }
        }
        if let Some(schema) = domain.list() {
            if schema.source == ListSource::Embedded {
                let items = self.list(domain).iter().map(item_value).collect();
                fields.insert(schema.key.to_string(), Value::Array(items));
            }
        }
        fields
    }

    /// One document body per bundled testimonial.
    pub fn testimonial_documents(&self) -> Vec<Fields> {
        defaults::TESTIMONIALS
            .iter()
            .map(|(_, name, origin, english, indonesia, rating)| {
                let mut fields = Fields::new();
                fields.insert("name".into(), json!(name));
                fields.insert("origin".into(), json!(origin));
                fields.insert(
                    "text".into(),
                    json!({ "English": english, "Indonesia": indonesia }),
                );
                fields.insert("rating".into(), json!(rating));
                fields
            })
            .collect()
    }

    /// The always-present fallback banner.
    pub fn default_notification(&self, now: DateTime<Utc>) -> NotificationDocument {
        NotificationDocument {
            id: DEFAULT_DOCUMENT_ID.to_string(),
            english: NotificationText {
                update: "Update".into(),
                ck: "Check it out".into(),
                title: "Visa processing is open".into(),
                sub: "We are serving all visa types as usual.".into(),
                desc: "Message us on WhatsApp for the latest requirements before you apply.".into(),
            },
            indonesia: NotificationText {
                update: "Info".into(),
                ck: "Lihat".into(),
                title: "Pengurusan visa dibuka".into(),
                sub: "Kami melayani semua jenis visa seperti biasa.".into(),
                desc: "Hubungi kami via WhatsApp untuk persyaratan terbaru sebelum mengajukan.".into(),
            },
            image_type: ImageType::Default,
            scheduled_date: None,
            is_active: true,
            created_at: Some(now),
            updated_at: Some(now),
            deleted_at: None,
        }
    }
}

fn item_value(item: &ListItem) -> Value {
    let mut map = Fields::new();
    map.insert("id".into(), json!(item.id));
    for (key, field) in &item.fields {
        map.insert(key.clone(), json!(field));
    }
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentSnapshot;

    #[test]
    fn every_schema_field_has_both_defaults() {
        assert_eq!(site().missing_entries(), Vec::new());
    }

    #[test]
    fn every_list_domain_has_a_titled_default_list() {
        for domain in ContentDomain::ALL {
            let Some(schema) = domain.list() else { continue };
            let items = site().list(domain);
            assert!(!items.is_empty(), "{domain} has no default list");
            for language in Language::ALL {
                assert!(items.iter().all(|item| item.has_title(schema, language)));
            }
        }
    }

    #[test]
    fn unknown_field_renders_as_key() {
        assert_eq!(
            site().text_or_key(ContentDomain::Hero, "banner", Language::English),
            "banner"
        );
    }

    #[test]
    fn seed_document_normalizes_back_to_defaults() {
        for domain in ContentDomain::ALL {
            let seed = site().document(domain);
            let snapshot = ContentSnapshot::from_fields(domain, "seed", &seed);
            for field in domain.fields() {
                for language in Language::ALL {
                    assert_eq!(
                        snapshot.field(field).and_then(|f| f.text_for(language)),
                        site().text(domain, field, language)
                    );
                }
            }
            if let Some(list) = &snapshot.list {
                assert_eq!(list.as_slice(), site().list(domain));
            }
        }
    }

    #[test]
    fn testimonial_seed_matches_default_list() {
        assert_eq!(
            site().testimonial_documents().len(),
            site().list(ContentDomain::Testimonial).len()
        );
    }

    #[test]
    fn default_notification_is_active_and_immediate() {
        let doc = site().default_notification(Utc::now());
        assert!(doc.is_active);
        assert!(doc.scheduled_date.is_none());
        assert_eq!(doc.id, DEFAULT_DOCUMENT_ID);
    }
}
