//! Field and list resolution against the static catalog.
//!
//! Text fields resolve in this order, first hit wins:
//! 1. a localized remote value with non-blank text for the requested language,
//! 2. a legacy bare remote string, for any language,
//! 3. the catalog default for `(domain, field, language)`.
//!
//! Lists are all-or-nothing: the remote list replaces the bundled one as soon
//! as one remote item has a title.

use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::ContentDomain;
use super::language::Language;
use super::list::{ItemId, ListItem};
use super::localized::{non_blank, LocalizedField};
use super::snapshot::ContentSnapshot;
use crate::catalog::StaticCatalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ListOrigin {
    Remote,
    Static,
}

/// The list chosen for a domain, borrowed from either the snapshot or the
/// catalog.
#[derive(Debug, Clone, Copy)]
pub struct ListResolution<'a> {
    pub origin: ListOrigin,
    pub items: &'a [ListItem],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedItem {
    pub id: ItemId,
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResolvedValue {
    Text(String),
    List(Vec<ResolvedItem>),
}

/// Flat, single-language view of one domain handed to rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedContent {
    pub domain: ContentDomain,
    pub language: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_origin: Option<ListOrigin>,
    pub content: BTreeMap<String, ResolvedValue>,
}

impl ResolvedContent {
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.content.get(key) {
            Some(ResolvedValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn items(&self) -> Option<&[ResolvedItem]> {
        self.content.values().find_map(|value| match value {
            ResolvedValue::List(items) => Some(items.as_slice()),
            ResolvedValue::Text(_) => None,
        })
    }
}

/// Pure resolution over an already received snapshot; no I/O.
#[derive(Debug, Clone, Copy)]
pub struct FallbackResolver<'c> {
    catalog: &'c StaticCatalog,
}

impl<'c> FallbackResolver<'c> {
    pub fn new(catalog: &'c StaticCatalog) -> Self {
        Self { catalog }
    }

    /// Resolve one text field. Keys outside the domain schema skip the
    /// remote snapshot entirely.
    pub fn resolve<'a>(
        &'a self,
        domain: ContentDomain,
        field: &'a str,
        language: Language,
        snapshot: Option<&'a ContentSnapshot>,
    ) -> &'a str {
        debug_assert!(snapshot.map_or(true, |s| s.domain == domain));

        if domain.has_field(field) {
            match snapshot.and_then(|s| s.field(field)) {
                Some(LocalizedField::Localized(text)) => {
                    if let Some(value) = text.get(language) {
                        return value;
                    }
                }
                Some(LocalizedField::Legacy(text)) => {
                    if let Some(value) = non_blank(text) {
                        return value;
                    }
                }
                None => {}
            }
        }

        self.catalog.text_or_key(domain, field, language)
    }

    /// Pick the remote list wholesale when at least one item is titled in
    /// `language`, otherwise the bundled list. `None` for domains without a
    /// list.
    pub fn resolve_list<'a>(
        &'a self,
        domain: ContentDomain,
        language: Language,
        snapshot: Option<&'a ContentSnapshot>,
    ) -> Option<ListResolution<'a>> {
        let schema = domain.list()?;
        if let Some(items) = snapshot.and_then(|s| s.list.as_deref()) {
            if items.iter().any(|item| item.has_title(schema, language)) {
                return Some(ListResolution {
                    origin: ListOrigin::Remote,
                    items,
                });
            }
            if !items.is_empty() {
                tracing::debug!(
                    %domain,
                    %language,
                    count = items.len(),
                    "remote list has no titled item, using bundled list"
                );
            }
        }
        Some(ListResolution {
            origin: ListOrigin::Static,
            items: self.catalog.list(domain),
        })
    }

    /// Resolve every text field and the list of a domain for one language.
    pub fn resolve_domain(
        &self,
        domain: ContentDomain,
        language: Language,
        snapshot: Option<&ContentSnapshot>,
    ) -> ResolvedContent {
        let mut content = BTreeMap::new();
        for field in domain.fields() {
            let text = self.resolve(domain, field, language, snapshot);
            content.insert((*field).to_string(), ResolvedValue::Text(text.to_string()));
        }

        let mut list_origin = None;
        let list = self.resolve_list(domain, language, snapshot);
        if let (Some(schema), Some(list)) = (domain.list(), list) {
            let items = list
                .items
                .iter()
                .map(|item| resolve_item(item, language))
                .collect();
            content.insert(schema.key.to_string(), ResolvedValue::List(items));
            list_origin = Some(list.origin);
        }

        ResolvedContent {
            domain,
            language,
            list_origin,
            content,
        }
    }
}

fn resolve_item(item: &ListItem, language: Language) -> ResolvedItem {
    let fields = item
        .fields
        .iter()
        .filter_map(|(key, field)| {
            field
                .text_for(language)
                .map(|text| (key.clone(), text.to_string()))
        })
        .collect();
    ResolvedItem {
        id: item.id.clone(),
        fields,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{self, TextDefault};
    use crate::content::LocalizedText;
    use crate::document::Fields;
    use serde_json::{json, Value};

    static HELLO_CATALOG: StaticCatalog = StaticCatalog::new(
        &[TextDefault {
            domain: ContentDomain::Hero,
            field: "title",
            english: "Hi",
            indonesia: "Hai",
        }],
        BTreeMap::new,
    );

    fn snapshot(domain: ContentDomain, value: Value) -> ContentSnapshot {
        let fields: Fields = match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        };
        ContentSnapshot::from_fields(domain, "test", &fields)
    }

    #[test]
    fn remote_localized_value_wins() {
        let resolver = FallbackResolver::new(&HELLO_CATALOG);
        let snap = snapshot(ContentDomain::Hero, json!({ "title": { "English": "Hello" } }));
        assert_eq!(
            resolver.resolve(ContentDomain::Hero, "title", Language::English, Some(&snap)),
            "Hello"
        );
    }

    #[test]
    fn empty_remote_value_falls_back_to_default() {
        let resolver = FallbackResolver::new(&HELLO_CATALOG);
        let snap = snapshot(
            ContentDomain::Hero,
            json!({ "title": { "English": "", "Indonesia": "Halo" } }),
        );
        assert_eq!(
            resolver.resolve(ContentDomain::Hero, "title", Language::English, Some(&snap)),
            "Hi"
        );
        assert_eq!(
            resolver.resolve(ContentDomain::Hero, "title", Language::Indonesia, Some(&snap)),
            "Halo"
        );
    }

    #[test]
    fn missing_language_does_not_borrow_the_other() {
        let resolver = FallbackResolver::new(&HELLO_CATALOG);
        let snap = snapshot(ContentDomain::Hero, json!({ "title": { "English": "Hello" } }));
        assert_eq!(
            resolver.resolve(ContentDomain::Hero, "title", Language::Indonesia, Some(&snap)),
            "Hai"
        );
    }

    #[test]
    fn legacy_string_serves_both_languages() {
        let resolver = FallbackResolver::new(&HELLO_CATALOG);
        let snap = snapshot(ContentDomain::Hero, json!({ "title": "Bonjour" }));
        for language in Language::ALL {
            assert_eq!(
                resolver.resolve(ContentDomain::Hero, "title", language, Some(&snap)),
                "Bonjour"
            );
        }
    }

    #[test]
    fn absent_snapshot_uses_default() {
        let resolver = FallbackResolver::new(&HELLO_CATALOG);
        assert_eq!(
            resolver.resolve(ContentDomain::Hero, "title", Language::Indonesia, None),
            "Hai"
        );
    }

    #[test]
    fn unknown_field_ignores_remote() {
        let resolver = FallbackResolver::new(&HELLO_CATALOG);
        let mut snap = ContentSnapshot::skeleton(ContentDomain::Hero);
        snap.fields.insert(
            "promo".into(),
            LocalizedField::Localized(LocalizedText::new("Sale", "Diskon")),
        );
        assert_eq!(
            resolver.resolve(ContentDomain::Hero, "promo", Language::English, Some(&snap)),
            "promo"
        );
    }

    #[test]
    fn every_schema_field_resolves_non_empty_in_all_conditions() {
        let resolver = FallbackResolver::new(catalog::site());
        for domain in ContentDomain::ALL {
            let mut localized = Fields::new();
            let mut legacy = Fields::new();
            for field in domain.fields() {
                localized.insert(
                    (*field).to_string(),
                    json!({ "English": "remote en", "Indonesia": "remote id" }),
                );
                legacy.insert((*field).to_string(), json!("remote legacy"));
            }
            let localized = ContentSnapshot::from_fields(domain, "test", &localized);
            let legacy = ContentSnapshot::from_fields(domain, "test", &legacy);

            for field in domain.fields() {
                for language in Language::ALL {
                    for snap in [Some(&localized), Some(&legacy), None] {
                        let text = resolver.resolve(domain, field, language, snap);
                        assert!(!text.trim().is_empty(), "{domain}.{field} {language}");
                    }
                }
            }
        }
    }

    #[test]
    fn remote_list_is_used_wholesale() {
        let resolver = FallbackResolver::new(catalog::site());
        let snap = snapshot(
            ContentDomain::Team,
            json!({ "members": [
                { "id": 10, "name": "Wayan", "role": "Agent" },
                { "id": 11, "name": "" }
            ] }),
        );
        let list = resolver
            .resolve_list(ContentDomain::Team, Language::English, Some(&snap))
            .unwrap();
        assert_eq!(list.origin, ListOrigin::Remote);
        assert_eq!(list.items.len(), 2);
        assert_eq!(list.items[1].id, ItemId::Number(11));
    }

    #[test]
    fn untitled_remote_list_falls_back_entirely() {
        let resolver = FallbackResolver::new(catalog::site());
        let snap = snapshot(
            ContentDomain::Team,
            json!({ "members": [ { "id": 10, "name": " ", "role": "Agent" } ] }),
        );
        let list = resolver
            .resolve_list(ContentDomain::Team, Language::English, Some(&snap))
            .unwrap();
        assert_eq!(list.origin, ListOrigin::Static);
        assert_eq!(list.items, catalog::site().list(ContentDomain::Team));
    }

    #[test]
    fn domains_without_lists_resolve_no_list() {
        let resolver = FallbackResolver::new(catalog::site());
        assert!(resolver.resolve_list(ContentDomain::Hero, Language::English, None).is_none());
    }

    #[test]
    fn resolved_domain_is_single_language() {
        let resolver = FallbackResolver::new(catalog::site());
        let snap = snapshot(
            ContentDomain::Team,
            json!({
                "heading": { "English": "Meet us", "Indonesia": "Kenali kami" },
                "members": [
                    { "id": 1, "name": "Putu", "role": { "English": "Director", "Indonesia": "Direktur" } }
                ]
            }),
        );
        let resolved =
            resolver.resolve_domain(ContentDomain::Team, Language::Indonesia, Some(&snap));

        assert_eq!(resolved.text("heading"), Some("Kenali kami"));
        assert_eq!(resolved.list_origin, Some(ListOrigin::Remote));
        let items = resolved.items().unwrap();
        assert_eq!(items[0].fields.get("role").map(String::as_str), Some("Direktur"));

        let json = serde_json::to_value(&resolved).unwrap();
        assert_eq!(json["content"]["members"][0]["name"], "Putu");
        assert_eq!(json["listOrigin"], "remote");
    }

    #[test]
    fn list_titled_in_one_language_only_falls_back_for_the_other() {
        let resolver = FallbackResolver::new(catalog::site());
        let snap = snapshot(
            ContentDomain::Services,
            json!({ "visas": [ { "id": 1, "country": { "English": "Japan" } } ] }),
        );

        let english =
            resolver.resolve_domain(ContentDomain::Services, Language::English, Some(&snap));
        assert_eq!(english.list_origin, Some(ListOrigin::Remote));
        let country = english.items().unwrap()[0].fields.get("country");
        assert_eq!(country.map(String::as_str), Some("Japan"));

        let indonesian =
            resolver.resolve_domain(ContentDomain::Services, Language::Indonesia, Some(&snap));
        assert_eq!(indonesian.list_origin, Some(ListOrigin::Static));
        let items = indonesian.items().unwrap();
        assert_eq!(items.len(), catalog::site().list(ContentDomain::Services).len());
        assert!(items.iter().all(|item| item.fields.contains_key("country")));
    }
}
