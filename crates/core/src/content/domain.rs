use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::document::{Collection, DocumentPath};
use crate::error::ContentError;

/// One independently editable area of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentDomain {
    Hero,
    Nav,
    Footer,
    Services,
    About,
    Team,
    Gallery,
    Testimonial,
    Notification,
}

/// Where the items of a structured list are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSource {
    /// An array under `ListSchema::key` inside the domain document.
    Embedded,
    /// One document per item in a collection.
    Collection(Collection),
}

/// Shape of a domain's structured list.
#[derive(Debug)]
pub struct ListSchema {
    pub key: &'static str,
    /// Field that must carry text for the remote list to be used at all.
    pub title_key: &'static str,
    /// Canonical item field keys.
    pub fields: &'static [&'static str],
    /// `(legacy, canonical)` key renames applied during normalization.
    pub aliases: &'static [(&'static str, &'static str)],
    pub source: ListSource,
}

impl ListSchema {
    /// Canonical name for a raw item key, or `None` if the key is not part
    /// of the schema.
    pub fn canonical_key(&self, key: &str) -> Option<&'static str> {
        if let Some(field) = self.fields.iter().find(|f| **f == key) {
            return Some(*field);
        }
        self.aliases
            .iter()
            .find(|(legacy, _)| *legacy == key)
            .map(|(_, canonical)| *canonical)
    }
}

static SERVICES_LIST: ListSchema = ListSchema {
    key: "visas",
    title_key: "country",
    fields: &["country", "description", "processingTime", "image"],
    aliases: &[
        ("name", "country"),
        ("title", "country"),
        ("desc", "description"),
        ("duration", "processingTime"),
        ("img", "image"),
    ],
    source: ListSource::Embedded,
};

static TEAM_LIST: ListSchema = ListSchema {
    key: "members",
    title_key: "name",
    fields: &["name", "role", "description", "image"],
    aliases: &[
        ("desc", "description"),
        ("position", "role"),
        ("photo", "image"),
    ],
    source: ListSource::Embedded,
};

static GALLERY_LIST: ListSchema = ListSchema {
    key: "images",
    title_key: "src",
    fields: &["src", "alt"],
    aliases: &[("url", "src"), ("image", "src"), ("caption", "alt")],
    source: ListSource::Embedded,
};

static TESTIMONIAL_LIST: ListSchema = ListSchema {
    key: "testimonials",
    title_key: "text",
    fields: &["name", "origin", "text", "rating"],
    aliases: &[
        ("message", "text"),
        ("quote", "text"),
        ("author", "name"),
        ("country", "origin"),
    ],
    source: ListSource::Collection(Collection::Testimonials),
};

impl ContentDomain {
    pub const ALL: [ContentDomain; 9] = [
        ContentDomain::Hero,
        ContentDomain::Nav,
        ContentDomain::Footer,
        ContentDomain::Services,
        ContentDomain::About,
        ContentDomain::Team,
        ContentDomain::Gallery,
        ContentDomain::Testimonial,
        ContentDomain::Notification,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ContentDomain::Hero => "hero",
            ContentDomain::Nav => "nav",
            ContentDomain::Footer => "footer",
            ContentDomain::Services => "services",
            ContentDomain::About => "about",
            ContentDomain::Team => "team",
            ContentDomain::Gallery => "gallery",
            ContentDomain::Testimonial => "testimonial",
            ContentDomain::Notification => "notification",
        }
    }

    /// Editable text field keys of this domain.
    pub const fn fields(self) -> &'static [&'static str] {
        match self {
            ContentDomain::Hero => &[
                "title",
                "subtitle",
                "ctaPrimary",
                "ctaSecondary",
                "whatsappMessage",
            ],
            ContentDomain::Nav => &[
                "home",
                "services",
                "about",
                "team",
                "gallery",
                "testimonials",
                "contact",
            ],
            ContentDomain::Footer => {
                &["tagline", "address", "hours", "copyright", "contactHeading"]
            }
            ContentDomain::Services => &["heading", "subheading", "cta"],
            ContentDomain::About => &["heading", "body", "mission", "vision"],
            ContentDomain::Team => &["heading", "subheading"],
            ContentDomain::Gallery => &["heading", "subheading"],
            ContentDomain::Testimonial => &["heading", "subheading"],
            ContentDomain::Notification => &["badge", "dismiss", "readMore"],
        }
    }

    pub fn has_field(self, field: &str) -> bool {
        self.fields().contains(&field)
    }

    pub fn list(self) -> Option<&'static ListSchema> {
        match self {
            ContentDomain::Services => Some(&SERVICES_LIST),
            ContentDomain::Team => Some(&TEAM_LIST),
            ContentDomain::Gallery => Some(&GALLERY_LIST),
            ContentDomain::Testimonial => Some(&TESTIMONIAL_LIST),
            _ => None,
        }
    }

    /// Document holding this domain's text fields (and embedded list).
    pub fn text_path(self) -> DocumentPath {
        let collection = match self {
            ContentDomain::Nav
            | ContentDomain::Footer
            | ContentDomain::Testimonial
            | ContentDomain::Notification => Collection::UiText,
            _ => Collection::Content,
        };
        DocumentPath::fixed(collection, self.as_str())
    }

    /// Whether a write to `path` can change what this domain resolves to.
    pub fn watches(self, path: &DocumentPath) -> bool {
        if *path == self.text_path() {
            return true;
        }
        matches!(
            self.list().map(|l| l.source),
            Some(ListSource::Collection(collection)) if collection == path.collection
        )
    }
}

impl fmt::Display for ContentDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentDomain {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| ContentError::UnknownDomain(s.to_string()))
    }
}
