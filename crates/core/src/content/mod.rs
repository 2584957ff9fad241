//! Content schema, normalization and fallback resolution.

pub mod domain;
pub mod language;
pub mod list;
pub mod localized;
pub mod resolve;
pub mod snapshot;

pub use domain::{ContentDomain, ListSchema, ListSource};
pub use language::Language;
pub use list::{ItemId, ListItem};
pub use localized::{LocalizedField, LocalizedText};
pub use resolve::{FallbackResolver, ListOrigin, ResolvedContent, ResolvedItem, ResolvedValue};
pub use snapshot::ContentSnapshot;
