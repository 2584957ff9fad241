//! Content resolution layer for the bilingual (English / Indonesian) visa
//! agency site.
//!
//! Remote CMS documents are read through [`gateway::ContentGateway`],
//! normalized into [`content::ContentSnapshot`]s and resolved per field and
//! language by [`content::FallbackResolver`], which falls back to the
//! compiled-in [`catalog::StaticCatalog`]. Notification banners have their
//! own temporal policy in [`notification`].

pub mod auth;
pub mod catalog;
pub mod content;
pub mod document;
pub mod error;
pub mod events;
pub mod gateway;
pub mod import;
pub mod notification;
pub mod store;

pub use content::{ContentDomain, ContentSnapshot, FallbackResolver, Language};
pub use error::{ContentError, Result};
