pub mod content;
pub mod health;
pub mod import;
pub mod notifications;

use axum::Router;
use serde::Deserialize;
use visa_site_core::Language;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Assemble the full router with all route groups.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(content::routes())
        .merge(notifications::routes())
        .merge(import::routes())
        .with_state(state)
}

/// `?lang=` query shared by public read routes. Defaults to English.
#[derive(Debug, Default, Deserialize)]
pub struct LanguageQuery {
    pub lang: Option<String>,
}

impl LanguageQuery {
    pub fn language(&self) -> ApiResult<Language> {
        match self.lang.as_deref() {
            None | Some("") => Ok(Language::default()),
            Some(tag) => tag.parse::<Language>().map_err(ApiError::from),
        }
    }
}
