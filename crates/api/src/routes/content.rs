use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use visa_site_core::catalog;
use visa_site_core::content::{ListSource, ResolvedContent};
use visa_site_core::document::Fields;
use visa_site_core::{ContentDomain, ContentError, FallbackResolver};

use super::LanguageQuery;
use crate::auth::Editor;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/content", get(get_all_content))
        .route("/v1/content/{domain}", get(get_content).put(put_content))
}

/// Resolved, single-language view of one domain.
async fn get_content(
    State(state): State<AppState>,
    Path(domain): Path<String>,
    Query(query): Query<LanguageQuery>,
) -> ApiResult<Json<ResolvedContent>> {
    let domain: ContentDomain = domain.parse()?;
    let language = query.language()?;
    let snapshot = state.gateway().snapshot_or_last_good(domain).await;
    let resolver = FallbackResolver::new(catalog::site());
    Ok(Json(resolver.resolve_domain(domain, language, Some(snapshot.as_ref()))))
}

/// Every domain at once, for the initial page render.
async fn get_all_content(
    State(state): State<AppState>,
    Query(query): Query<LanguageQuery>,
) -> ApiResult<Json<BTreeMap<ContentDomain, ResolvedContent>>> {
    let language = query.language()?;
    let resolver = FallbackResolver::new(catalog::site());
    let mut all = BTreeMap::new();
    for domain in ContentDomain::ALL {
        let snapshot = state.gateway().snapshot_or_last_good(domain).await;
        all.insert(domain, resolver.resolve_domain(domain, language, Some(snapshot.as_ref())));
    }
    Ok(Json(all))
}

/// Merge editor changes into a domain document. Only schema keys and the
/// domain's embedded list are accepted; collection-backed lists are edited
/// per document.
async fn put_content(
    Editor(editor): Editor,
    State(state): State<AppState>,
    Path(domain): Path<String>,
    Json(fields): Json<Fields>,
) -> ApiResult<Json<Value>> {
    let domain: ContentDomain = domain.parse()?;
    let list_key = domain
        .list()
        .filter(|list| list.source == ListSource::Embedded)
        .map(|list| list.key);
    let unknown: Vec<&str> = fields
        .keys()
        .map(String::as_str)
        .filter(|key| !domain.has_field(key) && Some(*key) != list_key)
        .collect();
    if !unknown.is_empty() {
        return Err(ApiError::BadRequest(format!(
            "fields not editable in {domain}: {}",
            unknown.join(", ")
        )));
    }

    let stored = state
        .store()
        .set_merge(&domain.text_path(), fields)
        .await
        .map_err(ContentError::from)?;
    tracing::info!(uid = %editor.uid, %domain, revision = %stored.revision, "content saved");

    Ok(Json(json!({
        "path": stored.path.to_string(),
        "revision": stored.revision,
    })))
}
