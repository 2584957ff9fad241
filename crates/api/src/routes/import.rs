use axum::{
    extract::{Path, Query, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use visa_site_core::import::{ImportMode, ImportReport};
use visa_site_core::ContentDomain;

use crate::auth::Editor;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/import", post(import_all))
        .route("/v1/import/{domain}", post(import_domain))
}

#[derive(Debug, Default, Deserialize)]
pub struct ModeQuery {
    pub mode: Option<String>,
}

impl ModeQuery {
    fn mode(&self) -> ApiResult<ImportMode> {
        match self.mode.as_deref() {
            None => Ok(ImportMode::default()),
            Some(raw) => raw.parse().map_err(ApiError::BadRequest),
        }
    }
}

/// Import every domain; failures are reported per domain.
async fn import_all(
    Editor(editor): Editor,
    State(state): State<AppState>,
    Query(query): Query<ModeQuery>,
) -> ApiResult<Json<Vec<ImportReport>>> {
    let mode = query.mode()?;
    let reports = state.importer().import_all(mode).await;
    let failed = reports.iter().filter(|r| !r.is_ok()).count();
    tracing::info!(uid = %editor.uid, ?mode, failed, "bulk import finished");
    Ok(Json(reports))
}

async fn import_domain(
    Editor(editor): Editor,
    State(state): State<AppState>,
    Path(domain): Path<String>,
    Query(query): Query<ModeQuery>,
) -> ApiResult<Json<Value>> {
    let domain: ContentDomain = domain.parse()?;
    let mode = query.mode()?;
    let written = state.importer().import_domain(domain, mode).await?;
    tracing::info!(uid = %editor.uid, %domain, written, "domain import finished");
    Ok(Json(json!({ "domain": domain, "written": written })))
}
