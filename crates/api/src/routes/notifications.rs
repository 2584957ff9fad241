use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use visa_site_core::notification::{
    ImageType, NotificationDocument, NotificationDraft, NotificationText,
};
use visa_site_core::Language;

use super::LanguageQuery;
use crate::auth::Editor;
use crate::error::ApiResult;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/notifications/active", get(active))
        .route("/v1/notifications", get(list).post(create))
        .route("/v1/notifications/{id}", put(save).delete(remove))
        .route("/v1/notifications/{id}/active", post(set_active))
}

/// The banner as shown to visitors: one language only.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveNotificationView {
    pub id: String,
    pub image_type: ImageType,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub language: Language,
    pub text: NotificationText,
}

async fn active(
    State(state): State<AppState>,
    Query(query): Query<LanguageQuery>,
) -> ApiResult<Json<Option<ActiveNotificationView>>> {
    let language = query.language()?;
    let view = state.active_notification().map(|doc| ActiveNotificationView {
        text: doc.text(language).clone(),
        id: doc.id,
        image_type: doc.image_type,
        scheduled_date: doc.scheduled_date,
        language,
    });
    Ok(Json(view))
}

async fn list(
    _editor: Editor,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<NotificationDocument>>> {
    Ok(Json(state.notifications().list().await?))
}

async fn create(
    Editor(editor): Editor,
    State(state): State<AppState>,
    Json(draft): Json<NotificationDraft>,
) -> ApiResult<Json<NotificationDocument>> {
    let saved = state.notifications().save(None, &draft).await?;
    tracing::info!(uid = %editor.uid, id = %saved.id, "notification created");
    Ok(Json(saved))
}

async fn save(
    Editor(editor): Editor,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<NotificationDraft>,
) -> ApiResult<Json<NotificationDocument>> {
    let saved = state.notifications().save(Some(&id), &draft).await?;
    tracing::info!(uid = %editor.uid, %id, "notification saved");
    Ok(Json(saved))
}

#[derive(Debug, Deserialize)]
pub struct ActivationRequest {
    pub active: bool,
}

async fn set_active(
    Editor(editor): Editor,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ActivationRequest>,
) -> ApiResult<Json<NotificationDocument>> {
    let updated = state.notifications().set_active(&id, request.active).await?;
    tracing::info!(uid = %editor.uid, %id, active = request.active, "notification toggled");
    Ok(Json(updated))
}

async fn remove(
    Editor(editor): Editor,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<NotificationDocument>> {
    let deleted = state.notifications().delete(&id).await?;
    tracing::info!(uid = %editor.uid, %id, "notification deleted");
    Ok(Json(deleted))
}
