//! Editor authentication. Tokens are minted by the identity provider and
//! verified here with the shared HS256 secret.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use visa_site_core::auth::EditorSession;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorClaims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub exp: i64,
}

/// Extractor for editor-only routes.
#[derive(Debug, Clone)]
pub struct Editor(pub EditorSession);

pub fn verify_token(token: &str, secret: &str) -> Result<EditorSession, ApiError> {
    let data = decode::<EditorClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|e| {
        tracing::debug!("rejected editor token: {e}");
        ApiError::Unauthorized
    })?;
    Ok(EditorSession {
        uid: data.claims.sub,
        email: data.claims.email,
    })
}

/// Mint a token; used by local tooling and tests.
pub fn issue_token(secret: &str, uid: &str, ttl: chrono::Duration) -> Result<String, ApiError> {
    let claims = EditorClaims {
        sub: uid.to_string(),
        email: None,
        exp: (Utc::now() + ttl).timestamp(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("token encoding failed: {e}")))
}

impl FromRequestParts<AppState> for Editor {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::Unauthorized)?;
        let session = verify_token(bearer.token(), &state.config().jwt_secret)?;
        tracing::debug!(uid = %session.uid, "editor authenticated");
        Ok(Editor(session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies() {
        let token = issue_token("secret", "editor-1", chrono::Duration::minutes(5)).unwrap();
        let session = verify_token(&token, "secret").unwrap();
        assert_eq!(session.uid, "editor-1");
    }

    #[test]
    fn wrong_secret_or_expired_token_is_rejected() {
        let token = issue_token("secret", "editor-1", chrono::Duration::minutes(5)).unwrap();
        assert!(matches!(verify_token(&token, "other"), Err(ApiError::Unauthorized)));

        let expired = issue_token("secret", "editor-1", chrono::Duration::hours(-2)).unwrap();
        assert!(matches!(verify_token(&expired, "secret"), Err(ApiError::Unauthorized)));
    }
}
