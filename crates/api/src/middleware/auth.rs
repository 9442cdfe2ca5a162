//! Session extractor resolving the acting profile for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use concord_core::error::CoreError;
use concord_db::models::profile::Profile;
use concord_db::repositories::ProfileRepo;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The profile acting on this request, resolved from a Bearer token in the
/// `Authorization` header.
///
/// Every failure (no header, bad token, profile gone) rejects with the same
/// 401 body; the reason is only logged.
///
/// ```ignore
/// async fn my_handler(actor: CurrentProfile) -> AppResult<Json<()>> {
///     tracing::info!(profile_id = actor.id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentProfile(pub Profile);

impl std::ops::Deref for CurrentProfile {
    type Target = Profile;

    fn deref(&self) -> &Profile {
        &self.0
    }
}

fn unauthorized() -> AppError {
    AppError::Core(CoreError::Unauthorized("Unauthorized".into()))
}

impl FromRequestParts<AppState> for CurrentProfile {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| {
                tracing::debug!("Missing or malformed Authorization header");
                unauthorized()
            })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|e| {
            tracing::debug!(error = %e, "Rejected session token");
            unauthorized()
        })?;

        let profile = ProfileRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .ok_or_else(|| {
                tracing::debug!(profile_id = claims.sub, "Session names an unknown profile");
                unauthorized()
            })?;

        Ok(CurrentProfile(profile))
    }
}
