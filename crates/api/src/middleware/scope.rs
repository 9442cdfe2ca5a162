//! Request scope of member routes: the `serverId` query parameter and the
//! member id path segment.

use axum::extract::{FromRequestParts, Path, Query};
use axum::http::request::Parts;
use concord_core::types::DbId;
use serde::Deserialize;

use crate::error::AppError;

#[derive(Debug, Deserialize)]
struct ScopeParams {
    #[serde(rename = "serverId")]
    server_id: Option<String>,
}

/// The server a member request is scoped to.
///
/// Runs before any body extractor, so a missing `serverId` is reported the
/// same way whatever the body contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerScope(pub DbId);

impl<S: Send + Sync> FromRequestParts<S> for ServerScope {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = Query::<ScopeParams>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(params)| params.server_id)
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| AppError::BadRequest("Server ID missing".into()))?;

        raw.trim()
            .parse::<DbId>()
            .map(ServerScope)
            .map_err(|_| AppError::BadRequest("Invalid server ID".into()))
    }
}

/// The member id from the `{id}` path segment.
///
/// Replaces `Path<DbId>` so a malformed id gets the JSON error body instead
/// of axum's plain-text rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberPath(pub DbId);

impl<S: Send + Sync> FromRequestParts<S> for MemberPath {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::BadRequest("Member ID missing".into()))?;

        raw.trim()
            .parse::<DbId>()
            .map(MemberPath)
            .map_err(|_| AppError::BadRequest("Invalid member ID".into()))
    }
}
