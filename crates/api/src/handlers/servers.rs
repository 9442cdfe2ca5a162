//! Handlers for the `/servers` resource.

use axum::extract::{Path, State};
use axum::Json;
use concord_core::error::CoreError;
use concord_core::types::DbId;
use concord_db::models::server::ServerWithMembers;
use concord_db::repositories::ServerRepo;

use crate::error::AppResult;
use crate::middleware::auth::CurrentProfile;
use crate::state::AppState;

/// GET /api/servers/{id}
///
/// Only members can see a server; everyone else gets the same 404 as for a
/// server that does not exist.
pub async fn get_with_members(
    State(state): State<AppState>,
    actor: CurrentProfile,
    Path(id): Path<DbId>,
) -> AppResult<Json<ServerWithMembers>> {
    if !ServerRepo::is_member(&state.pool, id, actor.id).await? {
        return Err(CoreError::server_not_found(id).into());
    }

    let server = ServerRepo::find_with_members(&state.pool, id)
        .await?
        .ok_or(CoreError::server_not_found(id))?;
    Ok(Json(server))
}
