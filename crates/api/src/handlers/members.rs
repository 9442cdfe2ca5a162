//! Handlers for the `/members` resource.
//!
//! Both writes are scoped by `?serverId=` and guarded by the ownership
//! predicate inside the store. A write that matches nothing is explained by
//! [`classify_rejection`] rather than surfaced as a server fault.

use axum::extract::State;
use axum::Json;
use concord_core::policy::classify_rejection;
use concord_core::roles::MemberRole;
use concord_core::types::DbId;
use concord_db::models::member::GuardedWrite;
use concord_db::models::server::ServerWithMembers;
use concord_db::repositories::MemberRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentProfile;
use crate::middleware::scope::{MemberPath, ServerScope};
use crate::state::AppState;

/// Request body for a role change.
#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: MemberRole,
}

/// PATCH /api/members/{member_id}?serverId={server_id}
pub async fn update_role(
    State(state): State<AppState>,
    actor: CurrentProfile,
    ServerScope(server_id): ServerScope,
    MemberPath(member_id): MemberPath,
    Json(input): Json<UpdateRoleRequest>,
) -> AppResult<Json<ServerWithMembers>> {
    let outcome =
        MemberRepo::update_role(&state.pool, actor.id, server_id, member_id, input.role).await?;
    let server = applied(actor.id, outcome)?;

    tracing::info!(
        actor = actor.id,
        server_id,
        member_id,
        role = %input.role,
        "Member role updated"
    );
    Ok(Json(server))
}

/// DELETE /api/members/{member_id}?serverId={server_id}
pub async fn kick(
    State(state): State<AppState>,
    actor: CurrentProfile,
    ServerScope(server_id): ServerScope,
    MemberPath(member_id): MemberPath,
) -> AppResult<Json<ServerWithMembers>> {
    let outcome = MemberRepo::remove(&state.pool, actor.id, server_id, member_id).await?;
    let server = applied(actor.id, outcome)?;

    tracing::info!(actor = actor.id, server_id, member_id, "Member kicked");
    Ok(Json(server))
}

/// PATCH|DELETE /api/members?serverId={server_id}
///
/// A member route without the member segment.
pub async fn missing_member_id(
    _actor: CurrentProfile,
    _scope: ServerScope,
) -> AppResult<Json<ServerWithMembers>> {
    Err(AppError::BadRequest("Member ID missing".into()))
}

fn applied(actor: DbId, outcome: GuardedWrite) -> AppResult<ServerWithMembers> {
    match outcome {
        GuardedWrite::Applied(server) => Ok(server),
        GuardedWrite::Rejected(rejected) => Err(classify_rejection(actor, rejected).into()),
    }
}
