//! Route definitions for the `/members` resource.

use axum::routing::patch;
use axum::Router;

use crate::handlers::members;
use crate::state::AppState;

/// Member routes, merged flat into `/api`.
///
/// The bare collection path is registered with and without its trailing
/// slash, so an empty member segment is answered by `missing_member_id`
/// instead of falling through to a 404.
///
/// ```text
/// PATCH  /members?serverId=         -> missing_member_id
/// PATCH  /members/?serverId=        -> missing_member_id
/// PATCH  /members/{id}?serverId=    -> update_role
/// DELETE (same three paths)         -> missing_member_id, missing_member_id, kick
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/members",
            patch(members::missing_member_id).delete(members::missing_member_id),
        )
        .route(
            "/members/",
            patch(members::missing_member_id).delete(members::missing_member_id),
        )
        .route(
            "/members/{id}",
            patch(members::update_role).delete(members::kick),
        )
}
