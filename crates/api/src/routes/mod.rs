pub mod health;
pub mod members;
pub mod servers;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /members, /members/           PATCH, DELETE -> 400 "Member ID missing"
/// /members/{id}?serverId=       PATCH role, DELETE kick (owner only)
///
/// /servers/{id}                 GET server with members (members only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(members::router())
        .nest("/servers", servers::router())
}
