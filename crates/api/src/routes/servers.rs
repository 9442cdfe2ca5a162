//! Route definitions for the `/servers` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::servers;
use crate::state::AppState;

/// Routes mounted at `/servers`.
///
/// ```text
/// GET /{id}   -> get_with_members
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", get(servers::get_with_members))
}
