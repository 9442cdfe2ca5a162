//! Server entity model, DTOs and the member-expanded aggregate.

use concord_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::member::MemberWithProfile;

/// A server row from the `servers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    pub id: DbId,
    pub name: String,
    pub image_url: String,
    pub invite_code: String,
    /// The owning profile.
    pub profile_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new server. The owner joins it as `ADMIN`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateServer {
    pub name: String,
    pub image_url: Option<String>,
    pub profile_id: DbId,
}

/// A server with its member list expanded to include each member's profile.
///
/// Serialized flat: the server's own fields plus a `member` array, ordered
/// ascending by role.
#[derive(Debug, Clone, Serialize)]
pub struct ServerWithMembers {
    #[serde(flatten)]
    pub server: Server,
    pub member: Vec<MemberWithProfile>,
}
