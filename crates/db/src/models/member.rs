//! Member entity model and DTOs.

use concord_core::policy::RejectedWrite;
use concord_core::roles::MemberRole;
use concord_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::profile::Profile;
use crate::models::server::ServerWithMembers;

/// A member row from the `members` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: DbId,
    #[sqlx(try_from = "String")]
    pub role: MemberRole,
    pub profile_id: DbId,
    pub server_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding a profile to a server.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMember {
    pub profile_id: DbId,
    pub server_id: DbId,
    /// Defaults to `GUEST` if omitted.
    pub role: Option<MemberRole>,
}

/// A member together with its profile, as listed in a server aggregate.
#[derive(Debug, Clone, Serialize)]
pub struct MemberWithProfile {
    #[serde(flatten)]
    pub member: Member,
    pub profile: Profile,
}

/// Flat row produced by joining `members` with `profiles`.
#[derive(Debug, FromRow)]
pub(crate) struct MemberProfileRow {
    pub id: DbId,
    #[sqlx(try_from = "String")]
    pub role: MemberRole,
    pub profile_id: DbId,
    pub server_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub profile_user_id: String,
    pub profile_name: String,
    pub profile_email: String,
    pub profile_image_url: String,
    pub profile_created_at: Timestamp,
    pub profile_updated_at: Timestamp,
}

impl From<MemberProfileRow> for MemberWithProfile {
    fn from(row: MemberProfileRow) -> Self {
        MemberWithProfile {
            member: Member {
                id: row.id,
                role: row.role,
                profile_id: row.profile_id,
                server_id: row.server_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            profile: Profile {
                id: row.profile_id,
                user_id: row.profile_user_id,
                name: row.profile_name,
                email: row.profile_email,
                image_url: row.profile_image_url,
                created_at: row.profile_created_at,
                updated_at: row.profile_updated_at,
            },
        }
    }
}

/// Outcome of a write guarded by the ownership predicate.
#[derive(Debug)]
pub enum GuardedWrite {
    /// The write matched a row; carries the re-fetched server aggregate.
    Applied(ServerWithMembers),
    /// The write matched nothing; carries what the store saw instead.
    Rejected(RejectedWrite),
}
