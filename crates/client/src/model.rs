//! Wire shapes of the server aggregate as the client sees it.

use concord_core::roles::MemberRole;
use concord_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub id: DbId,
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberView {
    pub id: DbId,
    pub role: MemberRole,
    pub profile_id: DbId,
    pub server_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub profile: ProfileView,
}

/// A server with its members, ordered by role as the API returns them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerView {
    pub id: DbId,
    pub name: String,
    pub image_url: String,
    pub invite_code: String,
    /// The owning profile.
    pub profile_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub member: Vec<MemberView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_server_aggregate() {
        let json = serde_json::json!({
            "id": 1,
            "name": "S1",
            "imageUrl": "",
            "inviteCode": "abc",
            "profileId": 10,
            "createdAt": "2026-03-01T12:00:00.000Z",
            "updatedAt": "2026-03-01T12:00:00.000Z",
            "member": [{
                "id": 5,
                "role": "MODERATOR",
                "profileId": 11,
                "serverId": 1,
                "createdAt": "2026-03-01T12:00:00.000Z",
                "updatedAt": "2026-03-01T12:00:00.000Z",
                "profile": {
                    "id": 11,
                    "userId": "u-11",
                    "name": "Ferris",
                    "email": "ferris@example.com",
                    "imageUrl": "",
                    "createdAt": "2026-03-01T12:00:00.000Z",
                    "updatedAt": "2026-03-01T12:00:00.000Z"
                }
            }]
        });

        let server: ServerView = serde_json::from_value(json).unwrap();
        assert_eq!(server.profile_id, 10);
        assert_eq!(server.member[0].role, MemberRole::Moderator);
        assert_eq!(server.member[0].profile.name, "Ferris");
    }
}
