//! Profile entity model and DTOs.

use concord_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A profile row from the `profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: DbId,
    /// Subject id issued by the identity provider.
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new profile.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProfile {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub image_url: Option<String>,
}
