//! Repository for the `profiles` table.

use concord_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::profile::{CreateProfile, Profile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, email, image_url, created_at, updated_at";

/// Lookups against identity records.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Insert a new profile, returning the created row.
    pub async fn create(pool: &SqlitePool, input: &CreateProfile) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (user_id, name, email, image_url)
             VALUES ($1, $2, $3, COALESCE($4, ''))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(&input.user_id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    /// Find a profile by its internal ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
