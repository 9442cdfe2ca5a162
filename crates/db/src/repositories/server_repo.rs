//! Repository for the `servers` table and the member-expanded aggregate.

use concord_core::roles::MemberRole;
use concord_core::types::DbId;
use sqlx::{SqliteConnection, SqlitePool};

use crate::models::member::{MemberProfileRow, MemberWithProfile};
use crate::models::server::{CreateServer, Server, ServerWithMembers};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, image_url, invite_code, profile_id, created_at, updated_at";

/// Member columns joined with their profile, aliased for [`MemberProfileRow`].
const MEMBER_PROFILE_COLUMNS: &str = "m.id, m.role, m.profile_id, m.server_id, \
     m.created_at, m.updated_at, \
     p.user_id AS profile_user_id, p.name AS profile_name, p.email AS profile_email, \
     p.image_url AS profile_image_url, p.created_at AS profile_created_at, \
     p.updated_at AS profile_updated_at";

/// Provides server creation and aggregate reads.
pub struct ServerRepo;

impl ServerRepo {
    /// Insert a new server and enrol its owner as an `ADMIN` member.
    ///
    /// Both rows are written in one transaction. The invite code is a random
    /// UUID.
    pub async fn create(pool: &SqlitePool, input: &CreateServer) -> Result<Server, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO servers (name, image_url, invite_code, profile_id)
             VALUES ($1, COALESCE($2, ''), $3, $4)
             RETURNING {COLUMNS}"
        );
        let server = sqlx::query_as::<_, Server>(&insert_query)
            .bind(&input.name)
            .bind(&input.image_url)
            .bind(uuid::Uuid::new_v4().to_string())
            .bind(input.profile_id)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO members (role, profile_id, server_id) VALUES ($1, $2, $3)")
            .bind(MemberRole::Admin.as_str())
            .bind(input.profile_id)
            .bind(server.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(server)
    }

    /// Load a server with every member and their profile, ordered by role.
    pub async fn find_with_members(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<ServerWithMembers>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::load_with_members(&mut conn, id).await
    }

    /// Whether `profile_id` holds a membership in `server_id`.
    pub async fn is_member(
        pool: &SqlitePool,
        server_id: DbId,
        profile_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let row: Option<(i64,)> =
            sqlx::query_as("SELECT 1 FROM members WHERE server_id = $1 AND profile_id = $2")
                .bind(server_id)
                .bind(profile_id)
                .fetch_optional(pool)
                .await?;
        Ok(row.is_some())
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Aggregate read on an existing connection, so callers holding a
    /// transaction see their own writes.
    ///
    /// Members are sorted ascending by role (`GUEST` first), then by id.
    pub(crate) async fn load_with_members(
        conn: &mut SqliteConnection,
        id: DbId,
    ) -> Result<Option<ServerWithMembers>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM servers WHERE id = $1");
        let Some(server) = sqlx::query_as::<_, Server>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
        else {
            return Ok(None);
        };

        let query = format!(
            "SELECT {MEMBER_PROFILE_COLUMNS}
             FROM members m
             JOIN profiles p ON p.id = m.profile_id
             WHERE m.server_id = $1"
        );
        let rows = sqlx::query_as::<_, MemberProfileRow>(&query)
            .bind(id)
            .fetch_all(&mut *conn)
            .await?;

        let mut member: Vec<MemberWithProfile> = rows.into_iter().map(Into::into).collect();
        member.sort_by_key(|m| (m.member.role, m.member.id));

        Ok(Some(ServerWithMembers { server, member }))
    }
}
