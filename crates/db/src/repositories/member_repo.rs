//! Repository for the `members` table.
//!
//! Role changes and removals are guarded writes: the ownership predicate
//! ("the actor owns the server and the target is not the actor") is part of
//! the statement's `WHERE` clause, so the store checks it atomically with
//! the write. Nothing here reads first and then decides to write.

use concord_core::policy::RejectedWrite;
use concord_core::roles::MemberRole;
use concord_core::types::DbId;
use sqlx::{SqliteConnection, SqlitePool};

use crate::models::member::{CreateMember, GuardedWrite, Member};
use crate::repositories::ServerRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, role, profile_id, server_id, created_at, updated_at";

/// Provides membership writes and lookups.
pub struct MemberRepo;

impl MemberRepo {
    /// Add a profile to a server, returning the created row.
    ///
    /// If `role` is `None` in the input, defaults to `GUEST`.
    pub async fn create(pool: &SqlitePool, input: &CreateMember) -> Result<Member, sqlx::Error> {
        let query = format!(
            "INSERT INTO members (role, profile_id, server_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(input.role.unwrap_or_default().as_str())
            .bind(input.profile_id)
            .bind(input.server_id)
            .fetch_one(pool)
            .await
    }

    /// Find a member by its internal ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Member>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM members WHERE id = $1");
        sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Set the role of `member_id` in `server_id` on behalf of `actor`.
    ///
    /// Returns [`GuardedWrite::Applied`] with the re-fetched server when the
    /// predicate matched, or [`GuardedWrite::Rejected`] with the ownership
    /// facts observed in the same transaction when it did not.
    pub async fn update_role(
        pool: &SqlitePool,
        actor: DbId,
        server_id: DbId,
        member_id: DbId,
        role: MemberRole,
    ) -> Result<GuardedWrite, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query(
            "UPDATE members
             SET role = $1, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
             WHERE id = $2
               AND server_id = $3
               AND profile_id <> $4
               AND EXISTS (
                   SELECT 1 FROM servers s WHERE s.id = $3 AND s.profile_id = $4
               )",
        )
        .bind(role.as_str())
        .bind(member_id)
        .bind(server_id)
        .bind(actor)
        .execute(&mut *tx)
        .await?;

        let outcome = Self::finish_guarded(&mut *tx, result.rows_affected(), server_id, member_id)
            .await?;
        tx.commit().await?;
        Ok(outcome)
    }

    /// Remove `member_id` from `server_id` on behalf of `actor`.
    ///
    /// Same guard and outcome shape as [`MemberRepo::update_role`].
    pub async fn remove(
        pool: &SqlitePool,
        actor: DbId,
        server_id: DbId,
        member_id: DbId,
    ) -> Result<GuardedWrite, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query(
            "DELETE FROM members
             WHERE id = $1
               AND server_id = $2
               AND profile_id <> $3
               AND EXISTS (
                   SELECT 1 FROM servers s WHERE s.id = $2 AND s.profile_id = $3
               )",
        )
        .bind(member_id)
        .bind(server_id)
        .bind(actor)
        .execute(&mut *tx)
        .await?;

        let outcome = Self::finish_guarded(&mut *tx, result.rows_affected(), server_id, member_id)
            .await?;
        tx.commit().await?;
        Ok(outcome)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Build the outcome of a guarded write within its transaction.
    async fn finish_guarded(
        conn: &mut SqliteConnection,
        rows_affected: u64,
        server_id: DbId,
        member_id: DbId,
    ) -> Result<GuardedWrite, sqlx::Error> {
        if rows_affected == 0 {
            let rejected = Self::observe_rejection(conn, server_id, member_id).await?;
            tracing::debug!(?rejected, "Guarded member write matched no rows");
            return Ok(GuardedWrite::Rejected(rejected));
        }

        // The write matched, so the server row exists and is locked by this transaction.
        let server = ServerRepo::load_with_members(conn, server_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        Ok(GuardedWrite::Applied(server))
    }

    /// Read the ownership facts needed to explain a rejected write.
    async fn observe_rejection(
        conn: &mut SqliteConnection,
        server_id: DbId,
        member_id: DbId,
    ) -> Result<RejectedWrite, sqlx::Error> {
        let server_owner: Option<(DbId,)> =
            sqlx::query_as("SELECT profile_id FROM servers WHERE id = $1")
                .bind(server_id)
                .fetch_optional(&mut *conn)
                .await?;

        let target_profile: Option<(DbId,)> =
            sqlx::query_as("SELECT profile_id FROM members WHERE id = $1 AND server_id = $2")
                .bind(member_id)
                .bind(server_id)
                .fetch_optional(&mut *conn)
                .await?;

        Ok(RejectedWrite {
            server_id,
            member_id,
            server_owner: server_owner.map(|(id,)| id),
            target_profile: target_profile.map(|(id,)| id),
        })
    }
}
