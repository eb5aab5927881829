//! Repository for the `teams` table.

use atelier_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::team::{CreateTeam, Team, UpdateTeam};

/// Column list for teams queries.
const COLUMNS: &str = "\
    id, name, shipping_address, contact_email, contact_phone, is_internal, \
    created_at, updated_at";

/// Provides CRUD operations for teams.
pub struct TeamRepo;

impl TeamRepo {
    /// Create a new team, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTeam) -> Result<Team, sqlx::Error> {
        let is_internal = input.is_internal.unwrap_or(false);
        let query = format!(
            "INSERT INTO teams (name, shipping_address, contact_email, contact_phone, is_internal)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Team>(&query)
            .bind(&input.name)
            .bind(&input.shipping_address)
            .bind(&input.contact_email)
            .bind(&input.contact_phone)
            .bind(is_internal)
            .fetch_one(pool)
            .await
    }

    /// Find a team by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Team>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teams WHERE id = $1");
        sqlx::query_as::<_, Team>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List teams, alphabetically.
    pub async fn list(
        pool: &PgPool,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Team>, sqlx::Error> {
        let limit = clamp_limit(limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
        let offset = clamp_offset(offset);
        let query = format!(
            "SELECT {COLUMNS} FROM teams
             ORDER BY name, id
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Team>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a team by ID, returning the updated row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTeam,
    ) -> Result<Option<Team>, sqlx::Error> {
        let query = format!(
            "UPDATE teams SET
                name = COALESCE($2, name),
                shipping_address = COALESCE($3, shipping_address),
                contact_email = COALESCE($4, contact_email),
                contact_phone = COALESCE($5, contact_phone),
                is_internal = COALESCE($6, is_internal),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Team>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.shipping_address)
            .bind(&input.contact_email)
            .bind(&input.contact_phone)
            .bind(input.is_internal)
            .fetch_optional(pool)
            .await
    }

    /// Count the requests referencing a team.
    ///
    /// The service layer refuses to delete a team while this is non-zero.
    pub async fn count_requests(pool: &PgPool, team_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::BIGINT FROM sample_requests WHERE team_id = $1",
        )
        .bind(team_id)
        .fetch_one(pool)
        .await
    }

    /// Delete a team.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
