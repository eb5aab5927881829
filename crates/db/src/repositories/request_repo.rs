//! Repository for the `sample_requests` table.
//!
//! Status writes go through [`RequestRepo::update_status`], a
//! compare-and-set keyed on the previously-read status: a concurrent
//! transition makes the UPDATE match zero rows instead of silently
//! clobbering it. Stage timestamps are stamped `COALESCE(col, NOW())`
//! so re-entering a status never overwrites the first entry time.

use atelier_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::request::{
    CreateSampleRequest, RequestQuery, SampleRequest, UpdateSampleRequest,
};

/// Column list for sample_requests queries.
const COLUMNS: &str = "\
    id, sample_item_id, team_id, quantity, status, shipping_method, \
    shipping_address, notes, requested_at, approved_at, shipped_at, \
    handed_off_at, returned_at, closed_at, created_at, updated_at";

/// Provides CRUD, transition, and statistics operations for requests.
pub struct RequestRepo;

impl RequestRepo {
    /// Create a new request in REQUESTED, returning the created row.
    ///
    /// `requested_at` defaults to NOW() in the schema. A missing sample
    /// item or team surfaces as a foreign-key violation.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSampleRequest,
    ) -> Result<SampleRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO sample_requests
                (sample_item_id, team_id, quantity, shipping_method, shipping_address, notes)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SampleRequest>(&query)
            .bind(input.sample_item_id)
            .bind(input.team_id)
            .bind(input.quantity)
            .bind(&input.shipping_method)
            .bind(&input.shipping_address)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a request by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SampleRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sample_requests WHERE id = $1");
        sqlx::query_as::<_, SampleRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List requests with optional team/sample-item/status filters,
    /// newest first.
    pub async fn list(
        pool: &PgPool,
        params: &RequestQuery,
    ) -> Result<Vec<SampleRequest>, sqlx::Error> {
        let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
        let offset = clamp_offset(params.offset);

        let (where_clause, bind_values, bind_idx) = build_request_filter(params);

        let query = format!(
            "SELECT {COLUMNS} FROM sample_requests {where_clause}
             ORDER BY requested_at DESC, id DESC
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1
        );

        let mut q = sqlx::query_as::<_, SampleRequest>(&query);
        for val in &bind_values {
            match val {
                BindValue::BigInt(v) => q = q.bind(*v),
                BindValue::Text(v) => q = q.bind(v.as_str()),
            }
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Apply a validated status transition as a compare-and-set.
    ///
    /// Returns `None` when no row matched `(id, expected_status)` --
    /// either the request does not exist or another writer moved it
    /// first. `stamp_column`, when present, is the lifecycle timestamp
    /// to stamp on first entry (from
    /// `RequestStatus::stamp_column`, never caller input).
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        expected_status: &str,
        next_status: &str,
        stamp_column: Option<&'static str>,
    ) -> Result<Option<SampleRequest>, sqlx::Error> {
        let query = match stamp_column {
            Some(col) => format!(
                "UPDATE sample_requests SET
                    status = $3,
                    {col} = COALESCE({col}, NOW()),
                    updated_at = NOW()
                 WHERE id = $1 AND status = $2
                 RETURNING {COLUMNS}"
            ),
            None => format!(
                "UPDATE sample_requests SET
                    status = $3,
                    updated_at = NOW()
                 WHERE id = $1 AND status = $2
                 RETURNING {COLUMNS}"
            ),
        };
        sqlx::query_as::<_, SampleRequest>(&query)
            .bind(id)
            .bind(expected_status)
            .bind(next_status)
            .fetch_optional(pool)
            .await
    }

    /// Patch the non-lifecycle fields of a request, returning the
    /// updated row. Never touches status or stage timestamps.
    pub async fn update_fields(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSampleRequest,
    ) -> Result<Option<SampleRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE sample_requests SET
                quantity = COALESCE($2, quantity),
                shipping_method = COALESCE($3, shipping_method),
                shipping_address = COALESCE($4, shipping_address),
                notes = COALESCE($5, notes),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SampleRequest>(&query)
            .bind(id)
            .bind(input.quantity)
            .bind(&input.shipping_method)
            .bind(&input.shipping_address)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Request count per status (only statuses with rows appear).
    pub async fn count_by_status(pool: &PgPool) -> Result<Vec<(String, i64)>, sqlx::Error> {
        sqlx::query_as::<_, (String, i64)>(
            "SELECT status, COUNT(*)::BIGINT FROM sample_requests GROUP BY status",
        )
        .fetch_all(pool)
        .await
    }

    /// Delete a request.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sample_requests WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// Internal helpers for dynamic query building
// ---------------------------------------------------------------------------

/// Typed bind value for dynamically-built request queries.
enum BindValue {
    BigInt(i64),
    Text(String),
}

/// Build a WHERE clause and bind values from `RequestQuery` filters.
///
/// Returns `(where_clause, bind_values, next_bind_index)`. The clause is
/// empty when no filters are active, or starts with `WHERE `.
fn build_request_filter(params: &RequestQuery) -> (String, Vec<BindValue>, u32) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    if let Some(team_id) = params.team_id {
        conditions.push(format!("team_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(team_id));
    }

    if let Some(sample_item_id) = params.sample_item_id {
        conditions.push(format!("sample_item_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(sample_item_id));
    }

    if let Some(ref status) = params.status {
        conditions.push(format!("status = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(status.clone()));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values, bind_idx)
}
