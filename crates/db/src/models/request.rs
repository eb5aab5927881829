//! Sample request models and DTOs.
//!
//! A request is created in REQUESTED with `requested_at` = now. Each later
//! lifecycle stage has a nullable timestamp that is stamped at most once,
//! the first time the request enters that status.

use std::collections::BTreeMap;

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `sample_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SampleRequest {
    pub id: DbId,
    pub sample_item_id: DbId,
    pub team_id: DbId,
    pub quantity: i32,
    pub status: String,
    pub shipping_method: Option<String>,
    pub shipping_address: Option<String>,
    pub notes: Option<String>,
    pub requested_at: Timestamp,
    pub approved_at: Option<Timestamp>,
    pub shipped_at: Option<Timestamp>,
    pub handed_off_at: Option<Timestamp>,
    pub returned_at: Option<Timestamp>,
    pub closed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a sample request.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSampleRequest {
    pub sample_item_id: DbId,
    pub team_id: DbId,
    pub quantity: i32,
    pub shipping_method: Option<String>,
    pub shipping_address: Option<String>,
    pub notes: Option<String>,
}

/// DTO for the general request patch. `status`, when present, goes
/// through transition validation; the other fields never touch the
/// lifecycle timestamps.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSampleRequest {
    pub status: Option<String>,
    pub quantity: Option<i32>,
    pub shipping_method: Option<String>,
    pub shipping_address: Option<String>,
    pub notes: Option<String>,
}

/// Request body for the pure status-transition endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRequestStatus {
    pub status: String,
}

/// Filter parameters for listing requests.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestQuery {
    pub team_id: Option<DbId>,
    pub sample_item_id: Option<DbId>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Aggregate request counts, complete over every status.
#[derive(Debug, Clone, Serialize)]
pub struct RequestStats {
    pub total: i64,
    pub by_status: BTreeMap<String, i64>,
}
