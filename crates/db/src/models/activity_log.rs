//! Activity log models.
//!
//! An append-only trail of catalog events (consumption, restock, cellar
//! edits, digests). Old rows are purged by the retention job.

use cellar_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Well-known `action` values.
pub mod actions {
    pub const BOTTLE_CONSUMED: &str = "bottle_consumed";
    pub const BOTTLE_RESTOCKED: &str = "bottle_restocked";
    pub const CELLAR_UPDATED: &str = "cellar_updated";
    pub const URGENCY_DIGEST: &str = "urgency_digest";
}

/// A row from the `activity_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivityLog {
    pub id: DbId,
    pub action: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<DbId>,
    pub details: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording an activity.
#[derive(Debug, Clone)]
pub struct CreateActivityLog {
    pub action: &'static str,
    pub entity_type: Option<&'static str>,
    pub entity_id: Option<DbId>,
    pub details: Option<serde_json::Value>,
}
