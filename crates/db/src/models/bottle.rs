//! Bottle models and DTOs.

use cellar_core::bottle::BottleSnapshot;
use cellar_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::insight::Insight;

/// A row from the `bottles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Bottle {
    pub id: DbId,
    pub name: String,
    pub vintage: Option<i32>,
    pub cellar_id: Option<DbId>,
    pub floor_level: Option<i32>,
    /// Set once when the bottle is drunk; cleared by a restock.
    pub consumed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Bottle {
    pub fn is_consumed(&self) -> bool {
        self.consumed_at.is_some()
    }
}

/// A bottle with its insights in creation order.
#[derive(Debug, Clone, Serialize)]
pub struct BottleWithInsights {
    #[serde(flatten)]
    pub bottle: Bottle,
    pub insights: Vec<Insight>,
}

/// DTO for creating a bottle.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBottle {
    pub name: String,
    pub vintage: Option<i32>,
    pub cellar_id: Option<DbId>,
    pub floor_level: Option<i32>,
}

/// DTO for updating a bottle. Only present fields are applied.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBottle {
    pub name: Option<String>,
    pub vintage: Option<i32>,
    pub cellar_id: Option<DbId>,
    pub floor_level: Option<i32>,
}

/// Engine input row: a bottle plus its insight contents.
#[derive(Debug, Clone, FromRow)]
pub struct BottleSnapshotRow {
    pub id: DbId,
    pub vintage: Option<i32>,
    pub cellar_id: Option<DbId>,
    pub floor_level: Option<i32>,
    pub consumed: bool,
    pub commentary: Vec<String>,
}

impl From<BottleSnapshotRow> for BottleSnapshot {
    fn from(row: BottleSnapshotRow) -> Self {
        BottleSnapshot {
            id: row.id,
            vintage: row.vintage,
            commentary: row.commentary,
            cellar_id: row.cellar_id,
            floor_level: row.floor_level.and_then(|l| u32::try_from(l).ok()),
            consumed: row.consumed,
        }
    }
}

/// Bottles added and consumed since a cutoff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow, Serialize)]
pub struct BottleActivityCounts {
    pub entries: i64,
    pub consumptions: i64,
}

impl BottleActivityCounts {
    /// Entries minus consumptions.
    pub fn net_change(&self) -> i64 {
        self.entries - self.consumptions
    }
}
