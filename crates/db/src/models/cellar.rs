//! Cellar and floor models and DTOs.

use cellar_core::bottle::CellarSnapshot;
use cellar_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `cellars` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Cellar {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `cellar_floors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CellarFloor {
    pub id: DbId,
    pub cellar_id: DbId,
    /// 1-based.
    pub level: i32,
    /// `None` or `0` means unbounded.
    pub capacity: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A cellar together with its floors, ordered by level.
#[derive(Debug, Clone, Serialize)]
pub struct CellarWithFloors {
    #[serde(flatten)]
    pub cellar: Cellar,
    pub floors: Vec<CellarFloor>,
}

impl CellarWithFloors {
    /// Plain-value view for the occupancy engine.
    pub fn snapshot(&self) -> CellarSnapshot {
        CellarSnapshot {
            id: self.cellar.id,
            name: self.cellar.name.clone(),
            floor_capacities: self
                .floors
                .iter()
                .map(|f| f.capacity.and_then(|c| u32::try_from(c).ok()))
                .collect(),
        }
    }
}

/// DTO for creating a cellar. Floor `n` is `floor_capacities[n - 1]`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCellar {
    pub name: String,
    #[serde(default)]
    pub floor_capacities: Vec<Option<i32>>,
}

/// DTO for editing a cellar. A present `floor_capacities` replaces every floor.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCellar {
    pub name: Option<String>,
    pub floor_capacities: Option<Vec<Option<i32>>>,
}
