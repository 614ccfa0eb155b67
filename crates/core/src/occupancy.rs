//! Cellar fill-level aggregation.
//!
//! Counts non-consumed bottles per cellar and floor and relates the counts
//! to declared capacities. Over-capacity is a legitimate state: the raw
//! `fill_ratio` is never capped, only `display_percent` is.

use std::collections::HashMap;

use serde::Serialize;

use crate::bottle::{BottleSnapshot, CellarSnapshot};
use crate::types::DbId;

/// Upper bound of the rendered fill percentage.
pub const MAX_DISPLAY_PERCENT: u8 = 100;

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloorOccupancy {
    /// 1-based floor level.
    pub level: u32,
    pub bottle_count: u32,
    /// Declared capacity; `None` when the floor is unbounded.
    pub capacity: Option<u32>,
    /// `bottle_count / capacity`, uncapped. `None` when unbounded.
    pub fill_ratio: Option<f64>,
    /// Fill percentage for progress bars, capped at 100.
    pub display_percent: Option<u8>,
    pub over_capacity: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellarOccupancy {
    pub cellar_id: DbId,
    pub name: String,
    pub bottle_count: u32,
    /// Sum of floor capacities when every floor declares one.
    pub total_capacity: Option<u64>,
    pub fill_ratio: Option<f64>,
    /// Bottles in this cellar whose floor level is missing or undeclared.
    pub unassigned_floor_count: u32,
    /// Empty for cellars without floors.
    pub floors: Vec<FloorOccupancy>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OccupancyReport {
    pub cellars: Vec<CellarOccupancy>,
    /// Active bottles not stored in any known cellar.
    pub unplaced_bottles: u32,
    pub total_bottles: u32,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A declared capacity that actually bounds the floor (0 means unbounded).
pub fn effective_capacity(capacity: Option<u32>) -> Option<u32> {
    capacity.filter(|c| *c > 0)
}

/// `count / capacity`, or `None` for unbounded floors.
pub fn fill_ratio(count: u32, capacity: Option<u32>) -> Option<f64> {
    effective_capacity(capacity).map(|c| f64::from(count) / f64::from(c))
}

/// Rounded percentage of a ratio, capped at [`MAX_DISPLAY_PERCENT`].
pub fn display_percent(ratio: f64) -> u8 {
    let pct = (ratio * 100.0).round();
    if pct >= f64::from(MAX_DISPLAY_PERCENT) {
        MAX_DISPLAY_PERCENT
    } else if pct <= 0.0 {
        0
    } else {
        pct as u8
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Compute per-cellar and per-floor occupancy.
///
/// Cellars are reported in the order given. Consumed bottles are ignored.
pub fn compute_occupancy(cellars: &[CellarSnapshot], bottles: &[BottleSnapshot]) -> OccupancyReport {
    let known: HashMap<DbId, &CellarSnapshot> = cellars.iter().map(|c| (c.id, c)).collect();

    let mut per_cellar: HashMap<DbId, u32> = HashMap::new();
    let mut per_floor: HashMap<(DbId, u32), u32> = HashMap::new();
    let mut unplaced = 0u32;
    let mut total = 0u32;

    for bottle in bottles.iter().filter(|b| !b.consumed) {
        total += 1;
        let Some(cellar_id) = bottle.cellar_id.filter(|id| known.contains_key(id)) else {
            unplaced += 1;
            continue;
        };
        *per_cellar.entry(cellar_id).or_default() += 1;
        if let Some(level) = bottle.floor_level {
            *per_floor.entry((cellar_id, level)).or_default() += 1;
        }
    }

    let cellars = cellars
        .iter()
        .map(|cellar| cellar_occupancy(cellar, &per_cellar, &per_floor))
        .collect();

    OccupancyReport {
        cellars,
        unplaced_bottles: unplaced,
        total_bottles: total,
    }
}

fn cellar_occupancy(
    cellar: &CellarSnapshot,
    per_cellar: &HashMap<DbId, u32>,
    per_floor: &HashMap<(DbId, u32), u32>,
) -> CellarOccupancy {
    let bottle_count = per_cellar.get(&cellar.id).copied().unwrap_or(0);

    let floors: Vec<FloorOccupancy> = cellar
        .floor_capacities
        .iter()
        .zip(1u32..)
        .map(|(capacity, level)| {
            let count = per_floor.get(&(cellar.id, level)).copied().unwrap_or(0);
            floor_occupancy(level, count, *capacity)
        })
        .collect();

    let placed_on_floors: u32 = floors.iter().map(|f| f.bottle_count).sum();
    let unassigned_floor_count = if floors.is_empty() {
        0
    } else {
        bottle_count - placed_on_floors
    };

    let total_capacity = if floors.is_empty() {
        None
    } else {
        // Summed in u64 so that large declared capacities cannot overflow.
        floors
            .iter()
            .map(|f| f.capacity.map(u64::from))
            .sum::<Option<u64>>()
    };

    CellarOccupancy {
        cellar_id: cellar.id,
        name: cellar.name.clone(),
        bottle_count,
        total_capacity,
        fill_ratio: total_capacity.map(|c| f64::from(bottle_count) / c as f64),
        unassigned_floor_count,
        floors,
    }
}

fn floor_occupancy(level: u32, bottle_count: u32, declared: Option<u32>) -> FloorOccupancy {
    let capacity = effective_capacity(declared);
    let ratio = fill_ratio(bottle_count, capacity);
    FloorOccupancy {
        level,
        bottle_count,
        capacity,
        fill_ratio: ratio,
        display_percent: ratio.map(display_percent),
        over_capacity: capacity.is_some_and(|c| bottle_count > c),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
