//! Floor-capacity validation and edit warnings.
//!
//! Capacities are declared per floor when a cellar is created or edited.
//! Lowering a capacity below what a floor already holds is allowed; the
//! caller gets warnings to show alongside the saved cellar.

use serde::Serialize;

use crate::error::CoreError;
use crate::occupancy::CellarOccupancy;

/// Maximum number of floors a cellar may declare.
pub const MAX_FLOORS: usize = 50;
/// Maximum capacity of a single floor.
pub const MAX_FLOOR_CAPACITY: i32 = 10_000;

/// Validate raw floor capacities from a request.
///
/// `None` and `0` both mean "no declared limit" and are kept as given.
pub fn validate_floor_capacities(raw: &[Option<i32>]) -> Result<Vec<Option<u32>>, CoreError> {
    if raw.len() > MAX_FLOORS {
        return Err(CoreError::Validation(format!(
            "A cellar may declare at most {MAX_FLOORS} floors, got {}",
            raw.len()
        )));
    }

    raw.iter()
        .zip(1..)
        .map(|(capacity, level)| match capacity {
            None => Ok(None),
            Some(c) if (0..=MAX_FLOOR_CAPACITY).contains(c) => Ok(Some(*c as u32)),
            Some(c) => Err(CoreError::Validation(format!(
                "Floor {level} capacity must be between 0 and {MAX_FLOOR_CAPACITY}, got {c}"
            ))),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityWarningKind {
    /// The floor holds more bottles than its new capacity.
    OverCapacity,
    /// The floor was removed but still holds bottles.
    FloorRemoved,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapacityWarning {
    pub kind: CapacityWarningKind,
    pub level: u32,
    pub bottle_count: u32,
    pub capacity: Option<u32>,
    pub message: String,
}

/// Compare current floor counts with a proposed set of capacities.
pub fn capacity_edit_warnings(
    current: &CellarOccupancy,
    new_capacities: &[Option<u32>],
) -> Vec<CapacityWarning> {
    let mut warnings = Vec::new();

    for floor in current.floors.iter().filter(|f| f.bottle_count > 0) {
        let index = (floor.level - 1) as usize;
        match new_capacities.get(index) {
            None => warnings.push(CapacityWarning {
                kind: CapacityWarningKind::FloorRemoved,
                level: floor.level,
                bottle_count: floor.bottle_count,
                capacity: None,
                message: format!(
                    "Floor {} is removed but still holds {} bottle(s)",
                    floor.level, floor.bottle_count
                ),
            }),
            Some(Some(capacity)) if *capacity > 0 && floor.bottle_count > *capacity => {
                warnings.push(CapacityWarning {
                    kind: CapacityWarningKind::OverCapacity,
                    level: floor.level,
                    bottle_count: floor.bottle_count,
                    capacity: Some(*capacity),
                    message: format!(
                        "Floor {} holds {} bottle(s), above its new capacity of {}",
                        floor.level, floor.bottle_count, capacity
                    ),
                })
            }
            Some(_) => {}
        }
    }

    warnings
}
