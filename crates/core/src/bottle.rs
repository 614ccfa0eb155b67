//! Read-only bottle and cellar snapshots handed to the engine.
//!
//! The data-access layer builds these from rows; the engine only ever
//! borrows them.

use serde::Serialize;

use crate::types::{DbId, Year};

/// Separator placed between insight texts when they are joined.
pub const COMMENTARY_SEPARATOR: &str = "\n";

/// One physical bottle as seen by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BottleSnapshot {
    pub id: DbId,
    pub vintage: Option<Year>,
    /// Insight texts in creation order.
    pub commentary: Vec<String>,
    pub cellar_id: Option<DbId>,
    /// 1-based floor level inside the cellar.
    pub floor_level: Option<u32>,
    pub consumed: bool,
}

impl BottleSnapshot {
    /// A fresh, unconsumed, unplaced bottle with no commentary.
    pub fn new(id: DbId, vintage: Option<Year>) -> Self {
        Self {
            id,
            vintage,
            commentary: Vec::new(),
            cellar_id: None,
            floor_level: None,
            consumed: false,
        }
    }

    /// All non-empty commentary joined with [`COMMENTARY_SEPARATOR`].
    pub fn commentary_text(&self) -> String {
        join_commentary(&self.commentary)
    }
}

/// A storage location and its declared floor capacities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellarSnapshot {
    pub id: DbId,
    pub name: String,
    /// Capacity per floor, index 0 being level 1. `None` or `Some(0)` means
    /// the floor has no declared limit.
    pub floor_capacities: Vec<Option<u32>>,
}

/// Join insight texts in the order given, skipping blank entries.
pub fn join_commentary<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(|p| p.as_ref().trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(COMMENTARY_SEPARATOR)
}
