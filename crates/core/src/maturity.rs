//! Maturity classification for the statistics view.
//!
//! Buckets each bottle into one of four states from its age and, when the
//! commentary provides one, its aging window.

use serde::{Deserialize, Serialize};

use crate::aging_window::{extract_aging_window, AgingWindow};
use crate::bottle::BottleSnapshot;
use crate::types::Year;
use crate::urgency::bottle_age;

/// Below this age an undocumented bottle is too young.
pub const YOUNG_AGE_LIMIT: u32 = 3;
/// Below this age an undocumented bottle is ready.
pub const READY_AGE_LIMIT: u32 = 6;
/// Below this age an undocumented bottle is at its peak.
pub const PEAK_AGE_LIMIT: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaturityState {
    TooYoung,
    Ready,
    AtPeak,
    Declining,
}

impl MaturityState {
    /// Display order, youngest first.
    pub const ALL: [MaturityState; 4] =
        [Self::TooYoung, Self::Ready, Self::AtPeak, Self::Declining];
}

/// Classify one bottle.
pub fn classify_maturity(
    vintage: Option<Year>,
    window: Option<AgingWindow>,
    current_year: Year,
) -> MaturityState {
    let Some(vintage) = vintage else {
        return MaturityState::Ready;
    };
    let age = bottle_age(vintage, current_year);

    if let Some(AgingWindow { start, end }) = window {
        if age < start {
            return MaturityState::TooYoung;
        }
        if age > end {
            return MaturityState::Declining;
        }
        if end == start {
            return MaturityState::AtPeak;
        }
        // First half of the window is "ready", second half "at peak".
        return if (age - start) * 2 < end - start {
            MaturityState::Ready
        } else {
            MaturityState::AtPeak
        };
    }

    if age < YOUNG_AGE_LIMIT {
        MaturityState::TooYoung
    } else if age < READY_AGE_LIMIT {
        MaturityState::Ready
    } else if age < PEAK_AGE_LIMIT {
        MaturityState::AtPeak
    } else {
        MaturityState::Declining
    }
}

/// Bottle count for one maturity state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MaturityCount {
    pub state: MaturityState,
    pub bottle_count: u32,
}

/// Count non-consumed bottles per state. All four states are always present,
/// in [`MaturityState::ALL`] order.
pub fn maturity_breakdown(bottles: &[BottleSnapshot], current_year: Year) -> Vec<MaturityCount> {
    let mut counts = [0u32; 4];
    for bottle in bottles.iter().filter(|b| !b.consumed) {
        let window = extract_aging_window(&bottle.commentary_text());
        let state = classify_maturity(bottle.vintage, window, current_year);
        let slot = MaturityState::ALL
            .iter()
            .position(|s| *s == state)
            .unwrap_or_default();
        counts[slot] += 1;
    }

    MaturityState::ALL
        .iter()
        .zip(counts)
        .map(|(state, bottle_count)| MaturityCount {
            state: *state,
            bottle_count,
        })
        .collect()
}
