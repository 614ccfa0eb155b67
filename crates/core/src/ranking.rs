//! Drink-soon ranking of a bottle collection.
//!
//! [`rank_by_urgency`] returns an [`UrgencyRanking`] that borrows the input
//! snapshot and scores it only when iterated. Every iteration recomputes
//! from the same inputs, so the ranking can be walked any number of times
//! and always yields the same order.

use std::cmp::Ordering;

use serde::Serialize;

use crate::aging_window::AgingWindow;
use crate::bottle::BottleSnapshot;
use crate::types::{DbId, Year};
use crate::urgency::{assess_bottle, UrgencyTier};

/// One entry of the ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedBottle {
    pub bottle_id: DbId,
    pub score: u8,
    pub tier: UrgencyTier,
    pub vintage: Option<Year>,
    pub age: Option<u32>,
    pub aging_window: Option<AgingWindow>,
}

/// Number of ranked bottles per tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl TierCounts {
    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low
    }
}

/// A restartable, lazily computed urgency ordering over borrowed bottles.
#[derive(Debug, Clone, Copy)]
pub struct UrgencyRanking<'a> {
    bottles: &'a [BottleSnapshot],
    current_year: Year,
}

/// Rank bottles by urgency for `current_year`.
///
/// Consumed bottles are skipped. Order: score descending, then vintage
/// ascending (undated bottles last), then input order.
pub fn rank_by_urgency(bottles: &[BottleSnapshot], current_year: Year) -> UrgencyRanking<'_> {
    UrgencyRanking {
        bottles,
        current_year,
    }
}

impl<'a> UrgencyRanking<'a> {
    pub fn current_year(&self) -> Year {
        self.current_year
    }

    /// Score and order the bottles.
    pub fn iter(&self) -> std::vec::IntoIter<RankedBottle> {
        let mut ranked: Vec<RankedBottle> = self
            .bottles
            .iter()
            .filter(|b| !b.consumed)
            .map(|b| {
                let assessment = assess_bottle(b, self.current_year);
                RankedBottle {
                    bottle_id: b.id,
                    score: assessment.urgency.score,
                    tier: assessment.urgency.tier,
                    vintage: b.vintage,
                    age: assessment.age,
                    aging_window: assessment.aging_window,
                }
            })
            .collect();

        // `sort_by` is stable, which keeps input order as the last tie-break.
        ranked.sort_by(compare_ranked);
        ranked.into_iter()
    }

    /// The `n` most urgent bottles.
    pub fn top(&self, n: usize) -> Vec<RankedBottle> {
        self.iter().take(n).collect()
    }

    pub fn tier_counts(&self) -> TierCounts {
        let mut counts = TierCounts::default();
        for entry in self.iter() {
            match entry.tier {
                UrgencyTier::Critical => counts.critical += 1,
                UrgencyTier::High => counts.high += 1,
                UrgencyTier::Medium => counts.medium += 1,
                UrgencyTier::Low => counts.low += 1,
            }
        }
        counts
    }
}

impl<'a> IntoIterator for &UrgencyRanking<'a> {
    type Item = RankedBottle;
    type IntoIter = std::vec::IntoIter<RankedBottle>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn compare_ranked(a: &RankedBottle, b: &RankedBottle) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| compare_vintage(a.vintage, b.vintage))
}

/// Older first; undated after every dated bottle.
fn compare_vintage(a: Option<Year>, b: Option<Year>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
