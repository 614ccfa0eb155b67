//! Consumption-urgency scoring.
//!
//! A bottle's urgency is a 0–100 integer plus a qualitative tier. The score
//! comes from, in order of precedence:
//!
//! 1. an explicit "drink now" phrase in the commentary (always critical),
//! 2. the bottle's age measured against its extracted aging window,
//! 3. a coarse age-bucket fallback when no window is known.
//!
//! The current year is always a parameter; nothing here reads a clock.

use serde::{Deserialize, Serialize};

use crate::aging_window::{extract_aging_window, AgingWindow};
use crate::bottle::BottleSnapshot;
use crate::types::Year;

// ---------------------------------------------------------------------------
// Score constants
// ---------------------------------------------------------------------------

/// Score of a bottle that must be opened now.
pub const CRITICAL_SCORE: u8 = 100;
/// Lowest score in the high tier; also the score at the start of a window.
pub const HIGH_MIN_SCORE: u8 = 50;
/// Lowest score in the medium tier.
pub const MEDIUM_MIN_SCORE: u8 = 30;
/// Score of a bottle sitting on a zero-width window.
pub const ZERO_WIDTH_WINDOW_SCORE: u8 = 99;
/// Points spread across the inside of a window, on top of [`HIGH_MIN_SCORE`].
pub const IN_WINDOW_SPAN: f64 = 49.0;
/// Points spread across the approach to a window start.
pub const APPROACH_SPAN: f64 = 30.0;
/// Cap for bottles more than [`APPROACH_MARGIN_YEARS`] away from their window.
pub const FAR_FROM_WINDOW_CAP: u8 = 29;
/// Years before the window start within which the approach score is uncapped.
pub const APPROACH_MARGIN_YEARS: u32 = 1;

// ---------------------------------------------------------------------------
// Age-bucket fallback
// ---------------------------------------------------------------------------

/// Age at or above which an undocumented bottle is treated as old stock.
pub const OLD_STOCK_AGE: u32 = 15;
/// Age at or above which an undocumented bottle is mid-life.
pub const MID_LIFE_AGE: u32 = 8;
pub const OLD_STOCK_SCORE: u8 = 70;
pub const MID_LIFE_SCORE: u8 = 45;
pub const YOUNG_SCORE: u8 = 15;

// ---------------------------------------------------------------------------
// Keywords
// ---------------------------------------------------------------------------

/// Lowercase phrases that force a critical score when found in commentary.
pub const DRINK_NOW_KEYWORDS: &[&str] = &[
    "drink now",
    "drink it now",
    "ready to drink",
    "drink up",
    "at its peak",
    "at peak",
    "past its prime",
    "past its peak",
    "over the hill",
    "maintenant",
    "immédiatement",
    "immediatement",
    "à son apogée",
    "a son apogee",
    "en déclin",
    "sur le déclin",
];

// ---------------------------------------------------------------------------
// Tier
// ---------------------------------------------------------------------------

/// Qualitative urgency bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyTier {
    Critical,
    High,
    Medium,
    Low,
}

impl UrgencyTier {
    /// Bucket a score: 100 critical, 50–99 high, 30–49 medium, below low.
    pub fn from_score(score: u8) -> Self {
        if score >= CRITICAL_SCORE {
            Self::Critical
        } else if score >= HIGH_MIN_SCORE {
            Self::High
        } else if score >= MEDIUM_MIN_SCORE {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

// ---------------------------------------------------------------------------
// Score
// ---------------------------------------------------------------------------

/// A score in `[0, 100]` with its tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UrgencyScore {
    pub score: u8,
    pub tier: UrgencyTier,
}

impl UrgencyScore {
    /// Build a score, clamping to 100 and deriving the tier.
    pub fn new(score: u8) -> Self {
        let score = score.min(CRITICAL_SCORE);
        Self {
            score,
            tier: UrgencyTier::from_score(score),
        }
    }

    pub fn critical() -> Self {
        Self::new(CRITICAL_SCORE)
    }
}

/// Everything the scorer derived for one bottle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UrgencyAssessment {
    #[serde(flatten)]
    pub urgency: UrgencyScore,
    pub age: Option<u32>,
    pub aging_window: Option<AgingWindow>,
    pub drink_now_keyword: bool,
}

/// Whether the commentary contains any of [`DRINK_NOW_KEYWORDS`].
pub fn has_drink_now_keyword(commentary: &str) -> bool {
    let lowered = commentary.to_lowercase();
    DRINK_NOW_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}

/// Age of a vintage in `current_year`, clamped at zero for future vintages.
pub fn bottle_age(vintage: Year, current_year: Year) -> u32 {
    let age = (i64::from(current_year) - i64::from(vintage)).max(0);
    u32::try_from(age).unwrap_or(u32::MAX)
}

/// Score one bottle from its parts.
pub fn score_urgency(
    vintage: Option<Year>,
    window: Option<AgingWindow>,
    commentary: &str,
    current_year: Year,
) -> UrgencyScore {
    if has_drink_now_keyword(commentary) {
        return UrgencyScore::critical();
    }

    let Some(vintage) = vintage else {
        return UrgencyScore::new(0);
    };
    let age = bottle_age(vintage, current_year);

    match window {
        Some(window) => score_against_window(age, window),
        None => score_by_age_bucket(age),
    }
}

/// Extract the aging window from a bottle's commentary and score it.
pub fn assess_bottle(bottle: &BottleSnapshot, current_year: Year) -> UrgencyAssessment {
    let commentary = bottle.commentary_text();
    let aging_window = extract_aging_window(&commentary);
    let urgency = score_urgency(bottle.vintage, aging_window, &commentary, current_year);

    UrgencyAssessment {
        urgency,
        age: bottle.vintage.map(|v| bottle_age(v, current_year)),
        aging_window,
        drink_now_keyword: has_drink_now_keyword(&commentary),
    }
}

fn score_against_window(age: u32, window: AgingWindow) -> UrgencyScore {
    let AgingWindow { start, end } = window;

    // The last year of a real window already counts as past it.
    if age > end || (age == end && end > start) {
        return UrgencyScore::critical();
    }

    if age >= start {
        let width = window.width();
        if width == 0 {
            return UrgencyScore::new(ZERO_WIDTH_WINDOW_SCORE);
        }
        let progress = f64::from(age - start) / f64::from(width);
        let score = f64::from(HIGH_MIN_SCORE) + (IN_WINDOW_SPAN * progress).round();
        return UrgencyScore::new(score as u8);
    }

    let raw = (APPROACH_SPAN * f64::from(age) / f64::from(start.max(1))).round() as u8;
    let score = if start - age > APPROACH_MARGIN_YEARS {
        raw.min(FAR_FROM_WINDOW_CAP)
    } else {
        raw
    };
    UrgencyScore::new(score)
}

fn score_by_age_bucket(age: u32) -> UrgencyScore {
    if age >= OLD_STOCK_AGE {
        UrgencyScore::new(OLD_STOCK_SCORE)
    } else if age >= MID_LIFE_AGE {
        UrgencyScore::new(MID_LIFE_SCORE)
    } else {
        UrgencyScore::new(YOUNG_SCORE)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
