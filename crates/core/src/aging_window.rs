//! Aging-window extraction from free-text bottle commentary.
//!
//! Producer notes and AI-generated insights often carry a drinking window
//! such as "à boire dans les 5 à 10 ans" or "keep 3-8 years". This module
//! pulls the first such range out of the joined commentary of a bottle.
//! The result is derived on demand and never stored, so edits to the text
//! are always reflected.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Words that mark a numeric range as an aging recommendation.
pub const AGING_TRIGGER_WORDS: &[&str] = &[
    "garde",
    "garder",
    "conserver",
    "vieillissement",
    "apogée",
    "apogee",
    "consommer",
    "boire",
    "aging",
    "ageing",
    "cellar",
    "drink",
    "drinking",
    "cellaring",
    "keep",
    "peak",
    "maturity",
];

/// How far (in bytes of lowercased text) a trigger word may sit from a
/// range and still qualify it.
pub const TRIGGER_PROXIMITY: usize = 60;

/// Any of [`AGING_TRIGGER_WORDS`] as a whole word.
static TRIGGER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b(?:{})\b", AGING_TRIGGER_WORDS.join("|")))
        .expect("trigger pattern is valid")
});

/// "N-M years", "N to M years", "N à M ans" and close variants.
static YEAR_RANGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\s*(?:-|–|—|to|and|à|a|et)\s*(\d+)\s*(?:years?|yrs?|ans?)\b")
        .expect("year range pattern is valid")
});

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Recommended drinking range, in years after the vintage.
///
/// Always normalized so that `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingWindow {
    pub start: u32,
    pub end: u32,
}

impl AgingWindow {
    /// Build a window from two bounds given in either order.
    pub fn new(a: u32, b: u32) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// Width of the window in years.
    pub fn width(&self) -> u32 {
        self.end - self.start
    }
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Extract the first aging window mentioned near a trigger word.
///
/// Returns `None` when no range qualifies. Ranges whose numbers cannot be
/// read as integers (non-ASCII digits, overflow) are skipped.
pub fn extract_aging_window(text: &str) -> Option<AgingWindow> {
    if text.trim().is_empty() {
        return None;
    }

    let lowered = text.to_lowercase();

    YEAR_RANGE_PATTERN.captures_iter(&lowered).find_map(|caps| {
        let whole = caps.get(0)?;
        if !has_trigger_near(&lowered, whole.start(), whole.end()) {
            return None;
        }
        let a: u32 = caps.get(1)?.as_str().parse().ok()?;
        let b: u32 = caps.get(2)?.as_str().parse().ok()?;
        Some(AgingWindow::new(a, b))
    })
}

/// Whether a whole trigger word lies within [`TRIGGER_PROXIMITY`] bytes of
/// the range `start..end`.
fn has_trigger_near(lowered: &str, start: usize, end: usize) -> bool {
    let from = start.saturating_sub(TRIGGER_PROXIMITY);
    let to = end.saturating_add(TRIGGER_PROXIMITY);
    TRIGGER_PATTERN
        .find_iter(lowered)
        .take_while(|m| m.start() < to)
        .any(|m| m.start() >= from && m.end() <= to)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn french_range_with_a_grave() {
        assert_eq!(
            extract_aging_window("boire dans les 5 à 10 ans"),
            Some(AgingWindow { start: 5, end: 10 })
        );
    }

    #[test]
    fn english_hyphen_range() {
        assert_eq!(
            extract_aging_window("Drink over the next 3-8 years."),
            Some(AgingWindow { start: 3, end: 8 })
        );
    }

    #[test]
    fn english_to_range() {
        assert_eq!(
            extract_aging_window("Keep 4 to 12 years in a cool place"),
            Some(AgingWindow { start: 4, end: 12 })
        );
    }

    #[test]
    fn uppercase_text_is_recognized() {
        assert_eq!(
            extract_aging_window("POTENTIEL DE GARDE : 8 À 15 ANS"),
            Some(AgingWindow { start: 8, end: 15 })
        );
    }

    #[test]
    fn inverted_range_is_swapped() {
        assert_eq!(
            extract_aging_window("Garde de 10 à 6 ans"),
            Some(AgingWindow { start: 6, end: 10 })
        );
    }

    #[test]
    fn range_without_trigger_is_ignored() {
        assert_eq!(extract_aging_window("Matured 5-10 years in oak barrels"), None);
    }

    #[test]
    fn trigger_inside_a_longer_word_is_ignored() {
        assert_eq!(extract_aging_window("On peut regarder 5-10 years of records"), None);
        assert_eq!(extract_aging_window("Shopkeepers stocked 3-6 years of it"), None);
        assert_eq!(
            extract_aging_window("Regarder la garde: 5-10 years"),
            Some(AgingWindow { start: 5, end: 10 })
        );
    }

    #[test]
    fn trigger_too_far_away_is_ignored() {
        let filler = "x".repeat(TRIGGER_PROXIMITY + 20);
        let text = format!("boire {filler} 5-10 years");
        assert_eq!(extract_aging_window(&text), None);
    }

    #[test]
    fn trigger_after_range_counts() {
        assert_eq!(
            extract_aging_window("5 to 7 years of cellar potential"),
            Some(AgingWindow { start: 5, end: 7 })
        );
    }

    #[test]
    fn first_match_wins() {
        let text = "Garde 3 à 5 ans.\nAnother note: keep 10-20 years.";
        assert_eq!(
            extract_aging_window(text),
            Some(AgingWindow { start: 3, end: 5 })
        );
    }

    #[test]
    fn empty_text_is_absent_not_zero() {
        assert_eq!(extract_aging_window(""), None);
        assert_eq!(extract_aging_window("   \n "), None);
    }

    #[test]
    fn overflowing_number_is_skipped() {
        let text = "keep 99999999999 to 5 years, or drink 2-4 years";
        assert_eq!(
            extract_aging_window(text),
            Some(AgingWindow { start: 2, end: 4 })
        );
    }

    #[test]
    fn non_ascii_digits_are_no_match() {
        assert_eq!(extract_aging_window("boire dans ٥ à ١٠ ans"), None);
    }

    #[test]
    fn multibyte_neighbourhood_does_not_panic() {
        let text = format!("{} apogée 2-3 ans {}", "é".repeat(50), "ü".repeat(50));
        assert_eq!(
            extract_aging_window(&text),
            Some(AgingWindow { start: 2, end: 3 })
        );
    }

    #[test]
    fn extraction_is_idempotent() {
        let text = "Vieillissement possible 6 à 9 ans";
        assert_eq!(extract_aging_window(text), extract_aging_window(text));
    }

    #[test]
    fn window_new_orders_bounds() {
        assert_eq!(AgingWindow::new(9, 4), AgingWindow { start: 4, end: 9 });
        assert_eq!(AgingWindow::new(4, 9).width(), 5);
    }
}
