//! Band classification of a local minute of day.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::rules::ScoringRules;

/// Meeting-suitability band of a local time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Green,
    Yellow,
    Red,
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Band::Green => write!(f, "green"),
            Band::Yellow => write!(f, "yellow"),
            Band::Red => write!(f, "red"),
        }
    }
}

/// Classify a local minute of day, returning `(base_score, band)`.
///
/// Green is tested first, then either yellow sub-range, and anything else
/// falls through to red.
pub fn classify(local_min: u32, rules: &ScoringRules) -> (i32, Band) {
    if rules.green.range.contains(local_min) {
        return (rules.green.score, Band::Green);
    }
    if rules.yellow.ranges.iter().any(|r| r.contains(local_min)) {
        return (rules.yellow.score, Band::Yellow);
    }
    (rules.red_score, Band::Red)
}
