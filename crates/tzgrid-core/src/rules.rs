//! Scoring rule set.
//!
//! A [`ScoringRules`] value is an immutable input to a scoring run. Callers
//! either use [`ScoringRules::default`] or replace it wholesale (for example
//! from the `[rules]` table of the config file).

use serde::{Deserialize, Serialize};

use crate::range::MinuteRange;

/// A single band with its range and score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandRule {
    pub score: i32,
    pub range: MinuteRange,
}

/// The yellow band: two sub-ranges sharing one score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YellowRule {
    pub score: i32,
    pub ranges: [MinuteRange; 2],
}

/// A preference boost applied inside a local time range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoostRule {
    pub boost: i32,
    pub range: MinuteRange,
}

/// Complete rule set for one scoring run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRules {
    /// Score for local times outside green and yellow.
    pub red_score: i32,
    /// Penalty for a participant inside one of their blocked windows.
    pub blocked_score: i32,
    pub green: BandRule,
    pub yellow: YellowRule,
    pub early_bird: BoostRule,
    pub night_owl: BoostRule,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            red_score: 0,
            blocked_score: -100,
            green: BandRule {
                range: MinuteRange::new(9 * 60, 17 * 60),
                score: 3,
            },
            yellow: YellowRule {
                ranges: [
                    MinuteRange::new(6 * 60 + 30, 9 * 60),
                    MinuteRange::new(17 * 60, 20 * 60),
                ],
                score: 2,
            },
            early_bird: BoostRule {
                range: MinuteRange::new(7 * 60, 10 * 60),
                boost: 1,
            },
            night_owl: BoostRule {
                range: MinuteRange::new(19 * 60, 23 * 60),
                boost: 1,
            },
        }
    }
}
