//! Hard-block windows and preference boosts.
//!
//! Blocking short-circuits scoring: a participant inside a blocked window
//! contributes only the blocked penalty, never a band score or a boost.

use crate::error::Result;
use crate::participant::{BlockedWindow, Preference};
use crate::rules::ScoringRules;

/// Whether `local_min` on `local_date` falls in any of `windows`.
///
/// `local_date` is the `YYYY-MM-DD` local date; a date-scoped window only
/// matches when its date is exactly equal to it.
///
/// # Errors
/// Returns [`crate::CoreError::InvalidWindowFormat`] if a window that has to
/// be range-tested is malformed.
pub fn is_blocked(local_min: u32, windows: &[BlockedWindow], local_date: &str) -> Result<bool> {
    for window in windows {
        if let Some(scope) = window.date_scope() {
            if scope != local_date {
                continue;
            }
        }
        if window.minute_range()?.contains(local_min) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Additive boost for `preference` at `local_min`.
pub fn preference_boost(local_min: u32, preference: Preference, rules: &ScoringRules) -> i32 {
    let rule = match preference {
        Preference::EarlyBird => &rules.early_bird,
        Preference::NightOwl => &rules.night_owl,
        Preference::None => return 0,
    };
    if rule.range.contains(local_min) {
        rule.boost
    } else {
        0
    }
}
