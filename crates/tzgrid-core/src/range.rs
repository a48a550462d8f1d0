//! Minute-of-day intervals.
//!
//! Every interval in tzgrid (bands, blocked windows, preference boosts) is a
//! half-open range `[start, end)` over minutes of the local day, with two
//! special shapes:
//!
//! | Shape | Membership |
//! |-------|------------|
//! | `start == end` | whole day |
//! | `start < end` | `start <= t < end` |
//! | `start > end` | wraps midnight: `t >= start \|\| t < end` |

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, Result};

/// Minutes in a civil day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Half-open interval test over minutes of the day.
#[inline]
pub fn is_in_range(t: u32, start: u32, end: u32) -> bool {
    if start == end {
        true
    } else if start < end {
        start <= t && t < end
    } else {
        t >= start || t < end
    }
}

/// Parse a strict `HH:MM` wall-clock string into minutes since midnight.
///
/// Exactly two digits, a colon and two digits are accepted; the hour must be
/// 00-23 and the minute 00-59.
///
/// # Errors
/// Returns [`CoreError::InvalidWindowFormat`] for anything else.
pub fn parse_hhmm(value: &str) -> Result<u32> {
    let invalid = || CoreError::InvalidWindowFormat {
        value: value.to_string(),
    };

    let bytes = value.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(invalid());
    }
    let digits = [bytes[0], bytes[1], bytes[3], bytes[4]];
    if !digits.iter().all(u8::is_ascii_digit) {
        return Err(invalid());
    }

    let [h1, h2, m1, m2] = digits.map(|d| u32::from(d - b'0'));
    let hour = h1 * 10 + h2;
    let minute = m1 * 10 + m2;
    if hour > 23 || minute > 59 {
        return Err(invalid());
    }
    Ok(hour * 60 + minute)
}

/// Format minutes since midnight as `HH:MM`.
pub fn format_hhmm(minute_of_day: u32) -> String {
    let m = minute_of_day % MINUTES_PER_DAY;
    format!("{:02}:{:02}", m / 60, m % 60)
}

/// A validated `[start, end)` range of local minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RangeSpec", into = "RangeSpec")]
pub struct MinuteRange {
    start: u32,
    end: u32,
}

impl MinuteRange {
    /// Create a range from minute offsets. Values are taken modulo one day.
    pub fn new(start: u32, end: u32) -> Self {
        Self {
            start: start % MINUTES_PER_DAY,
            end: end % MINUTES_PER_DAY,
        }
    }

    /// Parse a range from two `HH:MM` strings.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidWindowFormat`] if either bound is malformed.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Self {
            start: parse_hhmm(start)?,
            end: parse_hhmm(end)?,
        })
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    /// Whether this range covers the full day.
    pub fn is_full_day(&self) -> bool {
        self.start == self.end
    }

    /// Whether this range wraps past midnight.
    pub fn wraps(&self) -> bool {
        self.start > self.end
    }

    /// Membership test for a local minute of day.
    #[inline]
    pub fn contains(&self, minute_of_day: u32) -> bool {
        is_in_range(minute_of_day, self.start, self.end)
    }
}

impl fmt::Display for MinuteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", format_hhmm(self.start), format_hhmm(self.end))
    }
}

/// Serialized form of [`MinuteRange`]: `{ start = "HH:MM", end = "HH:MM" }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeSpec {
    pub start: String,
    pub end: String,
}

impl TryFrom<RangeSpec> for MinuteRange {
    type Error = CoreError;

    fn try_from(spec: RangeSpec) -> Result<Self> {
        Self::parse(&spec.start, &spec.end)
    }
}

impl From<MinuteRange> for RangeSpec {
    fn from(range: MinuteRange) -> Self {
        Self {
            start: format_hhmm(range.start),
            end: format_hhmm(range.end),
        }
    }
}
