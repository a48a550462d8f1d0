//! Time conversion adapter.
//!
//! All DST and offset-table knowledge lives behind [`TimeConverter`]. The
//! scoring engine only asks one question: given an anchor date, a UTC minute
//! offset from that date's UTC midnight and a zone, what is the local minute
//! of day, local date and `HH:MM` label?
//!
//! The offset is resolved for the actual instant on the anchor date, so the
//! same UTC slot maps to different local times across a DST change.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, Result};

/// Zone a UTC instant is converted into.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ZoneSpec {
    /// IANA zone identifier, e.g. `Europe/Berlin`.
    Named(String),
    /// Treat as UTC.
    Utc,
    /// The zone of the machine running the computation.
    SystemLocal,
}

impl ZoneSpec {
    /// Interpret a display zone string. `UTC` (any case) and `local` are
    /// sentinels; everything else is taken as an IANA identifier.
    ///
    /// Participant timezones do not go through here, see
    /// [`crate::Participant::zone`].
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("utc") {
            ZoneSpec::Utc
        } else if value == "local" {
            ZoneSpec::SystemLocal
        } else {
            ZoneSpec::Named(value.to_string())
        }
    }
}

impl From<String> for ZoneSpec {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<ZoneSpec> for String {
    fn from(zone: ZoneSpec) -> Self {
        zone.to_string()
    }
}

impl fmt::Display for ZoneSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneSpec::Named(name) => write!(f, "{name}"),
            ZoneSpec::Utc => write!(f, "UTC"),
            ZoneSpec::SystemLocal => write!(f, "local"),
        }
    }
}

/// Local wall-clock view of a UTC instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalTime {
    /// Minutes since local midnight (0..1440).
    pub minute_of_day: u32,
    /// Local calendar date.
    pub date: NaiveDate,
    /// `HH:MM` label.
    pub label: String,
}

impl LocalTime {
    fn from_naive(local: NaiveDateTime) -> Self {
        Self {
            minute_of_day: local.hour() * 60 + local.minute(),
            date: local.date(),
            label: local.format("%H:%M").to_string(),
        }
    }

    /// Local date as `YYYY-MM-DD`.
    pub fn date_iso(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Collaborator that resolves UTC slot instants into local time.
pub trait TimeConverter {
    /// Convert `date 00:00 UTC + utc_offset_min` into `zone`.
    ///
    /// # Errors
    /// Returns [`CoreError::ResolutionFailure`] if the zone cannot be resolved.
    fn to_local(&self, date: NaiveDate, utc_offset_min: u32, zone: &ZoneSpec) -> Result<LocalTime>;
}

/// Default converter backed by `chrono-tz`'s bundled IANA database.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoTzConverter;

impl ChronoTzConverter {
    pub fn new() -> Self {
        Self
    }
}

/// UTC instant `utc_offset_min` minutes after midnight UTC on `date`.
pub fn slot_instant(date: NaiveDate, utc_offset_min: u32) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc() + Duration::minutes(i64::from(utc_offset_min))
}

/// Resolve an IANA zone identifier.
///
/// # Errors
/// Returns [`CoreError::ResolutionFailure`] for unknown identifiers.
pub fn parse_tz(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| CoreError::ResolutionFailure {
            zone: name.to_string(),
        })
}

/// Parse a `YYYY-MM-DD` anchor date.
///
/// # Errors
/// Returns [`CoreError::InvalidDate`] for anything else.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| CoreError::InvalidDate {
        value: value.to_string(),
    })
}

impl TimeConverter for ChronoTzConverter {
    fn to_local(&self, date: NaiveDate, utc_offset_min: u32, zone: &ZoneSpec) -> Result<LocalTime> {
        let instant = slot_instant(date, utc_offset_min);
        let local = match zone {
            ZoneSpec::Named(name) => instant.with_timezone(&parse_tz(name)?).naive_local(),
            ZoneSpec::Utc => instant.naive_utc(),
            ZoneSpec::SystemLocal => instant.with_timezone(&Local).naive_local(),
        };
        Ok(LocalTime::from_naive(local))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn utc_is_identity() {
        let conv = ChronoTzConverter::new();
        let local = conv.to_local(date("2026-02-25"), 540, &ZoneSpec::Utc).unwrap();
        assert_eq!(local.minute_of_day, 540);
        assert_eq!(local.label, "09:00");
        assert_eq!(local.date_iso(), "2026-02-25");
    }

    #[test]
    fn named_zone_shifts_date_backwards() {
        let conv = ChronoTzConverter::new();
        let zone = ZoneSpec::parse("America/Los_Angeles");
        // 02:00 UTC on Feb 25 is 18:00 PST on Feb 24.
        let local = conv.to_local(date("2026-02-25"), 120, &zone).unwrap();
        assert_eq!(local.label, "18:00");
        assert_eq!(local.minute_of_day, 18 * 60);
        assert_eq!(local.date_iso(), "2026-02-24");
    }

    #[test]
    fn half_hour_offset_zone() {
        let conv = ChronoTzConverter::new();
        let zone = ZoneSpec::parse("Asia/Kolkata");
        let local = conv.to_local(date("2026-02-25"), 0, &zone).unwrap();
        assert_eq!(local.label, "05:30");
    }

    #[test]
    fn dst_follows_anchor_date() {
        let conv = ChronoTzConverter::new();
        let zone = ZoneSpec::parse("America/New_York");
        let winter = conv.to_local(date("2026-01-15"), 14 * 60, &zone).unwrap();
        let summer = conv.to_local(date("2026-07-15"), 14 * 60, &zone).unwrap();
        assert_eq!(winter.label, "09:00");
        assert_eq!(summer.label, "10:00");
    }

    #[test]
    fn dst_transition_day_changes_mid_day() {
        let conv = ChronoTzConverter::new();
        let zone = ZoneSpec::parse("Europe/Berlin");
        // 2026-03-29: CET -> CEST at 01:00 UTC.
        let before = conv.to_local(date("2026-03-29"), 30, &zone).unwrap();
        let after = conv.to_local(date("2026-03-29"), 90, &zone).unwrap();
        assert_eq!(before.label, "01:30");
        assert_eq!(after.label, "03:30");
    }

    #[test]
    fn unknown_zone_fails() {
        let conv = ChronoTzConverter::new();
        let err = conv
            .to_local(date("2026-02-25"), 0, &ZoneSpec::parse("Mars/Olympus"))
            .unwrap_err();
        assert!(matches!(err, CoreError::ResolutionFailure { ref zone } if zone == "Mars/Olympus"));
    }

    #[test]
    fn parse_date_strict() {
        assert_eq!(parse_date("2026-02-25").unwrap(), date("2026-02-25"));
        for bad in ["2026-02-30", "25/02/2026", "", "2026-02"] {
            assert!(matches!(parse_date(bad), Err(CoreError::InvalidDate { .. })));
        }
    }

    #[test]
    fn zone_sentinels() {
        assert_eq!(ZoneSpec::parse("UTC"), ZoneSpec::Utc);
        assert_eq!(ZoneSpec::parse("utc"), ZoneSpec::Utc);
        assert_eq!(ZoneSpec::parse("local"), ZoneSpec::SystemLocal);
        assert_eq!(
            ZoneSpec::parse("Europe/Paris"),
            ZoneSpec::Named("Europe/Paris".into())
        );
    }
}
