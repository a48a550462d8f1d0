//! Participant records.
//!
//! Participants are owned by the caller. Scoring reads them and, at most,
//! builds a filtered copy of the list.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::convert::ZoneSpec;
use crate::error::Result;
use crate::range::MinuteRange;

/// Declared working-hours preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preference {
    #[default]
    None,
    EarlyBird,
    NightOwl,
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preference::None => write!(f, "none"),
            Preference::EarlyBird => write!(f, "early_bird"),
            Preference::NightOwl => write!(f, "night_owl"),
        }
    }
}

/// A local wall-clock window in which a participant must not be scheduled.
///
/// `start == end` blocks the whole day; `start > end` wraps past local
/// midnight. With a `date` the window only applies on that local date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedWindow {
    /// `HH:MM` local start.
    pub start: String,
    /// `HH:MM` local end (exclusive).
    pub end: String,
    /// Optional `YYYY-MM-DD` scope, compared verbatim with the local date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl BlockedWindow {
    /// A window applying every day.
    pub fn daily(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            date: None,
        }
    }

    /// A window applying only on `date`.
    pub fn on_date(start: impl Into<String>, end: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            date: Some(date.into()),
        }
    }

    /// Parse the `HH:MM` bounds.
    ///
    /// # Errors
    /// Returns [`crate::CoreError::InvalidWindowFormat`] for malformed bounds.
    pub fn minute_range(&self) -> Result<MinuteRange> {
        MinuteRange::parse(&self.start, &self.end)
    }

    /// The date scope, treating an empty string as absent.
    pub fn date_scope(&self) -> Option<&str> {
        self.date.as_deref().filter(|d| !d.is_empty())
    }
}

/// A person taking part in the meeting search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Unique within one scoring run.
    pub name: String,
    /// IANA zone identifier.
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default)]
    pub preference: Preference,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocked: Vec<BlockedWindow>,
}

impl Participant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            timezone: None,
            team: None,
            preference: Preference::None,
            blocked: Vec::new(),
        }
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    pub fn with_preference(mut self, preference: Preference) -> Self {
        self.preference = preference;
        self
    }

    pub fn with_blocked(mut self, window: BlockedWindow) -> Self {
        self.blocked.push(window);
        self
    }

    /// Whether a timezone is set (empty strings count as missing).
    pub fn has_timezone(&self) -> bool {
        self.timezone.as_deref().is_some_and(|tz| !tz.is_empty())
    }

    /// Zone used for conversion. Participants without a timezone are
    /// treated as UTC; anything else is an IANA identifier, never a sentinel.
    pub fn zone(&self) -> ZoneSpec {
        match self.timezone.as_deref() {
            Some(tz) if !tz.is_empty() => ZoneSpec::Named(tz.to_string()),
            _ => ZoneSpec::Utc,
        }
    }

    /// Check every blocked window parses.
    ///
    /// # Errors
    /// Returns the first [`crate::CoreError::InvalidWindowFormat`] found.
    pub fn validate(&self) -> Result<()> {
        for window in &self.blocked {
            window.minute_range()?;
        }
        Ok(())
    }
}
