//! Participant selection.
//!
//! Selection runs before scoring and never mutates the caller's list:
//!
//! 1. drop explicitly excluded names
//! 2. keep only selected names (when the selection is non-empty)
//! 3. keep only the requested team
//! 4. drop participants without a timezone (unless allowed)
//!
//! Afterwards the designated observer ("yourself") is appended from the
//! original list if they are not excluded, not already present and pass the
//! timezone policy. The append overrides the name and team filters.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

use crate::participant::Participant;

/// Selection options applied before scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantSelection {
    /// Allow-list. Empty means everyone.
    #[serde(default)]
    pub selected_names: BTreeSet<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub exclude_names: BTreeSet<String>,
    /// Observer guaranteed a place in the pool.
    #[serde(default)]
    pub include_yourself: Option<String>,
    #[serde(default = "default_true")]
    pub exclude_null_timezones: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ParticipantSelection {
    fn default() -> Self {
        Self {
            selected_names: BTreeSet::new(),
            team: None,
            exclude_names: BTreeSet::new(),
            include_yourself: None,
            exclude_null_timezones: true,
        }
    }
}

impl ParticipantSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_names.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_names.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    pub fn yourself(mut self, name: impl Into<String>) -> Self {
        self.include_yourself = Some(name.into());
        self
    }

    pub fn allow_missing_timezones(mut self, allow: bool) -> Self {
        self.exclude_null_timezones = !allow;
        self
    }

    fn passes_name_filters(&self, p: &Participant) -> bool {
        if self.exclude_names.contains(&p.name) {
            return false;
        }
        if !self.selected_names.is_empty() && !self.selected_names.contains(&p.name) {
            return false;
        }
        if let Some(team) = &self.team {
            if p.team.as_deref() != Some(team.as_str()) {
                return false;
            }
        }
        true
    }

    fn drops_for_timezone(&self, p: &Participant) -> bool {
        self.exclude_null_timezones && !p.has_timezone()
    }
}

/// Build the working participant list for a scoring run.
pub fn select_participants(
    participants: &[Participant],
    selection: &ParticipantSelection,
) -> Vec<Participant> {
    let (mut selected, dropped_no_tz) = filter_pool(participants, selection);
    if dropped_no_tz > 0 {
        debug!(count = dropped_no_tz, "participants_without_timezone_skipped");
    }

    if let Some(observer) = yourself_to_append(participants, selection, &selected) {
        debug!(name = %observer.name, "observer_appended");
        selected.push(observer.clone());
    }

    selected
}

/// Apply the filters, returning the kept participants and how many were
/// dropped only for lacking a timezone.
fn filter_pool(
    participants: &[Participant],
    selection: &ParticipantSelection,
) -> (Vec<Participant>, usize) {
    let mut kept = Vec::new();
    let mut dropped_no_tz = 0;
    for p in participants.iter().filter(|p| selection.passes_name_filters(p)) {
        if selection.drops_for_timezone(p) {
            dropped_no_tz += 1;
        } else {
            kept.push(p.clone());
        }
    }
    (kept, dropped_no_tz)
}

fn yourself_to_append<'a>(
    participants: &'a [Participant],
    selection: &ParticipantSelection,
    selected: &[Participant],
) -> Option<&'a Participant> {
    let name = selection.include_yourself.as_deref()?;
    if selection.exclude_names.contains(name) || selected.iter().any(|p| p.name == name) {
        return None;
    }
    let original = participants.iter().find(|p| p.name == name)?;
    if selection.drops_for_timezone(original) {
        return None;
    }
    Some(original)
}
