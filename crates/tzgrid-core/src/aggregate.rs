//! Slot aggregation.
//!
//! For each of the 48 half-hour UTC slots of the anchor date, every
//! participant is converted to local time and contributes exactly one of:
//!
//! - the blocked penalty (inside a blocked window), or
//! - the band score plus any preference boost.
//!
//! Slots are independent; nothing carries over from one slot to the next.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::{classify, Band};
use crate::convert::{ChronoTzConverter, TimeConverter};
use crate::error::Result;
use crate::evaluate::{is_blocked, preference_boost};
use crate::filter::{select_participants, ParticipantSelection};
use crate::participant::Participant;
use crate::rules::ScoringRules;

/// Number of slots in a scoring run.
pub const SLOT_COUNT: usize = 48;

/// Slot length in minutes.
pub const SLOT_MINUTES: u32 = 30;

/// UTC start offsets of every slot: 0, 30, ..., 1410.
pub fn slot_offsets() -> impl Iterator<Item = u32> {
    (0..SLOT_COUNT as u32).map(|i| i * SLOT_MINUTES)
}

/// Per-slot classification counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotCounts {
    pub green: usize,
    pub yellow: usize,
    pub red: usize,
    pub blocked: usize,
}

impl SlotCounts {
    fn record(&mut self, band: Band) {
        match band {
            Band::Green => self.green += 1,
            Band::Yellow => self.yellow += 1,
            Band::Red => self.red += 1,
        }
    }

    /// Sum of all counters; equals the participant count of the slot.
    pub fn total(&self) -> usize {
        self.green + self.yellow + self.red + self.blocked
    }
}

/// A participant that landed in the red band for a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedParticipant {
    pub name: String,
    pub timezone: Option<String>,
    /// Local `HH:MM` at the slot start.
    pub local_label: String,
}

/// Aggregated result for one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotResult {
    /// Minutes from UTC midnight of the anchor date.
    pub utc_start_min: u32,
    pub total_score: i64,
    pub counts: SlotCounts,
    pub participants_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub red_participants: Option<Vec<RedParticipant>>,
}

impl SlotResult {
    fn empty(utc_start_min: u32, participants_count: usize, collect_red: bool) -> Self {
        Self {
            utc_start_min,
            total_score: 0,
            counts: SlotCounts::default(),
            participants_count,
            red_participants: collect_red.then(Vec::new),
        }
    }

    /// `HH:MM` label of the slot start in UTC.
    pub fn utc_label(&self) -> String {
        crate::range::format_hhmm(self.utc_start_min)
    }
}

/// Output of a scoring run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Anchor date.
    pub date: NaiveDate,
    /// Working participant list after selection.
    pub participants: Vec<Participant>,
    /// Exactly [`SLOT_COUNT`] slots in UTC order.
    pub slots: Vec<SlotResult>,
}

/// Options for [`score`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreOptions {
    pub date: NaiveDate,
    pub rules: ScoringRules,
    pub selection: ParticipantSelection,
    pub include_red_participants: bool,
}

impl ScoreOptions {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            rules: ScoringRules::default(),
            selection: ParticipantSelection::default(),
            include_red_participants: true,
        }
    }

    pub fn with_rules(mut self, rules: ScoringRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_selection(mut self, selection: ParticipantSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_red_participants(mut self, include: bool) -> Self {
        self.include_red_participants = include;
        self
    }
}

/// Select participants and score every slot with the default converter.
///
/// # Errors
/// Fails on the first malformed blocked window or unresolvable timezone.
pub fn score(participants: &[Participant], options: &ScoreOptions) -> Result<ScoreResult> {
    score_with(&ChronoTzConverter::new(), participants, options)
}

/// Like [`score`] with an explicit time converter.
///
/// # Errors
/// Fails on the first malformed blocked window or unresolvable timezone.
pub fn score_with<C: TimeConverter + ?Sized>(
    converter: &C,
    participants: &[Participant],
    options: &ScoreOptions,
) -> Result<ScoreResult> {
    let working = select_participants(participants, &options.selection);
    score_slots(
        converter,
        working,
        options.date,
        &options.rules,
        options.include_red_participants,
    )
}

/// Score all 48 slots for an already-selected participant list.
///
/// Participants are visited in list order, which fixes the order of each
/// slot's red participant list.
///
/// # Errors
/// Fails on the first malformed blocked window or unresolvable timezone.
pub fn score_slots<C: TimeConverter + ?Sized>(
    converter: &C,
    participants: Vec<Participant>,
    date: NaiveDate,
    rules: &ScoringRules,
    include_red: bool,
) -> Result<ScoreResult> {
    for p in &participants {
        p.validate()?;
    }
    let zones: Vec<_> = participants.iter().map(Participant::zone).collect();

    debug!(
        %date,
        participants = participants.len(),
        slots = SLOT_COUNT,
        "scoring_run_started"
    );

    let mut slots = Vec::with_capacity(SLOT_COUNT);
    for offset in slot_offsets() {
        let mut slot = SlotResult::empty(offset, participants.len(), include_red);

        for (p, zone) in participants.iter().zip(&zones) {
            let local = converter.to_local(date, offset, zone)?;

            if is_blocked(local.minute_of_day, &p.blocked, &local.date_iso())? {
                slot.total_score += i64::from(rules.blocked_score);
                slot.counts.blocked += 1;
                continue;
            }

            let (base, band) = classify(local.minute_of_day, rules);
            let boost = preference_boost(local.minute_of_day, p.preference, rules);
            slot.total_score += i64::from(base) + i64::from(boost);
            slot.counts.record(band);

            if band == Band::Red {
                if let Some(reds) = slot.red_participants.as_mut() {
                    reds.push(RedParticipant {
                        name: p.name.clone(),
                        timezone: p.timezone.clone(),
                        local_label: local.label,
                    });
                }
            }
        }

        slots.push(slot);
    }

    Ok(ScoreResult {
        date,
        participants,
        slots,
    })
}
