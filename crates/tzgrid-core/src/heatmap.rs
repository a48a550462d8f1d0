//! Heatmap view model.
//!
//! Turns scored slots into display cells: a normalized intensity, the share of
//! red-band participants, a coarse level for coloring, the slot label in a
//! chosen display zone and a tooltip. Slot records are only read.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::{SlotResult, SLOT_MINUTES};
use crate::convert::{slot_instant, TimeConverter, ZoneSpec};
use crate::error::Result;

/// Coarse quality level of a slot, used for coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatLevel {
    /// At least one participant is blocked.
    Blocked,
    Good,
    Fair,
    Poor,
    /// No participants were scored.
    Empty,
}

impl HeatLevel {
    fn marker(self) -> char {
        match self {
            HeatLevel::Blocked => 'x',
            HeatLevel::Good => '●',
            HeatLevel::Fair => '○',
            HeatLevel::Poor => '·',
            HeatLevel::Empty => ' ',
        }
    }

    fn classify(intensity: f64, red_ratio: f64, slot: &SlotResult) -> Self {
        if slot.participants_count == 0 {
            HeatLevel::Empty
        } else if slot.counts.blocked > 0 {
            HeatLevel::Blocked
        } else if intensity >= 0.66 && red_ratio == 0.0 {
            HeatLevel::Good
        } else if intensity >= 0.33 && red_ratio < 0.5 {
            HeatLevel::Fair
        } else {
            HeatLevel::Poor
        }
    }
}

/// One rendered slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatCell {
    pub utc_start_min: u32,
    /// Slot start as `HH:MM` in the display zone.
    pub display_label: String,
    /// Display-zone date of the slot start.
    pub display_date: NaiveDate,
    pub total_score: i64,
    /// Score normalized to `0.0..=1.0` across the day.
    pub intensity: f64,
    /// Red-band participants over participants (0 when empty).
    pub red_ratio: f64,
    pub level: HeatLevel,
    /// The slot has already ended at `now`.
    pub is_past: bool,
    pub tooltip: String,
}

/// Build display cells in UTC slot order.
///
/// The normalization range `max - min` is clamped to at least 1 so a flat
/// day does not divide by zero.
///
/// # Errors
/// Returns [`crate::CoreError::ResolutionFailure`] if `display_zone` is unknown.
pub fn build_heatmap<C: TimeConverter + ?Sized>(
    slots: &[SlotResult],
    date: NaiveDate,
    display_zone: &ZoneSpec,
    converter: &C,
    now: Option<DateTime<Utc>>,
) -> Result<Vec<HeatCell>> {
    let mut ordered: Vec<&SlotResult> = slots.iter().collect();
    ordered.sort_by_key(|s| s.utc_start_min);

    let min = ordered.iter().map(|s| s.total_score).min().unwrap_or(0);
    let max = ordered.iter().map(|s| s.total_score).max().unwrap_or(0);
    let span = (max - min).max(1) as f64;

    ordered
        .into_iter()
        .map(|slot| {
            let local = converter.to_local(date, slot.utc_start_min, display_zone)?;
            let intensity = (slot.total_score - min) as f64 / span;
            let red_ratio = if slot.participants_count == 0 {
                0.0
            } else {
                slot.counts.red as f64 / slot.participants_count as f64
            };
            let slot_end = slot_instant(date, slot.utc_start_min)
                + Duration::minutes(i64::from(SLOT_MINUTES));
            let is_past = now.is_some_and(|now| now >= slot_end);

            Ok(HeatCell {
                utc_start_min: slot.utc_start_min,
                tooltip: tooltip(slot, &local.label, display_zone),
                display_label: local.label,
                display_date: local.date,
                total_score: slot.total_score,
                intensity,
                red_ratio,
                level: HeatLevel::classify(intensity, red_ratio, slot),
                is_past,
            })
        })
        .collect()
}

fn tooltip(slot: &SlotResult, label: &str, zone: &ZoneSpec) -> String {
    let mut text = format!(
        "{label} {zone} ({} UTC): score {}, green {}, yellow {}, red {}, blocked {}",
        slot.utc_label(),
        slot.total_score,
        slot.counts.green,
        slot.counts.yellow,
        slot.counts.red,
        slot.counts.blocked,
    );
    if let Some(reds) = slot.red_participants.as_deref().filter(|r| !r.is_empty()) {
        let names: Vec<String> = reds
            .iter()
            .map(|r| format!("{} {}", r.name, r.local_label))
            .collect();
        text.push_str(&format!("; outside hours: {}", names.join(", ")));
    }
    text
}

const BAR_WIDTH: usize = 30;

/// Render cells as a text heatmap, one row per slot.
pub fn render_ascii(cells: &[HeatCell], title: &str) -> String {
    let mut output = format!("\n{title}\n");
    output.push_str(&"─".repeat(56));
    output.push('\n');

    for cell in cells {
        let bar_length = (cell.intensity * BAR_WIDTH as f64).round() as usize;
        let bar_length = bar_length.min(BAR_WIDTH);
        let bar = "█".repeat(bar_length);
        let empty = " ".repeat(BAR_WIDTH - bar_length);
        let past = if cell.is_past { " (past)" } else { "" };

        output.push_str(&format!(
            "{} {}{} {} {:>5} red {:>3.0}%{}\n",
            cell.display_label,
            bar,
            empty,
            cell.level.marker(),
            cell.total_score,
            cell.red_ratio * 100.0,
            past
        ));
    }

    output.push_str(&"─".repeat(56));
    output.push_str("\n● Good  ○ Fair  · Poor  x Blocked\n");
    output
}
