//! # tzgrid Core Library
//!
//! Scores the 48 half-hour UTC slots of a day for a group of participants
//! spread across timezones and ranks them by meeting-friendliness. The
//! `tzgrid` CLI is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Time conversion**: [`TimeConverter`] resolves a UTC slot on an anchor
//!   date into local time; [`ChronoTzConverter`] is the `chrono-tz` default
//! - **Classification**: [`classify`] maps a local minute to a [`Band`];
//!   [`is_blocked`] and [`preference_boost`] apply blocked windows and boosts
//! - **Aggregation**: [`score`] selects participants and accumulates one
//!   [`SlotResult`] per slot
//! - **Ranking**: [`rank_slots`] orders slots best first
//! - **Presentation**: [`heatmap`] builds display cells for a chosen zone
//!
//! ## Example
//!
//! ```
//! use tzgrid_core::{parse_date, rank_slots, score, Participant, ScoreOptions};
//!
//! let people = vec![
//!     Participant::new("ana").with_timezone("Europe/Berlin"),
//!     Participant::new("bo").with_timezone("America/New_York"),
//! ];
//! let options = ScoreOptions::new(parse_date("2026-02-25").unwrap());
//! let result = score(&people, &options).unwrap();
//! let best = &rank_slots(&result.slots)[0];
//! assert_eq!(best.counts.red, 0);
//! ```

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod convert;
pub mod error;
pub mod evaluate;
pub mod filter;
pub mod heatmap;
pub mod participant;
pub mod range;
pub mod rank;
pub mod roster;
pub mod rules;

pub use aggregate::{
    score, score_slots, score_with, slot_offsets, RedParticipant, ScoreOptions, ScoreResult,
    SlotCounts, SlotResult, SLOT_COUNT, SLOT_MINUTES,
};
pub use classify::{classify, Band};
pub use config::Config;
pub use convert::{parse_date, ChronoTzConverter, LocalTime, TimeConverter, ZoneSpec};
pub use error::{ConfigError, CoreError};
pub use evaluate::{is_blocked, preference_boost};
pub use filter::{select_participants, ParticipantSelection};
pub use heatmap::{build_heatmap, render_ascii, HeatCell, HeatLevel};
pub use participant::{BlockedWindow, Participant, Preference};
pub use range::{is_in_range, parse_hhmm, MinuteRange};
pub use rank::{compare_slots, rank_slots};
pub use roster::load_roster;
pub use rules::{BandRule, BoostRule, ScoringRules, YellowRule};
