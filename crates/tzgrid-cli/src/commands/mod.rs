//! Subcommands and the arguments they share.

pub mod config;
pub mod heatmap;
pub mod score;

use std::path::PathBuf;

use chrono::Utc;
use clap::Args;
use tzgrid_core::{load_roster, parse_date, Config, ParticipantSelection, ScoreOptions, ScoreResult};

/// Roster, date and participant selection flags.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Participant roster (.json or .toml)
    #[arg(short, long)]
    pub participants: PathBuf,
    /// Anchor date (YYYY-MM-DD), defaults to today in UTC
    #[arg(long)]
    pub date: Option<String>,
    /// Only score participants of this team
    #[arg(long)]
    pub team: Option<String>,
    /// Only score these participants (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub select: Vec<String>,
    /// Never score these participants (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,
    /// Participant always included in the scored pool
    #[arg(long)]
    pub yourself: Option<String>,
    /// Score participants without a timezone as UTC instead of dropping them
    #[arg(long)]
    pub allow_missing_timezone: bool,
    /// Do not collect red-band participants per slot
    #[arg(long)]
    pub no_red: bool,
}

impl RunArgs {
    /// Build score options from flags, falling back to config defaults.
    pub fn options(&self, config: &Config) -> Result<ScoreOptions, Box<dyn std::error::Error>> {
        let date = match self.date.as_deref() {
            Some(value) => parse_date(value)?,
            None => Utc::now().date_naive(),
        };

        let mut selection = ParticipantSelection::new()
            .select(self.select.iter().cloned())
            .exclude(self.exclude.iter().cloned())
            .allow_missing_timezones(
                self.allow_missing_timezone || !config.defaults.exclude_null_timezones,
            );
        if let Some(team) = &self.team {
            selection = selection.team(team.clone());
        }
        if let Some(name) = self.yourself.as_ref().or(config.defaults.yourself.as_ref()) {
            selection = selection.yourself(name.clone());
        }

        Ok(ScoreOptions::new(date)
            .with_rules(config.rules())
            .with_selection(selection)
            .with_red_participants(!self.no_red && config.defaults.include_red_participants))
    }

    /// Load the roster and score it.
    pub fn score(&self, config: &Config) -> Result<ScoreResult, Box<dyn std::error::Error>> {
        let roster = load_roster(&self.participants)?;
        let options = self.options(config)?;
        tracing::info!(
            roster = roster.len(),
            date = %options.date,
            "scoring_roster"
        );
        Ok(tzgrid_core::score(&roster, &options)?)
    }
}
