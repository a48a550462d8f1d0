//! Score command: rank the slots of a day.

use clap::Args;
use serde::Serialize;

use tzgrid_core::{rank_slots, Config, ScoreResult, SlotResult};

use super::RunArgs;

#[derive(Args, Debug)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub run: RunArgs,
    /// Number of ranked slots to show (defaults to config `defaults.top`)
    #[arg(long)]
    pub top: Option<usize>,
    /// Print the full result and ranking as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    #[serde(flatten)]
    result: &'a ScoreResult,
    ranked: Vec<SlotResult>,
}

pub fn run(args: ScoreArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let result = args.run.score(&config)?;
    let ranked = rank_slots(&result.slots);

    if args.json {
        let output = JsonOutput {
            result: &result,
            ranked,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let top = args.top.unwrap_or(config.defaults.top).min(ranked.len());
    println!(
        "Best slots for {} ({} participants)\n",
        result.date,
        result.participants.len()
    );
    println!(
        "{:>4}  {:<5}  {:>6}  {:>5}  {:>6}  {:>3}  {:>7}  outside hours",
        "#", "UTC", "score", "green", "yellow", "red", "blocked"
    );
    println!("{}", "=".repeat(64));

    for (i, slot) in ranked.iter().take(top).enumerate() {
        println!(
            "{:>4}  {:<5}  {:>6}  {:>5}  {:>6}  {:>3}  {:>7}  {}",
            i + 1,
            slot.utc_label(),
            slot.total_score,
            slot.counts.green,
            slot.counts.yellow,
            slot.counts.red,
            slot.counts.blocked,
            outside_hours(slot)
        );
    }

    Ok(())
}

fn outside_hours(slot: &SlotResult) -> String {
    match slot.red_participants.as_deref() {
        Some(reds) if !reds.is_empty() => reds
            .iter()
            .map(|r| format!("{} ({})", r.name, r.local_label))
            .collect::<Vec<_>>()
            .join(", "),
        Some(_) => "-".to_string(),
        None => String::new(),
    }
}
