//! Heatmap command for displaying slot quality through the day.

use chrono::Utc;
use clap::Args;

use tzgrid_core::{build_heatmap, render_ascii, ChronoTzConverter, Config, HeatLevel, ZoneSpec};

use super::RunArgs;

#[derive(Args, Debug)]
pub struct HeatmapArgs {
    #[command(flatten)]
    pub run: RunArgs,
    /// Display timezone for slot labels (IANA id, UTC or local)
    #[arg(long)]
    pub display_tz: Option<String>,
}

pub fn run(args: HeatmapArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let result = args.run.score(&config)?;

    let zone_name = args
        .display_tz
        .unwrap_or_else(|| config.defaults.display_timezone.clone());
    let zone = ZoneSpec::parse(&zone_name);

    let cells = build_heatmap(
        &result.slots,
        result.date,
        &zone,
        &ChronoTzConverter,
        Some(Utc::now()),
    )?;

    let title = format!("{} slots for {} ({zone})", result.participants.len(), result.date);
    println!("{}", render_ascii(&cells, &title));

    let good = cells.iter().filter(|c| c.level == HeatLevel::Good).count();
    let blocked = cells.iter().filter(|c| c.level == HeatLevel::Blocked).count();

    println!("Summary:");
    println!("  Good slots: {good}/{}", cells.len());
    println!("  Slots with blocked participants: {blocked}/{}", cells.len());

    if good == 0 {
        println!("\n  Tip: try --exclude or --team to narrow the group.");
    }

    Ok(())
}
