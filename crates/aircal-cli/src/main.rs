//! Command-line front end: parse a range selection from flags, resolve
//! it against the broadcast calendar, and print the result as JSON.

use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::Parser;

use aircal::{
    broadcast_date_info, combine_date_time, resolve_range, CalendarRules, RangeMode,
    RangeSelection, TimeUnit,
};

#[derive(Parser)]
#[command(
    name = "aircal",
    version,
    about = "Resolve broadcast-calendar date ranges"
)]
struct Cli {
    /// Selection mode: between, on, before, after, last, next, current
    #[arg(long)]
    mode: String,

    /// First calendar date (YYYY-MM-DD)
    #[arg(long)]
    date1: Option<NaiveDate>,

    /// Time of day for --date1 (HH:MM)
    #[arg(long, default_value = "00:00")]
    time1: String,

    /// Second calendar date (YYYY-MM-DD), for "between"
    #[arg(long)]
    date2: Option<NaiveDate>,

    /// Time of day for --date2 (HH:MM)
    #[arg(long, default_value = "00:00")]
    time2: String,

    /// Time unit for last/next/current (e.g. days, weeks, quarters)
    #[arg(long)]
    unit: Option<String>,

    /// Number of units for last/next
    #[arg(long)]
    count: Option<u32>,

    /// Include the current unit in last/next ranges
    #[arg(long)]
    include_current: bool,

    /// Reference instant (YYYY-MM-DDTHH:MM:SS); defaults to the local
    /// wall clock
    #[arg(long)]
    now: Option<NaiveDateTime>,

    /// Also print broadcast info for each supplied instant
    #[arg(long)]
    info: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let rules = CalendarRules::default();

    let mode: RangeMode = cli.mode.parse()?;
    let unit = cli
        .unit
        .as_deref()
        .map(str::parse::<TimeUnit>)
        .transpose()?;
    let date_time1 = cli
        .date1
        .map(|date| combine_date_time(date, &cli.time1))
        .transpose()?;
    let date_time2 = cli
        .date2
        .map(|date| combine_date_time(date, &cli.time2))
        .transpose()?;
    let now = cli.now.unwrap_or_else(|| Local::now().naive_local());

    let selection = RangeSelection {
        mode,
        date_time1,
        date_time2,
        unit,
        count: cli.count,
        include_current: cli.include_current,
    };

    let range = resolve_range(&selection, now, &rules)?;
    let mut output = serde_json::json!({ "range": range });

    if cli.info {
        if let Some(dt) = date_time1 {
            output["info1"] = serde_json::to_value(broadcast_date_info(dt, &rules)?)?;
        }
        if let Some(dt) = date_time2 {
            output["info2"] = serde_json::to_value(broadcast_date_info(dt, &rules)?)?;
        }
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
