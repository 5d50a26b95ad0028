//! Helpers for the date and time-of-day fields a presentation layer
//! supplies: combining a calendar date with an "HH:MM" string, the
//! quarter-hour option list, and display formatting.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::error::{CalError, Result};

/// Merge a calendar date and an "HH:MM" string into one instant, with
/// seconds and milliseconds zeroed.
///
/// # Errors
///
/// Returns [`CalError::InvalidTime`] if the string is not a valid
/// 24-hour "HH:MM" time.
///
/// # Examples
///
/// ```
/// use aircal::combine_date_time;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2026, 2, 18).unwrap();
/// let instant = combine_date_time(date, "14:30").unwrap();
/// assert_eq!(instant.to_string(), "2026-02-18 14:30:00");
/// ```
pub fn combine_date_time(date: NaiveDate, time: &str) -> Result<NaiveDateTime> {
    let parsed = NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .map_err(|_| CalError::InvalidTime(format!("'{time}': expected HH:MM")))?;
    Ok(date.and_time(parsed))
}

/// The "HH:MM" strings offered by a time-of-day selector: every quarter
/// hour from "00:00" through "23:45".
pub fn time_options() -> Vec<String> {
    let mut options = Vec::with_capacity(96);
    for hour in 0..24 {
        for minute in (0..60).step_by(15) {
            options.push(format!("{hour:02}:{minute:02}"));
        }
    }
    options
}

/// English weekday name for a date.
pub fn weekday_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Render an instant the way the range display shows it, e.g.
/// "Wed, Feb 18, 2026, 14:30".
pub fn format_date_time(dt: NaiveDateTime) -> String {
    dt.format("%a, %b %-d, %Y, %H:%M").to_string()
}
