//! Broadcast day, week, month, and quarter resolution.
//!
//! A broadcast day runs from the configured day start (06:00) to one
//! millisecond before the next day start. Broadcast weeks run Monday
//! 00:00:00.000 through Sunday 23:59:59.999. A broadcast month is the
//! calendar month realigned to whole broadcast weeks: it begins on the
//! week-start of the week containing the calendar month's 1st, and when
//! that 1st falls on the last day of the week (a Sunday) the anchor
//! shifts back a further week. Quarters group three calendar months and
//! end at the last broadcast-day millisecond before the next quarter's
//! first broadcast month begins.
//!
//! All functions are pure: they take an instant plus a
//! [`CalendarRules`] value and return fresh values, never touching a
//! clock or mutating their inputs.

use chrono::{Datelike, Days, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::error::{CalError, Result};
use crate::rules::CalendarRules;

// ── Resolved spans ──────────────────────────────────────────────────────────

/// One broadcast week: week-start 00:00:00.000 through the last
/// millisecond of the seventh day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BroadcastWeek {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// One broadcast month, with the English name of the calendar month it
/// represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BroadcastMonth {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub name: &'static str,
}

/// One broadcast quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BroadcastQuarter {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Per-instant broadcast information for display: the adjusted instant
/// plus the week, month, and quarter containing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BroadcastDateInfo {
    /// The instant moved to its owning broadcast day.
    pub adjusted: NaiveDateTime,
    /// Day-of-month of the adjusted instant.
    pub broadcast_day: u32,
    pub month_name: &'static str,
    pub month_start: NaiveDateTime,
    pub month_end: NaiveDateTime,
    pub week_start: NaiveDateTime,
    pub week_end: NaiveDateTime,
    pub quarter_start: NaiveDateTime,
    pub quarter_end: NaiveDateTime,
}

// ── Broadcast day ───────────────────────────────────────────────────────────

/// Move an instant to its owning broadcast day.
///
/// The date shifts back one day when the time-of-day is before the day
/// start; the time-of-day is preserved. Total: at the representable
/// minimum date the shift saturates and the instant is returned
/// unchanged.
///
/// # Examples
///
/// ```
/// use aircal::{adjust_for_broadcast_day, CalendarRules};
/// use chrono::NaiveDate;
///
/// let rules = CalendarRules::default();
/// let late_night = NaiveDate::from_ymd_opt(2024, 5, 10)
///     .unwrap()
///     .and_hms_opt(3, 0, 0)
///     .unwrap();
/// let adjusted = adjust_for_broadcast_day(late_night, &rules);
/// assert_eq!(adjusted.to_string(), "2024-05-09 03:00:00");
/// ```
pub fn adjust_for_broadcast_day(dt: NaiveDateTime, rules: &CalendarRules) -> NaiveDateTime {
    if dt.time() < rules.day_start {
        match dt.date().pred_opt() {
            Some(prev) => prev.and_time(dt.time()),
            None => dt,
        }
    } else {
        dt
    }
}

// ── Broadcast week ──────────────────────────────────────────────────────────

/// Resolve the broadcast week containing an instant.
///
/// # Errors
///
/// Returns [`CalError::DateOutOfRange`] if the week bounds leave the
/// representable date range.
///
/// # Examples
///
/// ```
/// use aircal::{broadcast_week, CalendarRules};
/// use chrono::NaiveDate;
///
/// let rules = CalendarRules::default();
/// // Friday, March 1, 2024
/// let friday = NaiveDate::from_ymd_opt(2024, 3, 1)
///     .unwrap()
///     .and_hms_opt(10, 0, 0)
///     .unwrap();
/// let week = broadcast_week(friday, &rules).unwrap();
/// assert_eq!(week.start.to_string(), "2024-02-26 00:00:00");
/// assert_eq!(week.end.to_string(), "2024-03-03 23:59:59.999");
/// ```
pub fn broadcast_week(dt: NaiveDateTime, rules: &CalendarRules) -> Result<BroadcastWeek> {
    let start_date = week_start_of(dt.date(), rules)?;
    let end_date = start_date
        .checked_add_days(Days::new(6))
        .ok_or_else(|| out_of_range("week end"))?;

    Ok(BroadcastWeek {
        start: start_date.and_time(NaiveTime::MIN),
        end: end_date.and_time(end_of_day()),
    })
}

// ── Broadcast month ─────────────────────────────────────────────────────────

/// Resolve the broadcast month containing an instant.
///
/// The month anchor is the week-start of the week containing the
/// calendar month's 1st; a 1st falling on the last day of the week
/// shifts the anchor back a further week. When the instant's own week
/// starts on or after the next month's anchor, the instant belongs to
/// the next broadcast month: that month runs from the next anchor to
/// the last calendar day of the next month. Otherwise the month runs
/// from its anchor to one millisecond before the next anchor.
///
/// Handles the December to January rollover for both anchors.
///
/// # Errors
///
/// Returns [`CalError::DateOutOfRange`] if month arithmetic leaves the
/// representable date range.
pub fn broadcast_month(dt: NaiveDateTime, rules: &CalendarRules) -> Result<BroadcastMonth> {
    let date = dt.date();
    let cur_week_start = week_start_of(date, rules)?;

    let (year, month) = (date.year(), date.month());
    let anchor_cur = month_anchor(year, month, rules)?;

    let (next_year, next_month) = months_after(year, month);
    let anchor_next = month_anchor(next_year, next_month, rules)?;

    if cur_week_start >= anchor_next {
        // The closing week of the calendar month rolls into the next
        // broadcast month.
        let (after_year, after_month) = months_after(next_year, next_month);
        let last_day = first_of_month(after_year, after_month)?
            .pred_opt()
            .ok_or_else(|| out_of_range("month end"))?;

        Ok(BroadcastMonth {
            start: anchor_next.and_time(NaiveTime::MIN),
            end: last_day.and_time(NaiveTime::MIN),
            name: month_name(next_month),
        })
    } else {
        let end = anchor_next
            .and_time(NaiveTime::MIN)
            .checked_sub_signed(Duration::milliseconds(1))
            .ok_or_else(|| out_of_range("month end"))?;

        Ok(BroadcastMonth {
            start: anchor_cur.and_time(NaiveTime::MIN),
            end,
            name: month_name(month),
        })
    }
}

// ── Broadcast quarter ───────────────────────────────────────────────────────

/// Resolve the broadcast quarter containing an instant.
///
/// Quarters bucket the calendar months as Jan–Mar, Apr–Jun, Jul–Sep,
/// Oct–Dec; the fourth quarter's successor wraps to January of the next
/// year. The quarter starts where the broadcast month of its first
/// calendar month starts and ends at the last broadcast-day millisecond
/// (05:59:59.999 under the default rules) on the date where the next
/// quarter's first broadcast month begins.
///
/// # Errors
///
/// Returns [`CalError::DateOutOfRange`] if quarter arithmetic leaves
/// the representable date range.
pub fn broadcast_quarter(dt: NaiveDateTime, rules: &CalendarRules) -> Result<BroadcastQuarter> {
    let date = dt.date();
    let quarter = (date.month() - 1) / 3;
    let first_month = quarter * 3 + 1;

    let (next_year, next_first_month) = if quarter == 3 {
        (date.year() + 1, 1)
    } else {
        (date.year(), first_month + 3)
    };

    let start = month_anchor(date.year(), first_month, rules)?;
    let next_start = month_anchor(next_year, next_first_month, rules)?;

    Ok(BroadcastQuarter {
        start: start.and_time(NaiveTime::MIN),
        end: next_start.and_time(rules.day_end()),
    })
}

// ── Aggregate info ──────────────────────────────────────────────────────────

/// Collect per-instant broadcast information for display.
///
/// Pure composition: the instant is moved to its broadcast day, then
/// the containing week, month, and quarter are resolved for the
/// adjusted instant.
///
/// # Errors
///
/// Returns [`CalError::DateOutOfRange`] if any resolution leaves the
/// representable date range.
pub fn broadcast_date_info(dt: NaiveDateTime, rules: &CalendarRules) -> Result<BroadcastDateInfo> {
    let adjusted = adjust_for_broadcast_day(dt, rules);
    let month = broadcast_month(adjusted, rules)?;
    let week = broadcast_week(adjusted, rules)?;
    let quarter = broadcast_quarter(adjusted, rules)?;

    Ok(BroadcastDateInfo {
        adjusted,
        broadcast_day: adjusted.day(),
        month_name: month.name,
        month_start: month.start,
        month_end: month.end,
        week_start: week.start,
        week_end: week.end,
        quarter_start: quarter.start,
        quarter_end: quarter.end,
    })
}

// ── Internal helpers ────────────────────────────────────────────────────────

/// The week-start date of the week containing `date`.
pub(crate) fn week_start_of(date: NaiveDate, rules: &CalendarRules) -> Result<NaiveDate> {
    let back = rules.days_from_week_start(date.weekday());
    date.checked_sub_days(Days::new(u64::from(back)))
        .ok_or_else(|| out_of_range("week start"))
}

/// The anchor date a broadcast month starts on: the week-start of the
/// week containing the calendar month's 1st, shifted back a further
/// week when the 1st falls on the last day of the week.
pub(crate) fn month_anchor(year: i32, month: u32, rules: &CalendarRules) -> Result<NaiveDate> {
    let first = first_of_month(year, month)?;
    let mut anchor = week_start_of(first, rules)?;

    if first.weekday() == rules.carry_weekday() {
        anchor = anchor
            .checked_sub_days(Days::new(7))
            .ok_or_else(|| out_of_range("month anchor"))?;
    }

    Ok(anchor)
}

/// First calendar day of a month, as a checked construction.
pub(crate) fn first_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| out_of_range(format!("{year:04}-{month:02}-01")))
}

/// The (year, month) pair one calendar month after the given one.
pub(crate) fn months_after(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

/// English name of a calendar month (1-12).
pub(crate) fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "",
    }
}

/// 23:59:59.999 — the last millisecond of a civil day. `NaiveTime`
/// subtraction wraps around midnight.
pub(crate) fn end_of_day() -> NaiveTime {
    NaiveTime::MIN - Duration::milliseconds(1)
}

pub(crate) fn out_of_range(what: impl Into<String>) -> CalError {
    CalError::DateOutOfRange(what.into())
}

// ── Tests ───────────────────────────────────────────────────────────────────
