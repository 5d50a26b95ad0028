//! Time units and their span arithmetic.
//!
//! [`TimeUnit`] is a closed dispatch over the seven granularities the
//! engine understands. Each unit knows how to compute the span of the
//! unit containing a reference instant ([`TimeUnit::current_span`]) and
//! how to move a span boundary by a whole number of units in either
//! direction ([`TimeUnit::shift_start_back`] /
//! [`TimeUnit::shift_end_forward`]). The relative-range calculator
//! composes these; no per-unit branching exists anywhere else.
//!
//! Shift semantics differ by unit class. Minutes, hours, days, and
//! weeks are fixed-duration increments on the boundary instant. Months,
//! quarters, and years flatten the boundary's (year, month) into a
//! single index, apply the offset with euclidean carry/borrow across
//! year boundaries, and re-resolve the target broadcast period — a
//! shifted month boundary therefore lands on real broadcast-month
//! bounds, not on a naively incremented date.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Duration, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;

use crate::calendar::{
    adjust_for_broadcast_day, broadcast_month, broadcast_quarter, broadcast_week, first_of_month,
    month_anchor, out_of_range,
};
use crate::error::{CalError, Result};
use crate::rules::CalendarRules;

// ── Span type ───────────────────────────────────────────────────────────────

/// A {start, end} pair bounding a whole number of units; the end is the
/// last millisecond before the next unit begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnitSpan {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

// ── TimeUnit ────────────────────────────────────────────────────────────────

/// The granularities a range can be expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl TimeUnit {
    /// All units, in ascending granularity order.
    pub const ALL: [TimeUnit; 7] = [
        TimeUnit::Minute,
        TimeUnit::Hour,
        TimeUnit::Day,
        TimeUnit::Week,
        TimeUnit::Month,
        TimeUnit::Quarter,
        TimeUnit::Year,
    ];

    /// The span of the unit containing `reference`.
    ///
    /// Minutes and hours truncate the reference; days use the broadcast
    /// day; weeks, months, and quarters delegate to their resolvers;
    /// years run from the broadcast month of January 1 to the last
    /// broadcast-day millisecond before the next year's first broadcast
    /// month begins.
    ///
    /// # Errors
    ///
    /// Returns [`CalError::DateOutOfRange`] if the span bounds leave
    /// the representable date range.
    pub fn current_span(self, reference: NaiveDateTime, rules: &CalendarRules) -> Result<UnitSpan> {
        match self {
            TimeUnit::Minute => {
                let start = reference
                    .with_second(0)
                    .and_then(|t| t.with_nanosecond(0))
                    .ok_or_else(|| out_of_range("minute start"))?;
                let end = start
                    .checked_add_signed(Duration::minutes(1) - Duration::milliseconds(1))
                    .ok_or_else(|| out_of_range("minute end"))?;
                Ok(UnitSpan { start, end })
            }
            TimeUnit::Hour => {
                let start = reference
                    .with_minute(0)
                    .and_then(|t| t.with_second(0))
                    .and_then(|t| t.with_nanosecond(0))
                    .ok_or_else(|| out_of_range("hour start"))?;
                let end = start
                    .checked_add_signed(Duration::hours(1) - Duration::milliseconds(1))
                    .ok_or_else(|| out_of_range("hour end"))?;
                Ok(UnitSpan { start, end })
            }
            TimeUnit::Day => {
                let day = adjust_for_broadcast_day(reference, rules);
                let end_date = day
                    .date()
                    .checked_add_days(Days::new(1))
                    .ok_or_else(|| out_of_range("day end"))?;
                Ok(UnitSpan {
                    start: day.date().and_time(rules.day_start),
                    end: end_date.and_time(rules.day_end()),
                })
            }
            TimeUnit::Week => {
                let week = broadcast_week(reference, rules)?;
                Ok(UnitSpan {
                    start: week.start,
                    end: week.end,
                })
            }
            TimeUnit::Month => {
                let month = broadcast_month(reference, rules)?;
                Ok(UnitSpan {
                    start: month.start,
                    end: month.end,
                })
            }
            TimeUnit::Quarter => {
                let quarter = broadcast_quarter(reference, rules)?;
                Ok(UnitSpan {
                    start: quarter.start,
                    end: quarter.end,
                })
            }
            TimeUnit::Year => {
                let start = month_anchor(reference.year(), 1, rules)?;
                let next_start = month_anchor(reference.year() + 1, 1, rules)?;
                Ok(UnitSpan {
                    start: start.and_time(NaiveTime::MIN),
                    end: next_start.and_time(rules.day_end()),
                })
            }
        }
    }

    /// Move a span start back by `count` units, returning the new
    /// start.
    ///
    /// Fixed-duration units subtract from the anchor directly; month,
    /// quarter, and year re-resolve the start of the target broadcast
    /// period counted from the anchor's own (year, month).
    ///
    /// # Errors
    ///
    /// Returns [`CalError::DateOutOfRange`] if the shift leaves the
    /// representable date range.
    pub fn shift_start_back(
        self,
        anchor: NaiveDateTime,
        count: u32,
        rules: &CalendarRules,
    ) -> Result<NaiveDateTime> {
        let n = i64::from(count);
        match self {
            TimeUnit::Minute => checked_sub(anchor, Duration::minutes(n)),
            TimeUnit::Hour => checked_sub(anchor, Duration::hours(n)),
            TimeUnit::Day => checked_sub(anchor, Duration::days(n)),
            TimeUnit::Week => checked_sub(anchor, Duration::weeks(n)),
            TimeUnit::Month => {
                let (year, month) = month_index_offset(anchor, -n)?;
                Ok(month_anchor(year, month, rules)?.and_time(NaiveTime::MIN))
            }
            TimeUnit::Quarter => {
                let (year, first_month) = quarter_index_offset(anchor, -n)?;
                Ok(month_anchor(year, first_month, rules)?.and_time(NaiveTime::MIN))
            }
            TimeUnit::Year => {
                let year = year_offset(anchor, -n)?;
                Ok(month_anchor(year, 1, rules)?.and_time(NaiveTime::MIN))
            }
        }
    }

    /// Move a span end forward by `count` units, returning the new end.
    ///
    /// Fixed-duration units add to the anchor directly; month and
    /// quarter re-resolve the end of the target broadcast period, and
    /// year re-resolves the target broadcast year's end.
    ///
    /// # Errors
    ///
    /// Returns [`CalError::DateOutOfRange`] if the shift leaves the
    /// representable date range.
    pub fn shift_end_forward(
        self,
        anchor: NaiveDateTime,
        count: u32,
        rules: &CalendarRules,
    ) -> Result<NaiveDateTime> {
        let n = i64::from(count);
        match self {
            TimeUnit::Minute => checked_add(anchor, Duration::minutes(n)),
            TimeUnit::Hour => checked_add(anchor, Duration::hours(n)),
            TimeUnit::Day => checked_add(anchor, Duration::days(n)),
            TimeUnit::Week => checked_add(anchor, Duration::weeks(n)),
            TimeUnit::Month => {
                let (year, month) = month_index_offset(anchor, n)?;
                let target = first_of_month(year, month)?.and_time(NaiveTime::MIN);
                Ok(broadcast_month(target, rules)?.end)
            }
            TimeUnit::Quarter => {
                let (year, first_month) = quarter_index_offset(anchor, n)?;
                let target = first_of_month(year, first_month)?.and_time(NaiveTime::MIN);
                Ok(broadcast_quarter(target, rules)?.end)
            }
            TimeUnit::Year => {
                let next_year = year_offset(anchor, n + 1)?;
                let next_start = month_anchor(next_year, 1, rules)?;
                Ok(next_start.and_time(rules.day_end()))
            }
        }
    }
}

impl FromStr for TimeUnit {
    type Err = CalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "minute" | "minutes" | "min" | "mins" => Ok(TimeUnit::Minute),
            "hour" | "hours" | "hr" | "hrs" => Ok(TimeUnit::Hour),
            "day" | "days" => Ok(TimeUnit::Day),
            "week" | "weeks" | "wk" | "wks" => Ok(TimeUnit::Week),
            "month" | "months" => Ok(TimeUnit::Month),
            "quarter" | "quarters" => Ok(TimeUnit::Quarter),
            "year" | "years" => Ok(TimeUnit::Year),
            _ => Err(CalError::InvalidUnit(s.to_string())),
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeUnit::Minute => "minute",
            TimeUnit::Hour => "hour",
            TimeUnit::Day => "day",
            TimeUnit::Week => "week",
            TimeUnit::Month => "month",
            TimeUnit::Quarter => "quarter",
            TimeUnit::Year => "year",
        };
        f.write_str(name)
    }
}

// ── Index arithmetic ────────────────────────────────────────────────────────

/// (year, month) of the calendar month `offset` months from the
/// anchor's month, with carry/borrow across year boundaries.
fn month_index_offset(anchor: NaiveDateTime, offset: i64) -> Result<(i32, u32)> {
    let index = i64::from(anchor.year()) * 12 + i64::from(anchor.month0()) + offset;
    let year = i32::try_from(index.div_euclid(12)).map_err(|_| out_of_range("month shift"))?;
    let month = index.rem_euclid(12) as u32 + 1;
    Ok((year, month))
}

/// (year, first month) of the quarter `offset` quarters from the
/// anchor's quarter.
fn quarter_index_offset(anchor: NaiveDateTime, offset: i64) -> Result<(i32, u32)> {
    let quarter = i64::from(anchor.month0()) / 3;
    let index = i64::from(anchor.year()) * 4 + quarter + offset;
    let year = i32::try_from(index.div_euclid(4)).map_err(|_| out_of_range("quarter shift"))?;
    let first_month = index.rem_euclid(4) as u32 * 3 + 1;
    Ok((year, first_month))
}

fn year_offset(anchor: NaiveDateTime, offset: i64) -> Result<i32> {
    i32::try_from(i64::from(anchor.year()) + offset).map_err(|_| out_of_range("year shift"))
}

fn checked_add(anchor: NaiveDateTime, delta: Duration) -> Result<NaiveDateTime> {
    anchor
        .checked_add_signed(delta)
        .ok_or_else(|| out_of_range("shifted end"))
}

fn checked_sub(anchor: NaiveDateTime, delta: Duration) -> Result<NaiveDateTime> {
    anchor
        .checked_sub_signed(delta)
        .ok_or_else(|| out_of_range("shifted start"))
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rules() -> CalendarRules {
        CalendarRules::default()
    }

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    // ── current_span tests ──────────────────────────────────────────────

    #[test]
    fn test_current_minute_truncates_seconds() {
        let reference = NaiveDate::from_ymd_opt(2026, 2, 18)
            .unwrap()
            .and_hms_opt(14, 30, 45)
            .unwrap();
        let span = TimeUnit::Minute.current_span(reference, &rules()).unwrap();
        assert_eq!(span.start, dt(2026, 2, 18, 14, 30));
        assert_eq!(span.end.to_string(), "2026-02-18 14:30:59.999");
    }

    #[test]
    fn test_current_hour_truncates_minutes() {
        let span = TimeUnit::Hour
            .current_span(dt(2026, 2, 18, 14, 30), &rules())
            .unwrap();
        assert_eq!(span.start, dt(2026, 2, 18, 14, 0));
        assert_eq!(span.end.to_string(), "2026-02-18 14:59:59.999");
    }

    #[test]
    fn test_current_day_after_day_start() {
        let span = TimeUnit::Day
            .current_span(dt(2026, 2, 18, 14, 30), &rules())
            .unwrap();
        assert_eq!(span.start, dt(2026, 2, 18, 6, 0));
        assert_eq!(span.end.to_string(), "2026-02-19 05:59:59.999");
    }

    #[test]
    fn test_current_day_before_day_start() {
        // 03:00 belongs to the previous broadcast day.
        let span = TimeUnit::Day
            .current_span(dt(2026, 2, 18, 3, 0), &rules())
            .unwrap();
        assert_eq!(span.start, dt(2026, 2, 17, 6, 0));
        assert_eq!(span.end.to_string(), "2026-02-18 05:59:59.999");
    }

    #[test]
    fn test_current_week_delegates_to_resolver() {
        // Friday, March 1, 2024
        let span = TimeUnit::Week
            .current_span(dt(2024, 3, 1, 10, 0), &rules())
            .unwrap();
        assert_eq!(span.start, dt(2024, 2, 26, 0, 0));
        assert_eq!(span.end.to_string(), "2024-03-03 23:59:59.999");
    }

    #[test]
    fn test_current_month_in_carry_window() {
        // February 18, 2026 already belongs to broadcast March (both
        // February 1 and March 1, 2026 are Sundays).
        let span = TimeUnit::Month
            .current_span(dt(2026, 2, 18, 14, 30), &rules())
            .unwrap();
        assert_eq!(span.start, dt(2026, 2, 16, 0, 0));
        assert_eq!(span.end, dt(2026, 3, 31, 0, 0));
    }

    #[test]
    fn test_current_year_spans_broadcast_anchors() {
        // January 1, 2025 is a Wednesday (anchor December 30, 2024);
        // January 1, 2026 is a Thursday (anchor December 29, 2025).
        let span = TimeUnit::Year
            .current_span(dt(2025, 6, 15, 12, 0), &rules())
            .unwrap();
        assert_eq!(span.start, dt(2024, 12, 30, 0, 0));
        assert_eq!(span.end.to_string(), "2025-12-29 05:59:59.999");
    }

    #[test]
    fn test_current_year_with_monday_january_first() {
        // January 1, 2024 is a Monday, so the year starts on it.
        let span = TimeUnit::Year
            .current_span(dt(2024, 6, 15, 12, 0), &rules())
            .unwrap();
        assert_eq!(span.start, dt(2024, 1, 1, 0, 0));
        assert_eq!(span.end.to_string(), "2024-12-30 05:59:59.999");
    }

    // ── shift tests ─────────────────────────────────────────────────────

    #[test]
    fn test_shift_week_back_is_fixed_duration() {
        let shifted = TimeUnit::Week
            .shift_start_back(dt(2026, 2, 16, 0, 0), 2, &rules())
            .unwrap();
        assert_eq!(shifted, dt(2026, 2, 2, 0, 0));
    }

    #[test]
    fn test_shift_month_back_borrows_across_year() {
        // Two months before February 2026 is December 2025, whose
        // anchor is Monday December 1.
        let shifted = TimeUnit::Month
            .shift_start_back(dt(2026, 2, 16, 0, 0), 2, &rules())
            .unwrap();
        assert_eq!(shifted, dt(2025, 12, 1, 0, 0));
    }

    #[test]
    fn test_shift_month_forward_resolves_broadcast_end() {
        // One month after March 2025 is April 2025: anchor March 31,
        // next anchor April 28, so the end is April 27 at the last
        // millisecond.
        let shifted = TimeUnit::Month
            .shift_end_forward(dt(2025, 3, 10, 12, 0), 1, &rules())
            .unwrap();
        assert_eq!(shifted.to_string(), "2025-04-27 23:59:59.999");
    }

    #[test]
    fn test_shift_quarter_back_borrows_across_year() {
        // One quarter before Q1 2026 is Q4 2025, anchored at Monday
        // September 29 (October 1, 2025 is a Wednesday).
        let shifted = TimeUnit::Quarter
            .shift_start_back(dt(2026, 2, 16, 0, 0), 1, &rules())
            .unwrap();
        assert_eq!(shifted, dt(2025, 9, 29, 0, 0));
    }

    #[test]
    fn test_shift_year_forward_resolves_broadcast_end() {
        // One year after 2025 is 2026, whose broadcast year ends where
        // 2027's first broadcast month begins: January 1, 2027 is a
        // Friday, anchor Monday December 28, 2026.
        let shifted = TimeUnit::Year
            .shift_end_forward(dt(2025, 6, 15, 12, 0), 1, &rules())
            .unwrap();
        assert_eq!(shifted.to_string(), "2026-12-28 05:59:59.999");
    }

    #[test]
    fn test_shift_year_back_applies_carry_rule() {
        // Two years before 2025 is 2023; January 1, 2023 is a Sunday,
        // so the anchor shifts from December 26 back to December 19,
        // 2022.
        let shifted = TimeUnit::Year
            .shift_start_back(dt(2025, 3, 10, 0, 0), 2, &rules())
            .unwrap();
        assert_eq!(shifted, dt(2022, 12, 19, 0, 0));
    }

    // ── parsing tests ───────────────────────────────────────────────────

    #[test]
    fn test_unit_parses_singular_and_plural() {
        assert_eq!("week".parse::<TimeUnit>().unwrap(), TimeUnit::Week);
        assert_eq!("weeks".parse::<TimeUnit>().unwrap(), TimeUnit::Week);
        assert_eq!("Quarters".parse::<TimeUnit>().unwrap(), TimeUnit::Quarter);
        assert_eq!("mins".parse::<TimeUnit>().unwrap(), TimeUnit::Minute);
    }

    #[test]
    fn test_unknown_unit_is_an_error() {
        let err = "fortnight".parse::<TimeUnit>().unwrap_err().to_string();
        assert!(err.contains("Invalid unit"), "got: {err}");
    }

    #[test]
    fn test_unit_display_round_trips() {
        for unit in TimeUnit::ALL {
            assert_eq!(unit.to_string().parse::<TimeUnit>().unwrap(), unit);
        }
    }
}
