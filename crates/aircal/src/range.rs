//! Relative date ranges and selection-mode dispatch.
//!
//! [`relative_span`] turns "last/next N units" into concrete bounds by
//! composing the per-unit span arithmetic in [`crate::units`].
//! [`resolve_range`] is the top-level entry point: it maps a
//! [`RangeSelection`] (mode plus whichever inputs the mode needs) to a
//! [`DateRange`]. Both take an explicit "now" anchor — no system clock
//! is read anywhere in this crate, keeping every resolution
//! deterministic and reproducible.
//!
//! Incomplete input for the active mode yields a [`DateRange`] with
//! unset fields; it is a recoverable state the caller renders as
//! "not set", never an error.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, Duration, NaiveDateTime};
use serde::Serialize;

use crate::calendar::{adjust_for_broadcast_day, out_of_range};
use crate::error::{CalError, Result};
use crate::rules::CalendarRules;
use crate::units::{TimeUnit, UnitSpan};

// ── Selection model ─────────────────────────────────────────────────────────

/// Whether a relative range extends into the past or the future.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Past,
    Future,
}

/// How the caller wants the range interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeMode {
    /// Everything between two instants, in either input order.
    Between,
    /// The full broadcast day containing one instant.
    On,
    /// Everything up to one instant.
    Before,
    /// Everything from one instant on.
    After,
    /// The last N units relative to now.
    Last,
    /// The next N units relative to now.
    Next,
    /// The unit containing now.
    Current,
}

impl FromStr for RangeMode {
    type Err = CalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "between" => Ok(RangeMode::Between),
            "on" => Ok(RangeMode::On),
            "before" => Ok(RangeMode::Before),
            "after" => Ok(RangeMode::After),
            "last" => Ok(RangeMode::Last),
            "next" => Ok(RangeMode::Next),
            "current" => Ok(RangeMode::Current),
            _ => Err(CalError::InvalidMode(s.to_string())),
        }
    }
}

impl fmt::Display for RangeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RangeMode::Between => "between",
            RangeMode::On => "on",
            RangeMode::Before => "before",
            RangeMode::After => "after",
            RangeMode::Last => "last",
            RangeMode::Next => "next",
            RangeMode::Current => "current",
        };
        f.write_str(name)
    }
}

/// The full set of inputs a presentation layer supplies. Fields not
/// used by the active mode are ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeSelection {
    pub mode: RangeMode,
    pub date_time1: Option<NaiveDateTime>,
    pub date_time2: Option<NaiveDateTime>,
    pub unit: Option<TimeUnit>,
    pub count: Option<u32>,
    pub include_current: bool,
}

impl RangeSelection {
    /// A selection with the given mode and no other inputs.
    pub fn new(mode: RangeMode) -> Self {
        RangeSelection {
            mode,
            date_time1: None,
            date_time2: None,
            unit: None,
            count: None,
            include_current: false,
        }
    }
}

/// The resolved range. Either field may be unset when the selection
/// was missing inputs required by its mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl DateRange {
    /// Whether both bounds are set.
    pub fn is_resolved(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }
}

// ── Relative ranges ─────────────────────────────────────────────────────────

/// Compute the span of the last/next `count` units relative to
/// `reference`.
///
/// With `include_current` the current unit is part of the result: the
/// near bound stays at the current unit's bound and the far bound moves
/// `count` units out. Without it the range abuts the current unit: the
/// near bound is one millisecond outside the current unit and the far
/// bound moves `count` units out from there. `count == 1` with
/// `include_current` collapses to the current unit's own span.
///
/// The millisecond-stepped anchors are used as-is; they are not
/// re-adjusted for the broadcast day after the step.
///
/// # Errors
///
/// Returns [`CalError::InvalidCount`] for a zero count and
/// [`CalError::DateOutOfRange`] if the shift leaves the representable
/// date range.
pub fn relative_span(
    reference: NaiveDateTime,
    unit: TimeUnit,
    count: u32,
    direction: Direction,
    include_current: bool,
    rules: &CalendarRules,
) -> Result<UnitSpan> {
    if count == 0 {
        return Err(CalError::InvalidCount(
            "count must be a positive integer".to_string(),
        ));
    }

    let current = unit.current_span(reference, rules)?;
    if count == 1 && include_current {
        return Ok(current);
    }

    match (direction, include_current) {
        (Direction::Past, true) => Ok(UnitSpan {
            start: unit.shift_start_back(current.start, count, rules)?,
            end: current.end,
        }),
        (Direction::Future, true) => Ok(UnitSpan {
            start: current.start,
            end: unit.shift_end_forward(current.end, count, rules)?,
        }),
        (Direction::Past, false) => {
            let boundary = current
                .start
                .checked_sub_signed(Duration::milliseconds(1))
                .ok_or_else(|| out_of_range("range end"))?;
            Ok(UnitSpan {
                start: unit.shift_start_back(boundary, count, rules)?,
                end: boundary,
            })
        }
        (Direction::Future, false) => {
            let boundary = current
                .end
                .checked_add_signed(Duration::milliseconds(1))
                .ok_or_else(|| out_of_range("range start"))?;
            Ok(UnitSpan {
                start: boundary,
                end: unit.shift_end_forward(boundary, count, rules)?,
            })
        }
    }
}

// ── Mode dispatch ───────────────────────────────────────────────────────────

/// Resolve a selection into a concrete range.
///
/// `now` anchors the relative modes; the caller supplies it (typically
/// the wall clock, or a fixed instant for reproducible output).
///
/// # Examples
///
/// ```
/// use aircal::{resolve_range, CalendarRules, RangeMode, RangeSelection};
/// use chrono::NaiveDate;
///
/// let rules = CalendarRules::default();
/// let now = NaiveDate::from_ymd_opt(2024, 5, 12)
///     .unwrap()
///     .and_hms_opt(12, 0, 0)
///     .unwrap();
///
/// let mut selection = RangeSelection::new(RangeMode::On);
/// selection.date_time1 = NaiveDate::from_ymd_opt(2024, 5, 10)
///     .unwrap()
///     .and_hms_opt(10, 0, 0);
///
/// let range = resolve_range(&selection, now, &rules).unwrap();
/// assert_eq!(range.start.unwrap().to_string(), "2024-05-10 06:00:00");
/// assert_eq!(range.end.unwrap().to_string(), "2024-05-11 05:59:59.999");
/// ```
///
/// # Errors
///
/// Returns [`CalError::DateOutOfRange`] if resolution leaves the
/// representable date range. Missing inputs are not errors; they yield
/// unset output fields.
pub fn resolve_range(
    selection: &RangeSelection,
    now: NaiveDateTime,
    rules: &CalendarRules,
) -> Result<DateRange> {
    let adjusted1 = selection
        .date_time1
        .map(|dt| adjust_for_broadcast_day(dt, rules));
    let adjusted2 = selection
        .date_time2
        .map(|dt| adjust_for_broadcast_day(dt, rules));

    match selection.mode {
        RangeMode::Between => match (adjusted1, adjusted2) {
            (Some(a), Some(b)) => Ok(DateRange {
                start: Some(a.min(b)),
                end: Some(a.max(b)),
            }),
            _ => Ok(DateRange::default()),
        },
        RangeMode::On => match adjusted1 {
            Some(adjusted) => {
                let end_date = adjusted
                    .date()
                    .checked_add_days(Days::new(1))
                    .ok_or_else(|| out_of_range("day end"))?;
                Ok(DateRange {
                    start: Some(adjusted.date().and_time(rules.day_start)),
                    end: Some(end_date.and_time(rules.day_end())),
                })
            }
            None => Ok(DateRange::default()),
        },
        RangeMode::Before => Ok(DateRange {
            start: adjusted1.map(|_| NaiveDateTime::MIN),
            end: adjusted1,
        }),
        RangeMode::After => Ok(DateRange {
            start: adjusted1,
            end: adjusted1.map(|_| NaiveDateTime::MAX),
        }),
        RangeMode::Last | RangeMode::Next => match (selection.unit, selection.count) {
            (Some(unit), Some(count)) if count > 0 => {
                let direction = if selection.mode == RangeMode::Last {
                    Direction::Past
                } else {
                    Direction::Future
                };
                let anchor = adjust_for_broadcast_day(now, rules);
                let span = relative_span(
                    anchor,
                    unit,
                    count,
                    direction,
                    selection.include_current,
                    rules,
                )?;
                Ok(DateRange {
                    start: Some(span.start),
                    end: Some(span.end),
                })
            }
            _ => Ok(DateRange::default()),
        },
        RangeMode::Current => match selection.unit {
            Some(unit) => {
                let span = unit.current_span(now, rules)?;
                Ok(DateRange {
                    start: Some(span.start),
                    end: Some(span.end),
                })
            }
            None => Ok(DateRange::default()),
        },
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
