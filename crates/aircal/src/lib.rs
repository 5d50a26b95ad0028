//! # aircal
//!
//! Deterministic broadcast-calendar computation.
//!
//! Broadcast schedules do not follow the civil calendar: a broadcast
//! day runs 06:00 to 05:59:59.999 the next day, weeks run Monday
//! through Sunday, and months, quarters, and years are realigned to
//! whole broadcast weeks. This crate resolves instants against those
//! conventions and computes date ranges from user selections —
//! explicit bounds ("between", "on", "before", "after"), relative
//! offsets ("last/next N units"), and named periods ("current
//! quarter").
//!
//! Everything is a pure function of its inputs: the caller supplies the
//! "now" anchor, and resolvers never read a clock or mutate a value in
//! place.
//!
//! ## Modules
//!
//! - [`calendar`] — broadcast day adjustment and week/month/quarter resolution
//! - [`units`] — per-unit spans and directional shift arithmetic
//! - [`range`] — relative ranges and selection-mode dispatch
//! - [`input`] — date/time field combination and rendering helpers
//! - [`rules`] — day-start and week-start conventions
//! - [`error`] — error types
//!
//! ## Example
//!
//! ```
//! use aircal::{resolve_range, CalendarRules, RangeMode, RangeSelection, TimeUnit};
//! use chrono::NaiveDate;
//!
//! let rules = CalendarRules::default();
//! // Friday, March 1, 2024
//! let now = NaiveDate::from_ymd_opt(2024, 3, 1)
//!     .unwrap()
//!     .and_hms_opt(10, 0, 0)
//!     .unwrap();
//!
//! let mut selection = RangeSelection::new(RangeMode::Current);
//! selection.unit = Some(TimeUnit::Week);
//!
//! let range = resolve_range(&selection, now, &rules).unwrap();
//! assert_eq!(range.start.unwrap().to_string(), "2024-02-26 00:00:00");
//! assert_eq!(range.end.unwrap().to_string(), "2024-03-03 23:59:59.999");
//! ```

pub mod calendar;
pub mod error;
pub mod input;
pub mod range;
pub mod rules;
pub mod units;

pub use calendar::{
    adjust_for_broadcast_day, broadcast_date_info, broadcast_month, broadcast_quarter,
    broadcast_week, BroadcastDateInfo, BroadcastMonth, BroadcastQuarter, BroadcastWeek,
};
pub use error::{CalError, Result};
pub use input::{combine_date_time, format_date_time, time_options, weekday_name};
pub use range::{relative_span, resolve_range, DateRange, Direction, RangeMode, RangeSelection};
pub use rules::CalendarRules;
pub use units::{TimeUnit, UnitSpan};
