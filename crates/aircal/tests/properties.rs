//! Property tests for the calendar invariants that hold at every
//! instant, not just at hand-picked anchors.

use aircal::{
    adjust_for_broadcast_day, broadcast_month, broadcast_quarter, broadcast_week, relative_span,
    resolve_range, CalendarRules, Direction, RangeMode, RangeSelection, TimeUnit,
};
use chrono::{Datelike, Days, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use proptest::prelude::*;

/// Arbitrary instants across several decades, minute/second resolution.
fn any_instant() -> impl Strategy<Value = NaiveDateTime> {
    (0u64..20_000, 0u32..24, 0u32..60, 0u32..60).prop_map(|(days, hour, minute, second)| {
        NaiveDate::from_ymd_opt(1990, 1, 1)
            .unwrap()
            .checked_add_days(Days::new(days))
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    })
}

proptest! {
    #[test]
    fn day_adjustment_shifts_back_iff_before_day_start(instant in any_instant()) {
        let rules = CalendarRules::default();
        let adjusted = adjust_for_broadcast_day(instant, &rules);

        prop_assert_eq!(adjusted.time(), instant.time());
        if instant.time() < rules.day_start {
            prop_assert_eq!(adjusted.date(), instant.date().pred_opt().unwrap());
        } else {
            prop_assert_eq!(adjusted.date(), instant.date());
        }
    }

    #[test]
    fn week_spans_seven_days_starting_monday(instant in any_instant()) {
        let rules = CalendarRules::default();
        let week = broadcast_week(instant, &rules).unwrap();

        prop_assert_eq!(week.start.weekday(), rules.week_start);
        prop_assert_eq!(week.start.time(), NaiveTime::MIN);
        prop_assert_eq!(
            week.end.signed_duration_since(week.start),
            Duration::days(7) - Duration::milliseconds(1)
        );
    }

    #[test]
    fn same_week_resolves_to_same_span(
        instant in any_instant(),
        offset in 0u64..7,
        hour in 0u32..24,
        minute in 0u32..60,
    ) {
        let rules = CalendarRules::default();
        let week = broadcast_week(instant, &rules).unwrap();

        let sibling = week
            .start
            .date()
            .checked_add_days(Days::new(offset))
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap();
        prop_assert_eq!(broadcast_week(sibling, &rules).unwrap(), week);
    }

    #[test]
    fn month_starts_on_week_start_at_midnight(instant in any_instant()) {
        let rules = CalendarRules::default();
        let month = broadcast_month(instant, &rules).unwrap();

        prop_assert_eq!(month.start.weekday(), rules.week_start);
        prop_assert_eq!(month.start.time(), NaiveTime::MIN);
        prop_assert!(month.start < month.end);
    }

    #[test]
    fn quarter_starts_where_its_first_month_starts(instant in any_instant()) {
        let rules = CalendarRules::default();
        let quarter = broadcast_quarter(instant, &rules).unwrap();

        let first_month = (instant.month() - 1) / 3 * 3 + 1;
        let first = NaiveDate::from_ymd_opt(instant.year(), first_month, 1)
            .unwrap()
            .and_time(NaiveTime::MIN);
        prop_assert_eq!(quarter.start, broadcast_month(first, &rules).unwrap().start);
    }

    #[test]
    fn single_unit_including_current_is_the_current_span(instant in any_instant()) {
        let rules = CalendarRules::default();

        for unit in TimeUnit::ALL {
            let current = unit.current_span(instant, &rules).unwrap();
            for direction in [Direction::Past, Direction::Future] {
                let relative =
                    relative_span(instant, unit, 1, direction, true, &rules).unwrap();
                prop_assert_eq!(relative, current);
            }
        }
    }

    #[test]
    fn between_output_is_ordered(first in any_instant(), second in any_instant()) {
        let rules = CalendarRules::default();
        let mut selection = RangeSelection::new(RangeMode::Between);
        selection.date_time1 = Some(first);
        selection.date_time2 = Some(second);

        let range = resolve_range(&selection, first, &rules).unwrap();
        prop_assert!(range.start.unwrap() <= range.end.unwrap());
    }

    #[test]
    fn relative_spans_are_ordered(
        instant in any_instant(),
        count in 1u32..60,
        include in any::<bool>(),
    ) {
        let rules = CalendarRules::default();
        for unit in TimeUnit::ALL {
            for direction in [Direction::Past, Direction::Future] {
                let span =
                    relative_span(instant, unit, count, direction, include, &rules).unwrap();
                prop_assert!(span.start < span.end);
            }
        }
    }
}
