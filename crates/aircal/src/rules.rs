//! Calendar conventions shared by every resolver.
//!
//! Broadcast calendars deviate from the civil calendar in two ways: the
//! day changes over at a fixed wall-clock time (06:00 in the standard
//! convention, not midnight), and weeks start on Monday. Both are carried
//! in an explicit [`CalendarRules`] value passed to every resolver, so
//! alternate conventions can be exercised without touching the
//! resolution code.

use chrono::{Duration, NaiveTime, Weekday};

/// Day-start and week-start conventions for one calendar.
///
/// The default is the standard broadcast calendar: days run 06:00 to
/// 05:59:59.999 the next civil day, weeks run Monday through Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarRules {
    /// Wall-clock time at which a broadcast day begins.
    pub day_start: NaiveTime,
    /// Weekday on which a broadcast week begins.
    pub week_start: Weekday,
}

impl Default for CalendarRules {
    fn default() -> Self {
        CalendarRules {
            day_start: NaiveTime::from_hms_opt(6, 0, 0).unwrap_or(NaiveTime::MIN),
            week_start: Weekday::Mon,
        }
    }
}

impl CalendarRules {
    /// Build rules with an explicit day start and week start.
    pub fn new(day_start: NaiveTime, week_start: Weekday) -> Self {
        CalendarRules {
            day_start,
            week_start,
        }
    }

    /// How many days `weekday` is from the week-start day.
    ///
    /// Under the default Monday start this maps Monday to 0 and Sunday
    /// to 6, regardless of the Sunday=0 numbering some sources use.
    pub fn days_from_week_start(&self, weekday: Weekday) -> u32 {
        (weekday.num_days_from_monday() + 7 - self.week_start.num_days_from_monday()) % 7
    }

    /// The last wall-clock millisecond of a broadcast day.
    ///
    /// 05:59:59.999 under the default rules. Subtraction on `NaiveTime`
    /// wraps around midnight, so a midnight day start yields
    /// 23:59:59.999.
    pub fn day_end(&self) -> NaiveTime {
        self.day_start - Duration::milliseconds(1)
    }

    /// The weekday that triggers the month carry rule: the last day of
    /// the broadcast week (Sunday under the default rules).
    pub(crate) fn carry_weekday(&self) -> Weekday {
        self.week_start.pred()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = CalendarRules::default();
        assert_eq!(rules.day_start, NaiveTime::from_hms_opt(6, 0, 0).unwrap());
        assert_eq!(rules.week_start, Weekday::Mon);
    }

    #[test]
    fn test_days_from_week_start_monday_convention() {
        let rules = CalendarRules::default();
        assert_eq!(rules.days_from_week_start(Weekday::Mon), 0);
        assert_eq!(rules.days_from_week_start(Weekday::Wed), 2);
        assert_eq!(rules.days_from_week_start(Weekday::Sat), 5);
        assert_eq!(rules.days_from_week_start(Weekday::Sun), 6);
    }

    #[test]
    fn test_days_from_week_start_sunday_convention() {
        let rules = CalendarRules::new(NaiveTime::from_hms_opt(6, 0, 0).unwrap(), Weekday::Sun);
        assert_eq!(rules.days_from_week_start(Weekday::Sun), 0);
        assert_eq!(rules.days_from_week_start(Weekday::Mon), 1);
        assert_eq!(rules.days_from_week_start(Weekday::Sat), 6);
    }

    #[test]
    fn test_day_end_is_one_millisecond_before_day_start() {
        let rules = CalendarRules::default();
        assert_eq!(
            rules.day_end(),
            NaiveTime::from_hms_milli_opt(5, 59, 59, 999).unwrap()
        );
    }

    #[test]
    fn test_day_end_wraps_for_midnight_day_start() {
        let rules = CalendarRules::new(NaiveTime::MIN, Weekday::Mon);
        assert_eq!(
            rules.day_end(),
            NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap()
        );
    }

    #[test]
    fn test_carry_weekday_precedes_week_start() {
        assert_eq!(CalendarRules::default().carry_weekday(), Weekday::Sun);
        let sunday_rules =
            CalendarRules::new(NaiveTime::from_hms_opt(6, 0, 0).unwrap(), Weekday::Sun);
        assert_eq!(sunday_rules.carry_weekday(), Weekday::Sat);
    }
}
