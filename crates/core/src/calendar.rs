// SPDX-License-Identifier: MIT

//!
//! Fictional calendar arithmetic.
//!
//! Fictional years are anchored to real years only so that each day can be
//! given a day of the week.  Year 1 is the policy's reference year.
//!

use crate::{Day, Month, Year, YearPolicy};
use chrono::{Datelike, Days, NaiveDate};

pub use chrono::Weekday;

/// Month lengths.  February never has a 29th.
const MONTH_LENGTHS: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// The real year a fictional year maps to.  Independent of whether year zero
/// or negative years are allowed.
pub fn real_year(year: Year, policy: &YearPolicy) -> i32 {
    policy.reference_year() + (year.value() - 1)
}

/// The day of the week of a fictional date (proleptic Gregorian).
///
/// Days past the real end of the month roll over into the next month.
pub fn day_of_week(year: Year, month: Month, day: Day, policy: &YearPolicy) -> Weekday {
    let first =
        NaiveDate::from_ymd_opt(real_year(year, policy), u32::from(month.value()), 1);
    let date = first.and_then(|first| first.checked_add_days(Days::new(u64::from(day.value() - 1))));
    match date {
        Some(date) => date.weekday(),
        // Both the year and the reference year are bounded to +/- 9999
        None => unreachable!("real year is always representable"),
    }
}

/// The day of the week the month starts on
pub fn first_day_of_week(year: Year, month: Month, policy: &YearPolicy) -> Weekday {
    day_of_week(year, month, Day::FIRST, policy)
}

/// The number of days shown for the month
pub fn days_in_month(month: Month) -> u8 {
    MONTH_LENGTHS[usize::from(month.value() - 1)]
}

/// Whether the year may be shown or navigated to under the policy
pub fn is_year_allowed(year: Year, policy: &YearPolicy) -> bool {
    policy.is_year_allowed(year)
}

/// The lowest year navigation may reach under the policy
pub fn min_allowed_year(policy: &YearPolicy) -> Year {
    policy.min_allowed_year()
}

/// The year shown when nothing else is known
pub fn default_year(policy: &YearPolicy) -> Year {
    policy.default_year()
}

/// e.g. "August"
pub fn month_name(month: Month) -> &'static str {
    MONTH_NAMES[usize::from(month.value() - 1)]
}

/// e.g. "Aug"
pub fn month_abbreviation(month: Month) -> &'static str {
    &month_name(month)[..3]
}

#[cfg(test)]
mod test {
    use super::*;
    use timeline_calendar_macros::{day, month, year};

    fn policy() -> YearPolicy {
        YearPolicy::default()
    }

    #[test]
    fn real_year_mapping() {
        let policy = policy();
        assert_eq!(real_year(year!(1), &policy), policy.reference_year());
        for value in -50_i64..50 {
            let this = Year::try_from(value).unwrap();
            let next = Year::try_from(value + 1).unwrap();
            assert_eq!(real_year(next, &policy), real_year(this, &policy) + 1);
        }

        // The flags don't change the arithmetic
        let permissive = YearPolicy::new(1989, true, true).unwrap();
        assert_eq!(real_year(year!(-3), &permissive), real_year(year!(-3), &policy));
    }

    #[test]
    fn known_weekdays() {
        let policy = policy();
        // Year 1 is 1989; 1 Jan 1989 was a Sunday
        assert_eq!(day_of_week(year!(1), month!(1), day!(1), &policy), Weekday::Sun);
        // Year 3 is 1991; 15 Aug 1991 was a Thursday
        assert_eq!(day_of_week(year!(3), month!(8), day!(15), &policy), Weekday::Thu);
        // Year 0 is 1988 (a leap year); 1 Mar 1988 was a Tuesday
        assert_eq!(day_of_week(year!(0), month!(3), day!(1), &policy), Weekday::Tue);
        // Year -1 is 1987; 1 Jan 1987 was a Thursday
        assert_eq!(day_of_week(year!(-1), month!(1), day!(1), &policy), Weekday::Thu);
    }

    #[test]
    fn day_of_week_is_deterministic() {
        let policy = policy();
        for year_value in [-9999_i64, -2, 0, 1, 7, 9999] {
            let year = Year::try_from(year_value).unwrap();
            for month in Month::all() {
                let first = day_of_week(year, month, Day::FIRST, &policy);
                assert_eq!(first, day_of_week(year, month, Day::FIRST, &policy));
                assert_eq!(first_day_of_week(year, month, &policy), first);
            }
        }
    }

    #[test]
    fn day_past_month_end_rolls_over() {
        let policy = policy();
        // 31 Apr is 1 May
        assert_eq!(
            day_of_week(year!(3), month!(4), day!(31), &policy),
            day_of_week(year!(3), month!(5), day!(1), &policy)
        );
    }

    // February is never lengthened, even when the real year is a leap year
    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(month!(2)), 28);
        assert_eq!(days_in_month(month!(4)), 30);
        assert_eq!(days_in_month(month!(1)), 31);
        assert_eq!(Month::all().map(|m| u32::from(days_in_month(m))).sum::<u32>(), 365);
    }

    #[test]
    fn names() {
        assert_eq!(month_name(month!(8)), "August");
        assert_eq!(month_abbreviation(month!(9)), "Sep");
    }
}
