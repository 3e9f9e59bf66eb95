// SPDX-License-Identifier: MIT

//!
//! The fictional date types
//!

use crate::days_in_month;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// The minimum fictional year the calendar can represent
pub const MIN_YEAR: i64 = -9999;

/// The maximum fictional year the calendar can represent
pub const MAX_YEAR: i64 = 9999;

/// Errors that can arise in relation to a [`FictionalDate`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// The day number is not allowed (must be 1 <= day <= 31)
    #[error("Day `{0}` is not allowed")]
    InvalidDay(i64),

    /// The month number is not allowed (must be 1 <= month <= 12)
    #[error("Month `{0}` is not allowed")]
    InvalidMonth(i64),

    /// The year is not allowed (must be [`MIN_YEAR`] <= year <= [`MAX_YEAR`])
    #[error("Year `{0}` is not allowed")]
    InvalidYear(i64),

    /// The day does not exist in the month (e.g. 30th of February)
    #[error("Day `{day}` does not exist in month `{month}`")]
    DayNotInMonth { day: u8, month: u8 },

    /// The text is not a whole number
    #[error("`{0}` is not a year")]
    NotAYear(String),
}

/// A date in the fictional calendar.
///
/// The day is guaranteed to exist in the month according to
/// [`days_in_month`], which never has a 29th of February.
#[derive(Serialize, PartialEq, Eq, Clone, Copy, Debug, Hash, PartialOrd, Ord)]
pub struct FictionalDate {
    year: Year,
    month: Month,
    day: Day,
}

/// The day of a month
#[rustfmt::skip]
#[derive(derive_more::Display, Serialize, Eq, PartialEq, Clone, Copy, Debug, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
pub struct Day(u8);

/// A month number (1 = January)
#[rustfmt::skip]
#[derive(derive_more::Display, Serialize, Eq, PartialEq, Clone, Copy, Debug, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
pub struct Month(u8);

/// A fictional year.  May be zero or negative; whether those are shown is a
/// matter for the [`crate::YearPolicy`], not for this type.
#[rustfmt::skip]
#[derive(derive_more::Display, Serialize, Eq, PartialEq, Clone, Copy, Debug, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
pub struct Year(i32);

impl Day {
    pub const FIRST: Day = Day(1);

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Month {
    pub const JANUARY: Month = Month(1);
    pub const DECEMBER: Month = Month(12);

    pub fn value(&self) -> u8 {
        self.0
    }

    /// All twelve months in order
    pub fn all() -> impl Iterator<Item = Month> {
        (1..=12).map(Month)
    }

    /// The previous month, and whether the year wrapped
    pub fn pred_wrapping(&self) -> (Month, bool) {
        if self.0 == 1 {
            (Month::DECEMBER, true)
        } else {
            (Month(self.0 - 1), false)
        }
    }

    /// The next month, and whether the year wrapped
    pub fn succ_wrapping(&self) -> (Month, bool) {
        if self.0 == 12 {
            (Month::JANUARY, true)
        } else {
            (Month(self.0 + 1), false)
        }
    }
}

impl Year {
    pub const ZERO: Year = Year(0);
    pub const ONE: Year = Year(1);

    pub fn value(&self) -> i32 {
        self.0
    }

    pub fn min() -> Self {
        Year(MIN_YEAR as i32)
    }

    pub fn max() -> Self {
        Year(MAX_YEAR as i32)
    }

    /// Add a (possibly negative) number of years, if the result is in range
    pub fn checked_add(&self, years: i64) -> Result<Year, DateError> {
        Year::try_from(i64::from(self.0) + years)
    }
}

impl TryFrom<i64> for Day {
    type Error = DateError;
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (1..=31).contains(&value) {
            Ok(Day(value as u8))
        } else {
            Err(DateError::InvalidDay(value))
        }
    }
}

impl TryFrom<i64> for Month {
    type Error = DateError;
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (1..=12).contains(&value) {
            Ok(Month(value as u8))
        } else {
            Err(DateError::InvalidMonth(value))
        }
    }
}

impl TryFrom<i64> for Year {
    type Error = DateError;
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (MIN_YEAR..=MAX_YEAR).contains(&value) {
            Ok(Year(value as i32))
        } else {
            Err(DateError::InvalidYear(value))
        }
    }
}

impl std::str::FromStr for Year {
    type Err = DateError;

    // The article store keeps years as text, so "-2" and " 3" must both work
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| DateError::NotAYear(s.to_string()))?;
        Year::try_from(value)
    }
}

impl<'de> Deserialize<'de> for Day {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = i64::deserialize(deserializer)?;
        Day::try_from(value).map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = i64::deserialize(deserializer)?;
        Month::try_from(value).map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Year {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = i64::deserialize(deserializer)?;
        Year::try_from(value).map_err(serde::de::Error::custom)
    }
}

impl FictionalDate {
    /// Create a new [`FictionalDate`] if the day exists in the month
    pub fn from(year: Year, month: Month, day: Day) -> Result<FictionalDate, DateError> {
        if day.value() > days_in_month(month) {
            return Err(DateError::DayNotInMonth {
                day: day.value(),
                month: month.value(),
            });
        }
        Ok(FictionalDate { year, month, day })
    }

    /// Create a new [`FictionalDate`] from raw integers
    pub fn from_values(year: i64, month: i64, day: i64) -> Result<FictionalDate, DateError> {
        FictionalDate::from(
            Year::try_from(year)?,
            Month::try_from(month)?,
            Day::try_from(day)?,
        )
    }

    /// e.g. "August 15, Year 3"
    pub fn as_long_date_format(&self) -> String {
        format!(
            "{} {}, Year {}",
            crate::month_name(self.month),
            self.day,
            self.year
        )
    }

    pub fn year(&self) -> Year {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn day(&self) -> Day {
        self.day
    }
}

#[derive(Deserialize)]
struct RawFictionalDate {
    year: i64,
    month: i64,
    day: i64,
}

impl<'de> Deserialize<'de> for FictionalDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawFictionalDate::deserialize(deserializer)?;
        FictionalDate::from_values(raw.year, raw.month, raw.day).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use timeline_calendar_macros::{day, month, year};

    #[test]
    fn from() {
        // Should return error
        assert!(FictionalDate::from_values(3, 2, 29).is_err());
        assert!(FictionalDate::from_values(3, 4, 31).is_err());
        assert!(FictionalDate::from_values(99_999, 1, 1).is_err());
        assert!(FictionalDate::from_values(1, 0, 1).is_err());
        assert!(FictionalDate::from_values(1, 13, 32).is_err());

        // Should be ok
        assert!(FictionalDate::from_values(-2, 2, 28).is_ok());
        assert!(FictionalDate::from_values(0, 12, 31).is_ok());
    }

    #[test]
    fn month_wrapping() {
        assert_eq!(month!(1).pred_wrapping(), (month!(12), true));
        assert_eq!(month!(12).succ_wrapping(), (month!(1), true));
        assert_eq!(month!(6).succ_wrapping(), (month!(7), false));
    }

    #[test]
    fn year_from_str() {
        assert_eq!(" -2".parse::<Year>().unwrap(), year!(-2));
        assert!("twelve".parse::<Year>().is_err());
        assert!("10000".parse::<Year>().is_err());
    }

    #[test]
    fn deserialize() {
        let date: FictionalDate =
            serde_json::from_str(r#"{"year": -1, "month": 3, "day": 6}"#).unwrap();
        assert_eq!(date.year(), year!(-1));
        assert_eq!(date.day(), day!(6));
        assert!(serde_json::from_str::<FictionalDate>(r#"{"year":1,"month":2,"day":30}"#).is_err());
    }

    #[test]
    fn long_format() {
        let date = FictionalDate::from_values(3, 8, 15).unwrap();
        assert_eq!(date.as_long_date_format(), "August 15, Year 3");
    }
}
