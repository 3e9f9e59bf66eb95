// SPDX-License-Identifier: MIT

//!
//! Inclusive windows of fictional years
//!

use crate::{DateError, Year};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can arise when building or moving a [`YearRange`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("Start year `{start}` is after end year `{end}`")]
    StartAfterEnd { start: Year, end: Year },

    #[error(transparent)]
    Date(#[from] DateError),
}

/// Paging direction
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Prev,
    Next,
}

/// An inclusive span of years, `start <= end`
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct YearRange {
    start: Year,
    end: Year,
}

impl YearRange {
    pub fn new(start: Year, end: Year) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::StartAfterEnd { start, end });
        }
        Ok(YearRange { start, end })
    }

    pub fn start(&self) -> Year {
        self.start
    }

    pub fn end(&self) -> Year {
        self.end
    }

    pub fn contains(&self, year: Year) -> bool {
        self.start <= year && year <= self.end
    }

    /// Number of years in the range
    pub fn len(&self) -> usize {
        (i64::from(self.end.value()) - i64::from(self.start.value()) + 1) as usize
    }

    /// Never true, a range always holds at least one year
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Every year of the range in ascending order
    pub fn years(&self) -> impl Iterator<Item = Year> + use<> {
        let (start, end) = (self.start.value(), self.end.value());
        (start..=end).filter_map(|value| Year::try_from(i64::from(value)).ok())
    }

    /// The range moved by `by` years in the given direction.  Fails if either
    /// end leaves the representable years.
    pub fn shifted(&self, direction: Direction, by: u32) -> Result<YearRange, RangeError> {
        let delta = match direction {
            Direction::Prev => -i64::from(by),
            Direction::Next => i64::from(by),
        };
        YearRange::new(self.start.checked_add(delta)?, self.end.checked_add(delta)?)
    }
}

#[derive(Deserialize)]
struct RawYearRange {
    start: Year,
    end: Year,
}

impl<'de> Deserialize<'de> for YearRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawYearRange::deserialize(deserializer)?;
        YearRange::new(raw.start, raw.end).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use timeline_calendar_macros::year;

    #[test]
    fn new() {
        assert!(YearRange::new(year!(8), year!(1)).is_err());
        let range = YearRange::new(year!(-2), year!(4)).unwrap();
        assert_eq!(range.len(), 7);
        assert!(range.contains(year!(0)));
        assert!(!range.contains(year!(5)));
        assert_eq!(YearRange::new(year!(3), year!(3)).unwrap().len(), 1);
    }

    #[test]
    fn years() {
        let range = YearRange::new(year!(-1), year!(1)).unwrap();
        assert_eq!(range.years().collect::<Vec<_>>(), [year!(-1), year!(0), year!(1)]);
    }

    #[test]
    fn shifted() {
        let range = YearRange::new(year!(1), year!(7)).unwrap();
        let next = range.shifted(Direction::Next, 7).unwrap();
        assert_eq!((next.start(), next.end()), (year!(8), year!(14)));
        let prev = next.shifted(Direction::Prev, 7).unwrap();
        assert_eq!(prev, range);

        let edge = YearRange::new(year!(9990), year!(9996)).unwrap();
        assert!(edge.shifted(Direction::Next, 7).is_err());
    }

    #[test]
    fn direction_wire_format() {
        assert_eq!(serde_json::to_string(&Direction::Prev).unwrap(), r#""prev""#);
        assert_eq!(serde_json::from_str::<Direction>(r#""next""#).unwrap(), Direction::Next);
    }

    #[test]
    fn deserialize() {
        assert!(serde_json::from_str::<YearRange>(r#"{"start": 4, "end": 2}"#).is_err());
        let range: YearRange = serde_json::from_str(r#"{"start": -2, "end": 2}"#).unwrap();
        assert_eq!(range.len(), 5);
    }
}
