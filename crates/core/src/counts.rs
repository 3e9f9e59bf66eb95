// SPDX-License-Identifier: MIT

//!
//! Per-month article counts over a range of years (the sparkline data)
//!

use crate::{Month, Year, YearRange};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Article counts for the twelve months of one year.  Missing months read
/// as zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MonthCount([u32; 12]);

impl MonthCount {
    pub fn get(&self, month: Month) -> u32 {
        self.0[usize::from(month.value() - 1)]
    }

    pub fn set(&mut self, month: Month, count: u32) {
        self.0[usize::from(month.value() - 1)] = count;
    }

    pub fn max(&self) -> u32 {
        self.0.iter().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Month, u32)> + '_ {
        Month::all().map(|month| (month, self.get(month)))
    }
}

// Serialized as {"1": n, .., "12": n}
impl Serialize for MonthCount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(12))?;
        for (month, count) in self.iter() {
            map.serialize_entry(&month.value().to_string(), &count)?;
        }
        map.end()
    }
}

struct MonthCountVisitor;

impl<'de> Visitor<'de> for MonthCountVisitor {
    type Value = MonthCount;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of month numbers to counts")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut counts = MonthCount::default();
        while let Some((key, count)) = access.next_entry::<String, u32>()? {
            // Months outside 1..=12 are ignored
            let month = key
                .trim()
                .parse::<i64>()
                .ok()
                .and_then(|value| Month::try_from(value).ok());
            if let Some(month) = month {
                counts.set(month, count);
            }
        }
        Ok(counts)
    }
}

impl<'de> Deserialize<'de> for MonthCount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(MonthCountVisitor)
    }
}

/// Counts per year, as returned by one range fetch.  Replaced wholesale on
/// every fetch, never edited.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SparklineDataset(BTreeMap<Year, MonthCount>);

impl SparklineDataset {
    pub fn new(counts: BTreeMap<Year, MonthCount>) -> Self {
        Self(counts)
    }

    /// A dataset holding every year of the range with the given counts, and
    /// zeros for the years not given
    pub fn zero_filled(range: YearRange, counts: impl IntoIterator<Item = (Year, MonthCount)>) -> Self {
        let mut dataset: BTreeMap<Year, MonthCount> =
            range.years().map(|year| (year, MonthCount::default())).collect();
        for (year, count) in counts {
            if let Some(entry) = dataset.get_mut(&year) {
                *entry = count;
            }
        }
        Self(dataset)
    }

    pub fn get(&self, year: Year) -> Option<&MonthCount> {
        self.0.get(&year)
    }

    /// The count for one month, zero if the year isn't loaded
    pub fn count(&self, year: Year, month: Month) -> u32 {
        self.get(year).map(|counts| counts.get(month)).unwrap_or(0)
    }

    /// The largest count of any month of any loaded year
    pub fn max_count(&self) -> u32 {
        self.0.values().map(MonthCount::max).max().unwrap_or(0)
    }

    /// Whether any year strictly after `year` has a non-zero count
    pub fn has_content_after(&self, year: Year) -> bool {
        self.0
            .range((std::ops::Bound::Excluded(year), std::ops::Bound::Unbounded))
            .any(|(_, counts)| counts.total() > 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Year, &MonthCount)> {
        self.0.iter().map(|(year, counts)| (*year, counts))
    }

    pub fn years(&self) -> impl Iterator<Item = Year> + '_ {
        self.0.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Serialized as {"year": MonthCount, ..}
impl Serialize for SparklineDataset {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (year, counts) in &self.0 {
            map.serialize_entry(&year.value().to_string(), counts)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SparklineDataset {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, MonthCount>::deserialize(deserializer)?;
        let mut counts = BTreeMap::new();
        for (key, month_counts) in raw {
            let year: Year = key.parse().map_err(serde::de::Error::custom)?;
            counts.insert(year, month_counts);
        }
        Ok(Self(counts))
    }
}

/// The body of a range-counts response
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RangeCountsResponse {
    pub success: bool,
    #[serde(default)]
    pub data: SparklineDataset,
}
