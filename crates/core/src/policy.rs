// SPDX-License-Identifier: MIT

//!
//! Which fictional years may be displayed and navigated to
//!

use crate::{MAX_YEAR, MIN_YEAR, Year};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// The real year that fictional Year 1 aligns to when no setting is given
pub const DEFAULT_REFERENCE_YEAR: i32 = 1989;

/// Errors that can arise when building a [`YearPolicy`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Reference year `{0}` is not allowed")]
    InvalidReferenceYear(i64),
}

/// The year policy (the calendar settings).
///
/// Loaded once and read-only afterwards.  Only display and navigation are
/// gated by the flags; calendar arithmetic never looks at them.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct YearPolicy {
    reference_year: i32,
    allow_year_zero: bool,
    allow_negative_years: bool,
}

impl Default for YearPolicy {
    fn default() -> Self {
        Self {
            reference_year: DEFAULT_REFERENCE_YEAR,
            allow_year_zero: false,
            allow_negative_years: false,
        }
    }
}

impl YearPolicy {
    /// Create a policy.  The reference year is bounded like fictional years
    /// so that every real year derived from it stays representable.
    pub fn new(
        reference_year: i64,
        allow_year_zero: bool,
        allow_negative_years: bool,
    ) -> Result<Self, PolicyError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&reference_year) {
            return Err(PolicyError::InvalidReferenceYear(reference_year));
        }
        Ok(Self {
            reference_year: reference_year as i32,
            allow_year_zero,
            allow_negative_years,
        })
    }

    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    pub fn allow_year_zero(&self) -> bool {
        self.allow_year_zero
    }

    pub fn allow_negative_years(&self) -> bool {
        self.allow_negative_years
    }

    /// Whether the year may be shown or navigated to
    pub fn is_year_allowed(&self, year: Year) -> bool {
        match year.value() {
            0 => self.allow_year_zero,
            y if y < 0 => self.allow_negative_years,
            _ => true,
        }
    }

    /// The lowest year navigation may reach
    pub fn min_allowed_year(&self) -> Year {
        if self.allow_negative_years {
            Year::min()
        } else if self.allow_year_zero {
            Year::ZERO
        } else {
            Year::ONE
        }
    }

    /// The year shown when nothing else is known
    pub fn default_year(&self) -> Year {
        if self.allow_year_zero {
            Year::ZERO
        } else {
            Year::ONE
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawYearPolicy {
    #[serde(default = "default_reference_year")]
    reference_year: i64,
    #[serde(default)]
    allow_year_zero: bool,
    #[serde(default)]
    allow_negative_years: bool,
}

fn default_reference_year() -> i64 {
    i64::from(DEFAULT_REFERENCE_YEAR)
}

impl<'de> Deserialize<'de> for YearPolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawYearPolicy::deserialize(deserializer)?;
        YearPolicy::new(
            raw.reference_year,
            raw.allow_year_zero,
            raw.allow_negative_years,
        )
        .map_err(serde::de::Error::custom)
    }
}
