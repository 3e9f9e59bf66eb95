// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! All query parameter structs
//!

use serde::Deserialize;
use timeline_calendar_core::{Day, Month, Year};

/// Start year used when the sparkline request gives none
pub const DEFAULT_SPARKLINE_START_YEAR: i64 = 1;

/// End year used when the sparkline request gives none
pub const DEFAULT_SPARKLINE_END_YEAR: i64 = 8;

/// `?year=Y&month=M`
#[derive(Deserialize, Debug)]
pub struct MonthQueryParams {
    pub year: Year,
    pub month: Month,
}

/// `?start_year=S&end_year=E`, both optional
#[derive(Deserialize, Debug, Default)]
pub struct RangeQueryParams {
    pub start_year: Option<i64>,
    pub end_year: Option<i64>,
}

impl RangeQueryParams {
    pub fn start_year(&self) -> i64 {
        self.start_year.unwrap_or(DEFAULT_SPARKLINE_START_YEAR)
    }

    pub fn end_year(&self) -> i64 {
        self.end_year.unwrap_or(DEFAULT_SPARKLINE_END_YEAR)
    }
}

/// `?month=M&day=D`
#[derive(Deserialize, Debug)]
pub struct DayOfYearQueryParams {
    pub month: Month,
    pub day: Day,
}
