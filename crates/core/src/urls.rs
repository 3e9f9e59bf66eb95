// SPDX-License-Identifier: MIT

//!
//! Navigation targets produced by the widgets
//!

use crate::{Day, FictionalDate, Month, Year};
use std::fmt;
use url::form_urlencoded;

/// The query parameter that makes the selected year of the year view
/// addressable
pub const YEAR_QUERY_PARAM: &str = "timeline_year";

/// A page of the timeline.  Displays as its path, e.g. `/timeline/3/8/`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NavigationTarget {
    Overview,
    Year(Year),
    Month(Year, Month),
    Day(Year, Month, Day),
    Article { date: FictionalDate, slug: String },
}

impl NavigationTarget {
    pub fn path(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for NavigationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationTarget::Overview => write!(f, "/timeline/"),
            NavigationTarget::Year(year) => write!(f, "/timeline/{year}/"),
            NavigationTarget::Month(year, month) => write!(f, "/timeline/{year}/{month}/"),
            NavigationTarget::Day(year, month, day) => {
                write!(f, "/timeline/{year}/{month}/{day}/")
            }
            NavigationTarget::Article { date, slug } => write!(
                f,
                "/timeline/{}/{}/{}/{slug}/",
                date.year(),
                date.month(),
                date.day()
            ),
        }
    }
}

/// The query string selecting a year in the year view, e.g. `timeline_year=-2`
pub fn addressable_year_query(year: Year) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair(YEAR_QUERY_PARAM, &year.to_string())
        .finish()
}

/// The year selected by a query string (with or without the leading `?`),
/// if present and valid.  The first occurrence of the parameter wins.
pub fn year_from_query(query: &str) -> Option<Year> {
    form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .find(|(key, _)| key == YEAR_QUERY_PARAM)
        .and_then(|(_, value)| value.parse().ok())
}
