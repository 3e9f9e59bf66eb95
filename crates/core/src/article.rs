// SPDX-License-Identifier: MIT

//!
//! Article summaries as listed in previews, and their ordering
//!

use crate::{Day, Year};
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// The optional time-of-day tag of an article
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimeOfDay {
    Morning,
    Day,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Day => "Day",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
            TimeOfDay::Night => "Night",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TimeOfDay {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Morning" => Ok(TimeOfDay::Morning),
            "Day" => Ok(TimeOfDay::Day),
            "Afternoon" => Ok(TimeOfDay::Afternoon),
            "Evening" => Ok(TimeOfDay::Evening),
            "Night" => Ok(TimeOfDay::Night),
            _ => Err(()),
        }
    }
}

/// Unknown or empty labels are treated the same as no label
fn deserialize_time_of_day<'de, D>(deserializer: D) -> Result<Option<TimeOfDay>, D::Error>
where
    D: Deserializer<'de>,
{
    let label = Option::<String>::deserialize(deserializer)?;
    Ok(label.and_then(|label| label.trim().parse().ok()))
}

/// Stored meta values may arrive as numbers or as numeric strings
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(i64),
    String(String),
}

fn deserialize_day<'de, D>(deserializer: D) -> Result<Day, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(value) => value,
        NumberOrString::String(text) => text
            .trim()
            .parse::<i64>()
            .map_err(|_| serde::de::Error::custom(format!("`{text}` is not a day")))?,
    };
    Day::try_from(value).map_err(serde::de::Error::custom)
}

fn deserialize_year<'de, D>(deserializer: D) -> Result<Year, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(value) => Year::try_from(value).map_err(serde::de::Error::custom),
        NumberOrString::String(text) => text.parse().map_err(serde::de::Error::custom),
    }
}

/// An article as listed by the per-month fetch
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ArticleSummary {
    pub id: i64,
    pub title: String,
    pub permalink: String,
    #[serde(rename = "timeline_day", deserialize_with = "deserialize_day")]
    pub day: Day,
    #[serde(
        rename = "timeline_time_of_day",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_time_of_day"
    )]
    pub time_of_day: Option<TimeOfDay>,
}

/// An article listed by the "this day in history" fetch
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ThisDayArticle {
    pub id: i64,
    pub title: String,
    #[serde(rename = "timeline_year", deserialize_with = "deserialize_year")]
    pub year: Year,
    pub permalink: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
}

/// Untagged articles come first, then in time-of-day order, then by title
/// ignoring case
fn compare_within_day(a: &ArticleSummary, b: &ArticleSummary) -> Ordering {
    a.time_of_day
        .cmp(&b.time_of_day)
        .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
}

/// Sort the articles of a single day for display
pub fn sort_for_day(articles: &mut [ArticleSummary]) {
    articles.sort_by(compare_within_day);
}

/// Sort the articles of a month for display: by day, then as for a single day
pub fn sort_for_month(articles: &mut [ArticleSummary]) {
    articles.sort_by(|a, b| a.day.cmp(&b.day).then_with(|| compare_within_day(a, b)));
}

/// Number of articles on the given day
pub fn count_on_day(articles: &[ArticleSummary], day: Day) -> usize {
    articles.iter().filter(|article| article.day == day).count()
}

#[cfg(test)]
mod test {
    use super::*;
    use timeline_calendar_macros::day;

    fn article(title: &str, day: Day, time_of_day: Option<TimeOfDay>) -> ArticleSummary {
        ArticleSummary {
            id: 0,
            title: title.to_string(),
            permalink: String::new(),
            day,
            time_of_day,
        }
    }

    fn titles(articles: &[ArticleSummary]) -> Vec<&str> {
        articles.iter().map(|a| a.title.as_str()).collect()
    }

    #[test]
    fn day_sort() {
        let mut articles = vec![
            article("B", day!(1), None),
            article("A", day!(1), Some(TimeOfDay::Morning)),
            article("C", day!(1), None),
        ];
        sort_for_day(&mut articles);
        assert_eq!(titles(&articles), ["B", "C", "A"]);

        let mut articles = vec![
            article("x", day!(1), Some(TimeOfDay::Night)),
            article("b", day!(1), Some(TimeOfDay::Day)),
            article("A", day!(1), Some(TimeOfDay::Day)),
            article("y", day!(1), Some(TimeOfDay::Morning)),
        ];
        sort_for_day(&mut articles);
        assert_eq!(titles(&articles), ["y", "A", "b", "x"]);
    }

    #[test]
    fn month_sort() {
        let mut articles = vec![
            article("late", day!(20), None),
            article("night", day!(3), Some(TimeOfDay::Night)),
            article("untagged", day!(3), None),
        ];
        sort_for_month(&mut articles);
        assert_eq!(titles(&articles), ["untagged", "night", "late"]);
    }

    #[test]
    fn wire_format() {
        let json = r#"[
            {"id": 1, "title": "One", "permalink": "/a/", "timeline_day": "15"},
            {"id": 2, "title": "Two", "permalink": "/b/", "timeline_day": 3, "timeline_time_of_day": "Evening"},
            {"id": 3, "title": "Three", "permalink": "/c/", "timeline_day": 4, "timeline_time_of_day": "Teatime"}
        ]"#;
        let articles: Vec<ArticleSummary> = serde_json::from_str(json).unwrap();
        assert_eq!(articles[0].day, day!(15));
        assert_eq!(articles[0].time_of_day, None);
        assert_eq!(articles[1].time_of_day, Some(TimeOfDay::Evening));
        assert_eq!(articles[2].time_of_day, None);

        let value = serde_json::to_value(&articles[1]).unwrap();
        assert_eq!(value["timeline_day"], 3);
        assert_eq!(value["timeline_time_of_day"], "Evening");
        let value = serde_json::to_value(&articles[0]).unwrap();
        assert!(value.get("timeline_time_of_day").is_none());

        let bad = r#"{"id": 1, "title": "x", "permalink": "/", "timeline_day": "32"}"#;
        assert!(serde_json::from_str::<ArticleSummary>(bad).is_err());
    }

    #[test]
    fn counting() {
        let articles = vec![
            article("a", day!(1), None),
            article("b", day!(1), None),
            article("c", day!(15), None),
        ];
        assert_eq!(count_on_day(&articles, day!(1)), 2);
        assert_eq!(count_on_day(&articles, day!(15)), 1);
        assert_eq!(count_on_day(&articles, day!(2)), 0);
    }
}
