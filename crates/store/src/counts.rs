// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Per-month article counts over a range of years, and the distinct years
//! that have articles
//!

use crate::StoreError;
use log::debug;
use sqlx::{Sqlite, Transaction};
use std::collections::BTreeMap;
use timeline_calendar_core::{Month, MonthCount, SparklineDataset, Year, YearPolicy, YearRange};

/// The published article counts for every month of every year in the range.
///
/// Every year of the range is present, with zeros where there are no
/// articles, except year zero which is left out when the policy forbids it.
pub async fn fetch_range_counts(
    transaction: &mut Transaction<'_, Sqlite>,
    range: YearRange,
    policy: &YearPolicy,
) -> Result<SparklineDataset, StoreError> {
    let rows: Vec<(i64, i64, i64)> = sqlx::query_as(
        r#"
            SELECT year, month, COUNT(*)
            FROM articles
            WHERE published = 1
            AND year BETWEEN ? AND ?
            GROUP BY year, month
            ORDER BY year, month
        "#,
    )
    .bind(range.start().value())
    .bind(range.end().value())
    .fetch_all(&mut **transaction)
    .await?;

    let mut counts: BTreeMap<Year, MonthCount> = BTreeMap::new();
    for (year, month, count) in rows {
        let year = Year::try_from(year)?;
        let month = Month::try_from(month)?;
        counts
            .entry(year)
            .or_default()
            .set(month, u32::try_from(count).unwrap_or(u32::MAX));
    }

    let dataset = SparklineDataset::zero_filled(range, counts);
    if policy.allow_year_zero() || !range.contains(Year::ZERO) {
        return Ok(dataset);
    }

    debug!("Leaving year 0 out of the range counts");
    Ok(SparklineDataset::new(
        dataset
            .iter()
            .filter(|(year, _)| *year != Year::ZERO)
            .map(|(year, counts)| (year, *counts))
            .collect(),
    ))
}

/// The years that have at least one published article, in ascending order
pub async fn fetch_distinct_years(
    transaction: &mut Transaction<'_, Sqlite>,
) -> Result<Vec<Year>, StoreError> {
    let years: Vec<i64> = sqlx::query_scalar(
        r#"
            SELECT DISTINCT year
            FROM articles
            WHERE published = 1
            ORDER BY year
        "#,
    )
    .fetch_all(&mut **transaction)
    .await?;

    Ok(years
        .into_iter()
        .map(Year::try_from)
        .collect::<Result<Vec<_>, _>>()?)
}
