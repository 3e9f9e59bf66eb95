// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Web API for per-month counts over a range of years
//!

use crate::{ApiState, RangeQueryParams};
use axum::Json;
use axum::extract::{Query, State, rejection::QueryRejection};
use axum::http::StatusCode;
use log::{error, warn};
use std::sync::Arc;
use timeline_calendar_core::{RangeCountsResponse, RangeError, SparklineDataset, Year, YearRange};
use timeline_calendar_store::fetch_range_counts;

fn failure(status: StatusCode) -> (StatusCode, Json<RangeCountsResponse>) {
    (
        status,
        Json(RangeCountsResponse {
            success: false,
            data: SparklineDataset::default(),
        }),
    )
}

fn parse_range(params: &RangeQueryParams) -> Result<YearRange, RangeError> {
    let start = Year::try_from(params.start_year())?;
    let end = Year::try_from(params.end_year())?;
    YearRange::new(start, end)
}

/// Handle a request for the counts of every month of every year in the range.
///
/// Always answers `{ success, data }`, with `success` false on any failure.
pub async fn handle_get_range_counts(
    State(state): State<Arc<ApiState>>,
    query: Result<Query<RangeQueryParams>, QueryRejection>,
) -> (StatusCode, Json<RangeCountsResponse>) {
    let params = match query {
        Ok(Query(params)) => params,
        Err(rejection) => {
            warn!("Bad range counts query: {}", rejection.body_text());
            return failure(StatusCode::BAD_REQUEST);
        }
    };
    let range = match parse_range(&params) {
        Ok(range) => range,
        Err(err) => {
            warn!("Bad range counts query: {err}");
            return failure(StatusCode::BAD_REQUEST);
        }
    };

    let mut transaction = match state.pool.begin().await {
        Ok(transaction) => transaction,
        Err(err) => {
            error!("Could not begin a transaction: {err}");
            return failure(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };
    match fetch_range_counts(&mut transaction, range, &state.policy).await {
        Ok(data) => (
            StatusCode::OK,
            Json(RangeCountsResponse {
                success: true,
                data,
            }),
        ),
        Err(err) => {
            error!("Fetching range counts failed: {err}");
            failure(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
