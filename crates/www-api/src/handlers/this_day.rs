// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Web API for "this day in history"
//!

use crate::{ApiError, ApiState, DayOfYearQueryParams};
use axum::Json;
use axum::extract::{Query, State, rejection::QueryRejection};
use std::sync::Arc;
use timeline_calendar_core::ThisDayArticle;
use timeline_calendar_store::fetch_this_day;

/// Handle a request for the articles on a day of the year, across all years
pub async fn handle_get_this_day(
    State(state): State<Arc<ApiState>>,
    query: Result<Query<DayOfYearQueryParams>, QueryRejection>,
) -> Result<Json<Vec<ThisDayArticle>>, ApiError> {
    let Query(params) = query?;
    let mut transaction = state.begin().await?;
    let articles = fetch_this_day(&mut transaction, params.month, params.day).await?;
    Ok(Json(articles))
}
