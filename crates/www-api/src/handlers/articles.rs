// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Web API for the articles of a month
//!

use crate::{ApiError, ApiState, MonthQueryParams};
use axum::Json;
use axum::extract::{Query, State, rejection::QueryRejection};
use log::error;
use std::sync::Arc;
use timeline_calendar_core::ArticleSummary;
use timeline_calendar_store::fetch_month_articles;

/// Handle a request for the published articles of one month.
///
/// Any database failure answers an empty list, the same as a month with no
/// articles.  Only a bad query is an error.
pub async fn handle_get_month_articles(
    State(state): State<Arc<ApiState>>,
    query: Result<Query<MonthQueryParams>, QueryRejection>,
) -> Result<Json<Vec<ArticleSummary>>, ApiError> {
    let Query(params) = query?;
    let mut transaction = match state.pool.begin().await {
        Ok(transaction) => transaction,
        Err(err) => {
            error!("Could not begin a transaction: {err}");
            return Ok(Json(Vec::new()));
        }
    };
    match fetch_month_articles(&mut transaction, params.year, params.month).await {
        Ok(articles) => Ok(Json(articles)),
        Err(err) => {
            error!(
                "Fetching articles for year {} month {} failed: {err}",
                params.year, params.month
            );
            Ok(Json(Vec::new()))
        }
    }
}
