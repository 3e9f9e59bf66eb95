// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! All handlers
//!

use crate::ApiState;
use axum::{Router, routing::get};
use std::sync::Arc;

pub mod articles;
pub mod settings;
pub mod sparkline;
pub mod this_day;
pub mod years;

/// The read-only routes for API v1
pub fn router() -> Router<Arc<ApiState>> {
    #[rustfmt::skip]
    let apiv1 = Router::new()
        .route("/articles",  get(articles::handle_get_month_articles))
        .route("/sparkline", get(sparkline::handle_get_range_counts))
        .route("/years",     get(years::handle_get_years))
        .route("/settings",  get(settings::handle_get_settings))
        .route("/this-day",  get(this_day::handle_get_this_day));
    apiv1
}
