// SPDX-License-Identifier: MIT

//!
//! Layout params
//!

use crate::Point;
use std::fmt::Debug;

/// Gap between the popup and the viewport edges, and between the popup and
/// the element it previews
pub const POPUP_MARGIN_PX: f64 = 10.0;

/// Height of a sparkline bar with articles, relative to the busiest month
pub const MIN_BAR_HEIGHT_PX: f64 = 8.0;
pub const MAX_BAR_HEIGHT_PX: f64 = 80.0;

/// Layout of a month grid
#[derive(Debug, Clone, Copy)]
pub struct GridLayoutParams {
    /// Top left of the widget
    pub origin: Point,
    pub cell_width: f64,
    pub cell_height: f64,
    /// Height of the header row (navigation and title), only shown in
    /// interactive mode
    pub header_height: f64,
    /// Height of the row of weekday names
    pub weekday_height: f64,
    pub nav_button_width: f64,
}

impl Default for GridLayoutParams {
    fn default() -> Self {
        GridLayoutParams {
            origin: Point::default(),
            cell_width: 40.0,
            cell_height: 40.0,
            header_height: 32.0,
            weekday_height: 20.0,
            nav_button_width: 32.0,
        }
    }
}

impl GridLayoutParams {
    pub fn width(&self) -> f64 {
        self.cell_width * 7.0
    }

    /// The grid always has room for six weeks
    pub fn body_height(&self) -> f64 {
        self.cell_height * 6.0
    }
}

/// Layout of the sparkline strip
#[derive(Debug, Clone, Copy)]
pub struct SparklineLayoutParams {
    /// Top left of the widget
    pub origin: Point,
    pub header_height: f64,
    pub year_label_height: f64,
    pub bar_width: f64,
    pub bar_gap: f64,
    /// Gap between the columns of two years
    pub year_gap: f64,
    pub nav_button_width: f64,
}

impl Default for SparklineLayoutParams {
    fn default() -> Self {
        SparklineLayoutParams {
            origin: Point::default(),
            header_height: 40.0,
            year_label_height: 20.0,
            bar_width: 8.0,
            bar_gap: 2.0,
            year_gap: 16.0,
            nav_button_width: 24.0,
        }
    }
}

impl SparklineLayoutParams {
    pub fn year_width(&self) -> f64 {
        self.bar_width * 12.0 + self.bar_gap * 11.0
    }
}

/// Layout of the year switcher strip
#[derive(Debug, Clone, Copy)]
pub struct SwitcherLayoutParams {
    /// Top left of the widget
    pub origin: Point,
    pub item_width: f64,
    pub item_gap: f64,
    pub height: f64,
    pub nav_button_width: f64,
    /// Visible width of the scrolling list of years
    pub container_width: f64,
}

impl Default for SwitcherLayoutParams {
    fn default() -> Self {
        SwitcherLayoutParams {
            origin: Point::default(),
            item_width: 56.0,
            item_gap: 8.0,
            height: 36.0,
            nav_button_width: 32.0,
            container_width: 400.0,
        }
    }
}

/// Layout of the year view (the switcher above twelve month grids)
#[derive(Debug, Clone, Copy)]
pub struct YearViewLayoutParams {
    pub origin: Point,
    pub months_per_row: usize,
    pub month_gap: f64,
    /// Height of the month name above each grid
    pub month_title_height: f64,
    pub switcher: SwitcherLayoutParams,
    pub grid: GridLayoutParams,
}

impl Default for YearViewLayoutParams {
    fn default() -> Self {
        YearViewLayoutParams {
            origin: Point::default(),
            months_per_row: 3,
            month_gap: 24.0,
            month_title_height: 24.0,
            switcher: SwitcherLayoutParams::default(),
            grid: GridLayoutParams::default(),
        }
    }
}
