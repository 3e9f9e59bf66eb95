// SPDX-License-Identifier: MIT

//!
//! *Part of the Timeline Calendar project*
//!
//! This crate holds the calendar widgets.  They are headless: each widget is
//! a state machine that the host (a browser binding, a desktop shell, a
//! test) drives with pointer events, timer firings and fetch results, and
//! that answers with render models and [`Effect`]s.  The widgets are:
//!
//! - [`MonthGrid`], one month as a grid of days
//! - [`Sparkline`], per-month article counts over a window of years
//! - [`YearSwitcher`] and [`YearView`], a year's twelve months with a strip
//!   of years to choose from
//! - [`PreviewPopup`], the hover preview shared by the others
//!
//! The data they display is fetched through [`DataAccess`], normally from
//! the web API (see the `www-api` crate).
//!
//! ## Usage
//!
//! A host loop looks something like this:
//!
//! 1. Call [`Sparkline::load`] (or similar) and drain the widget's effects
//! 2. Run fetch effects with [`DataAccess::complete`] and hand each
//!    [`Completion`] back with `apply`
//! 3. Schedule/cancel timers as asked, calling `timer_fired` when one fires
//! 4. Draw the render model, and send pointer input back in
//!

mod data_access;
mod events;
mod layout_params;
mod month_grid;
mod point;
mod popup;
mod sparkline;
mod year_switcher;
mod year_view;

pub use data_access::*;
pub use events::*;
pub use layout_params::*;
pub use month_grid::*;
pub use point::*;
pub use popup::*;
pub use sparkline::*;
pub use year_switcher::*;
pub use year_view::*;
