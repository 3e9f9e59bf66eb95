// SPDX-License-Identifier: MIT

//!
//! Year view
//!
//! The year switcher above the twelve months of the selected year, as
//! static month grids in rows.  Selecting a year in the switcher pushes it
//! into every grid, each of which then fetches its month again.
//!
//! Pointer input goes to one grid at a time.  A showing popup is hit first,
//! so one overlapping a neighbouring grid keeps the pointer, and only one
//! grid's popup is ever visible.
//!

use crate::{
    ClickEvent, Completion, Effect, GridMode, MonthGrid, MonthGridModel, Point, PopupTimings,
    Rect, Size, TimerId, YearSwitcher, YearSwitcherModel, YearViewLayoutParams,
};
use timeline_calendar_core::{Direction, Month, Year, YearPolicy, month_name};

#[derive(Debug, Clone, PartialEq)]
pub struct MonthPanel {
    /// The month's name, e.g. "August"
    pub title: &'static str,
    pub title_rect: Rect,
    pub grid: MonthGridModel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearViewModel {
    pub switcher: YearSwitcherModel,
    pub months: Vec<MonthPanel>,
}

#[derive(Debug)]
pub struct YearView {
    policy: YearPolicy,
    layout: YearViewLayoutParams,
    switcher: YearSwitcher,
    grids: Vec<MonthGrid>,
    /// The grid the pointer is over
    active: Option<usize>,
}

impl YearView {
    /// The switcher and all twelve grids, showing the policy's default year.
    /// Nothing is fetched until [`Self::init`].
    pub fn new(policy: YearPolicy, layout: YearViewLayoutParams, timings: PopupTimings) -> Self {
        let mut switcher_layout = layout.switcher;
        switcher_layout.origin = layout.origin;
        let switcher = YearSwitcher::new(&policy, switcher_layout);

        let year = switcher.current_year();
        let grids = Month::all()
            .enumerate()
            .map(|(index, month)| {
                let mut grid_layout = layout.grid;
                grid_layout.origin = grid_origin(&layout, index);
                MonthGrid::new(year, month, GridMode::Static, policy, grid_layout, timings)
            })
            .collect();

        YearView {
            policy,
            layout,
            switcher,
            grids,
            active: None,
        }
    }

    /// Set up the switcher (see [`YearSwitcher::init`]) and load the
    /// selected year into the grids
    pub fn init(
        &mut self,
        years: Option<Vec<Year>>,
        query: Option<&str>,
        data_current_year: Option<Year>,
    ) {
        self.switcher
            .init(&self.policy, years, query, data_current_year);
        self.push_year_to_grids();
    }

    pub fn current_year(&self) -> Year {
        self.switcher.current_year()
    }

    pub fn switcher(&self) -> &YearSwitcher {
        &self.switcher
    }

    pub fn grids(&self) -> &[MonthGrid] {
        &self.grids
    }

    pub fn select_year(&mut self, year: Year) {
        self.switcher.select_year(year);
        self.push_year_to_grids();
    }

    pub fn step(&mut self, direction: Direction) -> Year {
        let year = self.switcher.step(direction);
        self.push_year_to_grids();
        year
    }

    /// Hand a completed fetch to the grid it's for
    pub fn apply(&mut self, completion: &Completion) -> bool {
        self.grids.iter_mut().any(|grid| grid.apply(completion))
    }

    pub fn pointer_moved(&mut self, point: Point) {
        let target = self.grid_at(point);
        if target != self.active {
            if let Some(previous) = self.active {
                self.grids[previous].pointer_left();
            }
            self.active = target;
        }
        if let Some(index) = target {
            self.grids[index].pointer_moved(point);
            self.keep_only_popup_of(index);
        }
    }

    pub fn pointer_left(&mut self) {
        if let Some(previous) = self.active.take() {
            self.grids[previous].pointer_left();
        }
    }

    pub fn click(&mut self, event: ClickEvent) {
        if self.switcher.contains(event.point) {
            if self.switcher.click(event).is_some() {
                self.push_year_to_grids();
            }
            return;
        }
        if let Some(index) = self.grid_at(event.point) {
            self.grids[index].click(event);
        }
    }

    pub fn timer_fired(&mut self, id: TimerId) -> bool {
        let Some(index) = self.grids.iter_mut().position(|grid| grid.timer_fired(id)) else {
            return false;
        };
        self.keep_only_popup_of(index);
        true
    }

    /// Position the visible popup now that the host knows its size
    pub fn place_popup(&mut self, popup_size: Size, viewport: Size) -> Option<Rect> {
        self.grids
            .iter_mut()
            .find(|grid| grid.popup().is_visible())
            .map(|grid| grid.place_popup(popup_size, viewport))
    }

    pub fn render(&self) -> YearViewModel {
        let months = self
            .grids
            .iter()
            .map(|grid| {
                let origin = grid.layout().origin;
                MonthPanel {
                    title: month_name(grid.month()),
                    title_rect: Rect::new(
                        origin.x,
                        origin.y - self.layout.month_title_height,
                        grid.layout().width(),
                        self.layout.month_title_height,
                    ),
                    grid: grid.render(),
                }
            })
            .collect();
        YearViewModel {
            switcher: self.switcher.render(),
            months,
        }
    }

    pub fn drain_effects(&mut self) -> Vec<Effect> {
        let mut effects: Vec<Effect> = self.switcher.drain_effects().collect();
        for grid in &mut self.grids {
            effects.extend(grid.drain_effects());
        }
        effects
    }

    /// The grid under the point, a showing popup winning over the grids
    fn grid_at(&self, point: Point) -> Option<usize> {
        self.grids
            .iter()
            .position(|grid| grid.popup_contains(point))
            .or_else(|| {
                self.grids
                    .iter()
                    .position(|grid| grid.bounds().contains(point))
            })
    }

    fn keep_only_popup_of(&mut self, index: usize) {
        if !self.grids[index].popup().is_visible() {
            return;
        }
        for (other, grid) in self.grids.iter_mut().enumerate() {
            if other != index && grid.popup().is_visible() {
                grid.hide_popup();
            }
        }
    }

    fn push_year_to_grids(&mut self) {
        let year = self.switcher.current_year();
        for grid in &mut self.grids {
            grid.set_year(year);
        }
    }
}

/// Top left of the grid (below its title) for the month at `index`
fn grid_origin(layout: &YearViewLayoutParams, index: usize) -> Point {
    let per_row = layout.months_per_row.max(1);
    let (row, column) = (index / per_row, index % per_row);
    let grid_height = layout.grid.weekday_height + layout.grid.body_height();
    let top = layout.origin.y + layout.switcher.height + layout.month_gap;
    Point::new(
        layout.origin.x + column as f64 * (layout.grid.width() + layout.month_gap),
        top + layout.month_title_height
            + row as f64 * (layout.month_title_height + grid_height + layout.month_gap),
    )
}
