// SPDX-License-Identifier: MIT

//!
//! Month grid
//!
//! One month as a seven column grid (Sunday first), with a badge on every
//! day that has articles.  Hovering a day with articles previews them, and
//! clicking a day goes to its page.
//!
//! An interactive grid has a header with the month's name and controls to
//! step a month or a year at a time.  The grids of the year view are static:
//! they have no header and change year only when told to.
//!

use crate::{
    ClickEvent, Completion, Effect, GridLayoutParams, GridNav, HitTarget, Hitbox, LatestWins,
    MonthRequest, MouseButton, Point, PopupKind, PopupModel, PopupTimings, PreviewPopup, Rect,
    RequestId, Size, TimerId, hit_test,
};
use log::debug;
use timeline_calendar_core::{
    ArticleSummary, Day, FictionalDate, Month, NavigationTarget, Year, YearPolicy, count_on_day,
    days_in_month, first_day_of_week, month_name,
};

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridMode {
    /// With a header and navigation controls
    Interactive,
    /// Just the days
    Static,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridState {
    Idle,
    Loading(RequestId),
    Rendered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCell {
    /// Before the first day of the month
    Empty,
    Day { day: Day, count: usize },
}

impl GridCell {
    /// The number to show on the day's badge, if it has one
    pub fn badge(&self) -> Option<usize> {
        match self {
            GridCell::Day { count, .. } if *count > 0 => Some(*count),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellModel {
    pub rect: Rect,
    pub cell: GridCell,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridNavButton {
    pub nav: GridNav,
    pub rect: Rect,
    pub label: &'static str,
}

/// Everything the host needs to draw a month grid
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGridModel {
    /// E.g. "August, Year 3" (interactive grids only)
    pub header: Option<String>,
    pub nav_buttons: Vec<GridNavButton>,
    pub weekday_labels: Vec<(Rect, &'static str)>,
    pub cells: Vec<CellModel>,
    pub loading: bool,
    pub popup: Option<PopupModel>,
    pub hitboxes: Vec<Hitbox>,
}

#[derive(Debug)]
pub struct MonthGrid {
    year: Year,
    month: Month,
    mode: GridMode,
    policy: YearPolicy,
    layout: GridLayoutParams,
    state: GridState,
    requests: LatestWins,
    articles: Vec<ArticleSummary>,
    popup: PreviewPopup,
    hovered: Option<HitTarget>,
    effects: Vec<Effect>,
}

impl MonthGrid {
    pub fn new(
        year: Year,
        month: Month,
        mode: GridMode,
        policy: YearPolicy,
        layout: GridLayoutParams,
        timings: PopupTimings,
    ) -> Self {
        MonthGrid {
            year,
            month,
            mode,
            policy,
            layout,
            state: GridState::Idle,
            requests: LatestWins::new(),
            articles: Vec::new(),
            popup: PreviewPopup::new(PopupKind::Day, timings),
            hovered: None,
            effects: Vec::new(),
        }
    }

    pub fn year(&self) -> Year {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn mode(&self) -> GridMode {
        self.mode
    }

    pub fn state(&self) -> GridState {
        self.state
    }

    pub fn articles(&self) -> &[ArticleSummary] {
        &self.articles
    }

    pub fn popup(&self) -> &PreviewPopup {
        &self.popup
    }

    pub fn layout(&self) -> &GridLayoutParams {
        &self.layout
    }

    pub fn set_origin(&mut self, origin: Point) {
        self.layout.origin = origin;
    }

    /// Fetch the articles of the current month.  Any fetch in flight is
    /// superseded.
    pub fn load(&mut self) -> MonthRequest {
        let request = MonthRequest {
            id: self.requests.issue(),
            year: self.year,
            month: self.month,
        };
        debug!("Loading the month grid for {}/{}", self.year, self.month);
        self.state = GridState::Loading(request.id);
        self.articles.clear();
        self.popup.hide();
        self.hovered = None;
        self.effects.push(Effect::FetchMonth(request));
        request
    }

    /// Step to a neighbouring month or year.  Months wrap around the year.
    /// There are no bounds: the grid will happily show years the policy
    /// doesn't allow.  Static grids don't navigate.
    pub fn navigate(&mut self, nav: GridNav) -> Option<MonthRequest> {
        if self.mode == GridMode::Static {
            return None;
        }
        let (year, month) = match nav {
            GridNav::PrevYear => (self.year.checked_add(-1).ok()?, self.month),
            GridNav::NextYear => (self.year.checked_add(1).ok()?, self.month),
            GridNav::PrevMonth => {
                let (month, wrapped) = self.month.pred_wrapping();
                let year = match wrapped {
                    true => self.year.checked_add(-1).ok()?,
                    false => self.year,
                };
                (year, month)
            }
            GridNav::NextMonth => {
                let (month, wrapped) = self.month.succ_wrapping();
                let year = match wrapped {
                    true => self.year.checked_add(1).ok()?,
                    false => self.year,
                };
                (year, month)
            }
        };
        self.year = year;
        self.month = month;
        Some(self.load())
    }

    /// Show the same month of another year (e.g. chosen in the year
    /// switcher)
    pub fn set_year(&mut self, year: Year) -> MonthRequest {
        self.year = year;
        self.load()
    }

    /// Apply fetched articles.  Returns whether they were for the current
    /// fetch.
    pub fn apply_articles(&mut self, id: RequestId, articles: Vec<ArticleSummary>) -> bool {
        if !self.requests.accept(id) {
            return false;
        }
        self.articles = articles;
        self.state = GridState::Rendered;
        true
    }

    /// Apply a completed fetch if it belongs to this grid
    pub fn apply(&mut self, completion: &Completion) -> bool {
        match completion {
            Completion::MonthArticles { request, articles }
                if self.requests.is_current(request.id) =>
            {
                self.apply_articles(request.id, articles.clone())
            }
            _ => false,
        }
    }

    /// Leading empty cells, then one cell per day of the month
    pub fn cells(&self) -> Vec<GridCell> {
        let leading = self.leading_cells();
        let days = (1..=i64::from(days_in_month(self.month)))
            .filter_map(|day| Day::try_from(day).ok())
            .map(|day| GridCell::Day {
                day,
                count: count_on_day(&self.articles, day),
            });
        std::iter::repeat_n(GridCell::Empty, leading)
            .chain(days)
            .collect()
    }

    pub fn header(&self) -> Option<String> {
        match self.mode {
            GridMode::Interactive => Some(format!(
                "{}, Year {}",
                month_name(self.month),
                self.year
            )),
            GridMode::Static => None,
        }
    }

    pub fn render(&self) -> MonthGridModel {
        let cells = self
            .cells()
            .into_iter()
            .enumerate()
            .map(|(index, cell)| CellModel {
                rect: self.cell_rect(index),
                cell,
            })
            .collect();

        let weekdays_top = self.weekdays_top();
        let weekday_labels = WEEKDAY_LABELS
            .iter()
            .enumerate()
            .map(|(column, label)| {
                let rect = Rect::new(
                    self.layout.origin.x + column as f64 * self.layout.cell_width,
                    weekdays_top,
                    self.layout.cell_width,
                    self.layout.weekday_height,
                );
                (rect, *label)
            })
            .collect();

        MonthGridModel {
            header: self.header(),
            nav_buttons: self.nav_buttons(),
            weekday_labels,
            cells,
            loading: matches!(self.state, GridState::Loading(_)),
            popup: self.popup.model(),
            hitboxes: self.hitboxes(),
        }
    }

    /// Nav buttons, then day cells, then the popup on top
    pub fn hitboxes(&self) -> Vec<Hitbox> {
        let nav = self
            .nav_buttons()
            .into_iter()
            .map(|button| Hitbox::new(button.rect, HitTarget::GridNav(button.nav)));
        let days = self
            .cells()
            .into_iter()
            .enumerate()
            .filter_map(|(index, cell)| match cell {
                GridCell::Day { day, .. } => {
                    Some(Hitbox::new(self.cell_rect(index), HitTarget::DayCell(day)))
                }
                GridCell::Empty => None,
            });
        nav.chain(days).chain(self.popup.hitbox()).collect()
    }

    /// Total size of the widget
    pub fn size(&self) -> Size {
        Point::new(
            self.layout.width(),
            self.body_top() - self.layout.origin.y + self.layout.body_height(),
        )
    }

    /// The area the grid itself covers, without its popup
    pub fn bounds(&self) -> Rect {
        let size = self.size();
        Rect::new(self.layout.origin.x, self.layout.origin.y, size.x, size.y)
    }

    /// Whether the popup is showing (and placed) over this point
    pub fn popup_contains(&self, point: Point) -> bool {
        self.popup
            .hitbox()
            .is_some_and(|hitbox| hitbox.rect.contains(point))
    }

    /// Drop the popup and forget what the pointer was over
    pub fn hide_popup(&mut self) {
        self.popup.hide();
        self.hovered = None;
    }

    pub fn pointer_moved(&mut self, point: Point) {
        let target = hit_test(&self.hitboxes(), point);
        self.hover(target);
    }

    pub fn pointer_left(&mut self) {
        self.hover(None);
    }

    pub fn click(&mut self, event: ClickEvent) {
        match hit_test(&self.hitboxes(), event.point) {
            Some(HitTarget::DayCell(day)) => self.effects.push(Effect::Navigate {
                target: NavigationTarget::Day(self.year, self.month, day),
                new_context: event.wants_direct_navigation(),
            }),
            Some(HitTarget::GridNav(nav)) if event.button == MouseButton::Primary => {
                self.navigate(nav);
            }
            _ => (),
        }
    }

    pub fn timer_fired(&mut self, id: TimerId) -> bool {
        self.popup.timer_fired(id)
    }

    /// Position the popup now that the host knows its size
    pub fn place_popup(&mut self, popup_size: Size, viewport: Size) -> Rect {
        self.popup.place(popup_size, viewport)
    }

    pub fn drain_effects(&mut self) -> Vec<Effect> {
        self.effects
            .drain(..)
            .chain(self.popup.drain_effects())
            .collect()
    }

    fn hover(&mut self, target: Option<HitTarget>) {
        if target == self.hovered {
            return;
        }
        let previous = std::mem::replace(&mut self.hovered, target);
        match previous {
            Some(HitTarget::DayCell(_)) => self
                .popup
                .leave_source(target == Some(HitTarget::Popup)),
            Some(HitTarget::Popup) => self.popup.leave_popup(),
            _ => (),
        }
        match target {
            Some(HitTarget::DayCell(day)) => self.enter_day(day),
            Some(HitTarget::Popup) => self.popup.enter_popup(),
            _ => (),
        }
    }

    fn enter_day(&mut self, day: Day) {
        let Ok(date) = FictionalDate::from(self.year, self.month, day) else {
            return;
        };
        let articles = self
            .articles
            .iter()
            .filter(|article| article.day == day)
            .cloned()
            .collect();
        let anchor = self.cell_rect(self.leading_cells() + usize::from(day.value()) - 1);
        self.popup.enter_day(date, anchor, articles);
    }

    fn leading_cells(&self) -> usize {
        first_day_of_week(self.year, self.month, &self.policy).num_days_from_sunday() as usize
    }

    fn weekdays_top(&self) -> f64 {
        match self.mode {
            GridMode::Interactive => self.layout.origin.y + self.layout.header_height,
            GridMode::Static => self.layout.origin.y,
        }
    }

    fn body_top(&self) -> f64 {
        self.weekdays_top() + self.layout.weekday_height
    }

    fn cell_rect(&self, index: usize) -> Rect {
        let (row, column) = (index / 7, index % 7);
        Rect::new(
            self.layout.origin.x + column as f64 * self.layout.cell_width,
            self.body_top() + row as f64 * self.layout.cell_height,
            self.layout.cell_width,
            self.layout.cell_height,
        )
    }

    fn nav_buttons(&self) -> Vec<GridNavButton> {
        if self.mode == GridMode::Static {
            return Vec::new();
        }
        let GridLayoutParams {
            origin,
            header_height,
            nav_button_width: width,
            ..
        } = self.layout;
        let right = origin.x + self.layout.width();
        [
            (GridNav::PrevYear, origin.x, "«"),
            (GridNav::PrevMonth, origin.x + width, "‹"),
            (GridNav::NextMonth, right - 2.0 * width, "›"),
            (GridNav::NextYear, right - width, "»"),
        ]
        .into_iter()
        .map(|(nav, x, label)| GridNavButton {
            nav,
            rect: Rect::new(x, origin.y, width, header_height),
            label,
        })
        .collect()
    }
}
