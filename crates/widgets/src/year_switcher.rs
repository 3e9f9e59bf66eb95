// SPDX-License-Identifier: MIT

//!
//! Year switcher
//!
//! A horizontally scrolling strip of the years that have articles, with
//! prev/next buttons that wrap around at the ends.  The selected year is
//! kept in the address (see [`addressable_year_query`]).
//!

use crate::{
    ClickEvent, Effect, HitTarget, Hitbox, MouseButton, Point, Rect, SwitcherLayoutParams,
    hit_test,
};
use log::{debug, warn};
use timeline_calendar_core::{Direction, Year, YearPolicy, addressable_year_query, year_from_query};

#[derive(Debug, Clone, PartialEq)]
pub struct YearItem {
    pub year: Year,
    pub rect: Rect,
    /// The current year
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearSwitcherModel {
    pub prev_button: Rect,
    pub next_button: Rect,
    /// The visible part of the strip
    pub container: Rect,
    /// Only the items at least partly inside the container
    pub items: Vec<YearItem>,
    pub scroll_offset: f64,
    pub hitboxes: Vec<Hitbox>,
}

#[derive(Debug)]
pub struct YearSwitcher {
    layout: SwitcherLayoutParams,
    years: Vec<Year>,
    current_year: Year,
    scroll_offset: f64,
    effects: Vec<Effect>,
}

impl YearSwitcher {
    /// A switcher holding just the policy's default year until
    /// [`Self::init`] is called
    pub fn new(policy: &YearPolicy, layout: SwitcherLayoutParams) -> Self {
        let year = policy.default_year();
        YearSwitcher {
            layout,
            years: vec![year],
            current_year: year,
            scroll_offset: 0.0,
            effects: Vec::new(),
        }
    }

    /// Set up the list of years (`None` if it couldn't be fetched) and pick
    /// the current year.  That's the first listed year, unless the address
    /// query names one, else unless the page says which year it's for.
    pub fn init(
        &mut self,
        policy: &YearPolicy,
        years: Option<Vec<Year>>,
        query: Option<&str>,
        data_current_year: Option<Year>,
    ) {
        match years {
            Some(mut years) if !years.is_empty() => {
                years.sort();
                years.dedup();
                self.current_year = years[0];
                self.years = years;
            }
            Some(_) => {
                debug!("No years with articles");
            }
            None => {
                warn!("No list of years, falling back to the default year");
                self.years = vec![policy.default_year()];
                self.current_year = policy.default_year();
            }
        }

        if let Some(year) = query.and_then(year_from_query) {
            self.current_year = year;
        } else if let Some(year) = data_current_year {
            self.current_year = year;
        }
        self.scroll_offset = self.centring_offset(self.current_year);
    }

    pub fn years(&self) -> &[Year] {
        &self.years
    }

    pub fn current_year(&self) -> Year {
        self.current_year
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Make the year current, scroll it to the middle and put it in the
    /// address
    pub fn select_year(&mut self, year: Year) {
        debug!("Selecting year {year}");
        self.current_year = year;
        self.scroll_offset = self.centring_offset(year);
        self.effects.push(Effect::UpdateAddress {
            query: addressable_year_query(year),
        });
    }

    /// Select the neighbouring year, wrapping at the ends.  A current year
    /// that isn't listed steps to the last (prev) or first (next) year.
    pub fn step(&mut self, direction: Direction) -> Year {
        let last = self.years.len().saturating_sub(1);
        let index = match (self.years.iter().position(|y| *y == self.current_year), direction) {
            (Some(0), Direction::Prev) | (None, Direction::Prev) => last,
            (Some(index), Direction::Prev) => index - 1,
            (Some(index), Direction::Next) if index < last => index + 1,
            (_, Direction::Next) => 0,
        };
        let year = self.years.get(index).copied().unwrap_or(self.current_year);
        self.select_year(year);
        year
    }

    /// Returns the newly selected year, if the click selected one
    pub fn click(&mut self, event: ClickEvent) -> Option<Year> {
        if event.button != MouseButton::Primary {
            return None;
        }
        match hit_test(&self.hitboxes(), event.point)? {
            HitTarget::NavButton(direction) => Some(self.step(direction)),
            HitTarget::YearItem(year) => {
                self.select_year(year);
                Some(year)
            }
            _ => None,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }

    /// The area of the whole widget
    pub fn bounds(&self) -> Rect {
        let layout = &self.layout;
        Rect::new(
            layout.origin.x,
            layout.origin.y,
            layout.container_width + 2.0 * layout.nav_button_width,
            layout.height,
        )
    }

    pub fn render(&self) -> YearSwitcherModel {
        YearSwitcherModel {
            prev_button: self.button_rect(Direction::Prev),
            next_button: self.button_rect(Direction::Next),
            container: self.container(),
            items: self.visible_items(),
            scroll_offset: self.scroll_offset,
            hitboxes: self.hitboxes(),
        }
    }

    pub fn hitboxes(&self) -> Vec<Hitbox> {
        [Direction::Prev, Direction::Next]
            .into_iter()
            .map(|direction| Hitbox::new(self.button_rect(direction), HitTarget::NavButton(direction)))
            .chain(
                self.visible_items()
                    .into_iter()
                    .map(|item| Hitbox::new(self.clip(item.rect), HitTarget::YearItem(item.year))),
            )
            .collect()
    }

    pub fn drain_effects(&mut self) -> std::vec::Drain<'_, Effect> {
        self.effects.drain(..)
    }

    fn container(&self) -> Rect {
        let layout = &self.layout;
        Rect::new(
            layout.origin.x + layout.nav_button_width,
            layout.origin.y,
            layout.container_width,
            layout.height,
        )
    }

    fn button_rect(&self, direction: Direction) -> Rect {
        let layout = &self.layout;
        let x = match direction {
            Direction::Prev => layout.origin.x,
            Direction::Next => self.container().max_x(),
        };
        Rect::new(x, layout.origin.y, layout.nav_button_width, layout.height)
    }

    /// Left of the item within the (unscrolled) strip
    fn item_left(&self, index: usize) -> f64 {
        index as f64 * (self.layout.item_width + self.layout.item_gap)
    }

    fn content_width(&self) -> f64 {
        match self.years.len() {
            0 => 0.0,
            len => self.item_left(len - 1) + self.layout.item_width,
        }
    }

    /// Scroll offset that puts the year in the middle of the container, as
    /// far as the strip can scroll
    fn centring_offset(&self, year: Year) -> f64 {
        let Some(index) = self.years.iter().position(|y| *y == year) else {
            return self.scroll_offset;
        };
        let wanted = self.item_left(index) - self.layout.container_width / 2.0
            + self.layout.item_width / 2.0;
        let max = (self.content_width() - self.layout.container_width).max(0.0);
        wanted.min(max).max(0.0)
    }

    fn visible_items(&self) -> Vec<YearItem> {
        let container = self.container();
        self.years
            .iter()
            .enumerate()
            .map(|(index, year)| YearItem {
                year: *year,
                rect: Rect::new(
                    container.left() + self.item_left(index) - self.scroll_offset,
                    container.top(),
                    self.layout.item_width,
                    self.layout.height,
                ),
                active: *year == self.current_year,
            })
            .filter(|item| item.rect.max_x() > container.left() && item.rect.left() < container.max_x())
            .collect()
    }

    /// The part of the rect inside the container
    fn clip(&self, rect: Rect) -> Rect {
        let container = self.container();
        let left = rect.left().max(container.left());
        let right = rect.max_x().min(container.max_x());
        Rect::new(left, rect.top(), (right - left).max(0.0), rect.height)
    }
}
