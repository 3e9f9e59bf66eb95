// SPDX-License-Identifier: MIT

//!
//! Sparkline strip
//!
//! A window of consecutive years, each drawn as twelve bars whose heights
//! show how many articles each month has.  The window pages backwards and
//! forwards a page (`years_per_view`) at a time.
//!
//! Hovering or clicking a bar previews the month's articles.  Opening the
//! month's page directly takes a ctrl/cmd click or the middle/secondary
//! button.
//!

use crate::{
    ClickEvent, Completion, Effect, HitTarget, Hitbox, LatestWins, MAX_BAR_HEIGHT_PX,
    MIN_BAR_HEIGHT_PX, MouseButton, Point, PopupKind, PopupModel, PopupTimings, PreviewPopup,
    RangeRequest, Rect, RequestId, Size, SparklineLayoutParams, TimerId, hit_test,
};
use log::{debug, info};
use timeline_calendar_core::{
    Direction, Month, NavigationTarget, RangeError, SparklineDataset, Year, YearPolicy, YearRange,
    month_abbreviation,
};

pub const DEFAULT_YEARS_PER_VIEW: u32 = 7;

const PREV_DISABLED_TOOLTIP: &str = "No earlier years";
const NEXT_DISABLED_TOOLTIP: &str = "No later articles";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SparklineOptions {
    /// First year of the initial window (see [`default_window`])
    pub start_year: Option<Year>,
    /// Last year of the initial window
    pub end_year: Option<Year>,
    /// Paging step
    pub years_per_view: u32,
    pub show_navigation: bool,
    /// Also fetch the page after the window, so that it's known whether
    /// there's anything to page forward to
    pub prefetch_next_page: bool,
}

impl Default for SparklineOptions {
    fn default() -> Self {
        SparklineOptions {
            start_year: None,
            end_year: None,
            years_per_view: DEFAULT_YEARS_PER_VIEW,
            show_navigation: true,
            prefetch_next_page: true,
        }
    }
}

/// The initial window for a policy, seven displayable years starting as low
/// as the policy (and a little sense) allows
pub fn default_window(policy: &YearPolicy) -> (Year, Year) {
    let (start, end): (i64, i64) = match (policy.allow_negative_years(), policy.allow_year_zero()) {
        (true, true) => (-2, 4),
        // Year 0 isn't displayed, so one more year to make up for it
        (true, false) => (-2, 5),
        (false, true) => (0, 6),
        (false, false) => (1, 7),
    };
    (
        Year::try_from(start).unwrap_or(Year::ONE),
        Year::try_from(end).unwrap_or(Year::ONE),
    )
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparklineNavButton {
    pub direction: Direction,
    pub rect: Rect,
    pub label: &'static str,
    pub enabled: bool,
    /// Explains why the button is disabled
    pub tooltip: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthBar {
    pub month: Month,
    pub count: u32,
    pub rect: Rect,
    /// E.g. "Aug 3: 2 articles", only for months with articles
    pub tooltip: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearColumn {
    pub year: Year,
    /// E.g. "Year 3"
    pub label: String,
    pub label_rect: Rect,
    pub bars: Vec<MonthBar>,
}

/// Everything the host needs to draw the sparkline strip
#[derive(Debug, Clone, PartialEq)]
pub struct SparklineModel {
    pub heading: String,
    /// E.g. "Years 1 - 7", only with navigation
    pub range_label: Option<String>,
    pub nav_buttons: Vec<SparklineNavButton>,
    pub years: Vec<YearColumn>,
    pub loading: bool,
    pub popup: Option<PopupModel>,
    pub hitboxes: Vec<Hitbox>,
}

#[derive(Debug)]
pub struct Sparkline {
    policy: YearPolicy,
    options: SparklineOptions,
    layout: SparklineLayoutParams,
    /// The visible window
    range: YearRange,
    dataset: SparklineDataset,
    global_max: u32,
    requests: LatestWins,
    popup: PreviewPopup,
    hovered: Option<HitTarget>,
    effects: Vec<Effect>,
}

impl Sparkline {
    pub fn new(
        policy: YearPolicy,
        options: SparklineOptions,
        layout: SparklineLayoutParams,
        timings: PopupTimings,
    ) -> Result<Self, RangeError> {
        let (default_start, default_end) = default_window(&policy);
        let years_per_view = options.years_per_view.max(1);
        let range = match (options.start_year, options.end_year) {
            (None, None) => YearRange::new(default_start, default_end)?,
            (Some(start), None) => {
                YearRange::new(start, start.checked_add(i64::from(years_per_view) - 1)?)?
            }
            (None, Some(end)) => {
                YearRange::new(end.checked_add(1 - i64::from(years_per_view))?, end)?
            }
            (Some(start), Some(end)) => YearRange::new(start, end)?,
        };
        Ok(Sparkline {
            policy,
            options: SparklineOptions {
                years_per_view,
                ..options
            },
            layout,
            range,
            dataset: SparklineDataset::default(),
            global_max: 0,
            requests: LatestWins::new(),
            popup: PreviewPopup::new(PopupKind::Month, timings),
            hovered: None,
            effects: Vec::new(),
        })
    }

    /// The visible window
    pub fn range(&self) -> YearRange {
        self.range
    }

    pub fn options(&self) -> &SparklineOptions {
        &self.options
    }

    pub fn dataset(&self) -> &SparklineDataset {
        &self.dataset
    }

    /// The busiest month of the loaded dataset
    pub fn global_max(&self) -> u32 {
        self.global_max
    }

    pub fn popup(&self) -> &PreviewPopup {
        &self.popup
    }

    pub fn is_loading(&self) -> bool {
        self.requests.is_pending()
    }

    /// The years fetched for the window: the window itself and, when
    /// prefetching, the page after it
    pub fn fetch_range(&self) -> YearRange {
        if !self.options.prefetch_next_page {
            return self.range;
        }
        let end = self
            .range
            .end()
            .checked_add(i64::from(self.options.years_per_view))
            .unwrap_or(Year::max());
        YearRange::new(self.range.start(), end).unwrap_or(self.range)
    }

    /// Fetch the counts for the window, superseding any fetch in flight
    pub fn load(&mut self) -> RangeRequest {
        let request = RangeRequest {
            id: self.requests.issue(),
            range: self.fetch_range(),
        };
        debug!(
            "Loading the sparkline for years {} to {}",
            request.range.start(),
            request.range.end()
        );
        self.effects.push(Effect::FetchRange(request));
        request
    }

    /// Apply fetched counts.  A failed fetch (`None`) leaves the previous
    /// dataset in place.  Returns whether the fetch was current.
    pub fn apply_range_counts(&mut self, id: RequestId, dataset: Option<SparklineDataset>) -> bool {
        if !self.requests.accept(id) {
            return false;
        }
        if let Some(dataset) = dataset {
            self.global_max = dataset.max_count();
            self.dataset = dataset;
        }
        true
    }

    /// Apply a completed fetch, for the strip or its popup, if it belongs
    /// here
    pub fn apply(&mut self, completion: &Completion) -> bool {
        match completion {
            Completion::RangeCounts { request, dataset } => {
                self.requests.is_current(request.id)
                    && self.apply_range_counts(request.id, dataset.clone())
            }
            Completion::MonthArticles { request, articles } => {
                self.popup.apply_month_articles(request.id, articles.clone())
            }
        }
    }

    /// Backwards is allowed while the window stays at or above the lowest
    /// allowed year.  Forwards needs articles after the window in the loaded
    /// dataset.
    pub fn can_navigate(&self, direction: Direction) -> bool {
        let Ok(shifted) = self.range.shifted(direction, self.options.years_per_view) else {
            return false;
        };
        match direction {
            Direction::Prev => shifted.start() >= self.policy.min_allowed_year(),
            Direction::Next => self.dataset.has_content_after(self.range.end()),
        }
    }

    /// Page the window.  Refused (`None`, nothing changes) when
    /// [`Self::can_navigate`] says no.
    pub fn navigate(&mut self, direction: Direction) -> Option<RangeRequest> {
        if !self.can_navigate(direction) {
            info!("Not paging the sparkline {direction:?}, nothing there");
            return None;
        }
        self.range = self
            .range
            .shifted(direction, self.options.years_per_view)
            .ok()?;
        self.popup.hide();
        self.hovered = None;
        Some(self.load())
    }

    /// Height of the bar for a count, relative to the busiest month
    pub fn bar_height(&self, count: u32) -> f64 {
        if count == 0 || self.global_max == 0 {
            return MIN_BAR_HEIGHT_PX;
        }
        let ratio = f64::from(count) / f64::from(self.global_max);
        MIN_BAR_HEIGHT_PX + ratio * (MAX_BAR_HEIGHT_PX - MIN_BAR_HEIGHT_PX)
    }

    /// The years of the window that are drawn (year 0 only if allowed)
    pub fn visible_years(&self) -> Vec<Year> {
        self.range
            .years()
            .filter(|year| *year != Year::ZERO || self.policy.allow_year_zero())
            .collect()
    }

    /// "Years 1 - 7" with navigation, "Year 1 Overview" without
    pub fn header(&self) -> String {
        match self.options.show_navigation {
            true => format!("Years {} - {}", self.range.start(), self.range.end()),
            false => format!("Year {} Overview", self.range.start()),
        }
    }

    pub fn render(&self) -> SparklineModel {
        let (heading, range_label) = match self.options.show_navigation {
            true => ("Timeline Overview".to_string(), Some(self.header())),
            false => (self.header(), None),
        };
        SparklineModel {
            heading,
            range_label,
            nav_buttons: self.nav_buttons(),
            years: self.year_columns(),
            loading: self.is_loading(),
            popup: self.popup.model(),
            hitboxes: self.hitboxes(),
        }
    }

    /// Nav buttons, year labels, month bars (only those with articles), then
    /// the popup on top
    pub fn hitboxes(&self) -> Vec<Hitbox> {
        let mut hitboxes: Vec<Hitbox> = self
            .nav_buttons()
            .into_iter()
            .map(|button| Hitbox::new(button.rect, HitTarget::NavButton(button.direction)))
            .collect();
        for column in self.year_columns() {
            hitboxes.push(Hitbox::new(column.label_rect, HitTarget::YearLabel(column.year)));
            hitboxes.extend(column.bars.iter().filter(|bar| bar.count > 0).map(|bar| {
                Hitbox::new(
                    bar.rect,
                    HitTarget::MonthCell {
                        year: column.year,
                        month: bar.month,
                    },
                )
            }));
        }
        hitboxes.extend(self.popup.hitbox());
        hitboxes
    }

    pub fn pointer_moved(&mut self, point: Point) {
        let target = hit_test(&self.hitboxes(), point);
        self.hover(target);
    }

    pub fn pointer_left(&mut self) {
        self.hover(None);
    }

    /// A plain click on a month opens its popup.  Anything else on a month
    /// or year opens its page, and for those the host must leave the
    /// browser's default handling (e.g. the context menu) alone.
    pub fn click(&mut self, event: ClickEvent) {
        match hit_test(&self.hitboxes(), event.point) {
            Some(HitTarget::MonthCell { year, month }) => {
                if event.wants_direct_navigation() {
                    self.effects.push(Effect::Navigate {
                        target: NavigationTarget::Month(year, month),
                        new_context: true,
                    });
                } else {
                    let anchor = self.bar_rect(year, month).unwrap_or_default();
                    self.popup.show_month(year, month, anchor);
                }
            }
            Some(HitTarget::YearLabel(year)) => self.effects.push(Effect::Navigate {
                target: NavigationTarget::Year(year),
                new_context: event.wants_direct_navigation(),
            }),
            Some(HitTarget::NavButton(direction)) if event.button == MouseButton::Primary => {
                self.navigate(direction);
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
            Some(HitTarget::MonthCell { .. }) => self
                .popup
                .leave_source(target == Some(HitTarget::Popup)),
            Some(HitTarget::Popup) => self.popup.leave_popup(),
            _ => (),
        }
        match target {
            Some(HitTarget::MonthCell { year, month }) => {
                let anchor = self.bar_rect(year, month).unwrap_or_default();
                self.popup.enter_month(year, month, anchor);
            }
            Some(HitTarget::Popup) => self.popup.enter_popup(),
            _ => (),
        }
    }

    fn body_top(&self) -> f64 {
        self.layout.origin.y + self.layout.header_height
    }

    fn years_left(&self) -> f64 {
        match self.options.show_navigation {
            true => self.layout.origin.x + self.layout.nav_button_width,
            false => self.layout.origin.x,
        }
    }

    fn year_columns(&self) -> Vec<YearColumn> {
        let layout = &self.layout;
        let bars_bottom = self.body_top() + layout.year_label_height + MAX_BAR_HEIGHT_PX;
        self.visible_years()
            .into_iter()
            .enumerate()
            .map(|(index, year)| {
                let left = self.years_left() + index as f64 * (layout.year_width() + layout.year_gap);
                let counts = self.dataset.get(year).copied().unwrap_or_default();
                let bars = counts
                    .iter()
                    .map(|(month, count)| {
                        let height = self.bar_height(count);
                        let x = left + f64::from(month.value() - 1) * (layout.bar_width + layout.bar_gap);
                        MonthBar {
                            month,
                            count,
                            rect: Rect::new(x, bars_bottom - height, layout.bar_width, height),
                            tooltip: (count > 0).then(|| {
                                let plural = if count == 1 { "" } else { "s" };
                                format!(
                                    "{} {year}: {count} article{plural}",
                                    month_abbreviation(month)
                                )
                            }),
                        }
                    })
                    .collect();
                YearColumn {
                    year,
                    label: format!("Year {year}"),
                    label_rect: Rect::new(
                        left,
                        self.body_top(),
                        layout.year_width(),
                        layout.year_label_height,
                    ),
                    bars,
                }
            })
            .collect()
    }

    fn bar_rect(&self, year: Year, month: Month) -> Option<Rect> {
        self.year_columns()
            .into_iter()
            .find(|column| column.year == year)?
            .bars
            .into_iter()
            .find(|bar| bar.month == month)
            .map(|bar| bar.rect)
    }

    fn nav_buttons(&self) -> Vec<SparklineNavButton> {
        if !self.options.show_navigation {
            return Vec::new();
        }
        let layout = &self.layout;
        let columns = self.visible_years().len() as f64;
        let years_width = columns * layout.year_width() + (columns - 1.0).max(0.0) * layout.year_gap;
        let height = layout.year_label_height + MAX_BAR_HEIGHT_PX;
        [
            (Direction::Prev, layout.origin.x, "←", PREV_DISABLED_TOOLTIP),
            (Direction::Next, self.years_left() + years_width, "→", NEXT_DISABLED_TOOLTIP),
        ]
        .into_iter()
        .map(|(direction, x, label, disabled_tooltip)| {
            let enabled = self.can_navigate(direction);
            SparklineNavButton {
                direction,
                rect: Rect::new(x, self.body_top(), layout.nav_button_width, height),
                label,
                enabled,
                tooltip: (!enabled).then_some(disabled_tooltip),
            }
        })
        .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::data_access::test::summary;
    use crate::{Modifiers, MonthRequest, PopupContent};
    use std::collections::BTreeMap;
    use timeline_calendar_core::{Day, MonthCount};
    use timeline_calendar_macros::{day, month, year};

    fn policy(allow_year_zero: bool, allow_negative_years: bool) -> YearPolicy {
        YearPolicy::new(1989, allow_year_zero, allow_negative_years).unwrap()
    }

    fn sparkline(policy: YearPolicy, options: SparklineOptions) -> Sparkline {
        Sparkline::new(
            policy,
            options,
            SparklineLayoutParams::default(),
            PopupTimings::default(),
        )
        .unwrap()
    }

    fn without_prefetch() -> SparklineOptions {
        SparklineOptions {
            prefetch_next_page: false,
            ..SparklineOptions::default()
        }
    }

    fn dataset(range: (Year, Year), counts: &[(Year, Month, u32)]) -> SparklineDataset {
        let mut by_year: BTreeMap<Year, MonthCount> = BTreeMap::new();
        for (year, month, count) in counts {
            by_year.entry(*year).or_default().set(*month, *count);
        }
        SparklineDataset::zero_filled(YearRange::new(range.0, range.1).unwrap(), by_year)
    }

    /// Load the strip with the given dataset
    fn loaded(mut sparkline: Sparkline, dataset: SparklineDataset) -> Sparkline {
        let request = sparkline.load();
        assert!(sparkline.apply_range_counts(request.id, Some(dataset)));
        sparkline.drain_effects();
        sparkline
    }

    fn centre_of(sparkline: &Sparkline, target: HitTarget) -> Point {
        let hitbox = sparkline
            .hitboxes()
            .into_iter()
            .find(|hitbox| hitbox.target == target)
            .unwrap();
        Point::new(hitbox.rect.centre_x(), hitbox.rect.top() + 1.0)
    }

    #[test]
    fn default_windows() {
        assert_eq!(default_window(&policy(true, true)), (year!(-2), year!(4)));
        assert_eq!(default_window(&policy(false, true)), (year!(-2), year!(5)));
        assert_eq!(default_window(&policy(true, false)), (year!(0), year!(6)));
        assert_eq!(default_window(&policy(false, false)), (year!(1), year!(7)));
    }

    #[test]
    fn options_override_the_window() {
        let options = SparklineOptions {
            start_year: Some(year!(10)),
            ..SparklineOptions::default()
        };
        let sparkline = sparkline(YearPolicy::default(), options);
        assert_eq!(sparkline.range(), YearRange::new(year!(10), year!(16)).unwrap());
        // Prefetches the next page
        assert_eq!(sparkline.fetch_range(), YearRange::new(year!(10), year!(23)).unwrap());

        let options = SparklineOptions {
            start_year: Some(year!(5)),
            end_year: Some(year!(1)),
            ..SparklineOptions::default()
        };
        assert!(
            Sparkline::new(
                YearPolicy::default(),
                options,
                SparklineLayoutParams::default(),
                PopupTimings::default()
            )
            .is_err()
        );
    }

    #[test]
    fn forward_paging_guard() {
        // Nothing after the window
        let empty_after = dataset((year!(1), year!(14)), &[(year!(3), month!(2), 4)]);
        let mut strip = loaded(sparkline(YearPolicy::default(), SparklineOptions::default()), empty_after);
        assert!(!strip.can_navigate(Direction::Next));
        assert_eq!(strip.navigate(Direction::Next), None);
        assert_eq!(strip.range(), YearRange::new(year!(1), year!(7)).unwrap());
        assert!(strip.drain_effects().is_empty());

        // An article in year 9
        let content_after = dataset((year!(1), year!(14)), &[(year!(9), month!(1), 1)]);
        let mut strip = loaded(sparkline(YearPolicy::default(), SparklineOptions::default()), content_after);
        assert!(strip.can_navigate(Direction::Next));
        let request = strip.navigate(Direction::Next).unwrap();
        assert_eq!(strip.range(), YearRange::new(year!(8), year!(14)).unwrap());
        assert_eq!(request.range, YearRange::new(year!(8), year!(21)).unwrap());
    }

    #[test]
    fn forward_guard_is_strictly_after_the_window() {
        let only_year_ten = || dataset((year!(1), year!(20)), &[(year!(10), month!(6), 2)]);
        let window = |start: Year| SparklineOptions {
            start_year: Some(start),
            ..without_prefetch()
        };

        let strip = loaded(sparkline(YearPolicy::default(), window(year!(3))), only_year_ten());
        assert_eq!(strip.range().end(), year!(9));
        assert!(strip.can_navigate(Direction::Next));

        let strip = loaded(sparkline(YearPolicy::default(), window(year!(4))), only_year_ten());
        assert_eq!(strip.range().end(), year!(10));
        assert!(!strip.can_navigate(Direction::Next));
    }

    #[test]
    fn backward_paging_guard() {
        let mut strip = sparkline(YearPolicy::default(), SparklineOptions::default());
        assert!(!strip.can_navigate(Direction::Prev));
        assert_eq!(strip.navigate(Direction::Prev), None);

        let options = SparklineOptions {
            start_year: Some(year!(8)),
            ..SparklineOptions::default()
        };
        let mut strip = sparkline(YearPolicy::default(), options);
        assert!(strip.navigate(Direction::Prev).is_some());
        assert_eq!(strip.range().start(), year!(1));

        // Negative years allowed: down to the lowest representable year
        let mut strip = sparkline(policy(false, true), SparklineOptions::default());
        assert!(strip.navigate(Direction::Prev).is_some());
        assert_eq!(strip.range().start(), year!(-9));
    }

    #[test]
    fn disabled_nav_buttons() {
        let strip = sparkline(YearPolicy::default(), SparklineOptions::default());
        let buttons = strip.render().nav_buttons;
        assert_eq!(buttons.len(), 2);
        assert!(!buttons[0].enabled);
        assert_eq!(buttons[0].tooltip, Some(PREV_DISABLED_TOOLTIP));
        assert_eq!(buttons[0].label, "←");
        assert!(!buttons[1].enabled);

        let hidden = sparkline(
            YearPolicy::default(),
            SparklineOptions {
                show_navigation: false,
                ..SparklineOptions::default()
            },
        );
        assert!(hidden.render().nav_buttons.is_empty());
    }

    #[test]
    fn stale_ranges_are_ignored_in_either_order() {
        let first_data = dataset((year!(1), year!(7)), &[(year!(1), month!(1), 1)]);
        let second_data = dataset((year!(8), year!(14)), &[(year!(8), month!(1), 2)]);

        // [1, 7] then [8, 14]: the second request supersedes the first
        for second_arrives_first in [false, true] {
            let mut strip = sparkline(YearPolicy::default(), without_prefetch());
            let first = strip.load();
            let second = RangeRequest {
                id: strip.requests.issue(),
                range: YearRange::new(year!(8), year!(14)).unwrap(),
            };
            assert_eq!(first.range, YearRange::new(year!(1), year!(7)).unwrap());

            if second_arrives_first {
                assert!(strip.apply_range_counts(second.id, Some(second_data.clone())));
                assert!(!strip.apply_range_counts(first.id, Some(first_data.clone())));
            } else {
                assert!(!strip.apply_range_counts(first.id, Some(first_data.clone())));
                assert!(strip.apply_range_counts(second.id, Some(second_data.clone())));
            }
            assert_eq!(strip.dataset(), &second_data);
            assert_eq!(strip.global_max(), 2);
            assert!(!strip.is_loading());
        }
    }

    #[test]
    fn failed_fetch_keeps_the_dataset() {
        let data = dataset((year!(1), year!(7)), &[(year!(2), month!(5), 3)]);
        let mut strip = loaded(sparkline(YearPolicy::default(), without_prefetch()), data.clone());
        let request = strip.load();
        assert!(strip.apply_range_counts(request.id, None));
        assert_eq!(strip.dataset(), &data);
        assert!(!strip.is_loading());
    }

    #[test]
    fn year_zero_hidden_but_counted() {
        let data = dataset(
            (year!(-2), year!(5)),
            &[(year!(0), month!(3), 10), (year!(1), month!(1), 5)],
        );
        let strip = loaded(sparkline(policy(false, true), without_prefetch()), data);

        let model = strip.render();
        let years: Vec<_> = model.years.iter().map(|column| column.year).collect();
        assert_eq!(years, [year!(-2), year!(-1), year!(1), year!(2), year!(3), year!(4), year!(5)]);
        assert_eq!(strip.global_max(), 10);
        assert_eq!(strip.dataset().count(year!(0), month!(3)), 10);

        // Half the busiest month
        assert_eq!(strip.bar_height(5), 44.0);
        assert_eq!(model.years[2].bars[0].rect.height, 44.0);
        assert_eq!(strip.bar_height(0), MIN_BAR_HEIGHT_PX);
        assert_eq!(strip.bar_height(10), MAX_BAR_HEIGHT_PX);
    }

    #[test]
    fn headers_and_tooltips() {
        let data = dataset(
            (year!(1), year!(7)),
            &[(year!(1), month!(8), 3), (year!(1), month!(1), 1)],
        );
        let strip = loaded(sparkline(YearPolicy::default(), without_prefetch()), data);
        let model = strip.render();
        assert_eq!(model.heading, "Timeline Overview");
        assert_eq!(model.range_label.as_deref(), Some("Years 1 - 7"));
        assert_eq!(model.years[0].label, "Year 1");
        assert_eq!(model.years[0].bars[7].tooltip.as_deref(), Some("Aug 1: 3 articles"));
        assert_eq!(model.years[0].bars[0].tooltip.as_deref(), Some("Jan 1: 1 article"));
        assert_eq!(model.years[0].bars[1].tooltip, None);

        let strip = sparkline(
            YearPolicy::default(),
            SparklineOptions {
                show_navigation: false,
                ..SparklineOptions::default()
            },
        );
        assert_eq!(strip.render().heading, "Year 1 Overview");
    }

    #[test]
    fn empty_months_are_not_interactive() {
        let data = dataset((year!(1), year!(7)), &[(year!(1), month!(8), 3)]);
        let strip = loaded(sparkline(YearPolicy::default(), without_prefetch()), data);
        let months: Vec<_> = strip
            .hitboxes()
            .into_iter()
            .filter(|hitbox| matches!(hitbox.target, HitTarget::MonthCell { .. }))
            .collect();
        assert_eq!(months.len(), 1);
    }

    #[test]
    fn click_disambiguation() {
        let data = dataset((year!(1), year!(7)), &[(year!(1), month!(8), 3)]);
        let mut strip = loaded(sparkline(YearPolicy::default(), without_prefetch()), data);
        let month_cell = HitTarget::MonthCell {
            year: year!(1),
            month: month!(8),
        };
        let point = centre_of(&strip, month_cell);

        // Plain click: popup, loading the month
        strip.click(ClickEvent::primary(point));
        assert!(strip.popup().is_visible());
        let effects = strip.drain_effects();
        assert!(matches!(effects[..], [Effect::FetchMonth(_)]));

        // Modified or other buttons: straight to the month's page
        let clicks = [
            ClickEvent {
                modifiers: Modifiers {
                    ctrl: false,
                    command: true,
                },
                ..ClickEvent::primary(point)
            },
            ClickEvent {
                button: MouseButton::Middle,
                ..ClickEvent::primary(point)
            },
            ClickEvent {
                button: MouseButton::Secondary,
                ..ClickEvent::primary(point)
            },
        ];
        for click in clicks {
            strip.click(click);
            assert_eq!(
                strip.drain_effects(),
                [Effect::Navigate {
                    target: NavigationTarget::Month(year!(1), month!(8)),
                    new_context: true,
                }]
            );
        }

        strip.click(ClickEvent::primary(centre_of(&strip, HitTarget::YearLabel(year!(3)))));
        assert_eq!(
            strip.drain_effects(),
            [Effect::navigate(NavigationTarget::Year(year!(3)))]
        );
    }

    #[test]
    fn hover_opens_month_popup() {
        let data = dataset((year!(1), year!(7)), &[(year!(1), month!(8), 3)]);
        let mut strip = loaded(sparkline(YearPolicy::default(), without_prefetch()), data);
        let point = centre_of(
            &strip,
            HitTarget::MonthCell {
                year: year!(1),
                month: month!(8),
            },
        );
        strip.pointer_moved(point);
        let effects = strip.drain_effects();
        let Some(Effect::FetchMonth(request)) = effects.first().cloned() else {
            panic!("expected a month fetch");
        };
        assert_eq!((request.year, request.month), (year!(1), month!(8)));

        let completion = Completion::MonthArticles {
            request,
            articles: Vec::new(),
        };
        assert!(strip.apply(&completion));
        let popup = strip.render().popup.unwrap();
        assert_eq!(popup.title, "August, Year 1");
        assert_eq!(popup.lines, [crate::PopupLine::Message(crate::NO_ARTICLES_MESSAGE)]);

        // Delivered twice: the second is stale
        assert!(!strip.apply(&completion));
    }

    #[derive(Debug, Clone, Copy)]
    enum Stop {
        Cell(Point),
        Popup,
        Outside,
    }

    fn title_for(request: &MonthRequest) -> String {
        format!("{}/{}", request.year, request.month)
    }

    /// Answer the outstanding month fetches newest first
    fn answer_backwards(strip: &mut Sparkline, requests: &mut Vec<MonthRequest>) {
        for request in requests.drain(..).rev() {
            let articles = vec![summary(&title_for(&request), day!(1), None)];
            strip.apply(&Completion::MonthArticles { request, articles });
        }
    }

    /// Sweep the pointer over `path`, placing the popup whenever it shows
    /// unplaced.  Fetches are answered out of order and timers fire every
    /// few stops, and whatever is outstanding at the end is answered or
    /// fired.
    fn sweep(strip: &mut Sparkline, path: impl IntoIterator<Item = Stop>) {
        let outside = Point::new(-10.0, -10.0);
        let mut requests = Vec::new();
        let mut timers = Vec::new();
        for (step, stop) in path.into_iter().enumerate() {
            let point = match stop {
                Stop::Cell(point) => point,
                Stop::Popup => strip.popup().hitbox().map_or(outside, |hitbox| {
                    Point::new(hitbox.rect.centre_x(), hitbox.rect.top() + 1.0)
                }),
                Stop::Outside => outside,
            };
            strip.pointer_moved(point);
            if strip.popup().is_visible() && strip.popup().hitbox().is_none() {
                strip.place_popup(Size::new(100.0, 60.0), Size::new(2000.0, 1000.0));
            }
            for effect in strip.drain_effects() {
                match effect {
                    Effect::FetchMonth(request) => requests.push(request),
                    Effect::ScheduleTimer { id, .. } => timers.push(id),
                    Effect::CancelTimer(id) => timers.retain(|timer| *timer != id),
                    _ => (),
                }
            }
            if step % 5 == 4 {
                answer_backwards(strip, &mut requests);
            }
            if step % 7 == 6 {
                for timer in timers.drain(..) {
                    strip.timer_fired(timer);
                }
            }
        }
        answer_backwards(strip, &mut requests);
        for timer in timers {
            strip.timer_fired(timer);
        }
    }

    fn hammered_strip() -> (Sparkline, Stop, Stop) {
        let data = dataset(
            (year!(1), year!(7)),
            &[(year!(1), month!(8), 3), (year!(6), month!(2), 1)],
        );
        let strip = loaded(sparkline(YearPolicy::default(), without_prefetch()), data);
        let august = centre_of(
            &strip,
            HitTarget::MonthCell {
                year: year!(1),
                month: month!(8),
            },
        );
        let february = centre_of(
            &strip,
            HitTarget::MonthCell {
                year: year!(6),
                month: month!(2),
            },
        );
        (strip, Stop::Cell(august), Stop::Cell(february))
    }

    #[test]
    fn hammered_month_hover_settles_hidden() {
        let (mut strip, august, february) = hammered_strip();
        let path = [
            august,
            Stop::Popup,
            Stop::Outside,
            february,
            Stop::Popup,
            august,
            february,
            Stop::Outside,
        ];
        sweep(&mut strip, path.into_iter().cycle().take(path.len() * 6));

        assert!(!strip.popup().is_visible());
        assert!(strip.render().popup.is_none());
        assert_eq!(strip.popup().hover_state(), &Default::default());
    }

    #[test]
    fn hammered_month_hover_settles_on_the_last_month() {
        let (mut strip, august, february) = hammered_strip();
        let path = [
            august,
            Stop::Popup,
            Stop::Outside,
            february,
            Stop::Popup,
            august,
            Stop::Outside,
            february,
        ];
        sweep(&mut strip, path.into_iter().cycle().take(path.len() * 6));

        assert!(strip.popup().is_visible());
        assert!(!strip.popup().hover_state().is_popup_hovered);
        let popup = strip.render().popup.unwrap();
        assert_eq!(popup.title, "February, Year 6");
        let PopupContent::Articles(articles) = strip.popup().content() else {
            panic!("expected February's articles, got {:?}", strip.popup().content());
        };
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "6/2");
    }
}
