// SPDX-License-Identifier: MIT

//!
//! Preview popup
//!
//! A floating list of the articles of a day (opened from a month grid) or
//! of a month (opened from the sparkline).  The popup stays open while the
//! pointer travels from the element that opened it (the source) to the
//! popup itself, and closes shortly after the pointer leaves both.
//!
//! Timers belong to the host: the popup asks for them with
//! [`Effect::ScheduleTimer`] and is told about them with
//! [`PreviewPopup::timer_fired`].
//!

use crate::{
    Effect, HitTarget, Hitbox, LatestWins, MonthRequest, POPUP_MARGIN_PX, Rect, RequestId, Size,
    TimerId, TimerKind,
};
use log::debug;
use std::time::Duration;
use timeline_calendar_core::{
    ArticleSummary, Day, FictionalDate, Month, NavigationTarget, TimeOfDay, Year, month_name,
    sort_for_day, sort_for_month,
};

/// Shown when a popup has nothing to list
pub const NO_ARTICLES_MESSAGE: &str = "No articles found";

pub const LOADING_MESSAGE: &str = "Loading...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupKind {
    /// Articles of a day, already loaded by the month grid
    Day,
    /// Articles of a month, fetched when the popup opens
    Month,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupTimings {
    /// How long the popup survives the pointer leaving its source
    pub source_grace: Duration,
    /// How long the popup survives the pointer leaving the popup
    pub popup_grace: Duration,
    /// Hover intent delay before the popup first shows
    pub show_delay: Duration,
}

impl Default for PopupTimings {
    fn default() -> Self {
        PopupTimings {
            source_grace: Duration::from_millis(50),
            popup_grace: Duration::from_millis(100),
            show_delay: Duration::ZERO,
        }
    }
}

/// The hover bookkeeping of one popup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverState {
    /// Latched while the pointer is over the popup.  No hide timer may close
    /// the popup while it is set.
    pub is_popup_hovered: bool,
    pub pending_source_hide: Option<TimerId>,
    pub pending_popup_hide: Option<TimerId>,
    pub pending_show: Option<TimerId>,
}

impl HoverState {
    fn pending_mut(&mut self, kind: TimerKind) -> &mut Option<TimerId> {
        match kind {
            TimerKind::SourceGrace => &mut self.pending_source_hide,
            TimerKind::PopupGrace => &mut self.pending_popup_hide,
            TimerKind::ShowIntent => &mut self.pending_show,
        }
    }

    fn kind_of(&self, id: TimerId) -> Option<TimerKind> {
        [
            (self.pending_source_hide, TimerKind::SourceGrace),
            (self.pending_popup_hide, TimerKind::PopupGrace),
            (self.pending_show, TimerKind::ShowIntent),
        ]
        .into_iter()
        .find(|(pending, _)| *pending == Some(id))
        .map(|(_, kind)| kind)
    }
}

/// What the popup is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupSubject {
    Day(FictionalDate),
    Month(Year, Month),
}

impl PopupSubject {
    /// E.g. "August 15, Year 3" or "August, Year 3"
    pub fn title(&self) -> String {
        match self {
            PopupSubject::Day(date) => date.as_long_date_format(),
            PopupSubject::Month(year, month) => format!("{}, Year {year}", month_name(*month)),
        }
    }

    /// The page the title links to
    pub fn target(&self) -> NavigationTarget {
        match self {
            PopupSubject::Day(date) => NavigationTarget::Day(date.year(), date.month(), date.day()),
            PopupSubject::Month(year, month) => NavigationTarget::Month(*year, *month),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupContent {
    Loading,
    Empty,
    /// Sorted for display, see [`sort_for_day`] and [`sort_for_month`]
    Articles(Vec<ArticleSummary>),
}

impl PopupContent {
    fn from_articles(kind: PopupKind, mut articles: Vec<ArticleSummary>) -> Self {
        if articles.is_empty() {
            return PopupContent::Empty;
        }
        match kind {
            PopupKind::Day => sort_for_day(&mut articles),
            PopupKind::Month => sort_for_month(&mut articles),
        }
        PopupContent::Articles(articles)
    }

    /// Consecutive runs of articles sharing a day
    pub fn grouped_by_day(&self) -> Vec<(Day, &[ArticleSummary])> {
        let PopupContent::Articles(articles) = self else {
            return Vec::new();
        };
        articles
            .chunk_by(|a, b| a.day == b.day)
            .filter_map(|group| group.first().map(|first| (first.day, group)))
            .collect()
    }
}

/// A line of the rendered popup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupLine {
    Message(&'static str),
    /// Day heading in a month popup, e.g. "August 15"
    Heading(String),
    Article {
        title: String,
        permalink: String,
        time_of_day: Option<TimeOfDay>,
    },
}

/// What the host draws for a visible popup
#[derive(Debug, Clone, PartialEq)]
pub struct PopupModel {
    pub title: String,
    pub title_target: NavigationTarget,
    /// `None` until [`PreviewPopup::place`] has been called
    pub rect: Option<Rect>,
    pub lines: Vec<PopupLine>,
}

/// Where to put a popup of the given size for an anchor element: centred
/// below the anchor, above it if there's no room below, and always inside
/// the viewport (less the margin) where possible
pub fn position_popup(anchor: Rect, popup_size: Size, viewport: Size) -> Rect {
    let margin = POPUP_MARGIN_PX;
    let (width, height) = (popup_size.x, popup_size.y);

    let x = (anchor.centre_x() - width / 2.0)
        .min(viewport.x - width - margin)
        .max(margin);

    let below = anchor.max_y() + margin;
    let y = if below + height + margin > viewport.y {
        anchor.top() - margin - height
    } else {
        below
    };
    let y = y.min(viewport.y - height - margin).max(margin);

    Rect::new(x, y, width, height)
}

/// The hover-preview state machine, one per popup
#[derive(Debug)]
pub struct PreviewPopup {
    kind: PopupKind,
    timings: PopupTimings,
    hover: HoverState,
    visible: bool,
    subject: Option<PopupSubject>,
    content: PopupContent,
    anchor: Rect,
    rect: Option<Rect>,
    month_requests: LatestWins,
    effects: Vec<Effect>,
}

impl PreviewPopup {
    pub fn new(kind: PopupKind, timings: PopupTimings) -> Self {
        PreviewPopup {
            kind,
            timings,
            hover: HoverState::default(),
            visible: false,
            subject: None,
            content: PopupContent::Empty,
            anchor: Rect::default(),
            rect: None,
            month_requests: LatestWins::new(),
            effects: Vec::new(),
        }
    }

    pub fn kind(&self) -> PopupKind {
        self.kind
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn subject(&self) -> Option<PopupSubject> {
        self.subject
    }

    pub fn content(&self) -> &PopupContent {
        &self.content
    }

    pub fn hover_state(&self) -> &HoverState {
        &self.hover
    }

    /// The pointer entered a day with the given (already loaded) articles.
    /// Nothing happens for a day without articles.
    pub fn enter_day(&mut self, date: FictionalDate, anchor: Rect, articles: Vec<ArticleSummary>) {
        if articles.is_empty() {
            return;
        }
        self.cancel_hide_timers();
        self.subject = Some(PopupSubject::Day(date));
        self.content = PopupContent::from_articles(PopupKind::Day, articles);
        self.anchor = anchor;
        self.show_or_defer();
    }

    /// The pointer entered a month cell.  The month's articles are fetched
    /// and the popup shows as loading until they arrive.
    pub fn enter_month(&mut self, year: Year, month: Month, anchor: Rect) {
        self.cancel_hide_timers();
        self.load_month(year, month, anchor);
        self.show_or_defer();
    }

    /// Open the popup for a month straight away (on click)
    pub fn show_month(&mut self, year: Year, month: Month, anchor: Rect) {
        self.cancel_hide_timers();
        self.load_month(year, month, anchor);
        self.cancel_timer(TimerKind::ShowIntent);
        self.visible = true;
    }

    fn load_month(&mut self, year: Year, month: Month, anchor: Rect) {
        let subject = PopupSubject::Month(year, month);
        if self.subject == Some(subject) {
            return;
        }
        let id = self.month_requests.issue();
        self.effects
            .push(Effect::FetchMonth(MonthRequest { id, year, month }));
        self.subject = Some(subject);
        self.content = PopupContent::Loading;
        self.anchor = anchor;
        self.rect = None;
    }

    /// The pointer left the source element
    pub fn leave_source(&mut self, to_popup: bool) {
        self.cancel_timer(TimerKind::ShowIntent);
        if to_popup {
            return;
        }
        self.schedule(TimerKind::SourceGrace, self.timings.source_grace);
    }

    pub fn enter_popup(&mut self) {
        self.cancel_hide_timers();
        self.hover.is_popup_hovered = true;
    }

    pub fn leave_popup(&mut self) {
        self.hover.is_popup_hovered = false;
        self.schedule(TimerKind::PopupGrace, self.timings.popup_grace);
    }

    /// A timer scheduled by this popup fired.  Returns whether the popup
    /// changed.  Timers that have since been replaced or cancelled are
    /// ignored.
    pub fn timer_fired(&mut self, id: TimerId) -> bool {
        let Some(kind) = self.hover.kind_of(id) else {
            return false;
        };
        *self.hover.pending_mut(kind) = None;

        match kind {
            TimerKind::ShowIntent => {
                self.visible = true;
                true
            }
            TimerKind::SourceGrace | TimerKind::PopupGrace => {
                if self.hover.is_popup_hovered || !self.visible {
                    return false;
                }
                self.hide();
                true
            }
        }
    }

    /// Apply fetched month articles.  Returns whether they were current.
    pub fn apply_month_articles(&mut self, id: RequestId, articles: Vec<ArticleSummary>) -> bool {
        if self.kind != PopupKind::Month || !self.month_requests.accept(id) {
            return false;
        }
        self.content = PopupContent::from_articles(PopupKind::Month, articles);
        true
    }

    /// Hide now, dropping any pending timers and fetch
    pub fn hide(&mut self) {
        debug!("Hiding the {:?} popup", self.kind);
        for kind in [
            TimerKind::SourceGrace,
            TimerKind::PopupGrace,
            TimerKind::ShowIntent,
        ] {
            self.cancel_timer(kind);
        }
        self.month_requests.cancel();
        self.hover.is_popup_hovered = false;
        self.visible = false;
        self.subject = None;
        self.content = PopupContent::Empty;
        self.rect = None;
    }

    /// Position the popup now that the host knows its size
    pub fn place(&mut self, popup_size: Size, viewport: Size) -> Rect {
        let rect = position_popup(self.anchor, popup_size, viewport);
        self.rect = Some(rect);
        rect
    }

    /// The popup's hitbox, once visible and placed
    pub fn hitbox(&self) -> Option<Hitbox> {
        match (self.visible, self.rect) {
            (true, Some(rect)) => Some(Hitbox::new(rect, HitTarget::Popup)),
            _ => None,
        }
    }

    /// What to draw, if visible
    pub fn model(&self) -> Option<PopupModel> {
        let subject = self.subject.filter(|_| self.visible)?;
        let lines = match (&self.content, self.kind) {
            (PopupContent::Loading, _) => vec![PopupLine::Message(LOADING_MESSAGE)],
            (PopupContent::Empty, _) => vec![PopupLine::Message(NO_ARTICLES_MESSAGE)],
            (PopupContent::Articles(articles), PopupKind::Day) => {
                articles.iter().map(article_line).collect()
            }
            (content @ PopupContent::Articles(_), PopupKind::Month) => {
                let month = match subject {
                    PopupSubject::Month(_, month) => month_name(month),
                    PopupSubject::Day(date) => month_name(date.month()),
                };
                content
                    .grouped_by_day()
                    .into_iter()
                    .flat_map(|(day, articles)| {
                        std::iter::once(PopupLine::Heading(format!("{month} {day}")))
                            .chain(articles.iter().map(article_line))
                    })
                    .collect()
            }
        };
        Some(PopupModel {
            title: subject.title(),
            title_target: subject.target(),
            rect: self.rect,
            lines,
        })
    }

    pub fn drain_effects(&mut self) -> std::vec::Drain<'_, Effect> {
        self.effects.drain(..)
    }

    fn show_or_defer(&mut self) {
        if self.visible || self.timings.show_delay.is_zero() {
            self.cancel_timer(TimerKind::ShowIntent);
            self.visible = true;
        } else {
            self.schedule(TimerKind::ShowIntent, self.timings.show_delay);
        }
    }

    fn cancel_hide_timers(&mut self) {
        self.cancel_timer(TimerKind::SourceGrace);
        self.cancel_timer(TimerKind::PopupGrace);
    }

    /// Replaces any pending timer of the same kind
    fn schedule(&mut self, kind: TimerKind, delay: Duration) {
        self.cancel_timer(kind);
        let id = TimerId::next();
        *self.hover.pending_mut(kind) = Some(id);
        self.effects
            .push(Effect::ScheduleTimer { id, kind, delay });
    }

    fn cancel_timer(&mut self, kind: TimerKind) {
        if let Some(id) = self.hover.pending_mut(kind).take() {
            self.effects.push(Effect::CancelTimer(id));
        }
    }
}

fn article_line(article: &ArticleSummary) -> PopupLine {
    PopupLine::Article {
        title: article.title.clone(),
        permalink: article.permalink.clone(),
        time_of_day: article.time_of_day,
    }
}
