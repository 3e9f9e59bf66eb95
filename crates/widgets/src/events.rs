// SPDX-License-Identifier: MIT

//!
//! Events
//!
//! Pointer input comes in from the host as [`Point`]s and [`ClickEvent`]s,
//! and is resolved to a [`HitTarget`] by [`hit_test`].  The widgets answer
//! with [`Effect`]s which the host drains and carries out (fetching, timers,
//! navigation).
//!

use crate::{MonthRequest, Point, RangeRequest, Rect};
use serde::Serialize;
use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use timeline_calendar_core::{Day, Direction, Month, NavigationTarget, Year};

/// The navigation controls of an interactive month grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GridNav {
    PrevYear,
    PrevMonth,
    NextMonth,
    NextYear,
}

/// Everything a pointer can be over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HitTarget {
    /// Paging button of the sparkline or the year switcher
    NavButton(Direction),
    GridNav(GridNav),
    YearLabel(Year),
    MonthCell { year: Year, month: Month },
    DayCell(Day),
    YearItem(Year),
    Popup,
}

/// A clickable/hoverable area of a render model
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hitbox {
    pub rect: Rect,
    pub target: HitTarget,
}

impl Hitbox {
    pub fn new(rect: Rect, target: HitTarget) -> Self {
        Hitbox { rect, target }
    }
}

/// The target under the point.  Hitboxes pushed later are drawn on top, so
/// the search runs backwards.
pub fn hit_test(hitboxes: &[Hitbox], point: Point) -> Option<HitTarget> {
    hitboxes
        .iter()
        .rev()
        .find(|hitbox| hitbox.rect.contains(point))
        .map(|hitbox| hitbox.target)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MouseButton {
    Primary,
    Middle,
    Secondary,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Modifiers {
    pub ctrl: bool,
    /// The command key on macOS
    pub command: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.ctrl || self.command
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClickEvent {
    pub point: Point,
    pub button: MouseButton,
    pub modifiers: Modifiers,
}

impl ClickEvent {
    /// A plain primary click
    pub fn primary(point: Point) -> Self {
        ClickEvent {
            point,
            button: MouseButton::Primary,
            modifiers: Modifiers::default(),
        }
    }

    /// Whether the click asks for the target to be opened directly (ctrl/cmd
    /// click, middle click, or the context menu button)
    pub fn wants_direct_navigation(&self) -> bool {
        match self.button {
            MouseButton::Primary => self.modifiers.any(),
            MouseButton::Middle | MouseButton::Secondary => true,
        }
    }
}

static NEXT_TIMER_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies a scheduled timer.  Unique for the life of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TimerId(u64);

impl TimerId {
    pub fn next() -> Self {
        TimerId(NEXT_TIMER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// What a popup timer is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TimerKind {
    /// Started when the pointer leaves the element that opened the popup
    SourceGrace,
    /// Started when the pointer leaves the popup itself
    PopupGrace,
    /// Delays showing the popup after the pointer enters its source
    ShowIntent,
}

/// Work a widget asks its host to do
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchMonth(MonthRequest),
    FetchRange(RangeRequest),
    ScheduleTimer {
        id: TimerId,
        kind: TimerKind,
        delay: Duration,
    },
    CancelTimer(TimerId),
    /// Go to a page.  `new_context` is set when the page should open in a new
    /// tab/window (ctrl/cmd or middle click), in which case the host must not
    /// suppress its default handling of the click.
    Navigate {
        target: NavigationTarget,
        new_context: bool,
    },
    /// Replace the query string of the address without reloading
    UpdateAddress { query: String },
}

impl Effect {
    pub fn navigate(target: NavigationTarget) -> Self {
        Effect::Navigate {
            target,
            new_context: false,
        }
    }
}
