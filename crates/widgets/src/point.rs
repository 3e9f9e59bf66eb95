// SPDX-License-Identifier: MIT

//!
//! Points and boxes, in viewport pixels
//!

use serde::Serialize;
use std::fmt::Debug;

pub type Size = Point;
pub type Position = Point;

#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn min(self, other: Self) -> Self {
        Point {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
        }
    }

    pub fn max(self, other: Self) -> Self {
        Point {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
        }
    }

    pub fn offset(self, by: Point) -> Self {
        Point {
            x: self.x + by.x,
            y: self.y + by.y,
        }
    }
}

/// A box that specifies the location and size of something (e.g. a day cell
/// or the popup)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rect {
    /// The smallest x/y values (boxes grow down and to the right from here)
    pub position: Position,

    pub width: f64,

    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            position: Point { x, y },
            width,
            height,
        }
    }

    pub fn left(&self) -> f64 {
        self.position.x
    }

    pub fn top(&self) -> f64 {
        self.position.y
    }

    /// Calculate the largest x value of the box
    pub fn max_x(&self) -> f64 {
        self.position.x + self.width
    }

    /// Calculate the largest y value of the box (i.e. how far the box grows
    /// downwards)
    pub fn max_y(&self) -> f64 {
        self.position.y + self.height
    }

    pub fn centre_x(&self) -> f64 {
        self.position.x + self.width / 2.0
    }

    /// Inclusive of the top and left edges only, so that boxes sharing an
    /// edge never both contain a point
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.position.x
            && point.x < self.max_x()
            && point.y >= self.position.y
            && point.y < self.max_y()
    }

    pub fn offset(self, by: Point) -> Self {
        Rect {
            position: self.position.offset(by),
            ..self
        }
    }
}
