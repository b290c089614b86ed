use serde::{Deserialize, Serialize};

use crate::constants::{TIMELINE_BASE_WIDTH, TIMELINE_MAX_YEAR, TIMELINE_MIN_YEAR};

/// Affine map from calendar years onto the horizontal world axis.
///
/// `[min_year, max_year]` lands on `[0, base_width]`. Years outside the domain
/// keep mapping linearly, there is no clamping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YearScale {
    pub min_year: i32,
    pub max_year: i32,
    pub base_width: f64,
}

impl Default for YearScale {
    fn default() -> Self {
        Self {
            min_year: TIMELINE_MIN_YEAR,
            max_year: TIMELINE_MAX_YEAR,
            base_width: TIMELINE_BASE_WIDTH,
        }
    }
}

impl YearScale {
    /// World units per year.
    pub fn units_per_year(&self) -> f64 {
        let range = (self.max_year as f64 - self.min_year as f64).max(1.0);
        self.base_width / range
    }

    pub fn year_to_x(&self, year: i32) -> f64 {
        (year as f64 - self.min_year as f64) * self.units_per_year()
    }

    /// Maps an end year, treating "ongoing" as the domain's last year.
    pub fn end_to_x(&self, end_year: Option<i32>) -> f64 {
        self.year_to_x(end_year.unwrap_or(self.max_year))
    }
}

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle, origin at the top-left.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Edges are inclusive.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Shrinks the rectangle horizontally by `inset` on each side.
    pub fn inset_x(&self, inset: f64) -> Rect {
        Rect::new(self.x + inset, self.y, (self.width - inset * 2.0).max(0.0), self.height)
    }
}
