//! Pan/zoom transform between screen pixels and world units.

use serde::{Deserialize, Serialize};

use crate::constants::{BUTTON_ZOOM_FACTOR, MAX_SCALE, MIN_SCALE, RESET_MARGIN_X, WHEEL_ZOOM_FACTOR};

use super::coords::{Point, Rect};

/// Zoom bounds and step sizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomSettings {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Multiplier per wheel notch
    pub wheel_factor: f64,
    /// Multiplier per zoom button press
    pub step_factor: f64,
    /// Horizontal screen offset applied by a view reset
    pub reset_margin_x: f64,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            wheel_factor: WHEEL_ZOOM_FACTOR,
            step_factor: BUTTON_ZOOM_FACTOR,
            reset_margin_x: RESET_MARGIN_X,
        }
    }
}

impl ZoomSettings {
    /// Does not panic on inverted bounds; the upper bound wins.
    pub fn clamp(&self, scale: f64) -> f64 {
        scale.max(self.min_scale).min(self.max_scale)
    }
}

/// `screen = world * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    scale: f64,
    offset: Point,
    zoom: ZoomSettings,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ZoomSettings::default())
    }
}

impl Viewport {
    pub fn new(zoom: ZoomSettings) -> Self {
        Self {
            scale: zoom.clamp(1.0),
            offset: Point::default(),
            zoom,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.offset.x) / self.scale,
            (screen.y - self.offset.y) / self.scale,
        )
    }

    pub fn world_to_screen(&self, world: Point) -> Point {
        Point::new(
            world.x * self.scale + self.offset.x,
            world.y * self.scale + self.offset.y,
        )
    }

    pub fn rect_to_screen(&self, world: Rect) -> Rect {
        let origin = self.world_to_screen(Point::new(world.x, world.y));
        Rect::new(origin.x, origin.y, world.width * self.scale, world.height * self.scale)
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.offset.x += dx;
        self.offset.y += dy;
    }

    pub fn set_offset(&mut self, offset: Point) {
        self.offset = offset;
    }

    /// Scales by `factor` while keeping the world point under `pivot` fixed on screen.
    pub fn zoom_at(&mut self, pivot: Point, factor: f64) {
        let anchor = self.screen_to_world(pivot);
        self.scale = self.zoom.clamp(self.scale * factor);
        self.offset = Point::new(
            pivot.x - anchor.x * self.scale,
            pivot.y - anchor.y * self.scale,
        );
    }

    /// Absolute zoom with no pivot: the offset is left alone.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = self.zoom.clamp(scale);
    }

    pub fn step_in(&mut self) {
        self.set_scale(self.scale * self.zoom.step_factor);
    }

    pub fn step_out(&mut self) {
        self.set_scale(self.scale / self.zoom.step_factor);
    }

    /// Zoom for one wheel event; positive `delta_y` zooms out.
    pub fn wheel_zoom(&mut self, pivot: Point, delta_y: f64) {
        let factor = if delta_y > 0.0 {
            1.0 / self.zoom.wheel_factor
        } else if delta_y < 0.0 {
            self.zoom.wheel_factor
        } else {
            return;
        };
        self.zoom_at(pivot, factor);
    }

    /// Places the content at the left margin and centers `extent_bottom`
    /// (world units) vertically, keeping the current scale.
    pub fn center_content(&mut self, extent_bottom: Option<f64>, viewport_height: f64) {
        let offset_y = match extent_bottom {
            Some(bottom) => viewport_height / 2.0 - bottom / 2.0,
            None => 0.0,
        };
        self.offset = Point::new(self.zoom.reset_margin_x, offset_y);
    }

    /// Back to scale 1 with the content centered.
    pub fn reset(&mut self, extent_bottom: Option<f64>, viewport_height: f64) {
        self.scale = self.zoom.clamp(1.0);
        self.center_content(extent_bottom, viewport_height);
    }
}
