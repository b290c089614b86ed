//! Pointer and wheel handling for the timeline canvas.
//!
//! [`TimelineView`] is the single owner of layout, viewport and interaction
//! state. Input handlers mutate it through explicit transitions and report
//! whether a new frame is needed; painting only reads it.

use std::sync::Arc;

use crate::state::{Civilization, Dataset, EraBackdrop, TimelineSettings};

use super::coords::{Point, YearScale};
use super::layout::{LayoutMetrics, TimelineLayout};
use super::scene::{build_scene, Scene, SceneInput};
use super::viewport::Viewport;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    /// `anchor` is the pointer position minus the offset at drag start.
    Dragging { anchor: Point },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionState {
    pub hovered: Option<String>,
    /// Owned by whoever consumes selection events; mirrored here for painting.
    pub selected: Option<String>,
    pub drag: DragState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorStyle {
    Grab,
    Grabbing,
    Pointer,
}

impl CursorStyle {
    pub fn as_css(self) -> &'static str {
        match self {
            CursorStyle::Grab => "grab",
            CursorStyle::Grabbing => "grabbing",
            CursorStyle::Pointer => "pointer",
        }
    }
}

/// Outcome of one input event.
#[derive(Debug, Clone, Default)]
pub struct InputResponse {
    pub redraw: bool,
    /// Set when a click landed on a block.
    pub selected: Option<Arc<Civilization>>,
}

impl InputResponse {
    fn redraw(redraw: bool) -> Self {
        Self {
            redraw,
            selected: None,
        }
    }
}

pub struct TimelineView {
    civilizations: Arc<[Arc<Civilization>]>,
    eras: Arc<[EraBackdrop]>,
    year_scale: YearScale,
    metrics: LayoutMetrics,
    layout: TimelineLayout,
    viewport: Viewport,
    interaction: InteractionState,
    surface: Option<SurfaceSize>,
    /// False until the content has been centered in a real surface.
    centered: bool,
}

impl TimelineView {
    pub fn new(dataset: &Dataset, settings: &TimelineSettings) -> Self {
        let layout = TimelineLayout::compute(&dataset.civilizations, &settings.years, &settings.layout);
        Self {
            civilizations: Arc::clone(&dataset.civilizations),
            eras: Arc::clone(&dataset.eras),
            year_scale: settings.years,
            metrics: settings.layout,
            layout,
            viewport: Viewport::new(settings.zoom),
            interaction: InteractionState::default(),
            surface: None,
            centered: false,
        }
    }

    /// Swaps in a new dataset. The layout is rebuilt only when the entity
    /// list itself changed.
    // The shipped dataset is compiled in and never replaced at runtime.
    #[cfg(test)]
    pub fn set_dataset(&mut self, dataset: &Dataset) -> bool {
        let mut changed = false;
        if !Arc::ptr_eq(&self.eras, &dataset.eras) {
            self.eras = Arc::clone(&dataset.eras);
            changed = true;
        }
        if !Arc::ptr_eq(&self.civilizations, &dataset.civilizations) {
            self.civilizations = Arc::clone(&dataset.civilizations);
            self.layout = TimelineLayout::compute(&self.civilizations, &self.year_scale, &self.metrics);
            let stale_hover = self
                .interaction
                .hovered
                .as_deref()
                .is_some_and(|id| self.layout.node(id).is_none());
            if stale_hover {
                self.interaction.hovered = None;
            }
            changed = true;
        }
        changed
    }

    /// Records the canvas size. Non-positive sizes mark the surface as not
    /// ready; painting and pointer handling are skipped until the next
    /// valid resize. Returns true when the frame must be repainted or cleared.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        if !(width > 0.0 && height > 0.0) {
            let collapsed = self.surface.take().is_some();
            if collapsed {
                tracing::debug!(width, height, "timeline surface collapsed");
            }
            return collapsed;
        }
        let size = SurfaceSize { width, height };
        if self.surface == Some(size) {
            return false;
        }
        self.surface = Some(size);
        if !self.centered {
            self.viewport.center_content(self.layout.extent_bottom(), height);
            self.centered = true;
        }
        true
    }

    pub fn pointer_down(&mut self, screen: Point) -> InputResponse {
        if self.surface.is_none() {
            return InputResponse::default();
        }
        if let DragState::Dragging { .. } = self.interaction.drag {
            return InputResponse::default();
        }
        let world = self.viewport.screen_to_world(screen);
        if let Some(node) = self.layout.hit_test(world) {
            tracing::debug!(id = node.id(), "timeline block clicked");
            return InputResponse {
                redraw: false,
                selected: Some(Arc::clone(&node.civ)),
            };
        }
        let offset = self.viewport.offset();
        self.interaction.drag = DragState::Dragging {
            anchor: Point::new(screen.x - offset.x, screen.y - offset.y),
        };
        InputResponse::redraw(true)
    }

    pub fn pointer_move(&mut self, screen: Point) -> InputResponse {
        if self.surface.is_none() {
            return InputResponse::default();
        }
        let mut redraw = false;
        if let DragState::Dragging { anchor } = self.interaction.drag {
            self.viewport
                .set_offset(Point::new(screen.x - anchor.x, screen.y - anchor.y));
            redraw = true;
        }
        let world = self.viewport.screen_to_world(screen);
        let hovered = self.layout.hit_test(world).map(|node| node.id().to_string());
        if hovered != self.interaction.hovered {
            self.interaction.hovered = hovered;
            redraw = true;
        }
        InputResponse::redraw(redraw)
    }

    pub fn pointer_up(&mut self) -> InputResponse {
        InputResponse::redraw(self.end_drag())
    }

    pub fn pointer_leave(&mut self) -> InputResponse {
        let ended = self.end_drag();
        let unhovered = self.interaction.hovered.take().is_some();
        InputResponse::redraw(ended || unhovered)
    }

    /// Zooms around `screen`; positive `delta_y` zooms out.
    pub fn wheel(&mut self, screen: Point, delta_y: f64) -> InputResponse {
        if self.surface.is_none() {
            return InputResponse::default();
        }
        let before = self.viewport;
        self.viewport.wheel_zoom(screen, delta_y);
        InputResponse::redraw(self.viewport != before)
    }

    /// Mirrors the externally owned selection.
    pub fn set_selection(&mut self, selected: Option<String>) -> bool {
        if self.interaction.selected == selected {
            return false;
        }
        self.interaction.selected = selected;
        true
    }

    pub fn zoom_in(&mut self) -> bool {
        let before = self.viewport.scale();
        self.viewport.step_in();
        self.viewport.scale() != before
    }

    pub fn zoom_out(&mut self) -> bool {
        let before = self.viewport.scale();
        self.viewport.step_out();
        self.viewport.scale() != before
    }

    pub fn reset_view(&mut self) -> bool {
        match self.surface {
            Some(size) => {
                self.viewport.reset(self.layout.extent_bottom(), size.height);
                self.centered = true;
            }
            None => {
                self.viewport.set_scale(1.0);
                self.centered = false;
            }
        }
        true
    }

    /// A hovered block shows the pointer even mid-drag.
    pub fn cursor(&self) -> CursorStyle {
        if self.interaction.hovered.is_some() {
            return CursorStyle::Pointer;
        }
        match self.interaction.drag {
            DragState::Dragging { .. } => CursorStyle::Grabbing,
            DragState::Idle => CursorStyle::Grab,
        }
    }

    /// The frame for the current state, or `None` while there is no surface.
    pub fn scene(&self) -> Option<Scene> {
        let size = self.surface?;
        build_scene(&SceneInput {
            eras: &self.eras,
            layout: &self.layout,
            year_scale: &self.year_scale,
            metrics: &self.metrics,
            viewport: &self.viewport,
            hovered: self.interaction.hovered.as_deref(),
            selected: self.interaction.selected.as_deref(),
            width: size.width,
            height: size.height,
        })
    }

    pub fn layout(&self) -> &TimelineLayout {
        &self.layout
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    fn end_drag(&mut self) -> bool {
        let was_dragging = matches!(self.interaction.drag, DragState::Dragging { .. });
        self.interaction.drag = DragState::Idle;
        was_dragging
    }
}
