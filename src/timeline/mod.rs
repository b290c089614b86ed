//! Timeline module
//!
//! The painted canvas and its overlay controls.

mod canvas;
mod zoom_controls;

pub use canvas::TimelineCanvas;
pub use zoom_controls::ZoomControls;
