//! State management module
//!
//! Data the timeline is built from:
//! - Civilization: one timeline entity with its span, color and lineage
//! - EraBackdrop: a named background band
//! - Dataset: the compiled-in set of both
//! - TimelineSettings: user-tunable layout, zoom and font settings

mod civilization;
mod dataset;
mod settings;

pub use civilization::*;
pub use dataset::*;
pub use settings::*;
