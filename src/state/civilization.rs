use serde::{Deserialize, Serialize};

use crate::core::color::Color;

/// One civilization record on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Civilization {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// First year, negative for BCE
    pub start_year: i32,
    /// Last year, `None` while the civilization is ongoing
    #[serde(default)]
    pub end_year: Option<i32>,
    /// Block and connector color
    pub color: Color,
    /// Civilization this one derives from
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cultural_highlights: Vec<String>,
    #[serde(default)]
    pub region: String,
}

impl Civilization {
    /// End year with "present" resolved against the given year.
    pub fn end_or(&self, present: i32) -> i32 {
        self.end_year.unwrap_or(present)
    }

    /// Span in years, measuring ongoing civilizations up to `current_year`.
    pub fn duration_years(&self, current_year: i32) -> i32 {
        self.end_or(current_year) - self.start_year
    }

    /// "3500 BCE - 539 BCE" style range used on blocks and in the detail panel.
    pub fn year_range_label(&self) -> String {
        format!("{} - {}", format_year(self.start_year), format_end_year(self.end_year))
    }
}

/// Named era band painted behind the civilizations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EraBackdrop {
    pub name: String,
    pub start_year: i32,
    pub end_year: i32,
    pub color: Color,
}

/// Formats a year as "<abs> BCE" or "<year> CE".
pub fn format_year(year: i32) -> String {
    if year < 0 {
        format!("{} BCE", year.unsigned_abs())
    } else {
        format!("{} CE", year)
    }
}

/// Formats an end year, using "Present" for ongoing spans.
pub fn format_end_year(year: Option<i32>) -> String {
    match year {
        Some(year) => format_year(year),
        None => "Present".to_string(),
    }
}
