use std::path::{Path, PathBuf};

use ab_glyph::FontVec;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TimelineError};

use super::scene::FontRole;

/// Fonts tried when the config names none.
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "C:\\Windows\\Fonts\\segoeui.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
];

/// Shipped with the binary so labels paint on hosts with none of the above.
const BUNDLED_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

/// Font files for block titles and smaller body labels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSettings {
    pub title: Option<PathBuf>,
    pub body: Option<PathBuf>,
}

pub struct LabelFonts {
    title: FontVec,
    body: Option<FontVec>,
}

impl LabelFonts {
    /// Loads the configured fonts, falling back to well-known system fonts and
    /// then to the bundled face. Returns `None` only when none of those parse;
    /// labels are then not painted.
    pub fn discover(settings: &FontSettings) -> Option<Self> {
        let title = settings
            .title
            .as_deref()
            .and_then(load_logged)
            .or_else(|| {
                SYSTEM_FONT_CANDIDATES
                    .iter()
                    .map(Path::new)
                    .filter(|path| path.exists())
                    .find_map(load_logged)
            })
            .or_else(bundled_font);
        let Some(title) = title else {
            tracing::warn!("no usable font found, timeline labels will not be drawn");
            return None;
        };
        let body = settings.body.as_deref().and_then(load_logged);
        Some(Self { title, body })
    }

    pub fn get(&self, role: FontRole) -> &FontVec {
        match role {
            FontRole::Title => &self.title,
            FontRole::Body => self.body.as_ref().unwrap_or(&self.title),
        }
    }
}

pub fn load_font(path: &Path) -> Result<FontVec> {
    let bytes = std::fs::read(path).map_err(|source| TimelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    FontVec::try_from_vec(bytes).map_err(|source| TimelineError::Font {
        path: path.to_path_buf(),
        source,
    })
}

fn bundled_font() -> Option<FontVec> {
    match FontVec::try_from_vec(BUNDLED_FONT.to_vec()) {
        Ok(font) => {
            tracing::debug!("using bundled label font");
            Some(font)
        }
        Err(err) => {
            tracing::warn!("bundled font is unreadable: {err}");
            None
        }
    }
}

fn load_logged(path: &Path) -> Option<FontVec> {
    match load_font(path) {
        Ok(font) => {
            tracing::debug!(?path, "loaded label font");
            Some(font)
        }
        Err(err) => {
            tracing::warn!("{err}");
            None
        }
    }
}
