use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::coords::YearScale;
use crate::core::fonts::FontSettings;
use crate::core::layout::LayoutMetrics;
use crate::core::viewport::ZoomSettings;
use crate::error::{Result, TimelineError};

/// Environment variable pointing at an explicit config file.
pub const CONFIG_ENV_VAR: &str = "CULTURAL_TIMELINE_CONFIG";
const CONFIG_FILE_NAME: &str = "timeline.json";

/// Timeline tunables. Every field falls back to its default when omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineSettings {
    /// Year domain and world width
    pub years: YearScale,
    /// Row packing and block geometry
    pub layout: LayoutMetrics,
    /// Zoom bounds and steps
    pub zoom: ZoomSettings,
    /// Label fonts
    pub fonts: FontSettings,
}

impl TimelineSettings {
    /// Reads settings from `path`; `Ok(None)` when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(TimelineError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let settings: Self =
            serde_json::from_str(&json).map_err(|source| TimelineError::Config {
                path: path.to_path_buf(),
                source,
            })?;
        settings
            .validate()
            .map_err(|reason| TimelineError::InvalidConfig {
                path: path.to_path_buf(),
                reason,
            })?;
        Ok(Some(settings))
    }

    /// Rejects values that parse but cannot drive a layout or viewport.
    pub fn validate(&self) -> std::result::Result<(), String> {
        let zoom = &self.zoom;
        if !(zoom.min_scale.is_finite() && zoom.max_scale.is_finite()) {
            return Err("zoom bounds must be finite".into());
        }
        if zoom.min_scale <= 0.0 || zoom.min_scale > zoom.max_scale {
            return Err(format!(
                "zoom bounds need 0 < min_scale <= max_scale, got {} and {}",
                zoom.min_scale, zoom.max_scale
            ));
        }
        if !(zoom.wheel_factor.is_finite() && zoom.wheel_factor > 0.0) {
            return Err(format!("wheel_factor must be positive, got {}", zoom.wheel_factor));
        }
        if !(zoom.step_factor.is_finite() && zoom.step_factor > 0.0) {
            return Err(format!("step_factor must be positive, got {}", zoom.step_factor));
        }
        if !zoom.reset_margin_x.is_finite() {
            return Err("reset_margin_x must be finite".into());
        }

        let years = &self.years;
        if years.max_year <= years.min_year {
            return Err(format!(
                "year domain is empty: {}..{}",
                years.min_year, years.max_year
            ));
        }
        if !(years.base_width.is_finite() && years.base_width > 0.0) {
            return Err(format!("base_width must be positive, got {}", years.base_width));
        }

        let layout = &self.layout;
        let metrics = [
            ("row_height", layout.row_height),
            ("base_offset", layout.base_offset),
            ("row_padding", layout.row_padding),
            ("min_node_width", layout.min_node_width),
            ("node_height", layout.node_height),
            ("corner_radius", layout.corner_radius),
            ("extent_margin", layout.extent_margin),
        ];
        if let Some((name, value)) = metrics.iter().find(|(_, value)| !value.is_finite()) {
            return Err(format!("layout {name} must be finite, got {value}"));
        }
        if layout.row_height <= 0.0 || layout.node_height <= 0.0 {
            return Err("row_height and node_height must be positive".into());
        }
        if layout.row_padding < 0.0 || layout.min_node_width < 0.0 || layout.corner_radius < 0.0 {
            return Err("row_padding, min_node_width and corner_radius must not be negative".into());
        }
        Ok(())
    }

    /// Loads from the configured location, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        match Self::load_from(&path) {
            Ok(Some(settings)) => {
                tracing::info!(?path, "loaded timeline settings");
                settings
            }
            Ok(None) => {
                tracing::debug!(?path, "no settings file, using defaults");
                Self::default()
            }
            Err(err) => {
                tracing::warn!("{err}; using default settings");
                Self::default()
            }
        }
    }
}

/// `$CULTURAL_TIMELINE_CONFIG`, else `timeline.json` beside the executable or
/// in the crate root.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|path| !path.is_empty()) {
        return PathBuf::from(path);
    }
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    let dirs: Vec<PathBuf> = exe_dir
        .into_iter()
        .chain(std::iter::once(PathBuf::from(env!("CARGO_MANIFEST_DIR"))))
        .collect();
    find_config(&dirs)
}

/// The first directory holding a config file wins. With none, the path under
/// the first directory is returned so a later `load_from` reports it missing.
fn find_config(dirs: &[PathBuf]) -> PathBuf {
    let candidates: Vec<PathBuf> = dirs.iter().map(|dir| dir.join(CONFIG_FILE_NAME)).collect();
    candidates
        .iter()
        .find(|candidate| candidate.is_file())
        .or_else(|| candidates.first())
        .cloned()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MAX_SCALE, ROW_HEIGHT, TIMELINE_MIN_YEAR};

    fn temp_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("cultural-timeline-{name}.json"));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let path = temp_config("partial", r#"{ "layout": { "row_height": 90.0 }, "zoom": { "min_scale": 0.5 } }"#);
        let settings = TimelineSettings::load_from(&path).unwrap().unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(settings.layout.row_height, 90.0);
        assert_eq!(settings.zoom.min_scale, 0.5);
        assert_eq!(settings.zoom.max_scale, MAX_SCALE);
        assert_eq!(settings.years.min_year, TIMELINE_MIN_YEAR);
        assert!(settings.fonts.title.is_none());
    }

    #[test]
    fn test_missing_file_is_none() {
        let path = std::env::temp_dir().join("cultural-timeline-does-not-exist.json");
        assert!(TimelineSettings::load_from(&path).unwrap().is_none());
    }

    #[test]
    fn test_malformed_config_is_error() {
        let path = temp_config("malformed", "{ layout: nope }");
        let result = TimelineSettings::load_from(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(TimelineError::Config { .. })));
    }

    #[test]
    fn test_inverted_zoom_bounds_fall_back_to_defaults() {
        let path = temp_config("inverted", r#"{ "zoom": { "min_scale": 4.0, "max_scale": 2.0 } }"#);
        let result = TimelineSettings::load_from(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(TimelineError::InvalidConfig { .. })));

        // What `load` does with that error.
        let settings = result.ok().flatten().unwrap_or_default();
        assert_eq!(settings, TimelineSettings::default());
        let viewport = crate::core::viewport::Viewport::new(settings.zoom);
        assert_eq!(viewport.scale(), 1.0);
    }

    #[test]
    fn test_validate_rejects_degenerate_values() {
        let mut settings = TimelineSettings::default();
        assert!(settings.validate().is_ok());

        settings.zoom.min_scale = f64::NAN;
        assert!(settings.validate().is_err());

        let mut settings = TimelineSettings::default();
        settings.zoom.wheel_factor = 0.0;
        assert!(settings.validate().is_err());

        let mut settings = TimelineSettings::default();
        settings.zoom.step_factor = -1.1;
        assert!(settings.validate().is_err());

        let mut settings = TimelineSettings::default();
        settings.layout.row_height = f64::INFINITY;
        assert!(settings.validate().is_err());

        let mut settings = TimelineSettings::default();
        settings.years.max_year = settings.years.min_year;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_config_lookup_prefers_first_dir_with_a_file() {
        let root = std::env::temp_dir().join("cultural-timeline-lookup");
        let (empty, filled) = (root.join("empty"), root.join("filled"));
        std::fs::create_dir_all(&empty).unwrap();
        std::fs::create_dir_all(&filled).unwrap();
        std::fs::write(filled.join(CONFIG_FILE_NAME), "{}").unwrap();

        let found = find_config(&[empty.clone(), filled.clone()]);
        let missing = find_config(&[empty.clone()]);
        let _ = std::fs::remove_dir_all(&root);

        assert_eq!(found, filled.join(CONFIG_FILE_NAME));
        assert_eq!(missing, empty.join(CONFIG_FILE_NAME));
        assert_eq!(find_config(&[]), PathBuf::from(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_round_trip_defaults() {
        let json = serde_json::to_string_pretty(&TimelineSettings::default()).unwrap();
        let parsed: TimelineSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, TimelineSettings::default());
        assert_eq!(parsed.layout.row_height, ROW_HEIGHT);
    }
}
