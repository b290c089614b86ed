//! Compiled-in civilization dataset.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Deserialize;

use crate::error::{Result, TimelineError};

use super::{Civilization, EraBackdrop};

const BUILTIN_DATASET: &str = include_str!("../../assets/civilizations.json");

#[derive(Deserialize)]
struct RawDataset {
    civilizations: Vec<Civilization>,
    #[serde(default)]
    eras: Vec<EraBackdrop>,
}

/// Ordered civilizations plus the era bands painted behind them.
///
/// The civilization list is shared behind an `Arc` so the timeline view can
/// tell whether it was handed a new set or the same one again.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub civilizations: Arc<[Arc<Civilization>]>,
    pub eras: Arc<[EraBackdrop]>,
}

impl Dataset {
    /// The dataset shipped with the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_DATASET)
    }

    /// Parse and validate a dataset document.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawDataset = serde_json::from_str(json)?;

        let mut seen = HashSet::with_capacity(raw.civilizations.len());
        for civ in &raw.civilizations {
            if !seen.insert(civ.id.as_str()) {
                return Err(TimelineError::DuplicateEntity(civ.id.clone()));
            }
        }
        for civ in &raw.civilizations {
            if let Some(parent) = civ.parent_id.as_deref() {
                if !seen.contains(parent) {
                    tracing::debug!(id = %civ.id, parent, "parent not in dataset, laying out as a root");
                }
            }
        }

        Ok(Self {
            civilizations: raw.civilizations.into_iter().map(Arc::new).collect(),
            eras: raw.eras.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find<'a>(dataset: &'a Dataset, id: &str) -> Option<&'a Arc<Civilization>> {
        dataset.civilizations.iter().find(|civ| civ.id == id)
    }

    #[test]
    fn test_builtin_dataset_loads() {
        let dataset = Dataset::builtin().unwrap();
        assert_eq!(dataset.civilizations.len(), 23);
        assert_eq!(dataset.eras.len(), 7);
        assert_eq!(dataset.eras[0].name, "ANCIENT");
    }

    #[test]
    fn test_builtin_parents_resolve() {
        let dataset = Dataset::builtin().unwrap();
        for civ in dataset.civilizations.iter() {
            if let Some(parent) = &civ.parent_id {
                assert!(find(&dataset, parent).is_some(), "{} -> {}", civ.id, parent);
            }
        }
        let usa = find(&dataset, "modern-usa").unwrap();
        assert_eq!(usa.end_year, None);
        assert_eq!(usa.parent_id.as_deref(), Some("enlightenment-europe"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r##"{"civilizations": [
            {"id": "a", "name": "A", "start_year": 0, "end_year": 10, "color": "#ffffff"},
            {"id": "a", "name": "A again", "start_year": 5, "end_year": 20, "color": "#ffffff"}
        ]}"##;
        assert!(matches!(
            Dataset::from_json(json),
            Err(TimelineError::DuplicateEntity(id)) if id == "a"
        ));
    }

    #[test]
    fn test_dangling_parent_is_tolerated() {
        let json = r##"{"civilizations": [
            {"id": "a", "name": "A", "start_year": 0, "end_year": 10, "color": "#ffffff", "parent_id": "ghost"}
        ]}"##;
        let dataset = Dataset::from_json(json).unwrap();
        assert!(dataset.eras.is_empty());
        assert_eq!(dataset.civilizations[0].parent_id.as_deref(), Some("ghost"));
    }

    #[test]
    fn test_bad_color_is_a_dataset_error() {
        let json = r#"{"civilizations": [
            {"id": "a", "name": "A", "start_year": 0, "end_year": 10, "color": "blue-ish"}
        ]}"#;
        assert!(matches!(Dataset::from_json(json), Err(TimelineError::Dataset(_))));
    }
}
