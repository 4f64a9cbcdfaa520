// Study table state synchronization schema
//
// The durable copy of a study lives in a single browser storage slot under
// [`STORAGE_KEY`]; `static/study.js` overwrites it on every cell edit and on
// explicit Save, last write wins. This module owns the slot schema and the
// encode/decode contract between that JSON and [`Study`]; the export
// endpoint reads the slot back through `decode`.
//
// Corrupt or mis-shaped data decodes to `None` ("no saved data"), never an
// error surfaced to the user.

use crate::models::{Aspect, Study};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The single localStorage key holding the current study
pub const STORAGE_KEY: &str = "vertical_study_table";

/// Wire shape of the storage slot.
///
/// Cells are keyed by `cond{index}_{aspect name}`, mirroring the textarea
/// ids in the rendered table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedStudy {
    pub syndrome: String,
    pub conditions: Vec<String>,
    #[serde(default)]
    pub cells: HashMap<String, String>,
}

/// Composite storage key for one cell
pub fn cell_key(condition: usize, aspect: Aspect) -> String {
    format!("cond{}_{}", condition, aspect.as_str())
}

/// Parse a composite cell key back into its coordinates.
///
/// Returns `None` for keys that don't match the `cond{i}_{aspect}` shape.
pub fn parse_cell_key(key: &str) -> Option<(usize, Aspect)> {
    let rest = key.strip_prefix("cond")?;
    let (index, aspect) = rest.split_once('_')?;
    let index = index.parse::<usize>().ok()?;
    let aspect = aspect.parse::<Aspect>().ok()?;
    Some((index, aspect))
}

impl From<&Study> for SavedStudy {
    fn from(study: &Study) -> Self {
        let mut cells = HashMap::new();
        for (i, _) in study.conditions().iter().enumerate() {
            for aspect in Aspect::ALL {
                let text = study.cell(i, aspect);
                if !text.is_empty() {
                    cells.insert(cell_key(i, aspect), text.to_string());
                }
            }
        }

        Self {
            syndrome: study.syndrome().to_string(),
            conditions: study.conditions().to_vec(),
            cells,
        }
    }
}

/// Serialize a study into the storage slot format
pub fn encode(study: &Study) -> Result<String, String> {
    serde_json::to_string(&SavedStudy::from(study))
        .map_err(|e| format!("Failed to serialize study: {}", e))
}

/// Rebuild a study from a raw storage slot.
///
/// Unrecognized cell keys and out-of-range condition indexes are skipped;
/// anything that fails validation yields `None`.
pub fn decode(raw: &str) -> Option<Study> {
    let saved: SavedStudy = match serde_json::from_str(raw) {
        Ok(saved) => saved,
        Err(e) => {
            log::warn!("Ignoring unparseable saved study: {}", e);
            return None;
        }
    };
    from_saved(&saved)
}

/// Rebuild a study from an already-parsed slot
pub fn from_saved(saved: &SavedStudy) -> Option<Study> {
    let mut study = Study::new(&saved.syndrome, &saved.conditions).ok()?;

    for (key, text) in &saved.cells {
        if let Some((index, aspect)) = parse_cell_key(key) {
            study.set_cell(index, aspect, text.clone());
        }
    }

    Some(study)
}
