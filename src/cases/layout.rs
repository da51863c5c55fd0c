//! Grid and slot layout generation for new cases.

use log::warn;
use serde_json::Map;

use crate::cases::filters::FilterResolver;
use crate::cases::ids::IdProvider;
use crate::config::{GridSpec, InternalSize, SlotSpec};
use crate::errors::ModError;
use crate::tables::classes::EMPTY_FILTER;
use crate::tables::{FilterEntry, Grid, GridProps, Slot, SlotProps};

impl InternalSize {
    /// `(cellsH, cellsV)` per column, or an error when the arrays differ in length.
    pub fn columns(&self) -> Result<Vec<(u32, u32)>, ModError> {
        if self.horizontal_cells.len() != self.vertical_cells.len() {
            return Err(ModError::DimensionMismatch {
                horizontal: self.horizontal_cells.len(),
                vertical: self.vertical_cells.len(),
            });
        }
        Ok(self
            .horizontal_cells
            .iter()
            .copied()
            .zip(self.vertical_cells.iter().copied())
            .collect())
    }
}

/// Grids built for one case, plus the warnings logged while building them.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    pub grids: Vec<Grid>,
    pub warnings: Vec<String>,
}

/// Build one grid column per configured cell pair.
///
/// Mismatched cell arrays degrade the case to a single 1x1 column with a warning.
pub fn build_grids(
    case_id: &str,
    case_name: &str,
    spec: &GridSpec,
    ids: &mut dyn IdProvider,
) -> GridLayout {
    let mut warnings = Vec::new();
    let columns = spec.internal_size.columns().unwrap_or_else(|e| {
        warnings.push(e.to_string());
        warnings.push(format!("setting {case_name} to be 1 1x1 cell."));
        vec![(1, 1)]
    });
    for warning in &warnings {
        warn!("[{}] : WARNING: {}", crate::MOD_NAME, warning);
    }
    let resolver = FilterResolver::new(spec);

    let grids = columns
        .into_iter()
        .enumerate()
        .map(|(index, (cells_h, cells_v))| Grid {
            name: format!("column{index}"),
            id: ids.generate(),
            parent: case_id.to_string(),
            props: GridProps {
                filters: vec![resolver.for_cell(index)],
                cells_h: Some(cells_h),
                cells_v: Some(cells_v),
                min_count: Some(0),
                max_count: Some(0),
                max_weight: Some(0),
                is_sorting_table: Some(false),
                extra: Map::new(),
            },
            proto: None,
            extra: Map::new(),
        })
        .collect();

    GridLayout { grids, warnings }
}

/// Build one mount per configured item class, each accepting only that class.
pub fn build_slots(case_id: &str, spec: &SlotSpec, ids: &mut dyn IdProvider) -> Vec<Slot> {
    spec.slot_ids
        .iter()
        .enumerate()
        .map(|(index, class_id)| Slot {
            name: format!("mod_mount_{index}"),
            id: ids.generate(),
            parent: case_id.to_string(),
            props: SlotProps {
                filters: vec![FilterEntry::new(
                    vec![class_id.clone()],
                    vec![EMPTY_FILTER.to_string()],
                )],
                extra: Map::new(),
            },
            required: false,
            merge_slot_with_children: false,
            proto: None,
            extra: Map::new(),
        })
        .collect()
}
