//! Filter resolution for generated grid columns, and the compatibility patch for
//! containers whose filters were stripped by other mods.

use log::debug;

use crate::config::{CellSelector, GridSpec};
use crate::tables::classes::{
    BACKPACK, EMPTY_FILTER, ITEM, MOB_CONTAINER, RESERVED_SECURE_CONTAINER, VEST,
};
use crate::tables::{FilterEntry, ItemTable, TemplateItem};

impl CellSelector {
    /// Whether the zero-based column `index` takes the unique filters.
    pub fn selects(&self, index: usize) -> bool {
        match self {
            CellSelector::SingleIndex(n) => *n >= 1 && index == n - 1,
            CellSelector::PerIndexFlags(flags) => flags.get(index).is_some_and(|f| f.is_set()),
        }
    }
}

/// Expand the `[""]` placeholder to the root item class so the column accepts anything.
pub fn expand_include(list: &[String]) -> Vec<String> {
    if list.len() == 1 && list[0] == EMPTY_FILTER {
        vec![ITEM.to_string()]
    } else {
        list.to_vec()
    }
}

/// Effective include/exclude pairs for the columns of one container case.
#[derive(Debug, Clone)]
pub struct FilterResolver<'a> {
    base: (Vec<String>, Vec<String>),
    unique: (Vec<String>, Vec<String>),
    selector: Option<&'a CellSelector>,
}

impl<'a> FilterResolver<'a> {
    pub fn new(spec: &'a GridSpec) -> Self {
        Self {
            base: (
                expand_include(&spec.included_filter),
                spec.excluded_filter.clone(),
            ),
            unique: (
                expand_include(&spec.unique_included_filter),
                spec.unique_excluded_filter.clone(),
            ),
            selector: spec.unique_cells.as_ref(),
        }
    }

    pub fn is_unique(&self, index: usize) -> bool {
        self.selector.is_some_and(|s| s.selects(index))
    }

    pub fn for_cell(&self, index: usize) -> FilterEntry {
        let (include, exclude) = if self.is_unique(index) {
            &self.unique
        } else {
            &self.base
        };
        FilterEntry::new(include.clone(), exclude.clone())
    }
}

fn needs_filter_repair(item: &TemplateItem) -> bool {
    let patched_class = item.is_a(BACKPACK)
        || item.is_a(VEST)
        || (item.is_a(MOB_CONTAINER) && item.id != RESERVED_SECURE_CONTAINER);
    if !patched_class {
        return false;
    }
    item.props
        .grids
        .as_ref()
        .and_then(|grids| grids.first())
        .is_some_and(|grid| grid.props.filters.is_empty())
}

/// Reinstate an accept-all filter on backpacks, vests and mob containers whose
/// first grid lost its filter list. Existing filter lists are never touched.
///
/// Returns the number of items repaired.
pub fn restore_stripped_filters(items: &mut ItemTable) -> usize {
    let mut repaired = 0;
    for item in items.values_mut() {
        if !needs_filter_repair(item) {
            continue;
        }
        if let Some(grid) = item.first_grid_mut() {
            grid.props.filters = vec![FilterEntry::accept_all()];
            debug!("restored stripped filters on {}", item.id);
            repaired += 1;
        }
    }
    repaired
}
