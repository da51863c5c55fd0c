//! Where a new case may be stored: backpacks, secure containers, and
//! individually listed items, expressed through those items' own filters.

use log::{debug, warn};

use crate::config::AdmissionConfig;
use crate::tables::classes::{BACKPACK, MOB_CONTAINER, RESERVED_SECURE_CONTAINER};
use crate::tables::{ItemTable, TemplateItem};

fn push_unique(list: &mut Vec<String>, id: &str) {
    if !list.iter().any(|existing| existing == id) {
        list.push(id.to_string());
    }
}

/// Exclude `case_id` from every grid of the item.
fn exclude_from_all_grids(item: &mut TemplateItem, case_id: &str) -> bool {
    let grids = item.grids_mut();
    for grid in grids.iter_mut() {
        push_unique(grid.first_filter_mut().exclude_mut(), case_id);
    }
    !grids.is_empty()
}

fn include_in_first_grid(item: &mut TemplateItem, case_id: &str) -> bool {
    match item.first_grid_mut() {
        Some(grid) => {
            push_unique(grid.first_filter_mut().include_mut(), case_id);
            true
        }
        None => false,
    }
}

fn exclude_from_first_grid(item: &mut TemplateItem, case_id: &str) -> bool {
    match item.first_grid_mut() {
        Some(grid) => {
            push_unique(grid.first_filter_mut().exclude_mut(), case_id);
            true
        }
        None => false,
    }
}

fn lists_reserved(targets: &[String]) -> bool {
    targets.iter().any(|target| target == RESERVED_SECURE_CONTAINER)
}

/// Apply the admission rules for `case_id` across the whole item table.
///
/// The reserved secure container is never touched, not even when listed
/// explicitly. Filter lists only ever grow; missing filter entries are
/// created. Returns the number of items whose filters were changed.
pub fn apply_admission_rules(
    case_id: &str,
    rules: &AdmissionConfig,
    items: &mut ItemTable,
) -> usize {
    if lists_reserved(&rules.case_allowed_in) || lists_reserved(&rules.case_disallowed_in) {
        warn!(
            "[{}] : {} lists the reserved secure container {}; its filters are left unchanged",
            crate::MOD_NAME,
            case_id,
            RESERVED_SECURE_CONTAINER
        );
    }

    let mut touched = 0;

    for (id, item) in items.iter_mut() {
        if id == RESERVED_SECURE_CONTAINER {
            continue;
        }
        let mut changed = false;

        if !rules.allow_in_backpacks && item.is_a(BACKPACK) {
            changed |= exclude_from_all_grids(item, case_id);
        }

        if rules.allow_in_secure_containers && item.is_a(MOB_CONTAINER) {
            changed |= include_in_first_grid(item, case_id);
        }

        if rules.case_disallowed_in.iter().any(|target| target == id) {
            changed |= exclude_from_first_grid(item, case_id);
        }

        if rules.case_allowed_in.iter().any(|target| target == id) {
            changed |= include_in_first_grid(item, case_id);
        }

        if changed {
            touched += 1;
        }
    }

    debug!("admission rules for {} touched {} items", case_id, touched);
    touched
}
