//! Case creation: clone a template, stamp it, lay it out and publish it.

use log::info;

use crate::cases::admission::apply_admission_rules;
use crate::cases::ids::IdProvider;
use crate::cases::layout::{build_grids, build_slots};
use crate::cases::trade::{ensure_trader, register_trade};
use crate::config::{CaseConfig, CaseLayout};
use crate::errors::ModError;
use crate::logutil::escape_log;
use crate::tables::classes::{CONTAINER_TEMPLATE, HANDBOOK_CASES_CATEGORY, SLOTS_TEMPLATE};
use crate::tables::{DatabaseTables, HandbookEntry, Prefab, TemplateItem};

/// Prefab bundle path for a case id.
pub fn prefab_path(case_id: &str) -> String {
    format!("CaseBundles/{case_id}.bundle")
}

/// Locale keys written for every case, paired with their config values.
pub fn locale_entries(case: &CaseConfig) -> [(String, &str); 3] {
    [
        (format!("{} Name", case.id), case.item_name.as_str()),
        (format!("{} ShortName", case.id), case.item_short_name.as_str()),
        (format!("{} Description", case.id), case.item_description.as_str()),
    ]
}

fn template_for(layout: &CaseLayout) -> &'static str {
    match layout {
        CaseLayout::Container(_) => CONTAINER_TEMPLATE,
        CaseLayout::Slots(_) => SLOTS_TEMPLATE,
    }
}

/// Build the item record for `case` without publishing it anywhere.
///
/// Also returns the layout warnings, already logged.
pub fn build_case_item(
    case: &CaseConfig,
    tables: &DatabaseTables,
    ids: &mut dyn IdProvider,
) -> Result<(TemplateItem, Vec<String>), ModError> {
    let template_id = template_for(&case.layout);
    let mut item = tables
        .items()
        .get(template_id)
        .cloned()
        .ok_or_else(|| ModError::TemplateNotFound(template_id.to_string()))?;

    item.id = case.id.clone();
    item.props.always_insurable = Some(true);
    item.props.discard_limit = Some(-1);
    item.props
        .prefab
        .get_or_insert_with(Prefab::default)
        .path = prefab_path(&case.id);

    let mut warnings = Vec::new();
    match &case.layout {
        CaseLayout::Container(grid) => {
            let layout = build_grids(&case.id, &case.item_name, grid, ids);
            item.props.grids = Some(layout.grids);
            warnings = layout.warnings;
        }
        CaseLayout::Slots(slots) => {
            item.props.item_sound = Some(slots.sound.clone());
            item.props.slots = Some(build_slots(&case.id, slots, ids));
        }
    }

    item.props.width = Some(case.external_size.width);
    item.props.height = Some(case.external_size.height);
    Ok((item, warnings))
}

/// Create one case and wire it into every table it touches.
///
/// All checks that can fail run before the first write, so an `Err` leaves
/// `tables` exactly as it was. On success the layout warnings are returned.
pub fn create_case(
    case: &CaseConfig,
    tables: &mut DatabaseTables,
    ids: &mut dyn IdProvider,
) -> Result<Vec<String>, ModError> {
    if case.id.trim().is_empty() {
        return Err(ModError::InvalidConfig(format!(
            "case '{}' has an empty id",
            case.item_name
        )));
    }
    ensure_trader(&tables.traders, &case.trade)?;
    let (item, warnings) = build_case_item(case, tables, ids)?;

    tables.items_mut().insert(case.id.clone(), item);

    for (key, value) in locale_entries(case) {
        tables.locales.set_everywhere(&key, value);
    }

    tables.templates.handbook.upsert(HandbookEntry {
        id: case.id.clone(),
        parent_id: HANDBOOK_CASES_CATEGORY.to_string(),
        price: case.handbook_price(),
    });

    apply_admission_rules(&case.id, &case.admission, tables.items_mut());
    register_trade(&case.id, &case.trade, &mut tables.traders)?;

    info!(
        "[{}] : {} loaded! Hooray!",
        crate::MOD_NAME,
        escape_log(&case.item_name)
    );
    Ok(warnings)
}
