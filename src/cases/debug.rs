//! Diagnostics and the dev-only profile seeding used to test cases in game.

use std::collections::HashSet;
use std::hash::Hash;

use log::{debug, info, warn};
use serde_json::Map;

use crate::cases::keys::is_key;
use crate::config::ModConfig;
use crate::logutil::escape_log;
use crate::tables::{DatabaseTables, GridLocation, InventoryItem, ItemLocation, Profile};

/// Suffix marking inventory entries created by [`seed_profile`].
pub const DEBUG_ID_MARKER: &str = "_gilded_debug_id";

/// Seeded items are laid out this many to a row.
const STASH_ROW_WIDTH: usize = 10;

const SEPARATOR: &str = "-------------------------------------------";

/// Keep the first occurrence of every value, preserving order.
pub fn dedupe<T: Clone + Eq + Hash>(values: &[T]) -> Vec<T> {
    let mut seen = HashSet::with_capacity(values.len());
    values
        .iter()
        .filter(|value| seen.insert(*value))
        .cloned()
        .collect()
}

/// Every slot-assigned key followed by every case id, each once.
pub fn known_item_ids(config: &ModConfig) -> Vec<String> {
    let all: Vec<String> = config
        .keys_in_config()
        .into_iter()
        .chain(config.case_ids())
        .map(str::to_string)
        .collect();
    dedupe(&all)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingKey {
    pub id: String,
    /// English display name, when the locale table has one.
    pub name: Option<String>,
}

/// Keys and keycards in the item table that no slots case has a mount for.
pub fn find_missing_keys(tables: &DatabaseTables, config: &ModConfig) -> Vec<MissingKey> {
    let configured: HashSet<&str> = config.keys_in_config().into_iter().collect();
    tables
        .items()
        .values()
        .filter(|item| is_key(item) && !configured.contains(item.id.as_str()))
        .map(|item| MissingKey {
            id: item.id.clone(),
            name: tables
                .locales
                .lookup("en", &format!("{} Name", item.id))
                .map(str::to_string),
        })
        .collect()
}

/// Log the missing-key report with its header and separators.
pub fn log_missing_keys(missing: &[MissingKey]) {
    info!("[{}]: Keys missing from config: ", crate::MOD_NAME);
    info!("{}", SEPARATOR);
    for key in missing {
        info!("{}", escape_log(key.name.as_deref().unwrap_or("<unnamed>")));
        info!("{}", key.id);
        info!("{}", SEPARATOR);
    }
}

/// Add one marked copy of every id to the profile's stash.
///
/// Returns `None` when the profile has no initialized inventory or stash yet,
/// in which case nothing is changed.
pub fn seed_profile(profile: &mut Profile, item_ids: &[String]) -> Option<usize> {
    let pmc = profile.pmc_mut()?;
    let inventory = pmc.inventory.as_mut()?;
    let stash = inventory.stash.clone()?;
    let encyclopedia = pmc.encyclopedia.get_or_insert_with(Default::default);

    for (index, template) in item_ids.iter().enumerate() {
        let x = (index % STASH_ROW_WIDTH) as u32;
        let y = (index / STASH_ROW_WIDTH) as u32;
        inventory.items.push(InventoryItem {
            id: format!("{template}{DEBUG_ID_MARKER}"),
            template: template.clone(),
            parent_id: Some(stash.clone()),
            slot_id: Some("hideout".to_string()),
            location: Some(ItemLocation::Grid(GridLocation::horizontal(x, y))),
            extra: Map::new(),
        });
        encyclopedia.insert(template.clone(), true);
    }

    debug!("seeded {} debug items into stash {}", item_ids.len(), stash);
    Some(item_ids.len())
}

/// Remove every inventory entry carrying [`DEBUG_ID_MARKER`].
///
/// Returns `None` when the profile has no inventory.
pub fn remove_debug_items(profile: &mut Profile) -> Option<usize> {
    let items = &mut profile.inventory_mut()?.items;
    let mut removed = 0;
    for index in (0..items.len()).rev() {
        if items[index].id.contains(DEBUG_ID_MARKER) {
            items.remove(index);
            removed += 1;
        }
    }
    if removed > 0 {
        debug!("removed {} debug items", removed);
    }
    Some(removed)
}

/// Warning shown when seeding hits a profile that has never loaded its stash.
pub(crate) fn warn_new_profile() {
    warn!(
        "[{}] : New profile detected! load to stash, then close and reopen the server to receive all keys and gilded cases",
        crate::MOD_NAME
    );
}
