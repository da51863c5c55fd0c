//! Global key patches and the keycard raid-limit bump.

use log::debug;

use crate::config::{ModConfig, RaidLimitConfig};
use crate::tables::classes::{KEYCARD, KEY_MECHANICAL};
use crate::tables::{Globals, ItemTable, TemplateItem};

/// Mechanical keys and keycards.
pub fn is_key(item: &TemplateItem) -> bool {
    item.is_a(KEY_MECHANICAL) || item.is_a(KEYCARD)
}

/// Apply the weight, usage and discard flags to every key.
///
/// Each flag is applied independently; with all three off the table is not
/// walked at all. Returns the number of keys patched.
pub fn patch_key_properties(items: &mut ItemTable, config: &ModConfig) -> usize {
    if !config.weightless_keys && !config.no_key_use_limit && !config.keys_are_discardable {
        return 0;
    }

    let mut patched = 0;
    for item in items.values_mut().filter(|item| is_key(item)) {
        let props = &mut item.props;
        if config.weightless_keys {
            props.weight = Some(0.0);
        }
        // The host still consumes uses on extract, so this is cosmetic for labs cards.
        if config.no_key_use_limit {
            props.maximum_number_of_usage = Some(0);
        }
        if config.keys_are_discardable {
            props.discard_limit = Some(-1);
        }
        patched += 1;
    }

    debug!("patched {} keys", patched);
    patched
}

/// Raise the lobby and raid limits of the configured template.
///
/// Hosts without a restriction list are left alone. Returns the number of
/// restriction entries changed.
pub fn apply_raid_limit(globals: &mut Globals, limit: &RaidLimitConfig) -> usize {
    if !limit.enabled {
        return 0;
    }
    let Some(restrictions) = globals.config.restrictions_in_raid.as_mut() else {
        debug!("no raid restrictions in globals, skipping raid limit");
        return 0;
    };

    let mut changed = 0;
    for restriction in restrictions
        .iter_mut()
        .filter(|r| r.template_id == limit.template_id)
    {
        restriction.max_in_lobby = limit.limit;
        restriction.max_in_raid = limit.limit;
        changed += 1;
    }
    changed
}
