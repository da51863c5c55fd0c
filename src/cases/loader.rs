//! The plugin entry points: route registration before load, and the table
//! mutations run once the host database is loaded.

use log::{debug, info, warn};

use crate::cases::debug::{
    find_missing_keys, known_item_ids, log_missing_keys, remove_debug_items, seed_profile,
    warn_new_profile, MissingKey,
};
use crate::cases::factory::create_case;
use crate::cases::filters::restore_stripped_filters;
use crate::cases::ids::IdProvider;
use crate::cases::keys::{apply_raid_limit, patch_key_properties};
use crate::cases::trade::register_trade;
use crate::config::ModConfig;
use crate::hooks::{StaticRouter, GAME_LOGOUT_URL, GAME_START_URL};
use crate::logutil::escape_log;
use crate::tables::DatabaseTables;

pub const SEED_ROUTE: &str = "On_Game_Start_Gilded_Key_Storage";
pub const CLEANUP_ROUTE: &str = "On_Logout_Gilded_Key_Storage";

/// What one database-load pass did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadSummary {
    pub filters_restored: usize,
    pub cases_created: Vec<String>,
    pub cases_failed: Vec<String>,
    /// `(case id, warning)` for cases built with a fallback layout.
    pub layout_warnings: Vec<(String, String)>,
    pub barters_registered: usize,
    pub barters_failed: usize,
    pub keys_patched: usize,
    pub raid_limits_changed: usize,
    /// Only filled when missing-key logging is enabled.
    pub missing_keys: Vec<MissingKey>,
}

#[derive(Debug, Clone)]
pub struct GildedKeyStorage {
    config: ModConfig,
}

impl GildedKeyStorage {
    pub fn new(config: ModConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ModConfig {
        &self.config
    }

    /// Register the debug routes the config asks for. Nothing is registered
    /// with the debug flags off.
    pub fn pre_load(&self, router: &mut StaticRouter) {
        let debug = &self.config.debug;

        if debug.give_profile_all_keys {
            let item_ids = known_item_ids(&self.config);
            router.register(
                SEED_ROUTE,
                GAME_START_URL,
                Box::new(move |ctx, profiles, output| {
                    let Some(profile) = profiles.profile_mut(ctx.session_id) else {
                        warn!("[{}] : no profile for session {}", crate::MOD_NAME, ctx.session_id);
                        return output;
                    };
                    if seed_profile(profile, &item_ids).is_none() {
                        warn_new_profile();
                    }
                    output
                }),
            );
        }

        if debug.give_profile_all_keys || debug.force_remove_debug_items_on_start {
            let url = if debug.force_remove_debug_items_on_start {
                GAME_START_URL
            } else {
                GAME_LOGOUT_URL
            };
            router.register(
                CLEANUP_ROUTE,
                url,
                Box::new(|ctx, profiles, output| {
                    if let Some(profile) = profiles.profile_mut(ctx.session_id) {
                        remove_debug_items(profile);
                    }
                    output
                }),
            );
        }
    }

    /// Apply everything to the loaded tables. Individual case or trade failures
    /// are logged and skipped.
    pub fn post_db_load(&self, tables: &mut DatabaseTables, ids: &mut dyn IdProvider) -> LoadSummary {
        info!("[{}] : Mod loading", crate::MOD_NAME);
        for problem in self.config.validate() {
            warn!("[{}] : WARNING: {}", crate::MOD_NAME, problem);
        }

        let mut summary = LoadSummary {
            filters_restored: restore_stripped_filters(tables.items_mut()),
            ..LoadSummary::default()
        };

        for case in &self.config.cases {
            match create_case(case, tables, ids) {
                Ok(warnings) => {
                    summary
                        .layout_warnings
                        .extend(warnings.into_iter().map(|w| (case.id.clone(), w)));
                    summary.cases_created.push(case.id.clone());
                }
                Err(e) => {
                    warn!(
                        "[{}] : WARNING: could not create {}: {}",
                        crate::MOD_NAME,
                        escape_log(&case.item_name),
                        e
                    );
                    summary.cases_failed.push(case.id.clone());
                }
            }
        }

        for barter in &self.config.barters {
            if !tables.items().contains_key(&barter.id) {
                debug!("extra barter item {} is not in the item table", barter.id);
            }
            match register_trade(&barter.id, &barter.trade, &mut tables.traders) {
                Ok(()) => summary.barters_registered += 1,
                Err(e) => {
                    warn!(
                        "[{}] : WARNING: could not add barter for {}: {}",
                        crate::MOD_NAME,
                        barter.id,
                        e
                    );
                    summary.barters_failed += 1;
                }
            }
        }

        summary.keys_patched = patch_key_properties(tables.items_mut(), &self.config);
        summary.raid_limits_changed = apply_raid_limit(&mut tables.globals, &self.config.raid_limit);

        if self.config.debug.log_missing_keys {
            summary.missing_keys = find_missing_keys(tables, &self.config);
            log_missing_keys(&summary.missing_keys);
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DebugConfig;
    use crate::hooks::InMemoryProfiles;
    use crate::tables::Profile;

    fn storage(debug: DebugConfig) -> GildedKeyStorage {
        GildedKeyStorage::new(ModConfig {
            debug,
            ..ModConfig::default()
        })
    }

    #[test]
    fn no_routes_without_debug_flags() {
        let mut router = StaticRouter::new();
        storage(DebugConfig::default()).pre_load(&mut router);
        assert!(router.routes().is_empty());
    }

    #[test]
    fn seeding_registers_start_and_logout_routes() {
        let mut router = StaticRouter::new();
        storage(DebugConfig {
            give_profile_all_keys: true,
            ..DebugConfig::default()
        })
        .pre_load(&mut router);

        assert_eq!(router.find(SEED_ROUTE).unwrap().url, GAME_START_URL);
        assert_eq!(router.find(CLEANUP_ROUTE).unwrap().url, GAME_LOGOUT_URL);
    }

    #[test]
    fn forced_cleanup_moves_to_game_start() {
        let mut router = StaticRouter::new();
        storage(DebugConfig {
            force_remove_debug_items_on_start: true,
            ..DebugConfig::default()
        })
        .pre_load(&mut router);

        assert!(router.find(SEED_ROUTE).is_none());
        assert_eq!(router.find(CLEANUP_ROUTE).unwrap().url, GAME_START_URL);
    }

    #[test]
    fn routes_pass_output_through() {
        let mut router = StaticRouter::new();
        storage(DebugConfig {
            give_profile_all_keys: true,
            ..DebugConfig::default()
        })
        .pre_load(&mut router);

        let mut profiles = InMemoryProfiles::new();
        profiles.insert("s1", Profile::default());
        let out = router.handle(GAME_START_URL, "s1", &mut profiles, "{\"err\":0}".to_string());
        assert_eq!(out, "{\"err\":0}");
        assert_eq!(router.handle(GAME_LOGOUT_URL, "missing", &mut profiles, "x".to_string()), "x");
    }
}
