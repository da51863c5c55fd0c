//! Integration tests for the debug seeding and cleanup routes.

mod common;

use common::*;
use gildedkeys::cases::debug::{remove_debug_items, seed_profile};
use gildedkeys::cases::{known_item_ids, GildedKeyStorage, DEBUG_ID_MARKER};
use gildedkeys::config::{DebugConfig, ModConfig};
use gildedkeys::hooks::{InMemoryProfiles, StaticRouter, GAME_LOGOUT_URL, GAME_START_URL};
use gildedkeys::tables::{GridLocation, InventoryItem, ItemLocation, Profile};

const SESSION: &str = "pmc_session";

fn router_for(debug: DebugConfig) -> StaticRouter {
    let mut router = StaticRouter::new();
    GildedKeyStorage::new(ModConfig {
        debug,
        ..ModConfig::default()
    })
    .pre_load(&mut router);
    router
}

fn seeding() -> DebugConfig {
    DebugConfig {
        give_profile_all_keys: true,
        ..DebugConfig::default()
    }
}

fn items(profiles: &InMemoryProfiles) -> &[InventoryItem] {
    &profiles.get(SESSION).unwrap().inventory().unwrap().items
}

#[test]
fn three_items_are_seeded_in_a_row_and_cleaned_up() {
    let mut profile = load_profile();
    let before = profile.inventory().unwrap().items.clone();
    let ids: Vec<String> = ["caseA", "keyB", "keyC"].iter().map(|s| s.to_string()).collect();

    assert_eq!(seed_profile(&mut profile, &ids), Some(3));
    let seeded = &profile.inventory().unwrap().items[before.len()..];
    assert_eq!(seeded.len(), 3);
    for (i, item) in seeded.iter().enumerate() {
        assert_eq!(item.id, format!("{}{}", ids[i], DEBUG_ID_MARKER));
        assert_eq!(item.template, ids[i]);
        assert_eq!(item.parent_id.as_deref(), Some("stash_root"));
        assert_eq!(
            item.location,
            Some(ItemLocation::Grid(GridLocation::horizontal(i as u32, 0)))
        );
    }
    let encyclopedia = profile.characters.pmc.as_ref().unwrap().encyclopedia.as_ref().unwrap();
    assert!(ids.iter().all(|id| encyclopedia.get(id) == Some(&true)));

    assert_eq!(remove_debug_items(&mut profile), Some(3));
    assert_eq!(profile.inventory().unwrap().items, before);
}

#[test]
fn cleanup_keeps_items_with_other_suffixes() {
    let mut profile = load_profile();
    seed_profile(&mut profile, &["a".to_string()]).unwrap();
    profile.inventory_mut().unwrap().items.push(InventoryItem {
        id: "a_other_debug_id".to_string(),
        template: "a".to_string(),
        parent_id: Some("stash_root".to_string()),
        slot_id: Some("hideout".to_string()),
        location: None,
        extra: serde_json::Map::new(),
    });

    assert_eq!(remove_debug_items(&mut profile), Some(1));
    let items = &profile.inventory().unwrap().items;
    assert!(items.iter().any(|item| item.id == "a_other_debug_id"));
    assert!(items.iter().all(|item| !item.id.contains(DEBUG_ID_MARKER)));
}

#[test]
fn game_start_seeds_and_logout_cleans() {
    let router = router_for(seeding());
    let mut profiles = InMemoryProfiles::new();
    profiles.insert(SESSION, load_profile());
    let original_len = items(&profiles).len();
    let known = known_item_ids(&ModConfig::default());

    let out = router.handle(GAME_START_URL, SESSION, &mut profiles, "start".to_string());
    assert_eq!(out, "start");
    assert_eq!(items(&profiles).len(), original_len + known.len());

    let out = router.handle(GAME_LOGOUT_URL, SESSION, &mut profiles, "bye".to_string());
    assert_eq!(out, "bye");
    assert_eq!(items(&profiles), load_profile().inventory().unwrap().items.as_slice());
}

#[test]
fn forced_cleanup_runs_at_game_start() {
    let router = router_for(DebugConfig {
        force_remove_debug_items_on_start: true,
        ..DebugConfig::default()
    });
    let mut profile = load_profile();
    seed_profile(&mut profile, &["a".to_string(), "b".to_string()]).unwrap();
    let mut profiles = InMemoryProfiles::new();
    profiles.insert(SESSION, profile);

    router.handle(GAME_START_URL, SESSION, &mut profiles, String::new());
    assert_eq!(items(&profiles), load_profile().inventory().unwrap().items.as_slice());
}

#[test]
fn new_profile_passes_through_untouched() {
    let router = router_for(seeding());
    let mut profiles = InMemoryProfiles::new();
    profiles.insert(SESSION, Profile::default());

    let out = router.handle(GAME_START_URL, SESSION, &mut profiles, "out".to_string());
    assert_eq!(out, "out");
    assert_eq!(profiles.get(SESSION), Some(&Profile::default()));

    let out = router.handle(GAME_LOGOUT_URL, SESSION, &mut profiles, "out".to_string());
    assert_eq!(out, "out");
}

#[test]
fn seeded_profile_survives_a_file_round_trip() {
    let dir = writable_fixture();
    let path = dir.path().join("profile.json");
    let mut profile = Profile::load(&path).unwrap();
    seed_profile(&mut profile, &known_item_ids(&ModConfig::default())).unwrap();
    profile.save(&path).unwrap();

    let mut reloaded = Profile::load(&path).unwrap();
    assert_eq!(reloaded, profile);
    assert!(reloaded.extra.contains_key("info"));
    remove_debug_items(&mut reloaded).unwrap();
    assert_eq!(reloaded.inventory(), load_profile().inventory());
}
