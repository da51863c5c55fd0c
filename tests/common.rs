//! Test utilities & fixtures.
//! Provides access to the integration test data under `tests/test-data-int`.

#![allow(dead_code)] // Each test binary uses a different subset of these helpers.

use std::path::{Path, PathBuf};

use gildedkeys::config::ModConfig;
use gildedkeys::tables::{DatabaseTables, Profile};

pub const PRAPOR: &str = "54cb50c76803fa8b248b4571";
pub const MECHANIC: &str = "5a7c2eca46aef81a7ca2145d";
pub const THERAPIST: &str = "54cb57776803fa99248b456e";
pub const PEACEKEEPER: &str = "5935c25fb3acc3127c3d8cd9";
pub const RAGMAN: &str = "5ac3b934156ae10c4430e83c";

pub const ATTACK_BACKPACK: &str = "5ab8ebf186f7742d8b372e80";
pub const STRIPPED_BACKPACK: &str = "5df8a4d786f77412672a1e3b";
pub const STRIPPED_VEST: &str = "5929a2a086f7744f4b234d43";
pub const GAMMA: &str = "5857a8bc2459772bad15db29";
pub const THICC_CASE: &str = "5c0a840b86f7742ffa4f2482";
pub const UNCONFIGURED_KEY: &str = "5913611c86f77479e0084092";
pub const UNCONFIGURED_KEYCARD: &str = "5e42c71586f7747f245e1343";
pub const RIFLE: &str = "5447a9cd4bdc2dbd208b4567";

/// Return the path to the static integration test fixture directory.
/// Kept small & deterministic. Tests should copy to a temp dir if they mutate files.
pub fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("test-data-int")
}

pub fn load_tables() -> DatabaseTables {
    DatabaseTables::load(fixture_root().join("tables.json")).expect("fixture tables")
}

pub fn load_profile() -> Profile {
    Profile::load(fixture_root().join("profile.json")).expect("fixture profile")
}

/// Default config with every debug flag off.
pub fn quiet_config() -> ModConfig {
    ModConfig::default()
}

/// Return a writable copy (temp dir) of the fixture files.
pub fn writable_fixture() -> tempfile::TempDir {
    let tmp = tempfile::tempdir().expect("tempdir");
    let src = fixture_root();
    for file in ["tables.json", "profile.json"] {
        std::fs::copy(src.join(file), tmp.path().join(file)).unwrap();
    }
    tmp
}
