//! Integration tests for config files: the shipped example, JSON input and defaults.

use std::path::Path;

use gildedkeys::config::{CaseLayout, CellSelector, ModConfig};
use gildedkeys::tables::classes::{DOLLARS, KEYCARD};
use tempfile::tempdir;

#[test]
fn example_config_parses_and_validates() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config.example.toml");
    let config = ModConfig::load(&path).unwrap();

    assert!(config.validate().is_empty(), "{:?}", config.validate());
    assert_eq!(config.cases.len(), 2);
    assert!(matches!(config.cases[0].layout, CaseLayout::Container(_)));
    assert!(config.cases[1].flea_banned);
    assert_eq!(config.cases[1].handbook_price(), 0);
    assert_eq!(config.keys_in_config().len(), 7);
    assert_eq!(config.barters[0].trade.barter[0].id, DOLLARS);
    assert_eq!(config.barters[0].trade.trader_loyalty_level, 4);
    assert_eq!(config.logging.level, "info");
    assert!(config.logging.file.is_none());
}

#[test]
fn json_config_uses_the_same_schema() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{
            "weightless_keys": true,
            "debug": {"log_missing_keys": true},
            "cases": [{
                "id": "case_json",
                "item_name": "Json Case",
                "trader": "jaeger",
                "ExternalSize": {"width": 1, "height": 2},
                "layout": {
                    "case_type": "container",
                    "included_filter": [""],
                    "cell_to_apply_filters_to": 2,
                    "unique_included_filter": ["5c164d2286f774194c5e69fa"],
                    "InternalSize": {"horizontal_cells": [1, 2], "vertical_cells": [1, 2]}
                },
                "barter": [{"_tpl": "5449016a4bdc2d6f028b456f", "count": 100}]
            }],
            "additional_barter_trades": []
        }"#,
    )
    .unwrap();

    let config = ModConfig::load(&path).unwrap();
    assert!(config.weightless_keys);
    assert!(config.debug.log_missing_keys);
    assert!(config.raid_limit.enabled);
    let case = &config.cases[0];
    assert_eq!(case.external_size.height, 2);
    assert_eq!(case.trade.barter[0].count, 100.0);
    let CaseLayout::Container(grid) = &case.layout else {
        panic!("expected a container layout");
    };
    assert_eq!(grid.unique_cells, Some(CellSelector::SingleIndex(2)));
    assert_eq!(grid.unique_included_filter, vec![KEYCARD.to_string()]);
}

#[test]
fn malformed_config_reports_the_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "weightless_keys = \"sometimes\"").unwrap();

    let err = ModConfig::load(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn empty_config_means_no_cases() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "").unwrap();

    let config = ModConfig::load(&path).unwrap();
    assert!(config.cases.is_empty());
    assert!(!config.weightless_keys);
    assert_eq!(config.raid_limit.limit, 9);
}

#[test]
fn written_default_matches_in_memory_default() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    ModConfig::create_default(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("case_type = \"slots\""));
    assert_eq!(ModConfig::load(&path).unwrap(), ModConfig::default());
}
