//! # Configuration Management Module
//!
//! Everything gilded key storage does is driven by one declarative document:
//! which cases exist, what they look like inside, who sells them and for how
//! much, where they may be stored, and which global key patches to apply.
//!
//! ## Configuration Structure
//!
//! - [`ModConfig`] - global key flags plus the lists below
//! - [`CaseConfig`] - one gilded case: identity, [`CaseLayout`], [`TradeConfig`], [`AdmissionConfig`]
//! - [`BarterTrade`] - an extra trader offer for an existing item
//! - [`DebugConfig`] - diagnostics and dev-only profile seeding
//! - [`RaidLimitConfig`] - the raid restriction bump for the labs keycard
//! - [`LoggingConfig`] - log level and optional log file
//!
//! ## Configuration File Format
//!
//! TOML by default; a file ending in `.json` is read as JSON with the same shape.
//!
//! ```toml
//! weightless_keys = true
//! no_key_use_limit = false
//! keys_are_discardable = true
//!
//! [[cases]]
//! id = "661cb36922c9e10dc2d9514b"
//! item_name = "Golden Key Pouch"
//! item_short_name = "Key Pouch"
//! item_description = "A pouch for keys"
//! trader = "mechanic"
//! stock_amount = 2
//! trader_loyalty_level = 2
//! flea_price = 250000
//!
//! [cases.external_size]
//! width = 1
//! height = 1
//!
//! [cases.layout]
//! case_type = "container"
//! included_filter = ["5c99f98d86f7745c314214b3"]
//!
//! [cases.layout.internal_size]
//! horizontal_cells = [5]
//! vertical_cells = [4]
//!
//! [[cases.barter]]
//! id = "5449016a4bdc2d6f028b456f"
//! count = 650000
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::tables::classes::{
    EMPTY_FILTER, EUROS, KEYCARD, KEY_MECHANICAL, LABS_ACCESS_CARD, ROUBLES,
};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModConfig {
    /// Set the weight of every key and keycard to zero.
    #[serde(default)]
    pub weightless_keys: bool,
    /// Remove the usage cap on keys. Cosmetic: the host still consumes uses on extract.
    #[serde(default)]
    pub no_key_use_limit: bool,
    /// Allow keys to be discarded without limit.
    #[serde(default)]
    pub keys_are_discardable: bool,
    #[serde(default)]
    pub debug: DebugConfig,
    #[serde(default)]
    pub raid_limit: RaidLimitConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Cases in creation order.
    #[serde(default)]
    pub cases: Vec<CaseConfig>,
    /// Extra trader offers for items that already exist.
    #[serde(default, alias = "additional_barter_trades")]
    pub barters: Vec<BarterTrade>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseConfig {
    pub id: String,
    pub item_name: String,
    #[serde(default)]
    pub item_short_name: String,
    #[serde(default)]
    pub item_description: String,
    #[serde(default)]
    pub flea_price: i64,
    /// Forces the handbook price to zero.
    #[serde(default)]
    pub flea_banned: bool,
    #[serde(flatten)]
    pub trade: TradeConfig,
    #[serde(flatten)]
    pub admission: AdmissionConfig,
    #[serde(alias = "ExternalSize")]
    pub external_size: ExternalSize,
    pub layout: CaseLayout,
}

impl CaseConfig {
    /// Handbook price: the flea price, or zero when the case is flea-banned.
    pub fn handbook_price(&self) -> i64 {
        if self.flea_banned {
            0
        } else {
            self.flea_price
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExternalSize {
    pub width: u32,
    pub height: u32,
}

/// What a case holds on the inside.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "case_type", rename_all = "lowercase")]
pub enum CaseLayout {
    /// Grid columns, each with its own filter pair.
    Container(GridSpec),
    /// One mount per listed item class.
    Slots(SlotSpec),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GridSpec {
    #[serde(default = "default_filter")]
    pub included_filter: Vec<String>,
    #[serde(default = "default_filter")]
    pub excluded_filter: Vec<String>,
    /// Columns that take the `unique_*` filters instead of the base ones.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        alias = "cell_to_apply_filters_to"
    )]
    pub unique_cells: Option<CellSelector>,
    #[serde(default = "default_filter")]
    pub unique_included_filter: Vec<String>,
    #[serde(default = "default_filter")]
    pub unique_excluded_filter: Vec<String>,
    #[serde(alias = "InternalSize")]
    pub internal_size: InternalSize,
}

/// Parallel per-column cell counts; both arrays must have the same length.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InternalSize {
    pub horizontal_cells: Vec<u32>,
    pub vertical_cells: Vec<u32>,
}

/// Which grid columns get the unique filter pair.
///
/// `SingleIndex` is 1-based (`2` selects `column1`). The flag array form is kept
/// for configs written against the older format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CellSelector {
    SingleIndex(usize),
    PerIndexFlags(Vec<CellFlag>),
}

/// A per-column marker: `true`/`false`, or `"y"`/`"n"` in older configs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CellFlag {
    Bool(bool),
    Marker(String),
}

impl CellFlag {
    pub fn is_set(&self) -> bool {
        match self {
            CellFlag::Bool(flag) => *flag,
            CellFlag::Marker(marker) => marker.eq_ignore_ascii_case("y"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlotSpec {
    /// One mount is generated per entry, accepting exactly that item class.
    pub slot_ids: Vec<String>,
    #[serde(default)]
    pub sound: String,
}

/// Trader offer terms shared by cases and extra barters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradeConfig {
    /// Trader name (`prapor`, `mechanic`, ...) or raw trader id.
    pub trader: String,
    #[serde(default)]
    pub unlimited_stock: bool,
    #[serde(default)]
    pub stock_amount: u32,
    #[serde(default = "default_loyalty_level")]
    pub trader_loyalty_level: u8,
    /// Paid together as a single bundle.
    #[serde(default)]
    pub barter: Vec<BarterCost>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BarterCost {
    #[serde(alias = "_tpl")]
    pub id: String,
    pub count: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BarterTrade {
    /// Item offered; must already exist in the item table.
    pub id: String,
    #[serde(flatten)]
    pub trade: TradeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdmissionConfig {
    #[serde(default)]
    pub allow_in_secure_containers: bool,
    #[serde(default = "default_true")]
    pub allow_in_backpacks: bool,
    /// Item ids whose first grid should accept the case.
    #[serde(default)]
    pub case_allowed_in: Vec<String>,
    /// Item ids whose first grid should reject the case.
    #[serde(default)]
    pub case_disallowed_in: Vec<String>,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            allow_in_secure_containers: false,
            allow_in_backpacks: true,
            case_allowed_in: Vec::new(),
            case_disallowed_in: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DebugConfig {
    /// Log every key or keycard not assigned to any case slot.
    #[serde(default)]
    pub log_missing_keys: bool,
    /// Dev only: stuff every known key and case into the profile at game start.
    #[serde(default)]
    pub give_profile_all_keys: bool,
    /// Purge debug items at game start instead of at logout.
    #[serde(default)]
    pub force_remove_debug_items_on_start: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RaidLimitConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_raid_limit_template")]
    pub template_id: String,
    #[serde(default = "default_raid_limit")]
    pub limit: u32,
}

impl Default for RaidLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            template_id: default_raid_limit_template(),
            limit: default_raid_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_filter() -> Vec<String> {
    vec![EMPTY_FILTER.to_string()]
}

fn default_true() -> bool {
    true
}

fn default_loyalty_level() -> u8 {
    1
}

fn default_raid_limit_template() -> String {
    LABS_ACCESS_CARD.to_string()
}

fn default_raid_limit() -> u32 {
    9
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ModConfig {
    /// Load configuration from a file (JSON when the extension is `.json`, TOML otherwise).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path.display(), e))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config: ModConfig = if is_json {
            serde_json::from_str(&content)
                .map_err(|e| anyhow!("Failed to parse config file {}: {}", path.display(), e))?
        } else {
            toml::from_str(&content)
                .map_err(|e| anyhow!("Failed to parse config file {}: {}", path.display(), e))?
        };

        Ok(config)
    }

    /// Create a default configuration file
    pub fn create_default<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        let config = ModConfig::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path.display(), e))?;

        Ok(())
    }

    /// Problems that do not stop the load but are worth a warning.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let mut seen = HashSet::new();

        for case in &self.cases {
            if case.id.trim().is_empty() {
                problems.push(format!("case '{}' has an empty id", case.item_name));
            } else if !seen.insert(case.id.as_str()) {
                problems.push(format!("case id {} is configured more than once", case.id));
            }
            if case.external_size.width == 0 || case.external_size.height == 0 {
                problems.push(format!("case '{}' has a zero external size", case.item_name));
            }
            match &case.layout {
                CaseLayout::Container(grid) => {
                    let size = &grid.internal_size;
                    if size.horizontal_cells.len() != size.vertical_cells.len() {
                        problems.push(format!(
                            "case '{}' has {} horizontal but {} vertical cell entries",
                            case.item_name,
                            size.horizontal_cells.len(),
                            size.vertical_cells.len()
                        ));
                    }
                }
                CaseLayout::Slots(slots) => {
                    if slots.slot_ids.is_empty() {
                        problems.push(format!("case '{}' has no slots", case.item_name));
                    }
                }
            }
        }

        for barter in &self.barters {
            if barter.trade.barter.is_empty() {
                problems.push(format!("extra barter for {} has no price", barter.id));
            }
        }

        problems
    }

    /// Every item class assigned to a slot of any slots-kind case, in config order.
    pub fn keys_in_config(&self) -> Vec<&str> {
        self.cases
            .iter()
            .filter_map(|case| match &case.layout {
                CaseLayout::Slots(slots) => Some(slots.slot_ids.iter().map(String::as_str)),
                CaseLayout::Container(_) => None,
            })
            .flatten()
            .collect()
    }

    pub fn case_ids(&self) -> Vec<&str> {
        self.cases.iter().map(|case| case.id.as_str()).collect()
    }
}

impl Default for ModConfig {
    fn default() -> Self {
        let keycards = [
            LABS_ACCESS_CARD,
            "5c1d0efb86f7744baf2e7b7b",
            "5c1d0c5f86f7744bb2683cf0",
            "5c1d0dc586f7744baf2e7b79",
            "5c1e495a86f7743109743dfb",
            "5c1d0d6d86f7744bb2683e1f",
            "5c1d0f4986f7744bb01837fa",
        ];
        let keys = [
            "5448ba0b4bdc2d02308b456c",
            "5780cf7f2459777de4559322",
            "5d80c60f86f77440373c4ece",
            "5d80c62a86f7744036212b3f",
            "5ede7a8229445733cb4c18e2",
            "5d8e0e0e86f774321140eb56",
            "5d80cb5686f77440545d1286",
            "5d80cb8786f774405611c7d9",
        ];

        let keychain = |id: &str, name: &str, short: &str, slots: &[&str], level: u8, price: f64| {
            CaseConfig {
                id: id.to_string(),
                item_name: name.to_string(),
                item_short_name: short.to_string(),
                item_description: format!("A gilded keychain with {} mounts for keys.", slots.len()),
                flea_price: (price * 1.1) as i64,
                flea_banned: false,
                trade: TradeConfig {
                    trader: "mechanic".to_string(),
                    unlimited_stock: false,
                    stock_amount: 2,
                    trader_loyalty_level: level,
                    barter: vec![BarterCost {
                        id: ROUBLES.to_string(),
                        count: price,
                    }],
                },
                admission: AdmissionConfig::default(),
                external_size: ExternalSize {
                    width: 1,
                    height: 1,
                },
                layout: CaseLayout::Slots(SlotSpec {
                    slot_ids: slots.iter().map(|s| s.to_string()).collect(),
                    sound: "keys".to_string(),
                }),
            }
        };

        let cases = vec![
            CaseConfig {
                id: "661cb36922c9e10dc2d9514b".to_string(),
                item_name: "Golden Key Pouch".to_string(),
                item_short_name: "Key Pouch".to_string(),
                item_description: "A gilded pouch that only accepts keys and keycards.".to_string(),
                flea_price: 275000,
                flea_banned: false,
                trade: TradeConfig {
                    trader: "therapist".to_string(),
                    unlimited_stock: false,
                    stock_amount: 2,
                    trader_loyalty_level: 2,
                    barter: vec![BarterCost {
                        id: ROUBLES.to_string(),
                        count: 250000.0,
                    }],
                },
                admission: AdmissionConfig {
                    allow_in_secure_containers: true,
                    ..AdmissionConfig::default()
                },
                external_size: ExternalSize {
                    width: 2,
                    height: 1,
                },
                layout: CaseLayout::Container(GridSpec {
                    included_filter: vec![KEY_MECHANICAL.to_string(), KEYCARD.to_string()],
                    excluded_filter: default_filter(),
                    unique_cells: None,
                    unique_included_filter: default_filter(),
                    unique_excluded_filter: default_filter(),
                    internal_size: InternalSize {
                        horizontal_cells: vec![5],
                        vertical_cells: vec![4],
                    },
                }),
            },
            keychain(
                "661cb36f5441dc730e28bcb0",
                "Golden Keychain Mk. I",
                "Keychain I",
                &keys[..4],
                1,
                95000.0,
            ),
            keychain(
                "661cb372e5eb56290da76c3e",
                "Golden Keychain Mk. II",
                "Keychain II",
                &keys[..6],
                2,
                185000.0,
            ),
            keychain(
                "661cb3743bf00d3d145518b3",
                "Golden Keychain Mk. III",
                "Keychain III",
                &keys[..],
                3,
                325000.0,
            ),
            CaseConfig {
                id: "661cbe1d8bf7f3b5d4b76c58".to_string(),
                item_name: "Golden Keycard Case".to_string(),
                item_short_name: "Keycard Case".to_string(),
                item_description: "A gilded case with a mount for every keycard.".to_string(),
                flea_price: 0,
                flea_banned: true,
                trade: TradeConfig {
                    trader: "peacekeeper".to_string(),
                    unlimited_stock: false,
                    stock_amount: 1,
                    trader_loyalty_level: 3,
                    barter: vec![BarterCost {
                        id: EUROS.to_string(),
                        count: 4000.0,
                    }],
                },
                admission: AdmissionConfig {
                    allow_in_secure_containers: true,
                    ..AdmissionConfig::default()
                },
                external_size: ExternalSize {
                    width: 1,
                    height: 1,
                },
                layout: CaseLayout::Slots(SlotSpec {
                    slot_ids: keycards.iter().map(|s| s.to_string()).collect(),
                    sound: "keys".to_string(),
                }),
            },
        ];

        ModConfig {
            weightless_keys: true,
            no_key_use_limit: false,
            keys_are_discardable: true,
            debug: DebugConfig::default(),
            raid_limit: RaidLimitConfig::default(),
            logging: LoggingConfig::default(),
            cases,
            barters: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTAINER_CASE: &str = r#"
        id = "case_a"
        item_name = "Case A"
        trader = "prapor"
        stock_amount = 3

        [external_size]
        width = 2
        height = 2

        [layout]
        case_type = "container"
        included_filter = [""]
        unique_cells = 2
        unique_included_filter = ["5c99f98d86f7745c314214b3"]

        [layout.internal_size]
        horizontal_cells = [2, 3]
        vertical_cells = [2, 3]

        [[barter]]
        id = "5449016a4bdc2d6f028b456f"
        count = 500
    "#;

    #[test]
    fn container_case_parses_from_toml() {
        let case: CaseConfig = toml::from_str(CONTAINER_CASE).unwrap();
        assert_eq!(case.trade.trader, "prapor");
        assert_eq!(case.trade.stock_amount, 3);
        assert_eq!(case.trade.trader_loyalty_level, 1);
        assert_eq!(case.trade.barter[0].count, 500.0);
        assert!(case.admission.allow_in_backpacks);
        assert!(!case.admission.allow_in_secure_containers);

        let CaseLayout::Container(grid) = &case.layout else {
            panic!("expected a container layout");
        };
        assert_eq!(grid.unique_cells, Some(CellSelector::SingleIndex(2)));
        assert_eq!(grid.excluded_filter, vec![String::new()]);
        assert_eq!(grid.internal_size.horizontal_cells, vec![2, 3]);
    }

    #[test]
    fn slots_case_parses_from_json_with_legacy_flags() {
        let json = r#"{
            "id": "case_b",
            "item_name": "Case B",
            "trader": "54cb50c76803fa8b248b4571",
            "ExternalSize": {"width": 1, "height": 1},
            "layout": {
                "case_type": "container",
                "InternalSize": {"horizontal_cells": [1, 1], "vertical_cells": [1, 1]},
                "cell_to_apply_filters_to": ["n", "Y"]
            }
        }"#;
        let case: CaseConfig = serde_json::from_str(json).unwrap();
        let CaseLayout::Container(grid) = &case.layout else {
            panic!("expected a container layout");
        };
        let Some(CellSelector::PerIndexFlags(flags)) = &grid.unique_cells else {
            panic!("expected per-index flags");
        };
        assert!(!flags[0].is_set());
        assert!(flags[1].is_set());
    }

    #[test]
    fn flea_banned_forces_zero_price() {
        let mut case: CaseConfig = toml::from_str(CONTAINER_CASE).unwrap();
        case.flea_price = 1000;
        assert_eq!(case.handbook_price(), 1000);
        case.flea_banned = true;
        assert_eq!(case.handbook_price(), 0);
    }

    #[test]
    fn default_config_is_valid() {
        let config = ModConfig::default();
        assert_eq!(config.cases.len(), 5);
        assert!(config.validate().is_empty(), "{:?}", config.validate());
    }

    #[test]
    fn validate_reports_duplicates_and_mismatches() {
        let mut config = ModConfig::default();
        let mut dup = config.cases[0].clone();
        dup.layout = CaseLayout::Container(GridSpec {
            included_filter: default_filter(),
            excluded_filter: default_filter(),
            unique_cells: None,
            unique_included_filter: default_filter(),
            unique_excluded_filter: default_filter(),
            internal_size: InternalSize {
                horizontal_cells: vec![2, 3],
                vertical_cells: vec![2],
            },
        });
        config.cases.push(dup);

        let problems = config.validate();
        assert_eq!(problems.len(), 2, "{:?}", problems);
        assert!(problems[0].contains("more than once"));
        assert!(problems[1].contains("2 horizontal but 1 vertical"));
    }

    #[test]
    fn keys_in_config_collects_slot_ids_only() {
        let config = ModConfig::default();
        let keys = config.keys_in_config();
        assert!(keys.contains(&LABS_ACCESS_CARD));
        assert!(!keys.contains(&KEY_MECHANICAL));
        // Mk. I-III share their leading keys.
        assert_eq!(keys.len(), 4 + 6 + 8 + 7);
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        ModConfig::create_default(&path).unwrap();
        let loaded = ModConfig::load(&path).unwrap();
        assert_eq!(loaded, ModConfig::default());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = ModConfig::load("does-not-exist.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
