//! Host database tables.
//!
//! The server hands mods one mutable object graph at database-load time. These
//! types model the parts gilded key storage reads or writes:
//!
//! - `templates.items`: the shared item table
//! - `templates.handbook.Items`: the price list
//! - `traders.<id>.assort`: trader stock, barter schemes and loyalty levels
//! - `locales.global.<lang>`: display strings
//! - `globals.config.RestrictionsInRaid`: per-template raid limits
//!
//! Every record keeps unknown fields in a flattened map, so a table dump can be
//! loaded, patched and written back without losing data.

pub mod classes;
pub mod items;
pub mod profile;
pub mod traders;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ModError;

pub use items::{FilterEntry, Grid, GridProps, ItemProps, Prefab, Slot, SlotProps, TemplateItem};
pub use profile::{
    Characters, GridLocation, Inventory, InventoryItem, ItemLocation, PmcCharacter, Profile,
};
pub use traders::{AssortItem, AssortUpd, BarterPayment, Trader, TraderAssort};

/// Item table keyed by template id.
pub type ItemTable = BTreeMap<String, TemplateItem>;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DatabaseTables {
    #[serde(default)]
    pub templates: Templates,
    #[serde(default)]
    pub traders: BTreeMap<String, Trader>,
    #[serde(default)]
    pub locales: Locales,
    #[serde(default)]
    pub globals: Globals,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DatabaseTables {
    /// Load a JSON dump of the host tables.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ModError> {
        read_json(path.as_ref())
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ModError> {
        write_json(path.as_ref(), self)
    }

    pub fn items(&self) -> &ItemTable {
        &self.templates.items
    }

    pub fn items_mut(&mut self) -> &mut ItemTable {
        &mut self.templates.items
    }
}

impl Profile {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ModError> {
        read_json(path.as_ref())
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ModError> {
        write_json(path.as_ref(), self)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Templates {
    #[serde(default)]
    pub items: ItemTable,
    #[serde(default)]
    pub handbook: Handbook,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Handbook {
    #[serde(rename = "Items", default)]
    pub items: Vec<HandbookEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Handbook {
    /// Insert the price entry, replacing any existing entry for the same item.
    pub fn upsert(&mut self, entry: HandbookEntry) {
        match self.items.iter_mut().find(|existing| existing.id == entry.id) {
            Some(existing) => *existing = entry,
            None => self.items.push(entry),
        }
    }

    pub fn price_of(&self, id: &str) -> Option<i64> {
        self.items.iter().find(|e| e.id == id).map(|e| e.price)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HandbookEntry {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "ParentId")]
    pub parent_id: String,
    #[serde(rename = "Price")]
    pub price: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Locales {
    /// Language code to `"<key>" -> text`.
    #[serde(default)]
    pub global: BTreeMap<String, BTreeMap<String, String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Locales {
    /// Write the same value under `key` in every language table.
    pub fn set_everywhere(&mut self, key: &str, value: &str) {
        for table in self.global.values_mut() {
            table.insert(key.to_string(), value.to_string());
        }
    }

    pub fn lookup(&self, lang: &str, key: &str) -> Option<&str> {
        self.global.get(lang)?.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Globals {
    #[serde(default)]
    pub config: GlobalsConfig,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GlobalsConfig {
    /// Absent on hosts that predate raid restrictions.
    #[serde(
        rename = "RestrictionsInRaid",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub restrictions_in_raid: Option<Vec<RaidRestriction>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RaidRestriction {
    #[serde(rename = "TemplateId")]
    pub template_id: String,
    #[serde(rename = "MaxInLobby", default)]
    pub max_in_lobby: u32,
    #[serde(rename = "MaxInRaid", default)]
    pub max_in_raid: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ModError> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ModError> {
    let contents = serde_json::to_string_pretty(value)?;
    fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handbook_upsert_replaces_existing_price() {
        let mut handbook = Handbook::default();
        handbook.upsert(HandbookEntry {
            id: "case".to_string(),
            parent_id: classes::HANDBOOK_CASES_CATEGORY.to_string(),
            price: 100,
        });
        handbook.upsert(HandbookEntry {
            id: "case".to_string(),
            parent_id: classes::HANDBOOK_CASES_CATEGORY.to_string(),
            price: 250,
        });
        assert_eq!(handbook.items.len(), 1);
        assert_eq!(handbook.price_of("case"), Some(250));
    }

    #[test]
    fn locales_are_written_to_every_language() {
        let mut locales = Locales::default();
        locales.global.insert("en".to_string(), BTreeMap::new());
        locales.global.insert("ru".to_string(), BTreeMap::new());
        locales.set_everywhere("case Name", "Golden Key Pouch");
        assert_eq!(locales.lookup("en", "case Name"), Some("Golden Key Pouch"));
        assert_eq!(locales.lookup("ru", "case Name"), Some("Golden Key Pouch"));
    }

    #[test]
    fn missing_tables_default_to_empty() {
        let tables: DatabaseTables = serde_json::from_str("{}").unwrap();
        assert!(tables.items().is_empty());
        assert!(tables.globals.config.restrictions_in_raid.is_none());
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = DatabaseTables::load("nonexistent.json");
        assert!(matches!(result, Err(ModError::Io(_))));
    }
}
