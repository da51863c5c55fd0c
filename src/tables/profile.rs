//! The slice of a player profile the debug routes touch: the PMC inventory and
//! the encyclopedia of known items.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    #[serde(default)]
    pub characters: Characters,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Profile {
    /// Profile whose PMC has an initialized inventory rooted at `stash_id`.
    pub fn with_stash(stash_id: &str) -> Self {
        Self {
            characters: Characters {
                pmc: Some(PmcCharacter {
                    inventory: Some(Inventory {
                        items: Vec::new(),
                        stash: Some(stash_id.to_string()),
                        extra: Map::new(),
                    }),
                    encyclopedia: Some(BTreeMap::new()),
                    extra: Map::new(),
                }),
                extra: Map::new(),
            },
            extra: Map::new(),
        }
    }

    pub fn pmc_mut(&mut self) -> Option<&mut PmcCharacter> {
        self.characters.pmc.as_mut()
    }

    pub fn inventory(&self) -> Option<&Inventory> {
        self.characters.pmc.as_ref()?.inventory.as_ref()
    }

    pub fn inventory_mut(&mut self) -> Option<&mut Inventory> {
        self.characters.pmc.as_mut()?.inventory.as_mut()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Characters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pmc: Option<PmcCharacter>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PmcCharacter {
    #[serde(rename = "Inventory", default, skip_serializing_if = "Option::is_none")]
    pub inventory: Option<Inventory>,
    #[serde(rename = "Encyclopedia", default, skip_serializing_if = "Option::is_none")]
    pub encyclopedia: Option<BTreeMap<String, bool>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Inventory {
    #[serde(default)]
    pub items: Vec<InventoryItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stash: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryItem {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_tpl")]
    pub template: String,
    #[serde(rename = "parentId", default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(rename = "slotId", default, skip_serializing_if = "Option::is_none")]
    pub slot_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<ItemLocation>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Grid placement for items in containers, a bare index for cartridges in magazines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ItemLocation {
    Grid(GridLocation),
    Index(u32),
    Other(Value),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GridLocation {
    pub x: u32,
    pub y: u32,
    pub r: String,
    #[serde(rename = "isSearched", default, skip_serializing_if = "Option::is_none")]
    pub is_searched: Option<bool>,
}

impl GridLocation {
    pub fn horizontal(x: u32, y: u32) -> Self {
        Self {
            x,
            y,
            r: "Horizontal".to_string(),
            is_searched: Some(true),
        }
    }
}
