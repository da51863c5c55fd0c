//! Item templates as stored in `templates.items`.
//!
//! Only the properties this crate reads or writes are typed; everything else is
//! captured in the flattened `extra` maps so a load/save round trip never drops
//! fields the host (or another mod) relies on.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::classes::{EMPTY_FILTER, ITEM};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemplateItem {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_name", default)]
    pub name: String,
    #[serde(rename = "_parent", default)]
    pub parent: String,
    #[serde(rename = "_type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(rename = "_props", default)]
    pub props: ItemProps,
    #[serde(rename = "_proto", default, skip_serializing_if = "Option::is_none")]
    pub proto: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TemplateItem {
    pub fn new(id: &str, name: &str, parent: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            parent: parent.to_string(),
            kind: Some("Item".to_string()),
            props: ItemProps::default(),
            proto: None,
            extra: Map::new(),
        }
    }

    pub fn with_grids(mut self, grids: Vec<Grid>) -> Self {
        self.props.grids = Some(grids);
        self
    }

    /// True when the item's direct parent class is `class_id`.
    pub fn is_a(&self, class_id: &str) -> bool {
        self.parent == class_id
    }

    pub fn grids_mut(&mut self) -> &mut [Grid] {
        match self.props.grids.as_mut() {
            Some(grids) => grids.as_mut_slice(),
            None => &mut [],
        }
    }

    pub fn first_grid_mut(&mut self) -> Option<&mut Grid> {
        self.props.grids.as_mut().and_then(|grids| grids.first_mut())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ItemProps {
    #[serde(rename = "Grids", default, skip_serializing_if = "Option::is_none")]
    pub grids: Option<Vec<Grid>>,
    #[serde(rename = "Slots", default, skip_serializing_if = "Option::is_none")]
    pub slots: Option<Vec<Slot>>,
    #[serde(rename = "Weight", default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// `-1` means unlimited.
    #[serde(rename = "DiscardLimit", default, skip_serializing_if = "Option::is_none")]
    pub discard_limit: Option<i64>,
    /// `0` means unlimited.
    #[serde(
        rename = "MaximumNumberOfUsage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub maximum_number_of_usage: Option<i64>,
    #[serde(
        rename = "IsAlwaysAvailableForInsurance",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub always_insurable: Option<bool>,
    #[serde(rename = "ItemSound", default, skip_serializing_if = "Option::is_none")]
    pub item_sound: Option<String>,
    #[serde(rename = "Prefab", default, skip_serializing_if = "Option::is_none")]
    pub prefab: Option<Prefab>,
    #[serde(rename = "Width", default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(rename = "Height", default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Prefab {
    #[serde(default)]
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rcid: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One include/exclude pair inside a grid's or slot's `filters` list.
///
/// Both halves are optional because other mods are known to strip them; the
/// accessors create them on first use.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FilterEntry {
    #[serde(rename = "Filter", default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Vec<String>>,
    #[serde(
        rename = "ExcludedFilter",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub excluded_filter: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FilterEntry {
    pub fn new(include: Vec<String>, exclude: Vec<String>) -> Self {
        Self {
            filter: Some(include),
            excluded_filter: Some(exclude),
            extra: Map::new(),
        }
    }

    /// `{Filter: [ITEM], ExcludedFilter: [""]}`
    pub fn accept_all() -> Self {
        Self::new(vec![ITEM.to_string()], vec![EMPTY_FILTER.to_string()])
    }

    pub fn include(&self) -> &[String] {
        self.filter.as_deref().unwrap_or(&[])
    }

    pub fn exclude(&self) -> &[String] {
        self.excluded_filter.as_deref().unwrap_or(&[])
    }

    pub fn include_mut(&mut self) -> &mut Vec<String> {
        self.filter.get_or_insert_with(Vec::new)
    }

    pub fn exclude_mut(&mut self) -> &mut Vec<String> {
        self.excluded_filter.get_or_insert_with(Vec::new)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Grid {
    #[serde(rename = "_name", default)]
    pub name: String,
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "_parent", default)]
    pub parent: String,
    #[serde(rename = "_props", default)]
    pub props: GridProps,
    #[serde(rename = "_proto", default, skip_serializing_if = "Option::is_none")]
    pub proto: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Grid {
    /// First filter entry of this grid, created if the list is empty.
    pub fn first_filter_mut(&mut self) -> &mut FilterEntry {
        if self.props.filters.is_empty() {
            self.props.filters.push(FilterEntry::default());
        }
        &mut self.props.filters[0]
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GridProps {
    #[serde(default)]
    pub filters: Vec<FilterEntry>,
    #[serde(rename = "cellsH", default, skip_serializing_if = "Option::is_none")]
    pub cells_h: Option<u32>,
    #[serde(rename = "cellsV", default, skip_serializing_if = "Option::is_none")]
    pub cells_v: Option<u32>,
    #[serde(rename = "minCount", default, skip_serializing_if = "Option::is_none")]
    pub min_count: Option<u32>,
    #[serde(rename = "maxCount", default, skip_serializing_if = "Option::is_none")]
    pub max_count: Option<u32>,
    #[serde(rename = "maxWeight", default, skip_serializing_if = "Option::is_none")]
    pub max_weight: Option<u32>,
    #[serde(rename = "isSortingTable", default, skip_serializing_if = "Option::is_none")]
    pub is_sorting_table: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Slot {
    #[serde(rename = "_name", default)]
    pub name: String,
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "_parent", default)]
    pub parent: String,
    #[serde(rename = "_props", default)]
    pub props: SlotProps,
    #[serde(rename = "_required", default)]
    pub required: bool,
    #[serde(rename = "_mergeSlotWithChildren", default)]
    pub merge_slot_with_children: bool,
    #[serde(rename = "_proto", default, skip_serializing_if = "Option::is_none")]
    pub proto: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SlotProps {
    #[serde(default)]
    pub filters: Vec<FilterEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
