//! Trader records: the assort (what is on sale), the barter schemes (what it
//! costs) and the loyalty map (who may buy it).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Trader {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assort: Option<TraderAssort>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Trader {
    pub fn with_empty_assort() -> Self {
        Self {
            assort: Some(TraderAssort::default()),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TraderAssort {
    #[serde(default)]
    pub items: Vec<AssortItem>,
    /// Item id to a list of alternative payment bundles.
    #[serde(default)]
    pub barter_scheme: BTreeMap<String, Vec<Vec<BarterPayment>>>,
    #[serde(default)]
    pub loyal_level_items: BTreeMap<String, u8>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TraderAssort {
    /// Insert the row, replacing any existing row with the same `_id`.
    pub fn upsert_item(&mut self, row: AssortItem) {
        match self.items.iter_mut().find(|existing| existing.id == row.id) {
            Some(existing) => *existing = row,
            None => self.items.push(row),
        }
    }

    pub fn find_item(&self, id: &str) -> Option<&AssortItem> {
        self.items.iter().find(|row| row.id == id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssortItem {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_tpl")]
    pub template: String,
    #[serde(rename = "parentId", default)]
    pub parent_id: String,
    #[serde(rename = "slotId", default)]
    pub slot_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upd: Option<AssortUpd>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AssortUpd {
    #[serde(rename = "UnlimitedCount", default, skip_serializing_if = "Option::is_none")]
    pub unlimited_count: Option<bool>,
    #[serde(rename = "StackObjectsCount", default, skip_serializing_if = "Option::is_none")]
    pub stack_objects_count: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One currency or item requirement inside a payment bundle.
///
/// `count` keeps the number as written, so whole prices stay integers on save.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BarterPayment {
    #[serde(rename = "_tpl")]
    pub template: String,
    pub count: Number,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BarterPayment {
    pub fn new(template: &str, count: f64) -> Self {
        Self {
            template: template.to_string(),
            count: count_number(count),
            extra: Map::new(),
        }
    }

    pub fn amount(&self) -> f64 {
        self.count.as_f64().unwrap_or_default()
    }
}

fn count_number(count: f64) -> Number {
    if count.fract() == 0.0 && count.abs() < i64::MAX as f64 {
        Number::from(count as i64)
    } else {
        Number::from_f64(count).unwrap_or_else(|| Number::from(0))
    }
}
