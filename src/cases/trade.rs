//! Trader registration: stock row, barter scheme and loyalty level for one item.

use std::collections::BTreeMap;

use log::debug;
use serde_json::Map;

use crate::config::TradeConfig;
use crate::errors::ModError;
use crate::tables::classes::TRADER_IDS;
use crate::tables::{AssortItem, AssortUpd, BarterPayment, Trader};

/// Parent and slot id the host uses for top-level assort rows.
const ASSORT_ROOT: &str = "hideout";

/// Canonical trader id for a configured trader name.
///
/// Unknown names are assumed to already be ids and come back unchanged.
pub fn resolve_trader_id(trader: &str) -> &str {
    TRADER_IDS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(trader))
        .map(|(_, id)| *id)
        .unwrap_or(trader)
}

/// Check up front that a trade can be registered, so callers can bail out
/// before touching any other table.
pub fn ensure_trader(traders: &BTreeMap<String, Trader>, trade: &TradeConfig) -> Result<(), ModError> {
    let trader_id = resolve_trader_id(&trade.trader);
    match traders.get(trader_id) {
        None => Err(ModError::TraderNotFound(trader_id.to_string())),
        Some(trader) if trader.assort.is_none() => {
            Err(ModError::MissingAssort(trader_id.to_string()))
        }
        Some(_) => Ok(()),
    }
}

/// Offer `item_id` at the configured trader.
///
/// The assort row, barter scheme and loyalty level are written together and
/// keyed by `item_id`; registering the same item again replaces all three.
pub fn register_trade(
    item_id: &str,
    trade: &TradeConfig,
    traders: &mut BTreeMap<String, Trader>,
) -> Result<(), ModError> {
    let trader_id = resolve_trader_id(&trade.trader);
    let trader = traders
        .get_mut(trader_id)
        .ok_or_else(|| ModError::TraderNotFound(trader_id.to_string()))?;
    let assort = trader
        .assort
        .as_mut()
        .ok_or_else(|| ModError::MissingAssort(trader_id.to_string()))?;

    assort.upsert_item(AssortItem {
        id: item_id.to_string(),
        template: item_id.to_string(),
        parent_id: ASSORT_ROOT.to_string(),
        slot_id: ASSORT_ROOT.to_string(),
        upd: Some(AssortUpd {
            unlimited_count: Some(trade.unlimited_stock),
            stack_objects_count: Some(trade.stock_amount),
            extra: Map::new(),
        }),
        extra: Map::new(),
    });

    let bundle: Vec<BarterPayment> = trade
        .barter
        .iter()
        .map(|cost| BarterPayment::new(&cost.id, cost.count))
        .collect();
    assort.barter_scheme.insert(item_id.to_string(), vec![bundle]);
    assort
        .loyal_level_items
        .insert(item_id.to_string(), trade.trader_loyalty_level);

    debug!(
        "registered {} at trader {} (loyalty {})",
        item_id, trader_id, trade.trader_loyalty_level
    );
    Ok(())
}
