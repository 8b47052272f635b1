//! Selling policy.
//!
//! Decides each day whether to liquidate the inventory, trading off the
//! weekly price cycle against spoilage.

use tracing::debug;

use super::pricing::is_optimal_day;
use crate::types::{min_shelf_life, FruitType, InventoryItem, SellDecision, SellReason};

/// Decide whether to sell everything on `day`.
///
/// Rules, first match wins:
/// 1. nothing to sell → hold (`EmptyInventory`)
/// 2. today pays the best price for `fruit` → sell (`OptimalPrice`)
/// 3. something spoils by tomorrow → sell (`SpoilageRisk`)
/// 4. something has two days left and tomorrow is not a best-price day →
///    sell (`PreemptiveSpoilage`)
/// 5. otherwise hold
pub fn should_sell_today(day: u32, fruit: FruitType, inventory: &[InventoryItem]) -> SellDecision {
    let Some(min_days_left) = min_shelf_life(inventory) else {
        return SellDecision::hold(SellReason::EmptyInventory);
    };

    // Weekday of tomorrow; `day + 1` would overflow at u32::MAX.
    let tomorrow = day % 7 + 1;
    let decision = if is_optimal_day(fruit, day) {
        SellDecision::sell(SellReason::OptimalPrice)
    } else if min_days_left <= 1 {
        SellDecision::sell(SellReason::SpoilageRisk)
    } else if min_days_left <= 2 && !is_optimal_day(fruit, tomorrow) {
        SellDecision::sell(SellReason::PreemptiveSpoilage)
    } else {
        SellDecision::hold(SellReason::Hold)
    };

    debug!(
        day,
        fruit = %fruit,
        items = inventory.len(),
        min_days_left,
        sell = decision.sell,
        reason = %decision.reason,
        "Sell decision"
    );

    decision
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
