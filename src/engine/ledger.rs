//! Ledger: running totals for one exploitation run.
//!
//! Tracks harvested and sold mass and per-reason sale counts. Cumulative
//! earnings remain owned by the environment; the ledger only mirrors what
//! the strategy observed.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{SellCounts, SellReason};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    pub days: u32,
    pub total_foraged: f64,
    /// Mass sold by the daily policy. The final liquidation is excluded.
    pub total_sold: f64,
    pub sales: u32,
    pub sell_counts: SellCounts,
    /// Proceeds of the liquidation after the last day, if any.
    pub final_sale: Option<f64>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one day's harvest.
    pub fn record_harvest(&mut self, amount: f64) {
        self.days += 1;
        self.total_foraged += amount;
    }

    /// Record a policy-driven sale.
    pub fn record_sale(&mut self, reason: SellReason, mass: f64, proceeds: f64) {
        self.total_sold += mass;
        self.sales += 1;
        self.sell_counts.record(reason);
        debug!(reason = %reason, kg = format!("{mass:.2}"), proceeds = format!("{proceeds:.2}"), "Sale recorded");
    }

    /// Record the end-of-run liquidation. Only its proceeds are kept; it
    /// counts toward neither sold mass nor any reason.
    pub fn record_final_sale(&mut self, proceeds: f64) {
        self.final_sale = Some(proceeds);
    }
}
