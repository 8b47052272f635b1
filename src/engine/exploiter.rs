//! Exploiter: harvest the chosen source every day until the horizon.
//!
//! Each day: forage, look at the inventory, ask the selling policy, sell or
//! hold. Whatever is left after the last day is liquidated.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::ledger::Ledger;
use crate::environment::ForageEnvironment;
use crate::strategy::pricing::weekday_of;
use crate::strategy::selling::should_sell_today;
use crate::types::{inventory_mass, min_shelf_life, CandidateRecord, FruitType};

/// Outcome of an exploitation phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExploitationReport {
    pub start_day: u32,
    pub end_day: u32,
    pub ledger: Ledger,
    /// The environment's cumulative earnings counter after liquidation.
    pub total_earnings: f64,
    /// `total_earnings` spread over the whole horizon.
    pub average_daily_profit: f64,
}

pub struct Exploiter {
    horizon: u32,
}

impl Exploiter {
    pub fn new(horizon: u32) -> Self {
        Self { horizon }
    }

    /// Run the sell/hold loop on `record.candidate` until the horizon.
    pub fn exploit<E>(&self, env: &mut E, record: &CandidateRecord) -> ExploitationReport
    where
        E: ForageEnvironment + ?Sized,
    {
        let start_day = env.what_day_is_it();
        info!(
            start_day,
            remaining_days = self.horizon.saturating_sub(start_day),
            source = %record.candidate,
            "Exploitation phase started"
        );

        let mut ledger = Ledger::new();

        while env.what_day_is_it() < self.horizon {
            let day = env.what_day_is_it();
            let raining = env.is_it_raining();

            let amount = env.forage(&record.candidate);
            ledger.record_harvest(amount);

            let inventory = env.inventory();
            let decision = should_sell_today(day, record.fruit, &inventory);

            let rain_tag = if raining && record.fruit == FruitType::Berries {
                " (RAIN)"
            } else {
                ""
            };

            if decision.sell && !inventory.is_empty() {
                let proceeds = env.sell();
                let kg_sold = inventory_mass(&inventory);
                ledger.record_sale(decision.reason, kg_sold, proceeds);
                info!(
                    day,
                    amount,
                    reason = %decision.reason,
                    kg_sold,
                    proceeds,
                    "Day {day} ({}): Foraged {amount:.2} kg{rain_tag} | SOLD {} items ({kg_sold:.2} kg) for {proceeds:.2} ({}) | Total: {:.2}",
                    weekday_of(day),
                    inventory.len(),
                    decision.reason,
                    env.earnings(),
                );
            } else {
                info!(
                    day,
                    amount,
                    reason = %decision.reason,
                    "Day {day} ({}): Foraged {amount:.2} kg{rain_tag} | Inventory: {} items ({:.2} kg, min age: {}) | Total: {:.2}",
                    weekday_of(day),
                    inventory.len(),
                    inventory_mass(&inventory),
                    min_shelf_life(&inventory).unwrap_or(0),
                    env.earnings(),
                );
            }
        }

        let leftover = env.inventory();
        if !leftover.is_empty() {
            let proceeds = env.sell();
            ledger.record_final_sale(proceeds);
            info!(
                proceeds = format!("{proceeds:.2}"),
                items = leftover.len(),
                kg = format!("{:.2}", inventory_mass(&leftover)),
                "Final sale"
            );
        }

        let total_earnings = env.earnings();
        let report = ExploitationReport {
            start_day,
            end_day: env.what_day_is_it(),
            ledger,
            total_earnings,
            average_daily_profit: total_earnings / self.horizon as f64,
        };

        info!(
            total_earned = format!("{:.2}", report.total_earnings),
            total_foraged = format!("{:.2} kg", report.ledger.total_foraged),
            total_sold = format!("{:.2} kg", report.ledger.total_sold),
            sell_reasons = %report.ledger.sell_counts,
            avg_daily_profit = format!("{:.2}", report.average_daily_profit),
            "Exploitation complete"
        );

        report
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::MockForageEnvironment;
    use crate::types::{Candidate, InventoryItem, SourceKind};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};

    // ---- helpers -----------------------------------------------------------

    fn apple_record() -> CandidateRecord {
        CandidateRecord {
            candidate: Candidate { id: 0, kind: SourceKind::Tree },
            fruit: FruitType::Apples,
            samples: vec![2.0],
            avg_yield: 2.0,
            expected_profit: 4.0,
        }
    }

    /// Mock that yields `amount` kg of apples per forage with a fixed
    /// shelf-life, and sells everything at 1.0 per kg.
    fn apple_mock(start_day: u32, amount: f64, shelf_life: u32) -> MockForageEnvironment {
        let day = Arc::new(AtomicU32::new(start_day));
        let inventory: Arc<Mutex<Vec<InventoryItem>>> = Arc::new(Mutex::new(Vec::new()));
        let earnings = Arc::new(Mutex::new(0.0_f64));
        let mut mock = MockForageEnvironment::new();

        let d = day.clone();
        mock.expect_what_day_is_it().returning(move || d.load(Ordering::SeqCst));
        mock.expect_is_it_raining().return_const(false);

        let d = day.clone();
        let inv = inventory.clone();
        mock.expect_forage().returning(move |_| {
            d.fetch_add(1, Ordering::SeqCst);
            inv.lock().unwrap().push(InventoryItem {
                fruit: FruitType::Apples,
                mass: amount,
                shelf_life,
            });
            amount
        });

        let inv = inventory.clone();
        mock.expect_inventory().returning(move || inv.lock().unwrap().clone());

        let inv = inventory.clone();
        let e = earnings.clone();
        mock.expect_sell().returning(move || {
            let proceeds: f64 = inv.lock().unwrap().drain(..).map(|i| i.mass).sum();
            *e.lock().unwrap() += proceeds;
            proceeds
        });

        let e = earnings.clone();
        mock.expect_earnings().returning(move || *e.lock().unwrap());

        mock
    }

    // ---- tests -------------------------------------------------------------

    #[test]
    fn test_runs_until_horizon() {
        let mut mock = apple_mock(0, 1.0, 10);
        let report = Exploiter::new(14).exploit(&mut mock, &apple_record());
        assert_eq!(report.start_day, 0);
        assert_eq!(report.end_day, 14);
        assert_eq!(report.ledger.days, 14);
        assert!((report.ledger.total_foraged - 14.0).abs() < 1e-12);
        // Everything harvested is sold, mostly on Tue/Wed, rest at the end.
        assert!((report.total_earnings - 14.0).abs() < 1e-12);
        assert!((report.average_daily_profit - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_sells_on_optimal_days_with_long_shelf_life() {
        let mut mock = apple_mock(0, 1.0, 10);
        let report = Exploiter::new(7).exploit(&mut mock, &apple_record());
        // Days 1 and 2 are Tue/Wed; nothing else triggers a sale.
        assert_eq!(report.ledger.sell_counts.optimal_price, 2);
        assert_eq!(report.ledger.sell_counts.spoilage_risk, 0);
        assert_eq!(report.ledger.sales, 2);
        // Mon+Tue harvest sold Tuesday, Wed harvest sold Wednesday.
        assert!((report.ledger.total_sold - 3.0).abs() < 1e-12);
        // Thu..Sun harvest liquidated at the end.
        assert_eq!(report.ledger.final_sale, Some(4.0));
        assert!((report.total_earnings - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_final_sale_not_counted_as_sold() {
        // Thursday to Saturday with fresh apples: nothing sells in the loop.
        let mut mock = apple_mock(3, 1.0, 10);
        let report = Exploiter::new(6).exploit(&mut mock, &apple_record());
        assert_eq!(report.ledger.days, 3);
        assert_eq!(report.ledger.sales, 0);
        assert_eq!(report.ledger.total_sold, 0.0);
        assert_eq!(report.ledger.final_sale, Some(3.0));
        assert!((report.total_earnings - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_short_shelf_life_sells_every_day() {
        let mut mock = apple_mock(0, 1.0, 1);
        let report = Exploiter::new(7).exploit(&mut mock, &apple_record());
        assert_eq!(report.ledger.sales, 7);
        assert_eq!(report.ledger.sell_counts.optimal_price, 2);
        assert_eq!(report.ledger.sell_counts.spoilage_risk, 5);
        assert!(report.ledger.final_sale.is_none());
    }

    #[test]
    fn test_already_at_horizon_does_nothing() {
        let mut mock = MockForageEnvironment::new();
        mock.expect_what_day_is_it().return_const(5000u32);
        mock.expect_forage().never();
        mock.expect_inventory().returning(Vec::new);
        mock.expect_sell().never();
        mock.expect_earnings().return_const(0.0);

        let report = Exploiter::new(5000).exploit(&mut mock, &apple_record());
        assert_eq!(report.ledger.days, 0);
        assert_eq!(report.total_earnings, 0.0);
    }
}
