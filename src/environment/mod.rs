//! Foraging environments.
//!
//! Defines the `ForageEnvironment` trait the strategy drives, and provides
//! `SimulatedForest`, a seeded in-process implementation.

pub mod simulated;

use crate::types::{Candidate, InventoryItem};

/// Abstraction over the world the strategy forages in.
///
/// The environment owns the day counter, the inventory and cumulative
/// earnings. Every operation is assumed to succeed; only yields are random.
#[cfg_attr(test, mockall::automock)]
pub trait ForageEnvironment {
    /// Current day counter. Never decreases.
    fn what_day_is_it(&self) -> u32;

    /// Whether it is raining today.
    fn is_it_raining(&self) -> bool;

    /// Discover a new source. Consumes one day.
    fn explore(&mut self) -> Candidate;

    /// Harvest from `candidate`, adding the batch to the inventory.
    /// Consumes one day and returns the harvested mass in kg.
    fn forage(&mut self, candidate: &Candidate) -> f64;

    /// Sell the whole inventory at today's prices. Does not advance the day.
    /// Returns the proceeds.
    fn sell(&mut self) -> f64;

    /// Snapshot of the current inventory.
    fn inventory(&self) -> Vec<InventoryItem>;

    /// Cumulative sale proceeds.
    fn earnings(&self) -> f64;
}
