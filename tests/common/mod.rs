//! Scripted environment for integration testing.
//!
//! Provides a deterministic `ForageEnvironment` whose sources are handed
//! out in a fixed order with a fixed yield per forage. Inventory ages one
//! day per day and sales use the weekly price tables, all in-memory.

#![allow(dead_code)]

use forager::environment::ForageEnvironment;
use forager::strategy::pricing::price_on;
use forager::types::{Candidate, InventoryItem, SourceKind};

pub struct ScriptedEnvironment {
    day: u32,
    sources: Vec<(SourceKind, f64)>,
    next: usize,
    inventory: Vec<InventoryItem>,
    earnings: f64,
    pub shelf_life: u32,
    pub explores: u32,
    pub forages: u32,
    pub sells: u32,
}

impl ScriptedEnvironment {
    /// Sources are discovered in order and cycle when exhausted.
    pub fn new(start_day: u32, sources: Vec<(SourceKind, f64)>) -> Self {
        assert!(!sources.is_empty(), "at least one scripted source");
        Self {
            day: start_day,
            sources,
            next: 0,
            inventory: Vec::new(),
            earnings: 0.0,
            shelf_life: 5,
            explores: 0,
            forages: 0,
            sells: 0,
        }
    }

    fn advance(&mut self) {
        self.day += 1;
        self.inventory.retain_mut(|i| {
            i.shelf_life = i.shelf_life.saturating_sub(1);
            i.shelf_life > 0
        });
    }
}

impl ForageEnvironment for ScriptedEnvironment {
    fn what_day_is_it(&self) -> u32 {
        self.day
    }

    fn is_it_raining(&self) -> bool {
        false
    }

    fn explore(&mut self) -> Candidate {
        let id = self.next as u32;
        let (kind, _) = self.sources[self.next % self.sources.len()];
        self.next += 1;
        self.explores += 1;
        self.advance();
        Candidate { id, kind }
    }

    fn forage(&mut self, candidate: &Candidate) -> f64 {
        let (_, amount) = self.sources[candidate.id as usize % self.sources.len()];
        self.forages += 1;
        self.advance();
        self.inventory.push(InventoryItem {
            fruit: candidate.fruit(),
            mass: amount,
            shelf_life: self.shelf_life,
        });
        amount
    }

    fn sell(&mut self) -> f64 {
        let day = self.day;
        let proceeds: f64 = self
            .inventory
            .drain(..)
            .map(|i| i.mass * price_on(i.fruit, day))
            .sum();
        self.sells += 1;
        self.earnings += proceeds;
        proceeds
    }

    fn inventory(&self) -> Vec<InventoryItem> {
        self.inventory.clone()
    }

    fn earnings(&self) -> f64 {
        self.earnings
    }
}
