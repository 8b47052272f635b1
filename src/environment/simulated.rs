//! Seeded in-process forest.
//!
//! Trees grow apples, berry bushes grow berries. Each source has a hidden
//! base yield; daily harvests jitter around it and bushes lose part of
//! their yield on rainy days. Inventory ages one day per day and spoils
//! at zero shelf-life. Sales use the weekly price tables.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;
use tracing::{debug, warn};

use super::ForageEnvironment;
use crate::config::SimulationConfig;
use crate::strategy::pricing::price_on;
use crate::types::{Candidate, FruitType, InventoryItem, SourceKind};

/// Hidden per-source state.
#[derive(Debug, Clone, Copy)]
struct Source {
    kind: SourceKind,
    base_yield: f64,
}

pub struct SimulatedForest {
    config: SimulationConfig,
    rng: ChaCha8Rng,
    day: u32,
    day_limit: u32,
    raining: bool,
    sources: HashMap<u32, Source>,
    next_id: u32,
    inventory: Vec<InventoryItem>,
    earnings: f64,
    spoiled_mass: f64,
}

impl SimulatedForest {
    pub fn new(config: SimulationConfig, day_limit: u32) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let raining = rng.gen_bool(config.rain_probability);
        Self {
            day: config.start_day,
            config,
            rng,
            day_limit,
            raining,
            sources: HashMap::new(),
            next_id: 0,
            inventory: Vec::new(),
            earnings: 0.0,
            spoiled_mass: 0.0,
        }
    }

    /// Restart the clock at the configured start day and bound the run to
    /// `limit` days. Inventory, earnings and known sources are cleared; the
    /// random stream is reseeded.
    pub fn reset_days(&mut self, limit: u32) {
        *self = Self::new(self.config.clone(), limit);
    }

    pub fn day_limit(&self) -> u32 {
        self.day_limit
    }

    /// Mass lost to spoilage so far, in kg.
    pub fn spoiled_mass(&self) -> f64 {
        self.spoiled_mass
    }

    fn shelf_life(&self, fruit: FruitType) -> u32 {
        match fruit {
            FruitType::Apples => self.config.apple_shelf_life,
            FruitType::Berries => self.config.berry_shelf_life,
        }
    }

    /// Move to the next day: age the inventory, drop spoiled batches and
    /// roll the weather.
    fn advance_day(&mut self) {
        if self.day >= self.day_limit {
            warn!(day = self.day, limit = self.day_limit, "Acting past the day limit");
        }
        self.day += 1;

        let mut spoiled = 0.0;
        self.inventory.retain_mut(|item| {
            item.shelf_life = item.shelf_life.saturating_sub(1);
            if item.shelf_life == 0 {
                spoiled += item.mass;
                false
            } else {
                true
            }
        });
        if spoiled > 0.0 {
            debug!(day = self.day, kg = format!("{spoiled:.2}"), "Inventory spoiled");
            self.spoiled_mass += spoiled;
        }

        self.raining = self.rng.gen_bool(self.config.rain_probability);
    }

    fn harvest(&mut self, source: Source) -> f64 {
        let noise = self.config.yield_noise;
        let mut amount = source.base_yield * self.rng.gen_range(1.0 - noise..=1.0 + noise);
        if source.kind == SourceKind::BerryBush && self.raining {
            amount *= self.config.rain_yield_factor;
        }
        amount.max(0.0)
    }
}

impl ForageEnvironment for SimulatedForest {
    fn what_day_is_it(&self) -> u32 {
        self.day
    }

    fn is_it_raining(&self) -> bool {
        self.raining
    }

    fn explore(&mut self) -> Candidate {
        let kind = if self.rng.gen_bool(self.config.berry_bush_share) {
            SourceKind::BerryBush
        } else {
            SourceKind::Tree
        };
        let (lo, hi) = match kind {
            SourceKind::Tree => (self.config.tree_yield_min, self.config.tree_yield_max),
            SourceKind::BerryBush => (self.config.bush_yield_min, self.config.bush_yield_max),
        };
        let base_yield = self.rng.gen_range(lo..=hi);

        let id = self.next_id;
        self.next_id += 1;
        self.sources.insert(id, Source { kind, base_yield });

        debug!(day = self.day, id, kind = %kind, "Explored new source");
        self.advance_day();
        Candidate { id, kind }
    }

    fn forage(&mut self, candidate: &Candidate) -> f64 {
        let amount = match self.sources.get(&candidate.id).copied() {
            Some(source) => self.harvest(source),
            None => {
                warn!(id = candidate.id, "Foraging an unknown source yields nothing");
                0.0
            }
        };
        self.advance_day();

        if amount > 0.0 {
            let fruit = candidate.fruit();
            self.inventory.push(InventoryItem {
                fruit,
                mass: amount,
                shelf_life: self.shelf_life(fruit),
            });
        }
        amount
    }

    fn sell(&mut self) -> f64 {
        let day = self.day;
        let proceeds: f64 = self
            .inventory
            .drain(..)
            .map(|item| item.mass * price_on(item.fruit, day))
            .sum();
        self.earnings += proceeds;
        debug!(day, proceeds = format!("{proceeds:.2}"), "Inventory sold");
        proceeds
    }

    fn inventory(&self) -> Vec<InventoryItem> {
        self.inventory.clone()
    }

    fn earnings(&self) -> f64 {
        self.earnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
