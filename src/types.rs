//! Shared types for the FORAGER strategy.
//!
//! These types form the data model used across all modules so that the
//! environment, strategy, and engine modules can depend on them without
//! circular references.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Fruit & sources
// ---------------------------------------------------------------------------

/// The two kinds of produce a source can yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FruitType {
    Apples,
    Berries,
}

impl fmt::Display for FruitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FruitType::Apples => write!(f, "apples"),
            FruitType::Berries => write!(f, "berries"),
        }
    }
}

/// Concrete variant of a discovered source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    Tree,
    BerryBush,
}

impl SourceKind {
    /// The fruit this kind of source produces.
    pub fn fruit(&self) -> FruitType {
        match self {
            SourceKind::Tree => FruitType::Apples,
            SourceKind::BerryBush => FruitType::Berries,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Tree => write!(f, "Tree"),
            SourceKind::BerryBush => write!(f, "BerryBush"),
        }
    }
}

/// Opaque handle to a source discovered by `explore`.
///
/// The environment owns whatever hidden state backs the handle; the
/// strategy only ever hands it back to `forage`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    pub id: u32,
    pub kind: SourceKind,
}

impl Candidate {
    pub fn fruit(&self) -> FruitType {
        self.kind.fruit()
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{} ({})", self.kind, self.id, self.fruit())
    }
}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

/// One harvested batch held by the environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub fruit: FruitType,
    /// Mass in kg.
    pub mass: f64,
    /// Days left before the batch spoils.
    pub shelf_life: u32,
}

/// Total mass across an inventory snapshot.
pub fn inventory_mass(items: &[InventoryItem]) -> f64 {
    items.iter().map(|i| i.mass).sum()
}

/// Smallest remaining shelf-life, or `None` for an empty inventory.
pub fn min_shelf_life(items: &[InventoryItem]) -> Option<u32> {
    items.iter().map(|i| i.shelf_life).min()
}

// ---------------------------------------------------------------------------
// Candidate record
// ---------------------------------------------------------------------------

/// Exploration result for one sampled candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub candidate: Candidate,
    pub fruit: FruitType,
    /// Raw yields observed while sampling, in kg.
    pub samples: Vec<f64>,
    /// Expected daily yield after the rain adjustment.
    pub avg_yield: f64,
    pub expected_profit: f64,
}

// ---------------------------------------------------------------------------
// Sell decisions
// ---------------------------------------------------------------------------

/// Why the selling policy sold or held on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SellReason {
    OptimalPrice,
    SpoilageRisk,
    PreemptiveSpoilage,
    EmptyInventory,
    Hold,
}

impl fmt::Display for SellReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SellReason::OptimalPrice => write!(f, "optimal_price"),
            SellReason::SpoilageRisk => write!(f, "spoilage_risk"),
            SellReason::PreemptiveSpoilage => write!(f, "preemptive_spoilage"),
            SellReason::EmptyInventory => write!(f, "empty_inventory"),
            SellReason::Hold => write!(f, "hold"),
        }
    }
}

/// Output of the selling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellDecision {
    pub sell: bool,
    pub reason: SellReason,
}

impl SellDecision {
    pub fn sell(reason: SellReason) -> Self {
        Self { sell: true, reason }
    }

    pub fn hold(reason: SellReason) -> Self {
        Self { sell: false, reason }
    }
}

/// Number of sales triggered by each reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellCounts {
    pub optimal_price: u32,
    pub spoilage_risk: u32,
    pub preemptive_spoilage: u32,
    pub empty_inventory: u32,
}

impl SellCounts {
    /// Count one sale for `reason`. `Hold` never results in a sale.
    pub fn record(&mut self, reason: SellReason) {
        match reason {
            SellReason::OptimalPrice => self.optimal_price += 1,
            SellReason::SpoilageRisk => self.spoilage_risk += 1,
            SellReason::PreemptiveSpoilage => self.preemptive_spoilage += 1,
            SellReason::EmptyInventory => self.empty_inventory += 1,
            SellReason::Hold => {}
        }
    }

    pub fn total(&self) -> u32 {
        self.optimal_price + self.spoilage_risk + self.preemptive_spoilage + self.empty_inventory
    }
}

impl fmt::Display for SellCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "optimal_price={} spoilage_risk={} preemptive_spoilage={} empty_inventory={}",
            self.optimal_price, self.spoilage_risk, self.preemptive_spoilage, self.empty_inventory,
        )
    }
}

// ---------------------------------------------------------------------------
// Run summary
// ---------------------------------------------------------------------------

/// Final outcome of an explore→exploit run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub best: Option<CandidateRecord>,
    pub exploration_days: u32,
    pub candidates_tested: usize,
    pub total_earnings: f64,
    pub total_foraged: f64,
    pub total_sold: f64,
    pub sell_counts: SellCounts,
    pub average_daily_profit: f64,
    pub target_earnings: f64,
}

impl RunSummary {
    pub fn target_met(&self) -> bool {
        self.total_earnings >= self.target_earnings
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match &self.best {
            Some(r) => r.candidate.to_string(),
            None => "none".to_string(),
        };
        write!(
            f,
            "source={} | earned={:.2} | foraged={:.2} kg | sold={:.2} kg | {} | avg/day={:.2} | target={:.2} ({})",
            source,
            self.total_earnings,
            self.total_foraged,
            self.total_sold,
            self.sell_counts,
            self.average_daily_profit,
            self.target_earnings,
            if self.target_met() { "MET" } else { "MISSED" },
        )
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for FORAGER.
#[derive(Debug, thiserror::Error)]
pub enum ForagerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No viable source found after {days_used} exploration days")]
    NoViableSource { days_used: u32 },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
