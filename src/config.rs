//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs. Every
//! field has a default, so a partial file (or no file at all) yields the
//! standard 5000-day run.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::types::ForagerError;

/// Total simulated days.
pub const DEFAULT_HORIZON: u32 = 5000;
/// Days allotted to exploring and sampling candidates.
pub const DEFAULT_EXPLORATION_BUDGET: u32 = 200;
/// Forages per candidate during exploration.
pub const DEFAULT_SAMPLES_PER_CANDIDATE: u32 = 5;
/// Earnings needed for a run to count as a success.
pub const DEFAULT_TARGET_EARNINGS: f64 = 100_000.0;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub run: RunConfig,
    pub simulation: SimulationConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RunConfig {
    pub name: String,
    pub horizon_days: u32,
    pub exploration_budget: u32,
    pub samples_per_candidate: u32,
    pub target_earnings: f64,
    pub currency: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            name: "FORAGER-001".to_string(),
            horizon_days: DEFAULT_HORIZON,
            exploration_budget: DEFAULT_EXPLORATION_BUDGET,
            samples_per_candidate: DEFAULT_SAMPLES_PER_CANDIDATE,
            target_earnings: DEFAULT_TARGET_EARNINGS,
            currency: "€".to_string(),
        }
    }
}

/// Parameters of the seeded reference environment.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SimulationConfig {
    pub seed: u64,
    pub start_day: u32,
    pub rain_probability: f64,
    /// Multiplier applied to bush yields on rainy days.
    pub rain_yield_factor: f64,
    /// Probability that `explore` finds a berry bush rather than a tree.
    pub berry_bush_share: f64,
    pub tree_yield_min: f64,
    pub tree_yield_max: f64,
    pub bush_yield_min: f64,
    pub bush_yield_max: f64,
    /// Relative day-to-day yield noise (0.2 = ±20%).
    pub yield_noise: f64,
    pub apple_shelf_life: u32,
    pub berry_shelf_life: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 69,
            start_day: 0,
            rain_probability: 0.4,
            rain_yield_factor: 0.5,
            berry_bush_share: 0.5,
            tree_yield_min: 2.0,
            tree_yield_max: 14.0,
            bush_yield_min: 2.0,
            bush_yield_max: 12.0,
            yield_noise: 0.2,
            apple_shelf_life: 7,
            berry_shelf_life: 3,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {path}"))?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Reject values the strategy or the simulator cannot work with.
    pub fn validate(&self) -> Result<(), ForagerError> {
        let run = &self.run;
        let sim = &self.simulation;

        if run.horizon_days == 0 {
            return Err(ForagerError::Config("run.horizon_days must be > 0".into()));
        }
        if run.samples_per_candidate == 0 {
            return Err(ForagerError::Config(
                "run.samples_per_candidate must be > 0".into(),
            ));
        }
        for (name, p) in [
            ("simulation.rain_probability", sim.rain_probability),
            ("simulation.rain_yield_factor", sim.rain_yield_factor),
            ("simulation.berry_bush_share", sim.berry_bush_share),
            ("simulation.yield_noise", sim.yield_noise),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(ForagerError::Config(format!("{name} must be within [0, 1], got {p}")));
            }
        }
        for (name, lo, hi) in [
            ("tree", sim.tree_yield_min, sim.tree_yield_max),
            ("bush", sim.bush_yield_min, sim.bush_yield_max),
        ] {
            if lo < 0.0 || lo > hi {
                return Err(ForagerError::Config(format!(
                    "simulation.{name}_yield range is invalid: [{lo}, {hi}]"
                )));
            }
        }
        if sim.apple_shelf_life == 0 || sim.berry_shelf_life == 0 {
            return Err(ForagerError::Config("shelf lives must be > 0".into()));
        }
        Ok(())
    }
}
