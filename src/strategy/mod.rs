//! Strategy: pricing model, selling policy, and the explore → exploit run.

pub mod pricing;
pub mod selling;

use tracing::{error, info};

use crate::config::RunConfig;
use crate::engine::exploiter::Exploiter;
use crate::engine::explorer::{ExplorationReport, Explorer, ExplorerConfig};
use crate::environment::ForageEnvironment;
use crate::types::{ForagerError, RunSummary};

// ---------------------------------------------------------------------------
// Runner
// ---------------------------------------------------------------------------

/// Runs exploration, commits to the best candidate, then exploits it until
/// the horizon.
///
/// Instantiate once per run. The environment is passed in by the caller and
/// keeps all day, inventory and earnings state.
pub struct ForageStrategy {
    explorer: Explorer,
    exploiter: Exploiter,
    target_earnings: f64,
}

impl ForageStrategy {
    pub fn new(explorer: Explorer, exploiter: Exploiter, target_earnings: f64) -> Self {
        Self {
            explorer,
            exploiter,
            target_earnings,
        }
    }

    pub fn from_config(run: &RunConfig) -> Self {
        Self::new(
            Explorer::new(ExplorerConfig {
                budget: run.exploration_budget,
                samples_per_candidate: run.samples_per_candidate,
                horizon: run.horizon_days,
            }),
            Exploiter::new(run.horizon_days),
            run.target_earnings,
        )
    }

    /// Run both phases against `env`.
    ///
    /// Returns `ForagerError::NoViableSource` when exploration never produced
    /// a sampled candidate; in that case nothing is exploited.
    pub fn run<E>(&self, env: &mut E) -> Result<RunSummary, ForagerError>
    where
        E: ForageEnvironment + ?Sized,
    {
        let ExplorationReport {
            best,
            candidates_tested,
            days_used,
        } = self.explorer.find_best_source(env);

        let Some(best) = best else {
            error!(days_used, candidates_tested, "No viable source found");
            return Err(ForagerError::NoViableSource { days_used });
        };

        let exploitation = self.exploiter.exploit(env, &best);
        let ledger = exploitation.ledger;

        let summary = RunSummary {
            best: Some(best),
            exploration_days: days_used,
            candidates_tested,
            total_earnings: exploitation.total_earnings,
            total_foraged: ledger.total_foraged,
            total_sold: ledger.total_sold,
            sell_counts: ledger.sell_counts,
            average_daily_profit: exploitation.average_daily_profit,
            target_earnings: self.target_earnings,
        };

        info!(
            earned = format!("{:.2}", summary.total_earnings),
            target = format!("{:.2}", summary.target_earnings),
            success = summary.target_met(),
            "Run complete"
        );

        Ok(summary)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
