//! Explorer: sample freshly discovered sources and pick the best.
//!
//! Each candidate costs one day to discover plus one day per sample. The
//! explorer stops when its day budget is spent or the horizon is reached.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::environment::ForageEnvironment;
use crate::strategy::pricing::expected_profit_per_day;
use crate::types::CandidateRecord;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    /// Days allotted to discovery and sampling.
    pub budget: u32,
    /// Forages per candidate.
    pub samples_per_candidate: u32,
    /// Last simulated day (exclusive).
    pub horizon: u32,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            budget: crate::config::DEFAULT_EXPLORATION_BUDGET,
            samples_per_candidate: crate::config::DEFAULT_SAMPLES_PER_CANDIDATE,
            horizon: crate::config::DEFAULT_HORIZON,
        }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Outcome of an exploration phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorationReport {
    /// Best candidate by expected profit, `None` if nothing was sampled.
    pub best: Option<CandidateRecord>,
    pub candidates_tested: usize,
    pub days_used: u32,
}

// ---------------------------------------------------------------------------
// Explorer
// ---------------------------------------------------------------------------

pub struct Explorer {
    config: ExplorerConfig,
}

impl Explorer {
    pub fn new(config: ExplorerConfig) -> Self {
        Self { config }
    }

    /// Explore and sample candidates until the budget or horizon runs out.
    ///
    /// The best candidate only changes on a strictly higher expected profit,
    /// so the first-seen candidate wins ties.
    pub fn find_best_source<E>(&self, env: &mut E) -> ExplorationReport
    where
        E: ForageEnvironment + ?Sized,
    {
        let budget = self.config.budget;
        let horizon = self.config.horizon;
        info!(budget, start_day = env.what_day_is_it(), "Exploration phase started");

        let mut best: Option<CandidateRecord> = None;
        let mut best_profit = 0.0_f64;
        let mut candidates_tested = 0usize;
        let mut days_used = 0u32;

        while days_used < budget && env.what_day_is_it() < horizon {
            let candidate = env.explore();
            days_used += 1;

            if days_used >= budget {
                info!(day = env.what_day_is_it(), "Exploration budget exhausted");
                break;
            }

            let sample_days = self.config.samples_per_candidate.min(budget - days_used);
            let mut samples = Vec::with_capacity(sample_days as usize);
            for _ in 0..sample_days {
                if env.what_day_is_it() >= horizon {
                    break;
                }
                samples.push(env.forage(&candidate));
                days_used += 1;
            }

            if samples.is_empty() {
                debug!(candidate = %candidate, "Candidate skipped, no samples taken");
                continue;
            }

            let mean = samples.iter().sum::<f64>() / samples.len() as f64;
            let fruit = candidate.fruit();
            let (expected_profit, avg_yield) = expected_profit_per_day(mean, fruit);

            let record = CandidateRecord {
                candidate,
                fruit,
                samples,
                avg_yield,
                expected_profit,
            };
            candidates_tested += 1;

            info!(
                day = env.what_day_is_it(),
                source = %record.candidate.kind,
                samples = ?record.samples.iter().map(|s| format!("{s:.2}")).collect::<Vec<_>>(),
                avg_yield = format!("{:.2} kg/day", record.avg_yield),
                expected_profit = format!("{:.2}/day", record.expected_profit),
                "Candidate tested"
            );

            if expected_profit > best_profit {
                best_profit = expected_profit;
                info!(
                    candidate = %record.candidate,
                    expected_profit = format!("{expected_profit:.2}/day"),
                    "New best candidate"
                );
                best = Some(record);
            }
        }

        let report = ExplorationReport {
            best,
            candidates_tested,
            days_used,
        };
        self.log_summary(&report, env.what_day_is_it());
        report
    }

    fn log_summary(&self, report: &ExplorationReport, day: u32) {
        match &report.best {
            Some(best) => {
                let remaining = self.config.horizon.saturating_sub(day);
                info!(
                    days_used = report.days_used,
                    candidates_tested = report.candidates_tested,
                    best = %best.candidate,
                    expected_yield = format!("{:.2} kg/day", best.avg_yield),
                    expected_profit = format!("{:.2}/day", best.expected_profit),
                    projected_total = format!("{:.2}", best.expected_profit * remaining as f64),
                    "Exploration complete"
                );
            }
            None => {
                info!(
                    days_used = report.days_used,
                    candidates_tested = report.candidates_tested,
                    "Exploration complete, no candidate selected"
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::MockForageEnvironment;
    use crate::types::{Candidate, FruitType, SourceKind};
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    // ---- helpers -----------------------------------------------------------

    fn explorer(budget: u32, horizon: u32) -> Explorer {
        Explorer::new(ExplorerConfig {
            budget,
            samples_per_candidate: 5,
            horizon,
        })
    }

    /// Mock whose day counter advances on explore/forage and whose sources
    /// appear in the given order with fixed per-forage yields.
    fn scripted_mock(
        start_day: u32,
        sources: Vec<(SourceKind, Vec<f64>)>,
    ) -> (MockForageEnvironment, Arc<AtomicU32>) {
        let day = Arc::new(AtomicU32::new(start_day));
        let mut mock = MockForageEnvironment::new();

        let d = day.clone();
        mock.expect_what_day_is_it().returning(move || d.load(Ordering::SeqCst));

        let kinds: Vec<SourceKind> = sources.iter().map(|(k, _)| *k).collect();
        let mut next = 0u32;
        let d = day.clone();
        mock.expect_explore().returning(move || {
            d.fetch_add(1, Ordering::SeqCst);
            let id = next;
            next += 1;
            Candidate { id, kind: kinds[id as usize % kinds.len()] }
        });

        let mut yields: Vec<VecDeque<f64>> =
            sources.into_iter().map(|(_, y)| y.into_iter().collect()).collect();
        let d = day.clone();
        mock.expect_forage().returning(move |c: &Candidate| {
            d.fetch_add(1, Ordering::SeqCst);
            yields[c.id as usize].pop_front().unwrap_or(0.0)
        });

        (mock, day)
    }

    // ---- tests -------------------------------------------------------------

    #[test]
    fn test_zero_budget_consumes_nothing() {
        let mut mock = MockForageEnvironment::new();
        mock.expect_what_day_is_it().return_const(0u32);
        mock.expect_explore().never();
        mock.expect_forage().never();

        let report = explorer(0, 5000).find_best_source(&mut mock);
        assert!(report.best.is_none());
        assert_eq!(report.days_used, 0);
        assert_eq!(report.candidates_tested, 0);
    }

    #[test]
    fn test_apple_samples_average() {
        let (mut mock, _) =
            scripted_mock(0, vec![(SourceKind::Tree, vec![2.0, 3.0, 4.0])]);
        let ex = Explorer::new(ExplorerConfig {
            budget: 5,
            samples_per_candidate: 3,
            horizon: 5000,
        });
        let report = ex.find_best_source(&mut mock);
        let best = report.best.unwrap();
        assert_eq!(best.fruit, FruitType::Apples);
        assert_eq!(best.samples, vec![2.0, 3.0, 4.0]);
        assert!((best.avg_yield - 3.0).abs() < 1e-12);
        assert!((best.expected_profit - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_budget_exhausted_right_after_explore() {
        let (mut mock, day) = scripted_mock(0, vec![(SourceKind::Tree, vec![5.0; 5])]);
        let report = explorer(1, 5000).find_best_source(&mut mock);
        assert!(report.best.is_none());
        assert_eq!(report.days_used, 1);
        assert_eq!(day.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_never_exceeds_budget() {
        let sources = (0..50).map(|_| (SourceKind::BerryBush, vec![3.0; 5])).collect();
        let (mut mock, day) = scripted_mock(0, sources);
        for budget in [2, 7, 13, 100] {
            day.store(0, Ordering::SeqCst);
            let report = explorer(budget, 5000).find_best_source(&mut mock);
            assert!(report.days_used <= budget);
            assert_eq!(day.load(Ordering::SeqCst), report.days_used);
        }
    }

    #[test]
    fn test_stops_at_horizon() {
        let sources = (0..10).map(|_| (SourceKind::Tree, vec![1.0; 5])).collect();
        let (mut mock, day) = scripted_mock(4995, sources);
        let report = explorer(200, 5000).find_best_source(&mut mock);
        assert!(day.load(Ordering::SeqCst) <= 5000);
        // explore at 4995, four samples up to day 5000
        assert_eq!(report.days_used, 5);
        assert_eq!(report.best.unwrap().samples.len(), 4);
    }

    #[test]
    fn test_best_by_expected_profit_first_wins_ties() {
        let (mut mock, _) = scripted_mock(
            0,
            vec![
                (SourceKind::Tree, vec![5.0; 5]),      // 10.0/day
                (SourceKind::BerryBush, vec![3.0; 5]), // 8.57/day
                (SourceKind::Tree, vec![5.0; 5]),      // tie with first
            ],
        );
        let report = explorer(18, 5000).find_best_source(&mut mock);
        assert_eq!(report.candidates_tested, 3);
        let best = report.best.unwrap();
        assert_eq!(best.candidate.id, 0);
        assert!((best.expected_profit - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_yield_never_selected() {
        let (mut mock, _) = scripted_mock(0, vec![(SourceKind::Tree, vec![0.0; 5])]);
        let report = explorer(6, 5000).find_best_source(&mut mock);
        assert_eq!(report.candidates_tested, 1);
        assert!(report.best.is_none());
    }
}
