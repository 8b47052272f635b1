//! FORAGER — explore-then-exploit foraging strategy
//!
//! Entry point. Loads configuration, initialises structured logging, builds
//! the seeded forest and runs the exploration and exploitation phases.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use forager::config::AppConfig;
use forager::environment::simulated::SimulatedForest;
use forager::environment::ForageEnvironment;
use forager::strategy::ForageStrategy;
use forager::types::{ForagerError, RunSummary};

const BANNER: &str = r#"
 _____ ___  ____      _    ____ _____ ____
|  ___/ _ \|  _ \    / \  / ___| ____|  _ \
| |_ | | | | |_) |  / _ \| |  _|  _| | |_) |
|  _|| |_| |  _ <  / ___ \ |_| | |___|  _ <
|_|   \___/|_| \_\/_/   \_\____|_____|_| \_\

  Explore, commit, harvest, sell on the right day
  v0.1.0
"#;

#[derive(Parser, Debug)]
#[command(name = "forager")]
#[command(about = "Run the explore-then-exploit foraging strategy")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Override the simulation seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Override the exploration budget, in days.
    #[arg(long)]
    budget: Option<u32>,

    /// Override the horizon, in days.
    #[arg(long)]
    horizon: Option<u32>,
}

fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let cli = Cli::parse();
    let cfg = load_config(&cli)?;

    init_logging();

    println!("{BANNER}");
    info!(
        name = %cfg.run.name,
        horizon = cfg.run.horizon_days,
        exploration_budget = cfg.run.exploration_budget,
        seed = cfg.simulation.seed,
        "FORAGER starting up"
    );

    let mut forest = SimulatedForest::new(cfg.simulation.clone(), cfg.run.horizon_days);
    forest.reset_days(cfg.run.horizon_days);
    info!(day = forest.what_day_is_it(), limit = forest.day_limit(), "Forest ready");

    let strategy = ForageStrategy::from_config(&cfg.run);
    match strategy.run(&mut forest) {
        Ok(summary) => {
            info!(spoiled = format!("{:.2} kg", forest.spoiled_mass()), "Spoilage");
            print_summary(&summary, &cfg.run.currency);
        }
        Err(e @ ForagerError::NoViableSource { .. }) => {
            error!(error = %e, "ERROR: No viable source found!");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

/// Load the config file and apply CLI overrides.
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut cfg = AppConfig::load_or_default(&cli.config)?;
    if let Some(seed) = cli.seed {
        cfg.simulation.seed = seed;
    }
    if let Some(budget) = cli.budget {
        cfg.run.exploration_budget = budget;
    }
    if let Some(horizon) = cli.horizon {
        cfg.run.horizon_days = horizon;
    }
    cfg.validate().context("Invalid configuration after CLI overrides")?;
    Ok(cfg)
}

/// Human-readable final report, plus one structured event for log scrapers.
fn print_summary(summary: &RunSummary, currency: &str) {
    let rule = "=".repeat(50);
    println!();
    println!("=== FINAL RESULTS ===");
    println!("Total earned: {currency}{:.2}", summary.total_earnings);
    println!("Total foraged: {:.2} kg", summary.total_foraged);
    println!("Total sold: {:.2} kg", summary.total_sold);
    println!("Sell reasons: {}", summary.sell_counts);
    println!("Average profit per day: {currency}{:.2}", summary.average_daily_profit);
    println!();
    println!("{rule}");
    println!("FINAL PROFIT: {currency}{:.2}", summary.total_earnings);
    println!("TARGET: {currency}{:.2}", summary.target_earnings);
    println!("SUCCESS: {}", if summary.target_met() { "YES" } else { "NO" });
    println!("{rule}");

    match serde_json::to_string(summary) {
        Ok(json) => info!(summary = %json, "Run summary"),
        Err(e) => error!(error = %e, "Failed to serialise run summary"),
    }
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("forager=info"));

    let json_logging = std::env::var("FORAGER_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
