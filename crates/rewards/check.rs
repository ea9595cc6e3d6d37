//! Computes the rewards a scenario should distribute and, when given what was actually
//! distributed, checks it against them.
//!
//! Exits with status 1 when a discrepancy is found.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use zephyrus_rewards::{
    engine::{calculate_scenario_rewards, verify_scenario},
    helpers::vectors::observed_rewards,
    loader::{load_config, load_observed_balances, load_rewards_report, load_scenario},
    result::RewardsResult,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Compute and verify Zephyrus tribute rewards", long_about = None)]
struct Args {
    /// Path to the scenario JSON file
    scenario: PathBuf,

    /// Engine config JSON file, defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rewards report of what was actually distributed
    #[arg(long, conflicts_with = "balances")]
    actual: Option<PathBuf>,

    /// Balances captured before and after execution
    #[arg(long)]
    balances: Option<PathBuf>,

    /// Write the verification report here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("zephyrus_rewards=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let scenario = load_scenario(&args.scenario)?;
    let config = load_config(args.config.as_deref())?;

    info!(
        "Checking {} with {} users and {} proposals",
        args.scenario.display(),
        scenario.users.len(),
        scenario.proposals.len()
    );

    let actual = match (&args.actual, &args.balances) {
        (Some(path), _) => Some(RewardsResult::from_report(&load_rewards_report(path)?)?),
        (_, Some(path)) => Some(observed_rewards(&load_observed_balances(path)?, &config)?),
        _ => None,
    };

    let report = match actual {
        Some(actual) => verify_scenario(&scenario, &config, actual)?.to_report(),
        None => calculate_scenario_rewards(&scenario, &config)?.to_report(),
    };

    let json = serde_json::to_string_pretty(&report)?;
    match &args.output {
        Some(path) => std::fs::write(path, &json)
            .with_context(|| format!("cannot write {}", path.display()))?,
        None => println!("{json}"),
    }

    if !report.passed {
        error!("{} reward discrepancies found", report.discrepancies.len());
        std::process::exit(1);
    }

    Ok(())
}
