use std::collections::BTreeMap;

use tracing::info;
use zephyrus_rewards_core::{
    config::EngineConfig,
    reports::VerificationReport,
    scenario::{RoundId, Scenario},
};

use crate::{
    errors::RewardsError,
    helpers::{
        aggregation::aggregate,
        discrepancy::{Discrepancy, DiscrepancyValidator},
        rewards::RoundRewardsCalculator,
        validation::validate_scenario,
    },
    result::RewardsResult,
};

/// Expected rewards of a scenario, round by round and in total.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenarioRewards {
    pub per_round: BTreeMap<RoundId, RewardsResult>,
    pub total: RewardsResult,
}

impl ScenarioRewards {
    pub fn to_report(&self) -> VerificationReport {
        VerificationReport {
            passed: true,
            expected: self.total.to_report(),
            expected_by_round: self
                .per_round
                .iter()
                .map(|(round_id, result)| (*round_id, result.to_report()))
                .collect(),
            actual: None,
            discrepancies: vec![],
        }
    }
}

/// Expected rewards compared with what was observed on chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Verification {
    pub expected: ScenarioRewards,
    pub actual: RewardsResult,
    pub discrepancies: Vec<Discrepancy>,
}

impl Verification {
    pub fn is_success(&self) -> bool {
        self.discrepancies.is_empty()
    }

    pub fn to_report(&self) -> VerificationReport {
        VerificationReport {
            passed: self.is_success(),
            actual: Some(self.actual.rounded().to_report()),
            discrepancies: self
                .discrepancies
                .iter()
                .map(Discrepancy::to_entry)
                .collect(),
            ..self.expected.to_report()
        }
    }
}

pub fn calculate_scenario_rewards(
    scenario: &Scenario,
    config: &EngineConfig,
) -> Result<ScenarioRewards, RewardsError> {
    validate_scenario(scenario, config)?;

    let calculator = RoundRewardsCalculator::new(scenario, config)?;
    let total_rounds = scenario.total_rounds();
    let mut per_round = BTreeMap::new();

    for round_id in 0..total_rounds {
        let round_result = calculator.calculate(round_id)?;
        let round_report = round_result.to_report();
        info!(
            "ZEPH500: ROUND_REWARDS: round_id={}, protocol={:?}, hydromancer={:?}, users={}",
            round_id,
            round_report.protocol_rewards,
            round_report.hydromancer_rewards,
            round_report.user_rewards.len()
        );
        per_round.insert(round_id, round_result);
    }

    let total = aggregate(&per_round);
    info!(
        "ZEPH501: SCENARIO_REWARDS: total_rounds={}, users={}, proposals={}, undistributed={:?}",
        total_rounds,
        scenario.users.len(),
        scenario.proposals.len(),
        total.to_report().undistributed_rewards
    );

    Ok(ScenarioRewards { per_round, total })
}

pub fn verify_scenario(
    scenario: &Scenario,
    config: &EngineConfig,
    actual: RewardsResult,
) -> Result<Verification, RewardsError> {
    let expected = calculate_scenario_rewards(scenario, config)?;
    let validator = DiscrepancyValidator::from_config(config)?;
    let discrepancies = validator.compare(&expected.total, &actual);

    info!(
        "ZEPH502: VERIFICATION: discrepancies={}, passed={}",
        discrepancies.len(),
        discrepancies.is_empty()
    );

    Ok(Verification {
        expected,
        actual,
        discrepancies,
    })
}
