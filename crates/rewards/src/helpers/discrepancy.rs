use std::collections::{BTreeMap, BTreeSet};

use bigdecimal::{BigDecimal, Zero};
use tracing::warn;
use zephyrus_rewards_core::{
    config::EngineConfig,
    reports::{DiscrepancyEntry, DiscrepancyKind},
};

use crate::{
    errors::RewardsError,
    helpers::decimal::{format_amount, from_decimal},
    result::{DenomRewards, RewardsResult},
};

/// An expected reward the observed balances do not match.
#[derive(Debug, Clone, PartialEq)]
pub struct Discrepancy {
    pub kind: DiscrepancyKind,
    pub entity_id: Option<String>,
    pub token: String,
    pub expected: BigDecimal,
    pub actual: BigDecimal,
    pub difference: BigDecimal,
    pub percentage: BigDecimal,
}

impl Discrepancy {
    pub fn to_entry(&self) -> DiscrepancyEntry {
        DiscrepancyEntry {
            kind: self.kind,
            entity_id: self.entity_id.clone(),
            token: self.token.clone(),
            expected: format_amount(&self.expected),
            actual: format_amount(&self.actual),
            difference: format_amount(&self.difference),
            percentage: format_amount(&self.percentage),
        }
    }
}

/// Compares expected and observed rewards. A difference is only reported when it is above the
/// tolerance both in absolute value and in percent of the expected amount.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscrepancyValidator {
    tolerance: BigDecimal,
    percentage_tolerance: BigDecimal,
}

impl Default for DiscrepancyValidator {
    fn default() -> Self {
        DiscrepancyValidator::new(BigDecimal::from(1u64) / BigDecimal::from(100u64))
    }
}

impl DiscrepancyValidator {
    pub fn new(tolerance: BigDecimal) -> Self {
        let percentage_tolerance = &tolerance * BigDecimal::from(100u64);
        DiscrepancyValidator {
            tolerance,
            percentage_tolerance,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self, RewardsError> {
        Ok(Self::new(from_decimal("tolerance", config.tolerance)?))
    }

    pub fn compare(&self, expected: &RewardsResult, actual: &RewardsResult) -> Vec<Discrepancy> {
        let mut discrepancies = vec![];

        self.compare_denoms(
            DiscrepancyKind::Protocol,
            None,
            &expected.protocol_rewards,
            &actual.protocol_rewards,
            &mut discrepancies,
        );
        self.compare_denoms(
            DiscrepancyKind::Hydromancer,
            None,
            &expected.hydromancer_rewards,
            &actual.hydromancer_rewards,
            &mut discrepancies,
        );

        let no_rewards = DenomRewards::new();
        let user_ids: BTreeSet<&String> = expected
            .user_rewards
            .keys()
            .chain(actual.user_rewards.keys())
            .collect();
        for user_id in user_ids {
            self.compare_denoms(
                DiscrepancyKind::User,
                Some(user_id),
                expected.user_rewards.get(user_id).unwrap_or(&no_rewards),
                actual.user_rewards.get(user_id).unwrap_or(&no_rewards),
                &mut discrepancies,
            );
        }

        discrepancies
    }

    fn compare_denoms(
        &self,
        kind: DiscrepancyKind,
        entity_id: Option<&str>,
        expected: &BTreeMap<String, BigDecimal>,
        actual: &BTreeMap<String, BigDecimal>,
        discrepancies: &mut Vec<Discrepancy>,
    ) {
        let zero = BigDecimal::zero();
        let tokens: BTreeSet<&String> = expected.keys().chain(actual.keys()).collect();

        for token in tokens {
            let expected_amount = expected.get(token).unwrap_or(&zero);
            let actual_amount = actual.get(token).unwrap_or(&zero);
            let difference = (expected_amount - actual_amount).abs();
            let percentage = if expected_amount.is_zero() {
                BigDecimal::zero()
            } else {
                &difference / expected_amount * BigDecimal::from(100u64)
            };

            if difference > self.tolerance && percentage > self.percentage_tolerance {
                warn!(
                    "ZEPH400: REWARD_DISCREPANCY: kind={:?}, entity_id={:?}, token={}, expected={}, actual={}, difference={}, percentage={}",
                    kind, entity_id, token, expected_amount, actual_amount, difference, percentage
                );
                discrepancies.push(Discrepancy {
                    kind,
                    entity_id: entity_id.map(str::to_string),
                    token: token.clone(),
                    expected: expected_amount.clone(),
                    actual: actual_amount.clone(),
                    difference,
                    percentage,
                });
            }
        }
    }
}
