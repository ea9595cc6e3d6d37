use std::collections::BTreeMap;

use bigdecimal::BigDecimal;
use zephyrus_rewards_core::{
    reports::{DenomAmounts, RewardsReport},
    scenario::UserId,
};

use crate::{
    errors::RewardsError,
    helpers::decimal::{format_amount, parse_decimal, round_to_boundary},
};

pub type DenomRewards = BTreeMap<String, BigDecimal>;

/// Rewards owed to every participant, per denom.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RewardsResult {
    pub protocol_rewards: DenomRewards,
    pub hydromancer_rewards: DenomRewards,
    pub user_rewards: BTreeMap<UserId, DenomRewards>,
    /// Delegators' shares nobody was eligible for, kept aside when the policy leaves them unassigned.
    pub undistributed_rewards: DenomRewards,
}

fn credit(rewards: &mut DenomRewards, denom: &str, amount: &BigDecimal) {
    match rewards.get_mut(denom) {
        Some(total) => *total += amount,
        None => {
            rewards.insert(denom.to_string(), amount.clone());
        }
    }
}

fn merge_denoms(into: &mut DenomRewards, from: &DenomRewards) {
    for (denom, amount) in from {
        credit(into, denom, amount);
    }
}

fn round_denoms(rewards: &DenomRewards) -> DenomRewards {
    rewards
        .iter()
        .map(|(denom, amount)| (denom.clone(), round_to_boundary(amount)))
        .collect()
}

fn format_denoms(rewards: &DenomRewards) -> DenomAmounts {
    rewards
        .iter()
        .map(|(denom, amount)| (denom.clone(), format_amount(amount)))
        .collect()
}

fn parse_denoms(field: &str, amounts: &DenomAmounts) -> Result<DenomRewards, RewardsError> {
    amounts
        .iter()
        .map(|(denom, amount)| {
            Ok((
                denom.clone(),
                parse_decimal(&format!("{field}.{denom}"), amount)?,
            ))
        })
        .collect()
}

impl RewardsResult {
    pub fn add_protocol(&mut self, denom: &str, amount: &BigDecimal) {
        credit(&mut self.protocol_rewards, denom, amount);
    }

    pub fn add_hydromancer(&mut self, denom: &str, amount: &BigDecimal) {
        credit(&mut self.hydromancer_rewards, denom, amount);
    }

    pub fn add_user(&mut self, user_id: &str, denom: &str, amount: &BigDecimal) {
        let rewards = self.user_rewards.entry(user_id.to_string()).or_default();
        credit(rewards, denom, amount);
    }

    pub fn add_undistributed(&mut self, denom: &str, amount: &BigDecimal) {
        credit(&mut self.undistributed_rewards, denom, amount);
    }

    /// Adds every amount of `other` key-wise; missing keys count as zero.
    pub fn merge(&mut self, other: &RewardsResult) {
        merge_denoms(&mut self.protocol_rewards, &other.protocol_rewards);
        merge_denoms(&mut self.hydromancer_rewards, &other.hydromancer_rewards);
        for (user_id, rewards) in &other.user_rewards {
            merge_denoms(self.user_rewards.entry(user_id.clone()).or_default(), rewards);
        }
        merge_denoms(
            &mut self.undistributed_rewards,
            &other.undistributed_rewards,
        );
    }

    /// Same result with every amount rounded half-up to two fractional digits.
    pub fn rounded(&self) -> RewardsResult {
        RewardsResult {
            protocol_rewards: round_denoms(&self.protocol_rewards),
            hydromancer_rewards: round_denoms(&self.hydromancer_rewards),
            user_rewards: self
                .user_rewards
                .iter()
                .map(|(user_id, rewards)| (user_id.clone(), round_denoms(rewards)))
                .collect(),
            undistributed_rewards: round_denoms(&self.undistributed_rewards),
        }
    }

    /// Sum of every amount credited in `denom`, whoever received it.
    pub fn total_for_denom(&self, denom: &str) -> BigDecimal {
        let maps = [
            &self.protocol_rewards,
            &self.hydromancer_rewards,
            &self.undistributed_rewards,
        ];
        maps.into_iter()
            .chain(self.user_rewards.values())
            .filter_map(|rewards| rewards.get(denom))
            .sum()
    }

    pub fn to_report(&self) -> RewardsReport {
        RewardsReport {
            protocol_rewards: format_denoms(&self.protocol_rewards),
            hydromancer_rewards: format_denoms(&self.hydromancer_rewards),
            user_rewards: self
                .user_rewards
                .iter()
                .map(|(user_id, rewards)| (user_id.clone(), format_denoms(rewards)))
                .collect(),
            undistributed_rewards: format_denoms(&self.undistributed_rewards),
        }
    }

    pub fn from_report(report: &RewardsReport) -> Result<RewardsResult, RewardsError> {
        Ok(RewardsResult {
            protocol_rewards: parse_denoms("protocol_rewards", &report.protocol_rewards)?,
            hydromancer_rewards: parse_denoms("hydromancer_rewards", &report.hydromancer_rewards)?,
            user_rewards: report
                .user_rewards
                .iter()
                .map(|(user_id, amounts)| {
                    Ok((
                        user_id.clone(),
                        parse_denoms(&format!("user_rewards.{user_id}"), amounts)?,
                    ))
                })
                .collect::<Result<_, RewardsError>>()?,
            undistributed_rewards: parse_denoms(
                "undistributed_rewards",
                &report.undistributed_rewards,
            )?,
        })
    }
}
