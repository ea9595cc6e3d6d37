use std::collections::{BTreeMap, BTreeSet};

use bigdecimal::Zero;
use cosmwasm_std::{Coin, Uint128};
use zephyrus_rewards_core::{
    config::EngineConfig,
    reports::ObservedBalances,
};

use crate::{
    errors::RewardsError,
    helpers::decimal::{from_uint128, scale_down},
    result::{DenomRewards, RewardsResult},
};

// Balances may list the same denom more than once, sum them up
pub fn consolidate_coins(coins: &[Coin]) -> BTreeMap<String, Uint128> {
    let mut consolidated: BTreeMap<String, Uint128> = BTreeMap::new();
    for coin in coins {
        let total = consolidated.entry(coin.denom.clone()).or_default();
        *total = total.saturating_add(coin.amount);
    }
    consolidated
}

/// Signed per-denom change between two balances, in display units. Unchanged denoms are omitted.
pub fn balance_deltas(
    before: &[Coin],
    after: &[Coin],
    denom_exponents: &BTreeMap<String, u32>,
) -> Result<DenomRewards, RewardsError> {
    let before = consolidate_coins(before);
    let after = consolidate_coins(after);
    let denoms: BTreeSet<&String> = before.keys().chain(after.keys()).collect();

    let mut deltas = DenomRewards::new();
    for denom in denoms {
        let amount_before = from_uint128(denom, before.get(denom).copied().unwrap_or_default())?;
        let amount_after = from_uint128(denom, after.get(denom).copied().unwrap_or_default())?;
        let delta = amount_after - amount_before;
        if delta.is_zero() {
            continue;
        }
        let exponent = denom_exponents.get(denom).copied().unwrap_or_default();
        deltas.insert(denom.clone(), scale_down(delta, exponent));
    }
    Ok(deltas)
}

/// Rewards actually received by every participant, from balances captured around execution.
pub fn observed_rewards(
    balances: &ObservedBalances,
    config: &EngineConfig,
) -> Result<RewardsResult, RewardsError> {
    let ObservedBalances { before, after } = balances;
    let exponents = &config.denom_exponents;

    let user_ids: BTreeSet<&String> = before.users.keys().chain(after.users.keys()).collect();
    let mut user_rewards = BTreeMap::new();
    for user_id in user_ids {
        let user_before = before.users.get(user_id).map_or(&[][..], Vec::as_slice);
        let user_after = after.users.get(user_id).map_or(&[][..], Vec::as_slice);
        let deltas = balance_deltas(user_before, user_after, exponents)?;
        if !deltas.is_empty() {
            user_rewards.insert(user_id.clone(), deltas);
        }
    }

    Ok(RewardsResult {
        protocol_rewards: balance_deltas(&before.protocol, &after.protocol, exponents)?,
        hydromancer_rewards: balance_deltas(&before.hydromancer, &after.hydromancer, exponents)?,
        user_rewards,
        undistributed_rewards: DenomRewards::new(),
    })
}
