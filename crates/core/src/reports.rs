use std::collections::BTreeMap;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Coin;

use crate::scenario::UserId;

/// Rewards per denom, amounts formatted with two fractional digits.
pub type DenomAmounts = BTreeMap<String, String>;

#[cw_serde]
#[derive(Default)]
pub struct RewardsReport {
    pub protocol_rewards: DenomAmounts,
    pub hydromancer_rewards: DenomAmounts,
    pub user_rewards: BTreeMap<UserId, DenomAmounts>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub undistributed_rewards: DenomAmounts,
}

#[cw_serde]
#[derive(Copy, Eq)]
pub enum DiscrepancyKind {
    Protocol,
    Hydromancer,
    User,
}

#[cw_serde]
pub struct DiscrepancyEntry {
    pub kind: DiscrepancyKind,
    pub entity_id: Option<String>,
    pub token: String,
    pub expected: String,
    pub actual: String,
    pub difference: String,
    pub percentage: String,
}

#[cw_serde]
pub struct VerificationReport {
    pub passed: bool,
    pub expected: RewardsReport,
    pub expected_by_round: BTreeMap<u64, RewardsReport>,
    pub actual: Option<RewardsReport>,
    pub discrepancies: Vec<DiscrepancyEntry>,
}

/// Wallet balances of every participant at one point in time.
#[cw_serde]
#[derive(Default)]
pub struct BalanceSnapshot {
    pub protocol: Vec<Coin>,
    pub hydromancer: Vec<Coin>,
    pub users: BTreeMap<UserId, Vec<Coin>>,
}

/// Balances captured around the on-chain execution of a scenario.
#[cw_serde]
pub struct ObservedBalances {
    pub before: BalanceSnapshot,
    pub after: BalanceSnapshot,
}
