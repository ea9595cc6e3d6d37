use std::collections::BTreeMap;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Decimal;

pub const DATOM_DENOM: &str = "dATOM";
pub const STATOM_DENOM: &str = "stATOM";

/// What happens to the delegators' share of a proposal when no delegator is eligible for it.
#[cw_serde]
#[derive(Copy, Eq, Default)]
pub enum UndistributedPolicy {
    /// Kept aside in the undistributed map and reported.
    #[default]
    Unassigned,
    ReturnToProtocol,
    ReturnToHydromancer,
}

/// Protocol parameters injected into the rewards engine.
#[cw_serde]
pub struct EngineConfig {
    /// Voting power multiplier per vessel token. Vessels locking any other token are rejected.
    #[serde(default = "default_token_multipliers")]
    pub token_multipliers: BTreeMap<String, Decimal>,
    /// Voting power multiplier per minimum lock duration (in rounds).
    #[serde(default = "default_duration_multipliers")]
    pub duration_multipliers: BTreeMap<u64, Decimal>,
    /// Absolute tolerance; the relative tolerance is the same value expressed in percent.
    #[serde(default = "default_tolerance")]
    pub tolerance: Decimal,
    #[serde(default)]
    pub undistributed_policy: UndistributedPolicy,
    /// Decimal exponent of on-chain base units, per denom. Missing denoms use 0.
    #[serde(default)]
    pub denom_exponents: BTreeMap<String, u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            token_multipliers: default_token_multipliers(),
            duration_multipliers: default_duration_multipliers(),
            tolerance: default_tolerance(),
            undistributed_policy: UndistributedPolicy::default(),
            denom_exponents: BTreeMap::new(),
        }
    }
}

fn default_token_multipliers() -> BTreeMap<String, Decimal> {
    BTreeMap::from([
        (DATOM_DENOM.to_string(), Decimal::permille(1300)),
        (STATOM_DENOM.to_string(), Decimal::permille(1600)),
    ])
}

fn default_duration_multipliers() -> BTreeMap<u64, Decimal> {
    BTreeMap::from([
        (1, Decimal::one()),
        (2, Decimal::permille(1250)),
        (3, Decimal::permille(1500)),
    ])
}

fn default_tolerance() -> Decimal {
    Decimal::percent(1)
}
