use bigdecimal::{BigDecimal, One};
use zephyrus_rewards_core::scenario::ProtocolConfig;

use crate::{errors::RewardsError, helpers::decimal::bps_to_rate};

/// Hydromancer's part of a tribute once the protocol commission is taken.
#[derive(Debug, Clone, PartialEq)]
pub struct HydromancerSplit {
    pub gross: BigDecimal,
    /// Commission kept by the hydromancer.
    pub net: BigDecimal,
    /// What is left for the users who delegated to the hydromancer.
    pub remainder_for_delegators: BigDecimal,
}

/// Two-tier commission schedule: a flat protocol cut on every tribute,
/// then a hydromancer cut on the share earned by delegated voting power.
#[derive(Debug, Clone, PartialEq)]
pub struct CommissionSplitter {
    protocol_rate: BigDecimal,
    hydromancer_rate: BigDecimal,
}

impl CommissionSplitter {
    pub fn from_bps(protocol_bps: u64, hydromancer_bps: u64) -> Result<Self, RewardsError> {
        Ok(CommissionSplitter {
            protocol_rate: bps_to_rate("protocol", protocol_bps)?,
            hydromancer_rate: bps_to_rate("hydromancer", hydromancer_bps)?,
        })
    }

    pub fn from_protocol_config(config: &ProtocolConfig) -> Result<Self, RewardsError> {
        Self::from_bps(
            config.protocol_commission_bps,
            config.hydromancer_commission_bps,
        )
    }

    pub fn protocol_cut(&self, tribute: &BigDecimal) -> BigDecimal {
        tribute * &self.protocol_rate
    }

    pub fn after_protocol(&self, tribute: &BigDecimal) -> BigDecimal {
        tribute * (BigDecimal::one() - &self.protocol_rate)
    }

    /// Reward of a vessel that voted directly and holds `share` of the proposal's voting power.
    pub fn direct_reward(&self, tribute: &BigDecimal, share: &BigDecimal) -> BigDecimal {
        self.after_protocol(tribute) * share
    }

    pub fn hydromancer_split(&self, tribute: &BigDecimal, share: &BigDecimal) -> HydromancerSplit {
        let gross = self.after_protocol(tribute) * share;
        let net = &gross * &self.hydromancer_rate;
        let remainder_for_delegators = &gross * (BigDecimal::one() - &self.hydromancer_rate);

        HydromancerSplit {
            gross,
            net,
            remainder_for_delegators,
        }
    }
}
