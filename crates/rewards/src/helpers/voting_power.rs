use std::collections::BTreeMap;

use bigdecimal::{BigDecimal, One, Zero};
use tracing::debug;
use zephyrus_rewards_core::{
    config::EngineConfig,
    scenario::{RoundId, Vessel},
};

use crate::{
    errors::RewardsError,
    helpers::decimal::{from_decimal, parse_amount},
};

/// Turns a locked position into voting power: amount x token multiplier x duration multiplier.
#[derive(Debug, Clone)]
pub struct VotingPowerModel {
    token_multipliers: BTreeMap<String, BigDecimal>,
    duration_multipliers: BTreeMap<u64, BigDecimal>,
}

impl VotingPowerModel {
    pub fn new(config: &EngineConfig) -> Result<Self, RewardsError> {
        let token_multipliers = config
            .token_multipliers
            .iter()
            .map(|(denom, multiplier)| {
                Ok((denom.clone(), from_decimal("token_multiplier", *multiplier)?))
            })
            .collect::<Result<_, RewardsError>>()?;
        let duration_multipliers = config
            .duration_multipliers
            .iter()
            .map(|(threshold, multiplier)| {
                Ok((*threshold, from_decimal("duration_multiplier", *multiplier)?))
            })
            .collect::<Result<_, RewardsError>>()?;

        Ok(VotingPowerModel {
            token_multipliers,
            duration_multipliers,
        })
    }

    /// Remaining lock duration of the vessel at `round_id`.
    /// Every elapsed round after round 0 decays it by one, a refresh resets it to the original duration.
    pub fn effective_lock_duration(vessel: &Vessel, round_id: RoundId) -> i64 {
        let original = i64::try_from(vessel.lock_duration_rounds).unwrap_or(i64::MAX);
        vessel
            .rounds
            .iter()
            .take_while(|entry| entry.round_id <= round_id)
            .fold(original, |duration, entry| {
                if entry.refresh {
                    original
                } else if entry.round_id == 0 {
                    duration
                } else {
                    duration - 1
                }
            })
    }

    pub fn token_multiplier(&self, vessel: &Vessel) -> Result<&BigDecimal, RewardsError> {
        self.token_multipliers
            .get(&vessel.locked_denom)
            .ok_or_else(|| RewardsError::InvalidVesselDenom {
                vessel_id: vessel.id,
                denom: vessel.locked_denom.clone(),
            })
    }

    /// Multiplier of the largest threshold not above `duration`, 1 when none qualifies.
    pub fn duration_multiplier(&self, duration: u64) -> BigDecimal {
        self.duration_multipliers
            .range(..=duration)
            .next_back()
            .map(|(_, multiplier)| multiplier.clone())
            .unwrap_or_else(BigDecimal::one)
    }

    pub fn power(&self, round_id: RoundId, vessel: &Vessel) -> Result<BigDecimal, RewardsError> {
        let duration = Self::effective_lock_duration(vessel, round_id);
        if duration <= 0 {
            debug!(
                "ZEPH201: VESSEL_EXPIRED: vessel_id={}, round_id={}, effective_duration={}",
                vessel.id, round_id, duration
            );
            return Ok(BigDecimal::zero());
        }

        let token_multiplier = self.token_multiplier(vessel)?;
        let duration_multiplier = self.duration_multiplier(duration.unsigned_abs());
        let locked_amount = parse_amount("locked_amount", &vessel.locked_amount)?;
        let voting_power = locked_amount * token_multiplier * &duration_multiplier;

        debug!(
            "ZEPH202: VESSEL_POWER: vessel_id={}, round_id={}, effective_duration={}, token_multiplier={}, duration_multiplier={}, voting_power={}",
            vessel.id, round_id, duration, token_multiplier, duration_multiplier, voting_power
        );

        Ok(voting_power)
    }
}
