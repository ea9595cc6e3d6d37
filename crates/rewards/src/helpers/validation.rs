use std::collections::HashSet;

use zephyrus_rewards_core::{
    config::EngineConfig,
    scenario::{ProtocolConfig, Scenario, Vessel},
};

use crate::{
    errors::RewardsError,
    helpers::decimal::{bps_to_rate, parse_amount},
};

/// Validate a whole scenario before any reward is computed
pub fn validate_scenario(scenario: &Scenario, config: &EngineConfig) -> Result<(), RewardsError> {
    validate_commissions(&scenario.protocol_config)?;
    validate_unique_ids(scenario)?;

    for vessel in scenario.users.iter().flat_map(|user| user.vessels.iter()) {
        validate_vessel(vessel, config)?;
        validate_vessel_votes(vessel, scenario)?;
    }

    for proposal in &scenario.proposals {
        for tribute in &proposal.tributes {
            parse_amount("tribute", &tribute.amount)?;
        }
    }

    Ok(())
}

/// Validate that both commissions are expressed within 0..=10000 bps
pub fn validate_commissions(protocol_config: &ProtocolConfig) -> Result<(), RewardsError> {
    bps_to_rate("protocol", protocol_config.protocol_commission_bps)?;
    bps_to_rate("hydromancer", protocol_config.hydromancer_commission_bps)?;
    Ok(())
}

/// Validate there is no duplicate user, vessel or proposal id
pub fn validate_unique_ids(scenario: &Scenario) -> Result<(), RewardsError> {
    let mut seen_users = HashSet::new();
    let mut seen_vessels = HashSet::new();
    let mut seen_proposals = HashSet::new();

    for user in &scenario.users {
        if !seen_users.insert(user.user_id.as_str()) {
            return Err(RewardsError::DuplicateUserId {
                user_id: user.user_id.clone(),
            });
        }
        for vessel in &user.vessels {
            if !seen_vessels.insert(vessel.id) {
                return Err(RewardsError::DuplicateVesselId {
                    vessel_id: vessel.id,
                });
            }
        }
    }

    for proposal in &scenario.proposals {
        if !seen_proposals.insert(proposal.id) {
            return Err(RewardsError::DuplicateProposalId {
                proposal_id: proposal.id,
            });
        }
    }

    Ok(())
}

/// Validate the vessel's token, amount and round history ordering
pub fn validate_vessel(vessel: &Vessel, config: &EngineConfig) -> Result<(), RewardsError> {
    if !config.token_multipliers.contains_key(&vessel.locked_denom) {
        return Err(RewardsError::InvalidVesselDenom {
            vessel_id: vessel.id,
            denom: vessel.locked_denom.clone(),
        });
    }

    parse_amount("locked_amount", &vessel.locked_amount)?;

    for pair in vessel.rounds.windows(2) {
        if pair[1].round_id <= pair[0].round_id {
            return Err(RewardsError::UnsortedVesselRounds {
                vessel_id: vessel.id,
                round_id: pair[1].round_id,
            });
        }
    }

    Ok(())
}

/// Validate that every vote targets an existing proposal of the round it was cast in
pub fn validate_vessel_votes(vessel: &Vessel, scenario: &Scenario) -> Result<(), RewardsError> {
    for entry in &vessel.rounds {
        let Some(proposal_id) = entry.voted_proposal_id else {
            continue;
        };
        let proposal = scenario
            .proposal(proposal_id)
            .ok_or(RewardsError::ProposalNotFound {
                proposal_id,
                vessel_id: vessel.id,
            })?;
        if proposal.round_id != entry.round_id {
            return Err(RewardsError::ProposalRoundMismatch {
                vessel_id: vessel.id,
                proposal_id,
                round_id: entry.round_id,
                proposal_round_id: proposal.round_id,
            });
        }
    }
    Ok(())
}
