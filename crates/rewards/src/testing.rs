use std::str::FromStr;

use bigdecimal::BigDecimal;
use zephyrus_rewards_core::scenario::{
    ControlledBy, Proposal, ProposalId, ProtocolConfig, RoundId, Scenario, Tribute, User, Vessel,
    VesselId, VesselRound,
};

pub fn dec(value: &str) -> BigDecimal {
    BigDecimal::from_str(value).unwrap()
}

pub fn vessel_round(
    round_id: RoundId,
    controlled_by: ControlledBy,
    voted_proposal_id: Option<ProposalId>,
    refresh: bool,
) -> VesselRound {
    VesselRound {
        round_id,
        controlled_by,
        voted_proposal_id,
        refresh,
    }
}

pub fn vessel(
    id: VesselId,
    lock_duration_rounds: u64,
    locked_denom: &str,
    locked_amount: &str,
    rounds: Vec<VesselRound>,
) -> Vessel {
    Vessel {
        id,
        lock_duration_rounds,
        locked_denom: locked_denom.to_string(),
        locked_amount: locked_amount.to_string(),
        rounds,
    }
}

pub fn user(user_id: &str, vessels: Vec<Vessel>) -> User {
    User {
        user_id: user_id.to_string(),
        address: Some(format!("neutron1{}", user_id.to_lowercase())),
        vessels,
    }
}

pub fn tribute(denom: &str, amount: &str) -> Tribute {
    Tribute {
        id: None,
        denom: denom.to_string(),
        amount: amount.to_string(),
    }
}

pub fn proposal(
    id: ProposalId,
    round_id: RoundId,
    bid_duration_months: u64,
    tributes: Vec<Tribute>,
) -> Proposal {
    Proposal {
        id,
        round_id,
        bid_duration_months,
        tributes,
    }
}

pub fn scenario(
    protocol_commission_bps: u64,
    hydromancer_commission_bps: u64,
    users: Vec<User>,
    proposals: Vec<Proposal>,
) -> Scenario {
    Scenario {
        protocol_config: ProtocolConfig {
            protocol_commission_bps,
            hydromancer_commission_bps,
            round_length: 60_000_000_000,
            total_rounds: None,
        },
        users,
        proposals,
    }
}

/// One proposal with a 1000 untrn tribute and a single delegated 100 stATOM vessel voting for it.
pub fn single_delegated_vessel_scenario(lock_duration_rounds: u64) -> Scenario {
    scenario(
        1000,
        500,
        vec![user(
            "A",
            vec![vessel(
                1,
                lock_duration_rounds,
                "stATOM",
                "100",
                vec![vessel_round(0, ControlledBy::Hydromancer, Some(1), false)],
            )],
        )],
        vec![proposal(1, 0, 1, vec![tribute("untrn", "1000")])],
    )
}
