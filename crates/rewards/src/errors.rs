use thiserror::Error;
use zephyrus_rewards_core::scenario::{ProposalId, RoundId, VesselId};

#[derive(Error, Debug, PartialEq)]
pub enum RewardsError {
    #[error("Invalid vessel token {denom} on vessel {vessel_id}: no token multiplier configured")]
    InvalidVesselDenom { vessel_id: VesselId, denom: String },

    #[error("Invalid amount for {field}: {value}")]
    InvalidAmount { field: String, value: String },

    #[error("Invalid {field} commission: {bps} bps is above 10000")]
    InvalidCommission { field: String, bps: u64 },

    #[error("Duplicate user id {user_id}")]
    DuplicateUserId { user_id: String },

    #[error("Duplicate vessel id {vessel_id}")]
    DuplicateVesselId { vessel_id: VesselId },

    #[error("Duplicate proposal id {proposal_id}")]
    DuplicateProposalId { proposal_id: ProposalId },

    #[error("Rounds of vessel {vessel_id} are not strictly ascending at round {round_id}")]
    UnsortedVesselRounds {
        vessel_id: VesselId,
        round_id: RoundId,
    },

    #[error("Proposal {proposal_id} voted by vessel {vessel_id} not found")]
    ProposalNotFound {
        proposal_id: ProposalId,
        vessel_id: VesselId,
    },

    #[error("Vessel {vessel_id} voted in round {round_id} for proposal {proposal_id} of round {proposal_round_id}")]
    ProposalRoundMismatch {
        vessel_id: VesselId,
        proposal_id: ProposalId,
        round_id: RoundId,
        proposal_round_id: RoundId,
    },

    #[error("Proposal {proposal_id} received votes in round {round_id} but its total voting power is zero")]
    ZeroProposalVotingPower {
        proposal_id: ProposalId,
        round_id: RoundId,
    },

    #[error("Cannot read {path}: {msg}")]
    Io { path: String, msg: String },

    #[error("Cannot parse {path}: {msg}")]
    Json { path: String, msg: String },

    #[error("{msg}")]
    CustomError { msg: String },
}
