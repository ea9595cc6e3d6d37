use cosmwasm_schema::cw_serde;

pub type UserId = String;
pub type VesselId = u64;
pub type ProposalId = u64;
pub type RoundId = u64;
pub type TributeId = u64;

/// Who steers a vessel's vote during a given round.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum ControlledBy {
    User,
    Hydromancer,
}

#[cw_serde]
pub struct ProtocolConfig {
    pub protocol_commission_bps: u64,
    pub hydromancer_commission_bps: u64,
    /// Round length in nanoseconds, only informative for the engine.
    #[serde(default)]
    pub round_length: u64,
    pub total_rounds: Option<u64>,
}

/// State of a vessel during one round.
#[cw_serde]
pub struct VesselRound {
    pub round_id: RoundId,
    pub controlled_by: ControlledBy,
    pub voted_proposal_id: Option<ProposalId>,
    /// The owner reset the lock to its original duration this round.
    pub refresh: bool,
}

#[cw_serde]
pub struct Vessel {
    pub id: VesselId,
    pub lock_duration_rounds: u64,
    pub locked_denom: String,
    pub locked_amount: String,
    /// Sorted by round_id, at most one entry per round.
    pub rounds: Vec<VesselRound>,
}

impl Vessel {
    pub fn round(&self, round_id: RoundId) -> Option<&VesselRound> {
        self.rounds
            .binary_search_by_key(&round_id, |entry| entry.round_id)
            .ok()
            .map(|index| &self.rounds[index])
    }

    pub fn is_under_hydromancer_control(&self, round_id: RoundId) -> bool {
        self.round(round_id)
            .is_some_and(|entry| entry.controlled_by == ControlledBy::Hydromancer)
    }
}

#[cw_serde]
pub struct User {
    pub user_id: UserId,
    pub address: Option<String>,
    pub vessels: Vec<Vessel>,
}

#[cw_serde]
pub struct Tribute {
    pub id: Option<TributeId>,
    pub denom: String,
    pub amount: String,
}

#[cw_serde]
pub struct Proposal {
    pub id: ProposalId,
    pub round_id: RoundId,
    /// Minimum lock duration (in rounds) a delegated vessel needs to share this proposal's rewards.
    pub bid_duration_months: u64,
    pub tributes: Vec<Tribute>,
}

#[cw_serde]
pub struct Scenario {
    pub protocol_config: ProtocolConfig,
    pub users: Vec<User>,
    pub proposals: Vec<Proposal>,
}

impl Scenario {
    /// Explicit round count, or one past the highest round referenced anywhere in the scenario.
    pub fn total_rounds(&self) -> u64 {
        if let Some(total_rounds) = self.protocol_config.total_rounds {
            return total_rounds;
        }

        let vessel_rounds = self
            .users
            .iter()
            .flat_map(|user| user.vessels.iter())
            .flat_map(|vessel| vessel.rounds.iter())
            .map(|entry| entry.round_id);
        let proposal_rounds = self.proposals.iter().map(|proposal| proposal.round_id);

        vessel_rounds
            .chain(proposal_rounds)
            .max()
            .map_or(0, |max_round_id| max_round_id + 1)
    }

    pub fn proposal(&self, proposal_id: ProposalId) -> Option<&Proposal> {
        self.proposals
            .iter()
            .find(|proposal| proposal.id == proposal_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vessel_with_rounds(round_ids: &[RoundId]) -> Vessel {
        Vessel {
            id: 7,
            lock_duration_rounds: 2,
            locked_denom: "dATOM".to_string(),
            locked_amount: "100".to_string(),
            rounds: round_ids
                .iter()
                .map(|round_id| VesselRound {
                    round_id: *round_id,
                    controlled_by: if round_id % 2 == 0 {
                        ControlledBy::Hydromancer
                    } else {
                        ControlledBy::User
                    },
                    voted_proposal_id: None,
                    refresh: false,
                })
                .collect(),
        }
    }

    #[test]
    fn scenario_deserializes_generator_document() {
        let json = r#"{
            "protocol_config": {
                "round_length": 60000000000,
                "protocol_commission_bps": 1000,
                "hydromancer_commission_bps": 500,
                "total_rounds": 2
            },
            "users": [
                {
                    "user_id": "0",
                    "vessels": [
                        {
                            "id": 0,
                            "lock_duration_rounds": 3,
                            "locked_denom": "stATOM",
                            "locked_amount": "512",
                            "rounds": [
                                {"round_id": 0, "controlled_by": "hydromancer", "voted_proposal_id": 1, "refresh": true},
                                {"round_id": 1, "controlled_by": "user", "voted_proposal_id": null, "refresh": false}
                            ]
                        }
                    ]
                }
            ],
            "proposals": [
                {"id": 1, "round_id": 0, "bid_duration_months": 2, "tributes": [{"id": 0, "denom": "USDC", "amount": "250.00"}]}
            ]
        }"#;

        let scenario: Scenario = serde_json::from_str(json).unwrap();

        assert_eq!(scenario.total_rounds(), 2);
        assert_eq!(scenario.users[0].address, None);
        let vessel = &scenario.users[0].vessels[0];
        assert_eq!(
            vessel.round(0).unwrap().controlled_by,
            ControlledBy::Hydromancer
        );
        assert_eq!(vessel.round(0).unwrap().voted_proposal_id, Some(1));
        assert_eq!(vessel.round(1).unwrap().controlled_by, ControlledBy::User);
        assert_eq!(scenario.proposal(1).unwrap().tributes[0].amount, "250.00");
    }

    #[test]
    fn scenario_rejects_unknown_controller() {
        let json = r#"{"round_id": 0, "controlled_by": "validator", "voted_proposal_id": null, "refresh": false}"#;
        assert!(serde_json::from_str::<VesselRound>(json).is_err());
    }

    #[test]
    fn total_rounds_is_derived_from_highest_round_id() {
        let scenario = Scenario {
            protocol_config: ProtocolConfig {
                protocol_commission_bps: 1000,
                hydromancer_commission_bps: 500,
                round_length: 0,
                total_rounds: None,
            },
            users: vec![User {
                user_id: "A".to_string(),
                address: None,
                vessels: vec![vessel_with_rounds(&[0, 1, 2])],
            }],
            proposals: vec![Proposal {
                id: 1,
                round_id: 4,
                bid_duration_months: 1,
                tributes: vec![],
            }],
        };
        assert_eq!(scenario.total_rounds(), 5);

        let empty = Scenario {
            users: vec![],
            proposals: vec![],
            ..scenario
        };
        assert_eq!(empty.total_rounds(), 0);
    }

    #[test]
    fn vessel_round_lookup() {
        let vessel = vessel_with_rounds(&[1, 3, 4]);
        assert!(vessel.round(0).is_none());
        assert!(vessel.round(2).is_none());
        assert_eq!(vessel.round(3).unwrap().round_id, 3);
        assert!(vessel.is_under_hydromancer_control(4));
        assert!(!vessel.is_under_hydromancer_control(3));
        assert!(!vessel.is_under_hydromancer_control(2));
    }
}
