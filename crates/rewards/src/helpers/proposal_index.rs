use std::collections::BTreeMap;

use zephyrus_rewards_core::scenario::{ControlledBy, ProposalId, RoundId, Scenario, Vessel};

/// A vessel's vote in one round, with who controlled the vessel when the vote was cast.
#[derive(Debug, Clone, PartialEq)]
pub struct VesselVote<'a> {
    pub vessel: &'a Vessel,
    pub user_id: &'a str,
    pub controlled_by: ControlledBy,
}

impl VesselVote<'_> {
    pub fn is_delegated(&self) -> bool {
        self.controlled_by == ControlledBy::Hydromancer
    }
}

/// Groups the votes cast in `round_id` by proposal.
/// Proposals nobody voted for are absent from the map.
pub fn votes_by_proposal(
    round_id: RoundId,
    scenario: &Scenario,
) -> BTreeMap<ProposalId, Vec<VesselVote<'_>>> {
    let mut index: BTreeMap<ProposalId, Vec<VesselVote<'_>>> = BTreeMap::new();

    for user in &scenario.users {
        for vessel in &user.vessels {
            let Some(entry) = vessel.round(round_id) else {
                continue;
            };
            if let Some(proposal_id) = entry.voted_proposal_id {
                index.entry(proposal_id).or_default().push(VesselVote {
                    vessel,
                    user_id: &user.user_id,
                    controlled_by: entry.controlled_by,
                });
            }
        }
    }

    index
}
