use std::collections::BTreeMap;

use bigdecimal::{BigDecimal, Zero};
use tracing::{debug, warn};
use zephyrus_rewards_core::{
    config::{EngineConfig, UndistributedPolicy},
    scenario::{Proposal, ProposalId, RoundId, Scenario},
};

use crate::{
    errors::RewardsError,
    helpers::{
        commission::CommissionSplitter,
        decimal::{checked_ratio, parse_amount},
        proposal_index::{votes_by_proposal, VesselVote},
        voting_power::VotingPowerModel,
    },
    result::RewardsResult,
};

/// Voting power of a user's hydromancer-controlled vessels, keyed by effective lock duration.
type DelegatedStake = BTreeMap<i64, BigDecimal>;

/// Computes what the protocol, the hydromancer and every user earn from the tributes of one round.
pub struct RoundRewardsCalculator<'a> {
    scenario: &'a Scenario,
    voting_power: VotingPowerModel,
    splitter: CommissionSplitter,
    undistributed_policy: UndistributedPolicy,
}

impl<'a> RoundRewardsCalculator<'a> {
    pub fn new(scenario: &'a Scenario, config: &EngineConfig) -> Result<Self, RewardsError> {
        Ok(RoundRewardsCalculator {
            scenario,
            voting_power: VotingPowerModel::new(config)?,
            splitter: CommissionSplitter::from_protocol_config(&scenario.protocol_config)?,
            undistributed_policy: config.undistributed_policy,
        })
    }

    /// Rewards of the round, rounded to two fractional digits.
    pub fn calculate(&self, round_id: RoundId) -> Result<RewardsResult, RewardsError> {
        Ok(self.calculate_exact(round_id)?.rounded())
    }

    /// Rewards of the round at full precision.
    pub fn calculate_exact(&self, round_id: RoundId) -> Result<RewardsResult, RewardsError> {
        let votes = votes_by_proposal(round_id, self.scenario);
        let delegated_stakes = self.delegated_stakes(round_id)?;
        let mut result = RewardsResult::default();

        debug!(
            "ZEPH300: ROUND_START: round_id={}, voted_proposals={}, delegators={}",
            round_id,
            votes.len(),
            delegated_stakes.len()
        );

        for (proposal_id, proposal_votes) in &votes {
            let proposal = self.voted_proposal(round_id, *proposal_id, proposal_votes)?;
            self.reward_proposal(
                round_id,
                proposal,
                proposal_votes,
                &delegated_stakes,
                &mut result,
            )?;
        }

        Ok(result)
    }

    fn voted_proposal(
        &self,
        round_id: RoundId,
        proposal_id: ProposalId,
        votes: &[VesselVote<'_>],
    ) -> Result<&'a Proposal, RewardsError> {
        let vessel_id = votes.first().map_or(0, |vote| vote.vessel.id);
        let proposal =
            self.scenario
                .proposal(proposal_id)
                .ok_or(RewardsError::ProposalNotFound {
                    proposal_id,
                    vessel_id,
                })?;
        if proposal.round_id != round_id {
            return Err(RewardsError::ProposalRoundMismatch {
                vessel_id,
                proposal_id,
                round_id,
                proposal_round_id: proposal.round_id,
            });
        }
        Ok(proposal)
    }

    /// Every vessel under hydromancer control this round, whether it voted or not, grouped by owner.
    fn delegated_stakes(
        &self,
        round_id: RoundId,
    ) -> Result<BTreeMap<&'a str, DelegatedStake>, RewardsError> {
        let scenario = self.scenario;
        let mut stakes: BTreeMap<&'a str, DelegatedStake> = BTreeMap::new();

        for user in &scenario.users {
            for vessel in &user.vessels {
                if !vessel.is_under_hydromancer_control(round_id) {
                    continue;
                }
                let duration = VotingPowerModel::effective_lock_duration(vessel, round_id);
                let power = self.voting_power.power(round_id, vessel)?;
                *stakes
                    .entry(user.user_id.as_str())
                    .or_default()
                    .entry(duration)
                    .or_default() += power;
            }
        }

        Ok(stakes)
    }

    fn reward_proposal(
        &self,
        round_id: RoundId,
        proposal: &Proposal,
        votes: &[VesselVote<'_>],
        delegated_stakes: &BTreeMap<&'a str, DelegatedStake>,
        result: &mut RewardsResult,
    ) -> Result<(), RewardsError> {
        let tributes = proposal
            .tributes
            .iter()
            .map(|tribute| Ok((tribute.denom.as_str(), parse_amount("tribute", &tribute.amount)?)))
            .collect::<Result<Vec<_>, RewardsError>>()?;

        for (denom, amount) in &tributes {
            result.add_protocol(denom, &self.splitter.protocol_cut(amount));
        }

        let powers = votes
            .iter()
            .map(|vote| self.voting_power.power(round_id, vote.vessel))
            .collect::<Result<Vec<_>, RewardsError>>()?;
        let total_power: BigDecimal = powers.iter().sum();
        let hydromancer_power: BigDecimal = votes
            .iter()
            .zip(&powers)
            .filter(|(vote, _)| vote.is_delegated())
            .map(|(_, power)| power)
            .sum();

        debug!(
            "ZEPH301: PROPOSAL_POWER: round_id={}, proposal_id={}, voters={}, total_power={}, hydromancer_power={}",
            round_id,
            proposal.id,
            votes.len(),
            total_power,
            hydromancer_power
        );

        if total_power.is_zero() {
            return Err(RewardsError::ZeroProposalVotingPower {
                proposal_id: proposal.id,
                round_id,
            });
        }

        if hydromancer_power > BigDecimal::zero() {
            let hydromancer_share = checked_ratio(&hydromancer_power, &total_power)?;
            let eligible = eligible_delegators(delegated_stakes, proposal.bid_duration_months);
            let eligible_power: BigDecimal = eligible.values().sum();

            debug!(
                "ZEPH302: DELEGATORS: round_id={}, proposal_id={}, bid_duration={}, hydromancer_share={}, eligible_users={}, eligible_power={}",
                round_id,
                proposal.id,
                proposal.bid_duration_months,
                hydromancer_share,
                eligible.len(),
                eligible_power
            );

            for (denom, amount) in &tributes {
                let split = self.splitter.hydromancer_split(amount, &hydromancer_share);
                result.add_hydromancer(denom, &split.net);

                if eligible_power.is_zero() {
                    self.leave_undistributed(
                        round_id,
                        proposal.id,
                        denom,
                        &split.remainder_for_delegators,
                        result,
                    );
                    continue;
                }
                for (user_id, user_power) in &eligible {
                    let user_share = checked_ratio(user_power, &eligible_power)?;
                    result.add_user(
                        user_id,
                        denom,
                        &(&split.remainder_for_delegators * &user_share),
                    );
                }
            }
        }

        for (vote, power) in votes.iter().zip(&powers) {
            if vote.is_delegated() || power.is_zero() {
                continue;
            }
            let user_share = checked_ratio(power, &total_power)?;
            for (denom, amount) in &tributes {
                let reward = self.splitter.direct_reward(amount, &user_share);
                debug!(
                    "ZEPH303: DIRECT_REWARD: round_id={}, proposal_id={}, vessel_id={}, user_id={}, share={}, reward={} {}",
                    round_id, proposal.id, vote.vessel.id, vote.user_id, user_share, reward, denom
                );
                result.add_user(vote.user_id, denom, &reward);
            }
        }

        Ok(())
    }

    fn leave_undistributed(
        &self,
        round_id: RoundId,
        proposal_id: ProposalId,
        denom: &str,
        remainder: &BigDecimal,
        result: &mut RewardsResult,
    ) {
        warn!(
            "ZEPH304: NO_ELIGIBLE_DELEGATOR: round_id={}, proposal_id={}, remainder={} {}, policy={:?}",
            round_id, proposal_id, remainder, denom, self.undistributed_policy
        );
        match self.undistributed_policy {
            UndistributedPolicy::Unassigned => result.add_undistributed(denom, remainder),
            UndistributedPolicy::ReturnToProtocol => result.add_protocol(denom, remainder),
            UndistributedPolicy::ReturnToHydromancer => result.add_hydromancer(denom, remainder),
        }
    }
}

/// Users owning delegated stake locked for at least `bid_duration` rounds, with the power of that stake.
/// A user's whole eligible stake counts, not only the vessels that voted for the proposal.
fn eligible_delegators<'s>(
    delegated_stakes: &BTreeMap<&'s str, DelegatedStake>,
    bid_duration: u64,
) -> BTreeMap<&'s str, BigDecimal> {
    let min_duration = i64::try_from(bid_duration).unwrap_or(i64::MAX);

    delegated_stakes
        .iter()
        .filter_map(|(user_id, stake)| {
            let power: BigDecimal = stake.range(min_duration..).map(|(_, power)| power).sum();
            (power > BigDecimal::zero()).then_some((*user_id, power))
        })
        .collect()
}
