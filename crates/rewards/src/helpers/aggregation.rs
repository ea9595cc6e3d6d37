use std::collections::BTreeMap;

use zephyrus_rewards_core::scenario::RoundId;

use crate::result::RewardsResult;

/// Sums per-round results key-wise. Round order does not matter.
pub fn aggregate(per_round_results: &BTreeMap<RoundId, RewardsResult>) -> RewardsResult {
    per_round_results
        .values()
        .fold(RewardsResult::default(), |mut total, round_result| {
            total.merge(round_result);
            total
        })
}
