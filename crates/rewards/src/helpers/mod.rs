pub mod aggregation;
pub mod commission;
pub mod decimal;
pub mod discrepancy;
pub mod proposal_index;
pub mod rewards;
pub mod validation;
pub mod vectors;
pub mod voting_power;
