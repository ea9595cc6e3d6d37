use std::{env::current_dir, fs::create_dir_all};

use cosmwasm_schema::{export_schema, remove_schemas, schema_for};
use zephyrus_rewards_core::{
    config::EngineConfig,
    reports::{ObservedBalances, RewardsReport, VerificationReport},
    scenario::Scenario,
};

fn main() -> anyhow::Result<()> {
    let out_dir = current_dir()?.join("schema");
    create_dir_all(&out_dir)?;
    remove_schemas(&out_dir)?;

    export_schema(&schema_for!(Scenario), &out_dir);
    export_schema(&schema_for!(EngineConfig), &out_dir);
    export_schema(&schema_for!(RewardsReport), &out_dir);
    export_schema(&schema_for!(ObservedBalances), &out_dir);
    export_schema(&schema_for!(VerificationReport), &out_dir);
    Ok(())
}
