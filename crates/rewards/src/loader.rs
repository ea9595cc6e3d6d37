use std::{fs, path::Path};

use serde::de::DeserializeOwned;
use zephyrus_rewards_core::{
    config::EngineConfig,
    reports::{ObservedBalances, RewardsReport},
    scenario::Scenario,
};

use crate::errors::RewardsError;

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, RewardsError> {
    let content = fs::read_to_string(path).map_err(|err| RewardsError::Io {
        path: path.display().to_string(),
        msg: err.to_string(),
    })?;
    parse_json(&path.display().to_string(), &content)
}

pub fn parse_json<T: DeserializeOwned>(source: &str, content: &str) -> Result<T, RewardsError> {
    serde_json::from_str(content).map_err(|err| RewardsError::Json {
        path: source.to_string(),
        msg: err.to_string(),
    })
}

pub fn load_scenario(path: &Path) -> Result<Scenario, RewardsError> {
    read_json(path)
}

/// Engine config from a JSON file, or the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig, RewardsError> {
    match path {
        Some(path) => read_json(path),
        None => Ok(EngineConfig::default()),
    }
}

pub fn load_rewards_report(path: &Path) -> Result<RewardsReport, RewardsError> {
    read_json(path)
}

pub fn load_observed_balances(path: &Path) -> Result<ObservedBalances, RewardsError> {
    read_json(path)
}
