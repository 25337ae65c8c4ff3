//! Deployment manifest: class hashes and addresses produced by the deploy step

use std::collections::BTreeMap;

use infl_codec::{Felt, parse_felt};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Output of contract deployment for one network.
///
/// ```json
/// {
///   "dispatcher": "0x0123...",
///   "systems": { "ReadComponent": "0xabc..." },
///   "contracts": { "Asteroid": "0xdef..." }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployments {
    /// Dispatcher contract address
    pub dispatcher: String,
    /// System name to declared class hash
    #[serde(default)]
    pub systems: BTreeMap<String, String>,
    /// Contract name to deployed address
    #[serde(default)]
    pub contracts: BTreeMap<String, String>,
}

impl Deployments {
    pub fn dispatcher_address(&self) -> Result<Felt> {
        Ok(parse_felt(&self.dispatcher)?)
    }

    /// Class hash of a declared system.
    pub fn system(&self, name: &str) -> Result<Felt> {
        lookup(&self.systems, "System", name)
    }

    /// Address of a deployed contract.
    pub fn contract(&self, name: &str) -> Result<Felt> {
        lookup(&self.contracts, "Contract", name)
    }
}

fn lookup(map: &BTreeMap<String, String>, kind: &str, name: &str) -> Result<Felt> {
    let raw = map.get(name).ok_or_else(|| Error::NotDeployed {
        kind: kind.to_string(),
        name: name.to_string(),
    })?;
    Ok(parse_felt(raw)?)
}
