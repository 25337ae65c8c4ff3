use serde::{Deserialize, Serialize};
use starknet_core::types::Felt;

use super::{ComponentType, EncodeContext, length_prefixed};
use crate::{RecordKind, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DryDockType {
    pub id: u64,
    pub name: String,
    pub max_mass: u64,
    pub max_volume: u64,
}

impl ComponentType for DryDockType {
    const KIND: RecordKind = RecordKind::DryDock;

    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn encode(&self, _ctx: &EncodeContext) -> Result<Vec<Felt>> {
        Ok(length_prefixed(vec![
            Felt::from(self.max_mass),
            Felt::from(self.max_volume),
        ]))
    }
}
