use serde::{Deserialize, Serialize};
use starknet_core::types::Felt;

use super::{ComponentType, EncodeContext, length_prefixed};
use crate::{RecordKind, Result};

/// Dock type: ship capacity and per-ship delay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockType {
    pub id: u64,
    pub name: String,
    pub cap: u64,
    pub delay_per_ship: u64,
}

impl ComponentType for DockType {
    const KIND: RecordKind = RecordKind::Dock;

    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn encode(&self, _ctx: &EncodeContext) -> Result<Vec<Felt>> {
        Ok(length_prefixed(vec![
            Felt::from(self.cap),
            Felt::from(self.delay_per_ship),
        ]))
    }
}
