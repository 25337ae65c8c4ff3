use serde::{Deserialize, Serialize};
use starknet_core::types::Felt;

use super::{ComponentType, EncodeContext, length_prefixed};
use crate::{RecordKind, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductType {
    pub id: u64,
    pub name: String,
    pub mass_per_unit: u64,
    pub volume_per_unit: u64,
}

impl ComponentType for ProductType {
    const KIND: RecordKind = RecordKind::Product;

    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn encode(&self, _ctx: &EncodeContext) -> Result<Vec<Felt>> {
        Ok(length_prefixed(vec![
            Felt::from(self.mass_per_unit),
            Felt::from(self.volume_per_unit),
        ]))
    }
}
