use serde::{Deserialize, Serialize};
use starknet_core::types::Felt;

use super::{ComponentType, EncodeContext, length_prefixed};
use crate::{RecordKind, Result};

/// Exchange type: how many products a marketplace may list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeType {
    pub id: u64,
    pub name: String,
    pub product_cap: u64,
}

impl ComponentType for ExchangeType {
    const KIND: RecordKind = RecordKind::Exchange;

    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn encode(&self, _ctx: &EncodeContext) -> Result<Vec<Felt>> {
        Ok(length_prefixed(vec![Felt::from(self.product_cap)]))
    }
}
