use serde::{Deserialize, Serialize};
use starknet_core::types::Felt;

use super::{ComponentType, EncodeContext, length_prefixed};
use crate::felt::flag;
use crate::fixed::{FIXED_32, scaled};
use crate::{RecordKind, Result};

/// Station type: crew capacity, recruitment and efficiency.
///
/// Layout: `[4, cap, recruitment, round(efficiency * 2^32), 0]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationType {
    pub id: u64,
    pub name: String,
    pub cap: u64,
    #[serde(default)]
    pub recruitment: bool,
    pub efficiency: f64,
}

impl ComponentType for StationType {
    const KIND: RecordKind = RecordKind::Station;

    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn encode(&self, _ctx: &EncodeContext) -> Result<Vec<Felt>> {
        Ok(length_prefixed(vec![
            Felt::from(self.cap),
            flag(self.recruitment),
            scaled(&self.label(), "efficiency", self.efficiency, FIXED_32)?,
            Felt::ZERO,
        ]))
    }
}
