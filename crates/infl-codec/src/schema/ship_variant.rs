use serde::{Deserialize, Serialize};
use starknet_core::types::Felt;

use super::{ComponentType, EncodeContext, length_prefixed};
use crate::fixed::{FIXED_32, scaled};
use crate::{RecordKind, Result};

/// Hull type used when a variant does not name one
const DEFAULT_SHIP_TYPE: u64 = 1;

/// Ship variant: a hull type with an exhaust velocity modifier.
///
/// Layout: `[3, shipType, round(evModifier * 2^32), 0]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipVariantType {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub ship_type: Option<u64>,
    #[serde(default)]
    pub exhaust_velocity_modifier: Option<f64>,
}

impl ComponentType for ShipVariantType {
    const KIND: RecordKind = RecordKind::ShipVariant;

    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn encode(&self, _ctx: &EncodeContext) -> Result<Vec<Felt>> {
        let ship_type = match self.ship_type {
            Some(0) | None => DEFAULT_SHIP_TYPE,
            Some(t) => t,
        };
        let modifier = self.exhaust_velocity_modifier.unwrap_or(0.0);

        Ok(length_prefixed(vec![
            Felt::from(ship_type),
            scaled(&self.label(), "exhaust_velocity_modifier", modifier, FIXED_32)?,
            Felt::ZERO,
        ]))
    }
}
