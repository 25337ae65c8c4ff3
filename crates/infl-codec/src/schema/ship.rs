use serde::{Deserialize, Serialize};
use starknet_core::types::Felt;

use super::{ComponentType, EncodeContext, length_prefixed};
use crate::felt::flag;
use crate::fixed::reciprocal;
use crate::{RecordKind, Result};

/// Ship hull type.
///
/// Exhaust velocity is stored as 64.64 fixed point in km/s, i.e.
/// `floor(ev * 2^64 / 1000)` for an integral `ev` in m/s. The emergency
/// propellant cap is stored as its reciprocal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipType {
    pub id: u64,
    pub name: String,
    pub cargo_inventory_type: u64,
    pub cargo_slot: u64,
    pub docking: bool,
    pub exhaust_velocity: u64,
    pub hull_mass: u64,
    pub landing: bool,
    pub process_type: u64,
    pub emergency_propellant_cap: Option<f64>,
    pub propellant_inventory_type: u64,
    pub propellant_slot: u64,
    pub propellant_type: u64,
    pub station_type: u64,
}

impl ShipType {
    fn exhaust_velocity_fixed(&self) -> Felt {
        let scaled = (u128::from(self.exhaust_velocity) << 64) / 1000;
        Felt::from(scaled)
    }
}

impl ComponentType for ShipType {
    const KIND: RecordKind = RecordKind::Ship;

    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn encode(&self, _ctx: &EncodeContext) -> Result<Vec<Felt>> {
        let emergency_cap = match self.emergency_propellant_cap {
            Some(cap) => reciprocal(&self.label(), "emergency_propellant_cap", cap)?,
            None => Felt::ZERO,
        };

        Ok(length_prefixed(vec![
            Felt::from(self.cargo_inventory_type),
            Felt::from(self.cargo_slot),
            flag(self.docking),
            self.exhaust_velocity_fixed(),
            Felt::ZERO,
            Felt::from(self.hull_mass),
            flag(self.landing),
            Felt::from(self.process_type),
            emergency_cap,
            Felt::from(self.propellant_inventory_type),
            Felt::from(self.propellant_slot),
            Felt::from(self.propellant_type),
            Felt::from(self.station_type),
        ]))
    }
}
