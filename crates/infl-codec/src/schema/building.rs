use serde::{Deserialize, Serialize};
use starknet_core::types::Felt;

use super::{ComponentType, EncodeContext, length_prefixed};
use crate::{RecordKind, Result};

/// Building type: the process it runs and the site it is built on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingType {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub process_type: u64,
    #[serde(default)]
    pub site_slot: u64,
    #[serde(default)]
    pub site_type: u64,
}

impl BuildingType {
    /// Type id 0 is the empty lot, which is never written.
    pub fn is_empty_lot(&self) -> bool {
        self.id == 0
    }
}

impl ComponentType for BuildingType {
    const KIND: RecordKind = RecordKind::Building;

    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn encode(&self, _ctx: &EncodeContext) -> Result<Vec<Felt>> {
        Ok(length_prefixed(vec![
            Felt::from(self.process_type),
            Felt::from(self.site_slot),
            Felt::from(self.site_type),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_three_fields() {
        let building = BuildingType {
            id: 2,
            name: "Warehouse".into(),
            process_type: 0,
            site_slot: 1,
            site_type: 3,
        };
        let encoded = building.encode(&EncodeContext::default()).unwrap();
        assert_eq!(encoded, [3u64, 0, 1, 3].map(Felt::from).to_vec());
        assert!(!building.is_empty_lot());
    }
}
