use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use starknet_core::types::Felt;

use super::{ComponentType, EncodeContext, length_prefixed};
use crate::bound::{Bound, UNBOUNDED_CAPACITY, UNBOUNDED_PRODUCT_CAP};
use crate::felt::flag;
use crate::{RecordKind, Result};

/// Inventory type: mass/volume limits and optional per-product caps.
///
/// Layout: `[len, mass, volume, modifiable, n, (product, cap) * n]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryType {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub mass_constraint: Bound,
    #[serde(default)]
    pub volume_constraint: Bound,
    #[serde(default)]
    pub modifiable: bool,
    #[serde(default, with = "crate::id_map")]
    pub product_constraints: BTreeMap<u64, Bound>,
}

impl ComponentType for InventoryType {
    const KIND: RecordKind = RecordKind::Inventory;

    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn encode(&self, _ctx: &EncodeContext) -> Result<Vec<Felt>> {
        let mut fields = vec![
            self.mass_constraint.encode(UNBOUNDED_CAPACITY),
            self.volume_constraint.encode(UNBOUNDED_CAPACITY),
            flag(self.modifiable),
            Felt::from(self.product_constraints.len() as u64),
        ];

        for (product, cap) in &self.product_constraints {
            // A zero cap is stored as unconstrained, matching the game SDK.
            let cap = match cap {
                Bound::Limited(0) => Bound::Unbounded,
                other => *other,
            };
            fields.push(Felt::from(*product));
            fields.push(cap.encode(UNBOUNDED_PRODUCT_CAP));
        }

        Ok(length_prefixed(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn felts(values: &[u64]) -> Vec<Felt> {
        values.iter().copied().map(Felt::from).collect()
    }

    #[test]
    fn encodes_sentinels_and_product_caps() {
        let inventory = InventoryType {
            id: 3,
            name: "Warehouse Primary".into(),
            mass_constraint: Bound::Unbounded,
            volume_constraint: Bound::Limited(1000),
            modifiable: true,
            product_constraints: BTreeMap::from([(9, Bound::Limited(50)), (7, Bound::Unbounded)]),
        };

        let encoded = inventory.encode(&EncodeContext::default()).unwrap();
        assert_eq!(
            encoded,
            felts(&[8, 1_125_899_906_842_623, 1000, 1, 2, 7, 4_294_967_295, 9, 50])
        );
    }

    #[test]
    fn unconstrained_inventory_has_no_products() {
        let inventory = InventoryType {
            id: 1,
            name: "Propellant Tiny".into(),
            mass_constraint: Bound::Limited(0),
            volume_constraint: Bound::Unbounded,
            modifiable: false,
            product_constraints: BTreeMap::new(),
        };

        let encoded = inventory.encode(&EncodeContext::default()).unwrap();
        assert_eq!(encoded, felts(&[4, 0, 1_125_899_906_842_623, 0, 0]));
    }

    #[test]
    fn zero_product_cap_is_stored_as_unbounded() {
        let inventory = InventoryType {
            id: 4,
            name: "Tank".into(),
            mass_constraint: Bound::Limited(10),
            volume_constraint: Bound::Limited(10),
            modifiable: false,
            product_constraints: BTreeMap::from([(1, Bound::Limited(0))]),
        };

        let encoded = inventory.encode(&EncodeContext::default()).unwrap();
        assert_eq!(encoded[6], Felt::from(4_294_967_295u64));
    }

    #[test]
    fn deserializes_from_toml() {
        let inventory: InventoryType = toml::from_str(
            r#"
            id = 3
            name = "Warehouse Primary"
            mass_constraint = inf
            volume_constraint = 1000
            modifiable = true
            [product_constraints]
            7 = "unbounded"
            9 = 50
            "#,
        )
        .unwrap();

        assert_eq!(inventory.mass_constraint, Bound::Unbounded);
        assert_eq!(inventory.product_constraints.get(&9), Some(&Bound::Limited(50)));
    }
}
