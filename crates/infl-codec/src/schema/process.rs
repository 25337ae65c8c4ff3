use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use starknet_core::types::Felt;

use super::{ComponentType, EncodeContext, length_prefixed};
use crate::felt::flag;
use crate::fixed::{RECIPE_TIME_SCALE, scaled};
use crate::{RecordKind, Result};

/// Production process type.
///
/// Layout: `[len, setup, recipe*1000, batched, processor, nIn, (id, qty)*, nOut, (id, qty)*]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessType {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub setup_time: f64,
    #[serde(default)]
    pub recipe_time: f64,
    #[serde(default)]
    pub batched: bool,
    #[serde(default)]
    pub processor_type: u64,
    #[serde(default, with = "crate::id_map")]
    pub inputs: BTreeMap<u64, u64>,
    #[serde(default, with = "crate::id_map")]
    pub outputs: BTreeMap<u64, u64>,
}

fn push_products(fields: &mut Vec<Felt>, products: &BTreeMap<u64, u64>) {
    fields.push(Felt::from(products.len() as u64));
    for (&product, &quantity) in products {
        fields.push(Felt::from(product));
        fields.push(Felt::from(quantity));
    }
}

impl ComponentType for ProcessType {
    const KIND: RecordKind = RecordKind::Process;

    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn encode(&self, _ctx: &EncodeContext) -> Result<Vec<Felt>> {
        let label = self.label();
        let mut fields = vec![
            scaled(&label, "setup_time", self.setup_time, 1.0)?,
            scaled(&label, "recipe_time", self.recipe_time, RECIPE_TIME_SCALE)?,
            flag(self.batched),
            Felt::from(self.processor_type),
        ];
        push_products(&mut fields, &self.inputs);
        push_products(&mut fields, &self.outputs);

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
    fn encodes_inputs_then_outputs() {
        let process = ProcessType {
            id: 1,
            name: "Water Electrolysis".into(),
            setup_time: 3600.4,
            recipe_time: 0.0125,
            batched: true,
            processor_type: 2,
            inputs: BTreeMap::from([(1, 20)]),
            outputs: BTreeMap::from([(10, 4), (3, 16)]),
        };

        assert_eq!(
            process.encode(&EncodeContext::default()).unwrap(),
            felts(&[12, 3600, 13, 1, 2, 1, 1, 20, 2, 3, 16, 10, 4])
        );
    }

    #[test]
    fn empty_process_has_two_zero_counts() {
        let process = ProcessType {
            id: 9,
            name: "Idle".into(),
            setup_time: 0.0,
            recipe_time: 0.0,
            batched: false,
            processor_type: 0,
            inputs: BTreeMap::new(),
            outputs: BTreeMap::new(),
        };

        assert_eq!(
            process.encode(&EncodeContext::default()).unwrap(),
            felts(&[6, 0, 0, 0, 0, 0, 0])
        );
    }
}
