use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use starknet_core::types::Felt;

use super::{ComponentType, EncodeContext, length_prefixed};
use crate::felt::flag;
use crate::fixed::{PERCENT_SCALE, scaled};
use crate::{Error, RecordKind, Result};

/// Crewmate ability modifier.
///
/// Layout: `[7, class, dept, deptPct, managementPct, trait, traitPct, furtherModifiable]`.
/// Percentages are stored as `round(pct * 10000)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierType {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub class: u64,
    /// Department id to bonus fraction
    #[serde(default, with = "crate::id_map")]
    pub departments: BTreeMap<u64, f64>,
    /// Trait id to bonus fraction
    #[serde(default, with = "crate::id_map")]
    pub traits: BTreeMap<u64, f64>,
    #[serde(default)]
    pub not_further_modified: bool,
}

const CLASS: usize = 1;
const DEPARTMENT: usize = 2;
const DEPARTMENT_PCT: usize = 3;
const MANAGEMENT_PCT: usize = 4;
const TRAIT: usize = 5;
const TRAIT_PCT: usize = 6;
const FURTHER_MODIFIABLE: usize = 7;

impl ComponentType for ModifierType {
    const KIND: RecordKind = RecordKind::Modifier;

    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn encode(&self, ctx: &EncodeContext) -> Result<Vec<Felt>> {
        let label = self.label();
        let mut fields = vec![Felt::ZERO; FURTHER_MODIFIABLE];
        fields[CLASS - 1] = Felt::from(self.class);
        fields[FURTHER_MODIFIABLE - 1] = flag(!self.not_further_modified);

        if !self.departments.is_empty() {
            let management = ctx
                .management_department
                .ok_or_else(|| Error::MissingManagementDepartment {
                    record: label.clone(),
                })?;

            // Later entries overwrite earlier ones in the shared slots.
            for (&department, &pct) in &self.departments {
                let value = scaled(&label, "departments", pct, PERCENT_SCALE)?;
                if department == management {
                    fields[MANAGEMENT_PCT - 1] = value;
                } else {
                    fields[DEPARTMENT - 1] = Felt::from(department);
                    fields[DEPARTMENT_PCT - 1] = value;
                }
            }
        }

        for (&trait_id, &pct) in &self.traits {
            fields[TRAIT - 1] = Felt::from(trait_id);
            fields[TRAIT_PCT - 1] = scaled(&label, "traits", pct, PERCENT_SCALE)?;
        }

        Ok(length_prefixed(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MANAGEMENT: u64 = 10;

    fn ctx() -> EncodeContext {
        EncodeContext {
            management_department: Some(MANAGEMENT),
        }
    }

    fn felts(values: &[u64]) -> Vec<Felt> {
        values.iter().copied().map(Felt::from).collect()
    }

    #[test]
    fn encodes_department_management_and_trait_slots() {
        let modifier = ModifierType {
            id: 4,
            name: "Core Sample Quality".into(),
            class: 3,
            departments: BTreeMap::from([(MANAGEMENT, 0.0125), (6, 0.05)]),
            traits: BTreeMap::from([(31, 0.1)]),
            not_further_modified: false,
        };

        assert_eq!(
            modifier.encode(&ctx()).unwrap(),
            felts(&[7, 3, 6, 500, 125, 31, 1000, 1])
        );
    }

    #[test]
    fn later_department_wins_shared_slots() {
        let modifier = ModifierType {
            id: 6,
            name: "Two Departments".into(),
            class: 0,
            departments: BTreeMap::from([(5, 0.2), (3, 0.1)]),
            traits: BTreeMap::new(),
            not_further_modified: false,
        };

        // Ascending key order: department 5 overwrites department 3.
        assert_eq!(
            modifier.encode(&ctx()).unwrap(),
            felts(&[7, 0, 5, 2000, 0, 0, 0, 1])
        );
    }

    #[test]
    fn bare_modifier_is_all_zero_but_modifiable_flag() {
        let modifier = ModifierType {
            id: 1,
            name: "Crew Scheduling".into(),
            class: 0,
            departments: BTreeMap::new(),
            traits: BTreeMap::new(),
            not_further_modified: true,
        };

        // No departments, so no management id is needed.
        assert_eq!(
            modifier.encode(&EncodeContext::default()).unwrap(),
            felts(&[7, 0, 0, 0, 0, 0, 0, 0])
        );
    }

    #[test]
    fn departments_require_management_id() {
        let modifier = ModifierType {
            id: 2,
            name: "Propellant Flow".into(),
            class: 1,
            departments: BTreeMap::from([(2, 0.1)]),
            traits: BTreeMap::new(),
            not_further_modified: false,
        };

        assert!(matches!(
            modifier.encode(&EncodeContext::default()),
            Err(Error::MissingManagementDepartment { .. })
        ));
    }

    #[test]
    fn percentage_rounds_half_up() {
        let modifier = ModifierType {
            id: 5,
            name: "Half".into(),
            class: 0,
            departments: BTreeMap::new(),
            traits: BTreeMap::from([(1, 0.00005)]),
            not_further_modified: false,
        };

        let encoded = modifier.encode(&ctx()).unwrap();
        assert_eq!(encoded[TRAIT_PCT], Felt::ONE);
    }
}
