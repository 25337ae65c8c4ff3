//! Desired-state catalog: every constant and type record the ledger should hold

use std::collections::BTreeSet;

use infl_codec::{
    BuildingType, ComponentType, ConstantDef, DockType, DryDockType, EncodeContext, ExchangeType,
    InventoryType, ModifierType, ProcessType, ProductType, RecordKind, ShipType, ShipVariantType,
    StationType, TypeRecord,
};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Catalog file contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    /// Department id whose modifier bonus goes into the management slot
    pub management_department: Option<u64>,
    pub constants: Vec<ConstantDef>,
    pub buildings: Vec<BuildingType>,
    pub docks: Vec<DockType>,
    pub dry_docks: Vec<DryDockType>,
    pub exchanges: Vec<ExchangeType>,
    pub inventories: Vec<InventoryType>,
    pub modifiers: Vec<ModifierType>,
    pub processes: Vec<ProcessType>,
    pub products: Vec<ProductType>,
    pub ships: Vec<ShipType>,
    pub ship_variants: Vec<ShipVariantType>,
    pub stations: Vec<StationType>,
}

impl Catalog {
    pub fn encode_context(&self) -> EncodeContext {
        EncodeContext {
            management_department: self.management_department,
        }
    }

    /// Records of one kind in catalog order, placeholders removed.
    pub fn records(&self, kind: RecordKind) -> Vec<TypeRecord> {
        fn collect<T: Clone + Into<TypeRecord>>(items: &[T]) -> Vec<TypeRecord> {
            items.iter().cloned().map(Into::into).collect()
        }

        let records = match kind {
            RecordKind::Building => collect(&self.buildings),
            RecordKind::Dock => collect(&self.docks),
            RecordKind::DryDock => collect(&self.dry_docks),
            RecordKind::Exchange => collect(&self.exchanges),
            RecordKind::Inventory => collect(&self.inventories),
            RecordKind::Modifier => collect(&self.modifiers),
            RecordKind::Process => collect(&self.processes),
            RecordKind::Product => collect(&self.products),
            RecordKind::Ship => collect(&self.ships),
            RecordKind::ShipVariant => collect(&self.ship_variants),
            RecordKind::Station => collect(&self.stations),
        };

        records
            .into_iter()
            .filter(|record| !record.is_placeholder())
            .collect()
    }

    /// Records of every kind, kinds in [`RecordKind::ALL`] order.
    pub fn all_records(&self) -> Vec<TypeRecord> {
        RecordKind::ALL
            .into_iter()
            .flat_map(|kind| self.records(kind))
            .collect()
    }

    /// Check ids and names, and encode everything once so bad data fails
    /// before anything is written.
    pub fn validate(&self) -> Result<()> {
        check_ids(&self.buildings)?;
        check_ids(&self.docks)?;
        check_ids(&self.dry_docks)?;
        check_ids(&self.exchanges)?;
        check_ids(&self.inventories)?;
        check_ids(&self.modifiers)?;
        check_ids(&self.processes)?;
        check_ids(&self.products)?;
        check_ids(&self.ships)?;
        check_ids(&self.ship_variants)?;
        check_ids(&self.stations)?;

        let mut names = BTreeSet::new();
        for constant in &self.constants {
            if !names.insert(constant.name.as_str()) {
                return Err(Error::DuplicateConstant {
                    name: constant.name.clone(),
                });
            }
            constant.key()?;
            constant.encode()?;
        }

        let ctx = self.encode_context();
        for record in self.all_records() {
            record.encode(&ctx)?;
        }
        Ok(())
    }
}

fn check_ids<T: ComponentType>(items: &[T]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for item in items {
        if !seen.insert(item.id()) {
            return Err(Error::DuplicateId {
                kind: T::KIND.to_string(),
                id: item.id(),
            });
        }
    }
    Ok(())
}
