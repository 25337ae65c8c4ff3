//! Tagged union over all component record kinds

use starknet_core::types::Felt;

use crate::schema::{
    BuildingType, ComponentType, DockType, DryDockType, EncodeContext, ExchangeType,
    InventoryType, ModifierType, ProcessType, ProductType, ShipType, ShipVariantType,
    StationType,
};
use crate::{RecordKind, Result};

/// One game-entity type record of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRecord {
    Building(BuildingType),
    Dock(DockType),
    DryDock(DryDockType),
    Exchange(ExchangeType),
    Inventory(InventoryType),
    Modifier(ModifierType),
    Process(ProcessType),
    Product(ProductType),
    Ship(ShipType),
    ShipVariant(ShipVariantType),
    Station(StationType),
}

macro_rules! dispatch {
    ($self:expr, $inner:ident => $body:expr) => {
        match $self {
            TypeRecord::Building($inner) => $body,
            TypeRecord::Dock($inner) => $body,
            TypeRecord::DryDock($inner) => $body,
            TypeRecord::Exchange($inner) => $body,
            TypeRecord::Inventory($inner) => $body,
            TypeRecord::Modifier($inner) => $body,
            TypeRecord::Process($inner) => $body,
            TypeRecord::Product($inner) => $body,
            TypeRecord::Ship($inner) => $body,
            TypeRecord::ShipVariant($inner) => $body,
            TypeRecord::Station($inner) => $body,
        }
    };
}

impl TypeRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            TypeRecord::Building(_) => RecordKind::Building,
            TypeRecord::Dock(_) => RecordKind::Dock,
            TypeRecord::DryDock(_) => RecordKind::DryDock,
            TypeRecord::Exchange(_) => RecordKind::Exchange,
            TypeRecord::Inventory(_) => RecordKind::Inventory,
            TypeRecord::Modifier(_) => RecordKind::Modifier,
            TypeRecord::Process(_) => RecordKind::Process,
            TypeRecord::Product(_) => RecordKind::Product,
            TypeRecord::Ship(_) => RecordKind::Ship,
            TypeRecord::ShipVariant(_) => RecordKind::ShipVariant,
            TypeRecord::Station(_) => RecordKind::Station,
        }
    }

    pub fn id(&self) -> u64 {
        dispatch!(self, r => r.id())
    }

    pub fn name(&self) -> &str {
        dispatch!(self, r => r.name())
    }

    pub fn label(&self) -> String {
        dispatch!(self, r => r.label())
    }

    pub fn encode(&self, ctx: &EncodeContext) -> Result<Vec<Felt>> {
        dispatch!(self, r => r.encode(ctx))
    }

    /// Records that exist only as placeholders and are never written.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, TypeRecord::Building(b) if b.is_empty_lot())
    }
}

macro_rules! impl_from {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for TypeRecord {
                fn from(value: $ty) -> Self {
                    TypeRecord::$variant(value)
                }
            }
        )*
    };
}

impl_from!(
    Building(BuildingType),
    Dock(DockType),
    DryDock(DryDockType),
    Exchange(ExchangeType),
    Inventory(InventoryType),
    Modifier(ModifierType),
    Process(ProcessType),
    Product(ProductType),
    Ship(ShipType),
    ShipVariant(ShipVariantType),
    Station(StationType),
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_lot_is_a_placeholder() {
        let lot: TypeRecord = BuildingType {
            id: 0,
            name: "Empty Lot".into(),
            process_type: 0,
            site_slot: 0,
            site_type: 0,
        }
        .into();
        assert!(lot.is_placeholder());
        assert_eq!(lot.kind(), RecordKind::Building);
    }

    #[test]
    fn dispatches_to_inner_encoder() {
        let dock: TypeRecord = DockType {
            id: 1,
            name: "Dock".into(),
            cap: 5,
            delay_per_ship: 120,
        }
        .into();
        assert_eq!(dock.label(), "DockType #1 (Dock)");
        assert_eq!(dock.encode(&EncodeContext::default()).unwrap().len(), 3);
        assert!(!dock.is_placeholder());
    }
}
