//! Per-kind record structs and their encoders.
//!
//! Every encoder produces the exact felt sequence the dispatcher's
//! `ReadComponent` system returns for that type, so an unchanged catalog
//! always compares equal to what is stored on chain.

mod building;
mod dock;
mod dry_dock;
mod exchange;
mod inventory;
mod modifier;
mod process;
mod product;
mod ship;
mod ship_variant;
mod station;

pub use building::BuildingType;
pub use dock::DockType;
pub use dry_dock::DryDockType;
pub use exchange::ExchangeType;
pub use inventory::InventoryType;
pub use modifier::ModifierType;
pub use process::ProcessType;
pub use product::ProductType;
pub use ship::ShipType;
pub use ship_variant::ShipVariantType;
pub use station::StationType;

use starknet_core::types::Felt;

use crate::{RecordKind, Result};

/// Settings shared by encoders that are not part of any single record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeContext {
    /// Department id whose modifier bonus is stored in the management slot
    pub management_department: Option<u64>,
}

/// A typed game-entity record with a fixed component layout.
pub trait ComponentType {
    /// Component kind this struct encodes
    const KIND: RecordKind;

    /// Type id used as the component key
    fn id(&self) -> u64;

    /// Human readable name, used in log lines only
    fn name(&self) -> &str;

    /// Encode into the flat felt layout stored by the ledger
    fn encode(&self, ctx: &EncodeContext) -> Result<Vec<Felt>>;

    /// Label such as `DockType #3 (Tank Farm)` for logs and errors
    fn label(&self) -> String {
        format!("{} #{} ({})", Self::KIND.component_name(), self.id(), self.name())
    }
}

/// Prefix `fields` with their own count.
pub(crate) fn length_prefixed(mut fields: Vec<Felt>) -> Vec<Felt> {
    fields.insert(0, Felt::from(fields.len() as u64));
    fields
}
