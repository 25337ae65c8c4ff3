//! Component encoding schemas for Influence game configuration
//!
//! Game-entity types (buildings, ships, inventories, ...) are stored by the
//! on-chain dispatcher as flat arrays of field elements. This crate holds a
//! strongly typed struct per record kind and the encoder that produces the
//! exact layout the ledger expects:
//!
//! - **schema**: one struct + [`ComponentType`] impl per kind
//! - **record**: [`TypeRecord`], the tagged union used by the synchronizer
//! - **constant**: scalar constants with fixed-point scaling
//! - **fixed** / **bound**: shared rounding rules and sentinel values
//!
//! # Example
//!
//! ```
//! use infl_codec::{ComponentType, DockType, EncodeContext, Felt};
//!
//! let dock = DockType { id: 1, name: "Dock".into(), cap: 5, delay_per_ship: 120 };
//! let encoded = dock.encode(&EncodeContext::default()).unwrap();
//! assert_eq!(encoded, vec![Felt::from(2u64), Felt::from(5u64), Felt::from(120u64)]);
//! ```

pub mod bound;
pub mod constant;
pub mod error;
pub mod felt;
pub mod fixed;
pub mod id_map;
pub mod kind;
pub mod record;
pub mod schema;

pub use bound::{Bound, UNBOUNDED_CAPACITY, UNBOUNDED_PRODUCT_CAP};
pub use constant::{ConstantDef, ConstantValue, Rounding};
pub use error::{Error, Result};
pub use felt::{flag, parse_felt, short_string};
pub use kind::RecordKind;
pub use record::TypeRecord;
pub use schema::{
    BuildingType, ComponentType, DockType, DryDockType, EncodeContext, ExchangeType,
    InventoryType, ModifierType, ProcessType, ProductType, ShipType, ShipVariantType,
    StationType,
};
pub use starknet_core::types::Felt;
