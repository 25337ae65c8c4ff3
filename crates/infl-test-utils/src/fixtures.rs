//! Sample catalog data shared by tests.

use std::collections::BTreeMap;

use infl_codec::{Bound, DockType, InventoryType, ProductType, StationType, TypeRecord};

/// Catalog covering one record of several kinds plus two constants.
pub const SAMPLE_CATALOG: &str = r#"
management_department = 12

[[constants]]
name = "TIME_ACCELERATION"
value = 24

[[constants]]
name = "HOPPER_SPEED"
value = 0.5
multiplier = 3600
fraction_bits = 32

[[buildings]]
id = 0
name = "Empty Lot"

[[buildings]]
id = 1
name = "Warehouse"
site_slot = 2
site_type = 9

[[docks]]
id = 1
name = "Basic Spaceport"
cap = 5
delay_per_ship = 120

[[inventories]]
id = 2
name = "Cargo"
mass_constraint = "unbounded"
volume_constraint = 1000
modifiable = true
product_constraints = { "7" = "unbounded", "9" = 50 }

[[products]]
id = 1
name = "Water"
mass_per_unit = 1000
volume_per_unit = 970

[[stations]]
id = 1
name = "Outpost"
cap = 100
recruitment = false
efficiency = 0.85
"#;

/// Number of component records in [`SAMPLE_CATALOG`], the empty lot excluded.
pub const SAMPLE_COMPONENTS: usize = 5;

pub fn dock(id: u64, cap: u64, delay_per_ship: u64) -> TypeRecord {
    DockType {
        id,
        name: format!("Dock {id}"),
        cap,
        delay_per_ship,
    }
    .into()
}

pub fn product(id: u64, mass_per_unit: u64, volume_per_unit: u64) -> TypeRecord {
    ProductType {
        id,
        name: format!("Product {id}"),
        mass_per_unit,
        volume_per_unit,
    }
    .into()
}

pub fn station(id: u64, efficiency: f64) -> TypeRecord {
    StationType {
        id,
        name: format!("Station {id}"),
        cap: 100,
        recruitment: true,
        efficiency,
    }
    .into()
}

/// Cargo inventory with an unbounded mass limit and two product caps.
pub fn cargo_inventory() -> TypeRecord {
    InventoryType {
        id: 2,
        name: "Cargo".into(),
        mass_constraint: Bound::Unbounded,
        volume_constraint: Bound::Limited(1000),
        modifiable: true,
        product_constraints: BTreeMap::from([(7, Bound::Unbounded), (9, Bound::Limited(50))]),
    }
    .into()
}
