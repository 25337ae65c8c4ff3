//! Record kinds and their on-chain component names

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Kind of game-entity type record stored as a dispatcher component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Building,
    Dock,
    DryDock,
    Exchange,
    Inventory,
    Modifier,
    Process,
    Product,
    Ship,
    ShipVariant,
    Station,
}

impl RecordKind {
    /// All kinds, in the order a full synchronization visits them.
    pub const ALL: [RecordKind; 11] = [
        RecordKind::Building,
        RecordKind::Dock,
        RecordKind::DryDock,
        RecordKind::Exchange,
        RecordKind::Inventory,
        RecordKind::Modifier,
        RecordKind::Process,
        RecordKind::Product,
        RecordKind::Ship,
        RecordKind::ShipVariant,
        RecordKind::Station,
    ];

    /// Component name passed to `ReadComponent` / `WriteComponent`.
    pub fn component_name(self) -> &'static str {
        match self {
            RecordKind::Building => "BuildingType",
            RecordKind::Dock => "DockType",
            RecordKind::DryDock => "DryDockType",
            RecordKind::Exchange => "ExchangeType",
            RecordKind::Inventory => "InventoryType",
            RecordKind::Modifier => "ModifierType",
            RecordKind::Process => "ProcessType",
            RecordKind::Product => "ProductType",
            RecordKind::Ship => "ShipType",
            RecordKind::ShipVariant => "ShipVariantType",
            RecordKind::Station => "StationType",
        }
    }

    /// Plural name used by the catalog and the command line.
    pub fn plural(self) -> &'static str {
        match self {
            RecordKind::Building => "buildings",
            RecordKind::Dock => "docks",
            RecordKind::DryDock => "dry-docks",
            RecordKind::Exchange => "exchanges",
            RecordKind::Inventory => "inventories",
            RecordKind::Modifier => "modifiers",
            RecordKind::Process => "processes",
            RecordKind::Product => "products",
            RecordKind::Ship => "ships",
            RecordKind::ShipVariant => "ship-variants",
            RecordKind::Station => "stations",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.component_name())
    }
}

impl FromStr for RecordKind {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();

        RecordKind::ALL
            .into_iter()
            .find(|kind| {
                let plural: String = kind.plural().replace('-', "");
                let component = kind.component_name().to_lowercase();
                let singular = component.trim_end_matches("type");
                normalized == plural || normalized == component || normalized == singular
            })
            .ok_or_else(|| Error::UnknownKind {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("buildings", RecordKind::Building)]
    #[case("dryDocks", RecordKind::DryDock)]
    #[case("dry-docks", RecordKind::DryDock)]
    #[case("shipVariants", RecordKind::ShipVariant)]
    #[case("ShipVariantType", RecordKind::ShipVariant)]
    #[case("station", RecordKind::Station)]
    #[case("processes", RecordKind::Process)]
    fn parses_kind_aliases(#[case] input: &str, #[case] expected: RecordKind) {
        assert_eq!(input.parse::<RecordKind>().unwrap(), expected);
    }

    #[test]
    fn unknown_kind_is_an_error() {
        assert!(matches!(
            "asteroids".parse::<RecordKind>(),
            Err(Error::UnknownKind { .. })
        ));
    }

    #[test]
    fn component_names_fit_in_short_strings() {
        for kind in RecordKind::ALL {
            assert!(kind.component_name().len() <= 31);
        }
    }
}
