//! Capacity bounds that may be unconstrained.

use std::fmt;

use serde::{Deserialize, Serialize};
use starknet_core::types::Felt;

/// Sentinel stored for unconstrained mass and volume: 2^50 - 1
pub const UNBOUNDED_CAPACITY: u64 = (1 << 50) - 1;

/// Sentinel stored for an unconstrained per-product cap: 2^32 - 1
pub const UNBOUNDED_PRODUCT_CAP: u64 = (1 << 32) - 1;

/// A numeric limit that may be absent.
///
/// In configuration files a bound is either a non-negative integer, the
/// float `inf`, or one of the strings `"unbounded"`, `"infinite"`, `"inf"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoundRepr", into = "BoundRepr")]
pub enum Bound {
    #[default]
    Unbounded,
    Limited(u64),
}

impl Bound {
    /// Encode this bound, substituting `sentinel` when unconstrained.
    pub fn encode(self, sentinel: u64) -> Felt {
        match self {
            Bound::Unbounded => Felt::from(sentinel),
            Bound::Limited(v) => Felt::from(v),
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Unbounded => write!(f, "unbounded"),
            Bound::Limited(v) => write!(f, "{v}"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum BoundRepr {
    Int(u64),
    Float(f64),
    Text(String),
}

impl TryFrom<BoundRepr> for Bound {
    type Error = String;

    fn try_from(repr: BoundRepr) -> Result<Self, Self::Error> {
        match repr {
            BoundRepr::Int(v) => Ok(Bound::Limited(v)),
            BoundRepr::Float(v) if v.is_infinite() && v > 0.0 => Ok(Bound::Unbounded),
            BoundRepr::Float(v) if v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 => {
                Ok(Bound::Limited(v as u64))
            }
            BoundRepr::Float(v) => Err(format!("invalid bound {v}")),
            BoundRepr::Text(s) => match s.to_lowercase().as_str() {
                "unbounded" | "infinite" | "infinity" | "inf" => Ok(Bound::Unbounded),
                other => Err(format!("invalid bound '{other}'")),
            },
        }
    }
}

impl From<Bound> for BoundRepr {
    fn from(bound: Bound) -> Self {
        match bound {
            Bound::Unbounded => BoundRepr::Text("unbounded".to_string()),
            Bound::Limited(v) => BoundRepr::Int(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        bound: Bound,
    }

    #[test]
    fn sentinels_match_ledger_constants() {
        assert_eq!(UNBOUNDED_CAPACITY, 1_125_899_906_842_623);
        assert_eq!(UNBOUNDED_PRODUCT_CAP, 4_294_967_295);
    }

    #[test]
    fn parses_integer_and_infinite_forms() {
        let h: Holder = toml::from_str("bound = 1000").unwrap();
        assert_eq!(h.bound, Bound::Limited(1000));

        let h: Holder = toml::from_str("bound = inf").unwrap();
        assert_eq!(h.bound, Bound::Unbounded);

        let h: Holder = toml::from_str("bound = \"unbounded\"").unwrap();
        assert_eq!(h.bound, Bound::Unbounded);

        let h: Holder = serde_json::from_str(r#"{"bound": "Infinity"}"#).unwrap();
        assert_eq!(h.bound, Bound::Unbounded);
    }

    #[test]
    fn rejects_fractional_and_unknown_forms() {
        assert!(toml::from_str::<Holder>("bound = 1.5").is_err());
        assert!(toml::from_str::<Holder>("bound = \"lots\"").is_err());
    }
}
