//! Named scalar constants registered with the dispatcher.

use serde::{Deserialize, Serialize};
use starknet_core::types::Felt;

use crate::felt::{parse_felt, short_string};
use crate::fixed::{round_half_up, to_felt};
use crate::{Error, Result};

/// Raw value of a constant as written in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConstantValue {
    Integer(u64),
    Decimal(f64),
    /// `0x`-prefixed hex or a decimal string, for values beyond 64 bits
    Literal(String),
}

/// How a scaled constant becomes an integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rounding {
    /// Round half toward positive infinity
    #[default]
    HalfUp,
    /// The scaled value must already be an integer
    Exact,
}

/// A constant: `value * multiplier * 2^fraction_bits`, rounded.
///
/// ```toml
/// [[constants]]
/// name = "HOPPER_SPEED"
/// value = 0.125
/// multiplier = 3600
/// fraction_bits = 32
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantDef {
    pub name: String,
    pub value: ConstantValue,
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
    #[serde(default)]
    pub fraction_bits: u32,
    #[serde(default)]
    pub rounding: Rounding,
}

fn default_multiplier() -> f64 {
    1.0
}

impl ConstantDef {
    /// Integer constant with no scaling.
    pub fn integer(name: impl Into<String>, value: u64) -> Self {
        Self {
            name: name.into(),
            value: ConstantValue::Integer(value),
            multiplier: 1.0,
            fraction_bits: 0,
            rounding: Rounding::HalfUp,
        }
    }

    fn is_unscaled(&self) -> bool {
        self.multiplier == 1.0 && self.fraction_bits == 0
    }

    /// Constant name packed as a short string.
    pub fn key(&self) -> Result<Felt> {
        short_string(&self.name)
    }

    pub fn label(&self) -> String {
        format!("constant {}", self.name)
    }

    /// Encode the value the dispatcher should hold.
    pub fn encode(&self) -> Result<Felt> {
        let label = self.label();
        let base = match &self.value {
            ConstantValue::Integer(v) if self.is_unscaled() => return Ok(Felt::from(*v)),
            ConstantValue::Literal(s) if self.is_unscaled() => return parse_felt(s),
            ConstantValue::Literal(_) => {
                return Err(Error::field(
                    label,
                    "value",
                    "literal values cannot be scaled",
                ));
            }
            ConstantValue::Integer(v) => *v as f64,
            ConstantValue::Decimal(v) => *v,
        };

        if self.fraction_bits > 96 {
            return Err(Error::field(label, "fraction_bits", "at most 96 bits"));
        }
        let scaled = base * self.multiplier * 2f64.powi(self.fraction_bits as i32);
        let integral = match self.rounding {
            Rounding::HalfUp => round_half_up(scaled),
            Rounding::Exact => scaled,
        };
        to_felt(&label, "value", integral)
    }
}
