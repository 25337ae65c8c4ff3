//! Fixed-point and rounding conversions shared by the encoders.
//!
//! The ledger expects scaled values rounded the way the game SDK rounds
//! them: half-way cases go up (toward positive infinity).

use starknet_core::types::Felt;

use crate::{Error, Result};

/// 2^32, the 32.32 fixed-point scale
pub const FIXED_32: f64 = 4_294_967_296.0;

/// Scale for percentages stored as basis points of a hundredth
pub const PERCENT_SCALE: f64 = 10_000.0;

/// Scale for recipe times stored in milliseconds-per-unit
pub const RECIPE_TIME_SCALE: f64 = 1_000.0;

/// 2^128, first value that no longer fits the integer conversion
const U128_LIMIT: f64 = 340_282_366_920_938_463_463_374_607_431_768_211_456.0;

/// Round half toward positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 { floor + 1.0 } else { floor }
}

/// Round `value * scale` and convert it to a felt.
pub fn scaled(record: &str, field: &str, value: f64, scale: f64) -> Result<Felt> {
    let product = value * scale;
    to_felt(record, field, round_half_up(product))
}

/// Convert an already integral, non-negative float to a felt.
pub fn to_felt(record: &str, field: &str, value: f64) -> Result<Felt> {
    if !value.is_finite() {
        return Err(Error::field(record, field, "value is not finite"));
    }
    if value < 0.0 {
        return Err(Error::field(record, field, format!("{value} is negative")));
    }
    if value >= U128_LIMIT {
        return Err(Error::field(record, field, format!("{value} exceeds 2^128")));
    }
    if value.fract() != 0.0 {
        return Err(Error::field(record, field, format!("{value} is not an integer")));
    }
    Ok(Felt::from(value as u128))
}

/// Convert `1 / fraction` to a felt; the reciprocal must be integral.
pub fn reciprocal(record: &str, field: &str, fraction: f64) -> Result<Felt> {
    if fraction <= 0.0 || !fraction.is_finite() {
        return Err(Error::field(record, field, format!("{fraction} has no reciprocal")));
    }
    let inverse = 1.0 / fraction;
    let nearest = inverse.round();
    if (inverse - nearest).abs() > 1e-9 {
        return Err(Error::field(
            record,
            field,
            format!("1/{fraction} = {inverse} is not an integer"),
        ));
    }
    to_felt(record, field, nearest)
}
