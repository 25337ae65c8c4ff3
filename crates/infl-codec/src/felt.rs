//! Field element helpers

use starknet_core::types::Felt;
use starknet_core::utils::cairo_short_string_to_felt;

use crate::{Error, Result};

/// Pack an ASCII name (at most 31 bytes) into a felt.
pub fn short_string(value: &str) -> Result<Felt> {
    cairo_short_string_to_felt(value).map_err(|e| Error::InvalidShortString {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Parse a felt from `0x`-prefixed hex or plain decimal.
pub fn parse_felt(value: &str) -> Result<Felt> {
    let trimmed = value.trim();
    let parsed = match trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        Some(_) => Felt::from_hex(trimmed),
        None => Felt::from_dec_str(trimmed),
    };
    parsed.map_err(|_| Error::InvalidFelt {
        value: value.to_string(),
    })
}

/// `1` for true, `0` for false.
pub fn flag(value: bool) -> Felt {
    if value { Felt::ONE } else { Felt::ZERO }
}
