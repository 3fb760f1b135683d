//! Token-amount conversion between user-entered decimal strings and raw
//! on-chain integers scaled by a token's decimal precision.

use alloy::primitives::{
    utils::{format_units, parse_units, UnitsError},
    U256,
};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("'{input}' is not a valid token amount: {source}")]
pub struct AmountParseError {
    pub input: String,
    #[source]
    source: UnitsError,
}

/// Scale a user-entered decimal string into the token's smallest unit, so
/// `"1.5"` at 18 decimals becomes `1500000000000000000`. Anything the numeric
/// parser rejects is returned as an error without further interpretation.
pub fn parse_token_amount(input: &str, decimals: u8) -> Result<U256, AmountParseError> {
    parse_units(input, decimals)
        .map(|parsed| parsed.get_absolute())
        .map_err(|source| AmountParseError {
            input: input.to_string(),
            source,
        })
}

/// Render a raw on-chain amount using the token's decimals.
pub fn format_token_amount(value: U256, decimals: u8) -> String {
    format_units(value, decimals).unwrap_or_else(|_| value.to_string())
}
