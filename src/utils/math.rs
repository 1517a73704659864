//! Decimal conversion helpers for raw chain integers

use alloy::primitives::U256;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use std::str::FromStr;

pub fn pow10(n: i32) -> Decimal {
    match n {
        0 => dec!(1),
        6 => dec!(1_000_000),
        18 => dec!(1_000_000_000_000_000_000),
        _ => {
            let mut result = dec!(1);
            if n > 0 {
                for _ in 0..n {
                    result *= dec!(10);
                }
            } else {
                for _ in 0..(-n) {
                    result /= dec!(10);
                }
            }
            result
        }
    }
}

/// Convert a raw chain integer into a decimal amount in the token's
/// precision. Returns None for values beyond Decimal's 96-bit mantissa.
pub fn decimal_from_raw(raw: U256, decimals: u8) -> Option<Decimal> {
    let value = Decimal::from_str(&raw.to_string()).ok()?;
    Some(value / pow10(decimals as i32))
}

/// Scale a decimal token amount back into raw chain units, truncating any
/// precision beyond the token's decimals.
pub fn to_raw_units(amount: Decimal, decimals: u8) -> Option<U256> {
    let scaled = (amount * pow10(decimals as i32)).trunc();
    if scaled.is_sign_negative() {
        return None;
    }
    scaled.to_u128().map(U256::from)
}
