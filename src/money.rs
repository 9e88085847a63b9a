use crate::types::Coin;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

pub const CENTS_PER_UNIT: i64 = 100;

/// Round `n` to `decimals` places, half-up: scale, add one half, floor, scale back.
///
/// The arithmetic runs on the shortest decimal representation of `n`, so
/// `1.005` rounds to `1.01` rather than falling foul of its binary
/// approximation (`1.00499999...`). Values that have no decimal representation
/// (non-finite, or too large) are returned unchanged.
pub fn truncate(n: f64, decimals: u32) -> f64 {
    to_decimal(n)
        .and_then(|value| truncate_decimal(value, decimals))
        .and_then(|value| f64::from_str(&value.to_string()).ok())
        .unwrap_or(n)
}

/// Sum a sequence of coins, truncated to cents.
pub fn sum<'a>(coins: impl IntoIterator<Item = &'a Coin>) -> f64 {
    truncate(coins.into_iter().sum(), 2)
}

/// Round a value half-up to whole cents.
pub fn to_cents(value: f64) -> Option<i64> {
    let value = truncate_decimal(to_decimal(value)?, 2)?;
    value.checked_mul(Decimal::from(CENTS_PER_UNIT))?.to_i64()
}

/// The value in cents, if it is a whole number of cents.
pub fn exact_cents(value: f64) -> Option<i64> {
    let scaled = to_decimal(value)?.checked_mul(Decimal::from(CENTS_PER_UNIT))?;
    if !scaled.fract().is_zero() {
        return None;
    }
    scaled.to_i64()
}

pub fn from_cents(cents: i64) -> f64 {
    cents as f64 / CENTS_PER_UNIT as f64
}

fn to_decimal(n: f64) -> Option<Decimal> {
    if !n.is_finite() {
        return None;
    }
    // Display prints the shortest string that round-trips, never an exponent.
    Decimal::from_str(&n.to_string()).ok()
}

fn truncate_decimal(value: Decimal, decimals: u32) -> Option<Decimal> {
    let multiplier = Decimal::from(10u64.checked_pow(decimals)?);
    value
        .checked_mul(multiplier)?
        .checked_add(Decimal::new(5, 1))?
        .floor()
        .checked_div(multiplier)
}
