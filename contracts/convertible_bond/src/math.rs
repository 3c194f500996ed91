//! Fixed-point and overflow-safe arithmetic for bond accounting.
//!
//! Ratios are WAD values (18-decimal fixed point). Products of two `i128`
//! amounts are evaluated in 256-bit space so `supply * ratio` cannot overflow
//! before the division; only the final quotient must fit back into `i128`.
//!
//! Rounding is always explicit. Amounts a holder or issuer may take out of the
//! ledger round [`Rounding::Down`]; amounts the issuer still owes round
//! [`Rounding::Up`].

use bond_errors::BondError;
use uint::construct_uint;

construct_uint! {
    /// 256-bit unsigned integer for intermediate products.
    pub struct U256(4);
}

/// 18-decimal fixed-point unit.
pub const WAD: i128 = 1_000_000_000_000_000_000;

/// Share tokens always carry 18 decimals.
pub const SHARE_DECIMALS: u32 = 18;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rounding {
    Down,
    Up,
}

fn to_u256(value: i128) -> Result<U256, BondError> {
    if value < 0 {
        return Err(BondError::InvalidAmount);
    }
    Ok(U256::from(value as u128))
}

fn to_i128(value: U256) -> Result<i128, BondError> {
    if value > U256::from(i128::MAX as u128) {
        return Err(BondError::Overflow);
    }
    Ok(value.as_u128() as i128)
}

/// `a * b / denominator` with the requested rounding. Operands must be non-negative.
pub fn mul_div(a: i128, b: i128, denominator: i128, rounding: Rounding) -> Result<i128, BondError> {
    if denominator == 0 {
        return Err(BondError::DivisionByZero);
    }
    let product = to_u256(a)?
        .checked_mul(to_u256(b)?)
        .ok_or(BondError::Overflow)?;
    let (quotient, remainder) = product.div_mod(to_u256(denominator)?);
    let quotient = match rounding {
        Rounding::Up if !remainder.is_zero() => quotient + U256::one(),
        _ => quotient,
    };
    to_i128(quotient)
}

/// `amount * ratio / WAD`.
#[inline]
pub fn wad_mul(amount: i128, ratio: i128, rounding: Rounding) -> Result<i128, BondError> {
    mul_div(amount, ratio, WAD, rounding)
}

/// `10^(18 - decimals)`: the number of share units per native unit of a token.
pub fn scale_factor(decimals: u32) -> Result<i128, BondError> {
    if decimals > SHARE_DECIMALS {
        return Err(BondError::DecimalsOverflow);
    }
    10_i128
        .checked_pow(SHARE_DECIMALS - decimals)
        .ok_or(BondError::Overflow)
}

/// Native token amount -> 18-decimal amount. Exact.
pub fn scale_up(amount: i128, from_decimals: u32) -> Result<i128, BondError> {
    if amount < 0 {
        return Err(BondError::InvalidAmount);
    }
    amount
        .checked_mul(scale_factor(from_decimals)?)
        .ok_or(BondError::Overflow)
}

/// 18-decimal amount -> native token amount, rounded as requested.
pub fn scale_down(amount: i128, to_decimals: u32, rounding: Rounding) -> Result<i128, BondError> {
    mul_div(amount, 1, scale_factor(to_decimals)?, rounding)
}

/// Checked `i128` addition.
#[inline]
pub fn add_i128(a: i128, b: i128) -> Result<i128, BondError> {
    a.checked_add(b).ok_or(BondError::Overflow)
}

/// Checked `i128` subtraction. Ledger balances never go negative, so a
/// negative result is reported as `Underflow`.
#[inline]
pub fn sub_i128(a: i128, b: i128) -> Result<i128, BondError> {
    match a.checked_sub(b) {
        Some(v) if v >= 0 => Ok(v),
        _ => Err(BondError::Underflow),
    }
}

/// `max(0, a - b)`.
#[inline]
#[must_use]
pub fn saturating_diff(a: i128, b: i128) -> i128 {
    if a > b {
        a - b
    } else {
        0
    }
}
