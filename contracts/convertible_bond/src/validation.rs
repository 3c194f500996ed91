//! Creation-time validation.
//!
//! A bond whose parameters fail here is never stored.
//!
//! ## Constraints
//! - `0 <= convertible_ratio <= collateral_ratio`
//! - `max_supply > 0`
//! - `maturity` strictly after the creation timestamp
//! - collateral and payment tokens differ
//! - payment token decimals `<= 18`

use crate::math::SHARE_DECIMALS;
use crate::types::BondParams;
use bond_errors::BondError;

/// Validate ratio configuration.
///
/// # Errors
/// * `InvalidRatio` if either ratio is negative or `convertible_ratio > collateral_ratio`
pub fn validate_ratios(collateral_ratio: i128, convertible_ratio: i128) -> Result<(), BondError> {
    if collateral_ratio < 0 || convertible_ratio < 0 {
        return Err(BondError::InvalidRatio);
    }
    if convertible_ratio > collateral_ratio {
        return Err(BondError::InvalidRatio);
    }
    Ok(())
}

/// # Errors
/// * `DecimalsOverflow` if the token has more decimals than the share token
pub fn validate_payment_decimals(decimals: u32) -> Result<(), BondError> {
    if decimals > SHARE_DECIMALS {
        return Err(BondError::DecimalsOverflow);
    }
    Ok(())
}

pub fn validate_params(params: &BondParams, now: u64) -> Result<(), BondError> {
    validate_ratios(params.collateral_ratio, params.convertible_ratio)?;
    if params.max_supply <= 0 {
        return Err(BondError::InvalidAmount);
    }
    if params.maturity <= now {
        return Err(BondError::InvalidMaturity);
    }
    if params.payment_token == params.collateral_token {
        return Err(BondError::InvalidTokenPair);
    }
    Ok(())
}
