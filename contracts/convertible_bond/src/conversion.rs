//! Conversion of shares into collateral before maturity.

use crate::lifecycle;
use crate::math::{self, Rounding};
use crate::types::{BondConfig, BondLedger};
use bond_errors::BondError;

/// Collateral released for converting `shares`.
pub fn preview_convert(config: &BondConfig, shares: i128) -> Result<i128, BondError> {
    math::wad_mul(shares, config.convertible_ratio, Rounding::Down)
}

/// `(collateral, ledger)` after converting `shares`.
pub fn plan_convert(
    config: &BondConfig,
    ledger: &BondLedger,
    now: u64,
    shares: i128,
) -> Result<(i128, BondLedger), BondError> {
    if shares < 0 {
        return Err(BondError::InvalidAmount);
    }
    if shares == 0 || config.convertible_ratio == 0 {
        return Err(BondError::ZeroAmount);
    }
    if !lifecycle::allows_issuance(lifecycle::state(config, ledger, now)?) {
        return Err(BondError::BondPastMaturity);
    }
    let collateral = preview_convert(config, shares)?;
    let next = BondLedger {
        total_supply: math::sub_i128(ledger.total_supply, shares)?,
        collateral_balance: math::sub_i128(ledger.collateral_balance, collateral)?,
        ..*ledger
    };
    Ok((collateral, lifecycle::settle(config, next, now)?))
}
