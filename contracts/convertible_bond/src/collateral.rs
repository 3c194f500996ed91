//! Collateral accounting.
//!
//! The issuer deposits `ceil(shares * collateral_ratio / WAD)` collateral per
//! mint and may take back only what exceeds the backing of the current supply.
//! The requirement itself rounds down, so a mint on top of existing supply can
//! never leave the bond one unit short.
//! While the bond is `Active` the convertible reserve is held as well; once
//! nothing is owed, or after maturity, conversion is moot and the reserve drops
//! to zero.

use crate::lifecycle;
use crate::math::{self, Rounding};
use crate::types::{BondConfig, BondLedger, BondState};
use bond_errors::BondError;

/// Collateral backing `supply` shares at the configured ratio.
#[inline]
pub fn required_collateral(config: &BondConfig, supply: i128) -> Result<i128, BondError> {
    math::wad_mul(supply, config.collateral_ratio, Rounding::Down)
}

/// Collateral that converting all of `supply` would release.
#[inline]
pub fn convertible_reserve(config: &BondConfig, supply: i128) -> Result<i128, BondError> {
    math::wad_mul(supply, config.convertible_ratio, Rounding::Down)
}

/// Collateral the issuer must deposit to mint `amount` shares.
pub fn preview_mint(
    config: &BondConfig,
    ledger: &BondLedger,
    now: u64,
    amount: i128,
) -> Result<i128, BondError> {
    if amount < 0 {
        return Err(BondError::InvalidAmount);
    }
    if !lifecycle::allows_issuance(lifecycle::state(config, ledger, now)?) {
        return Err(BondError::BondPastMaturity);
    }
    let new_supply = math::add_i128(ledger.total_supply, amount)?;
    if new_supply > config.max_supply {
        return Err(BondError::BondSupplyExceeded);
    }
    math::wad_mul(amount, config.collateral_ratio, Rounding::Up)
}

/// `(collateral, ledger)` after minting `amount` shares.
pub fn plan_mint(
    config: &BondConfig,
    ledger: &BondLedger,
    now: u64,
    amount: i128,
) -> Result<(i128, BondLedger), BondError> {
    if amount == 0 {
        return Err(BondError::ZeroAmount);
    }
    let collateral = preview_mint(config, ledger, now, amount)?;
    let next = BondLedger {
        total_supply: math::add_i128(ledger.total_supply, amount)?,
        collateral_balance: math::add_i128(ledger.collateral_balance, collateral)?,
        ..*ledger
    };
    Ok((collateral, lifecycle::settle(config, next, now)?))
}

/// Collateral the issuer may withdraw right now.
pub fn preview_withdraw_collateral(
    config: &BondConfig,
    ledger: &BondLedger,
    now: u64,
) -> Result<i128, BondError> {
    let required = required_collateral(config, ledger.total_supply)?;
    // `reserve <= required` for every config that passed `validate_ratios`.
    let reserve = match lifecycle::state(config, ledger, now)? {
        BondState::Active => convertible_reserve(config, ledger.total_supply)?,
        _ => 0,
    };
    Ok(math::saturating_diff(
        ledger.collateral_balance,
        required.max(reserve),
    ))
}

/// Ledger after the issuer withdraws `amount` collateral.
pub fn plan_withdraw_collateral(
    config: &BondConfig,
    ledger: &BondLedger,
    now: u64,
    amount: i128,
) -> Result<BondLedger, BondError> {
    if amount < 0 {
        return Err(BondError::InvalidAmount);
    }
    if amount == 0 {
        return Err(BondError::ZeroAmount);
    }
    if amount > preview_withdraw_collateral(config, ledger, now)? {
        return Err(BondError::InsufficientExcessCollateral);
    }
    Ok(BondLedger {
        collateral_balance: math::sub_i128(ledger.collateral_balance, amount)?,
        ..*ledger
    })
}

/// Ledger after `shares` are burned without any token movement.
pub fn plan_burn(
    config: &BondConfig,
    ledger: &BondLedger,
    now: u64,
    shares: i128,
) -> Result<BondLedger, BondError> {
    if shares < 0 {
        return Err(BondError::InvalidAmount);
    }
    if shares == 0 {
        return Err(BondError::ZeroAmount);
    }
    let next = BondLedger {
        total_supply: math::sub_i128(ledger.total_supply, shares)?,
        ..*ledger
    };
    lifecycle::settle(config, next, now)
}

/// Invariant: held collateral covers the current supply.
pub fn is_solvent(config: &BondConfig, ledger: &BondLedger) -> Result<bool, BondError> {
    Ok(ledger.collateral_balance >= required_collateral(config, ledger.total_supply)?)
}
