//! Payment accounting.
//!
//! Full repayment of a supply `s` (18 decimals) is `ceil(s / 10^(18 - d))`
//! payment-token units, `d` being the payment token's decimals. Rounding up
//! means the issuer can never leave a fraction of a unit unpaid.

use crate::lifecycle;
use crate::math::{self, Rounding};
use crate::types::{BondConfig, BondLedger, BondState};
use bond_errors::BondError;

/// Payment-token units equivalent to `supply` shares.
pub fn supply_in_payment_units(
    config: &BondConfig,
    supply: i128,
    rounding: Rounding,
) -> Result<i128, BondError> {
    math::scale_down(supply, config.payment_decimals, rounding)
}

/// What the issuer must still pay for full repayment, in payment-token units.
pub fn amount_owed(config: &BondConfig, ledger: &BondLedger) -> Result<i128, BondError> {
    let full = supply_in_payment_units(config, ledger.total_supply, Rounding::Up)?;
    Ok(math::saturating_diff(full, ledger.payment_balance))
}

/// Shares not yet covered by payment, in share units (18 decimals).
pub fn amount_unpaid(config: &BondConfig, ledger: &BondLedger) -> Result<i128, BondError> {
    let covered = math::scale_up(ledger.payment_balance, config.payment_decimals)?;
    Ok(math::saturating_diff(ledger.total_supply, covered))
}

/// Payment held beyond what full repayment of the current supply requires.
pub fn amount_over_paid(config: &BondConfig, ledger: &BondLedger) -> Result<i128, BondError> {
    let full = supply_in_payment_units(config, ledger.total_supply, Rounding::Up)?;
    Ok(math::saturating_diff(ledger.payment_balance, full))
}

pub fn is_fully_paid(config: &BondConfig, ledger: &BondLedger) -> Result<bool, BondError> {
    Ok(amount_owed(config, ledger)? == 0)
}

/// Ledger after receiving `amount` of payment.
///
/// Payments are accepted only while something is owed and before maturity;
/// a default is final so that redemptions stay order-independent.
pub fn plan_pay(
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
    match lifecycle::state(config, ledger, now)? {
        BondState::PaidEarly | BondState::Paid => return Err(BondError::PaymentMet),
        BondState::Defaulted => return Err(BondError::BondPastMaturity),
        BondState::Active => {}
    }
    let next = BondLedger {
        payment_balance: math::add_i128(ledger.payment_balance, amount)?,
        total_payment_received: math::add_i128(ledger.total_payment_received, amount)?,
        ..*ledger
    };
    lifecycle::settle(config, next, now)
}

/// Excess payment the issuer may reclaim.
#[inline]
pub fn preview_withdraw_payment(
    config: &BondConfig,
    ledger: &BondLedger,
) -> Result<i128, BondError> {
    amount_over_paid(config, ledger)
}

/// `(amount, ledger)` after the issuer reclaims all excess payment.
pub fn plan_withdraw_payment(
    config: &BondConfig,
    ledger: &BondLedger,
) -> Result<(i128, BondLedger), BondError> {
    let amount = preview_withdraw_payment(config, ledger)?;
    if amount == 0 {
        return Err(BondError::ZeroAmount);
    }
    let next = BondLedger {
        payment_balance: math::sub_i128(ledger.payment_balance, amount)?,
        ..*ledger
    };
    Ok((amount, next))
}
