//! Redemption of shares after maturity or full repayment.
//!
//! Fully repaid: each share is worth its face value in the payment token.
//! Defaulted: each share is worth its exact pro-rata slice of whatever payment
//! and collateral the bond actually holds. Both portions round down, so the
//! per-share value of the remaining supply never decreases and the order in
//! which holders redeem does not matter.

use crate::lifecycle;
use crate::math::{self, Rounding};
use crate::types::{BondConfig, BondLedger, BondState, RedemptionPreview};
use bond_errors::BondError;

pub fn preview_redeem(
    config: &BondConfig,
    ledger: &BondLedger,
    now: u64,
    shares: i128,
) -> Result<RedemptionPreview, BondError> {
    if shares < 0 {
        return Err(BondError::InvalidAmount);
    }
    match lifecycle::state(config, ledger, now)? {
        BondState::Active => Ok(RedemptionPreview::default()),
        BondState::Paid | BondState::PaidEarly => Ok(RedemptionPreview {
            payment: math::scale_down(shares, config.payment_decimals, Rounding::Down)?,
            collateral: 0,
        }),
        BondState::Defaulted => {
            if ledger.total_supply == 0 {
                return Ok(RedemptionPreview::default());
            }
            Ok(RedemptionPreview {
                payment: math::mul_div(
                    shares,
                    ledger.payment_balance,
                    ledger.total_supply,
                    Rounding::Down,
                )?,
                collateral: math::mul_div(
                    shares,
                    ledger.collateral_balance,
                    ledger.total_supply,
                    Rounding::Down,
                )?,
            })
        }
    }
}

/// `(payout, ledger)` after redeeming `shares`.
pub fn plan_redeem(
    config: &BondConfig,
    ledger: &BondLedger,
    now: u64,
    shares: i128,
) -> Result<(RedemptionPreview, BondLedger), BondError> {
    let state = lifecycle::state(config, ledger, now)?;
    if !lifecycle::allows_redemption(state) {
        return Err(BondError::BondNotYetMaturedOrPaid);
    }
    let payout = preview_redeem(config, ledger, now, shares)?;
    if payout.is_zero() {
        return Err(BondError::ZeroAmount);
    }
    let next = BondLedger {
        total_supply: math::sub_i128(ledger.total_supply, shares)?,
        payment_balance: math::sub_i128(ledger.payment_balance, payout.payment)?,
        collateral_balance: math::sub_i128(ledger.collateral_balance, payout.collateral)?,
        ..*ledger
    };
    Ok((payout, lifecycle::settle(config, next, now)?))
}
