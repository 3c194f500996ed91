//! Tests for the pure collateral and payment accounting functions.
//!
//! These run against a 6-decimal payment token so the figures line up with a
//! typical stablecoin issuance.

use crate::collateral;
use crate::payment;
use crate::test_helpers::*;
use crate::types::{BondConfig, BondLedger, BondState};
use crate::{lifecycle, WAD};
use bond_errors::BondError;
use soroban_sdk::Env;

const USDC_DECIMALS: u32 = 6;
const USDC_UNIT: i128 = 1_000_000;
/// Full repayment of `TARGET_SUPPLY` in 6-decimal units.
const USDC_FULL: i128 = 50_000_000 * USDC_UNIT;

fn usdc_config(e: &Env) -> BondConfig {
    test_config(e, USDC_DECIMALS, COLLATERAL_RATIO, CONVERTIBLE_RATIO)
}

fn minted_ledger(config: &BondConfig) -> BondLedger {
    let (_, ledger) =
        collateral::plan_mint(config, &BondLedger::default(), START, TARGET_SUPPLY).unwrap();
    ledger
}

// ═══════════════════════════════════════════════════════════════════
// 1. Collateral requirement and minting
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_required_collateral_full_supply() {
    let e = Env::default();
    let config = usdc_config(&e);
    assert_eq!(
        collateral::required_collateral(&config, TARGET_SUPPLY),
        Ok(25_000_000 * WAD)
    );
}

#[test]
fn test_plan_mint_full_supply() {
    let e = Env::default();
    let config = usdc_config(&e);
    let (deposit, ledger) =
        collateral::plan_mint(&config, &BondLedger::default(), START, TARGET_SUPPLY).unwrap();
    assert_eq!(deposit, 25_000_000 * WAD);
    assert_eq!(ledger.total_supply, TARGET_SUPPLY);
    assert_eq!(ledger.collateral_balance, 25_000_000 * WAD);
    assert_eq!(ledger.payment_balance, 0);
}

#[test]
fn test_plan_mint_rejects_zero_and_negative() {
    let e = Env::default();
    let config = usdc_config(&e);
    let ledger = BondLedger::default();
    assert_eq!(
        collateral::plan_mint(&config, &ledger, START, 0),
        Err(BondError::ZeroAmount)
    );
    assert_eq!(
        collateral::plan_mint(&config, &ledger, START, -1),
        Err(BondError::InvalidAmount)
    );
}

#[test]
fn test_preview_mint_supply_cap() {
    let e = Env::default();
    let config = usdc_config(&e);
    let ledger = minted_ledger(&config);
    assert_eq!(
        collateral::preview_mint(&config, &ledger, START, 1),
        Err(BondError::BondSupplyExceeded)
    );
}

#[test]
fn test_preview_mint_after_maturity() {
    let e = Env::default();
    let config = usdc_config(&e);
    assert_eq!(
        collateral::preview_mint(&config, &BondLedger::default(), MATURITY, SHARE),
        Err(BondError::BondPastMaturity)
    );
}

#[test]
fn test_preview_mint_allowed_while_paid_early() {
    let e = Env::default();
    let config = usdc_config(&e);
    let half = TARGET_SUPPLY / 2;
    let (_, ledger) =
        collateral::plan_mint(&config, &BondLedger::default(), START, half).unwrap();
    let ledger = payment::plan_pay(&config, &ledger, START, USDC_FULL / 2).unwrap();
    assert_eq!(lifecycle::state(&config, &ledger, START), Ok(BondState::PaidEarly));
    assert_eq!(
        collateral::preview_mint(&config, &ledger, START, half),
        Ok(12_500_000 * WAD)
    );
}

// ═══════════════════════════════════════════════════════════════════
// 2. Excess collateral
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_no_excess_collateral_after_exact_mint() {
    let e = Env::default();
    let config = usdc_config(&e);
    let ledger = minted_ledger(&config);
    assert_eq!(
        collateral::preview_withdraw_collateral(&config, &ledger, START),
        Ok(0)
    );
    assert_eq!(
        collateral::plan_withdraw_collateral(&config, &ledger, START, 1),
        Err(BondError::InsufficientExcessCollateral)
    );
}

#[test]
fn test_burn_frees_collateral() {
    let e = Env::default();
    let config = usdc_config(&e);
    let ledger = minted_ledger(&config);
    let ledger = collateral::plan_burn(&config, &ledger, START, 10_000_000 * SHARE).unwrap();
    assert_eq!(
        collateral::preview_withdraw_collateral(&config, &ledger, START),
        Ok(5_000_000 * WAD)
    );
    let next =
        collateral::plan_withdraw_collateral(&config, &ledger, START, 5_000_000 * WAD).unwrap();
    assert_eq!(next.collateral_balance, 20_000_000 * WAD);
    assert_eq!(collateral::is_solvent(&config, &next), Ok(true));
}

#[test]
fn test_mint_burn_round_trip_returns_full_deposit() {
    let e = Env::default();
    let config = usdc_config(&e);
    let amount = 1_234_567 * SHARE + 89;
    let (deposit, ledger) =
        collateral::plan_mint(&config, &BondLedger::default(), START, amount).unwrap();
    let ledger = collateral::plan_burn(&config, &ledger, START, amount).unwrap();
    assert_eq!(
        collateral::preview_withdraw_collateral(&config, &ledger, START),
        Ok(deposit)
    );
}

#[test]
fn test_mint_deposit_rounds_up() {
    let e = Env::default();
    // A third is not exact in WAD: the floored requirement leaves a remainder.
    let config = test_config(&e, USDC_DECIMALS, WAD / 3, 0);
    let floor = collateral::required_collateral(&config, SHARE).unwrap();
    assert_eq!(floor, 333_333_333_333_333_333);
    assert_eq!(
        collateral::preview_mint(&config, &BondLedger::default(), START, SHARE),
        Ok(floor + 1)
    );

    // Two one-unit mints at half a unit each: a floored deposit would leave
    // the second one uncovered.
    let config = usdc_config(&e);
    let (first, ledger) =
        collateral::plan_mint(&config, &BondLedger::default(), START, 1).unwrap();
    let (second, ledger) = collateral::plan_mint(&config, &ledger, START, 1).unwrap();
    assert_eq!((first, second), (1, 1));
    assert_eq!(collateral::required_collateral(&config, 2), Ok(1));
    assert_eq!(collateral::is_solvent(&config, &ledger), Ok(true));
}

#[test]
fn test_reserve_never_exceeds_requirement() {
    let e = Env::default();
    let config = usdc_config(&e);
    let ledger = BondLedger {
        collateral_balance: 30_000_000 * WAD,
        ..minted_ledger(&config)
    };
    let required = collateral::required_collateral(&config, ledger.total_supply).unwrap();
    let reserve = collateral::convertible_reserve(&config, ledger.total_supply).unwrap();
    assert!(reserve <= required);
    assert_eq!(
        collateral::preview_withdraw_collateral(&config, &ledger, START),
        Ok(ledger.collateral_balance - required)
    );
}

#[test]
fn test_reserve_held_while_active() {
    let e = Env::default();
    // Convertible ratio equal to the collateral ratio: the reserve is binding.
    let config = test_config(&e, USDC_DECIMALS, COLLATERAL_RATIO, COLLATERAL_RATIO);
    let ledger = BondLedger {
        collateral_balance: 30_000_000 * WAD,
        ..minted_ledger(&config)
    };
    assert_eq!(
        collateral::convertible_reserve(&config, ledger.total_supply),
        Ok(25_000_000 * WAD)
    );
    assert_eq!(
        collateral::preview_withdraw_collateral(&config, &ledger, START),
        Ok(5_000_000 * WAD)
    );
}

#[test]
fn test_plan_withdraw_collateral_rejects_zero() {
    let e = Env::default();
    let config = usdc_config(&e);
    let ledger = BondLedger {
        collateral_balance: WAD,
        ..BondLedger::default()
    };
    assert_eq!(
        collateral::plan_withdraw_collateral(&config, &ledger, START, 0),
        Err(BondError::ZeroAmount)
    );
    assert_eq!(
        collateral::plan_withdraw_collateral(&config, &ledger, START, -5),
        Err(BondError::InvalidAmount)
    );
}

#[test]
fn test_plan_burn_more_than_supply_underflows() {
    let e = Env::default();
    let config = usdc_config(&e);
    let ledger = BondLedger {
        total_supply: SHARE,
        ..BondLedger::default()
    };
    assert_eq!(
        collateral::plan_burn(&config, &ledger, START, SHARE + 1),
        Err(BondError::Underflow)
    );
}

// ═══════════════════════════════════════════════════════════════════
// 3. Payment
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_three_installments_then_remainder() {
    let e = Env::default();
    let config = usdc_config(&e);
    let mut ledger = minted_ledger(&config);
    assert_eq!(payment::amount_owed(&config, &ledger), Ok(USDC_FULL));

    let installment = USDC_FULL / 3;
    for _ in 0..3 {
        ledger = payment::plan_pay(&config, &ledger, START, installment).unwrap();
        assert_eq!(
            lifecycle::state(&config, &ledger, START),
            Ok(BondState::Active)
        );
    }
    assert_eq!(payment::amount_owed(&config, &ledger), Ok(2));

    ledger = payment::plan_pay(&config, &ledger, START, 2).unwrap();
    assert_eq!(payment::amount_owed(&config, &ledger), Ok(0));
    assert_eq!(payment::is_fully_paid(&config, &ledger), Ok(true));
    assert_eq!(ledger.total_payment_received, USDC_FULL);
    assert_eq!(
        payment::plan_pay(&config, &ledger, START, 1),
        Err(BondError::PaymentMet)
    );
}

#[test]
fn test_amount_owed_rounds_up() {
    let e = Env::default();
    let config = usdc_config(&e);
    // A single share unit is 10^-12 of a payment unit.
    let ledger = BondLedger {
        total_supply: 1,
        ..BondLedger::default()
    };
    assert_eq!(payment::amount_owed(&config, &ledger), Ok(1));
    assert_eq!(payment::amount_unpaid(&config, &ledger), Ok(1));
}

#[test]
fn test_amount_unpaid_in_share_units() {
    let e = Env::default();
    let config = usdc_config(&e);
    let ledger = payment::plan_pay(&config, &minted_ledger(&config), START, USDC_FULL / 2).unwrap();
    assert_eq!(payment::amount_unpaid(&config, &ledger), Ok(25_000_000 * SHARE));
    assert_eq!(payment::amount_owed(&config, &ledger), Ok(USDC_FULL / 2));
}

#[test]
fn test_pay_rejections() {
    let e = Env::default();
    let config = usdc_config(&e);
    let ledger = minted_ledger(&config);
    assert_eq!(
        payment::plan_pay(&config, &ledger, START, 0),
        Err(BondError::ZeroAmount)
    );
    assert_eq!(
        payment::plan_pay(&config, &ledger, START, -1),
        Err(BondError::InvalidAmount)
    );
    assert_eq!(
        payment::plan_pay(&config, &ledger, MATURITY, USDC_UNIT),
        Err(BondError::BondPastMaturity)
    );
}

#[test]
fn test_pay_on_empty_bond_is_met() {
    let e = Env::default();
    let config = usdc_config(&e);
    assert_eq!(
        payment::plan_pay(&config, &BondLedger::default(), START, USDC_UNIT),
        Err(BondError::PaymentMet)
    );
}

#[test]
fn test_overpayment_is_withdrawable() {
    let e = Env::default();
    let config = usdc_config(&e);
    let ledger =
        payment::plan_pay(&config, &minted_ledger(&config), START, USDC_FULL + 100).unwrap();
    assert_eq!(payment::amount_over_paid(&config, &ledger), Ok(100));
    assert_eq!(payment::preview_withdraw_payment(&config, &ledger), Ok(100));

    let (amount, next) = payment::plan_withdraw_payment(&config, &ledger).unwrap();
    assert_eq!(amount, 100);
    assert_eq!(next.payment_balance, USDC_FULL);
    assert_eq!(next.total_payment_received, USDC_FULL + 100);
    assert_eq!(
        payment::plan_withdraw_payment(&config, &next),
        Err(BondError::ZeroAmount)
    );
}

#[test]
fn test_burn_after_full_payment_creates_overpayment() {
    let e = Env::default();
    let config = usdc_config(&e);
    let ledger = payment::plan_pay(&config, &minted_ledger(&config), START, USDC_FULL).unwrap();
    let ledger = collateral::plan_burn(&config, &ledger, START, 10_000_000 * SHARE).unwrap();
    assert_eq!(
        payment::amount_over_paid(&config, &ledger),
        Ok(10_000_000 * USDC_UNIT)
    );
    assert!(ledger.total_payment_received >= ledger.payment_balance);
}
