//! Contract-level tests for repayment and excess payment withdrawal.

use crate::test_helpers::*;
use crate::{BondError, BondState};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, Env};

#[test]
fn test_amount_owed_after_mint() {
    let e = Env::default();
    let s = setup(&e);
    s.mint_full();
    assert_eq!(s.client.amount_owed(), FULL_PAYMENT);
    assert_eq!(s.client.amount_unpaid(), TARGET_SUPPLY);
    assert_eq!(s.client.amount_over_paid(), 0);
    assert!(!s.client.is_fully_paid());
}

#[test]
fn test_installments_then_remainder() {
    let e = Env::default();
    let s = setup(&e);
    s.mint_full();

    let installment = FULL_PAYMENT / 3;
    let mut owed = FULL_PAYMENT;
    for _ in 0..3 {
        owed = s.client.pay(&s.issuer, &installment);
        assert_eq!(s.client.state(), BondState::Active);
    }
    assert_eq!(owed, 2);
    assert_eq!(s.client.amount_owed(), 2);

    assert_eq!(s.client.pay(&s.issuer, &2), 0);
    assert_eq!(s.client.amount_owed(), 0);
    assert!(s.client.is_fully_paid());
    assert_eq!(s.client.state(), BondState::PaidEarly);
    assert_eq!(s.client.payment_balance(), FULL_PAYMENT);
    assert_eq!(s.client.total_payment_received(), FULL_PAYMENT);
    assert_eq!(s.payment.balance(&s.contract_id), FULL_PAYMENT);
}

#[test]
fn test_pay_zero_rejected() {
    let e = Env::default();
    let s = setup(&e);
    s.mint_full();
    assert_eq!(
        s.client.try_pay(&s.issuer, &0),
        Err(Ok(BondError::ZeroAmount))
    );
}

#[test]
fn test_pay_after_full_repayment_rejected() {
    let e = Env::default();
    let s = setup(&e);
    s.mint_full();
    s.pay_full();
    assert_eq!(
        s.client.try_pay(&s.issuer, &1),
        Err(Ok(BondError::PaymentMet))
    );
}

#[test]
fn test_pay_after_default_rejected() {
    let e = Env::default();
    let s = setup(&e);
    s.mint_full();
    set_time(&e, MATURITY);
    assert_eq!(s.client.state(), BondState::Defaulted);
    assert_eq!(
        s.client.try_pay(&s.issuer, &FULL_PAYMENT),
        Err(Ok(BondError::BondPastMaturity))
    );
}

#[test]
fn test_anyone_may_pay() {
    let e = Env::default();
    let s = setup(&e);
    s.mint_full();
    let payer = Address::generate(&e);
    s.fund_payer(&e, &payer, 1_000 * PAYMENT_UNIT);

    let owed = s.client.pay(&payer, &(1_000 * PAYMENT_UNIT));
    assert_eq!(owed, FULL_PAYMENT - 1_000 * PAYMENT_UNIT);
    assert_eq!(s.payment.balance(&payer), 0);
}

#[test]
fn test_pay_without_approval_rejected() {
    let e = Env::default();
    let s = setup(&e);
    s.mint_full();
    let payer = Address::generate(&e);
    assert_eq!(
        s.client.try_pay(&payer, &PAYMENT_UNIT),
        Err(Ok(BondError::InsufficientAllowance))
    );
    assert_eq!(s.client.payment_balance(), 0);
}

#[test]
fn test_overpayment_withdrawn() {
    let e = Env::default();
    let s = setup(&e);
    s.mint_full();
    s.client.pay(&s.issuer, &(FULL_PAYMENT + 500));

    assert_eq!(s.client.amount_over_paid(), 500);
    assert_eq!(s.client.preview_withdraw_payment(), 500);

    let receiver = Address::generate(&e);
    assert_eq!(s.client.withdraw_excess_payment(&s.issuer, &receiver), 500);
    assert_eq!(s.payment.balance(&receiver), 500);
    assert_eq!(s.client.payment_balance(), FULL_PAYMENT);
    assert_eq!(s.client.total_payment_received(), FULL_PAYMENT + 500);
    assert_eq!(s.client.state(), BondState::PaidEarly);
}

#[test]
fn test_withdraw_payment_with_nothing_excess() {
    let e = Env::default();
    let s = setup(&e);
    s.mint_full();
    s.pay_full();
    assert_eq!(
        s.client.try_withdraw_excess_payment(&s.issuer, &s.issuer),
        Err(Ok(BondError::ZeroAmount))
    );
}

#[test]
fn test_withdraw_payment_requires_role() {
    let e = Env::default();
    let s = setup(&e);
    s.mint_full();
    s.client.pay(&s.issuer, &(FULL_PAYMENT + 1));
    assert_eq!(
        s.client.try_withdraw_excess_payment(&s.holder, &s.holder),
        Err(Ok(BondError::MissingRole))
    );
}

#[test]
fn test_burn_after_repayment_frees_payment() {
    let e = Env::default();
    let s = setup(&e);
    s.mint_full();
    s.pay_full();
    s.client.burn(&s.issuer, &(10_000_000 * SHARE));
    assert_eq!(s.client.preview_withdraw_payment(), 10_000_000 * PAYMENT_UNIT);
}
