//! Share balances and allowances.
//!
//! Total supply lives in the `BondLedger`; every balance change here is paired
//! with a ledger supply change by the caller, so the sum of balances always
//! equals `total_supply`.

use crate::math;
use crate::storage;
use bond_errors::BondError;
use soroban_sdk::{log, Address, Env};

fn require_non_negative(amount: i128) -> Result<(), BondError> {
    if amount < 0 {
        return Err(BondError::InvalidAmount);
    }
    Ok(())
}

pub fn balance(e: &Env, holder: &Address) -> i128 {
    storage::read_balance(e, holder)
}

pub fn require_balance(e: &Env, holder: &Address, amount: i128) -> Result<(), BondError> {
    require_non_negative(amount)?;
    let held = balance(e, holder);
    if held < amount {
        log!(e, "insufficient shares: {} < {}", held, amount);
        return Err(BondError::InsufficientBalance);
    }
    Ok(())
}

pub fn mint_shares(e: &Env, to: &Address, amount: i128) -> Result<(), BondError> {
    require_non_negative(amount)?;
    let next = math::add_i128(balance(e, to), amount)?;
    storage::write_balance(e, to, next);
    Ok(())
}

pub fn burn_shares(e: &Env, from: &Address, amount: i128) -> Result<(), BondError> {
    require_balance(e, from, amount)?;
    let next = math::sub_i128(balance(e, from), amount)?;
    storage::write_balance(e, from, next);
    Ok(())
}

pub fn move_shares(e: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), BondError> {
    require_balance(e, from, amount)?;
    if from == to || amount == 0 {
        return Ok(());
    }
    burn_shares(e, from, amount)?;
    mint_shares(e, to, amount)
}

pub fn allowance(e: &Env, owner: &Address, spender: &Address) -> i128 {
    storage::read_allowance(e, owner, spender)
}

pub fn approve(e: &Env, owner: &Address, spender: &Address, amount: i128) -> Result<(), BondError> {
    require_non_negative(amount)?;
    storage::write_allowance(e, owner, spender, amount);
    Ok(())
}

pub fn spend_allowance(
    e: &Env,
    owner: &Address,
    spender: &Address,
    amount: i128,
) -> Result<(), BondError> {
    require_non_negative(amount)?;
    let current = allowance(e, owner, spender);
    if current < amount {
        log!(e, "insufficient allowance: {} < {}", current, amount);
        return Err(BondError::InsufficientAllowance);
    }
    storage::write_allowance(e, owner, spender, current - amount);
    Ok(())
}
