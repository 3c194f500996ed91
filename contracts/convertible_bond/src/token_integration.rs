//! External token movements.
//!
//! Every call here happens after the ledger has been written, so a token
//! contract observing the bond mid-call sees the committed state.

use bond_errors::BondError;
use soroban_sdk::token::TokenClient;
use soroban_sdk::{log, Address, Env};

fn token_client<'a>(e: &'a Env, token: &Address) -> TokenClient<'a> {
    TokenClient::new(e, token)
}

/// @notice Decimals reported by `token`.
pub fn decimals(e: &Env, token: &Address) -> u32 {
    token_client(e, token).decimals()
}

/// @notice Balance of `token` held by the bond contract.
pub fn contract_balance(e: &Env, token: &Address) -> i128 {
    token_client(e, token).balance(&e.current_contract_address())
}

/// @notice Checks that `owner` approved the bond contract for at least `amount`.
pub fn require_allowance(
    e: &Env,
    token: &Address,
    owner: &Address,
    amount: i128,
) -> Result<(), BondError> {
    if amount < 0 {
        return Err(BondError::InvalidAmount);
    }
    if amount == 0 {
        return Ok(());
    }
    let contract = e.current_contract_address();
    let allowance = token_client(e, token).allowance(owner, &contract);
    if allowance < amount {
        log!(e, "insufficient token allowance: {} < {}", allowance, amount);
        return Err(BondError::InsufficientAllowance);
    }
    Ok(())
}

/// @notice Pulls `amount` of `token` from `owner` into the bond contract.
/// @dev Requires prior approval for the bond contract as spender.
pub fn transfer_into_contract(
    e: &Env,
    token: &Address,
    owner: &Address,
    amount: i128,
) -> Result<(), BondError> {
    require_allowance(e, token, owner, amount)?;
    if amount == 0 {
        return Ok(());
    }
    let contract = e.current_contract_address();
    token_client(e, token).transfer_from(&contract, owner, &contract, &amount);
    Ok(())
}

/// @notice Sends `amount` of `token` from the bond contract to `recipient`.
pub fn transfer_from_contract(
    e: &Env,
    token: &Address,
    recipient: &Address,
    amount: i128,
) -> Result<(), BondError> {
    if amount < 0 {
        return Err(BondError::InvalidAmount);
    }
    if amount == 0 {
        return Ok(());
    }
    let contract = e.current_contract_address();
    token_client(e, token).transfer(&contract, recipient, &amount);
    Ok(())
}
