//! Audit events. Off-chain observers consume these; nothing in the contract
//! reads them back.

use crate::types::{BondConfig, RedemptionPreview, Role};
use soroban_sdk::{Address, Env, Symbol};

/// Emitted once, when the bond is created.
///
/// # Topics
/// * `Symbol` - "bond_created"
/// * `Address` - The issuer
///
/// # Data
/// * `u64` - Maturity timestamp
/// * `Address` - Payment token
/// * `Address` - Collateral token
/// * `i128` - Collateral ratio (WAD)
/// * `i128` - Convertible ratio (WAD)
/// * `i128` - Maximum share supply
pub fn emit_bond_created(e: &Env, config: &BondConfig) {
    let topics = (Symbol::new(e, "bond_created"), config.issuer.clone());
    let data = (
        config.maturity,
        config.payment_token.clone(),
        config.collateral_token.clone(),
        config.collateral_ratio,
        config.convertible_ratio,
        config.max_supply,
    );
    e.events().publish(topics, data);
}

/// Emitted when shares are minted against deposited collateral.
///
/// # Topics
/// * `Symbol` - "mint"
/// * `Address` - The minter (receives the shares)
///
/// # Data
/// * `i128` - Shares minted
/// * `i128` - Collateral deposited
/// * `Address` - Collateral token
pub fn emit_mint(e: &Env, minter: &Address, shares: i128, collateral: i128, token: &Address) {
    let topics = (Symbol::new(e, "mint"), minter.clone());
    e.events()
        .publish(topics, (shares, collateral, token.clone()));
}

/// Emitted when a holder forfeits shares.
///
/// # Topics
/// * `Symbol` - "burn"
/// * `Address` - The holder whose shares were burned
///
/// # Data
/// * `i128` - Shares burned
pub fn emit_burn(e: &Env, holder: &Address, shares: i128) {
    let topics = (Symbol::new(e, "burn"), holder.clone());
    e.events().publish(topics, shares);
}

/// Emitted for every accepted payment.
///
/// # Topics
/// * `Symbol` - "payment"
/// * `Address` - The payer
///
/// # Data
/// * `i128` - Amount paid
/// * `i128` - Amount still owed afterwards
/// * `Address` - Payment token
pub fn emit_payment(e: &Env, payer: &Address, amount: i128, owed: i128, token: &Address) {
    let topics = (Symbol::new(e, "payment"), payer.clone());
    e.events().publish(topics, (amount, owed, token.clone()));
}

/// Emitted by the payment that brings the amount owed to zero.
///
/// # Topics
/// * `Symbol` - "payment_in_full"
/// * `Address` - The payer
///
/// # Data
/// * `i128` - Total payment ever received
/// * `Address` - Payment token
pub fn emit_payment_in_full(e: &Env, payer: &Address, total_received: i128, token: &Address) {
    let topics = (Symbol::new(e, "payment_in_full"), payer.clone());
    e.events().publish(topics, (total_received, token.clone()));
}

/// Emitted when shares are converted into collateral.
///
/// # Topics
/// * `Symbol` - "convert"
/// * `Address` - The converting holder
///
/// # Data
/// * `i128` - Shares converted
/// * `i128` - Collateral released
/// * `Address` - Collateral token
pub fn emit_convert(e: &Env, holder: &Address, shares: i128, collateral: i128, token: &Address) {
    let topics = (Symbol::new(e, "convert"), holder.clone());
    e.events()
        .publish(topics, (shares, collateral, token.clone()));
}

/// Emitted when shares are redeemed.
///
/// # Topics
/// * `Symbol` - "redeem"
/// * `Address` - The redeeming holder
///
/// # Data
/// * `i128` - Shares redeemed
/// * `i128` - Payment token paid out
/// * `i128` - Collateral paid out
/// * `Address` - Payment token
/// * `Address` - Collateral token
pub fn emit_redeem(
    e: &Env,
    holder: &Address,
    shares: i128,
    payout: &RedemptionPreview,
    config: &BondConfig,
) {
    let topics = (Symbol::new(e, "redeem"), holder.clone());
    let data = (
        shares,
        payout.payment,
        payout.collateral,
        config.payment_token.clone(),
        config.collateral_token.clone(),
    );
    e.events().publish(topics, data);
}

/// Emitted when the issuer withdraws excess collateral.
///
/// # Topics
/// * `Symbol` - "collateral_withdraw"
/// * `Address` - The withdrawing account
///
/// # Data
/// * `Address` - Receiver
/// * `i128` - Amount withdrawn
/// * `Address` - Collateral token
pub fn emit_collateral_withdraw(
    e: &Env,
    caller: &Address,
    receiver: &Address,
    amount: i128,
    token: &Address,
) {
    let topics = (Symbol::new(e, "collateral_withdraw"), caller.clone());
    e.events()
        .publish(topics, (receiver.clone(), amount, token.clone()));
}

/// Emitted when the issuer reclaims overpayment.
///
/// # Topics
/// * `Symbol` - "payment_withdraw"
/// * `Address` - The withdrawing account
///
/// # Data
/// * `Address` - Receiver
/// * `i128` - Amount withdrawn
/// * `Address` - Payment token
pub fn emit_payment_withdraw(
    e: &Env,
    caller: &Address,
    receiver: &Address,
    amount: i128,
    token: &Address,
) {
    let topics = (Symbol::new(e, "payment_withdraw"), caller.clone());
    e.events()
        .publish(topics, (receiver.clone(), amount, token.clone()));
}

/// Emitted when a stray token is swept out of the bond.
///
/// # Topics
/// * `Symbol` - "token_sweep"
/// * `Address` - The admin performing the sweep
///
/// # Data
/// * `Address` - Swept token
/// * `Address` - Receiver
/// * `i128` - Amount swept
pub fn emit_token_sweep(e: &Env, caller: &Address, token: &Address, receiver: &Address, amount: i128) {
    let topics = (Symbol::new(e, "token_sweep"), caller.clone());
    e.events()
        .publish(topics, (token.clone(), receiver.clone(), amount));
}

/// Share transfer between holders.
pub fn emit_transfer(e: &Env, from: &Address, to: &Address, amount: i128) {
    let topics = (Symbol::new(e, "transfer"), from.clone(), to.clone());
    e.events().publish(topics, amount);
}

/// Share allowance set.
pub fn emit_approve(e: &Env, owner: &Address, spender: &Address, amount: i128) {
    let topics = (Symbol::new(e, "approve"), owner.clone(), spender.clone());
    e.events().publish(topics, amount);
}

pub fn emit_role_granted(e: &Env, admin: &Address, account: &Address, role: Role) {
    let topics = (Symbol::new(e, "role_granted"), admin.clone());
    e.events().publish(topics, (account.clone(), role));
}

pub fn emit_role_revoked(e: &Env, admin: &Address, account: &Address, role: Role) {
    let topics = (Symbol::new(e, "role_revoked"), admin.clone());
    e.events().publish(topics, (account.clone(), role));
}
