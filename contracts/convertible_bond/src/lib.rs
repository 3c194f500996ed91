//! Convertible Bond Contract
//!
//! One deployed instance is one bond: shares backed by a collateral token,
//! repayable in a payment token, optionally convertible into collateral before
//! maturity, and redeemable after maturity or full repayment.
//!
//! ## Key design decisions
//!
//! - **Immutable configuration**: everything is fixed by `__constructor`; there
//!   is no setter for any bond parameter.
//! - **Derived lifecycle**: the state (`Active`, `PaidEarly`, `Paid`,
//!   `Defaulted`) is computed from the clock and the ledger on every call. At
//!   maturity the repayment status freezes, so a default is final.
//! - **Preview = effect**: each mutating call runs the same pure `plan_*`
//!   function that backs its `preview_*` query.
//! - **Checks-Effects-Interactions**: the ledger is written before any token
//!   transfer, inside a per-instance mutation lock.
//! - **Protocol-favouring rounding**: payouts round down, amounts owed round up.

#![no_std]

mod access_control;
mod collateral;
mod conversion;
mod events;
mod lifecycle;
mod math;
mod payment;
mod redemption;
mod share_token;
mod storage;
mod token_integration;
mod types;
mod validation;

pub use bond_errors::{BondError, ErrorCategory, ErrorExt};
pub use math::WAD;
pub use types::{BondConfig, BondLedger, BondParams, BondState, RedemptionPreview, Role};

use soroban_sdk::{contract, contractimpl, panic_with_error, Address, Env, String};


#[cfg(test)]
mod test_accounting;
#[cfg(test)]
mod test_payment;

// ─── Helpers ───────────────────────────────────────────────────────────────

/// Consistent view of the bond for one call.
struct Snapshot {
    config: BondConfig,
    ledger: BondLedger,
    now: u64,
}

fn snapshot(e: &Env) -> Result<Snapshot, BondError> {
    Ok(Snapshot {
        config: storage::read_config(e)?,
        ledger: storage::read_ledger(e),
        now: e.ledger().timestamp(),
    })
}

/// Runs `f` under the instance mutation lock.
fn with_reentrancy_guard<T, F>(e: &Env, f: F) -> Result<T, BondError>
where
    F: FnOnce() -> Result<T, BondError>,
{
    if storage::is_locked(e) {
        return Err(BondError::ReentrancyDetected);
    }
    storage::set_locked(e, true);
    let result = f();
    storage::set_locked(e, false);
    storage::bump_instance(e);
    result
}

fn build_config(e: &Env, issuer: Address, params: BondParams) -> Result<BondConfig, BondError> {
    validation::validate_params(&params, e.ledger().timestamp())?;
    let payment_decimals = token_integration::decimals(e, &params.payment_token);
    validation::validate_payment_decimals(payment_decimals)?;
    Ok(BondConfig {
        issuer,
        name: params.name,
        symbol: params.symbol,
        maturity: params.maturity,
        payment_token: params.payment_token,
        payment_decimals,
        collateral_token: params.collateral_token,
        collateral_ratio: params.collateral_ratio,
        convertible_ratio: params.convertible_ratio,
        max_supply: params.max_supply,
    })
}

fn forfeit_shares(e: &Env, holder: &Address, amount: i128) -> Result<(), BondError> {
    share_token::require_balance(e, holder, amount)?;
    let s = snapshot(e)?;
    let next = collateral::plan_burn(&s.config, &s.ledger, s.now, amount)?;
    share_token::burn_shares(e, holder, amount)?;
    storage::write_ledger(e, &next);
    events::emit_burn(e, holder, amount);
    Ok(())
}

// ─── Contract ──────────────────────────────────────────────────────────────

#[contract]
pub struct ConvertibleBond;

#[contractimpl]
impl ConvertibleBond {
    // ── Creation ───────────────────────────────────────────────────────────

    /// Create the bond. `issuer` receives the admin, mint and withdraw roles.
    ///
    /// Fails the deployment on any configuration error: `InvalidRatio`,
    /// `InvalidAmount` (cap), `InvalidMaturity`, `InvalidTokenPair`,
    /// `DecimalsOverflow`.
    pub fn __constructor(e: Env, issuer: Address, params: BondParams) {
        let config =
            build_config(&e, issuer, params).unwrap_or_else(|err| panic_with_error!(&e, err));
        storage::write_config(&e, &config);
        let ledger = lifecycle::settle(&config, BondLedger::default(), e.ledger().timestamp())
            .unwrap_or_else(|err| panic_with_error!(&e, err));
        storage::write_ledger(&e, &ledger);
        access_control::grant_issuer_roles(&e, &config.issuer);
        storage::bump_instance(&e);
        events::emit_bond_created(&e, &config);
    }

    // ── Roles ──────────────────────────────────────────────────────────────

    /// Grant `role` to `account`. Admin only. Returns false if already held.
    pub fn grant_role(
        e: Env,
        admin: Address,
        account: Address,
        role: Role,
    ) -> Result<bool, BondError> {
        with_reentrancy_guard(&e, || {
            access_control::grant_role(&e, &admin, &account, role)
        })
    }

    /// Revoke `role` from `account`. Admin only. Returns false if not held.
    pub fn revoke_role(
        e: Env,
        admin: Address,
        account: Address,
        role: Role,
    ) -> Result<bool, BondError> {
        with_reentrancy_guard(&e, || {
            access_control::revoke_role(&e, &admin, &account, role)
        })
    }

    pub fn has_role(e: Env, account: Address, role: Role) -> bool {
        access_control::has_role(&e, &account, role)
    }

    // ── Issuance ───────────────────────────────────────────────────────────

    /// Mint `amount` shares to `minter` against a collateral deposit of
    /// `preview_mint(amount)`, pulled from `minter` (prior approval required).
    ///
    /// # Errors
    /// * `MissingRole` - `minter` lacks `Role::Mint`
    /// * `ZeroAmount`, `BondPastMaturity`, `BondSupplyExceeded`
    /// * `InsufficientAllowance` - collateral not approved
    pub fn mint(e: Env, minter: Address, amount: i128) -> Result<i128, BondError> {
        with_reentrancy_guard(&e, || {
            access_control::authorize(&e, &minter, Role::Mint)?;
            let s = snapshot(&e)?;
            let (collateral, next) = collateral::plan_mint(&s.config, &s.ledger, s.now, amount)?;

            share_token::mint_shares(&e, &minter, amount)?;
            storage::write_ledger(&e, &next);

            token_integration::transfer_into_contract(
                &e,
                &s.config.collateral_token,
                &minter,
                collateral,
            )?;
            events::emit_mint(&e, &minter, amount, collateral, &s.config.collateral_token);
            Ok(collateral)
        })
    }

    /// Forfeit `amount` of `from`'s shares. No tokens move; the backing
    /// requirement shrinks accordingly.
    pub fn burn(e: Env, from: Address, amount: i128) -> Result<(), BondError> {
        from.require_auth();
        with_reentrancy_guard(&e, || forfeit_shares(&e, &from, amount))
    }

    /// Burn `amount` of `from`'s shares using `spender`'s allowance.
    pub fn burn_from(e: Env, spender: Address, from: Address, amount: i128) -> Result<(), BondError> {
        spender.require_auth();
        with_reentrancy_guard(&e, || {
            share_token::spend_allowance(&e, &from, &spender, amount)?;
            forfeit_shares(&e, &from, amount)
        })
    }

    // ── Repayment ──────────────────────────────────────────────────────────

    /// Pay `amount` of the payment token into the bond. Anyone may pay.
    /// Returns the amount still owed afterwards.
    ///
    /// # Errors
    /// * `ZeroAmount` - `amount == 0`
    /// * `PaymentMet` - nothing is owed
    /// * `BondPastMaturity` - bond matured unpaid
    pub fn pay(e: Env, payer: Address, amount: i128) -> Result<i128, BondError> {
        payer.require_auth();
        with_reentrancy_guard(&e, || {
            let s = snapshot(&e)?;
            let next = payment::plan_pay(&s.config, &s.ledger, s.now, amount)?;
            let owed = payment::amount_owed(&s.config, &next)?;

            storage::write_ledger(&e, &next);

            token_integration::transfer_into_contract(
                &e,
                &s.config.payment_token,
                &payer,
                amount,
            )?;
            events::emit_payment(&e, &payer, amount, owed, &s.config.payment_token);
            if owed == 0 {
                events::emit_payment_in_full(
                    &e,
                    &payer,
                    next.total_payment_received,
                    &s.config.payment_token,
                );
            }
            Ok(owed)
        })
    }

    // ── Conversion / redemption ────────────────────────────────────────────

    /// Convert `shares` into `preview_convert(shares)` collateral. Only before
    /// maturity and only for convertible bonds.
    pub fn convert(e: Env, holder: Address, shares: i128) -> Result<i128, BondError> {
        holder.require_auth();
        with_reentrancy_guard(&e, || {
            share_token::require_balance(&e, &holder, shares)?;
            let s = snapshot(&e)?;
            let (collateral, next) =
                conversion::plan_convert(&s.config, &s.ledger, s.now, shares)?;

            share_token::burn_shares(&e, &holder, shares)?;
            storage::write_ledger(&e, &next);

            token_integration::transfer_from_contract(
                &e,
                &s.config.collateral_token,
                &holder,
                collateral,
            )?;
            events::emit_convert(&e, &holder, shares, collateral, &s.config.collateral_token);
            Ok(collateral)
        })
    }

    /// Redeem `shares` for their payment and collateral portions.
    ///
    /// # Errors
    /// * `BondNotYetMaturedOrPaid` - bond is still `Active`
    /// * `InsufficientBalance` - holder has fewer shares
    /// * `ZeroAmount` - computed payout is zero
    pub fn redeem(e: Env, holder: Address, shares: i128) -> Result<RedemptionPreview, BondError> {
        holder.require_auth();
        with_reentrancy_guard(&e, || {
            let s = snapshot(&e)?;
            if !lifecycle::allows_redemption(lifecycle::state(&s.config, &s.ledger, s.now)?) {
                return Err(BondError::BondNotYetMaturedOrPaid);
            }
            share_token::require_balance(&e, &holder, shares)?;
            let (payout, next) = redemption::plan_redeem(&s.config, &s.ledger, s.now, shares)?;

            share_token::burn_shares(&e, &holder, shares)?;
            storage::write_ledger(&e, &next);

            token_integration::transfer_from_contract(
                &e,
                &s.config.payment_token,
                &holder,
                payout.payment,
            )?;
            token_integration::transfer_from_contract(
                &e,
                &s.config.collateral_token,
                &holder,
                payout.collateral,
            )?;
            events::emit_redeem(&e, &holder, shares, &payout, &s.config);
            Ok(payout)
        })
    }

    // ── Issuer withdrawals ─────────────────────────────────────────────────

    /// Withdraw `amount` of excess collateral to `receiver`.
    ///
    /// # Errors
    /// * `MissingRole` - `caller` lacks `Role::Withdraw`
    /// * `ZeroAmount`
    /// * `InsufficientExcessCollateral` - `amount > preview_withdraw_collateral()`
    pub fn withdraw_excess_collateral(
        e: Env,
        caller: Address,
        amount: i128,
        receiver: Address,
    ) -> Result<(), BondError> {
        with_reentrancy_guard(&e, || {
            access_control::authorize(&e, &caller, Role::Withdraw)?;
            let s = snapshot(&e)?;
            let next = collateral::plan_withdraw_collateral(&s.config, &s.ledger, s.now, amount)?;

            storage::write_ledger(&e, &next);

            token_integration::transfer_from_contract(
                &e,
                &s.config.collateral_token,
                &receiver,
                amount,
            )?;
            events::emit_collateral_withdraw(
                &e,
                &caller,
                &receiver,
                amount,
                &s.config.collateral_token,
            );
            Ok(())
        })
    }

    /// Withdraw all overpaid payment token to `receiver`. Returns the amount.
    pub fn withdraw_excess_payment(
        e: Env,
        caller: Address,
        receiver: Address,
    ) -> Result<i128, BondError> {
        with_reentrancy_guard(&e, || {
            access_control::authorize(&e, &caller, Role::Withdraw)?;
            let s = snapshot(&e)?;
            let (amount, next) = payment::plan_withdraw_payment(&s.config, &s.ledger)?;

            storage::write_ledger(&e, &next);

            token_integration::transfer_from_contract(
                &e,
                &s.config.payment_token,
                &receiver,
                amount,
            )?;
            events::emit_payment_withdraw(&e, &caller, &receiver, amount, &s.config.payment_token);
            Ok(amount)
        })
    }

    /// Send the bond's whole balance of a stray `token` to `receiver`.
    /// The collateral and payment tokens can never be swept.
    pub fn sweep(e: Env, caller: Address, token: Address, receiver: Address) -> Result<i128, BondError> {
        with_reentrancy_guard(&e, || {
            access_control::authorize(&e, &caller, Role::Admin)?;
            let config = storage::read_config(&e)?;
            if token == config.payment_token || token == config.collateral_token {
                return Err(BondError::SweepDisallowedForToken);
            }
            let amount = token_integration::contract_balance(&e, &token);
            if amount == 0 {
                return Err(BondError::ZeroAmount);
            }
            token_integration::transfer_from_contract(&e, &token, &receiver, amount)?;
            events::emit_token_sweep(&e, &caller, &token, &receiver, amount);
            Ok(amount)
        })
    }

    // ── Share token ────────────────────────────────────────────────────────

    pub fn name(e: Env) -> Result<String, BondError> {
        Ok(storage::read_config(&e)?.name)
    }

    pub fn symbol(e: Env) -> Result<String, BondError> {
        Ok(storage::read_config(&e)?.symbol)
    }

    pub fn decimals(_e: Env) -> u32 {
        math::SHARE_DECIMALS
    }

    pub fn total_supply(e: Env) -> i128 {
        storage::read_ledger(&e).total_supply
    }

    pub fn balance(e: Env, id: Address) -> i128 {
        share_token::balance(&e, &id)
    }

    pub fn allowance(e: Env, owner: Address, spender: Address) -> i128 {
        share_token::allowance(&e, &owner, &spender)
    }

    pub fn approve(e: Env, owner: Address, spender: Address, amount: i128) -> Result<(), BondError> {
        owner.require_auth();
        with_reentrancy_guard(&e, || {
            share_token::approve(&e, &owner, &spender, amount)?;
            events::emit_approve(&e, &owner, &spender, amount);
            Ok(())
        })
    }

    pub fn transfer(e: Env, from: Address, to: Address, amount: i128) -> Result<(), BondError> {
        from.require_auth();
        with_reentrancy_guard(&e, || {
            share_token::move_shares(&e, &from, &to, amount)?;
            events::emit_transfer(&e, &from, &to, amount);
            Ok(())
        })
    }

    pub fn transfer_from(
        e: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), BondError> {
        spender.require_auth();
        with_reentrancy_guard(&e, || {
            share_token::spend_allowance(&e, &from, &spender, amount)?;
            share_token::move_shares(&e, &from, &to, amount)?;
            events::emit_transfer(&e, &from, &to, amount);
            Ok(())
        })
    }

    // ── Queries ────────────────────────────────────────────────────────────

    pub fn get_config(e: Env) -> Result<BondConfig, BondError> {
        storage::read_config(&e)
    }

    pub fn get_ledger(e: Env) -> BondLedger {
        storage::read_ledger(&e)
    }

    pub fn collateral_balance(e: Env) -> i128 {
        storage::read_ledger(&e).collateral_balance
    }

    pub fn payment_balance(e: Env) -> i128 {
        storage::read_ledger(&e).payment_balance
    }

    pub fn total_payment_received(e: Env) -> i128 {
        storage::read_ledger(&e).total_payment_received
    }

    pub fn state(e: Env) -> Result<BondState, BondError> {
        let s = snapshot(&e)?;
        lifecycle::state(&s.config, &s.ledger, s.now)
    }

    pub fn is_mature(e: Env) -> Result<bool, BondError> {
        let s = snapshot(&e)?;
        Ok(lifecycle::is_mature(&s.config, s.now))
    }

    pub fn is_fully_paid(e: Env) -> Result<bool, BondError> {
        let s = snapshot(&e)?;
        let state = lifecycle::state(&s.config, &s.ledger, s.now)?;
        Ok(matches!(state, BondState::Paid | BondState::PaidEarly))
    }

    /// Payment-token units the issuer must still pay.
    pub fn amount_owed(e: Env) -> Result<i128, BondError> {
        let s = snapshot(&e)?;
        payment::amount_owed(&s.config, &s.ledger)
    }

    /// Shares (18 decimals) not yet covered by payment.
    pub fn amount_unpaid(e: Env) -> Result<i128, BondError> {
        let s = snapshot(&e)?;
        payment::amount_unpaid(&s.config, &s.ledger)
    }

    pub fn amount_over_paid(e: Env) -> Result<i128, BondError> {
        let s = snapshot(&e)?;
        payment::amount_over_paid(&s.config, &s.ledger)
    }

    /// Collateral backing the current supply.
    pub fn required_collateral(e: Env) -> Result<i128, BondError> {
        let s = snapshot(&e)?;
        collateral::required_collateral(&s.config, s.ledger.total_supply)
    }

    /// Held collateral covers `required_collateral()`. Always true after a
    /// completed call.
    pub fn is_solvent(e: Env) -> Result<bool, BondError> {
        let s = snapshot(&e)?;
        collateral::is_solvent(&s.config, &s.ledger)
    }

    pub fn preview_mint(e: Env, amount: i128) -> Result<i128, BondError> {
        let s = snapshot(&e)?;
        collateral::preview_mint(&s.config, &s.ledger, s.now, amount)
    }

    pub fn preview_convert(e: Env, shares: i128) -> Result<i128, BondError> {
        let config = storage::read_config(&e)?;
        conversion::preview_convert(&config, shares)
    }

    pub fn preview_redeem(e: Env, shares: i128) -> Result<RedemptionPreview, BondError> {
        let s = snapshot(&e)?;
        redemption::preview_redeem(&s.config, &s.ledger, s.now, shares)
    }

    pub fn preview_withdraw_collateral(e: Env) -> Result<i128, BondError> {
        let s = snapshot(&e)?;
        collateral::preview_withdraw_collateral(&s.config, &s.ledger, s.now)
    }

    pub fn preview_withdraw_payment(e: Env) -> Result<i128, BondError> {
        let s = snapshot(&e)?;
        payment::preview_withdraw_payment(&s.config, &s.ledger)
    }
}
