//! Storage access for the bond ledger.
//!
//! | Key                        | Tier          |
//! |----------------------------|---------------|
//! | `DataKey::Config`          | `instance()`  |
//! | `DataKey::Ledger`          | `instance()`  |
//! | `DataKey::Lock`            | `instance()`  |
//! | `DataKey::Balance(a)`      | `persistent()`|
//! | `DataKey::Allowance(a, b)` | `persistent()`|
//! | `DataKey::Role(a, r)`      | `persistent()`|
//!
//! Config and ledger are small and read by every call, so they share the
//! instance TTL. Per-address entries are unbounded and rent independently.

use crate::types::{BondConfig, BondLedger, DataKey, Role};
use bond_errors::BondError;
use soroban_sdk::{Address, Env};

/// Minimum ledger sequence TTL before a bump is requested (~1 day at 5 s/ledger).
pub(crate) const BUMP_THRESHOLD: u32 = 17_280;
/// Target TTL after a bump (~30 days).
pub(crate) const BUMP_TARGET: u32 = 518_400;

pub fn bump_instance(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(BUMP_THRESHOLD, BUMP_TARGET);
}

fn bump_persistent(e: &Env, key: &DataKey) {
    e.storage()
        .persistent()
        .extend_ttl(key, BUMP_THRESHOLD, BUMP_TARGET);
}

// ── Config / ledger ────────────────────────────────────────────────────────

pub fn read_config(e: &Env) -> Result<BondConfig, BondError> {
    e.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(BondError::NotInitialized)
}

pub fn write_config(e: &Env, config: &BondConfig) {
    e.storage().instance().set(&DataKey::Config, config);
}

/// A freshly created bond has an all-zero ledger.
pub fn read_ledger(e: &Env) -> BondLedger {
    e.storage()
        .instance()
        .get(&DataKey::Ledger)
        .unwrap_or_default()
}

pub fn write_ledger(e: &Env, ledger: &BondLedger) {
    e.storage().instance().set(&DataKey::Ledger, ledger);
}

// ── Lock ───────────────────────────────────────────────────────────────────

pub fn is_locked(e: &Env) -> bool {
    e.storage()
        .instance()
        .get(&DataKey::Lock)
        .unwrap_or(false)
}

pub fn set_locked(e: &Env, locked: bool) {
    e.storage().instance().set(&DataKey::Lock, &locked);
}

// ── Share balances ─────────────────────────────────────────────────────────

pub fn read_balance(e: &Env, holder: &Address) -> i128 {
    let key = DataKey::Balance(holder.clone());
    match e.storage().persistent().get::<_, i128>(&key) {
        Some(balance) => {
            bump_persistent(e, &key);
            balance
        }
        None => 0,
    }
}

pub fn write_balance(e: &Env, holder: &Address, balance: i128) {
    let key = DataKey::Balance(holder.clone());
    e.storage().persistent().set(&key, &balance);
    bump_persistent(e, &key);
}

// ── Allowances ─────────────────────────────────────────────────────────────

pub fn read_allowance(e: &Env, owner: &Address, spender: &Address) -> i128 {
    let key = DataKey::Allowance(owner.clone(), spender.clone());
    e.storage().persistent().get(&key).unwrap_or(0)
}

pub fn write_allowance(e: &Env, owner: &Address, spender: &Address, amount: i128) {
    let key = DataKey::Allowance(owner.clone(), spender.clone());
    if amount == 0 {
        e.storage().persistent().remove(&key);
        return;
    }
    e.storage().persistent().set(&key, &amount);
    bump_persistent(e, &key);
}

// ── Roles ──────────────────────────────────────────────────────────────────

pub fn has_role(e: &Env, account: &Address, role: Role) -> bool {
    e.storage()
        .persistent()
        .get(&DataKey::Role(account.clone(), role))
        .unwrap_or(false)
}

pub fn set_role(e: &Env, account: &Address, role: Role, granted: bool) {
    let key = DataKey::Role(account.clone(), role);
    if granted {
        e.storage().persistent().set(&key, &true);
        bump_persistent(e, &key);
    } else {
        e.storage().persistent().remove(&key);
    }
}
