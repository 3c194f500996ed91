//! Role-based authorization.
//!
//! `authorize` is the single capability check every privileged operation
//! calls: the caller must sign the invocation and hold the role. Denial is
//! final for the call; nothing is retried.

use crate::events;
use crate::storage;
use crate::types::Role;
use bond_errors::BondError;
use soroban_sdk::{log, Address, Env};

pub fn authorize(e: &Env, caller: &Address, role: Role) -> Result<(), BondError> {
    caller.require_auth();
    if !storage::has_role(e, caller, role) {
        log!(e, "caller lacks required role");
        return Err(BondError::MissingRole);
    }
    Ok(())
}

pub fn has_role(e: &Env, account: &Address, role: Role) -> bool {
    storage::has_role(e, account, role)
}

/// The issuer starts with every role.
pub fn grant_issuer_roles(e: &Env, issuer: &Address) {
    for role in [Role::Admin, Role::Mint, Role::Withdraw] {
        storage::set_role(e, issuer, role, true);
    }
}

/// Returns false when `account` already held `role`.
pub fn grant_role(e: &Env, admin: &Address, account: &Address, role: Role) -> Result<bool, BondError> {
    authorize(e, admin, Role::Admin)?;
    if storage::has_role(e, account, role) {
        return Ok(false);
    }
    storage::set_role(e, account, role, true);
    events::emit_role_granted(e, admin, account, role);
    Ok(true)
}

/// Returns false when `account` did not hold `role`.
pub fn revoke_role(e: &Env, admin: &Address, account: &Address, role: Role) -> Result<bool, BondError> {
    authorize(e, admin, Role::Admin)?;
    if !storage::has_role(e, account, role) {
        return Ok(false);
    }
    storage::set_role(e, account, role, false);
    events::emit_role_revoked(e, admin, account, role);
    Ok(true)
}
