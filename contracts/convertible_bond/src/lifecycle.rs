//! Bond lifecycle.
//!
//! There is no stored state field. Before maturity the state is derived from
//! whether anything is still owed. From maturity on it reads the `repaid` flag
//! that the last pre-maturity write left in the ledger: redemptions shrink the
//! shortfall of a defaulted bond, and must not turn it into a paid one.
//!
//! ```text
//!   Active ──(owed == 0)──▶ PaidEarly ──(maturity)──▶ Paid
//!     │
//!     └──(maturity, owed > 0)──▶ Defaulted
//! ```

use crate::payment;
use crate::types::{BondConfig, BondLedger, BondState};
use bond_errors::BondError;

/// Maturity is inclusive: at `now == maturity` the bond is mature.
#[inline]
pub fn is_mature(config: &BondConfig, now: u64) -> bool {
    now >= config.maturity
}

pub fn state(config: &BondConfig, ledger: &BondLedger, now: u64) -> Result<BondState, BondError> {
    let mature = is_mature(config, now);
    let paid = if mature {
        ledger.repaid
    } else {
        payment::is_fully_paid(config, ledger)?
    };
    Ok(match (mature, paid) {
        (false, false) => BondState::Active,
        (false, true) => BondState::PaidEarly,
        (true, true) => BondState::Paid,
        (true, false) => BondState::Defaulted,
    })
}

/// Refresh `repaid` on a ledger about to be written. A no-op from maturity on.
pub fn settle(config: &BondConfig, ledger: BondLedger, now: u64) -> Result<BondLedger, BondError> {
    if is_mature(config, now) {
        return Ok(ledger);
    }
    Ok(BondLedger {
        repaid: payment::is_fully_paid(config, &ledger)?,
        ..ledger
    })
}

/// Mint and convert are only legal before maturity.
pub fn allows_issuance(state: BondState) -> bool {
    matches!(state, BondState::Active | BondState::PaidEarly)
}

/// Redemption needs maturity or full repayment.
pub fn allows_redemption(state: BondState) -> bool {
    matches!(
        state,
        BondState::Paid | BondState::PaidEarly | BondState::Defaulted
    )
}
