use soroban_sdk::{contracttype, Address, String};

// ─── Creation parameters ───────────────────────────────────────────────────

/// Arguments supplied once, at deployment. Nothing here can be changed later.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BondParams {
    /// Share token name.
    pub name: String,
    /// Share token symbol.
    pub symbol: String,
    /// Ledger timestamp at which the bond matures.
    pub maturity: u64,
    /// Asset the issuer repays in.
    pub payment_token: Address,
    /// Asset backing the shares.
    pub collateral_token: Address,
    /// Collateral units (WAD-scaled) required per share unit.
    pub collateral_ratio: i128,
    /// Collateral units (WAD-scaled) released per share converted. 0 = not convertible.
    pub convertible_ratio: i128,
    /// Upper bound on total share supply.
    pub max_supply: i128,
}

// ─── Bond configuration ────────────────────────────────────────────────────

/// Validated, immutable configuration of one bond instance.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BondConfig {
    pub issuer: Address,
    pub name: String,
    pub symbol: String,
    pub maturity: u64,
    pub payment_token: Address,
    /// Decimals reported by `payment_token` at creation.
    pub payment_decimals: u32,
    pub collateral_token: Address,
    pub collateral_ratio: i128,
    pub convertible_ratio: i128,
    pub max_supply: i128,
}

// ─── Ledger ────────────────────────────────────────────────────────────────

/// Mutable accounting state. Every mutating operation reads one snapshot,
/// derives the next one, and writes it back before moving tokens.
#[contracttype]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BondLedger {
    /// Outstanding shares (18 decimals).
    pub total_supply: i128,
    /// Collateral token units held by the bond.
    pub collateral_balance: i128,
    /// Payment token units held by the bond (native decimals).
    pub payment_balance: i128,
    /// Every payment ever received. Never decreases.
    pub total_payment_received: i128,
    /// Nothing was owed as of the last write before maturity. Frozen from
    /// maturity on, so a default stays a default while holders redeem.
    pub repaid: bool,
}

// ─── Lifecycle ─────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BondState {
    /// Before maturity, not fully repaid.
    Active,
    /// Fully repaid before maturity.
    PaidEarly,
    /// Fully repaid, at or after maturity.
    Paid,
    /// Not fully repaid at or after maturity.
    Defaulted,
}

// ─── Roles ─────────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    /// Grants and revokes roles, sweeps stray tokens.
    Admin,
    /// Mints shares against deposited collateral.
    Mint,
    /// Withdraws excess collateral and excess payment.
    Withdraw,
}

// ─── Previews ──────────────────────────────────────────────────────────────

/// Tokens a redemption pays out.
#[contracttype]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RedemptionPreview {
    /// Payment token units (native decimals).
    pub payment: i128,
    /// Collateral token units.
    pub collateral: i128,
}

impl RedemptionPreview {
    pub fn is_zero(&self) -> bool {
        self.payment == 0 && self.collateral == 0
    }
}

// ─── Storage keys ──────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Immutable configuration (BondConfig). Instance storage.
    Config,
    /// Accounting snapshot (BondLedger). Instance storage.
    Ledger,
    /// Mutation lock flag. Instance storage.
    Lock,
    /// Share balance per holder. Persistent storage.
    Balance(Address),
    /// Share allowance per (owner, spender). Persistent storage.
    Allowance(Address, Address),
    /// Role grant per (account, role). Persistent storage.
    Role(Address, Role),
}
