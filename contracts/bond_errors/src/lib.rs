#![no_std]

use soroban_sdk::contracterror;

/// @title  ErrorCategory
/// @notice Groups bond errors by how a caller is expected to react.
/// @dev    Off-chain consumers should switch on this value first, then on the
///         specific `BondError` code for fine-grained handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Creation-time configuration errors (codes 1-99). Fatal for the instance.
    Configuration,
    /// Caller identity and role errors (codes 100-199). Not retriable without a grant.
    Authorization,
    /// Lifecycle and precondition errors (codes 200-299). Retry with corrected input.
    Precondition,
    /// Share ledger errors (codes 300-399).
    ShareLedger,
    /// Asset handling errors (codes 400-499).
    Asset,
    /// Fixed-point and checked-math errors (codes 700-799).
    Arithmetic,
}

/// @title  BondError
/// @notice Canonical error enum for the convertible bond ledger.
/// @dev    Codes are wire-stable. Never renumber a variant after deployment.
///         Append new variants at the end of their category block only.
///         Use the ErrorExt trait to retrieve the category and description.
///
/// Error Code Layout:
///   1  -  99  : Configuration
///   100 - 199 : Authorization
///   200 - 299 : Precondition
///   300 - 399 : Share ledger
///   400 - 499 : Asset
///   700 - 799 : Arithmetic
#[contracterror]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u32)]
pub enum BondError {
    // --- Configuration (1-99) ---
    /// Bond configuration is missing from instance storage.
    NotInitialized = 1,

    /// `convertible_ratio` is negative or exceeds `collateral_ratio`.
    InvalidRatio = 2,

    /// Payment token reports more than 18 decimals.
    DecimalsOverflow = 3,

    /// Maturity timestamp is not in the future at creation.
    InvalidMaturity = 4,

    /// Collateral token and payment token are the same asset.
    InvalidTokenPair = 5,

    /// Amount argument is negative, or the supply cap is not positive.
    InvalidAmount = 6,

    // --- Authorization (100-199) ---
    /// Caller does not hold the role required by the operation.
    MissingRole = 100,

    /// A mutating call was entered while another one is in flight.
    ReentrancyDetected = 101,

    // --- Precondition (200-299) ---
    /// Amount (or the computed payout) is zero.
    ZeroAmount = 200,

    /// Bond is already fully repaid; further payments are rejected.
    PaymentMet = 201,

    /// Operation is only legal before maturity.
    BondPastMaturity = 202,

    /// Mint would push total supply past the configured cap.
    BondSupplyExceeded = 203,

    /// Redemption requires maturity or full repayment.
    BondNotYetMaturedOrPaid = 204,

    /// Requested collateral withdrawal exceeds the excess collateral.
    InsufficientExcessCollateral = 205,

    // --- Share ledger (300-399) ---
    /// Holder share balance is below the requested amount.
    InsufficientBalance = 300,

    /// Spender allowance (share or external token) is below the requested amount.
    InsufficientAllowance = 301,

    // --- Asset (400-499) ---
    /// Sweep targeted the bond's own collateral or payment token.
    SweepDisallowedForToken = 400,

    // --- Arithmetic (700-799) ---
    /// Integer overflow detected during a checked arithmetic operation.
    Overflow = 700,

    /// Integer underflow detected during a checked arithmetic operation.
    Underflow = 701,

    /// Division by zero in a fixed-point operation.
    DivisionByZero = 702,
}

/// @title  ErrorExt
/// @notice Provides category() and description() on every BondError variant.
/// @dev    Use this for structured logging, monitoring, and off-chain display.
pub trait ErrorExt {
    /// @return The ErrorCategory bucket this error belongs to.
    fn category(&self) -> ErrorCategory;

    /// @return A static string description safe for logging or display.
    fn description(&self) -> &'static str;

    /// @return true when resubmitting with corrected input can succeed.
    fn is_retriable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Precondition | ErrorCategory::ShareLedger
        )
    }
}

impl ErrorExt for BondError {
    fn category(&self) -> ErrorCategory {
        match self {
            BondError::NotInitialized
            | BondError::InvalidRatio
            | BondError::DecimalsOverflow
            | BondError::InvalidMaturity
            | BondError::InvalidTokenPair
            | BondError::InvalidAmount => ErrorCategory::Configuration,

            BondError::MissingRole | BondError::ReentrancyDetected => {
                ErrorCategory::Authorization
            }

            BondError::ZeroAmount
            | BondError::PaymentMet
            | BondError::BondPastMaturity
            | BondError::BondSupplyExceeded
            | BondError::BondNotYetMaturedOrPaid
            | BondError::InsufficientExcessCollateral => ErrorCategory::Precondition,

            BondError::InsufficientBalance | BondError::InsufficientAllowance => {
                ErrorCategory::ShareLedger
            }

            BondError::SweepDisallowedForToken => ErrorCategory::Asset,

            BondError::Overflow | BondError::Underflow | BondError::DivisionByZero => {
                ErrorCategory::Arithmetic
            }
        }
    }

    fn description(&self) -> &'static str {
        match self {
            BondError::NotInitialized => "Bond configuration has not been stored",
            BondError::InvalidRatio => {
                "Convertible ratio must be non-negative and not exceed the collateral ratio"
            }
            BondError::DecimalsOverflow => "Payment token decimals exceed 18",
            BondError::InvalidMaturity => "Maturity must be in the future",
            BondError::InvalidTokenPair => "Collateral and payment tokens must differ",
            BondError::InvalidAmount => "Amount must not be negative",
            BondError::MissingRole => "Caller does not hold the required role",
            BondError::ReentrancyDetected => "Reentrancy detected; call rejected",
            BondError::ZeroAmount => "Amount or payout is zero",
            BondError::PaymentMet => "Bond is already fully repaid",
            BondError::BondPastMaturity => "Bond has reached maturity",
            BondError::BondSupplyExceeded => "Mint exceeds the maximum share supply",
            BondError::BondNotYetMaturedOrPaid => "Bond is neither matured nor fully repaid",
            BondError::InsufficientExcessCollateral => {
                "Withdrawal exceeds the excess collateral"
            }
            BondError::InsufficientBalance => "Insufficient share balance",
            BondError::InsufficientAllowance => "Allowance is below the requested amount",
            BondError::SweepDisallowedForToken => "Token cannot be swept from the bond",
            BondError::Overflow => "Integer overflow in checked arithmetic",
            BondError::Underflow => "Integer underflow in checked arithmetic",
            BondError::DivisionByZero => "Division by zero in fixed-point arithmetic",
        }
    }
}
