//! Error types surfaced by the store and the claim workflow.
//!
//! User-facing failures are terse strings handed back to whatever chat or
//! command layer is hosting the engine; nothing here should ever take the
//! session down.

use std::fmt;

/// Failure in the underlying region table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError(pub String);

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "land store error: {}", self.0)
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        Self(e.to_string())
    }
}

/// Everything that can stop a claim operation, in the order the buy workflow
/// checks them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimError {
    /// Fewer than two corners selected.
    NoSelection,
    /// The acting player could not be resolved to a registry entry.
    /// Administrative: a system fault, not a usage error.
    IdentityResolution,
    /// Price exceeds the current balance.
    InsufficientFunds { price: i64, balance: i64 },
    /// The owner already holds the configured maximum number of claims.
    ClaimLimitReached { limit: i64 },
    /// The selection intersects an existing region (touching faces included).
    Overlap,
    /// The debit or the region insert failed; retryable.
    Transaction,
    /// Sell/give issued while not inside an owned claim.
    NotStandingInClaim,
    /// The give target did not resolve to a registry entry.
    TargetNotFound,
    /// The region table itself failed. Administrative.
    Store(StoreError),
}

impl ClaimError {
    /// Terse message shown to the acting player.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NoSelection => "You must select two points first.".to_owned(),
            Self::IdentityResolution => {
                "Could not complete the action. Contact an administrator.".to_owned()
            }
            Self::InsufficientFunds { .. } => "You do not have enough money.".to_owned(),
            Self::ClaimLimitReached { .. } => "You have reached the claim limit.".to_owned(),
            Self::Overlap => "You are on top of an already existing claim.".to_owned(),
            Self::Transaction => {
                "Something went wrong with the purchase, please try again.".to_owned()
            }
            Self::NotStandingInClaim => "You are not inside a claim.".to_owned(),
            Self::TargetNotFound => "The target player could not be found.".to_owned(),
            Self::Store(_) => "An error occurred. Contact an administrator.".to_owned(),
        }
    }
}

impl fmt::Display for ClaimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSelection => write!(f, "no selection"),
            Self::IdentityResolution => write!(f, "identity resolution failed"),
            Self::InsufficientFunds { price, balance } => {
                write!(f, "insufficient funds: price {price}, balance {balance}")
            }
            Self::ClaimLimitReached { limit } => write!(f, "claim limit reached ({limit})"),
            Self::Overlap => write!(f, "selection overlaps an existing region"),
            Self::Transaction => write!(f, "purchase transaction failed"),
            Self::NotStandingInClaim => write!(f, "not standing inside a claim"),
            Self::TargetNotFound => write!(f, "target player not found"),
            Self::Store(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ClaimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for ClaimError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}
