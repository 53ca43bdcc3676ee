//! Transaction outcomes and stock errors

use thiserror::Error;

/// Outcome of a stock transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionResult {
    /// The full transfer completed
    Success,
    /// Nothing was transferred; the container was left as found
    Failure(FailureReason),
}

impl TransactionResult {
    /// Check if the transfer completed
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Why a transfer was refused.
///
/// `missing` is counted in base units, not entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// The container could not hold the requested quantity
    ContainerFull { missing: u32 },
    /// The container did not hold the requested quantity
    InsufficientStock { missing: u32 },
}

/// Stock operation errors (caller contract violations and invariant rejections)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StockError {
    /// A container-backed operation was called without a container
    #[error("this stock unit requires a container")]
    MissingContainer,
    /// The entries-per-unit multiplier was below 1
    #[error("entries per unit must be at least 1")]
    InvalidEntriesPerUnit,
    /// The requested transfer does not fit the base-unit counter
    #[error("requested transfer exceeds the base unit counter range")]
    QuantityOverflow,
}

/// Identifier of the party acting on a stock unit.
///
/// The item-based variant ignores it; account-backed variants need it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActorId(String);

impl ActorId {
    /// Create a new actor id
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the actor name
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ActorId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
