//! Error types for the marketplace engine
//!
//! Four categories with distinct retry semantics: validation errors are
//! malformed arguments and never retried; state errors reflect a conflict
//! with the current ledger/book and may be retried after a re-read;
//! authorization failures are never retried; collaborator failures abort
//! the enclosing operation before any ledger mutation.

use crate::ids::{HolderId, OrderId, VaultId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Top-level marketplace error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("State error: {0}")]
    State(#[from] StateError),

    #[error("Unauthorized: {holder} may not {action}")]
    Unauthorized { holder: HolderId, action: String },

    #[error("Collaborator error: {0}")]
    Collaborator(#[from] CollaboratorError),
}

/// Malformed or out-of-range arguments
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid share amount: {0}")]
    InvalidShareAmount(String),

    #[error("Invalid valuation: {0}")]
    InvalidValuation(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Metadata URI must be non-empty")]
    InvalidMetadataUri,

    #[error("Valuation too high: {requested} exceeds allowed maximum {max}")]
    ValuationTooHigh { requested: u64, max: u64 },

    #[error("Valuation too low: {requested} below allowed minimum {min}")]
    ValuationTooLow { requested: u64, min: u64 },
}

/// Request conflicts with current ledger or book state
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    #[error("Vault not found: {vault_id}")]
    VaultNotFound { vault_id: VaultId },

    #[error("Vault not active: {vault_id}")]
    VaultNotActive { vault_id: VaultId },

    #[error("Vault already redeemed: {vault_id}")]
    VaultAlreadyRedeemed { vault_id: VaultId },

    #[error("Order not found: {order_id}")]
    OrderNotFound { order_id: OrderId },

    #[error("Order book full: capacity {capacity}")]
    OrderBookFull { capacity: usize },

    #[error("Insufficient shares: required {required}, unencumbered {available}")]
    InsufficientShares { required: u64, available: u64 },

    #[error("Insufficient shares in order: requested {requested}, remaining {remaining}")]
    InsufficientSharesInOrder { requested: u64, remaining: u64 },

    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: Decimal, available: Decimal },

    #[error("Insufficient payment balance: required {required}, available {available}")]
    InsufficientPaymentBalance { required: Decimal, available: Decimal },

    #[error("Insufficient shares for redemption: held {held}, outstanding {outstanding}")]
    InsufficientSharesForRedemption { held: u64, outstanding: u64 },

    #[error("Redeemer has {count} open sell orders; cancel them before redemption")]
    OpenOrdersOutstanding { count: usize },
}

/// A synchronous capability call to an external collaborator failed
///
/// Always forces a full rollback of the enclosing operation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CollaboratorError {
    #[error("Treasury credit failed: {message}")]
    Treasury { message: String },

    #[error("Rewards tracker failed: {message}")]
    Rewards { message: String },

    #[error("Asset custody release failed: {message}")]
    Custody { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::InvalidPrice("must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid price: must be positive");
    }

    #[test]
    fn test_state_error_fields_in_display() {
        let err = StateError::InsufficientPaymentBalance {
            required: Decimal::new(50125, 1),
            available: Decimal::from(100),
        };
        assert!(err.to_string().contains("5012.5"));
        assert!(err.to_string().contains("100"));
    }

    #[test]
    fn test_market_error_from_state_error() {
        let state_err = StateError::OrderBookFull { capacity: 100 };
        let market_err: MarketError = state_err.into();
        assert!(matches!(market_err, MarketError::State(_)));
    }

    #[test]
    fn test_market_error_from_collaborator_error() {
        let collab_err = CollaboratorError::Custody {
            message: "asset escrow offline".to_string(),
        };
        let market_err: MarketError = collab_err.into();
        assert!(matches!(market_err, MarketError::Collaborator(_)));
    }
}
