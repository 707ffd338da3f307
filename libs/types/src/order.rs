//! Resident sell-order types
//!
//! A `SellOrder` is an explicit, fixed-price offer for a number of shares.
//! There is no price-time priority: a buyer names the order id to fill.
//! Listed shares remain on the seller's ledger record but are encumbered
//! until the order is filled or cancelled.

use crate::ids::{HolderId, OrderId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Maximum number of open sell orders per vault
///
/// Bounds worst-case scan cost for listing, matching, and cancellation.
pub const MAX_ORDERS: usize = 100;

/// An open fixed-price sell order
///
/// Invariants: `shares_remaining > 0` while resident (the book removes the
/// order the moment it hits zero); `price_per_share > 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellOrder {
    pub order_id: OrderId,
    pub seller: HolderId,
    pub shares_remaining: u64,
    pub price_per_share: Decimal,
    pub created_at: i64, // Unix nanos
}

impl SellOrder {
    /// Create a new open order
    pub fn new(
        order_id: OrderId,
        seller: HolderId,
        shares: u64,
        price_per_share: Decimal,
        timestamp: i64,
    ) -> Self {
        Self {
            order_id,
            seller,
            shares_remaining: shares,
            price_per_share,
            created_at: timestamp,
        }
    }

    /// Gross value of filling `shares` against this order
    pub fn gross_for(&self, shares: u64) -> Decimal {
        Decimal::from(shares) * self.price_per_share
    }

    /// Apply a partial or complete fill, returning the remaining shares
    ///
    /// # Panics
    /// Panics if the fill exceeds the remaining shares; callers validate
    /// against `shares_remaining` first.
    pub fn fill(&mut self, shares: u64) -> u64 {
        assert!(
            shares <= self.shares_remaining,
            "Fill would exceed order remainder"
        );
        self.shares_remaining -= shares;
        self.shares_remaining
    }

    /// Check if the order is exhausted and must leave the book
    pub fn is_filled(&self) -> bool {
        self.shares_remaining == 0
    }
}
