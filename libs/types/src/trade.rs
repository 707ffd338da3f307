//! Settlement receipt types
//!
//! A `Fill` is the atomic result of buying against a resident sell order:
//! shares moved seller → buyer, gross payment moved buyer → seller, and
//! the trading fee routed to the rewards pool.

use crate::ids::{HolderId, OrderId, TradeId, VaultId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Receipt for one settled share purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub trade_id: TradeId,
    pub vault_id: VaultId,
    pub order_id: OrderId,
    pub seller: HolderId,
    pub buyer: HolderId,

    /// Shares transferred seller → buyer
    pub shares: u64,
    /// Fixed price named by the order
    pub price_per_share: Decimal,
    /// `shares × price_per_share`, paid to the seller
    pub gross: Decimal,
    /// Trading fee charged on top of gross, paid by the buyer
    pub fee: Decimal,

    pub executed_at: i64, // Unix nanos
}

impl Fill {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        vault_id: VaultId,
        order_id: OrderId,
        seller: HolderId,
        buyer: HolderId,
        shares: u64,
        price_per_share: Decimal,
        gross: Decimal,
        fee: Decimal,
        executed_at: i64,
    ) -> Self {
        Self {
            trade_id: TradeId::new(),
            vault_id,
            order_id,
            seller,
            buyer,
            shares,
            price_per_share,
            gross,
            fee,
            executed_at,
        }
    }

    /// Total the buyer paid: gross plus fee
    pub fn total_paid(&self) -> Decimal {
        self.gross + self.fee
    }
}
