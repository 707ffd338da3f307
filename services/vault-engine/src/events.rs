//! Marketplace events
//!
//! Immutable records appended by committed operations. Failed operations
//! emit nothing, so the event log replays to the same state the engine
//! holds.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::ids::{HolderId, OrderId, TradeId, VaultId};
use types::vault::AssetType;

/// New vault registered; the creator holds every share
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultCreated {
    pub vault_id: VaultId,
    pub creator: HolderId,
    pub asset_type: AssetType,
    pub total_shares: u64,
    pub valuation_usd: u64,
    pub created_at: i64,
}

/// Sell order placed on a vault's book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharesListed {
    pub vault_id: VaultId,
    pub order_id: OrderId,
    pub seller: HolderId,
    pub shares: u64,
    pub price_per_share: Decimal,
    pub listed_at: i64,
}

/// Trade settled against a resident sell order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharesPurchased {
    pub vault_id: VaultId,
    pub order_id: OrderId,
    pub trade_id: TradeId,
    pub seller: HolderId,
    pub buyer: HolderId,
    pub shares: u64,
    pub gross: Decimal,
    pub fee: Decimal,
    pub executed_at: i64,
}

/// Sell order withdrawn by its owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCancelled {
    pub vault_id: VaultId,
    pub order_id: OrderId,
    pub seller: HolderId,
    pub shares_returned: u64,
    pub cancelled_at: i64,
}

/// Oracle revalued the underlying asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationUpdated {
    pub vault_id: VaultId,
    pub old_valuation: u64,
    pub new_valuation: u64,
    pub updated_at: i64,
}

/// Vault closed; the underlying asset left custody
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRedeemed {
    pub vault_id: VaultId,
    pub redeemer: HolderId,
    pub fee: Decimal,
    pub redeemed_at: i64,
}

/// Enum wrapper for all marketplace events, enabling uniform handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketEvent {
    VaultCreated(VaultCreated),
    SharesListed(SharesListed),
    SharesPurchased(SharesPurchased),
    OrderCancelled(OrderCancelled),
    ValuationUpdated(ValuationUpdated),
    AssetRedeemed(AssetRedeemed),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vault_created_serialization() {
        let event = VaultCreated {
            vault_id: VaultId::new(7),
            creator: HolderId::new(),
            asset_type: AssetType::RealEstate,
            total_shares: 1_000_000,
            valuation_usd: 2_500_000,
            created_at: 1708123456789,
        };
        let json = serde_json::to_string(&event).unwrap();
        let deser: VaultCreated = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deser);
    }

    #[test]
    fn test_shares_purchased_serialization() {
        let event = SharesPurchased {
            vault_id: VaultId::new(7),
            order_id: OrderId::new(1),
            trade_id: TradeId::new(),
            seller: HolderId::new(),
            buyer: HolderId::new(),
            shares: 5_000,
            gross: Decimal::from(5_000),
            fee: Decimal::new(125, 1),
            executed_at: 1708123456789,
        };
        let json = serde_json::to_string(&event).unwrap();
        let deser: SharesPurchased = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deser);
    }

    #[test]
    fn test_market_event_enum_variant() {
        let event = MarketEvent::OrderCancelled(OrderCancelled {
            vault_id: VaultId::new(7),
            order_id: OrderId::new(3),
            seller: HolderId::new(),
            shares_returned: 250,
            cancelled_at: 1708123456789,
        });
        assert!(matches!(event, MarketEvent::OrderCancelled(_)));
    }
}
