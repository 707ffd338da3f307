//! Unique identifier types for marketplace entities
//!
//! Vaults and orders use monotonic `u64` identifiers allocated by their
//! owning component (the registry and the per-vault order book), so ids
//! double as creation order. Holders and trades use UUID v7 for
//! time-sortable uniqueness without central coordination.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an asset vault
///
/// Allocated monotonically by the vault registry; the numeric value
/// reflects creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VaultId(u64);

impl VaultId {
    /// Create from a raw id value
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw id value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for VaultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "vault-{}", self.0)
    }
}

/// Unique identifier for a sell order
///
/// Monotonic within a single vault's order book, starting at 1.
/// Ids are never reused, including after cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "order-{}", self.0)
    }
}

/// Unique identifier for a share holder (account)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolderId(Uuid);

impl HolderId {
    /// Create a new HolderId with current timestamp
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create from existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get inner UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for HolderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a settled trade
///
/// Uses UUID v7 for time-based sorting and replay-friendly ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeId(Uuid);

impl TradeId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TradeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vault_id_ordering() {
        let a = VaultId::new(1);
        let b = VaultId::new(2);
        assert!(a < b, "VaultIds should order by creation");
        assert_eq!(a.value(), 1);
    }

    #[test]
    fn test_order_id_display() {
        assert_eq!(OrderId::new(7).to_string(), "order-7");
        assert_eq!(VaultId::new(3).to_string(), "vault-3");
    }

    #[test]
    fn test_holder_id_creation() {
        let id1 = HolderId::new();
        let id2 = HolderId::new();
        assert_ne!(id1, id2, "HolderIds should be unique");
    }

    #[test]
    fn test_trade_id_creation() {
        let id1 = TradeId::new();
        let id2 = TradeId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_id_serialization() {
        let vault = VaultId::new(42);
        let json = serde_json::to_string(&vault).unwrap();
        assert_eq!(json, "42");
        let back: VaultId = serde_json::from_str(&json).unwrap();
        assert_eq!(vault, back);

        let holder = HolderId::new();
        let json = serde_json::to_string(&holder).unwrap();
        let back: HolderId = serde_json::from_str(&json).unwrap();
        assert_eq!(holder, back);
    }
}
