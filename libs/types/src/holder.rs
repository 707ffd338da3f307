//! Per-vault share balance records
//!
//! A `ShareHolder` is one row of the share ledger: the number of shares a
//! holder owns in one vault. Records are created lazily on first credit
//! and pruned when the balance reaches zero.

use crate::ids::{HolderId, VaultId};
use serde::{Deserialize, Serialize};

/// One holder's share balance in one vault
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareHolder {
    pub vault_id: VaultId,
    pub holder: HolderId,
    pub shares: u64,
    pub last_updated: i64, // Unix nanos
}

impl ShareHolder {
    /// Create a new balance record
    pub fn new(vault_id: VaultId, holder: HolderId, shares: u64, timestamp: i64) -> Self {
        Self {
            vault_id,
            holder,
            shares,
            last_updated: timestamp,
        }
    }

    /// Check if the record is empty and eligible for pruning
    pub fn is_empty(&self) -> bool {
        self.shares == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_holder_creation() {
        let record = ShareHolder::new(VaultId::new(1), HolderId::new(), 500, 1708123456789000000);
        assert_eq!(record.shares, 500);
        assert!(!record.is_empty());
    }

    #[test]
    fn test_empty_record_prunable() {
        let record = ShareHolder::new(VaultId::new(1), HolderId::new(), 0, 1708123456789000000);
        assert!(record.is_empty());
    }

    #[test]
    fn test_share_holder_serialization() {
        let record = ShareHolder::new(VaultId::new(9), HolderId::new(), 42, 1708123456789000000);
        let json = serde_json::to_string(&record).unwrap();
        let back: ShareHolder = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
