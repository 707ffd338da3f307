//! Share ledger — per-holder balance records for one vault
//!
//! The conservation source of truth: at all times the sum of holder shares
//! equals the vault's `shares_outstanding`. Records are created lazily on
//! first credit and pruned when a balance reaches zero.
//!
//! Like the funds ledger, mutating methods assert preconditions; callers
//! validate with typed errors before committing.

use std::collections::HashMap;
use types::holder::ShareHolder;
use types::ids::{HolderId, VaultId};

/// Per-vault share balances
#[derive(Debug)]
pub struct ShareLedger {
    vault_id: VaultId,
    holders: HashMap<HolderId, ShareHolder>,
}

impl ShareLedger {
    /// Create a ledger seeded with the creator owning every share
    pub fn new(vault_id: VaultId, creator: HolderId, total_shares: u64, timestamp: i64) -> Self {
        let mut holders = HashMap::new();
        holders.insert(
            creator,
            ShareHolder::new(vault_id, creator, total_shares, timestamp),
        );
        Self { vault_id, holders }
    }

    /// Shares held, zero for unknown holders
    pub fn balance_of(&self, holder: HolderId) -> u64 {
        self.holders.get(&holder).map(|h| h.shares).unwrap_or(0)
    }

    /// The full balance record, if one exists
    pub fn record(&self, holder: HolderId) -> Option<&ShareHolder> {
        self.holders.get(&holder)
    }

    /// Number of holders with a non-zero balance
    pub fn holder_count(&self) -> usize {
        self.holders.len()
    }

    /// Sum of all holder balances
    ///
    /// Must equal the vault's `shares_outstanding` at every commit point.
    pub fn total_shares(&self) -> u64 {
        self.holders.values().map(|h| h.shares).sum()
    }

    /// Credit shares, creating the record lazily
    pub fn credit(&mut self, holder: HolderId, shares: u64, timestamp: i64) {
        if shares == 0 {
            return;
        }
        let record = self
            .holders
            .entry(holder)
            .or_insert_with(|| ShareHolder::new(self.vault_id, holder, 0, timestamp));
        record.shares += shares;
        record.last_updated = timestamp;
    }

    /// Debit shares, pruning the record at zero
    ///
    /// # Panics
    /// Panics if the holder owns fewer than `shares`.
    pub fn debit(&mut self, holder: HolderId, shares: u64, timestamp: i64) {
        if shares == 0 {
            return;
        }
        let record = self
            .holders
            .get_mut(&holder)
            .expect("debit against unknown holder");
        assert!(record.shares >= shares, "Share debit exceeds balance");
        record.shares -= shares;
        record.last_updated = timestamp;
        if record.is_empty() {
            self.holders.remove(&holder);
        }
    }

    /// Move shares between holders
    pub fn transfer(&mut self, from: HolderId, to: HolderId, shares: u64, timestamp: i64) {
        if from == to {
            return;
        }
        self.debit(from, shares, timestamp);
        self.credit(to, shares, timestamp);
    }

    /// Drop every record; used only by redemption, where outstanding
    /// simultaneously goes to zero so conservation holds.
    pub fn clear(&mut self) {
        self.holders.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TS: i64 = 1708123456789000000;

    #[test]
    fn test_ledger_seeded_with_creator() {
        let creator = HolderId::new();
        let ledger = ShareLedger::new(VaultId::new(1), creator, 1_000_000, TS);

        assert_eq!(ledger.balance_of(creator), 1_000_000);
        assert_eq!(ledger.total_shares(), 1_000_000);
        assert_eq!(ledger.holder_count(), 1);
    }

    #[test]
    fn test_transfer_conserves_total() {
        let creator = HolderId::new();
        let buyer = HolderId::new();
        let mut ledger = ShareLedger::new(VaultId::new(1), creator, 10_000, TS);

        ledger.transfer(creator, buyer, 4_000, TS + 1);

        assert_eq!(ledger.balance_of(creator), 6_000);
        assert_eq!(ledger.balance_of(buyer), 4_000);
        assert_eq!(ledger.total_shares(), 10_000);
        assert_eq!(ledger.holder_count(), 2);
    }

    #[test]
    fn test_record_pruned_at_zero() {
        let creator = HolderId::new();
        let buyer = HolderId::new();
        let mut ledger = ShareLedger::new(VaultId::new(1), creator, 5_000, TS);

        ledger.transfer(creator, buyer, 5_000, TS + 1);

        assert_eq!(ledger.balance_of(creator), 0);
        assert!(ledger.record(creator).is_none());
        assert_eq!(ledger.holder_count(), 1);
        assert_eq!(ledger.total_shares(), 5_000);
    }

    #[test]
    fn test_lazy_record_creation() {
        let creator = HolderId::new();
        let newcomer = HolderId::new();
        let mut ledger = ShareLedger::new(VaultId::new(2), creator, 5_000, TS);

        assert!(ledger.record(newcomer).is_none());
        ledger.credit(newcomer, 1, TS + 1);
        assert_eq!(ledger.record(newcomer).unwrap().shares, 1);
    }

    #[test]
    #[should_panic(expected = "Share debit exceeds balance")]
    fn test_overdebit_panics() {
        let creator = HolderId::new();
        let mut ledger = ShareLedger::new(VaultId::new(1), creator, 100, TS);
        ledger.debit(creator, 101, TS + 1);
    }

    #[test]
    fn test_self_transfer_is_noop() {
        let creator = HolderId::new();
        let mut ledger = ShareLedger::new(VaultId::new(1), creator, 100, TS);
        ledger.transfer(creator, creator, 60, TS + 1);
        assert_eq!(ledger.balance_of(creator), 100);
    }
}
