//! Per-vault consistency domain
//!
//! One vault's record, its share ledger, and its order book form a single
//! consistency domain mutated under one lock. Every committed mutation
//! bumps the vault version and re-checks conservation; different vaults
//! never coordinate.

use types::ids::HolderId;
use types::vault::AssetVault;

use crate::book::OrderBook;
use crate::ledger::ShareLedger;

/// One vault's complete mutable state
#[derive(Debug)]
pub struct VaultDomain {
    pub vault: AssetVault,
    pub ledger: ShareLedger,
    pub book: OrderBook,
}

impl VaultDomain {
    /// Build the domain for a freshly created vault: creator owns every
    /// share, the book is empty.
    pub fn new(vault: AssetVault, timestamp: i64) -> Self {
        let ledger = ShareLedger::new(vault.vault_id, vault.creator, vault.total_shares, timestamp);
        let book = OrderBook::new(vault.vault_id);
        Self {
            vault,
            ledger,
            book,
        }
    }

    /// Conservation: the ledger sum equals shares outstanding
    pub fn check_conservation(&self) -> bool {
        self.ledger.total_shares() == self.vault.shares_outstanding
    }

    /// Encumbrance never exceeds a holder's balance
    pub fn check_encumbrance(&self, holder: HolderId) -> bool {
        self.book.encumbered(holder) <= self.ledger.balance_of(holder)
    }

    /// Record a committed mutation
    ///
    /// # Panics
    /// Debug-asserts the conservation invariant; a violation is an engine
    /// bug, never a caller error.
    pub fn commit(&mut self, timestamp: i64) {
        debug_assert!(self.check_conservation(), "share conservation violated");
        self.vault.touch(timestamp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use types::ids::VaultId;
    use types::vault::AssetType;

    const TS: i64 = 1708123456789000000;

    fn sample_domain(total_shares: u64) -> VaultDomain {
        let vault = AssetVault::new(
            VaultId::new(1),
            HolderId::new(),
            AssetType::Nft,
            total_shares,
            50_000,
            "ipfs://QmMeta".to_string(),
            TS,
        );
        VaultDomain::new(vault, TS)
    }

    #[test]
    fn test_fresh_domain_conserves() {
        let domain = sample_domain(10_000);
        assert!(domain.check_conservation());
        assert_eq!(domain.ledger.balance_of(domain.vault.creator), 10_000);
        assert!(domain.book.is_empty());
    }

    #[test]
    fn test_commit_bumps_version() {
        let mut domain = sample_domain(10_000);
        let before = domain.vault.version;
        domain.commit(TS + 1);
        assert_eq!(domain.vault.version, before + 1);
        assert_eq!(domain.vault.updated_at, TS + 1);
    }

    #[test]
    fn test_encumbrance_check() {
        let mut domain = sample_domain(10_000);
        let creator = domain.vault.creator;
        domain
            .book
            .insert(creator, 4_000, Decimal::ONE, TS)
            .unwrap();

        assert!(domain.check_encumbrance(creator));
        assert_eq!(domain.book.encumbered(creator), 4_000);
    }
}
