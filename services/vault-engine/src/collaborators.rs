//! External collaborator capability traits
//!
//! Cross-component calls (treasury, discounts, access control, rewards,
//! custody) are synchronous capability interfaces with explicit
//! success/failure contracts, never fire-and-forget messaging. A failed
//! call aborts the enclosing operation before any ledger mutation.
//!
//! In-memory reference implementations live alongside the traits; they are
//! the engine defaults and the test doubles.

use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use types::errors::CollaboratorError;
use types::fee::DiscountBps;
use types::ids::{HolderId, VaultId};

/// Destination account inside the treasury collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreasuryAccount {
    /// Vault creation and redemption fees
    Operations,
    /// Trading fees, distributed back to participants
    RewardsPool,
}

/// Receives protocol fees
pub trait Treasury: Send + Sync {
    fn credit(
        &self,
        account: TreasuryAccount,
        from: HolderId,
        amount: Decimal,
    ) -> Result<(), CollaboratorError>;
}

/// Per-account enterprise fee discounts
pub trait EnterpriseDiscount: Send + Sync {
    fn discount_bps(&self, account: HolderId) -> DiscountBps;
}

/// Gates vault creation for regulated asset classes
pub trait AccessControl: Send + Sync {
    fn check_access(&self, account: HolderId, gate_id: &str) -> bool;
}

/// Activity notification payload for the rewards collaborator
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub trading_volume: Decimal,
}

/// Milestone/rewards progress tracker, notified per trade
pub trait RewardsTracker: Send + Sync {
    fn record_activity(&self, account: HolderId, activity: Activity)
        -> Result<(), CollaboratorError>;
}

/// Holds the underlying asset; releases it on redemption
pub trait AssetCustody: Send + Sync {
    fn release(&self, vault_id: VaultId, to: HolderId) -> Result<(), CollaboratorError>;
}

/// Bundle of collaborator handles the engine operates against
#[derive(Clone)]
pub struct Collaborators {
    pub treasury: Arc<dyn Treasury>,
    pub discounts: Arc<dyn EnterpriseDiscount>,
    pub access: Arc<dyn AccessControl>,
    pub rewards: Arc<dyn RewardsTracker>,
    pub custody: Arc<dyn AssetCustody>,
}

impl Collaborators {
    /// All-in-memory collaborator set with open access and no discounts
    pub fn in_memory() -> Self {
        Self {
            treasury: Arc::new(InMemoryTreasury::new()),
            discounts: Arc::new(FlatDiscount::default()),
            access: Arc::new(OpenAccess),
            rewards: Arc::new(InMemoryRewards::new()),
            custody: Arc::new(InMemoryCustody::new()),
        }
    }
}

// ── In-memory implementations ───────────────────────────────────────

/// Treasury that accumulates credited fees per account
#[derive(Debug, Default)]
pub struct InMemoryTreasury {
    accounts: Mutex<HashMap<TreasuryAccount, Decimal>>,
}

impl InMemoryTreasury {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total credited to one treasury account
    pub fn balance(&self, account: TreasuryAccount) -> Decimal {
        self.accounts
            .lock()
            .get(&account)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

impl Treasury for InMemoryTreasury {
    fn credit(
        &self,
        account: TreasuryAccount,
        _from: HolderId,
        amount: Decimal,
    ) -> Result<(), CollaboratorError> {
        let mut accounts = self.accounts.lock();
        let balance = accounts.entry(account).or_insert(Decimal::ZERO);
        *balance += amount;
        Ok(())
    }
}

/// Same discount for every account
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatDiscount(pub DiscountBps);

impl EnterpriseDiscount for FlatDiscount {
    fn discount_bps(&self, _account: HolderId) -> DiscountBps {
        self.0
    }
}

/// Grants every gate
#[derive(Debug, Clone, Copy)]
pub struct OpenAccess;

impl AccessControl for OpenAccess {
    fn check_access(&self, _account: HolderId, _gate_id: &str) -> bool {
        true
    }
}

/// Denies every gate
#[derive(Debug, Clone, Copy)]
pub struct ClosedAccess;

impl AccessControl for ClosedAccess {
    fn check_access(&self, _account: HolderId, _gate_id: &str) -> bool {
        false
    }
}

/// Rewards tracker that accumulates trading volume per account
#[derive(Debug, Default)]
pub struct InMemoryRewards {
    volume: Mutex<HashMap<HolderId, Decimal>>,
}

impl InMemoryRewards {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_volume(&self, account: HolderId) -> Decimal {
        self.volume
            .lock()
            .get(&account)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

impl RewardsTracker for InMemoryRewards {
    fn record_activity(
        &self,
        account: HolderId,
        activity: Activity,
    ) -> Result<(), CollaboratorError> {
        let mut volume = self.volume.lock();
        let total = volume.entry(account).or_insert(Decimal::ZERO);
        *total += activity.trading_volume;
        Ok(())
    }
}

/// Custody that records each release
#[derive(Debug, Default)]
pub struct InMemoryCustody {
    released: Mutex<Vec<(VaultId, HolderId)>>,
}

impl InMemoryCustody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn releases(&self) -> Vec<(VaultId, HolderId)> {
        self.released.lock().clone()
    }
}

impl AssetCustody for InMemoryCustody {
    fn release(&self, vault_id: VaultId, to: HolderId) -> Result<(), CollaboratorError> {
        self.released.lock().push((vault_id, to));
        Ok(())
    }
}
