//! Asset vault lifecycle types
//!
//! An `AssetVault` represents one indivisible underlying asset fractioned
//! into a fixed number of fungible shares. The vault is created once,
//! transitions Active → Redeemed exactly once, and is never deleted.

use crate::ids::{HolderId, VaultId};
use serde::{Deserialize, Serialize};

/// Minimum number of shares a vault may be split into
pub const MIN_SHARES: u64 = 1_000;

/// Maximum number of shares a vault may be split into
pub const MAX_SHARES: u64 = 1_000_000_000;

/// Class of the underlying asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetType {
    Nft,
    RealEstate,
    Art,
    Commodity,
    IntellectualProperty,
    MetaverseLand,
}

impl AssetType {
    /// Access gate required to fractionalize this asset class, if any.
    ///
    /// Regulated classes are gated behind the access-control collaborator;
    /// everything else is open.
    pub fn access_gate(&self) -> Option<&'static str> {
        match self {
            AssetType::RealEstate => Some("premium_real_estate"),
            AssetType::IntellectualProperty => Some("premium_ip"),
            _ => None,
        }
    }
}

/// Vault lifecycle status
///
/// `Active --[redeem, 100% owned, no open orders]--> Redeemed` is the only
/// transition; `Redeemed` is terminal and the vault becomes inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VaultStatus {
    /// Open for listing, trading, and valuation updates
    Active,
    /// Underlying asset released; permanently inert
    Redeemed,
}

/// One fractionalized asset
///
/// Invariants: `shares_outstanding <= total_shares`; `valuation_usd > 0`;
/// `shares_outstanding` only ever decreases, and only to 0 on redemption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetVault {
    pub vault_id: VaultId,
    pub creator: HolderId,
    pub asset_type: AssetType,
    /// Fixed at creation; never changes
    pub total_shares: u64,
    pub shares_outstanding: u64,
    /// Whole-dollar valuation of the underlying asset
    pub valuation_usd: u64,
    /// Immutable pointer to off-ledger asset metadata
    pub metadata_uri: String,
    pub status: VaultStatus,
    pub created_at: i64, // Unix nanos
    pub updated_at: i64, // Unix nanos
    pub version: u64,    // Mutation counter
}

impl AssetVault {
    /// Create a new active vault with all shares outstanding
    pub fn new(
        vault_id: VaultId,
        creator: HolderId,
        asset_type: AssetType,
        total_shares: u64,
        valuation_usd: u64,
        metadata_uri: String,
        timestamp: i64,
    ) -> Self {
        Self {
            vault_id,
            creator,
            asset_type,
            total_shares,
            shares_outstanding: total_shares,
            valuation_usd,
            metadata_uri,
            status: VaultStatus::Active,
            created_at: timestamp,
            updated_at: timestamp,
            version: 0,
        }
    }

    /// Check if the vault accepts mutations
    pub fn is_active(&self) -> bool {
        matches!(self.status, VaultStatus::Active)
    }

    /// Check structural invariants
    pub fn check_invariant(&self) -> bool {
        self.shares_outstanding <= self.total_shares && self.valuation_usd > 0
    }

    /// Record a committed mutation
    pub fn touch(&mut self, timestamp: i64) {
        self.updated_at = timestamp;
        self.version += 1;
    }

    /// Transition to the terminal Redeemed state
    ///
    /// # Panics
    /// Panics if the vault is not active; callers gate on status first.
    pub fn mark_redeemed(&mut self, timestamp: i64) {
        assert!(self.is_active(), "Vault already redeemed");
        self.status = VaultStatus::Redeemed;
        self.shares_outstanding = 0;
        self.touch(timestamp);
    }
}
