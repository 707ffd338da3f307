//! Vault registry — fractionalizes one asset into a new vault
//!
//! Runs once per asset: validates the share split and valuation, charges
//! the (possibly discounted) creation fee, and seeds the consistency
//! domain with the creator owning every share. Either every record exists
//! afterwards or none does.

use types::errors::{MarketError, StateError, ValidationError};
use types::fee::FeeSchedule;
use types::ids::{HolderId, VaultId};
use types::vault::{AssetType, AssetVault, MAX_SHARES, MIN_SHARES};

use crate::collaborators::{Collaborators, TreasuryAccount};
use crate::domain::VaultDomain;
use crate::funds::FundsLedger;

/// Create a new fractional asset vault.
///
/// Checks performed (in order):
/// 1. Share split within `[MIN_SHARES, MAX_SHARES]`
/// 2. Positive valuation, non-empty metadata URI
/// 3. Access gate for regulated asset classes
/// 4. Creator funds cover the discounted creation fee
///
/// Only after the treasury accepts the fee is any state mutated, so a
/// rejected creation leaves no observable records.
#[allow(clippy::too_many_arguments)]
pub(crate) fn create_vault(
    vault_id: VaultId,
    creator: HolderId,
    asset_type: AssetType,
    total_shares: u64,
    valuation_usd: u64,
    metadata_uri: String,
    fees: &FeeSchedule,
    funds: &mut FundsLedger,
    collaborators: &Collaborators,
    timestamp: i64,
) -> Result<VaultDomain, MarketError> {
    // 1. Share split bounds
    if total_shares < MIN_SHARES {
        return Err(ValidationError::InvalidShareAmount(format!(
            "{total_shares} below minimum split of {MIN_SHARES}"
        ))
        .into());
    }
    if total_shares > MAX_SHARES {
        return Err(ValidationError::InvalidShareAmount(format!(
            "{total_shares} above maximum split of {MAX_SHARES}"
        ))
        .into());
    }

    // 2. Valuation and metadata
    if valuation_usd == 0 {
        return Err(ValidationError::InvalidValuation("must be positive".to_string()).into());
    }
    if metadata_uri.is_empty() {
        return Err(ValidationError::InvalidMetadataUri.into());
    }

    // 3. Regulated asset classes require an access grant
    if let Some(gate_id) = asset_type.access_gate() {
        if !collaborators.access.check_access(creator, gate_id) {
            return Err(MarketError::Unauthorized {
                holder: creator,
                action: format!("fractionalize assets behind gate {gate_id}"),
            });
        }
    }

    // 4. Creation fee after the enterprise discount
    let discount = collaborators.discounts.discount_bps(creator);
    let fee = fees.creation_fee(discount);
    let available = funds.balance_of(creator);
    if available < fee {
        return Err(StateError::InsufficientBalance {
            required: fee,
            available,
        }
        .into());
    }

    if fee > rust_decimal::Decimal::ZERO {
        collaborators
            .treasury
            .credit(TreasuryAccount::Operations, creator, fee)?;
    }

    // Commit
    funds.debit(creator, fee);
    let vault = AssetVault::new(
        vault_id,
        creator,
        asset_type,
        total_shares,
        valuation_usd,
        metadata_uri,
        timestamp,
    );
    Ok(VaultDomain::new(vault, timestamp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::sync::Arc;

    use crate::collaborators::{ClosedAccess, FlatDiscount};
    use types::fee::DiscountBps;

    const TS: i64 = 1708123456789000000;

    fn setup() -> (FundsLedger, Collaborators, HolderId) {
        let mut funds = FundsLedger::new();
        let creator = HolderId::new();
        funds.deposit(creator, Decimal::from(1_000));
        (funds, Collaborators::in_memory(), creator)
    }

    fn create(
        funds: &mut FundsLedger,
        collaborators: &Collaborators,
        creator: HolderId,
        total_shares: u64,
        valuation: u64,
    ) -> Result<VaultDomain, MarketError> {
        create_vault(
            VaultId::new(1),
            creator,
            AssetType::Art,
            total_shares,
            valuation,
            "ipfs://QmMeta".to_string(),
            &FeeSchedule::default(),
            funds,
            collaborators,
            TS,
        )
    }

    #[test]
    fn test_create_vault_seeds_creator() {
        let (mut funds, collaborators, creator) = setup();

        let domain = create(&mut funds, &collaborators, creator, 1_000_000, 100_000).unwrap();

        assert_eq!(domain.vault.shares_outstanding, 1_000_000);
        assert_eq!(domain.ledger.balance_of(creator), 1_000_000);
        assert!(domain.book.is_empty());
        assert!(domain.check_conservation());
        // Flat 100-token creation fee debited
        assert_eq!(funds.balance_of(creator), Decimal::from(900));
    }

    #[test]
    fn test_share_split_bounds() {
        let (mut funds, collaborators, creator) = setup();

        let err = create(&mut funds, &collaborators, creator, 500, 100_000).unwrap_err();
        assert!(matches!(
            err,
            MarketError::Validation(ValidationError::InvalidShareAmount(_))
        ));

        let err = create(&mut funds, &collaborators, creator, MAX_SHARES + 1, 100_000).unwrap_err();
        assert!(matches!(
            err,
            MarketError::Validation(ValidationError::InvalidShareAmount(_))
        ));

        // No fee taken on rejection
        assert_eq!(funds.balance_of(creator), Decimal::from(1_000));
    }

    #[test]
    fn test_zero_valuation_rejected() {
        let (mut funds, collaborators, creator) = setup();
        let err = create(&mut funds, &collaborators, creator, 10_000, 0).unwrap_err();
        assert!(matches!(
            err,
            MarketError::Validation(ValidationError::InvalidValuation(_))
        ));
    }

    #[test]
    fn test_empty_metadata_rejected() {
        let (mut funds, collaborators, creator) = setup();
        let err = create_vault(
            VaultId::new(1),
            creator,
            AssetType::Art,
            10_000,
            100_000,
            String::new(),
            &FeeSchedule::default(),
            &mut funds,
            &collaborators,
            TS,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            MarketError::Validation(ValidationError::InvalidMetadataUri)
        ));
    }

    #[test]
    fn test_insufficient_fee_balance() {
        let (_, collaborators, _) = setup();
        let mut funds = FundsLedger::new();
        let pauper = HolderId::new();
        funds.deposit(pauper, Decimal::from(99));

        let err = create(&mut funds, &collaborators, pauper, 10_000, 100_000).unwrap_err();
        assert!(matches!(
            err,
            MarketError::State(StateError::InsufficientBalance { .. })
        ));
        assert_eq!(funds.balance_of(pauper), Decimal::from(99));
    }

    #[test]
    fn test_premium_class_gated() {
        let (mut funds, mut collaborators, creator) = setup();
        collaborators.access = Arc::new(ClosedAccess);

        let err = create_vault(
            VaultId::new(1),
            creator,
            AssetType::RealEstate,
            10_000,
            100_000,
            "ipfs://QmDeed".to_string(),
            &FeeSchedule::default(),
            &mut funds,
            &collaborators,
            TS,
        )
        .unwrap_err();
        assert!(matches!(err, MarketError::Unauthorized { .. }));

        // Ungated classes still pass with the same policy
        create(&mut funds, &collaborators, creator, 10_000, 100_000).unwrap();
    }

    #[test]
    fn test_enterprise_discount_reduces_fee() {
        let (mut funds, mut collaborators, creator) = setup();
        collaborators.discounts = Arc::new(FlatDiscount(DiscountBps::new(5_000, 0)));

        create(&mut funds, &collaborators, creator, 10_000, 100_000).unwrap();

        // 50% off the 100-token fee
        assert_eq!(funds.balance_of(creator), Decimal::from(950));
    }
}
