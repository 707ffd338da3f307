//! Redemption gate — terminal exchange of 100% ownership for the asset
//!
//! Runs at most once per vault. The redeemer must hold every outstanding
//! share and have no open sell orders; custody releases the underlying
//! asset and the vault becomes permanently inert.

use types::errors::{MarketError, StateError};
use types::fee::FeeSchedule;
use types::ids::HolderId;
use types::vault::VaultStatus;

use crate::collaborators::{Collaborators, TreasuryAccount};
use crate::domain::VaultDomain;
use crate::funds::FundsLedger;

/// Redeem the underlying asset against sole, total share ownership.
///
/// All-or-nothing: the fee credit and custody release are attempted before
/// the status flip and ledger clear, so a collaborator failure leaves the
/// vault untouched and still redeemable with the asset still in custody.
pub(crate) fn redeem_asset(
    domain: &mut VaultDomain,
    funds: &mut FundsLedger,
    fees: &FeeSchedule,
    collaborators: &Collaborators,
    redeemer: HolderId,
    timestamp: i64,
) -> Result<(), MarketError> {
    let vault_id = domain.vault.vault_id;

    if domain.vault.status == VaultStatus::Redeemed {
        return Err(StateError::VaultAlreadyRedeemed { vault_id }.into());
    }

    // Sole, total ownership
    let held = domain.ledger.balance_of(redeemer);
    let outstanding = domain.vault.shares_outstanding;
    if held != outstanding {
        return Err(StateError::InsufficientSharesForRedemption { held, outstanding }.into());
    }

    // The redeemer's own listings must be cancelled first; with 100%
    // ownership no other holder can have a live order.
    let open = domain.book.open_orders_of(redeemer);
    if open > 0 {
        return Err(StateError::OpenOrdersOutstanding { count: open }.into());
    }

    // Redemption fee
    let fee = fees.redemption_fee;
    let available = funds.balance_of(redeemer);
    if available < fee {
        return Err(StateError::InsufficientBalance {
            required: fee,
            available,
        }
        .into());
    }

    // Fallible collaborator calls before any mutation. The custody
    // release is irreversible, so it must be the last thing that can
    // fail: a rejected fee credit leaves the asset in custody and the
    // vault redeemable.
    if fee > rust_decimal::Decimal::ZERO {
        collaborators
            .treasury
            .credit(TreasuryAccount::Operations, redeemer, fee)?;
    }
    collaborators.custody.release(vault_id, redeemer)?;

    // Commit: the ledger empties as outstanding drops to zero, so
    // conservation holds through the terminal transition.
    funds.debit(redeemer, fee);
    domain.ledger.clear();
    domain.vault.mark_redeemed(timestamp);
    debug_assert!(domain.book.is_empty(), "live orders on a redeemed vault");
    debug_assert!(domain.check_conservation());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::sync::Arc;
    use types::errors::CollaboratorError;
    use types::ids::VaultId;
    use types::vault::{AssetType, AssetVault};

    use crate::book;
    use crate::collaborators::{InMemoryCustody, Treasury};

    const TS: i64 = 1708123456789000000;

    fn setup() -> (VaultDomain, FundsLedger, Collaborators, HolderId) {
        let creator = HolderId::new();
        let vault = AssetVault::new(
            VaultId::new(1),
            creator,
            AssetType::Art,
            10_000,
            100_000,
            "ipfs://QmMeta".to_string(),
            TS,
        );
        let domain = VaultDomain::new(vault, TS);
        let mut funds = FundsLedger::new();
        funds.deposit(creator, Decimal::from(500));
        (domain, funds, Collaborators::in_memory(), creator)
    }

    #[test]
    fn test_sole_owner_redeems() {
        let (mut domain, mut funds, collaborators, creator) = setup();

        redeem_asset(
            &mut domain,
            &mut funds,
            &FeeSchedule::default(),
            &collaborators,
            creator,
            TS + 1,
        )
        .unwrap();

        assert_eq!(domain.vault.status, VaultStatus::Redeemed);
        assert_eq!(domain.vault.shares_outstanding, 0);
        assert_eq!(domain.ledger.holder_count(), 0);
        assert!(domain.check_conservation());
        // 50-token redemption fee debited
        assert_eq!(funds.balance_of(creator), Decimal::from(450));
    }

    #[test]
    fn test_partial_owner_cannot_redeem() {
        let (mut domain, mut funds, collaborators, creator) = setup();
        let other = HolderId::new();
        domain.ledger.transfer(creator, other, 1, TS);

        let err = redeem_asset(
            &mut domain,
            &mut funds,
            &FeeSchedule::default(),
            &collaborators,
            creator,
            TS + 1,
        )
        .unwrap_err();

        assert_eq!(
            err,
            MarketError::State(StateError::InsufficientSharesForRedemption {
                held: 9_999,
                outstanding: 10_000,
            })
        );
        assert_eq!(domain.vault.status, VaultStatus::Active);
    }

    #[test]
    fn test_open_orders_block_redemption() {
        let (mut domain, mut funds, collaborators, creator) = setup();
        let order_id =
            book::list_shares_for_sale(&mut domain, creator, 100, Decimal::ONE, TS).unwrap();

        let err = redeem_asset(
            &mut domain,
            &mut funds,
            &FeeSchedule::default(),
            &collaborators,
            creator,
            TS + 1,
        )
        .unwrap_err();
        assert_eq!(
            err,
            MarketError::State(StateError::OpenOrdersOutstanding { count: 1 })
        );

        // Cancelling clears the path
        book::cancel_sell_order(&mut domain, order_id, creator, TS + 2).unwrap();
        redeem_asset(
            &mut domain,
            &mut funds,
            &FeeSchedule::default(),
            &collaborators,
            creator,
            TS + 3,
        )
        .unwrap();
    }

    #[test]
    fn test_second_redemption_rejected() {
        let (mut domain, mut funds, collaborators, creator) = setup();

        redeem_asset(
            &mut domain,
            &mut funds,
            &FeeSchedule::default(),
            &collaborators,
            creator,
            TS + 1,
        )
        .unwrap();

        let err = redeem_asset(
            &mut domain,
            &mut funds,
            &FeeSchedule::default(),
            &collaborators,
            creator,
            TS + 2,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            MarketError::State(StateError::VaultAlreadyRedeemed { .. })
        ));
    }

    struct RejectingTreasury;

    impl Treasury for RejectingTreasury {
        fn credit(
            &self,
            _account: TreasuryAccount,
            _from: HolderId,
            _amount: Decimal,
        ) -> Result<(), CollaboratorError> {
            Err(CollaboratorError::Treasury {
                message: "offline".to_string(),
            })
        }
    }

    #[test]
    fn test_rejected_fee_leaves_asset_in_custody() {
        let (mut domain, mut funds, mut collaborators, creator) = setup();
        let custody = Arc::new(InMemoryCustody::new());
        collaborators.custody = custody.clone();
        collaborators.treasury = Arc::new(RejectingTreasury);

        let err = redeem_asset(
            &mut domain,
            &mut funds,
            &FeeSchedule::default(),
            &collaborators,
            creator,
            TS + 1,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            MarketError::Collaborator(CollaboratorError::Treasury { .. })
        ));

        // The vault is still redeemable and the asset never left custody
        assert_eq!(domain.vault.status, VaultStatus::Active);
        assert_eq!(funds.balance_of(creator), Decimal::from(500));
        assert!(custody.releases().is_empty());
    }

    #[test]
    fn test_redemption_fee_required() {
        let (mut domain, _, collaborators, creator) = setup();
        let mut funds = FundsLedger::new();
        funds.deposit(creator, Decimal::from(49));

        let err = redeem_asset(
            &mut domain,
            &mut funds,
            &FeeSchedule::default(),
            &collaborators,
            creator,
            TS + 1,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            MarketError::State(StateError::InsufficientBalance { .. })
        ));
        assert_eq!(domain.vault.status, VaultStatus::Active);
    }
}
