//! Trade engine — settles buys against resident sell orders
//!
//! The buyer names the order id explicitly; there is no best-price
//! matching. Settlement is atomic under the vault lock: shares, payment,
//! and fee legs all move or none do. Replaying an identical call executes
//! a second independent trade — at-most-once semantics belong to the
//! caller.

use rust_decimal::Decimal;
use types::errors::{MarketError, StateError, ValidationError};
use types::fee::FeeSchedule;
use types::ids::{HolderId, OrderId};
use types::trade::Fill;

use crate::collaborators::{Activity, Collaborators, TreasuryAccount};
use crate::domain::VaultDomain;
use crate::funds::FundsLedger;

/// Buy shares from one named sell order.
///
/// Checks performed (in order):
/// 1. Vault active
/// 2. Order resident, requested amount within its remainder
/// 3. Buyer funds cover gross plus the discounted trading fee
///
/// The gross payment goes to the seller; the fee goes to the treasury
/// rewards pool; the rewards tracker is notified with the traded volume.
/// Collaborator calls precede every mutation, so their failure rolls the
/// operation back by construction.
pub(crate) fn buy_shares(
    domain: &mut VaultDomain,
    funds: &mut FundsLedger,
    fees: &FeeSchedule,
    collaborators: &Collaborators,
    buyer: HolderId,
    order_id: OrderId,
    shares: u64,
    timestamp: i64,
) -> Result<Fill, MarketError> {
    let vault_id = domain.vault.vault_id;

    // 1. Vault must be open for trading
    if !domain.vault.is_active() {
        return Err(StateError::VaultNotActive { vault_id }.into());
    }

    // 2. Resolve the named order
    let order = domain
        .book
        .get(order_id)
        .ok_or(StateError::OrderNotFound { order_id })?;
    let seller = order.seller;
    let price_per_share = order.price_per_share;
    let remaining = order.shares_remaining;

    if shares == 0 {
        return Err(
            ValidationError::InvalidShareAmount("must buy at least one share".to_string()).into(),
        );
    }
    if shares > remaining {
        return Err(StateError::InsufficientSharesInOrder {
            requested: shares,
            remaining,
        }
        .into());
    }

    // 3. Price the trade
    let gross = Decimal::from(shares) * price_per_share;
    let discount = collaborators.discounts.discount_bps(buyer);
    let fee = fees.trading_fee(gross, discount);
    let total = gross + fee;

    let available = funds.balance_of(buyer);
    if available < total {
        return Err(StateError::InsufficientPaymentBalance {
            required: total,
            available,
        }
        .into());
    }

    // Fallible collaborator calls before any mutation. The treasury
    // credit moves money, so it must be the last thing that can fail:
    // a rejected rewards notification leaves no fee with the treasury.
    collaborators.rewards.record_activity(
        buyer,
        Activity {
            trading_volume: gross,
        },
    )?;
    if fee > Decimal::ZERO {
        collaborators
            .treasury
            .credit(TreasuryAccount::RewardsPool, buyer, fee)?;
    }

    // Commit: payment legs, share transfer, order decrement
    funds.debit(buyer, total);
    funds.deposit(seller, gross);
    domain.ledger.transfer(seller, buyer, shares, timestamp);
    domain.book.fill(order_id, shares);
    debug_assert!(domain.check_encumbrance(seller));
    domain.commit(timestamp);

    Ok(Fill::new(
        vault_id,
        order_id,
        seller,
        buyer,
        shares,
        price_per_share,
        gross,
        fee,
        timestamp,
    ))
}
