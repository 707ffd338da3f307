//! Bounded per-vault order book
//!
//! A fixed-capacity, arena-indexed array of open sell orders. The cap
//! (`MAX_ORDERS`) bounds worst-case scan cost for listing, matching, and
//! cancellation, and keeps one vault's book from interfering with another.
//! Orders carry insertion order through their monotonic ids; the book is
//! never price-sorted.

use rust_decimal::Decimal;
use types::errors::{MarketError, StateError, ValidationError};
use types::ids::{HolderId, OrderId, VaultId};
use types::order::{SellOrder, MAX_ORDERS};

use crate::domain::VaultDomain;

/// Open sell orders for one vault
#[derive(Debug)]
pub struct OrderBook {
    vault_id: VaultId,
    /// Fixed arena; a `None` slot is free
    slots: Vec<Option<SellOrder>>,
    /// Next order id, monotonic within this vault, never reused
    next_order_id: u64,
    open: usize,
}

impl OrderBook {
    /// Create an empty book with `MAX_ORDERS` slots
    pub fn new(vault_id: VaultId) -> Self {
        Self {
            vault_id,
            slots: vec![None; MAX_ORDERS],
            next_order_id: 1,
            open: 0,
        }
    }

    pub fn vault_id(&self) -> VaultId {
        self.vault_id
    }

    /// Number of open orders
    pub fn len(&self) -> usize {
        self.open
    }

    pub fn is_empty(&self) -> bool {
        self.open == 0
    }

    pub fn is_full(&self) -> bool {
        self.open == MAX_ORDERS
    }

    pub fn capacity(&self) -> usize {
        MAX_ORDERS
    }

    /// Insert a new order into the first free slot
    ///
    /// Returns the freshly allocated order id, or `OrderBookFull`.
    pub fn insert(
        &mut self,
        seller: HolderId,
        shares: u64,
        price_per_share: Decimal,
        timestamp: i64,
    ) -> Result<OrderId, StateError> {
        if self.is_full() {
            return Err(StateError::OrderBookFull {
                capacity: MAX_ORDERS,
            });
        }
        let slot = self
            .slots
            .iter()
            .position(Option::is_none)
            .expect("book not full but no free slot");

        let order_id = OrderId::new(self.next_order_id);
        self.next_order_id += 1;
        self.slots[slot] = Some(SellOrder::new(
            order_id,
            seller,
            shares,
            price_per_share,
            timestamp,
        ));
        self.open += 1;
        Ok(order_id)
    }

    /// Look up an open order
    pub fn get(&self, order_id: OrderId) -> Option<&SellOrder> {
        self.slots
            .iter()
            .flatten()
            .find(|order| order.order_id == order_id)
    }

    /// Remove an order, returning it if it was resident
    pub fn remove(&mut self, order_id: OrderId) -> Option<SellOrder> {
        let slot = self
            .slots
            .iter()
            .position(|s| s.as_ref().is_some_and(|o| o.order_id == order_id))?;
        let order = self.slots[slot].take();
        self.open -= 1;
        order
    }

    /// Decrement an order after a fill, removing it at zero remaining
    ///
    /// Returns the shares remaining after the fill.
    ///
    /// # Panics
    /// Panics if the order is absent or the fill exceeds its remainder;
    /// the trade engine validates both before committing.
    pub fn fill(&mut self, order_id: OrderId, shares: u64) -> u64 {
        let slot = self
            .slots
            .iter()
            .position(|s| s.as_ref().is_some_and(|o| o.order_id == order_id))
            .expect("fill against unknown order");
        let order = self.slots[slot].as_mut().expect("slot vacated during fill");
        let remaining = order.fill(shares);
        if order.is_filled() {
            self.slots[slot] = None;
            self.open -= 1;
        }
        remaining
    }

    /// Shares the seller has committed across their open orders
    ///
    /// Listed shares stay on the seller's ledger record but are encumbered
    /// by this amount until filled or cancelled.
    pub fn encumbered(&self, seller: HolderId) -> u64 {
        self.slots
            .iter()
            .flatten()
            .filter(|o| o.seller == seller)
            .map(|o| o.shares_remaining)
            .sum()
    }

    /// Number of open orders owned by one seller
    pub fn open_orders_of(&self, seller: HolderId) -> usize {
        self.slots
            .iter()
            .flatten()
            .filter(|o| o.seller == seller)
            .count()
    }

    /// Open orders in insertion order
    pub fn orders(&self) -> Vec<&SellOrder> {
        let mut orders: Vec<&SellOrder> = self.slots.iter().flatten().collect();
        orders.sort_by_key(|o| o.order_id);
        orders
    }
}

// ── Operations ──────────────────────────────────────────────────────

/// List shares for sale, encumbering them under a new order
///
/// The seller must hold at least `shares` unencumbered shares: held shares
/// minus the remainder of their other open orders. Checking at listing
/// time fails over-commitment early instead of at match time.
pub(crate) fn list_shares_for_sale(
    domain: &mut VaultDomain,
    seller: HolderId,
    shares: u64,
    price_per_share: Decimal,
    timestamp: i64,
) -> Result<OrderId, MarketError> {
    let vault_id = domain.vault.vault_id;

    // 1. Vault must be open for trading
    if !domain.vault.is_active() {
        return Err(StateError::VaultNotActive { vault_id }.into());
    }

    // 2. Argument validation
    if shares == 0 {
        return Err(
            ValidationError::InvalidShareAmount("must list at least one share".to_string()).into(),
        );
    }
    if price_per_share <= Decimal::ZERO {
        return Err(ValidationError::InvalidPrice("must be positive".to_string()).into());
    }

    // 3. Book capacity
    if domain.book.is_full() {
        return Err(StateError::OrderBookFull {
            capacity: domain.book.capacity(),
        }
        .into());
    }

    // 4. Unencumbered balance covers the listing
    let held = domain.ledger.balance_of(seller);
    let encumbered = domain.book.encumbered(seller);
    debug_assert!(encumbered <= held, "encumbrance exceeds balance");
    let unencumbered = held.saturating_sub(encumbered);
    if shares > unencumbered {
        return Err(StateError::InsufficientShares {
            required: shares,
            available: unencumbered,
        }
        .into());
    }

    // Commit
    let order_id = domain
        .book
        .insert(seller, shares, price_per_share, timestamp)
        .map_err(MarketError::from)?;
    domain.commit(timestamp);
    Ok(order_id)
}

/// Cancel an open sell order, releasing its encumbrance
///
/// Only the owning seller may cancel. A cancel racing a fill resolves to
/// exactly one outcome: whichever reaches the vault lock second sees
/// either `OrderNotFound` or the already-reduced remainder.
pub(crate) fn cancel_sell_order(
    domain: &mut VaultDomain,
    order_id: OrderId,
    caller: HolderId,
    timestamp: i64,
) -> Result<SellOrder, MarketError> {
    let order = domain
        .book
        .get(order_id)
        .ok_or(StateError::OrderNotFound { order_id })?;

    if order.seller != caller {
        return Err(MarketError::Unauthorized {
            holder: caller,
            action: format!("cancel {order_id}"),
        });
    }

    let order = domain
        .book
        .remove(order_id)
        .expect("order vanished under the vault lock");
    domain.commit(timestamp);
    Ok(order)
}
