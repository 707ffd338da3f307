//! Marketplace facade
//!
//! Entry point tying the per-vault consistency domains together. Each
//! vault lives behind its own lock inside a concurrent map; the payment
//! ledger has a single global lock acquired after the vault lock, so the
//! lock order is fixed and deadlock-free. Operations on different vaults
//! never contend.

use dashmap::DashMap;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

use types::errors::{MarketError, StateError};
use types::fee::FeeSchedule;
use types::ids::{HolderId, OrderId, VaultId};
use types::order::SellOrder;
use types::trade::Fill;
use types::vault::{AssetType, AssetVault};

use crate::book;
use crate::collaborators::Collaborators;
use crate::domain::VaultDomain;
use crate::engine;
use crate::events::{
    AssetRedeemed, MarketEvent, OrderCancelled, SharesListed, SharesPurchased, ValuationUpdated,
    VaultCreated,
};
use crate::funds::FundsLedger;
use crate::redemption;
use crate::registry;
use crate::valuation;

/// Fractional-ownership marketplace over independent asset vaults
pub struct Marketplace {
    vaults: DashMap<VaultId, Mutex<VaultDomain>>,
    funds: Mutex<FundsLedger>,
    next_vault_id: AtomicU64,
    fees: FeeSchedule,
    oracle: HolderId,
    collaborators: Collaborators,
    events: Mutex<Vec<MarketEvent>>,
}

impl Marketplace {
    pub fn new(oracle: HolderId, fees: FeeSchedule, collaborators: Collaborators) -> Self {
        Self {
            vaults: DashMap::new(),
            funds: Mutex::new(FundsLedger::new()),
            next_vault_id: AtomicU64::new(1),
            fees,
            oracle,
            collaborators,
            events: Mutex::new(Vec::new()),
        }
    }

    /// Marketplace with default fees and in-memory collaborators
    pub fn with_defaults(oracle: HolderId) -> Self {
        Self::new(oracle, FeeSchedule::default(), Collaborators::in_memory())
    }

    /// Run `f` under one vault's lock
    fn with_domain<T>(
        &self,
        vault_id: VaultId,
        f: impl FnOnce(&mut VaultDomain) -> Result<T, MarketError>,
    ) -> Result<T, MarketError> {
        let entry = self
            .vaults
            .get(&vault_id)
            .ok_or(StateError::VaultNotFound { vault_id })?;
        let mut domain = entry.lock();
        f(&mut domain)
    }

    /// Append an event; called while the vault lock is still held so the
    /// log order matches commit order within a vault
    fn emit(&self, event: MarketEvent) {
        self.events.lock().push(event);
    }

    // ── Funds ───────────────────────────────────────────────────────

    /// Credit payment tokens to a holder's marketplace balance
    pub fn deposit(&self, holder: HolderId, amount: Decimal) -> Decimal {
        let balance = self.funds.lock().deposit(holder, amount);
        debug!(holder = %holder, %amount, %balance, "Deposit credited");
        balance
    }

    /// Debit payment tokens from a holder's marketplace balance
    pub fn withdraw(&self, holder: HolderId, amount: Decimal) -> Result<Decimal, MarketError> {
        let mut funds = self.funds.lock();
        let available = funds.balance_of(holder);
        if amount > available {
            return Err(StateError::InsufficientBalance {
                required: amount,
                available,
            }
            .into());
        }
        funds.debit(holder, amount);
        let balance = funds.balance_of(holder);
        debug!(holder = %holder, %amount, %balance, "Withdrawal debited");
        Ok(balance)
    }

    pub fn funds_balance(&self, holder: HolderId) -> Decimal {
        self.funds.lock().balance_of(holder)
    }

    // ── Operations ──────────────────────────────────────────────────

    /// Fractionalize an asset into a new vault
    pub fn create_vault(
        &self,
        creator: HolderId,
        asset_type: AssetType,
        total_shares: u64,
        valuation_usd: u64,
        metadata_uri: String,
        timestamp: i64,
    ) -> Result<VaultId, MarketError> {
        let vault_id = VaultId::new(self.next_vault_id.fetch_add(1, Ordering::SeqCst));

        let domain = {
            let mut funds = self.funds.lock();
            registry::create_vault(
                vault_id,
                creator,
                asset_type,
                total_shares,
                valuation_usd,
                metadata_uri,
                &self.fees,
                &mut funds,
                &self.collaborators,
                timestamp,
            )?
        };

        // Insert before emitting so the vault is observable by the time
        // its creation event is
        self.vaults.insert(vault_id, Mutex::new(domain));
        self.emit(MarketEvent::VaultCreated(VaultCreated {
            vault_id,
            creator,
            asset_type,
            total_shares,
            valuation_usd,
            created_at: timestamp,
        }));
        info!(
            vault_id = %vault_id,
            creator = %creator,
            total_shares,
            valuation_usd,
            "Vault created"
        );
        Ok(vault_id)
    }

    /// List shares for sale on a vault's book
    pub fn list_shares_for_sale(
        &self,
        vault_id: VaultId,
        seller: HolderId,
        shares: u64,
        price_per_share: Decimal,
        timestamp: i64,
    ) -> Result<OrderId, MarketError> {
        let order_id = self.with_domain(vault_id, |domain| {
            let order_id =
                book::list_shares_for_sale(domain, seller, shares, price_per_share, timestamp)?;
            self.emit(MarketEvent::SharesListed(SharesListed {
                vault_id,
                order_id,
                seller,
                shares,
                price_per_share,
                listed_at: timestamp,
            }));
            Ok(order_id)
        })?;

        info!(
            vault_id = %vault_id,
            order_id = %order_id,
            seller = %seller,
            shares,
            price = %price_per_share,
            "Shares listed"
        );
        Ok(order_id)
    }

    /// Buy shares from one named sell order
    pub fn buy_shares(
        &self,
        vault_id: VaultId,
        buyer: HolderId,
        order_id: OrderId,
        shares: u64,
        timestamp: i64,
    ) -> Result<Fill, MarketError> {
        let fill = self.with_domain(vault_id, |domain| {
            let fill = {
                let mut funds = self.funds.lock();
                engine::buy_shares(
                    domain,
                    &mut funds,
                    &self.fees,
                    &self.collaborators,
                    buyer,
                    order_id,
                    shares,
                    timestamp,
                )?
            };
            self.emit(MarketEvent::SharesPurchased(SharesPurchased {
                vault_id,
                order_id,
                trade_id: fill.trade_id,
                seller: fill.seller,
                buyer,
                shares,
                gross: fill.gross,
                fee: fill.fee,
                executed_at: timestamp,
            }));
            Ok(fill)
        })?;

        info!(
            vault_id = %vault_id,
            order_id = %order_id,
            trade_id = %fill.trade_id,
            buyer = %buyer,
            shares,
            gross = %fill.gross,
            fee = %fill.fee,
            "Trade settled"
        );
        Ok(fill)
    }

    /// Cancel an open sell order, returning its unsold remainder
    pub fn cancel_sell_order(
        &self,
        vault_id: VaultId,
        caller: HolderId,
        order_id: OrderId,
        timestamp: i64,
    ) -> Result<SellOrder, MarketError> {
        let order = self.with_domain(vault_id, |domain| {
            let order = book::cancel_sell_order(domain, order_id, caller, timestamp)?;
            self.emit(MarketEvent::OrderCancelled(OrderCancelled {
                vault_id,
                order_id,
                seller: order.seller,
                shares_returned: order.shares_remaining,
                cancelled_at: timestamp,
            }));
            Ok(order)
        })?;

        info!(
            vault_id = %vault_id,
            order_id = %order_id,
            shares_returned = order.shares_remaining,
            "Order cancelled"
        );
        Ok(order)
    }

    /// Apply a bounded oracle valuation update
    pub fn update_valuation(
        &self,
        vault_id: VaultId,
        authority: HolderId,
        new_valuation: u64,
        timestamp: i64,
    ) -> Result<(), MarketError> {
        let old = self.with_domain(vault_id, |domain| {
            let old = valuation::update_valuation(
                domain,
                authority,
                self.oracle,
                new_valuation,
                timestamp,
            )?;
            self.emit(MarketEvent::ValuationUpdated(ValuationUpdated {
                vault_id,
                old_valuation: old,
                new_valuation,
                updated_at: timestamp,
            }));
            Ok(old)
        })?;

        info!(
            vault_id = %vault_id,
            old_valuation = old,
            new_valuation,
            "Valuation updated"
        );
        Ok(())
    }

    /// Redeem the underlying asset against total share ownership
    pub fn redeem_asset(
        &self,
        vault_id: VaultId,
        redeemer: HolderId,
        timestamp: i64,
    ) -> Result<(), MarketError> {
        self.with_domain(vault_id, |domain| {
            {
                let mut funds = self.funds.lock();
                redemption::redeem_asset(
                    domain,
                    &mut funds,
                    &self.fees,
                    &self.collaborators,
                    redeemer,
                    timestamp,
                )?;
            }
            self.emit(MarketEvent::AssetRedeemed(AssetRedeemed {
                vault_id,
                redeemer,
                fee: self.fees.redemption_fee,
                redeemed_at: timestamp,
            }));
            Ok(())
        })?;

        info!(vault_id = %vault_id, redeemer = %redeemer, "Asset redeemed");
        Ok(())
    }

    // ── Views ───────────────────────────────────────────────────────

    /// Snapshot of one vault's record
    pub fn vault(&self, vault_id: VaultId) -> Result<AssetVault, MarketError> {
        self.with_domain(vault_id, |domain| Ok(domain.vault.clone()))
    }

    /// Shares a holder owns in one vault (zero if none, or vault unknown)
    pub fn share_balance(&self, vault_id: VaultId, holder: HolderId) -> u64 {
        self.vaults
            .get(&vault_id)
            .map(|entry| entry.lock().ledger.balance_of(holder))
            .unwrap_or(0)
    }

    /// Open sell orders for one vault, in insertion order
    pub fn open_orders(&self, vault_id: VaultId) -> Result<Vec<SellOrder>, MarketError> {
        self.with_domain(vault_id, |domain| {
            Ok(domain.book.orders().into_iter().cloned().collect())
        })
    }

    /// Drain the accumulated event log
    pub fn drain_events(&self) -> Vec<MarketEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}
