//! Payment-token balance ledger
//!
//! Tracks each holder's payment-token balance as a `Decimal`. Settlement
//! and fee legs move through here. Mutating methods assert their
//! preconditions: operations validate balances (with typed errors) before
//! entering their commit phase, so a failed assertion here means a broken
//! validate step, not a user error.

use rust_decimal::Decimal;
use std::collections::HashMap;
use types::ids::HolderId;

/// Global payment-token balances
#[derive(Debug, Default)]
pub struct FundsLedger {
    balances: HashMap<HolderId, Decimal>,
}

impl FundsLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current balance, zero for unknown holders
    pub fn balance_of(&self, holder: HolderId) -> Decimal {
        self.balances.get(&holder).copied().unwrap_or(Decimal::ZERO)
    }

    /// Credit a holder, creating the record if absent
    ///
    /// # Panics
    /// Panics on a non-positive amount.
    pub fn deposit(&mut self, holder: HolderId, amount: Decimal) -> Decimal {
        assert!(amount > Decimal::ZERO, "Deposit must be positive");
        let balance = self.balances.entry(holder).or_insert(Decimal::ZERO);
        *balance += amount;
        *balance
    }

    /// Debit a holder, pruning the record at zero
    ///
    /// A zero amount is a no-op so fully discounted fees need no special
    /// casing in callers.
    ///
    /// # Panics
    /// Panics if the holder's balance is below `amount`.
    pub fn debit(&mut self, holder: HolderId, amount: Decimal) {
        if amount == Decimal::ZERO {
            return;
        }
        assert!(amount > Decimal::ZERO, "Debit must be positive");
        let balance = self
            .balances
            .get_mut(&holder)
            .expect("debit against unknown holder");
        assert!(*balance >= amount, "Debit exceeds balance");
        *balance -= amount;
        if *balance == Decimal::ZERO {
            self.balances.remove(&holder);
        }
    }

    /// Move `amount` between holders
    ///
    /// # Panics
    /// Panics if `from` holds less than `amount`.
    pub fn transfer(&mut self, from: HolderId, to: HolderId, amount: Decimal) {
        if amount == Decimal::ZERO || from == to {
            return;
        }
        self.debit(from, amount);
        self.deposit(to, amount);
    }
}
