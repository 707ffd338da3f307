//! Fee schedule and discount types
//!
//! Flat protocol fees denominated in the payment token, with per-account
//! basis-point discounts supplied by the enterprise collaborator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Trading fee in basis points (0.25%)
pub const TRADING_FEE_BPS: u32 = 25;

/// Flat vault creation fee in payment tokens
pub const VAULT_CREATION_FEE: u64 = 100;

/// Flat redemption fee in payment tokens
pub const REDEMPTION_FEE: u64 = 50;

const BPS_DENOMINATOR: u32 = 10_000;

/// Per-account discounts, in basis points
///
/// Looked up from the enterprise-discount collaborator. A discount of
/// 10_000 bps waives the fee entirely; larger values are clamped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountBps {
    /// Discount on the vault creation fee
    pub vault_bps: u32,
    /// Discount on the trading fee rate
    pub trading_bps: u32,
}

impl DiscountBps {
    pub fn new(vault_bps: u32, trading_bps: u32) -> Self {
        Self {
            vault_bps,
            trading_bps,
        }
    }
}

/// Protocol fee schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Flat fee charged by the registry per vault created
    pub vault_creation_fee: Decimal,
    /// Rate charged on the gross value of every fill
    pub trading_fee_bps: u32,
    /// Flat fee charged on redemption
    pub redemption_fee: Decimal,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            vault_creation_fee: Decimal::from(VAULT_CREATION_FEE),
            trading_fee_bps: TRADING_FEE_BPS,
            redemption_fee: Decimal::from(REDEMPTION_FEE),
        }
    }
}

impl FeeSchedule {
    /// Vault creation fee after the enterprise discount
    pub fn creation_fee(&self, discount: DiscountBps) -> Decimal {
        let bps = discount.vault_bps.min(BPS_DENOMINATOR);
        self.vault_creation_fee * Decimal::from(BPS_DENOMINATOR - bps)
            / Decimal::from(BPS_DENOMINATOR)
    }

    /// Trading fee on a gross fill value after the enterprise discount
    ///
    /// The discount reduces the rate, floored at zero; it never becomes a
    /// rebate.
    pub fn trading_fee(&self, gross: Decimal, discount: DiscountBps) -> Decimal {
        let effective_bps = self.trading_fee_bps.saturating_sub(discount.trading_bps);
        gross * Decimal::new(effective_bps as i64, 4)
    }
}
