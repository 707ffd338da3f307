//! Vault Engine Service
//!
//! Fractional-ownership ledger and resident order-matching engine. One
//! indivisible asset becomes a fixed number of fungible shares; holders
//! trade them through a bounded book of explicit fixed-price sell orders
//! that buyers select by id. There is no price-time priority matching.
//!
//! **Key Invariants:**
//! - Conservation: per vault, sum of holder shares == shares outstanding
//! - No negative balances, no order driven below zero remaining
//! - At most `MAX_ORDERS` open sell orders per vault
//! - Every operation commits fully or fails with no partial state
//!
//! Each vault is an independent consistency domain behind its own lock;
//! operations on different vaults proceed in parallel.

pub mod book;
pub mod collaborators;
pub mod domain;
pub mod engine;
pub mod events;
pub mod funds;
pub mod ledger;
pub mod marketplace;
pub mod redemption;
pub mod registry;
pub mod valuation;

pub use marketplace::Marketplace;
