//! Types library for the fractional-ownership marketplace
//!
//! This library provides all core type definitions used across the
//! marketplace system, ensuring type safety, deterministic behavior,
//! and backward compatibility.
//!
//! # Version
//! v1.0.0 - Frozen
//!
//! # Modules
//! - `ids`: Unique identifiers (VaultId, OrderId, HolderId, TradeId)
//! - `vault`: Asset vault lifecycle types
//! - `holder`: Per-vault share balance records
//! - `order`: Resident sell-order types
//! - `trade`: Settlement receipt types
//! - `fee`: Fee schedule and discount types
//! - `errors`: Error taxonomy

// Public modules
pub mod ids;
pub mod vault;
pub mod holder;
pub mod order;
pub mod trade;
pub mod fee;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::errors::*;
    pub use crate::fee::*;
    pub use crate::holder::*;
    pub use crate::ids::*;
    pub use crate::order::*;
    pub use crate::trade::*;
    pub use crate::vault::*;
}
