//! Valuation guard — bounded oracle updates
//!
//! Only the configured oracle authority may revalue a vault, and a single
//! update may move the valuation by at most `MAX_VALUATION_MULTIPLE` in
//! either direction. That bounds the damage of a fat-fingered or
//! manipulated update without blocking legitimate repricing.

use types::errors::{MarketError, StateError, ValidationError};
use types::ids::HolderId;

use crate::domain::VaultDomain;

/// Largest allowed single-update move, as a multiple of the old valuation
pub const MAX_VALUATION_MULTIPLE: u64 = 1_000;

/// Apply a bounded valuation update.
///
/// Accepts `new_valuation` only when
/// `old / MAX_VALUATION_MULTIPLE <= new <= old × MAX_VALUATION_MULTIPLE`
/// (the upper bound saturates at `u64::MAX`; the lower bound is integer
/// division, so for old valuations under the multiple any positive value
/// passes). Returns the replaced valuation.
pub(crate) fn update_valuation(
    domain: &mut VaultDomain,
    authority: HolderId,
    oracle: HolderId,
    new_valuation: u64,
    timestamp: i64,
) -> Result<u64, MarketError> {
    if authority != oracle {
        return Err(MarketError::Unauthorized {
            holder: authority,
            action: format!("revalue {}", domain.vault.vault_id),
        });
    }

    if !domain.vault.is_active() {
        return Err(StateError::VaultNotActive {
            vault_id: domain.vault.vault_id,
        }
        .into());
    }

    if new_valuation == 0 {
        return Err(ValidationError::InvalidValuation("must be positive".to_string()).into());
    }

    let old = domain.vault.valuation_usd;
    let max = old.saturating_mul(MAX_VALUATION_MULTIPLE);
    if new_valuation > max {
        return Err(ValidationError::ValuationTooHigh {
            requested: new_valuation,
            max,
        }
        .into());
    }
    let min = old / MAX_VALUATION_MULTIPLE;
    if new_valuation < min {
        return Err(ValidationError::ValuationTooLow {
            requested: new_valuation,
            min,
        }
        .into());
    }

    domain.vault.valuation_usd = new_valuation;
    domain.commit(timestamp);
    Ok(old)
}
