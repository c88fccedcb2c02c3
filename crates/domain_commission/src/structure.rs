//! Commission structures and tier bands
//!
//! A commission structure selects the algorithm used to derive a commission
//! amount from a base amount. Exactly one variant applies per calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::Money;

/// The algorithm variant used to compute a commission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommissionStructure {
    /// A percentage of the base amount
    Percentage { rate: Decimal },

    /// A flat amount regardless of the base amount
    Flat { amount: Money },

    /// Progressive bands, each with its own rate and optional flat bonus
    Tiered { tiers: Vec<CommissionTier> },

    /// A named strategy resolved through the injected registry
    Custom { strategy_id: String },
}

/// A contiguous amount band with its own rate and optional flat bonus
///
/// Bands are half-open `[from, to)`; `to = None` means the band extends to
/// infinity. Tiers are unordered as stored and sorted by `from` before
/// processing, so callers never need to pre-sort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionTier {
    /// Lower bound of the band (inclusive)
    pub from: Money,
    /// Upper bound of the band (exclusive), None means open-ended
    pub to: Option<Money>,
    /// Commission rate applied within the band (0-100)
    pub rate: Decimal,
    /// Flat bonus paid when the band is non-empty
    pub flat_bonus: Money,
}

impl CommissionTier {
    /// Creates a bounded tier with no flat bonus
    pub fn bounded(from: Money, to: Money, rate: Decimal) -> Self {
        Self {
            from,
            to: Some(to),
            rate,
            flat_bonus: Money::zero(from.currency()),
        }
    }

    /// Creates an open-ended tier with no flat bonus
    pub fn open_ended(from: Money, rate: Decimal) -> Self {
        Self {
            from,
            to: None,
            rate,
            flat_bonus: Money::zero(from.currency()),
        }
    }

    /// Adds a flat bonus to the tier
    pub fn with_flat_bonus(mut self, bonus: Money) -> Self {
        self.flat_bonus = bonus;
        self
    }

    /// Returns true if the band has no upper bound
    pub fn is_open_ended(&self) -> bool {
        self.to.is_none()
    }

    /// Returns the tiers sorted ascending by lower bound
    pub fn sorted(tiers: &[CommissionTier]) -> Vec<CommissionTier> {
        let mut sorted = tiers.to_vec();
        sorted.sort_by(|a, b| a.from.amount().cmp(&b.from.amount()));
        sorted
    }
}
