//! Commission calculation engine
//!
//! Pure calculation of a commission amount from a base amount and a
//! commission structure. Rounding is half-up to the currency minor unit,
//! applied once per emitted amount at the end of the calculation, never on
//! intermediate values, so rounding drift cannot compound across tier
//! bands. The tiered total is the sum of the rounded per-band commissions,
//! which keeps the breakdown and the total in exact agreement.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use core_kernel::Money;

use crate::config::{EngineConfig, ExcessPolicy};
use crate::error::CalcError;
use crate::registry::StrategyRegistry;
use crate::structure::{CommissionStructure, CommissionTier};

/// One band of a tiered calculation, for auditing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierBreakdownEntry {
    pub tier_label: String,
    pub amount_in_tier: Money,
    pub rate: Decimal,
    pub commission: Money,
}

/// Result of a commission calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionResult {
    pub base_amount: Money,
    /// Derived percentage for display; echoes the input rate for
    /// percentage structures
    pub commission_rate: Decimal,
    pub commission_amount: Money,
    /// Per-band audit trail, present for tiered structures only
    pub breakdown: Option<Vec<TierBreakdownEntry>>,
}

/// The calculation strategy engine
///
/// Stateless apart from its configuration and the injected custom strategy
/// registry; `calculate` is pure and referentially transparent.
pub struct CalculationEngine {
    config: EngineConfig,
    registry: StrategyRegistry,
}

impl CalculationEngine {
    /// Creates an engine with no custom strategies registered
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            registry: StrategyRegistry::new(),
        }
    }

    /// Injects the custom strategy registry
    pub fn with_registry(mut self, registry: StrategyRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Returns the engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Computes the commission for a base amount under a structure
    ///
    /// # Errors
    ///
    /// * [`CalcError::InvalidAmount`] for a negative base amount
    /// * [`CalcError::CurrencyMismatch`] when the base amount is not in the
    ///   configured currency
    /// * [`CalcError::UncoveredTierAmount`] when the tier set leaves part of
    ///   the base amount uncovered and the engine runs with
    ///   [`ExcessPolicy::Error`]
    pub fn calculate(
        &self,
        base_amount: Money,
        structure: &CommissionStructure,
    ) -> Result<CommissionResult, CalcError> {
        if base_amount.is_negative() {
            return Err(CalcError::InvalidAmount(format!(
                "base amount {} is negative",
                base_amount.amount()
            )));
        }
        if base_amount.currency() != self.config.currency() {
            return Err(CalcError::CurrencyMismatch {
                expected: self.config.currency().to_string(),
                actual: base_amount.currency().to_string(),
            });
        }

        match structure {
            CommissionStructure::Percentage { rate } => Ok(self.percentage(base_amount, *rate)),
            CommissionStructure::Flat { amount } => Ok(self.flat(base_amount, *amount)),
            CommissionStructure::Tiered { tiers } => self.tiered(base_amount, tiers),
            CommissionStructure::Custom { strategy_id } => self.custom(base_amount, strategy_id),
        }
    }

    fn percentage(&self, base_amount: Money, rate: Decimal) -> CommissionResult {
        let commission = base_amount.percentage_of(rate).round_half_up();
        CommissionResult {
            base_amount,
            commission_rate: rate,
            commission_amount: commission,
            breakdown: None,
        }
    }

    fn flat(&self, base_amount: Money, amount: Money) -> CommissionResult {
        let commission = amount.round_half_up();
        CommissionResult {
            base_amount,
            // Derived for reporting; 0 for a zero base, never a division error
            commission_rate: commission.as_percentage_of(&base_amount),
            commission_amount: commission,
            breakdown: None,
        }
    }

    fn tiered(
        &self,
        base_amount: Money,
        tiers: &[CommissionTier],
    ) -> Result<CommissionResult, CalcError> {
        let currency = base_amount.currency();
        let sorted = CommissionTier::sorted(tiers);

        let mut remaining = base_amount.amount();
        let mut total = Money::zero(currency);
        let mut breakdown = Vec::new();

        for (index, tier) in sorted.iter().enumerate() {
            if remaining <= Decimal::ZERO {
                break;
            }

            let band_width = match tier.to {
                Some(to) => to.amount() - tier.from.amount(),
                None => remaining,
            };
            let amount_in_tier = remaining.min(band_width);
            if amount_in_tier <= Decimal::ZERO {
                continue;
            }

            let band_amount = Money::new(amount_in_tier, currency);
            let commission = band_amount
                .percentage_of(tier.rate)
                .checked_add(&tier.flat_bonus)
                .map_err(|e| CalcError::InvalidAmount(e.to_string()))?
                .round_half_up();

            breakdown.push(TierBreakdownEntry {
                tier_label: format!("tier-{}", index + 1),
                amount_in_tier: band_amount,
                rate: tier.rate,
                commission,
            });

            total = total + commission;
            remaining -= amount_in_tier;
        }

        if remaining > Decimal::ZERO {
            match self.config.excess_policy() {
                ExcessPolicy::Ignore => {
                    debug!(uncovered = %remaining, "amount above highest tier earns no commission");
                }
                ExcessPolicy::Error => {
                    return Err(CalcError::UncoveredTierAmount(remaining));
                }
            }
        }

        Ok(CommissionResult {
            base_amount,
            commission_rate: total.as_percentage_of(&base_amount),
            commission_amount: total,
            breakdown: Some(breakdown),
        })
    }

    fn custom(&self, base_amount: Money, strategy_id: &str) -> Result<CommissionResult, CalcError> {
        match self.registry.get(strategy_id) {
            Ok(strategy) => {
                let commission = strategy.calculate(base_amount).round_half_up();
                Ok(CommissionResult {
                    base_amount,
                    commission_rate: commission.as_percentage_of(&base_amount),
                    commission_amount: commission,
                    breakdown: None,
                })
            }
            Err(err) => {
                // Documented fallback, not fatal: percentage semantics at the
                // configured fallback rate (0 by default, a no-op).
                warn!(
                    strategy_id,
                    fallback_rate = %self.config.fallback_rate(),
                    error = %err,
                    "custom strategy unavailable, falling back to percentage"
                );
                Ok(self.percentage(base_amount, self.config.fallback_rate()))
            }
        }
    }
}

impl Default for CalculationEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
