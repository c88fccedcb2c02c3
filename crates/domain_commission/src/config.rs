//! Engine configuration
//!
//! Configuration is an explicit, fully-specified struct constructed once at
//! the boundary through a builder with named defaults, so every downstream
//! function receives a complete, validated value.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::Currency;

use crate::error::ConfigError;

/// Policy for base amount above the highest bounded tier
///
/// Applies only when the tier set has no open-ended band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExcessPolicy {
    /// Uncovered excess earns no commission (the default policy)
    Ignore,
    /// Uncovered excess fails the calculation
    Error,
}

/// Calculation engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    currency: Currency,
    excess_policy: ExcessPolicy,
    fallback_rate: Decimal,
}

impl EngineConfig {
    /// Starts a builder with named defaults
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::new()
    }

    /// The currency every base amount must carry
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// How uncovered tiered excess is handled
    pub fn excess_policy(&self) -> ExcessPolicy {
        self.excess_policy
    }

    /// Percentage rate used when a custom strategy cannot be resolved
    ///
    /// Defaults to 0, making the fallback a documented no-op.
    pub fn fallback_rate(&self) -> Decimal {
        self.fallback_rate
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfigBuilder::new()
            .build()
            .expect("default engine config is valid")
    }
}

/// Builder for [`EngineConfig`]
#[derive(Debug, Clone)]
pub struct EngineConfigBuilder {
    currency: Currency,
    excess_policy: ExcessPolicy,
    fallback_rate: Decimal,
}

impl EngineConfigBuilder {
    pub fn new() -> Self {
        Self {
            currency: Currency::USD,
            excess_policy: ExcessPolicy::Ignore,
            fallback_rate: Decimal::ZERO,
        }
    }

    /// Sets the engine currency
    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Sets the uncovered-excess policy
    pub fn excess_policy(mut self, policy: ExcessPolicy) -> Self {
        self.excess_policy = policy;
        self
    }

    /// Sets the custom-strategy fallback rate (0-100)
    pub fn fallback_rate(mut self, rate: Decimal) -> Self {
        self.fallback_rate = rate;
        self
    }

    /// Validates and builds the configuration
    pub fn build(self) -> Result<EngineConfig, ConfigError> {
        if self.fallback_rate < Decimal::ZERO || self.fallback_rate > Decimal::from(100) {
            return Err(ConfigError::InvalidFallbackRate(self.fallback_rate));
        }

        Ok(EngineConfig {
            currency: self.currency,
            excess_policy: self.excess_policy,
            fallback_rate: self.fallback_rate,
        })
    }
}

impl Default for EngineConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.currency(), Currency::USD);
        assert_eq!(config.excess_policy(), ExcessPolicy::Ignore);
        assert_eq!(config.fallback_rate(), Decimal::ZERO);
    }

    #[test]
    fn test_builder_overrides() {
        let config = EngineConfig::builder()
            .currency(Currency::EUR)
            .excess_policy(ExcessPolicy::Error)
            .fallback_rate(dec!(2.5))
            .build()
            .unwrap();

        assert_eq!(config.currency(), Currency::EUR);
        assert_eq!(config.excess_policy(), ExcessPolicy::Error);
        assert_eq!(config.fallback_rate(), dec!(2.5));
    }

    #[test]
    fn test_invalid_fallback_rate_rejected() {
        let result = EngineConfig::builder().fallback_rate(dec!(101)).build();
        assert!(matches!(
            result,
            Err(crate::error::ConfigError::InvalidFallbackRate(_))
        ));
    }
}
