//! Custom strategy registry
//!
//! Custom calculations are modeled as named strategies resolved through a
//! registry keyed by the identifier stored on the commission structure.
//! The registry is an explicit dependency injected into the calculation
//! engine by the caller; the structure itself stays a plain, serializable
//! tagged union with no executable code inside.

use std::collections::HashMap;
use std::sync::Arc;

use core_kernel::Money;

use crate::error::ConfigError;

/// A named custom commission calculation
///
/// Implementations must be pure: identical inputs produce identical
/// outputs, with no side effects.
pub trait CustomStrategy: Send + Sync {
    /// The identifier this strategy is registered under
    fn strategy_id(&self) -> &str;

    /// Computes the commission amount for a base amount
    fn calculate(&self, base_amount: Money) -> Money;
}

/// Registry of custom strategies keyed by strategy id
#[derive(Default)]
pub struct StrategyRegistry {
    strategies: HashMap<String, Arc<dyn CustomStrategy>>,
}

impl StrategyRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// Registers a strategy under its own id
    ///
    /// Re-registering an id replaces the previous strategy.
    pub fn register(&mut self, strategy: Arc<dyn CustomStrategy>) {
        self.strategies
            .insert(strategy.strategy_id().to_string(), strategy);
    }

    /// Resolves a strategy by id
    pub fn get(&self, strategy_id: &str) -> Result<Arc<dyn CustomStrategy>, ConfigError> {
        self.strategies
            .get(strategy_id)
            .cloned()
            .ok_or_else(|| ConfigError::MissingCustomStrategy(strategy_id.to_string()))
    }

    /// Returns true if a strategy is registered under the id
    pub fn contains(&self, strategy_id: &str) -> bool {
        self.strategies.contains_key(strategy_id)
    }

    /// Number of registered strategies
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Returns true if no strategies are registered
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    struct HalfPercent;

    impl CustomStrategy for HalfPercent {
        fn strategy_id(&self) -> &str {
            "half-percent"
        }

        fn calculate(&self, base_amount: Money) -> Money {
            base_amount.percentage_of(dec!(0.5))
        }
    }

    #[test]
    fn test_register_and_resolve() {
        let mut registry = StrategyRegistry::new();
        registry.register(Arc::new(HalfPercent));

        assert!(registry.contains("half-percent"));
        let strategy = registry.get("half-percent").unwrap();
        let result = strategy.calculate(Money::new(dec!(1000), Currency::USD));
        assert_eq!(result.amount(), dec!(5));
    }

    #[test]
    fn test_missing_strategy() {
        let registry = StrategyRegistry::new();
        let result = registry.get("unknown");
        assert!(matches!(
            result,
            Err(ConfigError::MissingCustomStrategy(id)) if id == "unknown"
        ));
    }
}
