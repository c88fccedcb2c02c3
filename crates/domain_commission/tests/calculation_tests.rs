//! Calculation Engine Tests
//!
//! Covers the four structure variants and their edge cases:
//! - Percentage, flat, tiered, and custom calculations
//! - Tier boundary handling and uncovered excess policies
//! - The custom-strategy fallback path
//! - Determinism of repeated calculations
//!
//! # Test Organization
//!
//! - `percentage_tests` - percentage structure calculations
//! - `flat_tests` - flat structure calculations and derived rates
//! - `tiered_tests` - band walking, boundaries, bonuses, excess policies
//! - `custom_tests` - registry resolution and fallback
//! - `validation_tests` - invalid inputs
//! - `properties` - property-based invariants

use std::sync::Arc;

use core_kernel::{Currency, Money};
use domain_commission::{
    CalculationEngine, CommissionStructure, CommissionTier, CustomStrategy, EngineConfig,
    ExcessPolicy, StrategyRegistry,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use test_utils::{assert_money_approx_eq, MoneyFixtures};

fn usd(amount: Decimal) -> Money {
    Money::new(amount, Currency::USD)
}

fn engine() -> CalculationEngine {
    CalculationEngine::new(EngineConfig::default())
}

/// The tier set from the standard recruitment fee schedule:
/// 5% on the first 50,000 then 8% above
fn standard_tiers() -> Vec<CommissionTier> {
    vec![
        CommissionTier::bounded(usd(dec!(0)), usd(dec!(50000)), dec!(5)),
        CommissionTier::open_ended(usd(dec!(50000)), dec!(8)),
    ]
}

// ============================================================================
// PERCENTAGE TESTS
// ============================================================================

mod percentage_tests {
    use super::*;

    /// Verifies the standard subscription scenario: 15% of 10,000
    #[test]
    fn test_percentage_of_subscription_sale() {
        let result = engine()
            .calculate(
                MoneyFixtures::usd_subscription(),
                &CommissionStructure::Percentage { rate: dec!(15) },
            )
            .unwrap();

        assert_eq!(
            result.commission_amount.amount(),
            dec!(1500),
            "15% of 10000 should be 1500"
        );
        assert_eq!(
            result.commission_rate,
            dec!(15),
            "result rate should echo the input rate"
        );
        assert!(result.breakdown.is_none());
    }

    #[test]
    fn test_zero_rate_yields_zero_commission() {
        let result = engine()
            .calculate(
                usd(dec!(10000)),
                &CommissionStructure::Percentage { rate: dec!(0) },
            )
            .unwrap();

        assert!(result.commission_amount.is_zero());
    }

    #[test]
    fn test_full_rate_yields_base_amount() {
        let result = engine()
            .calculate(
                usd(dec!(10000)),
                &CommissionStructure::Percentage { rate: dec!(100) },
            )
            .unwrap();

        assert_eq!(result.commission_amount.amount(), dec!(10000));
    }

    /// Verifies half-up rounding to the minor unit at the end
    #[test]
    fn test_rounds_half_up_to_minor_unit() {
        // 12.5% of 10.02 = 1.2525 -> 1.25; 12.5% of 10.04 = 1.255 -> 1.26
        let low = engine()
            .calculate(
                usd(dec!(10.02)),
                &CommissionStructure::Percentage { rate: dec!(12.5) },
            )
            .unwrap();
        assert_eq!(low.commission_amount.amount(), dec!(1.25));

        let high = engine()
            .calculate(
                usd(dec!(10.04)),
                &CommissionStructure::Percentage { rate: dec!(12.5) },
            )
            .unwrap();
        assert_eq!(high.commission_amount.amount(), dec!(1.26));
    }

    #[test]
    fn test_zero_base_amount_is_not_an_error() {
        let result = engine()
            .calculate(
                MoneyFixtures::usd_zero(),
                &CommissionStructure::Percentage { rate: dec!(15) },
            )
            .unwrap();

        assert!(result.commission_amount.is_zero());
    }
}

// ============================================================================
// FLAT TESTS
// ============================================================================

mod flat_tests {
    use super::*;

    /// Verifies the flat recruitment-fee scenario: 1,990 on a 50,000 deal
    #[test]
    fn test_flat_amount_regardless_of_base() {
        let result = engine()
            .calculate(
                usd(dec!(50000)),
                &CommissionStructure::Flat {
                    amount: usd(dec!(1990)),
                },
            )
            .unwrap();

        assert_eq!(result.commission_amount.amount(), dec!(1990));
        // Derived rate is for reporting only: 1990 / 50000 * 100 = 3.98%
        assert_eq!(result.commission_rate, dec!(3.98));
    }

    /// Zero base derives a 0 rate, never a division error
    #[test]
    fn test_flat_with_zero_base_derives_zero_rate() {
        let result = engine()
            .calculate(
                MoneyFixtures::usd_zero(),
                &CommissionStructure::Flat {
                    amount: usd(dec!(1990)),
                },
            )
            .unwrap();

        assert_eq!(result.commission_amount.amount(), dec!(1990));
        assert_eq!(result.commission_rate, Decimal::ZERO);
    }
}

// ============================================================================
// TIERED TESTS
// ============================================================================

mod tiered_tests {
    use super::*;

    /// Verifies the large-deal scenario: 5% on 50,000 + 8% on 70,000
    #[test]
    fn test_two_band_walk() {
        let result = engine()
            .calculate(
                MoneyFixtures::usd_large_deal(),
                &CommissionStructure::Tiered {
                    tiers: standard_tiers(),
                },
            )
            .unwrap();

        assert_eq!(
            result.commission_amount.amount(),
            dec!(8100),
            "2500 + 5600 = 8100"
        );

        let breakdown = result.breakdown.unwrap();
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].amount_in_tier.amount(), dec!(50000));
        assert_eq!(breakdown[0].commission.amount(), dec!(2500));
        assert_eq!(breakdown[1].amount_in_tier.amount(), dec!(70000));
        assert_eq!(breakdown[1].commission.amount(), dec!(5600));
    }

    /// An amount exactly at a tier boundary belongs wholly to the lower
    /// tier: the band is [from, to), never split or double-counted
    #[test]
    fn test_boundary_amount_stays_in_lower_tier() {
        let result = engine()
            .calculate(
                usd(dec!(50000)),
                &CommissionStructure::Tiered {
                    tiers: standard_tiers(),
                },
            )
            .unwrap();

        let breakdown = result.breakdown.unwrap();
        assert_eq!(breakdown.len(), 1, "only the lower band participates");
        assert_eq!(breakdown[0].amount_in_tier.amount(), dec!(50000));
        assert_eq!(result.commission_amount.amount(), dec!(2500));
    }

    /// Tiers are stored unordered; the engine sorts them by lower bound
    #[test]
    fn test_unsorted_tiers_are_sorted_before_processing() {
        let mut tiers = standard_tiers();
        tiers.reverse();

        let result = engine()
            .calculate(
                MoneyFixtures::usd_large_deal(),
                &CommissionStructure::Tiered { tiers },
            )
            .unwrap();

        assert_eq!(result.commission_amount.amount(), dec!(8100));
    }

    #[test]
    fn test_flat_bonus_paid_per_non_empty_band() {
        let tiers = vec![
            CommissionTier::bounded(usd(dec!(0)), usd(dec!(50000)), dec!(5))
                .with_flat_bonus(usd(dec!(250))),
            CommissionTier::open_ended(usd(dec!(50000)), dec!(8)),
        ];

        // Base below the second band: only tier 1's bonus is paid
        let result = engine()
            .calculate(usd(dec!(10000)), &CommissionStructure::Tiered { tiers })
            .unwrap();

        // 5% of 10000 + 250 bonus
        assert_eq!(result.commission_amount.amount(), dec!(750));
    }

    #[test]
    fn test_empty_tier_list_yields_zero_commission() {
        let result = engine()
            .calculate(
                usd(dec!(10000)),
                &CommissionStructure::Tiered { tiers: vec![] },
            )
            .unwrap();

        assert!(result.commission_amount.is_zero());
        assert_eq!(result.breakdown, Some(vec![]));
    }

    /// With no open-ended tier, excess above the highest bound earns no
    /// commission under the default policy
    #[test]
    fn test_uncovered_excess_ignored_by_default() {
        let tiers = vec![CommissionTier::bounded(
            usd(dec!(0)),
            usd(dec!(50000)),
            dec!(5),
        )];

        let result = engine()
            .calculate(usd(dec!(80000)), &CommissionStructure::Tiered { tiers })
            .unwrap();

        assert_eq!(
            result.commission_amount.amount(),
            dec!(2500),
            "the 30000 above the bounded tier is excluded"
        );
    }

    /// Under ExcessPolicy::Error the same input fails instead
    #[test]
    fn test_uncovered_excess_fails_under_error_policy() {
        let config = EngineConfig::builder()
            .excess_policy(ExcessPolicy::Error)
            .build()
            .unwrap();
        let engine = CalculationEngine::new(config);

        let tiers = vec![CommissionTier::bounded(
            usd(dec!(0)),
            usd(dec!(50000)),
            dec!(5),
        )];

        let result = engine.calculate(usd(dec!(80000)), &CommissionStructure::Tiered { tiers });
        assert!(matches!(
            result,
            Err(domain_commission::CalcError::UncoveredTierAmount(excess)) if excess == dec!(30000)
        ));
    }
}

// ============================================================================
// CUSTOM STRATEGY TESTS
// ============================================================================

mod custom_tests {
    use super::*;

    struct RetainerStrategy;

    impl CustomStrategy for RetainerStrategy {
        fn strategy_id(&self) -> &str {
            "rpo-retainer"
        }

        fn calculate(&self, base_amount: Money) -> Money {
            // 2% plus a 500 handling component
            base_amount.percentage_of(dec!(2)) + Money::new(dec!(500), base_amount.currency())
        }
    }

    #[test]
    fn test_registered_strategy_is_used() {
        let mut registry = StrategyRegistry::new();
        registry.register(Arc::new(RetainerStrategy));
        let engine = CalculationEngine::new(EngineConfig::default()).with_registry(registry);

        let result = engine
            .calculate(
                usd(dec!(100000)),
                &CommissionStructure::Custom {
                    strategy_id: "rpo-retainer".to_string(),
                },
            )
            .unwrap();

        assert_eq!(result.commission_amount.amount(), dec!(2500));
    }

    /// A missing strategy falls back to percentage semantics at the default
    /// rate of 0, which is a documented no-op rather than an error
    #[test]
    fn test_missing_strategy_falls_back_to_noop() {
        let result = engine()
            .calculate(
                usd(dec!(100000)),
                &CommissionStructure::Custom {
                    strategy_id: "never-registered".to_string(),
                },
            )
            .unwrap();

        assert!(result.commission_amount.is_zero());
        assert_eq!(result.commission_rate, Decimal::ZERO);
    }

    #[test]
    fn test_missing_strategy_uses_configured_fallback_rate() {
        let config = EngineConfig::builder()
            .fallback_rate(dec!(1))
            .build()
            .unwrap();
        let engine = CalculationEngine::new(config);

        let result = engine
            .calculate(
                usd(dec!(100000)),
                &CommissionStructure::Custom {
                    strategy_id: "never-registered".to_string(),
                },
            )
            .unwrap();

        assert_eq!(result.commission_amount.amount(), dec!(1000));
    }
}

// ============================================================================
// VALIDATION TESTS
// ============================================================================

mod validation_tests {
    use super::*;
    use domain_commission::CalcError;

    #[test]
    fn test_negative_base_amount_rejected() {
        let result = engine().calculate(
            usd(dec!(-1)),
            &CommissionStructure::Percentage { rate: dec!(15) },
        );

        assert!(matches!(result, Err(CalcError::InvalidAmount(_))));
    }

    #[test]
    fn test_currency_mismatch_rejected() {
        let result = engine().calculate(
            MoneyFixtures::eur_100(),
            &CommissionStructure::Percentage { rate: dec!(15) },
        );

        assert!(matches!(result, Err(CalcError::CurrencyMismatch { .. })));
    }

    /// Identical inputs always produce identical outputs
    #[test]
    fn test_calculation_is_deterministic() {
        let structure = CommissionStructure::Tiered {
            tiers: standard_tiers(),
        };
        let engine = engine();

        let first = engine
            .calculate(MoneyFixtures::usd_large_deal(), &structure)
            .unwrap();
        let second = engine
            .calculate(MoneyFixtures::usd_large_deal(), &structure)
            .unwrap();

        assert_eq!(first, second);
    }
}

// ============================================================================
// PROPERTY TESTS
// ============================================================================

mod properties {
    use super::*;
    use proptest::prelude::*;
    use test_utils::{percentage_strategy, tier_bounds_strategy, usd_money_strategy};

    proptest! {
        /// Percentage commission is within one rounding unit of the exact
        /// value for all non-negative amounts and rates in [0, 100]
        #[test]
        fn percentage_within_one_rounding_unit(
            base in usd_money_strategy(),
            rate in percentage_strategy()
        ) {
            let result = engine()
                .calculate(base, &CommissionStructure::Percentage { rate })
                .unwrap();

            let exact = base.percentage_of(rate);
            assert_money_approx_eq(&result.commission_amount, &exact, dec!(0.01));
        }

        /// For a gap-free tier set covering [0, inf), the breakdown amounts
        /// sum to the base and the breakdown commissions sum to the total
        #[test]
        fn full_coverage_breakdown_sums_exactly(
            base in usd_money_strategy(),
            bounds in tier_bounds_strategy(4)
        ) {
            let mut tiers = Vec::new();
            let mut lower = 0i64;
            for (i, bound) in bounds.iter().enumerate() {
                tiers.push(CommissionTier::bounded(
                    Money::from_minor(lower, Currency::USD),
                    Money::from_minor(*bound, Currency::USD),
                    Decimal::from((i as i64 % 10) + 1),
                ));
                lower = *bound;
            }
            tiers.push(CommissionTier::open_ended(
                Money::from_minor(lower, Currency::USD),
                dec!(10),
            ));

            let result = engine()
                .calculate(base, &CommissionStructure::Tiered { tiers })
                .unwrap();
            let breakdown = result.breakdown.unwrap();

            let amount_sum: Decimal = breakdown.iter().map(|e| e.amount_in_tier.amount()).sum();
            prop_assert_eq!(amount_sum, base.amount());

            let commission_sum: Decimal = breakdown.iter().map(|e| e.commission.amount()).sum();
            prop_assert_eq!(commission_sum, result.commission_amount.amount());
        }

        /// Repeated evaluation of the same input is byte-identical
        #[test]
        fn calculation_is_idempotent(
            base in usd_money_strategy(),
            rate in percentage_strategy()
        ) {
            let structure = CommissionStructure::Percentage { rate };
            let engine = engine();
            let first = engine.calculate(base, &structure).unwrap();
            let second = engine.calculate(base, &structure).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
