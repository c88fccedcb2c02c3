//! Property-Based Test Generators
//!
//! Proptest strategies for generating random test data that maintains
//! domain invariants.

use core_kernel::{Currency, Money};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for generating valid positive amounts in minor units
pub fn positive_amount_minor_strategy() -> impl Strategy<Value = i64> {
    1i64..1_000_000_000i64
}

/// Strategy for generating non-negative USD Money values
pub fn usd_money_strategy() -> impl Strategy<Value = Money> {
    (0i64..1_000_000_000i64).prop_map(|amount| Money::from_minor(amount, Currency::USD))
}

/// Strategy for generating strictly positive USD Money values
pub fn positive_usd_money_strategy() -> impl Strategy<Value = Money> {
    positive_amount_minor_strategy().prop_map(|amount| Money::from_minor(amount, Currency::USD))
}

/// Strategy for generating percentages in [0, 100] with 2 decimal places
pub fn percentage_strategy() -> impl Strategy<Value = Decimal> {
    (0u32..=10000u32).prop_map(|n| Decimal::new(n as i64, 2))
}

/// Strategy for generating percentage splits that sum to exactly 100
pub fn exact_split_strategy(count: usize) -> impl Strategy<Value = Vec<Decimal>> {
    proptest::collection::vec(1u32..1000u32, count..=count).prop_map(|weights| {
        let total: u32 = weights.iter().sum();
        let mut shares: Vec<Decimal> = weights
            .iter()
            .map(|w| {
                (Decimal::from(*w) * Decimal::from(100) / Decimal::from(total)).round_dp(2)
            })
            .collect();
        // Nudge the last share so the sum is exactly 100
        let sum: Decimal = shares.iter().sum();
        let last = shares.len() - 1;
        shares[last] += Decimal::from(100) - sum;
        shares
    })
}

/// Strategy for generating tier bounds as ascending minor-unit cut points
pub fn tier_bounds_strategy(max_tiers: usize) -> impl Strategy<Value = Vec<i64>> {
    proptest::collection::vec(1i64..100_000_00i64, 1..=max_tiers).prop_map(|mut steps| {
        let mut bound = 0i64;
        for step in steps.iter_mut() {
            bound += *step;
            *step = bound;
        }
        steps
    })
}
