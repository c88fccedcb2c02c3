//! Custom Test Assertions
//!
//! Specialized assertion helpers for domain types that give more
//! meaningful error messages than standard assertions.

use core_kernel::Money;
use rust_decimal::Decimal;

use domain_commission::TransactionCommission;

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the currencies don't match or the amounts differ by more
/// than tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts that money values sum exactly to a total
pub fn assert_money_sums_to(parts: &[Money], total: &Money) {
    let sum: Decimal = parts.iter().map(|m| m.amount()).sum();
    assert_eq!(
        sum,
        total.amount(),
        "Parts sum to {} but expected {}",
        sum,
        total.amount()
    );
}

/// Asserts the aggregate sum invariants of a transaction commission
///
/// Checks that the recorded totals equal the sums over the role
/// assignments and that the percentage total does not exceed 100.
pub fn assert_commission_invariants(commission: &TransactionCommission) {
    let pct_sum: Decimal = commission
        .role_assignments
        .iter()
        .map(|a| a.percentage)
        .sum();
    assert_eq!(
        pct_sum, commission.total_commission_percentage,
        "total_commission_percentage {} is not the sum of assignment percentages {}",
        commission.total_commission_percentage, pct_sum
    );
    assert!(
        pct_sum <= Decimal::from(100),
        "assignment percentages sum to {} which exceeds 100",
        pct_sum
    );

    let amount_sum: Decimal = commission
        .role_assignments
        .iter()
        .map(|a| a.commission_amount.amount())
        .sum();
    assert_eq!(
        amount_sum,
        commission.total_commission_amount.amount(),
        "total_commission_amount {} is not the sum of assignment amounts {}",
        commission.total_commission_amount.amount(),
        amount_sum
    );
}
