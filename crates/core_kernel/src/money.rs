//! Money types with precise decimal arithmetic
//!
//! This module provides a type-safe representation of monetary values
//! using rust_decimal for precise calculations without floating-point errors.
//! Commission amounts are rounded half-up to the currency's minor unit,
//! exactly once at the end of a calculation.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use thiserror::Error;

/// Currency codes following ISO 4217
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    USD,
    EUR,
    GBP,
    INR,
    AUD,
}

impl Currency {
    /// Returns the number of decimal places for this currency
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Returns the currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::INR => "₹",
            Currency::AUD => "A$",
        }
    }

    /// Returns the ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::INR => "INR",
            Currency::AUD => "AUD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Currency mismatch: cannot operate on {0} and {1}")]
    CurrencyMismatch(String, String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

/// A monetary amount with associated currency
///
/// Money uses rust_decimal for precise arithmetic without floating-point
/// errors. Amounts are stored with 4 decimal places internally so that
/// intermediate percentage math does not lose precision before the final
/// rounding step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a new Money value
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self {
            amount: amount.round_dp(4),
            currency,
        }
    }

    /// Creates Money from an integer amount in minor units (e.g., cents)
    pub fn from_minor(minor_units: i64, currency: Currency) -> Self {
        let divisor = Decimal::new(10_i64.pow(currency.decimal_places()), 0);
        Self::new(Decimal::new(minor_units, 0) / divisor, currency)
    }

    /// Creates a zero amount in the specified currency
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: dec!(0),
            currency,
        }
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is positive
    pub fn is_positive(&self) -> bool {
        self.amount.is_sign_positive() && !self.amount.is_zero()
    }

    /// Returns true if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Rounds half-up to the currency's minor unit
    ///
    /// This is the terminal rounding step for every commission amount.
    /// It must be applied once, at the end of a calculation, never on
    /// intermediate values.
    pub fn round_half_up(&self) -> Self {
        Self {
            amount: self.amount.round_dp_with_strategy(
                self.currency.decimal_places(),
                RoundingStrategy::MidpointAwayFromZero,
            ),
            currency: self.currency,
        }
    }

    /// Checked addition that returns an error on currency mismatch
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                other.currency.to_string(),
            ));
        }
        Ok(Self::new(self.amount + other.amount, self.currency))
    }

    /// Checked subtraction that returns an error on currency mismatch
    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                other.currency.to_string(),
            ));
        }
        Ok(Self::new(self.amount - other.amount, self.currency))
    }

    /// Multiplies by a scalar (e.g., for rate calculations)
    pub fn multiply(&self, factor: Decimal) -> Self {
        Self::new(self.amount * factor, self.currency)
    }

    /// Takes a percentage (0-100) of this amount, unrounded
    pub fn percentage_of(&self, percentage: Decimal) -> Self {
        self.multiply(percentage / dec!(100))
    }

    /// Expresses this amount as a percentage of a base amount
    ///
    /// Used for reporting derived rates. A zero base yields 0 rather
    /// than a division error.
    pub fn as_percentage_of(&self, base: &Money) -> Decimal {
        if base.amount.is_zero() {
            return Decimal::ZERO;
        }
        self.amount / base.amount * dec!(100)
    }

    /// Allocates money according to percentage shares
    ///
    /// The last allocation receives the rounding remainder so that the
    /// returned amounts always sum exactly to the original. Shares are
    /// expected to sum to 100; the caller validates that invariant.
    pub fn allocate_by_percentages(&self, percentages: &[Decimal]) -> Result<Vec<Money>, MoneyError> {
        if percentages.is_empty() {
            return Err(MoneyError::InvalidAmount("Empty percentage list".to_string()));
        }

        let mut allocated = Money::zero(self.currency);
        let mut allocations = Vec::with_capacity(percentages.len());

        for (i, percentage) in percentages.iter().enumerate() {
            if i == percentages.len() - 1 {
                // Last allocation gets the remainder to ensure sum equals original
                let remainder = self.checked_sub(&allocated)?;
                allocations.push(remainder);
            } else {
                let allocation = self.percentage_of(*percentage).round_half_up();
                allocated = allocated.checked_add(&allocation)?;
                allocations.push(allocation);
            }
        }

        Ok(allocations)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dp = self.currency.decimal_places();
        write!(
            f,
            "{} {:.dp$}",
            self.currency.symbol(),
            self.amount,
            dp = dp as usize
        )
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.checked_add(&other)
            .expect("Currency mismatch in Money::add")
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.checked_sub(&other)
            .expect("Currency mismatch in Money::sub")
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn percentage_allocation_sum_equals_original(
            amount in 1i64..1_000_000_000i64,
            a in 1u32..99u32
        ) {
            let money = Money::from_minor(amount, Currency::USD);
            let shares = vec![Decimal::from(a), Decimal::from(100 - a)];
            let allocations = money.allocate_by_percentages(&shares).unwrap();

            let total: Decimal = allocations.iter().map(|m| m.amount()).sum();
            prop_assert_eq!(total, money.amount());
        }

        #[test]
        fn money_arithmetic_is_associative(
            a in -1_000_000i64..1_000_000i64,
            b in -1_000_000i64..1_000_000i64,
            c in -1_000_000i64..1_000_000i64
        ) {
            let ma = Money::from_minor(a, Currency::USD);
            let mb = Money::from_minor(b, Currency::USD);
            let mc = Money::from_minor(c, Currency::USD);

            prop_assert_eq!((ma + mb) + mc, ma + (mb + mc));
        }

        #[test]
        fn round_half_up_moves_at_most_half_a_cent(
            amount in -10_000_000_000i64..10_000_000_000i64
        ) {
            // Amounts with 4 internal decimal places
            let money = Money::new(Decimal::new(amount, 4), Currency::USD);
            let rounded = money.round_half_up();
            let diff = (rounded.amount() - money.amount()).abs();
            prop_assert!(diff <= Decimal::new(5, 3)); // 0.005
        }
    }
}
