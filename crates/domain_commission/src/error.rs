//! Commission domain errors
//!
//! All computation paths return typed results; there is no
//! exceptions-as-control-flow and nothing transient to retry. Callers are
//! expected to surface these errors as blocking validation failures: a
//! transaction whose commission cannot be computed must not be approved.

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::{MoneyError, RuleId};

use crate::ports::RepositoryError;

/// Errors from the calculation engine and the rule matcher
#[derive(Debug, Error)]
pub enum CalcError {
    /// Negative base amount
    #[error("Invalid base amount: {0}")]
    InvalidAmount(String),

    /// Base amount currency differs from the configured engine currency
    #[error("Currency mismatch: expected {expected}, got {actual}")]
    CurrencyMismatch { expected: String, actual: String },

    /// Two matched rules assign the same role
    #[error("Duplicate action for role {role_type} (rule {rule_id})")]
    DuplicateRoleAction { role_type: String, rule_id: RuleId },

    /// A rule action does not carry exactly one of percentage/flat amount
    #[error("Invalid rule action: {0}")]
    InvalidRuleAction(String),

    /// Amount above the highest bounded tier, under `ExcessPolicy::Error`
    #[error("Amount {0} is not covered by any tier")]
    UncoveredTierAmount(Decimal),
}

/// Errors from the split allocator
#[derive(Debug, Error)]
pub enum AllocError {
    /// Allocations exceed the total commissionable amount
    #[error("Over-allocated: requested {requested} exceeds remaining {available}")]
    OverAllocated {
        requested: Decimal,
        available: Decimal,
    },

    /// An exact-100% split was required but percentages summed to something else
    #[error("Split percentages must sum to 100, got {0}")]
    SplitMismatch(Decimal),

    /// No active role record for a matched action's role type
    #[error("No active role found for type {0}")]
    RoleNotFound(String),

    /// No consultant supplied for a matched action's role type
    #[error("No consultant assigned for role type {0}")]
    ConsultantNotFound(String),

    /// Money arithmetic error (currency mismatch between inputs)
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}

/// Engine configuration errors
///
/// `MissingCustomStrategy` is special-cased by the engine: it is logged and
/// the calculation falls back to percentage semantics at the configured
/// fallback rate rather than failing the evaluation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No custom strategy registered for id '{0}'")]
    MissingCustomStrategy(String),

    #[error("Fallback rate must be within [0, 100], got {0}")]
    InvalidFallbackRate(Decimal),
}

/// Service-level error composing the component errors
#[derive(Debug, Error)]
pub enum CommissionError {
    #[error("Calculation error: {0}")]
    Calc(#[from] CalcError),

    #[error("Allocation error: {0}")]
    Alloc(#[from] AllocError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },
}

impl CommissionError {
    pub fn invalid_transition(from: impl Into<String>, to: impl Into<String>) -> Self {
        CommissionError::InvalidStatusTransition {
            from: from.into(),
            to: to.into(),
        }
    }
}
