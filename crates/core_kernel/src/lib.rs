//! Core Kernel - Foundational types for the commission system
//!
//! This crate provides the fundamental building blocks used by the
//! commission domain:
//! - Money types with precise decimal arithmetic
//! - Validity periods for rule effectiveness windows
//! - Strongly-typed identifiers

pub mod identifiers;
pub mod money;
pub mod temporal;

pub use identifiers::{CommissionId, ConsultantId, RoleId, RuleId, TransactionId};
pub use money::{Currency, Money, MoneyError};
pub use temporal::{TemporalError, ValidPeriod};
