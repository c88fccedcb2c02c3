//! Transaction commission aggregate
//!
//! `TransactionCommission` is the consistency boundary for a computed
//! commission. Aggregate totals are always recomputed from the role
//! assignments, never set independently, so the sum invariants hold by
//! construction.
//!
//! # Invariants
//!
//! - `total_commission_percentage` equals the sum of assignment percentages
//! - `total_commission_amount` equals the sum of assignment amounts
//! - status transitions follow Draft -> Pending -> Approved -> Paid, with
//!   Cancelled reachable from any non-paid state
//! - assignments are never recalculated once the aggregate is approved

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{CommissionId, ConsultantId, Money, MoneyError, RoleId, TransactionId};

use crate::error::CommissionError;
use crate::role::RoleType;

/// Lifecycle state of a transaction commission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommissionStatus {
    Draft,
    Pending,
    Approved,
    Paid,
    Cancelled,
}

impl fmt::Display for CommissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CommissionStatus::Draft => "draft",
            CommissionStatus::Pending => "pending",
            CommissionStatus::Approved => "approved",
            CommissionStatus::Paid => "paid",
            CommissionStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

/// Lifecycle state of a single role assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Pending,
    Approved,
    Paid,
    Cancelled,
}

/// One participant's share of a commission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionRoleAssignment {
    /// The role record backing the assignment; absent for fixed splits,
    /// which name a role type without resolving a role record
    pub role_id: Option<RoleId>,
    pub role_type: RoleType,
    pub consultant_id: ConsultantId,
    /// Share of the total commission (0-100)
    pub percentage: Decimal,
    pub commission_amount: Money,
    pub status: AssignmentStatus,
}

impl CommissionRoleAssignment {
    /// Creates a pending assignment
    pub fn pending(
        role_id: Option<RoleId>,
        role_type: RoleType,
        consultant_id: ConsultantId,
        percentage: Decimal,
        commission_amount: Money,
    ) -> Self {
        Self {
            role_id,
            role_type,
            consultant_id,
            percentage,
            commission_amount,
            status: AssignmentStatus::Pending,
        }
    }
}

/// Aggregate root for a computed commission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionCommission {
    pub id: CommissionId,
    pub transaction_id: TransactionId,
    /// The transaction value commission was computed against
    pub base_amount: Money,
    /// The commission pot distributed across the assignments
    pub total_commissionable_amount: Money,
    pub role_assignments: Vec<CommissionRoleAssignment>,
    pub total_commission_percentage: Decimal,
    pub total_commission_amount: Money,
    pub status: CommissionStatus,
}

impl TransactionCommission {
    /// Builds a draft aggregate, recomputing totals from the assignments
    pub fn from_assignments(
        transaction_id: TransactionId,
        base_amount: Money,
        total_commissionable_amount: Money,
        role_assignments: Vec<CommissionRoleAssignment>,
    ) -> Result<Self, MoneyError> {
        let currency = total_commissionable_amount.currency();

        let total_commission_percentage: Decimal =
            role_assignments.iter().map(|a| a.percentage).sum();

        let mut total_commission_amount = Money::zero(currency);
        for assignment in &role_assignments {
            total_commission_amount =
                total_commission_amount.checked_add(&assignment.commission_amount)?;
        }

        Ok(Self {
            id: CommissionId::new(),
            transaction_id,
            base_amount,
            total_commissionable_amount,
            role_assignments,
            total_commission_percentage,
            total_commission_amount,
            status: CommissionStatus::Draft,
        })
    }

    /// Returns true if no role participates (no commission owed)
    pub fn is_empty(&self) -> bool {
        self.role_assignments.is_empty()
    }

    /// Draft -> Pending
    pub fn submit(&mut self) -> Result<(), CommissionError> {
        self.transition(CommissionStatus::Draft, CommissionStatus::Pending)
    }

    /// Pending -> Approved; cascades to the assignments
    pub fn approve(&mut self) -> Result<(), CommissionError> {
        self.transition(CommissionStatus::Pending, CommissionStatus::Approved)?;
        for assignment in &mut self.role_assignments {
            assignment.status = AssignmentStatus::Approved;
        }
        Ok(())
    }

    /// Approved -> Paid; cascades to the assignments
    pub fn mark_paid(&mut self) -> Result<(), CommissionError> {
        self.transition(CommissionStatus::Approved, CommissionStatus::Paid)?;
        for assignment in &mut self.role_assignments {
            assignment.status = AssignmentStatus::Paid;
        }
        Ok(())
    }

    /// Any non-paid state -> Cancelled; cascades to unpaid assignments
    pub fn cancel(&mut self) -> Result<(), CommissionError> {
        if self.status == CommissionStatus::Paid {
            return Err(CommissionError::invalid_transition(
                self.status.to_string(),
                CommissionStatus::Cancelled.to_string(),
            ));
        }
        self.status = CommissionStatus::Cancelled;
        for assignment in &mut self.role_assignments {
            if assignment.status != AssignmentStatus::Paid {
                assignment.status = AssignmentStatus::Cancelled;
            }
        }
        Ok(())
    }

    fn transition(
        &mut self,
        expected: CommissionStatus,
        next: CommissionStatus,
    ) -> Result<(), CommissionError> {
        if self.status != expected {
            return Err(CommissionError::invalid_transition(
                self.status.to_string(),
                next.to_string(),
            ));
        }
        self.status = next;
        Ok(())
    }
}
