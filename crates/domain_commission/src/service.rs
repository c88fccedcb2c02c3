//! Commission evaluation service
//!
//! Orchestrates the full evaluation flow: read a rule/role snapshot
//! through the repository ports, match rules against the transaction,
//! compute the commissionable amount, and allocate it across the
//! participating roles. This is the synchronous, library-level entry
//! point invoked by whatever billing/reporting service owns transactions.

use chrono::{DateTime, Utc};
use tracing::debug;

use core_kernel::{ConsultantId, Money, TransactionId};

use crate::calculation::CalculationEngine;
use crate::commission::TransactionCommission;
use crate::error::CommissionError;
use crate::ports::{RoleRepository, RuleRepository};
use crate::role::RoleType;
use crate::rules::{match_rules, TransactionAttributes};
use crate::split::{ConsultantSplit, SplitAllocator};
use crate::structure::CommissionStructure;

/// Service combining the calculation engine, rule matcher, and allocator
pub struct CommissionService<RR, RO>
where
    RR: RuleRepository,
    RO: RoleRepository,
{
    engine: CalculationEngine,
    allocator: SplitAllocator,
    rule_repository: RR,
    role_repository: RO,
}

impl<RR, RO> CommissionService<RR, RO>
where
    RR: RuleRepository,
    RO: RoleRepository,
{
    pub fn new(engine: CalculationEngine, rule_repository: RR, role_repository: RO) -> Self {
        Self {
            engine,
            allocator: SplitAllocator::new(),
            rule_repository,
            role_repository,
        }
    }

    /// Evaluates a transaction into a pending commission
    ///
    /// No matching rule means no commission owed: the result is an empty
    /// pending aggregate with zero totals, not an error. Every other
    /// failure is a blocking validation error - a transaction whose
    /// commission cannot be computed must not reach approval.
    pub fn evaluate_transaction(
        &self,
        txn: &TransactionAttributes,
        structure: &CommissionStructure,
        consultants: &[(RoleType, ConsultantId)],
        as_of: DateTime<Utc>,
    ) -> Result<TransactionCommission, CommissionError> {
        let rules = self.rule_repository.rules()?;
        let actions = match_rules(txn, &rules, as_of)?;

        if actions.is_empty() {
            debug!(transaction_id = %txn.transaction_id, "no commission rules matched");
            let mut commission = TransactionCommission::from_assignments(
                txn.transaction_id,
                txn.base_amount,
                Money::zero(txn.base_amount.currency()),
                Vec::new(),
            )?;
            commission.submit()?;
            return Ok(commission);
        }

        let result = self.engine.calculate(txn.base_amount, structure)?;
        let roles = self.role_repository.roles()?;

        let mut commission = self.allocator.allocate(
            txn.transaction_id,
            txn.base_amount,
            result.commission_amount,
            &actions,
            &roles,
            consultants,
        )?;
        commission.submit()?;

        debug!(
            transaction_id = %txn.transaction_id,
            total = %commission.total_commission_amount,
            assignments = commission.role_assignments.len(),
            "commission evaluated"
        );
        Ok(commission)
    }

    /// Splits a fixed total among named consultants, independent of rules
    pub fn split_commission(
        &self,
        transaction_id: TransactionId,
        total: Money,
        splits: &[ConsultantSplit],
    ) -> Result<TransactionCommission, CommissionError> {
        let mut commission = self
            .allocator
            .split_fixed_total(transaction_id, total, splits)?;
        commission.submit()?;
        Ok(commission)
    }
}
