//! Split allocation
//!
//! Distributes a commission pot across participating roles. Two entry
//! points: `allocate` combines matched rule actions with role reference
//! data and consultant assignments, enforcing the percentage-sum and
//! over-allocation invariants; `split_fixed_total` divides an externally
//! fixed total among named consultants and requires the split to sum to
//! exactly 100%.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{ConsultantId, Money, TransactionId};

use crate::commission::{CommissionRoleAssignment, TransactionCommission};
use crate::error::AllocError;
use crate::role::{CommissionRole, RoleType};
use crate::rules::RuleAction;

/// One participant's share of an exact-100% fixed split
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultantSplit {
    pub consultant_id: ConsultantId,
    pub role_type: RoleType,
    /// Share of the total (0-100)
    pub percentage: Decimal,
}

/// The split allocator
///
/// Stateless; both operations are pure functions over their inputs.
pub struct SplitAllocator;

impl SplitAllocator {
    pub fn new() -> Self {
        Self
    }

    /// Allocates a commission pot according to matched rule actions
    ///
    /// Percentage actions take `total * percentage / 100`; flat actions
    /// take their amount. The running allocation may never exceed `total`
    /// and percentage shares may never sum above 100 - both fail with
    /// [`AllocError::OverAllocated`] rather than silently clamping.
    /// Every emitted assignment starts `Pending`; the aggregate totals are
    /// recomputed as sums over the assignments.
    ///
    /// An action with `apply_to_all` set spreads its share across every
    /// consultant holding the role, remainder to the last.
    pub fn allocate(
        &self,
        transaction_id: TransactionId,
        base_amount: Money,
        total: Money,
        actions: &[RuleAction],
        roles: &[CommissionRole],
        consultants: &[(RoleType, ConsultantId)],
    ) -> Result<TransactionCommission, AllocError> {
        let mut assignments = Vec::new();
        let mut allocated = Money::zero(total.currency());
        let mut percentage_sum = Decimal::ZERO;

        for action in actions {
            let role = roles
                .iter()
                .find(|r| r.role_type == action.role_type && r.is_active)
                .ok_or_else(|| AllocError::RoleNotFound(action.role_type.to_string()))?;

            let matching: Vec<ConsultantId> = consultants
                .iter()
                .filter(|(role_type, _)| *role_type == action.role_type)
                .map(|(_, consultant_id)| *consultant_id)
                .collect();
            if matching.is_empty() {
                return Err(AllocError::ConsultantNotFound(action.role_type.to_string()));
            }

            let (amount, percentage) = match (action.percentage, action.flat_amount) {
                (Some(p), _) => {
                    percentage_sum += p;
                    if percentage_sum > dec!(100) {
                        return Err(AllocError::OverAllocated {
                            requested: percentage_sum,
                            available: dec!(100),
                        });
                    }
                    (total.percentage_of(p).round_half_up(), p)
                }
                (None, Some(flat)) => {
                    let flat = flat.round_half_up();
                    (flat, flat.as_percentage_of(&total))
                }
                (None, None) => {
                    // match_rules validates actions; a hand-built action
                    // with neither side set allocates nothing
                    (Money::zero(total.currency()), Decimal::ZERO)
                }
            };

            let after = allocated.checked_add(&amount)?;
            if after.amount() > total.amount() {
                return Err(AllocError::OverAllocated {
                    requested: after.amount(),
                    available: total.amount(),
                });
            }
            allocated = after;

            if action.apply_to_all && matching.len() > 1 {
                let share = Decimal::from(100) / Decimal::from(matching.len() as i64);
                let shares: Vec<Decimal> = matching.iter().map(|_| share).collect();
                let amounts = amount.allocate_by_percentages(&shares)?;
                let per_consultant_pct = percentage / Decimal::from(matching.len() as i64);

                for (consultant_id, share_amount) in matching.into_iter().zip(amounts) {
                    assignments.push(CommissionRoleAssignment::pending(
                        Some(role.id),
                        action.role_type.clone(),
                        consultant_id,
                        per_consultant_pct,
                        share_amount,
                    ));
                }
            } else {
                assignments.push(CommissionRoleAssignment::pending(
                    Some(role.id),
                    action.role_type.clone(),
                    matching[0],
                    percentage,
                    amount,
                ));
            }
        }

        Ok(TransactionCommission::from_assignments(
            transaction_id,
            base_amount,
            total,
            assignments,
        )?)
    }

    /// Splits an externally fixed total among named consultants
    ///
    /// Requires the split percentages to sum to exactly 100, failing with
    /// [`AllocError::SplitMismatch`] otherwise - no auto-normalization, so
    /// a mis-specified split surfaces immediately instead of silently
    /// redistributing value. The rounding remainder goes to the last
    /// participant so the distributed amounts sum exactly to `total`.
    pub fn split_fixed_total(
        &self,
        transaction_id: TransactionId,
        total: Money,
        splits: &[ConsultantSplit],
    ) -> Result<TransactionCommission, AllocError> {
        let actual: Decimal = splits.iter().map(|s| s.percentage).sum();
        if actual != dec!(100) {
            return Err(AllocError::SplitMismatch(actual));
        }

        let percentages: Vec<Decimal> = splits.iter().map(|s| s.percentage).collect();
        let amounts = total.allocate_by_percentages(&percentages)?;

        let assignments = splits
            .iter()
            .zip(amounts)
            .map(|(split, amount)| {
                CommissionRoleAssignment::pending(
                    None,
                    split.role_type.clone(),
                    split.consultant_id,
                    split.percentage,
                    amount,
                )
            })
            .collect();

        Ok(TransactionCommission::from_assignments(
            transaction_id,
            total,
            total,
            assignments,
        )?)
    }
}

impl Default for SplitAllocator {
    fn default() -> Self {
        Self::new()
    }
}
