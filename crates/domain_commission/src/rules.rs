//! Commission rules and the rule matcher
//!
//! Rules are administrator-authored policies, read-only during evaluation.
//! Matching is deterministic: rules are considered in priority order
//! (descending, ties broken by rule id ascending) and the actions of every
//! matching rule are collected, so a transaction may earn role actions from
//! several rules at once. Two actions targeting the same role are rejected
//! rather than silently overwritten.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{Money, RuleId, TransactionId, ValidPeriod};

use crate::error::CalcError;
use crate::role::RoleType;

/// A transaction attribute a condition can test
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionField {
    TransactionType,
    BaseAmount,
    EmployerId,
    SubscriptionTier,
    ServiceType,
    /// A caller-supplied metadata key
    Metadata(String),
}

/// A typed attribute value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(Decimal),
}

impl FieldValue {
    fn as_number(&self) -> Option<Decimal> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<Decimal> for FieldValue {
    fn from(n: Decimal) -> Self {
        FieldValue::Number(n)
    }
}

/// Condition comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    Equals,
    GreaterThan,
    LessThan,
    In,
    NotIn,
}

/// The value side of a condition
///
/// `In`/`NotIn` test membership against `Many`; the remaining operators
/// compare against `One`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    One(FieldValue),
    Many(Vec<FieldValue>),
}

/// A single rule condition; all conditions in a rule are ANDed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleCondition {
    pub field: ConditionField,
    pub operator: ConditionOperator,
    pub value: ConditionValue,
}

impl RuleCondition {
    /// Evaluates the condition against a transaction
    ///
    /// A missing attribute never matches, regardless of operator.
    pub fn evaluate(&self, txn: &TransactionAttributes) -> bool {
        let actual = match txn.field(&self.field) {
            Some(value) => value,
            None => return false,
        };

        match (&self.operator, &self.value) {
            (ConditionOperator::Equals, ConditionValue::One(expected)) => actual == *expected,
            (ConditionOperator::GreaterThan, ConditionValue::One(expected)) => {
                match (actual.as_number(), expected.as_number()) {
                    (Some(a), Some(e)) => a > e,
                    _ => false,
                }
            }
            (ConditionOperator::LessThan, ConditionValue::One(expected)) => {
                match (actual.as_number(), expected.as_number()) {
                    (Some(a), Some(e)) => a < e,
                    _ => false,
                }
            }
            (ConditionOperator::In, ConditionValue::Many(set)) => set.contains(&actual),
            (ConditionOperator::NotIn, ConditionValue::Many(set)) => !set.contains(&actual),
            // Operator/value shape mismatch never matches
            _ => false,
        }
    }
}

/// An action emitted by a matching rule
///
/// Exactly one of `percentage`/`flat_amount` is set; the constructors
/// enforce this and [`RuleAction::validate`] re-checks rules coming from
/// external storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleAction {
    pub role_type: RoleType,
    /// Percentage of the commissionable amount (0-100)
    pub percentage: Option<Decimal>,
    /// Flat amount independent of the commissionable amount
    pub flat_amount: Option<Money>,
    /// Spread the share across every consultant holding the role
    pub apply_to_all: bool,
}

impl RuleAction {
    /// Creates a percentage-based action
    pub fn percentage(role_type: RoleType, percentage: Decimal) -> Self {
        Self {
            role_type,
            percentage: Some(percentage),
            flat_amount: None,
            apply_to_all: false,
        }
    }

    /// Creates a flat-amount action
    pub fn flat(role_type: RoleType, amount: Money) -> Self {
        Self {
            role_type,
            percentage: None,
            flat_amount: Some(amount),
            apply_to_all: false,
        }
    }

    /// Spreads the action across all consultants holding the role
    pub fn for_all_consultants(mut self) -> Self {
        self.apply_to_all = true;
        self
    }

    /// Checks the exactly-one-of invariant
    pub fn validate(&self) -> Result<(), CalcError> {
        match (self.percentage, self.flat_amount) {
            (Some(_), None) | (None, Some(_)) => Ok(()),
            (Some(_), Some(_)) => Err(CalcError::InvalidRuleAction(format!(
                "action for {} sets both percentage and flat amount",
                self.role_type
            ))),
            (None, None) => Err(CalcError::InvalidRuleAction(format!(
                "action for {} sets neither percentage nor flat amount",
                self.role_type
            ))),
        }
    }
}

/// A conditionally-scoped commission policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionRule {
    pub id: RuleId,
    /// Administrator-facing name
    pub name: String,
    /// Higher priority rules are considered first
    pub priority: i32,
    pub conditions: Vec<RuleCondition>,
    pub actions: Vec<RuleAction>,
    pub is_active: bool,
    /// Business-effective window `[effective_from, effective_to)`
    pub effective: ValidPeriod,
}

impl CommissionRule {
    /// Returns true if every condition holds for the transaction
    pub fn matches(&self, txn: &TransactionAttributes) -> bool {
        self.conditions.iter().all(|c| c.evaluate(txn))
    }

    /// Returns true if the rule is active and effective at the instant
    pub fn is_applicable(&self, as_of: DateTime<Utc>) -> bool {
        self.is_active && self.effective.contains(as_of)
    }
}

/// Attributes of the transaction being evaluated
///
/// Supplied by the billing/subscription modules that own transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionAttributes {
    pub transaction_id: TransactionId,
    pub transaction_type: String,
    pub base_amount: Money,
    pub employer_id: Option<String>,
    pub subscription_tier: Option<String>,
    pub service_type: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, FieldValue>,
}

impl TransactionAttributes {
    /// Resolves a condition field to its value, if present
    pub fn field(&self, field: &ConditionField) -> Option<FieldValue> {
        match field {
            ConditionField::TransactionType => {
                Some(FieldValue::Text(self.transaction_type.clone()))
            }
            ConditionField::BaseAmount => Some(FieldValue::Number(self.base_amount.amount())),
            ConditionField::EmployerId => self.employer_id.clone().map(FieldValue::Text),
            ConditionField::SubscriptionTier => {
                self.subscription_tier.clone().map(FieldValue::Text)
            }
            ConditionField::ServiceType => self.service_type.clone().map(FieldValue::Text),
            ConditionField::Metadata(key) => self.metadata.get(key).cloned(),
        }
    }
}

/// Evaluates the rule set against a transaction
///
/// Filters to applicable rules, orders them by priority descending with
/// ties broken by rule id ascending, and collects the actions of every
/// matching rule. Two matched actions targeting the same role type fail
/// with [`CalcError::DuplicateRoleAction`]; an empty result means "no
/// commission owed" and is not an error.
pub fn match_rules(
    txn: &TransactionAttributes,
    rules: &[CommissionRule],
    as_of: DateTime<Utc>,
) -> Result<Vec<RuleAction>, CalcError> {
    let mut applicable: Vec<&CommissionRule> =
        rules.iter().filter(|r| r.is_applicable(as_of)).collect();

    applicable.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.id.cmp(&b.id)));

    let mut actions = Vec::new();
    let mut assigned_roles: HashSet<RoleType> = HashSet::new();

    for rule in applicable {
        if !rule.matches(txn) {
            continue;
        }
        debug!(rule_id = %rule.id, priority = rule.priority, "commission rule matched");

        for action in &rule.actions {
            action.validate()?;
            if !assigned_roles.insert(action.role_type.clone()) {
                return Err(CalcError::DuplicateRoleAction {
                    role_type: action.role_type.to_string(),
                    rule_id: rule.id,
                });
            }
            actions.push(action.clone());
        }
    }

    Ok(actions)
}
