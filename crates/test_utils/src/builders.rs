//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults.
//! Tests specify only the relevant fields and use defaults for the rest.

use std::collections::HashMap;

use core_kernel::{Currency, Money, RuleId, TransactionId, ValidPeriod};
use rust_decimal_macros::dec;

use domain_commission::{
    CommissionRule, FieldValue, RuleAction, RuleCondition, TransactionAttributes,
};

use crate::fixtures::TemporalFixtures;

/// Builder for commission rules
pub struct RuleBuilder {
    id: RuleId,
    name: String,
    priority: i32,
    conditions: Vec<RuleCondition>,
    actions: Vec<RuleAction>,
    is_active: bool,
    effective: ValidPeriod,
}

impl Default for RuleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleBuilder {
    /// Creates a builder with an active, currently-effective rule
    pub fn new() -> Self {
        Self {
            id: RuleId::new(),
            name: "test rule".to_string(),
            priority: 0,
            conditions: Vec::new(),
            actions: Vec::new(),
            is_active: true,
            effective: TemporalFixtures::current_window(),
        }
    }

    pub fn with_id(mut self, id: RuleId) -> Self {
        self.id = id;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_condition(mut self, condition: RuleCondition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_action(mut self, action: RuleAction) -> Self {
        self.actions.push(action);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn with_effective(mut self, effective: ValidPeriod) -> Self {
        self.effective = effective;
        self
    }

    pub fn build(self) -> CommissionRule {
        CommissionRule {
            id: self.id,
            name: self.name,
            priority: self.priority,
            conditions: self.conditions,
            actions: self.actions,
            is_active: self.is_active,
            effective: self.effective,
        }
    }
}

/// Builder for transaction attributes
pub struct TransactionAttributesBuilder {
    transaction_id: TransactionId,
    transaction_type: String,
    base_amount: Money,
    employer_id: Option<String>,
    subscription_tier: Option<String>,
    service_type: Option<String>,
    metadata: HashMap<String, FieldValue>,
}

impl Default for TransactionAttributesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionAttributesBuilder {
    /// Creates a builder for a USD 10,000 ats-subscription sale
    pub fn new() -> Self {
        Self {
            transaction_id: TransactionId::new(),
            transaction_type: "ats-subscription".to_string(),
            base_amount: Money::new(dec!(10000), Currency::USD),
            employer_id: None,
            subscription_tier: None,
            service_type: None,
            metadata: HashMap::new(),
        }
    }

    pub fn with_transaction_id(mut self, id: TransactionId) -> Self {
        self.transaction_id = id;
        self
    }

    pub fn with_transaction_type(mut self, transaction_type: impl Into<String>) -> Self {
        self.transaction_type = transaction_type.into();
        self
    }

    pub fn with_base_amount(mut self, amount: Money) -> Self {
        self.base_amount = amount;
        self
    }

    pub fn with_employer_id(mut self, employer_id: impl Into<String>) -> Self {
        self.employer_id = Some(employer_id.into());
        self
    }

    pub fn with_subscription_tier(mut self, tier: impl Into<String>) -> Self {
        self.subscription_tier = Some(tier.into());
        self
    }

    pub fn with_service_type(mut self, service_type: impl Into<String>) -> Self {
        self.service_type = Some(service_type.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: FieldValue) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    pub fn build(self) -> TransactionAttributes {
        TransactionAttributes {
            transaction_id: self.transaction_id,
            transaction_type: self.transaction_type,
            base_amount: self.base_amount,
            employer_id: self.employer_id,
            subscription_tier: self.subscription_tier,
            service_type: self.service_type,
            metadata: self.metadata,
        }
    }
}

/// Shorthand for a rule id with a fixed low/high ordering position
///
/// Deterministic ids make priority tie-break tests reproducible.
pub fn rule_id_from_byte(byte: u8) -> RuleId {
    let mut bytes = [0u8; 16];
    bytes[15] = byte;
    RuleId::from_uuid(uuid::Uuid::from_bytes(bytes))
}
