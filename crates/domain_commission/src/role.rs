//! Commission roles
//!
//! Roles are participant categories eligible for a share of a commission.
//! They are reference data: read by the allocator, never mutated here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::RoleId;

/// Participant category eligible for a commission share
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoleType {
    SalesAgent,
    Recruiter,
    AccountManager,
    TeamLead,
    /// A role category outside the standard set
    Other(String),
}

impl RoleType {
    pub fn as_str(&self) -> &str {
        match self {
            RoleType::SalesAgent => "sales-agent",
            RoleType::Recruiter => "recruiter",
            RoleType::AccountManager => "account-manager",
            RoleType::TeamLead => "team-lead",
            RoleType::Other(name) => name,
        }
    }
}

impl fmt::Display for RoleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A commission role record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionRole {
    /// Unique identifier
    pub id: RoleId,
    /// The participant category
    pub role_type: RoleType,
    /// Default commission percentage for this role (0-100)
    pub default_rate: Decimal,
    /// Inactive roles cannot be allocated to
    pub is_active: bool,
}

impl CommissionRole {
    /// Creates an active role
    pub fn new(role_type: RoleType, default_rate: Decimal) -> Self {
        Self {
            id: RoleId::new(),
            role_type,
            default_rate,
            is_active: true,
        }
    }

    /// Deactivates the role
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}
