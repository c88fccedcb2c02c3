//! Repository ports
//!
//! The engine depends on rule and role storage only through these
//! read-only traits and holds no global mutable list. Callers pass a
//! consistent snapshot per evaluation; if the hosting service edits rules
//! concurrently, snapshot isolation is the caller's responsibility.

use thiserror::Error;

use core_kernel::{RoleId, RuleId};

use crate::role::{CommissionRole, RoleType};
use crate::rules::CommissionRule;

/// Error type for repository operations
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    /// An internal storage error occurred
    #[error("Internal repository error: {0}")]
    Internal(String),
}

impl RepositoryError {
    pub fn not_found(entity_type: impl Into<String>, id: impl std::fmt::Display) -> Self {
        RepositoryError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }
}

/// Read access to the commission rule collection
pub trait RuleRepository: Send + Sync {
    /// Returns the full rule set snapshot
    fn rules(&self) -> Result<Vec<CommissionRule>, RepositoryError>;

    /// Returns a single rule by id
    fn rule(&self, id: RuleId) -> Result<CommissionRule, RepositoryError>;
}

/// Read access to the commission role collection
pub trait RoleRepository: Send + Sync {
    /// Returns the full role set snapshot
    fn roles(&self) -> Result<Vec<CommissionRole>, RepositoryError>;

    /// Returns a single role by id
    fn role(&self, id: RoleId) -> Result<CommissionRole, RepositoryError>;

    /// Returns the active role for a role type
    fn role_by_type(&self, role_type: &RoleType) -> Result<CommissionRole, RepositoryError>;
}

/// Immutable in-memory rule snapshot
///
/// Backs tests and embedding hosts that already hold the rule set.
pub struct InMemoryRuleRepository {
    rules: Vec<CommissionRule>,
}

impl InMemoryRuleRepository {
    pub fn new(rules: Vec<CommissionRule>) -> Self {
        Self { rules }
    }
}

impl RuleRepository for InMemoryRuleRepository {
    fn rules(&self) -> Result<Vec<CommissionRule>, RepositoryError> {
        Ok(self.rules.clone())
    }

    fn rule(&self, id: RuleId) -> Result<CommissionRule, RepositoryError> {
        self.rules
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("CommissionRule", id))
    }
}

/// Immutable in-memory role snapshot
pub struct InMemoryRoleRepository {
    roles: Vec<CommissionRole>,
}

impl InMemoryRoleRepository {
    pub fn new(roles: Vec<CommissionRole>) -> Self {
        Self { roles }
    }
}

impl RoleRepository for InMemoryRoleRepository {
    fn roles(&self) -> Result<Vec<CommissionRole>, RepositoryError> {
        Ok(self.roles.clone())
    }

    fn role(&self, id: RoleId) -> Result<CommissionRole, RepositoryError> {
        self.roles
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("CommissionRole", id))
    }

    fn role_by_type(&self, role_type: &RoleType) -> Result<CommissionRole, RepositoryError> {
        self.roles
            .iter()
            .find(|r| r.role_type == *role_type && r.is_active)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("CommissionRole", role_type))
    }
}
