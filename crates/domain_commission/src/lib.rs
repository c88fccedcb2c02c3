//! Commission Domain
//!
//! This crate implements the commission computation core: how much
//! commission a business transaction earns and how it is divided among the
//! participating roles.
//!
//! # Architecture
//!
//! Three cooperating, pure components:
//! - **Calculation engine**: base amount + commission structure
//!   (percentage, flat, tiered, custom) -> commission amount with an
//!   auditable breakdown
//! - **Rule matcher**: transaction attributes + ordered, conditionally
//!   scoped rules -> matched role actions
//! - **Split allocator**: distributes a commission pot (or an externally
//!   fixed total) across participants under a strict percentage-sum
//!   invariant
//!
//! The engine has no dependency on the matcher, the matcher none on the
//! engine; the allocator consumes both outputs. All operations are pure
//! functions over immutable snapshots and can run on any number of
//! parallel workers without coordination.
//!
//! # Commission Lifecycle
//!
//! ```text
//! Draft -> Pending -> Approved -> Paid
//!      \-> Cancelled (from any non-paid state)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_commission::{CalculationEngine, CommissionStructure, EngineConfig};
//!
//! let engine = CalculationEngine::new(EngineConfig::default());
//! let result = engine.calculate(
//!     Money::new(dec!(10000), Currency::USD),
//!     &CommissionStructure::Percentage { rate: dec!(15) },
//! )?;
//! assert_eq!(result.commission_amount.amount(), dec!(1500));
//! ```

pub mod calculation;
pub mod commission;
pub mod config;
pub mod error;
pub mod ports;
pub mod registry;
pub mod role;
pub mod rules;
pub mod service;
pub mod split;
pub mod structure;

pub use calculation::{CalculationEngine, CommissionResult, TierBreakdownEntry};
pub use commission::{
    AssignmentStatus, CommissionRoleAssignment, CommissionStatus, TransactionCommission,
};
pub use config::{EngineConfig, EngineConfigBuilder, ExcessPolicy};
pub use error::{AllocError, CalcError, CommissionError, ConfigError};
pub use ports::{
    InMemoryRoleRepository, InMemoryRuleRepository, RepositoryError, RoleRepository,
    RuleRepository,
};
pub use registry::{CustomStrategy, StrategyRegistry};
pub use role::{CommissionRole, RoleType};
pub use rules::{
    match_rules, CommissionRule, ConditionField, ConditionOperator, ConditionValue, FieldValue,
    RuleAction, RuleCondition, TransactionAttributes,
};
pub use service::CommissionService;
pub use split::{ConsultantSplit, SplitAllocator};
pub use structure::{CommissionStructure, CommissionTier};
