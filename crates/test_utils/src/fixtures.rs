//! Pre-built Test Fixtures
//!
//! Ready-to-use test data for common entities across the commission
//! system. Fixtures are consistent and predictable for unit tests.

use chrono::{DateTime, TimeZone, Utc};
use core_kernel::{ConsultantId, Currency, Money, ValidPeriod};
use fake::faker::company::en::CompanyName;
use fake::Fake;
use once_cell::sync::Lazy;
use rust_decimal_macros::dec;

use domain_commission::{CommissionRole, RoleType};

/// The canonical evaluation instant used across the suite (Mar 15, 2026)
pub static AS_OF: Lazy<DateTime<Utc>> =
    Lazy::new(|| Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap());

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// A standard USD amount
    pub fn usd_100() -> Money {
        Money::new(dec!(100.00), Currency::USD)
    }

    /// A typical subscription sale base amount
    pub fn usd_subscription() -> Money {
        Money::new(dec!(10000.00), Currency::USD)
    }

    /// A large RPO contract base amount
    pub fn usd_large_deal() -> Money {
        Money::new(dec!(120000.00), Currency::USD)
    }

    /// A zero amount
    pub fn usd_zero() -> Money {
        Money::zero(Currency::USD)
    }

    /// A EUR amount for currency mismatch tests
    pub fn eur_100() -> Money {
        Money::new(dec!(100.00), Currency::EUR)
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Standard rule effective start (Jan 1, 2026)
    pub fn effective_start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
    }

    /// Standard rule effective end (Jan 1, 2027)
    pub fn effective_end() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap()
    }

    /// A bounded effective window covering [`AS_OF`]
    pub fn current_window() -> ValidPeriod {
        ValidPeriod::bounded(Self::effective_start(), Self::effective_end()).unwrap()
    }

    /// A window that ended before [`AS_OF`]
    pub fn expired_window() -> ValidPeriod {
        ValidPeriod::bounded(
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        )
        .unwrap()
    }
}

/// Fixture for role reference data
pub struct RoleFixtures;

impl RoleFixtures {
    /// The standard active role set
    pub fn standard_roles() -> Vec<CommissionRole> {
        vec![
            CommissionRole::new(RoleType::SalesAgent, dec!(30)),
            CommissionRole::new(RoleType::Recruiter, dec!(20)),
            CommissionRole::new(RoleType::AccountManager, dec!(10)),
            CommissionRole::new(RoleType::TeamLead, dec!(5)),
        ]
    }

    /// A single consultant per standard role
    pub fn standard_consultants() -> Vec<(RoleType, ConsultantId)> {
        vec![
            (RoleType::SalesAgent, ConsultantId::new()),
            (RoleType::Recruiter, ConsultantId::new()),
            (RoleType::AccountManager, ConsultantId::new()),
            (RoleType::TeamLead, ConsultantId::new()),
        ]
    }
}

/// Fixture for string test data
pub struct StringFixtures;

impl StringFixtures {
    /// A plausible employer identifier
    pub fn employer_id() -> String {
        let name: String = CompanyName().fake();
        name.to_lowercase().replace(' ', "-")
    }

    /// The subscription transaction type used across the suite
    pub fn ats_subscription() -> &'static str {
        "ats-subscription"
    }

    /// The recruitment-service transaction type
    pub fn recruitment_service() -> &'static str {
        "recruitment-service"
    }
}
