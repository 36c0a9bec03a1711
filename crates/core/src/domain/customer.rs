use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::plan::PlanTier;
use crate::errors::DomainError;

pub const DEFAULT_COMPANY: &str = "Demo Company";
pub const DEFAULT_MONTHLY_USAGE: f64 = 50.0;
pub const DEFAULT_MONTHS_SUBSCRIBED: u32 = 6;
pub const DEFAULT_PAYMENT_ISSUES: u32 = 0;
pub const DEFAULT_SUPPORT_TICKETS: u32 = 1;
pub const DEFAULT_FEATURE_USAGE: [&str; 2] = ["email_templates", "basic_analytics"];

pub fn default_subscription_value() -> Decimal {
    Decimal::new(29, 0)
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(pub String);

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for RiskLevel {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => {
                Err(DomainError::UnknownVariant { kind: "risk level", value: other.to_owned() })
            }
        }
    }
}

/// Customer attributes the dialogue engine reads. Built once per request and never mutated.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CustomerProfile {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub company: String,
    pub plan: PlanTier,
    #[serde(with = "rust_decimal::serde::float")]
    pub subscription_value: Decimal,
    pub monthly_usage: f64,
    pub months_subscribed: u32,
    pub payment_issues: u32,
    pub support_tickets: u32,
    pub feature_usage: Vec<String>,
    pub churn_risk: RiskLevel,
    pub upsell_potential: RiskLevel,
}

impl CustomerProfile {
    /// Profile served for identifiers the customer store does not know.
    pub fn fallback(id: CustomerId) -> Self {
        CustomerRecord::default().into_profile(id)
    }
}

/// Loosely-typed customer data as it arrives from fixtures or an external store.
///
/// Every field is optional; `into_profile` fills gaps with the documented defaults and
/// degrades unrecognized plan or risk names instead of failing.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CustomerRecord {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub plan: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub subscription_value: Option<Decimal>,
    pub monthly_usage: Option<f64>,
    pub months_subscribed: Option<u32>,
    pub payment_issues: Option<u32>,
    pub support_tickets: Option<u32>,
    pub feature_usage: Option<Vec<String>>,
    pub churn_risk: Option<String>,
    pub upsell_potential: Option<String>,
}

impl CustomerRecord {
    pub fn into_profile(self, id: CustomerId) -> CustomerProfile {
        let name = self.name.unwrap_or_else(|| id.0.clone());
        let email = self.email.unwrap_or_else(|| format!("{}@example.com", id.0));

        CustomerProfile {
            name,
            email,
            company: self.company.unwrap_or_else(|| DEFAULT_COMPANY.to_owned()),
            plan: self.plan.as_deref().map(PlanTier::parse_lenient).unwrap_or_default(),
            subscription_value: self
                .subscription_value
                .unwrap_or_else(default_subscription_value),
            monthly_usage: self.monthly_usage.unwrap_or(DEFAULT_MONTHLY_USAGE),
            months_subscribed: self.months_subscribed.unwrap_or(DEFAULT_MONTHS_SUBSCRIBED),
            payment_issues: self.payment_issues.unwrap_or(DEFAULT_PAYMENT_ISSUES),
            support_tickets: self.support_tickets.unwrap_or(DEFAULT_SUPPORT_TICKETS),
            feature_usage: self.feature_usage.unwrap_or_else(|| {
                DEFAULT_FEATURE_USAGE.iter().map(|feature| (*feature).to_owned()).collect()
            }),
            churn_risk: parse_risk(self.churn_risk.as_deref(), RiskLevel::Low),
            upsell_potential: parse_risk(self.upsell_potential.as_deref(), RiskLevel::Medium),
            id,
        }
    }
}

fn parse_risk(value: Option<&str>, default: RiskLevel) -> RiskLevel {
    value.and_then(|value| value.parse().ok()).unwrap_or(default)
}
