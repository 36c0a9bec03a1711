use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Subscription tiers in upgrade order.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PlanTier {
    #[default]
    Basic,
    Professional,
    Premium,
}

impl PlanTier {
    pub const ALL: [PlanTier; 3] = [PlanTier::Basic, PlanTier::Professional, PlanTier::Premium];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Professional => "professional",
            Self::Premium => "premium",
        }
    }

    /// The tier directly above this one. Premium is the ceiling and maps to itself.
    pub fn next(self) -> Self {
        match self {
            Self::Basic => Self::Professional,
            Self::Professional | Self::Premium => Self::Premium,
        }
    }

    /// Parses a tier name, degrading to basic for anything unrecognized.
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanTier {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "professional" => Ok(Self::Professional),
            "premium" => Ok(Self::Premium),
            other => {
                Err(DomainError::UnknownVariant { kind: "plan tier", value: other.to_owned() })
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub features: Vec<String>,
}

impl Plan {
    pub fn new(name: impl Into<String>, price: Decimal, features: &[&str]) -> Self {
        Self {
            name: name.into(),
            price,
            features: features.iter().map(|feature| (*feature).to_owned()).collect(),
        }
    }
}

/// Current-vs-suggested plan pair attached to every dialogue response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlanComparison {
    pub current_plan: Plan,
    pub suggested_plan: Plan,
    pub action: crate::domain::dialogue::Action,
}
