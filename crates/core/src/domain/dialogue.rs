use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::plan::PlanComparison;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    Cancel,
    PricingConfusion,
    FeatureRelevance,
    DiscountRequest,
    Escalation,
    GeneralInquiry,
}

impl Intent {
    pub const ALL: [Intent; 7] = [
        Intent::Greeting,
        Intent::Cancel,
        Intent::PricingConfusion,
        Intent::FeatureRelevance,
        Intent::DiscountRequest,
        Intent::Escalation,
        Intent::GeneralInquiry,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::Cancel => "cancel",
            Self::PricingConfusion => "pricing_confusion",
            Self::FeatureRelevance => "feature_relevance",
            Self::DiscountRequest => "discount_request",
            Self::Escalation => "escalation",
            Self::GeneralInquiry => "general_inquiry",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Neutral,
    Retention,
    Upsell,
    Escalate,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Retention => "retention",
            Self::Upsell => "upsell",
            Self::Escalate => "escalate",
        }
    }

    pub fn churn_risk_reduction(self) -> &'static str {
        if self == Self::Retention {
            "35%"
        } else {
            "0%"
        }
    }

    pub fn upsell_boost(self) -> &'static str {
        if self == Self::Upsell {
            "20%"
        } else {
            "0%"
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured reply produced for one classified message.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DialogueResponse {
    pub response: String,
    pub action: Action,
    pub confidence: f64,
    #[serde(rename = "suggestedOffer")]
    pub suggested_offer: Option<String>,
    pub tools_used: Vec<String>,
    pub options: Vec<String>,
    pub latency_ms: f64,
    pub churn_risk_reduction: String,
    pub upsell_boost: String,
    pub plan_comparison: PlanComparison,
}

/// A dialogue response together with the intent it was generated for.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassifiedResponse {
    pub intent: Intent,
    pub response: DialogueResponse,
}

/// Canned reply for interactions outside the intent cascade (offer answers, escalation tickets).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScriptedReply {
    pub response: String,
    pub action: String,
    pub confidence: f64,
    #[serde(rename = "suggestedOffer")]
    pub suggested_offer: Option<String>,
    pub tools_used: Vec<String>,
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_summary: Option<String>,
}
