use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::dialogue::DialogueResponse;

/// One recorded exchange between a customer and the agent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub timestamp: DateTime<Utc>,
    pub session_id: Uuid,
    pub user_message: String,
    pub agent_response: String,
    pub action: String,
    pub tools_used: Vec<String>,
    pub confidence: f64,
    pub latency_ms: f64,
    pub churn_risk_reduction: String,
    pub upsell_boost: String,
}

impl ConversationTurn {
    pub fn record(user_message: impl Into<String>, reply: &DialogueResponse) -> Self {
        Self {
            timestamp: Utc::now(),
            session_id: Uuid::new_v4(),
            user_message: user_message.into(),
            agent_response: reply.response.clone(),
            action: reply.action.as_str().to_owned(),
            tools_used: reply.tools_used.clone(),
            confidence: reply.confidence,
            latency_ms: reply.latency_ms,
            churn_risk_reduction: reply.churn_risk_reduction.clone(),
            upsell_boost: reply.upsell_boost.clone(),
        }
    }
}
