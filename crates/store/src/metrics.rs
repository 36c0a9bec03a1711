use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;

use retention_core::domain::dialogue::{Action, DialogueResponse};

/// Confidence a retention or upsell reply must exceed to count as an offer shown.
pub const OFFER_CONFIDENCE_THRESHOLD: f64 = 0.7;

pub const FIRST_TICKET_NUMBER: u64 = 1001;

/// Process-wide conversation counters. Latency is accumulated in microseconds.
#[derive(Debug, Default)]
pub struct ConversationMetrics {
    total_conversations: AtomicU64,
    churn_prevented: AtomicU64,
    upsells_completed: AtomicU64,
    offers_shown: AtomicU64,
    offers_accepted: AtomicU64,
    escalations: AtomicU64,
    tickets_generated: AtomicU64,
    latency_micros: AtomicU64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub total_conversations: u64,
    pub churn_prevented: u64,
    pub upsells_completed: u64,
    pub avg_latency_ms: f64,
    pub offers_shown: u64,
    pub offers_accepted: u64,
    pub escalations: u64,
    pub tickets_generated: u64,
    pub churn_risk_reduction: &'static str,
    pub upsell_boost: &'static str,
    pub demo_mode: bool,
    pub timestamp: DateTime<Utc>,
}

impl ConversationMetrics {
    pub fn record_chat(&self, reply: &DialogueResponse) {
        self.total_conversations.fetch_add(1, Ordering::Relaxed);
        let latency_micros = (reply.latency_ms.max(0.0) * 1000.0).round() as u64;
        self.latency_micros.fetch_add(latency_micros, Ordering::Relaxed);

        let confident = reply.confidence > OFFER_CONFIDENCE_THRESHOLD;
        match reply.action {
            Action::Retention if confident => {
                self.churn_prevented.fetch_add(1, Ordering::Relaxed);
                self.offers_shown.fetch_add(1, Ordering::Relaxed);
            }
            Action::Upsell if confident => {
                self.upsells_completed.fetch_add(1, Ordering::Relaxed);
                self.offers_shown.fetch_add(1, Ordering::Relaxed);
            }
            Action::Escalate => {
                self.escalations.fetch_add(1, Ordering::Relaxed);
            }
            _ => {}
        }
    }

    pub fn record_offer_response(&self, accepted: bool) {
        if accepted {
            self.offers_accepted.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_escalation(&self) {
        self.escalations.fetch_add(1, Ordering::Relaxed);
        self.tickets_generated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let total_conversations = self.total_conversations.load(Ordering::Relaxed);
        let latency_micros = self.latency_micros.load(Ordering::Relaxed);
        let avg_latency_ms = if total_conversations == 0 {
            0.0
        } else {
            let mean_ms = latency_micros as f64 / 1000.0 / total_conversations as f64;
            (mean_ms * 100.0).round() / 100.0
        };

        MetricsSnapshot {
            total_conversations,
            churn_prevented: self.churn_prevented.load(Ordering::Relaxed),
            upsells_completed: self.upsells_completed.load(Ordering::Relaxed),
            avg_latency_ms,
            offers_shown: self.offers_shown.load(Ordering::Relaxed),
            offers_accepted: self.offers_accepted.load(Ordering::Relaxed),
            escalations: self.escalations.load(Ordering::Relaxed),
            tickets_generated: self.tickets_generated.load(Ordering::Relaxed),
            churn_risk_reduction: Action::Retention.churn_risk_reduction(),
            upsell_boost: Action::Upsell.upsell_boost(),
            demo_mode: true,
            timestamp: Utc::now(),
        }
    }
}

/// Hands out `TKT-1001`, `TKT-1002`, ... in issue order.
#[derive(Debug)]
pub struct TicketSequence {
    next: AtomicU64,
}

impl Default for TicketSequence {
    fn default() -> Self {
        Self { next: AtomicU64::new(FIRST_TICKET_NUMBER) }
    }
}

impl TicketSequence {
    pub fn next_ticket(&self) -> String {
        let number = self.next.fetch_add(1, Ordering::Relaxed);
        format!("TKT-{number}")
    }
}
