use std::collections::BTreeSet;

use crate::domain::conversation::ConversationTurn;
use crate::domain::dialogue::{Action, ScriptedReply};

pub const OFFER_RESPONSE_ACTION: &str = "offer_response";

const OFFER_FOLLOW_UP_OPTIONS: [&str; 4] =
    ["Show me other options", "I want to cancel", "Talk to a human", "That's all for now"];

const ESCALATION_OPTIONS: [&str; 4] = [
    "Schedule a call for later",
    "Send me an email instead",
    "I'll wait for the call",
    "Cancel the request",
];

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

/// Reply to a customer accepting or declining a previously shown offer.
pub fn offer_reply(offer_type: &str, accepted: bool) -> ScriptedReply {
    let response = if accepted {
        format!(
            "Great! I've applied the {offer_type} to your account. You should see the changes \
             reflected in your next billing cycle."
        )
    } else {
        format!(
            "I understand you'd like to decline the {offer_type}. Is there anything else I can \
             help you with?"
        )
    };

    ScriptedReply {
        response,
        action: OFFER_RESPONSE_ACTION.to_owned(),
        confidence: 0.9,
        suggested_offer: None,
        tools_used: owned(&["OfferHandler"]),
        options: owned(&OFFER_FOLLOW_UP_OPTIONS),
        ticket_number: None,
        conversation_summary: None,
    }
}

pub fn escalation_reply(ticket_number: &str, conversation_summary: String) -> ScriptedReply {
    ScriptedReply {
        response: format!(
            "I've escalated your case to our human support team. Your ticket number is \
             {ticket_number}. A specialist will contact you within 15 minutes."
        ),
        action: Action::Escalate.as_str().to_owned(),
        confidence: 0.95,
        suggested_offer: None,
        tools_used: owned(&["EscalationHandler"]),
        options: owned(&ESCALATION_OPTIONS),
        ticket_number: Some(ticket_number.to_owned()),
        conversation_summary: Some(conversation_summary),
    }
}

/// Condenses a conversation into the hand-off note attached to escalation tickets.
pub fn summarize_conversation(turns: &[ConversationTurn]) -> String {
    let Some(first) = turns.first() else {
        return "No conversation history available.".to_owned();
    };

    let mut topics = BTreeSet::new();
    let mut concerns = BTreeSet::new();
    let mut actions = BTreeSet::new();

    for turn in turns {
        if !turn.action.is_empty() {
            actions.insert(turn.action.as_str());
        }

        let message = turn.user_message.to_lowercase();
        if message.contains("cancel") {
            concerns.insert("cancellation request");
        }
        if message.contains("expensive") || message.contains("price") {
            concerns.insert("pricing concerns");
        }
        if message.contains("feature") {
            topics.insert("feature inquiry");
        }
        if message.contains("support") || message.contains("help") {
            topics.insert("support request");
        }
    }

    let mut parts = vec![
        format!("Conversation started at {}", first.timestamp.to_rfc3339()),
        format!("Total messages: {}", turns.len()),
    ];

    if !topics.is_empty() {
        parts.push(format!("Topics discussed: {}", join(&topics)));
    }
    if !concerns.is_empty() {
        parts.push(format!("Customer concerns: {}", join(&concerns)));
    }
    if !actions.is_empty() {
        parts.push(format!("Agent actions taken: {}", join(&actions)));
    }

    parts.join(" | ")
}

fn join(values: &BTreeSet<&str>) -> String {
    values.iter().copied().collect::<Vec<_>>().join(", ")
}
