use rust_decimal::Decimal;

use crate::domain::customer::CustomerProfile;
use crate::domain::dialogue::{Action, Intent};
use crate::domain::plan::Plan;

/// Price multiplier behind the "15% discount for 3 months" retention offer.
pub const RETENTION_DISCOUNT_FACTOR: Decimal = Decimal::from_parts(85, 0, 0, false, 2);

/// Values a template may interpolate.
#[derive(Clone, Copy, Debug)]
pub struct RenderContext<'a> {
    pub profile: &'a CustomerProfile,
    pub current_plan: &'a Plan,
    pub upgrade_plan: &'a Plan,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemplateText {
    Static(&'static str),
    /// Names the current plan and price, then pitches the next tier up unless the customer
    /// already holds the top tier.
    PricingBreakdown,
    /// Quotes the discounted monthly price for the current plan.
    DiscountQuote,
}

impl TemplateText {
    pub fn render(&self, context: &RenderContext<'_>) -> String {
        match self {
            Self::Static(text) => (*text).to_owned(),
            Self::PricingBreakdown => {
                let mut text = format!(
                    "I understand your concerns about pricing. You're currently on our {} at \
                     ${}/month. ",
                    context.current_plan.name,
                    display_price(context.profile.subscription_value),
                );
                if context.profile.plan.next() == context.profile.plan {
                    text.push_str(
                        "Let me walk you through the value you're getting from every feature it \
                         includes. ",
                    );
                } else {
                    text.push_str(&format!(
                        "Let me show you the value you're getting and compare it with our other \
                         options. Our {} at ${}/month offers much more value per dollar with \
                         advanced features. ",
                        context.upgrade_plan.name,
                        display_price(context.upgrade_plan.price),
                    ));
                }
                text.push_str("Would you like me to break down the cost-benefit analysis?");
                text
            }
            Self::DiscountQuote => format!(
                "I understand you're looking for a better deal. Based on your usage patterns and \
                 loyalty, I can offer you a 15% discount for the next 3 months. This would bring \
                 your {} down to ${:.2}/month. Would you like to take advantage of this offer?",
                context.current_plan.name,
                discounted_price(context.profile.subscription_value),
            ),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResponseTemplate {
    pub intent: Intent,
    pub action: Action,
    pub confidence: f64,
    pub offer: Option<&'static str>,
    pub text: TemplateText,
    pub options: [&'static str; 4],
}

pub const RESPONSE_TEMPLATES: [ResponseTemplate; 7] = [
    ResponseTemplate {
        intent: Intent::Greeting,
        action: Action::Neutral,
        confidence: 0.8,
        offer: None,
        text: TemplateText::Static(
            "Hello! I'm your AI assistant for customer retention and upsell. I can help you with \
             subscription management, feature recommendations, pricing questions, and more. How \
             can I assist you today?",
        ),
        options: [
            "I want to cancel my subscription",
            "The price is too expensive",
            "I need more features",
            "I'm having technical issues",
        ],
    },
    ResponseTemplate {
        intent: Intent::Cancel,
        action: Action::Retention,
        confidence: 0.7,
        offer: Some("Account optimization consultation"),
        text: TemplateText::Static(
            "I'm sorry to hear you're considering canceling. Could you help me understand what's \
             not working for you? I'd like to see if we can find a solution that better meets \
             your needs.",
        ),
        options: [
            "It's too expensive",
            "I'm not using the features",
            "I found a better alternative",
            "I'm having technical issues",
        ],
    },
    ResponseTemplate {
        intent: Intent::PricingConfusion,
        action: Action::Upsell,
        confidence: 0.8,
        offer: Some("Professional plan upgrade with cost analysis"),
        text: TemplateText::PricingBreakdown,
        options: [
            "Yes, show me the cost analysis",
            "What's included in Professional?",
            "Do you have any discounts?",
            "I want to downgrade instead",
        ],
    },
    ResponseTemplate {
        intent: Intent::FeatureRelevance,
        action: Action::Neutral,
        confidence: 0.7,
        offer: Some("Feature consultation"),
        text: TemplateText::Static(
            "I'd be happy to help you find the right features! Let me understand your specific \
             needs better. What functionality are you looking for, and how do you plan to use it?",
        ),
        options: ["Email automation", "Analytics & reporting", "API access", "Team collaboration"],
    },
    ResponseTemplate {
        intent: Intent::DiscountRequest,
        action: Action::Retention,
        confidence: 0.8,
        offer: Some("15% discount for 3 months"),
        text: TemplateText::DiscountQuote,
        options: [
            "Yes, I'll take the discount",
            "Can you do better?",
            "I want to upgrade instead",
            "No thanks",
        ],
    },
    ResponseTemplate {
        intent: Intent::Escalation,
        action: Action::Escalate,
        confidence: 0.95,
        offer: Some("Human representative connection"),
        text: TemplateText::Static(
            "I understand you'd like to speak with a human representative. I'll connect you with \
             our customer success team right away. They'll have access to your full account \
             history and can provide personalized assistance. You should receive a call within \
             15 minutes.",
        ),
        options: [
            "Schedule a call for later",
            "Send me an email instead",
            "I'll wait for the call",
            "Cancel the request",
        ],
    },
    ResponseTemplate {
        intent: Intent::GeneralInquiry,
        action: Action::Neutral,
        confidence: 0.6,
        offer: None,
        text: TemplateText::Static(
            "I'm here to help! Could you tell me more about what you're looking for? I can assist \
             with subscription management, feature recommendations, pricing questions, or connect \
             you with our support team.",
        ),
        options: [
            "Show me my plan",
            "What features do I have?",
            "How can I upgrade?",
            "Talk to a human",
        ],
    },
];

/// Looks up the template for an intent. The table covers every intent; general inquiry
/// is the fallback should that ever stop holding.
pub fn template_for(intent: Intent) -> &'static ResponseTemplate {
    let fallback = &RESPONSE_TEMPLATES[RESPONSE_TEMPLATES.len() - 1];
    RESPONSE_TEMPLATES.iter().find(|template| template.intent == intent).unwrap_or(fallback)
}

pub fn discounted_price(price: Decimal) -> Decimal {
    (price * RETENTION_DISCOUNT_FACTOR).round_dp(2)
}

/// Whole amounts render without decimals ("29"), fractional ones with two ("29.50").
pub fn display_price(price: Decimal) -> String {
    if price.fract().is_zero() {
        price.trunc().normalize().to_string()
    } else {
        format!("{:.2}", price.round_dp(2))
    }
}
