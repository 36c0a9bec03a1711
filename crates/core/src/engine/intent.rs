use crate::domain::dialogue::Intent;

/// A keyword-containment rule; the first rule with any matching keyword decides the intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeywordRule {
    pub intent: Intent,
    pub keywords: &'static [&'static str],
}

/// Rule cascade in priority order. A message that mentions both cancelling and price is a
/// cancellation, so ordering here is part of the contract.
pub const INTENT_RULES: &[KeywordRule] = &[
    KeywordRule { intent: Intent::Cancel, keywords: &["cancel", "unsubscribe", "quit"] },
    KeywordRule { intent: Intent::PricingConfusion, keywords: &["expensive", "price", "cost"] },
    KeywordRule { intent: Intent::FeatureRelevance, keywords: &["feature", "upgrade", "more"] },
    KeywordRule { intent: Intent::DiscountRequest, keywords: &["discount", "cheaper", "deal"] },
    KeywordRule { intent: Intent::Escalation, keywords: &["human", "support", "help"] },
    KeywordRule { intent: Intent::Greeting, keywords: &["hello", "hi", "hey"] },
];

pub trait IntentClassifier: Send + Sync {
    fn classify(&self, message: &str) -> Intent;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct KeywordIntentClassifier;

impl IntentClassifier for KeywordIntentClassifier {
    fn classify(&self, message: &str) -> Intent {
        classify(message)
    }
}

pub fn classify(message: &str) -> Intent {
    classify_with_rules(INTENT_RULES, message)
}

pub fn classify_with_rules(rules: &[KeywordRule], message: &str) -> Intent {
    let normalized = message.to_lowercase();

    rules
        .iter()
        .find(|rule| rule.keywords.iter().any(|keyword| normalized.contains(keyword)))
        .map(|rule| rule.intent)
        .unwrap_or(Intent::GeneralInquiry)
}

#[cfg(test)]
mod tests {
    use super::{classify, classify_with_rules, IntentClassifier, KeywordIntentClassifier, KeywordRule};
    use crate::domain::dialogue::Intent;

    #[test]
    fn each_rule_maps_its_keywords() {
        let cases = [
            ("I want to cancel my subscription", Intent::Cancel),
            ("how do I unsubscribe", Intent::Cancel),
            ("I quit", Intent::Cancel),
            ("this is too expensive", Intent::PricingConfusion),
            ("what does it cost", Intent::PricingConfusion),
            ("I need a new feature", Intent::FeatureRelevance),
            ("can I upgrade", Intent::FeatureRelevance),
            ("got a discount?", Intent::DiscountRequest),
            ("anything cheaper", Intent::DiscountRequest),
            ("I need a human", Intent::Escalation),
            ("contact support", Intent::Escalation),
            ("hello", Intent::Greeting),
            ("hey", Intent::Greeting),
        ];

        for (message, expected) in cases {
            assert_eq!(classify(message), expected, "message: {message}");
        }
    }

    #[test]
    fn cancellation_outranks_pricing_when_both_appear() {
        assert_eq!(classify("cancel because it's expensive"), Intent::Cancel);
        assert_eq!(classify("the price makes me want to quit"), Intent::Cancel);
    }

    #[test]
    fn earlier_rules_win_across_the_whole_cascade() {
        assert_eq!(classify("the price of an upgrade"), Intent::PricingConfusion);
        assert_eq!(classify("upgrade deal"), Intent::FeatureRelevance);
        assert_eq!(classify("a deal or a human"), Intent::DiscountRequest);
        assert_eq!(classify("hello, I need help"), Intent::Escalation);
    }

    #[test]
    fn classification_ignores_case() {
        assert_eq!(classify("HELLO"), classify("hello"));
        assert_eq!(classify("CANCEL NOW"), Intent::Cancel);
    }

    #[test]
    fn keyword_free_and_empty_messages_are_general_inquiries() {
        assert_eq!(classify(""), Intent::GeneralInquiry);
        assert_eq!(classify("Tell me about billing"), Intent::GeneralInquiry);
    }

    #[test]
    fn matching_is_plain_substring_containment() {
        assert_eq!(classify("is this right"), Intent::Greeting);
        assert_eq!(classify("an ideal setup"), Intent::DiscountRequest);
    }

    #[test]
    fn custom_rule_tables_can_be_supplied() {
        let rules = [KeywordRule { intent: Intent::Escalation, keywords: &["manager"] }];

        assert_eq!(classify_with_rules(&rules, "get me a Manager"), Intent::Escalation);
        assert_eq!(classify_with_rules(&rules, "cancel"), Intent::GeneralInquiry);
        assert_eq!(KeywordIntentClassifier.classify("cancel"), Intent::Cancel);
    }
}
