pub mod catalog;
pub mod comparator;
pub mod intent;
pub mod latency;
pub mod policy;
pub mod templates;

use tracing::debug;

use crate::domain::customer::CustomerProfile;
use crate::domain::dialogue::ClassifiedResponse;

use self::{
    intent::{IntentClassifier, KeywordIntentClassifier},
    policy::{DialoguePolicy, TemplateDialoguePolicy},
};

/// Classifies one message and answers it.
pub trait DialogueEngine: Send + Sync {
    fn handle(&self, profile: &CustomerProfile, message: &str) -> ClassifiedResponse;
}

pub struct DeterministicDialogueEngine<K, P> {
    classifier: K,
    policy: P,
}

impl<K, P> DeterministicDialogueEngine<K, P> {
    pub fn new(classifier: K, policy: P) -> Self {
        Self { classifier, policy }
    }
}

pub type DefaultDialogueEngine =
    DeterministicDialogueEngine<KeywordIntentClassifier, TemplateDialoguePolicy>;

impl Default for DefaultDialogueEngine {
    fn default() -> Self {
        Self::new(KeywordIntentClassifier, TemplateDialoguePolicy::default())
    }
}

impl<K, P> DialogueEngine for DeterministicDialogueEngine<K, P>
where
    K: IntentClassifier,
    P: DialoguePolicy,
{
    fn handle(&self, profile: &CustomerProfile, message: &str) -> ClassifiedResponse {
        let intent = self.classifier.classify(message);
        let response = self.policy.respond(intent, profile);

        debug!(
            event_name = "engine.dialogue.responded",
            customer_id = %profile.id,
            intent = intent.as_str(),
            action = response.action.as_str(),
            "dialogue response composed"
        );

        ClassifiedResponse { intent, response }
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::customer::{CustomerId, CustomerProfile};
    use crate::domain::dialogue::{Action, DialogueResponse, Intent};
    use crate::engine::{
        catalog::PlanCatalog,
        intent::{IntentClassifier, KeywordIntentClassifier},
        latency::FixedLatency,
        policy::{DialoguePolicy, TemplateDialoguePolicy},
        DefaultDialogueEngine, DeterministicDialogueEngine, DialogueEngine,
    };

    fn customer() -> CustomerProfile {
        CustomerProfile::fallback(CustomerId("user_001".to_owned()))
    }

    #[test]
    fn default_engine_routes_messages_through_the_cascade() {
        let engine = DefaultDialogueEngine::default();

        let outcome = engine.handle(&customer(), "I want to cancel, it's too expensive");
        assert_eq!(outcome.intent, Intent::Cancel);
        assert_eq!(outcome.response.action, Action::Retention);

        let outcome = engine.handle(&customer(), "What does the Professional plan cost?");
        assert_eq!(outcome.intent, Intent::PricingConfusion);
        assert_eq!(outcome.response.plan_comparison.suggested_plan.name, "Professional Plan");
    }

    #[test]
    fn engine_supports_injected_components() {
        struct AlwaysEscalate;

        impl IntentClassifier for AlwaysEscalate {
            fn classify(&self, _message: &str) -> Intent {
                Intent::Escalation
            }
        }

        let engine = DeterministicDialogueEngine::new(
            AlwaysEscalate,
            TemplateDialoguePolicy::new(PlanCatalog::default(), FixedLatency(1.0)),
        );

        let outcome = engine.handle(&customer(), "hello");
        assert_eq!(outcome.intent, Intent::Escalation);
        assert_eq!(outcome.response.confidence, 0.95);
        assert_eq!(outcome.response.latency_ms, 1.0);
    }

    #[test]
    fn engine_passes_the_classified_intent_to_the_policy() {
        struct EchoPolicy;

        impl DialoguePolicy for EchoPolicy {
            fn respond(&self, intent: Intent, profile: &CustomerProfile) -> DialogueResponse {
                let fallback = TemplateDialoguePolicy::new(PlanCatalog::default(), FixedLatency(0.0));
                let mut reply = fallback.respond(Intent::GeneralInquiry, profile);
                reply.response = intent.as_str().to_owned();
                reply
            }
        }

        let engine = DeterministicDialogueEngine::new(KeywordIntentClassifier, EchoPolicy);

        assert_eq!(engine.handle(&customer(), "any deal?").response.response, "discount_request");
    }
}
