use std::time::Instant;

use crate::domain::customer::CustomerProfile;
use crate::domain::dialogue::{DialogueResponse, Intent};
use crate::engine::catalog::{PlanCatalog, PlanCatalogProvider};
use crate::engine::comparator::compare;
use crate::engine::latency::{LatencySource, SyntheticLatency};
use crate::engine::templates::{template_for, RenderContext};

pub const TOOLS_USED: [&str; 2] = ["IntentDetection", "CustomerLookup"];

pub trait DialoguePolicy: Send + Sync {
    fn respond(&self, intent: Intent, profile: &CustomerProfile) -> DialogueResponse;
}

/// Renders the fixed response template for each intent against the caller's profile.
#[derive(Clone, Debug)]
pub struct TemplateDialoguePolicy<C = PlanCatalog, L = SyntheticLatency> {
    catalog: C,
    latency: L,
}

impl<C, L> TemplateDialoguePolicy<C, L> {
    pub fn new(catalog: C, latency: L) -> Self {
        Self { catalog, latency }
    }
}

impl Default for TemplateDialoguePolicy {
    fn default() -> Self {
        Self::new(PlanCatalog::default(), SyntheticLatency)
    }
}

impl<C, L> DialoguePolicy for TemplateDialoguePolicy<C, L>
where
    C: PlanCatalogProvider,
    L: LatencySource,
{
    fn respond(&self, intent: Intent, profile: &CustomerProfile) -> DialogueResponse {
        let started = Instant::now();
        let template = template_for(intent);

        let plan_comparison = compare(&self.catalog, profile.plan, template.action);
        let context = RenderContext {
            profile,
            current_plan: self.catalog.plan(profile.plan),
            upgrade_plan: self.catalog.plan(profile.plan.next()),
        };
        let response = template.text.render(&context);

        DialogueResponse {
            response,
            action: template.action,
            confidence: template.confidence,
            suggested_offer: template.offer.map(str::to_owned),
            tools_used: TOOLS_USED.iter().map(|tool| (*tool).to_owned()).collect(),
            options: template.options.iter().map(|option| (*option).to_owned()).collect(),
            latency_ms: self.latency.latency_ms(started.elapsed()),
            churn_risk_reduction: template.action.churn_risk_reduction().to_owned(),
            upsell_boost: template.action.upsell_boost().to_owned(),
            plan_comparison,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{DialoguePolicy, TemplateDialoguePolicy};
    use crate::domain::customer::{CustomerId, CustomerProfile, RiskLevel};
    use crate::domain::dialogue::{Action, Intent};
    use crate::domain::plan::PlanTier;
    use crate::engine::catalog::PlanCatalog;
    use crate::engine::latency::{FixedLatency, SyntheticLatency};

    fn policy() -> TemplateDialoguePolicy<PlanCatalog, FixedLatency> {
        TemplateDialoguePolicy::new(PlanCatalog::default(), FixedLatency(75.0))
    }

    fn profile() -> CustomerProfile {
        CustomerProfile::fallback(CustomerId("user_001".to_owned()))
    }

    #[test]
    fn discount_request_quotes_the_discounted_price() {
        let reply = policy().respond(Intent::DiscountRequest, &profile());

        assert!(reply.response.contains("24.65"), "{}", reply.response);
        assert!(reply.response.contains("Basic Plan"));
        assert_eq!(reply.action, Action::Retention);
        assert_eq!(reply.confidence, 0.8);
        assert_eq!(reply.suggested_offer.as_deref(), Some("15% discount for 3 months"));
        assert_eq!(reply.churn_risk_reduction, "35%");
        assert_eq!(reply.upsell_boost, "0%");
    }

    #[test]
    fn discount_follows_the_profile_price() {
        let mut customer = profile();
        customer.plan = PlanTier::Professional;
        customer.subscription_value = Decimal::new(79, 0);

        let reply = policy().respond(Intent::DiscountRequest, &customer);

        assert!(reply.response.contains("$67.15/month"), "{}", reply.response);
        assert!(reply.response.contains("Professional Plan"));
    }

    #[test]
    fn pricing_confusion_names_current_plan_and_upgrade_target() {
        let reply = policy().respond(Intent::PricingConfusion, &profile());

        assert!(reply.response.contains("Basic Plan at $29/month"), "{}", reply.response);
        assert!(reply.response.contains("Professional Plan at $79/month"));
        assert_eq!(reply.action, Action::Upsell);
        assert_eq!(reply.upsell_boost, "20%");
        assert_eq!(reply.plan_comparison.suggested_plan.name, "Professional Plan");
        assert_eq!(reply.plan_comparison.current_plan.name, "Basic Plan");
    }

    #[test]
    fn pricing_confusion_for_premium_holds_at_the_ceiling() {
        let mut customer = profile();
        customer.plan = PlanTier::Premium;
        customer.subscription_value = Decimal::new(199, 0);

        let reply = policy().respond(Intent::PricingConfusion, &customer);

        assert_eq!(reply.plan_comparison.suggested_plan.name, "Premium Plan");
        assert!(reply.response.contains("Premium Plan at $199/month"));
        assert_eq!(reply.response.matches("Premium Plan").count(), 1, "{}", reply.response);
        assert!(!reply.response.contains("more value per dollar"));
        assert!(reply.response.ends_with("break down the cost-benefit analysis?"));
    }

    #[test]
    fn escalation_is_fixed_regardless_of_profile() {
        let mut risky = profile();
        risky.churn_risk = RiskLevel::High;
        risky.payment_issues = 7;
        risky.plan = PlanTier::Premium;

        for customer in [profile(), risky] {
            let reply = policy().respond(Intent::Escalation, &customer);
            assert_eq!(reply.action, Action::Escalate);
            assert_eq!(reply.confidence, 0.95);
            assert!(reply.response.contains("within 15 minutes"));
            assert_eq!(reply.plan_comparison.current_plan, reply.plan_comparison.suggested_plan);
        }
    }

    #[test]
    fn every_intent_offers_four_options_and_standard_tools() {
        for intent in Intent::ALL {
            let reply = policy().respond(intent, &profile());
            assert_eq!(reply.options.len(), 4, "{intent}");
            assert_eq!(reply.tools_used, vec!["IntentDetection", "CustomerLookup"]);
            assert_eq!(reply.latency_ms, 75.0);
        }
    }

    #[test]
    fn greeting_and_general_inquiry_carry_no_offer() {
        assert_eq!(policy().respond(Intent::Greeting, &profile()).suggested_offer, None);
        assert_eq!(policy().respond(Intent::GeneralInquiry, &profile()).suggested_offer, None);
    }

    #[test]
    fn responses_are_deterministic_apart_from_latency() {
        let policy = TemplateDialoguePolicy::new(PlanCatalog::default(), SyntheticLatency);
        let customer = profile();

        for intent in Intent::ALL {
            let first = policy.respond(intent, &customer);
            let second = policy.respond(intent, &customer);

            assert_eq!(first.response, second.response);
            assert_eq!(first.action, second.action);
            assert_eq!(first.confidence, second.confidence);
            assert_eq!(first.suggested_offer, second.suggested_offer);
            assert_eq!(first.plan_comparison, second.plan_comparison);
            assert!((50.0..150.0).contains(&first.latency_ms));
        }
    }
}
