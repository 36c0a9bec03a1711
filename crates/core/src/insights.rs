//! Heuristic churn and upsell assessment derived from a customer's usage history.

use serde::Serialize;

use crate::domain::customer::{CustomerProfile, RiskLevel};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RetentionStrategy {
    Standard,
    Moderate,
    Aggressive,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProfileAnalysis {
    pub churn_risk: RiskLevel,
    pub upsell_potential: RiskLevel,
    pub usage_level: RiskLevel,
    pub satisfaction_indicators: Vec<String>,
    pub retention_strategy: RetentionStrategy,
}

pub fn analyze_profile(profile: &CustomerProfile) -> ProfileAnalysis {
    let (usage_level, upsell_potential) = if profile.monthly_usage > 80.0 {
        (RiskLevel::High, RiskLevel::High)
    } else if profile.monthly_usage > 40.0 {
        (RiskLevel::Medium, RiskLevel::Medium)
    } else {
        (RiskLevel::Low, RiskLevel::Low)
    };

    let (mut churn_risk, retention_strategy) = if profile.months_subscribed < 3 {
        (RiskLevel::High, RetentionStrategy::Aggressive)
    } else if profile.months_subscribed < 12 {
        (RiskLevel::Medium, RetentionStrategy::Moderate)
    } else {
        (RiskLevel::Low, RetentionStrategy::Standard)
    };

    let mut satisfaction_indicators = Vec::new();

    if profile.payment_issues > 0 {
        churn_risk = RiskLevel::High;
        satisfaction_indicators.push("payment_issues".to_owned());
    }

    if profile.support_tickets > 5 {
        churn_risk = RiskLevel::High;
        satisfaction_indicators.push("high_support_volume".to_owned());
    } else if profile.support_tickets > 2 {
        churn_risk = RiskLevel::Medium;
    }

    ProfileAnalysis {
        churn_risk,
        upsell_potential,
        usage_level,
        satisfaction_indicators,
        retention_strategy,
    }
}

#[cfg(test)]
mod tests {
    use super::{analyze_profile, RetentionStrategy};
    use crate::domain::customer::{CustomerId, CustomerProfile, RiskLevel};

    fn base() -> CustomerProfile {
        let mut profile = CustomerProfile::fallback(CustomerId("user_001".to_owned()));
        profile.months_subscribed = 24;
        profile.support_tickets = 0;
        profile
    }

    #[test]
    fn long_tenured_quiet_customer_is_low_risk() {
        let analysis = analyze_profile(&base());

        assert_eq!(analysis.churn_risk, RiskLevel::Low);
        assert_eq!(analysis.retention_strategy, RetentionStrategy::Standard);
        assert_eq!(analysis.usage_level, RiskLevel::Medium);
        assert!(analysis.satisfaction_indicators.is_empty());
    }

    #[test]
    fn heavy_usage_signals_upsell_potential() {
        let mut profile = base();
        profile.monthly_usage = 92.0;

        let analysis = analyze_profile(&profile);
        assert_eq!(analysis.usage_level, RiskLevel::High);
        assert_eq!(analysis.upsell_potential, RiskLevel::High);

        profile.monthly_usage = 40.0;
        assert_eq!(analyze_profile(&profile).upsell_potential, RiskLevel::Low);
    }

    #[test]
    fn new_customers_get_aggressive_retention() {
        let mut profile = base();
        profile.months_subscribed = 2;

        let analysis = analyze_profile(&profile);
        assert_eq!(analysis.churn_risk, RiskLevel::High);
        assert_eq!(analysis.retention_strategy, RetentionStrategy::Aggressive);
    }

    #[test]
    fn payment_issues_and_ticket_volume_raise_churn_risk() {
        let mut profile = base();
        profile.payment_issues = 1;
        profile.support_tickets = 6;

        let analysis = analyze_profile(&profile);
        assert_eq!(analysis.churn_risk, RiskLevel::High);
        assert_eq!(analysis.satisfaction_indicators, vec!["payment_issues", "high_support_volume"]);
    }

    #[test]
    fn moderate_ticket_volume_sets_medium_risk() {
        let mut profile = base();
        profile.support_tickets = 3;

        assert_eq!(analyze_profile(&profile).churn_risk, RiskLevel::Medium);
    }
}
