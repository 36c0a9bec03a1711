use std::collections::BTreeMap;
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::plan::{Plan, PlanTier};
use crate::errors::DomainError;

/// Read access to the plan catalog. Implementations must be total over [`PlanTier`].
pub trait PlanCatalogProvider: Send + Sync {
    fn plan(&self, tier: PlanTier) -> &Plan;
}

impl<T> PlanCatalogProvider for Arc<T>
where
    T: PlanCatalogProvider + ?Sized,
{
    fn plan(&self, tier: PlanTier) -> &Plan {
        (**self).plan(tier)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanCatalog {
    basic: Plan,
    professional: Plan,
    premium: Plan,
}

impl PlanCatalog {
    pub fn new(basic: Plan, professional: Plan, premium: Plan) -> Self {
        Self { basic, professional, premium }
    }

    /// Builds a catalog from keyed entries, rejecting maps that leave a tier uncovered.
    pub fn from_entries(mut entries: BTreeMap<PlanTier, Plan>) -> Result<Self, DomainError> {
        let mut take = |tier: PlanTier| {
            entries.remove(&tier).ok_or(DomainError::IncompleteCatalog(tier))
        };

        Ok(Self::new(take(PlanTier::Basic)?, take(PlanTier::Professional)?, take(PlanTier::Premium)?))
    }

    pub fn get(&self, tier: PlanTier) -> &Plan {
        match tier {
            PlanTier::Basic => &self.basic,
            PlanTier::Professional => &self.professional,
            PlanTier::Premium => &self.premium,
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (PlanTier, &Plan)> {
        PlanTier::ALL.into_iter().map(move |tier| (tier, self.get(tier)))
    }
}

impl PlanCatalogProvider for PlanCatalog {
    fn plan(&self, tier: PlanTier) -> &Plan {
        self.get(tier)
    }
}

impl Default for PlanCatalog {
    fn default() -> Self {
        Self::new(
            Plan::new(
                "Basic Plan",
                Decimal::new(29, 0),
                &[
                    "Email campaigns (up to 1,000 contacts)",
                    "Basic analytics dashboard",
                    "Email templates (10 templates)",
                    "Customer support (email only)",
                    "Basic automation (3 workflows)",
                    "Mobile app access",
                ],
            ),
            Plan::new(
                "Professional Plan",
                Decimal::new(79, 0),
                &[
                    "Everything in Basic",
                    "Advanced analytics & reporting",
                    "Email campaigns (up to 10,000 contacts)",
                    "Premium email templates (50 templates)",
                    "Priority customer support",
                    "Advanced automation (unlimited workflows)",
                    "A/B testing",
                    "API access",
                    "Custom integrations",
                    "Team collaboration (up to 5 members)",
                ],
            ),
            Plan::new(
                "Premium Plan",
                Decimal::new(199, 0),
                &[
                    "Everything in Professional",
                    "Unlimited contacts",
                    "AI-powered automation",
                    "Advanced segmentation",
                    "24/7 dedicated support",
                    "Custom integrations",
                ],
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rust_decimal::Decimal;

    use super::{PlanCatalog, PlanCatalogProvider};
    use crate::domain::plan::{Plan, PlanTier};
    use crate::errors::DomainError;

    #[test]
    fn default_catalog_prices_follow_upgrade_order() {
        let catalog = PlanCatalog::default();
        let prices: Vec<Decimal> = catalog.entries().map(|(_, plan)| plan.price).collect();

        assert_eq!(prices, vec![Decimal::new(29, 0), Decimal::new(79, 0), Decimal::new(199, 0)]);
        assert_eq!(catalog.plan(PlanTier::Professional).name, "Professional Plan");
        assert_eq!(catalog.plan(PlanTier::Professional).features.len(), 10);
    }

    #[test]
    fn from_entries_requires_every_tier() {
        let mut entries = BTreeMap::new();
        entries.insert(PlanTier::Basic, Plan::new("Starter", Decimal::new(10, 0), &[]));
        entries.insert(PlanTier::Premium, Plan::new("Elite", Decimal::new(90, 0), &[]));

        assert_eq!(
            PlanCatalog::from_entries(entries),
            Err(DomainError::IncompleteCatalog(PlanTier::Professional))
        );
    }

    #[test]
    fn from_entries_accepts_complete_maps() {
        let entries: BTreeMap<PlanTier, Plan> = PlanTier::ALL
            .into_iter()
            .map(|tier| (tier, Plan::new(tier.as_str(), Decimal::ONE, &["x"])))
            .collect();

        let catalog = PlanCatalog::from_entries(entries).expect("complete catalog");
        assert_eq!(catalog.get(PlanTier::Premium).name, "premium");
    }
}
