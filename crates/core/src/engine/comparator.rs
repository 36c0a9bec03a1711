use crate::domain::dialogue::Action;
use crate::domain::plan::{PlanComparison, PlanTier};
use crate::engine::catalog::PlanCatalogProvider;

/// Pairs the customer's current plan with the plan the chosen action points at.
///
/// Only an upsell moves the suggestion up one tier; every other action suggests staying put.
pub fn compare<C>(catalog: &C, current: PlanTier, action: Action) -> PlanComparison
where
    C: PlanCatalogProvider + ?Sized,
{
    let suggested = if action == Action::Upsell { current.next() } else { current };

    PlanComparison {
        current_plan: catalog.plan(current).clone(),
        suggested_plan: catalog.plan(suggested).clone(),
        action,
    }
}
