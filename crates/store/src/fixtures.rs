//! JSON fixture files for customers and the plan catalog.
//!
//! Customers: `{"<user id>": {<customer record>}, ...}`.
//! Catalog: `{"plans": {"basic": {"name", "price", "features"}, ...}}`, all three tiers required.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use retention_core::domain::customer::{CustomerId, CustomerProfile, CustomerRecord};
use retention_core::domain::plan::{Plan, PlanTier};
use retention_core::engine::catalog::PlanCatalog;
use retention_core::errors::DomainError;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("could not read fixture `{path}`: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("could not parse fixture `{path}`: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
    #[error("invalid catalog `{path}`: {source}")]
    Catalog { path: PathBuf, source: DomainError },
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    plans: BTreeMap<String, Plan>,
}

pub fn load_customers(path: &Path) -> Result<Vec<CustomerProfile>, FixtureError> {
    let raw = read(path)?;
    let records: BTreeMap<String, CustomerRecord> = serde_json::from_str(&raw)
        .map_err(|source| FixtureError::Parse { path: path.to_path_buf(), source })?;

    let profiles: Vec<CustomerProfile> =
        records.into_iter().map(|(id, record)| record.into_profile(CustomerId(id))).collect();

    info!(
        event_name = "store.fixtures.customers_loaded",
        correlation_id = "bootstrap",
        path = %path.display(),
        customers = profiles.len(),
        "customer fixtures loaded"
    );

    Ok(profiles)
}

pub fn load_catalog(path: &Path) -> Result<PlanCatalog, FixtureError> {
    let raw = read(path)?;
    let file: CatalogFile = serde_json::from_str(&raw)
        .map_err(|source| FixtureError::Parse { path: path.to_path_buf(), source })?;

    let catalog_error = |source| FixtureError::Catalog { path: path.to_path_buf(), source };

    let mut entries = BTreeMap::new();
    for (name, plan) in file.plans {
        let tier: PlanTier = name.parse().map_err(catalog_error)?;
        entries.insert(tier, plan);
    }
    let catalog = PlanCatalog::from_entries(entries).map_err(catalog_error)?;

    info!(
        event_name = "store.fixtures.catalog_loaded",
        correlation_id = "bootstrap",
        path = %path.display(),
        "plan catalog loaded"
    );

    Ok(catalog)
}

/// Built-in customers served when no fixture file is configured.
pub fn demo_customers() -> Vec<CustomerProfile> {
    let john = CustomerRecord {
        name: Some("John Smith".to_string()),
        email: Some("john@example.com".to_string()),
        company: Some("Tech Corp".to_string()),
        plan: Some("basic".to_string()),
        subscription_value: Some(Decimal::new(29, 0)),
        monthly_usage: Some(50.0),
        months_subscribed: Some(6),
        payment_issues: Some(0),
        support_tickets: Some(1),
        feature_usage: Some(vec!["email_templates".to_string(), "basic_analytics".to_string()]),
        churn_risk: Some("low".to_string()),
        upsell_potential: Some("medium".to_string()),
    };

    vec![john.into_profile(CustomerId("user_001".to_string()))]
}

fn read(path: &Path) -> Result<String, FixtureError> {
    fs::read_to_string(path)
        .map_err(|source| FixtureError::Read { path: path.to_path_buf(), source })
}
