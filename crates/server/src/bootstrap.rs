use std::sync::Arc;

use retention_core::config::{AppConfig, ConfigError};
use retention_core::engine::catalog::PlanCatalog;
use retention_core::engine::intent::KeywordIntentClassifier;
use retention_core::engine::policy::TemplateDialoguePolicy;
use retention_core::engine::DeterministicDialogueEngine;
use retention_store::{
    demo_customers, load_catalog, load_customers, ConversationMetrics, FixtureError,
    InMemoryConversationRepository, InMemoryCustomerRepository, TicketSequence,
};
use thiserror::Error;
use tracing::info;

use crate::api::AppState;

pub struct Application {
    pub config: AppConfig,
    pub state: AppState,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Fixture(#[from] FixtureError),
}

pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        latency_mode = ?config.engine.latency_mode,
        "starting application bootstrap"
    );

    let catalog = match &config.data.catalog_path {
        Some(path) => load_catalog(path)?,
        None => PlanCatalog::default(),
    };
    let customers = match &config.data.customers_path {
        Some(path) => load_customers(path)?,
        None => demo_customers(),
    };
    info!(
        event_name = "system.bootstrap.data_loaded",
        correlation_id = "bootstrap",
        customers = customers.len(),
        "customer and catalog data ready"
    );

    let engine = DeterministicDialogueEngine::new(
        KeywordIntentClassifier,
        TemplateDialoguePolicy::new(catalog, config.engine.latency_mode),
    );

    let state = AppState {
        engine: Arc::new(engine),
        customers: Arc::new(InMemoryCustomerRepository::with_profiles(customers)),
        conversations: Arc::new(InMemoryConversationRepository::default()),
        metrics: Arc::new(ConversationMetrics::default()),
        tickets: Arc::new(TicketSequence::default()),
    };

    Ok(Application { config, state })
}
