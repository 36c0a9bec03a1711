pub mod chat;
pub mod classify;
pub mod config;
pub mod doctor;
pub mod profile;

use anyhow::Context;
use retention_core::config::{AppConfig, LoadOptions};
use retention_core::domain::customer::CustomerProfile;
use retention_core::engine::catalog::PlanCatalog;
use retention_store::{demo_customers, load_catalog, load_customers, InMemoryCustomerRepository};
use serde::Serialize;
use serde_json::Value;

pub const EXIT_CONFIG: u8 = 2;
pub const EXIT_DATA: u8 = 3;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl CommandResult {
    pub fn success_with_data(
        command: &str,
        message: impl Into<String>,
        data: impl Serialize,
    ) -> Self {
        let data = match serde_json::to_value(data) {
            Ok(Value::Null) => None,
            Ok(value) => Some(value),
            Err(error) => {
                return Self::failure(command, "serialization", error.to_string(), 1);
            }
        };

        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data,
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

/// Config plus the catalog and customer store the engine runs against.
pub(crate) struct RuntimeData {
    pub config: AppConfig,
    pub catalog: PlanCatalog,
    pub customers: InMemoryCustomerRepository,
}

pub(crate) enum LoadFailure {
    Config(String),
    Data(String),
}

impl LoadFailure {
    pub(crate) fn into_result(self, command: &str) -> CommandResult {
        match self {
            Self::Config(message) => {
                CommandResult::failure(command, "config_validation", message, EXIT_CONFIG)
            }
            Self::Data(message) => CommandResult::failure(command, "data_load", message, EXIT_DATA),
        }
    }
}

pub(crate) fn load_runtime_data() -> Result<RuntimeData, LoadFailure> {
    let config = AppConfig::load(LoadOptions::default())
        .map_err(|error| LoadFailure::Config(error.to_string()))?;
    let (catalog, customers) =
        load_data(&config).map_err(|error| LoadFailure::Data(format!("{error:#}")))?;

    Ok(RuntimeData {
        config,
        catalog,
        customers: InMemoryCustomerRepository::with_profiles(customers),
    })
}

fn load_data(config: &AppConfig) -> anyhow::Result<(PlanCatalog, Vec<CustomerProfile>)> {
    let catalog = match &config.data.catalog_path {
        Some(path) => load_catalog(path).context("loading plan catalog")?,
        None => PlanCatalog::default(),
    };
    let customers = match &config.data.customers_path {
        Some(path) => load_customers(path).context("loading customers")?,
        None => demo_customers(),
    };
    Ok((catalog, customers))
}

pub(crate) fn block_on<F: std::future::Future>(future: F) -> Result<F::Output, String> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map(|runtime| runtime.block_on(future))
        .map_err(|error| format!("failed to initialize async runtime: {error}"))
}
