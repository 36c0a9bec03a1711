use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use retention_core::config::{AppConfig, LoadOptions, DEFAULT_CONFIG_FILE};
use toml::Value;

struct Field<'a> {
    key_path: &'static str,
    env_keys: &'static [&'static str],
    value: &'a str,
}

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let port = config.server.port.to_string();
    let graceful_shutdown_secs = config.server.graceful_shutdown_secs.to_string();
    let customers_path = display_path(config.data.customers_path.as_deref(), "<built-in demo>");
    let catalog_path = display_path(config.data.catalog_path.as_deref(), "<built-in catalog>");
    let latency_mode = config.engine.latency_mode.as_str().to_owned();

    let fields = [
        Field {
            key_path: "server.bind_address",
            env_keys: &["RETENTION_SERVER_BIND_ADDRESS"],
            value: &config.server.bind_address,
        },
        Field { key_path: "server.port", env_keys: &["RETENTION_SERVER_PORT"], value: &port },
        Field {
            key_path: "server.graceful_shutdown_secs",
            env_keys: &["RETENTION_SERVER_GRACEFUL_SHUTDOWN_SECS"],
            value: &graceful_shutdown_secs,
        },
        Field {
            key_path: "data.customers_path",
            env_keys: &["RETENTION_DATA_CUSTOMERS_PATH"],
            value: &customers_path,
        },
        Field {
            key_path: "data.catalog_path",
            env_keys: &["RETENTION_DATA_CATALOG_PATH"],
            value: &catalog_path,
        },
        Field {
            key_path: "engine.latency_mode",
            env_keys: &["RETENTION_ENGINE_LATENCY_MODE"],
            value: &latency_mode,
        },
        Field {
            key_path: "logging.level",
            env_keys: &["RETENTION_LOGGING_LEVEL", "RETENTION_LOG_LEVEL"],
            value: &config.logging.level,
        },
        Field {
            key_path: "logging.format",
            env_keys: &["RETENTION_LOGGING_FORMAT", "RETENTION_LOG_FORMAT"],
            value: config.logging.format.as_str(),
        },
    ];

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];
    lines.extend(fields.iter().map(|field| {
        render_line(
            field.key_path,
            field.value,
            field_source(
                field.key_path,
                field.env_keys,
                config_file_doc.as_ref(),
                config_file_path.as_deref(),
            ),
        )
    }));

    lines.join("\n")
}

fn detect_config_path() -> Option<PathBuf> {
    [PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from("config").join(DEFAULT_CONFIG_FILE)]
        .into_iter()
        .find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn display_path(path: Option<&Path>, unset: &str) -> String {
    path.map(|path| path.display().to_string()).unwrap_or_else(|| unset.to_string())
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    let set_env = env_keys
        .iter()
        .find(|key| env::var(key).is_ok_and(|value| !value.trim().is_empty()));
    if let Some(env_key) = set_env {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
