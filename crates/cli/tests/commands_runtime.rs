use std::env;
use std::fs;
use std::sync::{Mutex, OnceLock};

use retention_cli::commands::{chat, classify, config, doctor, profile};
use serde_json::Value;
use tempfile::TempDir;

#[test]
fn classify_reports_intent_tag() {
    let result = classify::run("this is too expensive");
    assert_eq!(result.exit_code, 0);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["command"], "classify");
    assert_eq!(payload["status"], "ok");
    assert_eq!(payload["data"]["intent"], "pricing_confusion");
}

#[test]
fn chat_answers_demo_customer_with_discount_quote() {
    with_env(&[("RETENTION_ENGINE_LATENCY_MODE", "measured")], || {
        let result = chat::run("user_001", "any discount for me?");
        assert_eq!(result.exit_code, 0, "expected chat success");

        let payload = parse_payload(&result.output);
        let data = &payload["data"];
        assert_eq!(data["action"], "retention");
        assert_eq!(data["suggestedOffer"], "15% discount for 3 months");
        assert!(data["response"].as_str().unwrap_or_default().contains("$24.65/month"));
        assert_eq!(data["churn_risk_reduction"], "35%");
    });
}

#[test]
fn chat_reads_customers_from_configured_fixture() {
    let dir = TempDir::new().expect("temp dir");
    let customers = dir.path().join("customers.json");
    fs::write(
        &customers,
        r#"{"user_900": {"name": "Ivy", "plan": "premium", "subscription_value": 199}}"#,
    )
    .expect("write customers");
    let customers_path = customers.to_str().expect("utf-8 path");

    with_env(&[("RETENTION_DATA_CUSTOMERS_PATH", customers_path)], || {
        let result = chat::run("user_900", "I need more features");
        assert_eq!(result.exit_code, 0, "expected chat success");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["data"]["plan_comparison"]["current_plan"]["name"], "Premium Plan");
    });
}

#[test]
fn chat_returns_config_failure_for_invalid_env() {
    with_env(&[("RETENTION_SERVER_PORT", "not-a-port")], || {
        let result = chat::run("user_001", "hello");
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "config_validation");
        assert!(payload["message"].as_str().unwrap_or_default().contains("RETENTION_SERVER_PORT"));
    });
}

#[test]
fn chat_returns_data_failure_for_broken_fixture() {
    let dir = TempDir::new().expect("temp dir");
    let customers = dir.path().join("customers.json");
    fs::write(&customers, "[not valid").expect("write customers");
    let customers_path = customers.to_str().expect("utf-8 path");

    with_env(&[("RETENTION_DATA_CUSTOMERS_PATH", customers_path)], || {
        let result = chat::run("user_001", "hello");
        assert_eq!(result.exit_code, 3, "expected data load failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "data_load");
        assert!(payload["message"].as_str().unwrap_or_default().contains("loading customers"));
    });
}

#[test]
fn profile_includes_analysis_and_flags_unknown_customers() {
    with_env(&[], || {
        let known = parse_payload(&profile::run("user_001").output);
        assert_eq!(known["data"]["known"], true);
        assert_eq!(known["data"]["profile"]["name"], "John Smith");
        assert_eq!(known["data"]["analysis"]["retention_strategy"], "moderate");

        let unknown = parse_payload(&profile::run("walk_in").output);
        assert_eq!(unknown["data"]["known"], false);
        assert_eq!(unknown["data"]["profile"]["email"], "walk_in@example.com");
    });
}

#[test]
fn config_attributes_env_and_default_sources() {
    with_env(&[("RETENTION_SERVER_PORT", "9001"), ("RETENTION_LOG_LEVEL", "debug")], || {
        let output = config::run();

        assert!(output.contains("- server.port = 9001 (source: env (RETENTION_SERVER_PORT))"));
        assert!(output.contains("- logging.level = debug (source: env (RETENTION_LOG_LEVEL))"));
        assert!(output.contains("- server.bind_address = 127.0.0.1 (source: default)"));
        assert!(output.contains("- engine.latency_mode = synthetic (source: default)"));
    });
}

#[test]
fn doctor_passes_with_built_in_data() {
    with_env(&[], || {
        let result = doctor::run(true);
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["overall_status"], "pass");
        let names: Vec<&str> = payload["checks"]
            .as_array()
            .map(|checks| checks.iter().filter_map(|check| check["name"].as_str()).collect())
            .unwrap_or_default();
        assert_eq!(names, vec!["config_validation", "customer_fixtures", "plan_catalog"]);
    });
}

#[test]
fn doctor_fails_on_incomplete_catalog() {
    let dir = TempDir::new().expect("temp dir");
    let catalog = dir.path().join("products.json");
    fs::write(&catalog, r#"{"plans": {"basic": {"name": "B", "price": 9, "features": []}}}"#)
        .expect("write catalog");
    let catalog_path = catalog.to_str().expect("utf-8 path");

    with_env(&[("RETENTION_DATA_CATALOG_PATH", catalog_path)], || {
        let result = doctor::run(false);
        assert_eq!(result.exit_code, 1);
        assert!(result.output.starts_with("doctor: one or more readiness checks failed"));
        assert!(result.output.contains("- [fail] plan_catalog:"));
    });
}

#[test]
fn doctor_skips_data_checks_when_config_is_invalid() {
    with_env(&[("RETENTION_LOG_FORMAT", "xml")], || {
        let payload = parse_payload(&doctor::run(true).output);

        assert_eq!(payload["overall_status"], "fail");
        assert_eq!(payload["checks"][0]["status"], "fail");
        assert_eq!(payload["checks"][1]["status"], "skipped");
        assert_eq!(payload["checks"][2]["status"], "skipped");
    });
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "RETENTION_SERVER_BIND_ADDRESS",
        "RETENTION_SERVER_PORT",
        "RETENTION_SERVER_GRACEFUL_SHUTDOWN_SECS",
        "RETENTION_DATA_CUSTOMERS_PATH",
        "RETENTION_DATA_CATALOG_PATH",
        "RETENTION_ENGINE_LATENCY_MODE",
        "RETENTION_LOGGING_LEVEL",
        "RETENTION_LOGGING_FORMAT",
        "RETENTION_LOG_LEVEL",
        "RETENTION_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(test_fn));

    for (key, value) in previous_values {
        match value {
            Some(value) => env::set_var(key, value),
            None => env::remove_var(key),
        }
    }

    if let Err(panic) = outcome {
        std::panic::resume_unwind(panic);
    }
}
