use std::path::Path;

use retention_core::config::{AppConfig, LoadOptions};
use retention_core::domain::plan::PlanTier;
use retention_core::engine::catalog::PlanCatalogProvider;
use retention_store::{load_catalog, load_customers};
use serde::Serialize;

use super::CommandResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> CommandResult {
    let report = build_report();
    let exit_code = if report.overall_status == CheckStatus::Pass { 0 } else { 1 };

    let output = if json_output {
        serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        })
    } else {
        render_human(&report)
    };

    CommandResult { exit_code, output }
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            checks.push(check_customers(config.data.customers_path.as_deref()));
            checks.push(check_catalog(config.data.catalog_path.as_deref()));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            for name in ["customer_fixtures", "plan_catalog"] {
                checks.push(DoctorCheck {
                    name,
                    status: CheckStatus::Skipped,
                    details: "skipped because configuration did not load".to_string(),
                });
            }
        }
    }

    let failed = checks.iter().any(|check| check.status == CheckStatus::Fail);
    let overall_status = if failed { CheckStatus::Fail } else { CheckStatus::Pass };
    let summary = if failed {
        "doctor: one or more readiness checks failed".to_string()
    } else {
        "doctor: all readiness checks passed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_customers(path: Option<&Path>) -> DoctorCheck {
    let Some(path) = path else {
        return DoctorCheck {
            name: "customer_fixtures",
            status: CheckStatus::Pass,
            details: "no customers file configured; built-in demo customers in use".to_string(),
        };
    };

    match load_customers(path) {
        Ok(customers) => DoctorCheck {
            name: "customer_fixtures",
            status: CheckStatus::Pass,
            details: format!("loaded {} customers from `{}`", customers.len(), path.display()),
        },
        Err(error) => DoctorCheck {
            name: "customer_fixtures",
            status: CheckStatus::Fail,
            details: error.to_string(),
        },
    }
}

fn check_catalog(path: Option<&Path>) -> DoctorCheck {
    let Some(path) = path else {
        return DoctorCheck {
            name: "plan_catalog",
            status: CheckStatus::Pass,
            details: "no catalog file configured; built-in plans in use".to_string(),
        };
    };

    match load_catalog(path) {
        Ok(catalog) => {
            let plans: Vec<String> = PlanTier::ALL
                .iter()
                .map(|tier| format!("{tier}={}", catalog.plan(*tier).price))
                .collect();
            DoctorCheck {
                name: "plan_catalog",
                status: CheckStatus::Pass,
                details: format!("catalog `{}` covers {}", path.display(), plans.join(", ")),
            }
        }
        Err(error) => {
            DoctorCheck { name: "plan_catalog", status: CheckStatus::Fail, details: error.to_string() }
        }
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
