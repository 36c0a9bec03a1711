use std::str::FromStr;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Supplies the `latency_ms` figure reported on each dialogue response.
pub trait LatencySource: Send + Sync {
    fn latency_ms(&self, elapsed: Duration) -> f64;
}

/// Demo figure drawn uniformly from `[50, 150)` milliseconds, independent of real timing.
#[derive(Clone, Copy, Debug, Default)]
pub struct SyntheticLatency;

impl LatencySource for SyntheticLatency {
    fn latency_ms(&self, _elapsed: Duration) -> f64 {
        rand::thread_rng().gen_range(50.0..150.0)
    }
}

/// Reports the measured time spent composing the response, rounded to two decimals.
#[derive(Clone, Copy, Debug, Default)]
pub struct MeasuredLatency;

impl LatencySource for MeasuredLatency {
    fn latency_ms(&self, elapsed: Duration) -> f64 {
        (elapsed.as_secs_f64() * 100_000.0).round() / 100.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedLatency(pub f64);

impl LatencySource for FixedLatency {
    fn latency_ms(&self, _elapsed: Duration) -> f64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LatencyMode {
    #[default]
    Synthetic,
    Measured,
}

impl LatencyMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Synthetic => "synthetic",
            Self::Measured => "measured",
        }
    }
}

impl LatencySource for LatencyMode {
    fn latency_ms(&self, elapsed: Duration) -> f64 {
        match self {
            Self::Synthetic => SyntheticLatency.latency_ms(elapsed),
            Self::Measured => MeasuredLatency.latency_ms(elapsed),
        }
    }
}

impl FromStr for LatencyMode {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "synthetic" => Ok(Self::Synthetic),
            "measured" => Ok(Self::Measured),
            other => {
                Err(DomainError::UnknownVariant { kind: "latency mode", value: other.to_owned() })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{FixedLatency, LatencyMode, LatencySource, MeasuredLatency, SyntheticLatency};

    #[test]
    fn synthetic_latency_stays_in_demo_range() {
        for _ in 0..200 {
            let value = SyntheticLatency.latency_ms(Duration::ZERO);
            assert!((50.0..150.0).contains(&value), "out of range: {value}");
        }
    }

    #[test]
    fn measured_latency_reports_elapsed_milliseconds() {
        assert_eq!(MeasuredLatency.latency_ms(Duration::from_micros(12_346)), 12.35);
        assert_eq!(LatencyMode::Measured.latency_ms(Duration::from_millis(3)), 3.0);
    }

    #[test]
    fn fixed_latency_ignores_elapsed_time() {
        assert_eq!(FixedLatency(88.0).latency_ms(Duration::from_secs(9)), 88.0);
    }

    #[test]
    fn latency_mode_parses_names() {
        assert_eq!("Measured".parse::<LatencyMode>(), Ok(LatencyMode::Measured));
        assert!("wallclock".parse::<LatencyMode>().is_err());
    }
}
