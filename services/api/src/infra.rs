use aquaml::scoring::PotabilityEngine;
use clap::ValueEnum;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Which shipped scoring profile a request or CLI invocation targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ScoringProfileKind {
    #[default]
    Laboratory,
    Field,
}

/// Both shipped engines, built once at startup and shared read-only.
pub(crate) struct EngineSet {
    laboratory: PotabilityEngine,
    field: PotabilityEngine,
}

impl EngineSet {
    pub(crate) fn new() -> Self {
        Self {
            laboratory: PotabilityEngine::laboratory(),
            field: PotabilityEngine::field(),
        }
    }

    pub(crate) fn engine(&self, kind: ScoringProfileKind) -> &PotabilityEngine {
        match kind {
            ScoringProfileKind::Laboratory => &self.laboratory,
            ScoringProfileKind::Field => &self.field,
        }
    }
}

/// A measurement as submitted by a collaborator: either an already-numeric
/// JSON value or the raw text from a form field. Both are normalized to text
/// so the engine's validation layer sees one input shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawMeasurement {
    Number(f64),
    Text(String),
}

impl RawMeasurement {
    pub(crate) fn into_text(self) -> String {
        match self {
            RawMeasurement::Number(value) => value.to_string(),
            RawMeasurement::Text(value) => value,
        }
    }
}

/// Parse a CLI `name=value` measurement pair.
pub(crate) fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected name=value, got '{raw}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_param_splits_on_first_equals() {
        assert_eq!(
            parse_param("ph=7.2"),
            Ok(("ph".to_string(), "7.2".to_string()))
        );
        assert_eq!(
            parse_param(" conductivity = 500 "),
            Ok(("conductivity".to_string(), "500".to_string()))
        );
    }

    #[test]
    fn parse_param_rejects_missing_name_or_separator() {
        assert!(parse_param("ph").is_err());
        assert!(parse_param("=7.2").is_err());
    }

    #[test]
    fn raw_measurement_accepts_numbers_and_text() {
        let number: RawMeasurement = serde_json::from_str("7.2").expect("number parses");
        assert_eq!(number.into_text(), "7.2");
        let text: RawMeasurement = serde_json::from_str("\"7.2\"").expect("text parses");
        assert_eq!(text.into_text(), "7.2");
    }
}
