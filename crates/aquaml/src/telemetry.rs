use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Transport-layer crates that drown out scoring logs at `info`; their
/// directives are appended unless the config asks for verbose dependencies.
const QUIET_DEPENDENCIES: [&str; 3] = ["hyper=warn", "tower=warn", "metrics=warn"];

#[derive(Debug)]
pub enum TelemetryError {
    Filter { spec: String, source: ParseError },
    Init(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::Filter { spec, .. } => {
                write!(f, "log filter '{spec}' is not a valid tracing directive set")
            }
            TelemetryError::Init(err) => write!(f, "tracing subscriber failed to start: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::Filter { source, .. } => Some(source),
            TelemetryError::Init(err) => Some(&**err),
        }
    }
}

/// Install the global subscriber for the analysis service.
///
/// `RUST_LOG` wins when set; otherwise the filter is assembled from the
/// configured level plus the dependency-quieting directives. Output is
/// compact and ANSI-free so one prediction maps to one grep-able line.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => build_filter(config)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Init)
}

fn build_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    let mut spec = config.log_level.clone();
    if !config.verbose_dependencies {
        for directive in QUIET_DEPENDENCIES {
            spec.push(',');
            spec.push_str(directive);
        }
    }

    EnvFilter::try_new(&spec).map_err(|source| TelemetryError::Filter { spec, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(log_level: &str, verbose_dependencies: bool) -> TelemetryConfig {
        TelemetryConfig {
            log_level: log_level.to_string(),
            verbose_dependencies,
        }
    }

    #[test]
    fn default_filter_quiets_transport_dependencies() {
        let filter = build_filter(&config("info", false)).expect("filter builds");
        let rendered = filter.to_string();
        assert!(rendered.contains("hyper=warn"), "got '{rendered}'");
        assert!(rendered.contains("tower=warn"), "got '{rendered}'");
        assert!(rendered.contains("metrics=warn"), "got '{rendered}'");
    }

    #[test]
    fn verbose_dependencies_skip_the_quieting_directives() {
        let filter = build_filter(&config("debug", true)).expect("filter builds");
        let rendered = filter.to_string();
        assert!(!rendered.contains("hyper=warn"), "got '{rendered}'");
    }

    #[test]
    fn invalid_filter_spec_is_reported_with_the_offending_directives() {
        let err = build_filter(&config("not a directive", false)).expect_err("filter rejected");
        match err {
            TelemetryError::Filter { spec, .. } => {
                assert!(spec.starts_with("not a directive"), "got '{spec}'");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
