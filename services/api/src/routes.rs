use crate::infra::{AppState, EngineSet, RawMeasurement, ScoringProfileKind};
use aquaml::error::AppError;
use aquaml::scoring::PredictionResult;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct PredictionRequest {
    #[serde(default)]
    pub(crate) profile: ScoringProfileKind,
    pub(crate) parameters: HashMap<String, RawMeasurement>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PredictionResponse {
    pub(crate) profile: ScoringProfileKind,
    pub(crate) analyzed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub(crate) prediction: PredictionResult,
}

pub(crate) fn with_analysis_routes() -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/potability/predict",
            axum::routing::post(predict_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn predict_endpoint(
    Extension(engines): Extension<Arc<EngineSet>>,
    Json(payload): Json<PredictionRequest>,
) -> Result<Json<PredictionResponse>, AppError> {
    let PredictionRequest {
        profile,
        parameters,
    } = payload;

    let raw: HashMap<String, String> = parameters
        .into_iter()
        .map(|(name, value)| (name, value.into_text()))
        .collect();

    let prediction = engines.engine(profile).predict_raw(&raw)?;

    Ok(Json(PredictionResponse {
        profile,
        analyzed_at: Utc::now(),
        prediction,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aquaml::scoring::{QualityTier, ValidationError};

    fn engines() -> Extension<Arc<EngineSet>> {
        Extension(Arc::new(EngineSet::new()))
    }

    fn field_request(entries: &[(&str, &str)]) -> PredictionRequest {
        PredictionRequest {
            profile: ScoringProfileKind::Field,
            parameters: entries
                .iter()
                .map(|(name, value)| (name.to_string(), RawMeasurement::Text(value.to_string())))
                .collect(),
        }
    }

    #[tokio::test]
    async fn predict_endpoint_scores_a_field_sample() {
        let request = field_request(&[
            ("ph", "7.0"),
            ("turbidity", "0.5"),
            ("chlorine", "1.0"),
            ("temperature", "20"),
            ("conductivity", "500"),
            ("hardness", "90"),
        ]);

        let Json(body) = predict_endpoint(engines(), Json(request))
            .await
            .expect("sample scores");

        assert_eq!(body.profile, ScoringProfileKind::Field);
        assert_eq!(body.prediction.score, 100);
        assert_eq!(body.prediction.tier, Some(QualityTier::Excellent));
        assert!(body.prediction.potable);
        assert!(body.prediction.risk_factors.is_empty());
    }

    #[tokio::test]
    async fn predict_endpoint_accepts_numeric_json_values() {
        let request = PredictionRequest {
            profile: ScoringProfileKind::Laboratory,
            parameters: serde_json::from_value(json!({
                "ph": 7.2,
                "hardness": 90,
                "solids": 300,
                "chloramines": 2.0,
                "sulfate": 120,
                "conductivity": 250,
                "organic_carbon": 1.2,
                "trihalomethanes": 40,
                "turbidity": "0.4",
            }))
            .expect("parameters deserialize"),
        };

        let Json(body) = predict_endpoint(engines(), Json(request))
            .await
            .expect("sample scores");

        assert!(body.prediction.potable);
        assert_eq!(
            body.prediction.algorithm.as_deref(),
            Some("Support Vector Machine (SVM)")
        );
        assert!(body.prediction.confidence.is_some());
    }

    #[test]
    fn request_without_profile_defaults_to_laboratory() {
        let request: PredictionRequest = serde_json::from_value(json!({
            "parameters": { "ph": 7.2 }
        }))
        .expect("request deserializes");
        assert_eq!(request.profile, ScoringProfileKind::Laboratory);
    }

    #[tokio::test]
    async fn predict_endpoint_reports_all_missing_parameters() {
        let request = field_request(&[("ph", "7.0"), ("turbidity", "0.5")]);

        let err = predict_endpoint(engines(), Json(request))
            .await
            .expect_err("incomplete submission rejected");

        match err {
            AppError::Validation(ValidationError::MissingOrEmpty(names)) => {
                assert_eq!(names, ["chlorine", "temperature", "conductivity", "hardness"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn predict_endpoint_rejects_non_numeric_text() {
        let request = field_request(&[
            ("ph", "acidic"),
            ("turbidity", "0.5"),
            ("chlorine", "1.0"),
            ("temperature", "20"),
            ("conductivity", "500"),
            ("hardness", "90"),
        ]);

        let err = predict_endpoint(engines(), Json(request))
            .await
            .expect_err("unparsable submission rejected");

        match err {
            AppError::Validation(ValidationError::NotNumeric(names)) => {
                assert_eq!(names, ["ph"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
