//! Integration tests for the service client against a mock HTTP server

use mockito::{Matcher, Server};
use salary_lib::{
    analytics::{AnalyticsQuery, Filter, SalaryRange},
    prediction::{predict_with_fallback, DEGRADED_FACTOR_NAME},
    AnalyticsPanel, ClientConfig, ClientError, ErrorKind, ExperienceLevel, FormDraft,
    MarketPosition, PanelState, PredictionSession, PredictionState, ServiceClient,
    StructuredLogger,
};
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;

fn client_for(server: &Server) -> ServiceClient {
    ServiceClient::new(&ClientConfig::new(server.url())).unwrap()
}

fn draft() -> FormDraft {
    let mut draft = FormDraft::new("Senior ML Engineer", 7);
    draft.remote_ratio = 50;
    draft
}

fn prediction_body() -> serde_json::Value {
    json!({
        "status": "success",
        "data": {
            "predictedSalary": 125000,
            "confidenceInterval": {"lower": 110000, "upper": 140000},
            "similarJobs": 412,
            "marketPosition": "Above Average",
            "factors": [
                {"name": "Senior Level", "impact": 18000, "description": "Experience premium"}
            ],
            "metadata": {
                "model_version": "1.0.0",
                "model_type": "RandomForestRegressor",
                "model_accuracy": 0.7336,
                "prediction_timestamp": "2024-05-01T12:00:00",
                "features_processed": 25
            }
        }
    })
}

fn analytics_body(filtered: u64) -> serde_json::Value {
    json!({
        "status": "success",
        "data": {
            "salaryDistribution": [],
            "geographicData": [],
            "metadata": {
                "lastUpdated": "2024-05-01T12:00:00",
                "totalRecords": 1000,
                "filteredRecords": filtered,
                "dataQuality": 98.5,
                "modelAccuracy": 73.4,
                "appliedFilters": {}
            }
        }
    })
}

#[tokio::test]
async fn test_predict_sends_canonical_payload() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/predict")
        .match_body(Matcher::PartialJson(json!({
            "jobTitle": "Senior ML Engineer",
            "yearsExperience": 7,
            "experienceLevel": "Senior Level",
            "companyLocation": "Other",
            "companySize": "Medium",
            "remoteRatio": 50
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(prediction_body().to_string())
        .create_async()
        .await;

    let input = draft().into_submission().unwrap();
    assert_eq!(input.experience_level(), ExperienceLevel::Senior);

    let result = client_for(&server).predict(&input).await.unwrap();
    assert_eq!(result.predicted_salary, 125_000.0);
    assert_eq!(result.market_position, MarketPosition::AboveAverage);
    assert_eq!(result.model_accuracy(), Some(0.7336));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_status_with_message() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/predict")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"error": "Validation error", "message": "Job title is required", "status": "error"})
                .to_string(),
        )
        .create_async()
        .await;

    let input = draft().into_submission().unwrap();
    let err = client_for(&server).predict(&input).await.unwrap_err();
    match &err {
        ClientError::HttpStatus { status, message } => {
            assert_eq!(*status, 400);
            assert_eq!(message, "Job title is required");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn test_error_status_without_body_is_generic() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/predict")
        .with_status(500)
        .create_async()
        .await;

    let input = draft().into_submission().unwrap();
    let err = predict_with_fallback(&client_for(&server), &input)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Request failed with status 500");
}

#[tokio::test]
async fn test_html_response_is_unexpected_content_type() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/predict")
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body("<!doctype html><html><body>Proxy login</body></html>")
        .create_async()
        .await;

    let input = draft().into_submission().unwrap();
    let err = client_for(&server).predict(&input).await.unwrap_err();
    assert!(matches!(err, ClientError::UnexpectedContentType { .. }));
    assert!(!err.remediation().is_empty());
}

#[tokio::test]
async fn test_explicit_error_envelope_is_service_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/predict")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"status": "error", "message": "Model rejected input"}).to_string())
        .create_async()
        .await;

    let input = draft().into_submission().unwrap();
    let err = client_for(&server).predict(&input).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Service);
    assert_eq!(err.to_string(), "Model rejected input");
}

#[tokio::test]
async fn test_bare_payload_is_accepted() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/predict")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"predictedSalary": 98000, "marketPosition": "Average"}).to_string())
        .create_async()
        .await;

    let input = draft().into_submission().unwrap();
    let result = client_for(&server).predict(&input).await.unwrap();
    assert_eq!(result.predicted_salary, 98_000.0);
    assert!(result.confidence_interval.is_none());
}

#[tokio::test]
async fn test_unreachable_service_falls_back() {
    let client = ServiceClient::new(&ClientConfig::new("http://127.0.0.1:1")).unwrap();
    let input = draft().into_submission().unwrap();

    let err = client.predict(&input).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unavailable);

    let outcome = predict_with_fallback(&client, &input).await.unwrap();
    assert!(outcome.is_degraded());
    let result = outcome.result();
    assert_eq!(result.predicted_salary, 115_000.0);
    let interval = result.confidence_interval.unwrap();
    assert_eq!((interval.lower, interval.upper), (92_481.0, 137_519.0));
    assert_eq!(result.factors.len(), 1);
    assert_eq!(result.factors[0].name, DEGRADED_FACTOR_NAME);
    assert_eq!(result.factors[0].impact, 0.0);
}

#[tokio::test]
async fn test_timeout_is_unavailable_and_degrades() {
    // Accepts connections but never writes a response
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let config = ClientConfig {
        request_timeout_secs: 1,
        ..ClientConfig::new(format!("http://{}", addr))
    };
    let client = ServiceClient::new(&config).unwrap();
    let input = draft().into_submission().unwrap();

    let started = Instant::now();
    let err = client.predict(&input).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unavailable);
    assert!(started.elapsed() < Duration::from_secs(10));

    let outcome = predict_with_fallback(&client, &input).await.unwrap();
    assert!(outcome.is_degraded());
    assert_eq!(outcome.result().predicted_salary, 115_000.0);
}

#[tokio::test]
async fn test_session_renders_live_prediction() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/predict")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(prediction_body().to_string())
        .create_async()
        .await;

    let session = PredictionSession::new(Arc::new(client_for(&server)), StructuredLogger::new("it"));
    let state = session.submit(draft()).await;
    match state.as_ref() {
        PredictionState::Ready { view, degraded, .. } => {
            assert!(!degraded);
            assert_eq!(view.margin_of_error, 15_000.0);
            assert_eq!(view.precision_percent, 76);
            assert_eq!(view.model_confidence, 73.36);
        }
        other => panic!("unexpected state: {:?}", other),
    }
}

#[tokio::test]
async fn test_analytics_omits_all_filters() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/analytics/overview")
        .match_query(Matcher::Exact(
            "experienceLevel=Senior+Level&salaryRange=150k%2B".to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(analytics_body(120).to_string())
        .create_async()
        .await;

    let query = AnalyticsQuery {
        experience_level: Filter::Only(ExperienceLevel::Senior),
        salary_range: Filter::Only(SalaryRange::Over150k),
        ..Default::default()
    };
    let result = client_for(&server).analytics_overview(&query).await.unwrap();
    assert_eq!(result.filtered_records(), 120);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_analytics_rejects_inconsistent_metadata() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/analytics/overview")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"status": "success", "data": {"metadata": {"totalRecords": 5, "filteredRecords": 8}}})
                .to_string(),
        )
        .create_async()
        .await;

    let err = client_for(&server)
        .analytics_overview(&AnalyticsQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::MalformedBody(_)));
}

#[tokio::test]
async fn test_analytics_panel_classification() {
    let mut server = Server::new_async().await;
    for (location, filtered) in [("Atlantis", 0u64), ("Austria", 9), ("Canada", 10)] {
        server
            .mock("GET", "/api/analytics/overview")
            .match_query(Matcher::UrlEncoded("location".into(), location.into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(analytics_body(filtered).to_string())
            .create_async()
            .await;
    }

    let panel = AnalyticsPanel::new(Arc::new(client_for(&server)), StructuredLogger::new("it"));
    let at = |location: &str| AnalyticsQuery {
        location: Filter::Only(location.to_string()),
        ..Default::default()
    };

    assert_eq!(
        *panel.refresh(at("Atlantis")).await,
        PanelState::NoData { offer_reset: true }
    );
    assert_eq!(
        *panel.refresh(at("Austria")).await,
        PanelState::InsufficientData { records: 9, offer_reset: true }
    );
    assert_eq!(panel.refresh(at("Canada")).await.name(), "ready");
}

#[tokio::test]
async fn test_negative_trend_counts_still_classify() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/analytics/overview")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "status": "success",
                "data": {
                    "trendData": [
                        {"month": "Jan", "averageSalary": 98000, "jobPostings": 4, "applications": 60},
                        {"month": "Feb", "averageSalary": 97000, "jobPostings": -3, "applications": -12}
                    ],
                    "metadata": {"totalRecords": 1000, "filteredRecords": 9}
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let panel = AnalyticsPanel::new(Arc::new(client_for(&server)), StructuredLogger::new("it"));
    let query = AnalyticsQuery {
        location: Filter::Only("Austria".to_string()),
        ..Default::default()
    };
    assert_eq!(
        *panel.refresh(query).await,
        PanelState::InsufficientData { records: 9, offer_reset: true }
    );
}

#[tokio::test]
async fn test_analytics_error_is_surfaced() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/analytics/overview")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"status": "error", "message": "Failed to generate analytics data"}).to_string(),
        )
        .create_async()
        .await;

    let panel = AnalyticsPanel::new(Arc::new(client_for(&server)), StructuredLogger::new("it"));
    let state = panel.refresh(AnalyticsQuery::default()).await;
    match state.as_ref() {
        PanelState::Error { message, .. } => {
            assert_eq!(message, "Failed to generate analytics data")
        }
        other => panic!("unexpected state: {:?}", other),
    }
}

#[tokio::test]
async fn test_data_summary_filter_options() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/analytics/data-summary")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "status": "success",
                "data": {
                    "locations": {"United States": 600, "Germany": 120, "Canada": 120},
                    "experienceLevels": {"Senior Level": 400, "Entry Level": 150},
                    "companySizes": {"Large": 500},
                    "totalRecords": 840
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let summary = client_for(&server).data_summary().await.unwrap();
    let locations: Vec<_> = summary
        .location_options()
        .into_iter()
        .map(|o| o.value)
        .collect();
    assert_eq!(locations, ["All", "United States", "Canada", "Germany"]);
    assert_eq!(summary.total_records, 840);
}

#[tokio::test]
async fn test_health_and_model_info() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/health")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "status": "healthy",
                "timestamp": "2024-05-01T12:00:00",
                "model_loaded": true,
                "version": "1.0.0",
                "services": {"prediction": "available", "analytics": "available", "model_info": "available"}
            })
            .to_string(),
        )
        .create_async()
        .await;
    server
        .mock("GET", "/api/model/info")
        .with_status(503)
        .with_header("content-type", "application/json")
        .with_body(json!({"error": "Model not loaded", "status": "error"}).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let health = client.health().await.unwrap();
    assert!(health.can_predict());
    assert_eq!(health.version.as_deref(), Some("1.0.0"));

    let err = client.model_info().await.unwrap_err();
    assert_eq!(err.to_string(), "Model not loaded");
}

#[tokio::test]
async fn test_model_features_and_performance() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/model/features")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "status": "success",
                "data": {
                    "feature_importance": [
                        {"feature": "years_experience", "importance": 0.41, "percentage": 41.0},
                        {"feature": "loc_US", "importance": 0.12, "percentage": 12.0}
                    ],
                    "model_type": "RandomForestRegressor",
                    "total_features": 2
                }
            })
            .to_string(),
        )
        .create_async()
        .await;
    server
        .mock("GET", "/api/analytics/model-performance")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "status": "success",
                "data": {
                    "accuracy": {"r2_score": 0.7336, "mae": 22519, "rmse": 31847, "mape": 18.2},
                    "feature_importance": [
                        {"feature": "years_experience_capped", "importance": 0.234, "rank": 1}
                    ],
                    "validation_scores": {"train_score": 0.8567, "test_score": 0.7336},
                    "data_quality": {"total_samples": 15247, "features_count": 25}
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let features = client.model_features().await.unwrap();
    assert_eq!(features.total_features, 2);
    assert_eq!(features.top(1)[0].feature, "years_experience");

    let performance = client.model_performance().await.unwrap();
    assert_eq!(performance.accuracy.r2_score, Some(0.7336));
    assert_eq!(performance.data_quality.features_count, 25);
    assert!(performance.generalization_gap().is_some());
}

#[tokio::test]
async fn test_model_features_unsupported() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/model/features")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "error": "Feature importance not available",
                "message": "This model type does not support feature importance",
                "status": "error"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let err = client_for(&server).model_features().await.unwrap_err();
    assert_eq!(err.to_string(), "This model type does not support feature importance");
    assert_eq!(err.kind(), ErrorKind::Transport);
}
