//! End-to-end API tests against the in-process router.
//!
//! The remote endpoint points at an unroutable local port, so every remote
//! call fails fast and the daemon serves its static fallbacks.

use aernd::config::RemoteConfig;
use aernd::coordinator::LifecycleCoordinator;
use aernd::llm::AnalysisClient;
use aernd::server::{app, AppState};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn offline_app() -> Router {
    let remote = RemoteConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        model: "gpt-4".to_string(),
        api_key_env: "AERN_TEST_API_KEY".to_string(),
        timeout_secs: 1,
    };
    let client = AnalysisClient::new(&remote).expect("client builds");
    app(Arc::new(AppState::new(LifecycleCoordinator::new(client))))
}

async fn request(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };
    (status, value)
}

fn sample_report(severity: &str) -> Value {
    json!({
        "incident_type": "fire",
        "location": "12 Main St",
        "description": "Smoke on the second floor",
        "severity": severity
    })
}

async fn submit(app: Router, severity: &str) -> Value {
    let (status, body) = request(
        app,
        Method::POST,
        "/api/emergency/report",
        Some(sample_report(severity)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}

#[tokio::test]
async fn test_submission_serves_fallbacks_when_remote_is_down() {
    let app = offline_app();
    let body = submit(app, "high").await;

    assert_eq!(body["status"], "ACTIVE");
    assert_eq!(body["priority_score"], 75);
    assert_eq!(body["estimated_arrival_time"], "5 minutes");
    assert_eq!(
        body["resources_required"],
        json!(["Ambulance", "Fire truck", "Police unit"])
    );
    assert_eq!(body["ai_analysis"]["escalation_needed"], true);
    assert_eq!(body["ai_analysis"]["confidence_score"], 70);
    assert_eq!(
        body["ai_analysis"]["dispatch_plan"]["primary_dispatch"]["unit"],
        "Unit-1"
    );
    assert!(body["incident_id"].as_str().unwrap().starts_with("INC-"));
}

#[tokio::test]
async fn test_priority_stays_in_bounds_for_all_severities() {
    let app = offline_app();
    for (severity, expected) in [("low", 25), ("medium", 50), ("high", 75), ("critical", 95)] {
        let body = submit(app.clone(), severity).await;
        let priority = body["priority_score"].as_u64().unwrap();
        assert_eq!(priority, expected);
        assert!(priority <= 100);
    }
}

#[tokio::test]
async fn test_missing_timestamp_is_populated_and_parseable() {
    let app = offline_app();
    let body = submit(app.clone(), "medium").await;
    let id = body["incident_id"].as_str().unwrap();

    let (status, incident) = request(
        app,
        Method::GET,
        &format!("/api/emergency/incident/{}", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let timestamp = incident["report"]["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn test_unknown_incident_is_404_everywhere() {
    let app = offline_app();

    let (status, _) = request(
        app.clone(),
        Method::GET,
        "/api/emergency/incident/INC-19700101000000-1",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = request(
        app.clone(),
        Method::PUT,
        "/api/emergency/incident/INC-19700101000000-1/status",
        Some(json!({"status": "RESOLVED"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = request(
        app,
        Method::POST,
        "/api/emergency/update-analysis/INC-19700101000000-1",
        Some(json!({"note": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_status_value_is_400_and_state_unchanged() {
    let app = offline_app();
    let body = submit(app.clone(), "low").await;
    let id = body["incident_id"].as_str().unwrap();

    let (status, error) = request(
        app.clone(),
        Method::PUT,
        &format!("/api/emergency/incident/{}/status", id),
        Some(json!({"status": "DONE"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error.as_str().unwrap().contains("Invalid status"));

    let (_, incident) = request(
        app,
        Method::GET,
        &format!("/api/emergency/incident/{}", id),
        None,
    )
    .await;
    assert_eq!(incident["status"], "ACTIVE");
}

#[tokio::test]
async fn test_status_lifecycle_and_illegal_transition() {
    let app = offline_app();
    let body = submit(app.clone(), "high").await;
    let id = body["incident_id"].as_str().unwrap();
    let status_uri = format!("/api/emergency/incident/{}/status", id);

    let (status, updated) = request(
        app.clone(),
        Method::PUT,
        &status_uri,
        Some(json!({"status": "IN_PROGRESS"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "IN_PROGRESS");

    let (status, _) = request(
        app.clone(),
        Method::PUT,
        &status_uri,
        Some(json!({"status": "RESOLVED"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Terminal state rejects reactivation.
    let (status, _) = request(
        app.clone(),
        Method::PUT,
        &status_uri,
        Some(json!({"status": "ACTIVE"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, incident) = request(
        app,
        Method::GET,
        &format!("/api/emergency/incident/{}", id),
        None,
    )
    .await;
    assert_eq!(incident["status"], "RESOLVED");
}

#[tokio::test]
async fn test_update_analysis_merges_into_empty_details() {
    let app = offline_app();
    let body = submit(app.clone(), "critical").await;
    let id = body["incident_id"].as_str().unwrap();

    let (status, incident) = request(
        app.clone(),
        Method::POST,
        &format!("/api/emergency/update-analysis/{}", id),
        Some(json!({"people_trapped": 3})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        incident["report"]["additional_details"],
        json!({"people_trapped": 3})
    );

    let (_, stored) = request(
        app,
        Method::GET,
        &format!("/api/emergency/incident/{}", id),
        None,
    )
    .await;
    assert_eq!(
        stored["report"]["additional_details"],
        json!({"people_trapped": 3})
    );
}

#[tokio::test]
async fn test_active_incidents_lists_in_creation_order() {
    let app = offline_app();
    let first = submit(app.clone(), "low").await;
    let second = submit(app.clone(), "critical").await;

    let (status, body) = request(app, Method::GET, "/api/emergency/active-incidents", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_active"], 2);

    let incidents = body["incidents"].as_array().unwrap();
    assert_eq!(incidents[0]["incident_id"], first["incident_id"]);
    assert_eq!(incidents[1]["incident_id"], second["incident_id"]);
    assert_eq!(incidents[1]["priority_score"], 95);
}

#[tokio::test]
async fn test_health_reports_incident_count() {
    let app = offline_app();
    submit(app.clone(), "medium").await;

    let (status, body) = request(app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["active_incidents"], 1);
    assert!(body["version"].as_str().is_some());
}

#[tokio::test]
async fn test_index_lists_endpoints() {
    let app = offline_app();
    let (status, body) = request(app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["endpoints"]
        .as_object()
        .unwrap()
        .contains_key("POST /api/emergency/report"));
}
