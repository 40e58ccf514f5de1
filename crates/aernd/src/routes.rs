//! API routes for aernd.

use crate::server::AppState;
use aern_common::{
    ActiveIncidentsResponse, AernError, EmergencyReport, EmergencyResponse, HealthResponse,
    Incident, IncidentStatus, StatusUpdateRequest, StatusUpdateResponse, SERVICE_NAME,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::info;

type AppStateArc = Arc<AppState>;

fn error_response(err: AernError) -> (StatusCode, String) {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, err.to_string())
}

// ============================================================================
// Emergency Routes
// ============================================================================

pub fn emergency_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/api/emergency/report", post(submit_report))
        .route("/api/emergency/incident/:id", get(get_incident))
        .route("/api/emergency/active-incidents", get(active_incidents))
        .route("/api/emergency/incident/:id/status", put(update_status))
        .route("/api/emergency/update-analysis/:id", post(update_analysis))
}

async fn submit_report(
    State(state): State<AppStateArc>,
    Json(report): Json<EmergencyReport>,
) -> Result<Json<EmergencyResponse>, (StatusCode, String)> {
    info!(
        "[RPT]  {} at {} ({})",
        report.incident_type, report.location, report.severity
    );

    let response = state
        .coordinator
        .submit(&state.store, report)
        .await
        .map_err(error_response)?;
    Ok(Json(response))
}

async fn get_incident(
    State(state): State<AppStateArc>,
    Path(id): Path<String>,
) -> Result<Json<Incident>, (StatusCode, String)> {
    let store = state.store.read().await;
    let incident = store.get(&id).map_err(error_response)?;
    Ok(Json(incident.clone()))
}

async fn active_incidents(State(state): State<AppStateArc>) -> Json<ActiveIncidentsResponse> {
    let store = state.store.read().await;
    let incidents = store.list();
    Json(ActiveIncidentsResponse {
        total_active: incidents.len(),
        incidents,
    })
}

async fn update_status(
    State(state): State<AppStateArc>,
    Path(id): Path<String>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<Json<StatusUpdateResponse>, (StatusCode, String)> {
    let next: IncidentStatus = req.status.parse().map_err(error_response)?;

    let mut store = state.store.write().await;
    let incident = store.update_status(&id, next).map_err(error_response)?;
    info!("[INC]  {} -> {}", incident.id, incident.status);

    Ok(Json(StatusUpdateResponse {
        incident_id: incident.id.clone(),
        status: incident.status,
        updated_at: incident.updated_at,
    }))
}

async fn update_analysis(
    State(state): State<AppStateArc>,
    Path(id): Path<String>,
    Json(extra): Json<Map<String, Value>>,
) -> Result<Json<Incident>, (StatusCode, String)> {
    let incident = state
        .coordinator
        .reanalyze(&state.store, &id, extra)
        .await
        .map_err(error_response)?;
    Ok(Json(incident))
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health_check))
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    let store = state.store.read().await;
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        timestamp: Utc::now().to_rfc3339(),
        active_incidents: store.len(),
    })
}

async fn index() -> Json<Value> {
    Json(json!({
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "POST /api/emergency/report": "Submit emergency report",
            "GET /api/emergency/incident/{id}": "Get incident details",
            "GET /api/emergency/active-incidents": "Get all active incidents",
            "PUT /api/emergency/incident/{id}/status": "Update incident status",
            "POST /api/emergency/update-analysis/{id}": "Merge new details and re-run analysis",
            "GET /api/health": "Health check",
        },
    }))
}
