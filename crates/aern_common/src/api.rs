//! REST request/response types shared between aernd and aernctl.

use crate::analysis::DispatchPlan;
use crate::incident::{IncidentStatus, IncidentSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Composed response to a report submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyResponse {
    pub incident_id: String,
    pub status: IncidentStatus,
    pub recommended_actions: Vec<String>,
    pub resources_required: Vec<String>,
    pub estimated_arrival_time: String,
    pub priority_score: u8,
    pub ai_analysis: AiAnalysis,
}

/// Condensed analysis block embedded in submission responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiAnalysis {
    pub risk_assessment: u8,
    pub escalation_needed: bool,
    pub confidence_score: u8,
    pub dispatch_plan: DispatchPlan,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveIncidentsResponse {
    pub total_active: usize,
    pub incidents: Vec<IncidentSummary>,
}

/// The status arrives as a raw string so the daemon can answer unknown
/// values with its own 400 instead of a deserialization rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateResponse {
    pub incident_id: String,
    pub status: IncidentStatus,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub timestamp: String,
    pub active_incidents: usize,
}
