//! AI analysis and dispatch plan types.

use serde::{Deserialize, Serialize};

/// Structured result of a remote analysis call.
///
/// Produced fresh on every analysis; never partially mutated. Scores are
/// clamped to 0-100 when the remote response is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub risk_assessment: u8,
    pub immediate_actions: Vec<String>,
    pub required_resources: Vec<String>,
    /// Minutes until responders are expected on scene.
    pub estimated_response_time: u32,
    pub escalation_needed: bool,
    pub confidence_score: u8,
}

/// A response unit plus its estimated arrival.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchUnit {
    pub unit: String,
    pub eta: String,
}

/// Recommendation of which units to send and with what coordination notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchPlan {
    pub primary_dispatch: DispatchUnit,
    pub backup_dispatch: DispatchUnit,
    pub coordination_notes: Vec<String>,
    pub public_safety_alerts: Vec<String>,
    pub traffic_management: Vec<String>,
}
