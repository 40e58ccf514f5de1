//! Prompt construction for the remote analysis service.

use aern_common::{AnalysisResult, EmergencyReport, Severity};
use serde_json::Value;

/// System role for the analysis call.
pub const ANALYST_SYSTEM_PROMPT: &str = "You are an expert emergency response coordinator. \
     Analyze emergency incidents and provide immediate, actionable recommendations. \
     Always respond with valid JSON.";

/// Full-report analysis prompt asking for the structured analysis schema.
pub fn build_analysis_prompt(report: &EmergencyReport) -> String {
    let details = report
        .additional_details
        .as_ref()
        .map(|d| Value::Object(d.clone()).to_string())
        .unwrap_or_else(|| "{}".to_string());

    format!(
        "Analyze this emergency incident and provide response recommendations:\n\
         \n\
         Incident Type: {}\n\
         Location: {}\n\
         Severity: {}\n\
         Description: {}\n\
         Contact: {}\n\
         Additional Details: {}\n\
         \n\
         Provide a JSON response with:\n\
         1. risk_assessment (0-100 score)\n\
         2. immediate_actions (list of recommended actions)\n\
         3. required_resources (list of needed resources)\n\
         4. estimated_response_time (in minutes)\n\
         5. alternative_locations (nearby emergency services)\n\
         6. escalation_needed (boolean)\n\
         7. confidence_score (0-100)",
        report.incident_type,
        report.location,
        report.severity,
        report.description,
        report.contact_info.as_deref().unwrap_or("N/A"),
        details,
    )
}

/// Resource listing prompt; expects a bare JSON array back.
pub fn build_resources_prompt(incident_type: &str, severity: Severity, location: &str) -> String {
    format!(
        "Based on a {severity} severity {incident_type} at {location}, \
         list the necessary emergency resources needed. \
         Respond with a JSON array of resource names."
    )
}

/// Dispatch planning prompt built from a finished analysis.
pub fn build_dispatch_prompt(analysis: &AnalysisResult, report: &EmergencyReport) -> String {
    let analysis_json = serde_json::to_string(analysis).unwrap_or_default();

    format!(
        "Create a dispatch plan for this emergency:\n\
         \n\
         Analysis: {}\n\
         Location: {}\n\
         Incident: {}\n\
         \n\
         Provide JSON with:\n\
         1. primary_dispatch (unit and ETA)\n\
         2. backup_dispatch (unit and ETA)\n\
         3. coordination_notes (list)\n\
         4. public_safety_alerts (list)\n\
         5. traffic_management (list)",
        analysis_json, report.location, report.incident_type
    )
}
