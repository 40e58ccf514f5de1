//! Terminal rendering for aernctl output.

use aern_common::{
    ActiveIncidentsResponse, EmergencyResponse, HealthResponse, Incident, IncidentStatus, Severity,
};
use owo_colors::OwoColorize;

pub fn status_label(status: IncidentStatus) -> String {
    match status {
        IncidentStatus::Active => status.as_str().red().to_string(),
        IncidentStatus::InProgress => status.as_str().yellow().to_string(),
        IncidentStatus::Resolved => status.as_str().green().to_string(),
        IncidentStatus::Cancelled => status.as_str().dimmed().to_string(),
    }
}

fn severity_label(severity: Severity) -> String {
    match severity {
        Severity::Low => severity.as_str().green().to_string(),
        Severity::Medium => severity.as_str().yellow().to_string(),
        Severity::High => severity.as_str().red().to_string(),
        Severity::Critical => severity.as_str().red().bold().to_string(),
    }
}

pub fn print_emergency_response(response: &EmergencyResponse) {
    println!(
        "{}  {}  priority {}/100",
        response.incident_id.bold(),
        status_label(response.status),
        response.priority_score
    );
    println!("ETA: {}", response.estimated_arrival_time);

    if !response.recommended_actions.is_empty() {
        println!("Actions:");
        for action in &response.recommended_actions {
            println!("  - {}", action);
        }
    }
    if !response.resources_required.is_empty() {
        println!("Resources:");
        for resource in &response.resources_required {
            println!("  - {}", resource);
        }
    }

    let plan = &response.ai_analysis.dispatch_plan;
    println!(
        "Dispatch: {} ({}), backup {} ({})",
        plan.primary_dispatch.unit,
        plan.primary_dispatch.eta,
        plan.backup_dispatch.unit,
        plan.backup_dispatch.eta
    );
}

pub fn print_incident(incident: &Incident) {
    println!(
        "{}  {}  priority {}/100",
        incident.id.bold(),
        status_label(incident.status),
        incident.priority_score
    );
    println!(
        "{} ({}) at {}",
        incident.report.incident_type,
        severity_label(incident.report.severity),
        incident.report.location
    );
    println!("{}", incident.report.description);

    if let Some(details) = &incident.report.additional_details {
        println!("Details:");
        for (key, value) in details {
            println!("  {} = {}", key, value);
        }
    }

    println!(
        "Risk {} / confidence {} / ETA {} minutes",
        incident.analysis.risk_assessment,
        incident.analysis.confidence_score,
        incident.analysis.estimated_response_time
    );
    for action in &incident.analysis.immediate_actions {
        println!("  - {}", action);
    }
    println!(
        "Created {}  Updated {}",
        incident.created_at.to_rfc3339(),
        incident.updated_at.to_rfc3339()
    );
}

pub fn print_listing(listing: &ActiveIncidentsResponse) {
    if listing.incidents.is_empty() {
        println!("No tracked incidents");
        return;
    }

    println!("{} tracked incident(s)", listing.total_active);
    for summary in &listing.incidents {
        println!(
            "  {}  {}  priority {:>3}  {}",
            summary.incident_id.bold(),
            status_label(summary.status),
            summary.priority_score,
            summary.created_at.to_rfc3339()
        );
    }
}

pub fn print_health(health: &HealthResponse) {
    println!(
        "{} v{}: {}",
        health.service,
        health.version,
        health.status.green()
    );
    println!(
        "Uptime {}s, {} tracked incident(s)",
        health.uptime_seconds, health.active_incidents
    );
}
