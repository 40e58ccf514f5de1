//! Static fallbacks used when the remote analysis service cannot answer.
//!
//! Deterministic substitutes keyed on severity. This is the pipeline's only
//! failure recovery; remote calls are never retried.

use aern_common::{AnalysisResult, DispatchPlan, DispatchUnit, Severity};

/// Risk score substitute by severity.
pub fn risk_for(severity: Severity) -> u8 {
    match severity {
        Severity::Critical => 95,
        Severity::High => 75,
        Severity::Medium => 50,
        Severity::Low => 25,
    }
}

/// Default resource set by severity.
pub fn resources_for(severity: Severity) -> Vec<String> {
    let resources: &[&str] = match severity {
        Severity::Critical => &["Ambulance", "Fire truck", "Police units", "Hazmat team"],
        Severity::High => &["Ambulance", "Fire truck", "Police unit"],
        Severity::Medium => &["Ambulance", "Police unit"],
        Severity::Low => &["Standard ambulance"],
    };
    resources.iter().map(|r| r.to_string()).collect()
}

/// Severity-keyed analysis used when the remote call fails outright.
pub fn analysis_for(severity: Severity) -> AnalysisResult {
    AnalysisResult {
        risk_assessment: risk_for(severity),
        immediate_actions: vec![
            "Scene assessment".to_string(),
            "Emergency services coordination".to_string(),
            "Public safety measures".to_string(),
        ],
        required_resources: vec![
            "Ambulance".to_string(),
            "Fire Department".to_string(),
            "Police".to_string(),
        ],
        estimated_response_time: if severity.is_urgent() { 5 } else { 10 },
        escalation_needed: severity.is_urgent(),
        confidence_score: 70,
    }
}

/// Canned analysis used when the remote answered but the content was not
/// parseable JSON.
pub fn canned_analysis() -> AnalysisResult {
    AnalysisResult {
        risk_assessment: 75,
        immediate_actions: vec![
            "Assess scene safety".to_string(),
            "Call for additional units".to_string(),
        ],
        required_resources: vec![
            "Ambulance".to_string(),
            "Fire truck".to_string(),
            "Police unit".to_string(),
        ],
        estimated_response_time: 8,
        escalation_needed: true,
        confidence_score: 60,
    }
}

/// Static dispatch plan.
pub fn dispatch_plan() -> DispatchPlan {
    DispatchPlan {
        primary_dispatch: DispatchUnit {
            unit: "Unit-1".to_string(),
            eta: "5 minutes".to_string(),
        },
        backup_dispatch: DispatchUnit {
            unit: "Unit-2".to_string(),
            eta: "8 minutes".to_string(),
        },
        coordination_notes: vec![
            "Scene assessment priority".to_string(),
            "Communication with caller".to_string(),
            "Traffic management".to_string(),
        ],
        public_safety_alerts: vec!["Road closure notice".to_string()],
        traffic_management: vec!["Redirect traffic".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_table() {
        assert_eq!(risk_for(Severity::Critical), 95);
        assert_eq!(risk_for(Severity::High), 75);
        assert_eq!(risk_for(Severity::Medium), 50);
        assert_eq!(risk_for(Severity::Low), 25);
    }

    #[test]
    fn test_resource_table() {
        assert_eq!(
            resources_for(Severity::Critical),
            vec!["Ambulance", "Fire truck", "Police units", "Hazmat team"]
        );
        assert_eq!(
            resources_for(Severity::High),
            vec!["Ambulance", "Fire truck", "Police unit"]
        );
        assert_eq!(resources_for(Severity::Medium), vec!["Ambulance", "Police unit"]);
        assert_eq!(resources_for(Severity::Low), vec!["Standard ambulance"]);
    }

    #[test]
    fn test_analysis_matches_risk_table() {
        for severity in Severity::ALL {
            let analysis = analysis_for(severity);
            assert_eq!(analysis.risk_assessment, risk_for(severity));
            assert!(analysis.risk_assessment <= 100);
            assert_eq!(analysis.confidence_score, 70);
        }
    }

    #[test]
    fn test_urgent_severities_escalate_with_short_window() {
        for severity in [Severity::High, Severity::Critical] {
            let analysis = analysis_for(severity);
            assert!(analysis.escalation_needed);
            assert_eq!(analysis.estimated_response_time, 5);
        }
        for severity in [Severity::Low, Severity::Medium] {
            let analysis = analysis_for(severity);
            assert!(!analysis.escalation_needed);
            assert_eq!(analysis.estimated_response_time, 10);
        }
    }

    #[test]
    fn test_canned_analysis_is_fixed() {
        let analysis = canned_analysis();
        assert_eq!(analysis.risk_assessment, 75);
        assert_eq!(analysis.estimated_response_time, 8);
        assert!(analysis.escalation_needed);
        assert_eq!(analysis.confidence_score, 60);
    }

    #[test]
    fn test_static_dispatch_plan() {
        let plan = dispatch_plan();
        assert_eq!(plan.primary_dispatch.unit, "Unit-1");
        assert_eq!(plan.primary_dispatch.eta, "5 minutes");
        assert_eq!(plan.backup_dispatch.unit, "Unit-2");
        assert_eq!(plan.coordination_notes.len(), 3);
    }
}
