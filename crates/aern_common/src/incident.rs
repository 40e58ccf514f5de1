//! Incident records and the status state machine.

use crate::analysis::{AnalysisResult, DispatchPlan};
use crate::error::AernError;
use crate::report::EmergencyReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a tracked incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncidentStatus {
    Active,
    InProgress,
    Resolved,
    Cancelled,
}

impl IncidentStatus {
    pub const ALL: [IncidentStatus; 4] = [
        IncidentStatus::Active,
        IncidentStatus::InProgress,
        IncidentStatus::Resolved,
        IncidentStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            IncidentStatus::Active => "ACTIVE",
            IncidentStatus::InProgress => "IN_PROGRESS",
            IncidentStatus::Resolved => "RESOLVED",
            IncidentStatus::Cancelled => "CANCELLED",
        }
    }

    /// Legal transitions. Repeating the current status is a no-op;
    /// RESOLVED and CANCELLED are terminal.
    pub fn can_transition_to(self, next: IncidentStatus) -> bool {
        use IncidentStatus::*;
        self == next
            || matches!(
                (self, next),
                (Active, InProgress)
                    | (Active, Cancelled)
                    | (InProgress, Resolved)
                    | (InProgress, Cancelled)
            )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, IncidentStatus::Resolved | IncidentStatus::Cancelled)
    }
}

impl FromStr for IncidentStatus {
    type Err = AernError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(IncidentStatus::Active),
            "IN_PROGRESS" => Ok(IncidentStatus::InProgress),
            "RESOLVED" => Ok(IncidentStatus::Resolved),
            "CANCELLED" => Ok(IncidentStatus::Cancelled),
            other => Err(AernError::InvalidStatus(other.to_string())),
        }
    }
}

impl fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tracked emergency report plus its current AI-derived analysis and status.
///
/// Owned exclusively by the incident store. Created on submission, mutated in
/// place on status or analysis updates, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Incident {
    pub id: String,
    pub report: EmergencyReport,
    pub status: IncidentStatus,
    pub analysis: AnalysisResult,
    /// Resource recommendation from submission time; not refreshed on
    /// re-analysis.
    pub resources: Vec<String>,
    pub dispatch_plan: DispatchPlan,
    pub priority_score: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Incident {
    pub fn summary(&self) -> IncidentSummary {
        IncidentSummary {
            incident_id: self.id.clone(),
            priority_score: self.priority_score,
            status: self.status,
            created_at: self.created_at,
        }
    }
}

/// Compact incident view for listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentSummary {
    pub incident_id: String,
    pub priority_score: u8,
    pub status: IncidentStatus,
    pub created_at: DateTime<Utc>,
}
