//! Emergency report intake types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Severity of a reported incident, driving fallback defaults and priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    /// High and critical incidents escalate and get the short response window.
    pub fn is_urgent(self) -> bool {
        matches!(self, Severity::High | Severity::Critical)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An inbound emergency report.
///
/// Immutable once analyzed, except for merge-updates to `additional_details`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyReport {
    pub incident_type: String,
    pub location: String,
    pub description: String,
    pub severity: Severity,
    /// ISO-8601; filled in at submission when absent.
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub contact_info: Option<String>,
    #[serde(default)]
    pub additional_details: Option<Map<String, Value>>,
}

impl EmergencyReport {
    /// Shallow merge of new details into the report; new keys overwrite.
    pub fn merge_details(&mut self, extra: Map<String, Value>) {
        match &mut self.additional_details {
            Some(existing) => existing.extend(extra),
            None => self.additional_details = Some(extra),
        }
    }
}
