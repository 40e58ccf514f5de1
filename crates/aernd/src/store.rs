//! In-memory incident record store.
//!
//! One store object owns the map; handlers share it behind a single RwLock
//! so concurrent mutations to an incident serialize instead of interleaving.
//! Records are never evicted.

use aern_common::{
    AernError, AnalysisResult, DispatchPlan, EmergencyReport, Incident, IncidentStatus,
    IncidentSummary,
};
use chrono::Utc;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct IncidentStore {
    incidents: HashMap<String, Incident>,
    /// Insertion order for listings.
    order: Vec<String>,
    counter: u64,
}

impl IncidentStore {
    pub fn new() -> Self {
        Self {
            incidents: HashMap::new(),
            order: Vec::new(),
            counter: 0,
        }
    }

    /// Allocate the next id and store a new ACTIVE incident. Never fails.
    pub fn create(
        &mut self,
        report: EmergencyReport,
        analysis: AnalysisResult,
        resources: Vec<String>,
        dispatch_plan: DispatchPlan,
    ) -> String {
        self.counter += 1;
        let now = Utc::now();
        let id = format!("INC-{}-{}", now.format("%Y%m%d%H%M%S"), self.counter);
        let priority_score = analysis.risk_assessment;

        let incident = Incident {
            id: id.clone(),
            report,
            status: IncidentStatus::Active,
            analysis,
            resources,
            dispatch_plan,
            priority_score,
            created_at: now,
            updated_at: now,
        };

        self.order.push(id.clone());
        self.incidents.insert(id.clone(), incident);
        id
    }

    pub fn get(&self, id: &str) -> Result<&Incident, AernError> {
        self.incidents
            .get(id)
            .ok_or_else(|| AernError::NotFound(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.incidents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.incidents.is_empty()
    }

    /// Summaries in insertion order.
    pub fn list(&self) -> Vec<IncidentSummary> {
        self.order
            .iter()
            .filter_map(|id| self.incidents.get(id))
            .map(Incident::summary)
            .collect()
    }

    /// Move an incident along the status state machine.
    pub fn update_status(
        &mut self,
        id: &str,
        next: IncidentStatus,
    ) -> Result<&Incident, AernError> {
        let incident = self
            .incidents
            .get_mut(id)
            .ok_or_else(|| AernError::NotFound(id.to_string()))?;

        if !incident.status.can_transition_to(next) {
            return Err(AernError::IllegalTransition {
                from: incident.status,
                to: next,
            });
        }

        incident.status = next;
        incident.updated_at = Utc::now();
        Ok(incident)
    }

    /// Merge extra details into the stored report and return the updated
    /// report for re-analysis.
    pub fn merge_details(
        &mut self,
        id: &str,
        extra: Map<String, Value>,
    ) -> Result<EmergencyReport, AernError> {
        let incident = self
            .incidents
            .get_mut(id)
            .ok_or_else(|| AernError::NotFound(id.to_string()))?;

        incident.report.merge_details(extra);
        incident.updated_at = Utc::now();
        Ok(incident.report.clone())
    }

    /// Replace the stored analysis and dispatch plan after re-analysis.
    pub fn replace_analysis(
        &mut self,
        id: &str,
        analysis: AnalysisResult,
        dispatch_plan: DispatchPlan,
    ) -> Result<&Incident, AernError> {
        let incident = self
            .incidents
            .get_mut(id)
            .ok_or_else(|| AernError::NotFound(id.to_string()))?;

        incident.priority_score = analysis.risk_assessment;
        incident.analysis = analysis;
        incident.dispatch_plan = dispatch_plan;
        incident.updated_at = Utc::now();
        Ok(incident)
    }
}

impl Default for IncidentStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe shared store handle
pub type SharedStore = Arc<RwLock<IncidentStore>>;

pub fn create_shared_store() -> SharedStore {
    Arc::new(RwLock::new(IncidentStore::new()))
}
