//! Incident lifecycle orchestration.
//!
//! Submission runs analysis, resource lookup, and dispatch planning against
//! the remote service, substituting a fallback per failure class. Remote
//! failures never abort a submission.

use crate::fallback;
use crate::llm::AnalysisClient;
use crate::store::SharedStore;
use aern_common::{
    AernError, AiAnalysis, AnalysisResult, DispatchPlan, EmergencyReport, EmergencyResponse,
    Incident,
};
use chrono::Utc;
use serde_json::{Map, Value};
use tracing::{info, warn};

pub struct LifecycleCoordinator {
    llm: AnalysisClient,
}

impl LifecycleCoordinator {
    pub fn new(llm: AnalysisClient) -> Self {
        Self { llm }
    }

    /// Full submission flow: analysis, resource lookup, dispatch planning,
    /// record creation.
    pub async fn submit(
        &self,
        store: &SharedStore,
        mut report: EmergencyReport,
    ) -> Result<EmergencyResponse, AernError> {
        if report.timestamp.is_none() {
            report.timestamp = Some(Utc::now().to_rfc3339());
        }

        let analysis = self.analyze_or_fallback(&report).await;

        let resources = match self
            .llm
            .recommend_resources(&report.incident_type, report.severity, &report.location)
            .await
        {
            Ok(resources) => resources,
            Err(e) => {
                warn!("Resource recommendation failed, using severity defaults: {}", e);
                fallback::resources_for(report.severity)
            }
        };

        let dispatch_plan = self.plan_or_fallback(&analysis, &report).await;

        let mut store = store.write().await;
        let id = store.create(report, analysis, resources, dispatch_plan);
        let incident = store.get(&id)?;

        info!(
            "[INC]  {} created, priority {}",
            incident.id, incident.priority_score
        );

        Ok(EmergencyResponse {
            incident_id: incident.id.clone(),
            status: incident.status,
            recommended_actions: incident.analysis.immediate_actions.clone(),
            resources_required: incident.resources.clone(),
            estimated_arrival_time: format!("{} minutes", incident.analysis.estimated_response_time),
            priority_score: incident.priority_score,
            ai_analysis: AiAnalysis {
                risk_assessment: incident.analysis.risk_assessment,
                escalation_needed: incident.analysis.escalation_needed,
                confidence_score: incident.analysis.confidence_score,
                dispatch_plan: incident.dispatch_plan.clone(),
            },
        })
    }

    /// Merge new details into an incident and refresh its analysis and
    /// dispatch plan. Resource recommendations are not refreshed.
    pub async fn reanalyze(
        &self,
        store: &SharedStore,
        id: &str,
        extra: Map<String, Value>,
    ) -> Result<Incident, AernError> {
        // Merge atomically, then run the remote calls without the lock held.
        let report = {
            let mut store = store.write().await;
            store.merge_details(id, extra)?
        };

        let analysis = self.analyze_or_fallback(&report).await;
        let dispatch_plan = self.plan_or_fallback(&analysis, &report).await;

        let mut store = store.write().await;
        let incident = store.replace_analysis(id, analysis, dispatch_plan)?;
        info!(
            "[INC]  {} re-analyzed, priority {}",
            incident.id, incident.priority_score
        );
        Ok(incident.clone())
    }

    async fn analyze_or_fallback(&self, report: &EmergencyReport) -> AnalysisResult {
        match self.llm.analyze(report).await {
            Ok(analysis) => analysis,
            Err(e) if e.is_malformed() => {
                warn!("Analysis response unparseable, using canned analysis: {}", e);
                fallback::canned_analysis()
            }
            Err(e) => {
                warn!("Remote analysis failed, using severity fallback: {}", e);
                fallback::analysis_for(report.severity)
            }
        }
    }

    async fn plan_or_fallback(
        &self,
        analysis: &AnalysisResult,
        report: &EmergencyReport,
    ) -> DispatchPlan {
        match self.llm.dispatch_plan(analysis, report).await {
            Ok(plan) => plan,
            Err(e) => {
                warn!("Dispatch planning failed, using static plan: {}", e);
                fallback::dispatch_plan()
            }
        }
    }
}
