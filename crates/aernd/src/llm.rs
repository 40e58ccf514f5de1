//! Remote chat-completion client for incident analysis.
//!
//! Every call is a single bounded round trip. Failures come back as typed
//! `RemoteError` values; the lifecycle coordinator decides what to
//! substitute.

use crate::config::RemoteConfig;
use crate::prompts;
use aern_common::{AnalysisResult, DispatchPlan, DispatchUnit, EmergencyReport, Severity};
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

// Sampling parameters are fixed per operation.
const ANALYSIS_TEMPERATURE: f64 = 0.7;
const ANALYSIS_MAX_TOKENS: u32 = 1000;
const RESOURCES_TEMPERATURE: f64 = 0.5;
const RESOURCES_MAX_TOKENS: u32 = 200;
const DISPATCH_TEMPERATURE: f64 = 0.6;
const DISPATCH_MAX_TOKENS: u32 = 500;

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("remote returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl RemoteError {
    /// Malformed content gets the canned parse fallback; transport and HTTP
    /// failures get the severity-keyed one.
    pub fn is_malformed(&self) -> bool {
        matches!(self, RemoteError::Malformed(_))
    }
}

/// Client for the remote completion endpoint.
pub struct AnalysisClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl AnalysisClient {
    pub fn new(config: &RemoteConfig) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: std::env::var(&config.api_key_env).ok(),
        })
    }

    /// Reachability probe. Any response counts; the daemon keeps running on
    /// fallbacks when this fails.
    pub async fn ping(&self) -> bool {
        self.client.get(&self.base_url).send().await.is_ok()
    }

    /// Analyze an emergency report into a structured assessment.
    pub async fn analyze(&self, report: &EmergencyReport) -> Result<AnalysisResult, RemoteError> {
        let messages = json!([
            {"role": "system", "content": prompts::ANALYST_SYSTEM_PROMPT},
            {"role": "user", "content": prompts::build_analysis_prompt(report)},
        ]);

        let content = self
            .complete(messages, ANALYSIS_TEMPERATURE, ANALYSIS_MAX_TOKENS)
            .await?;
        parse_analysis(&content)
    }

    /// Ask for a resource list for the given incident shape.
    pub async fn recommend_resources(
        &self,
        incident_type: &str,
        severity: Severity,
        location: &str,
    ) -> Result<Vec<String>, RemoteError> {
        let messages = json!([
            {"role": "user", "content": prompts::build_resources_prompt(incident_type, severity, location)},
        ]);

        let content = self
            .complete(messages, RESOURCES_TEMPERATURE, RESOURCES_MAX_TOKENS)
            .await?;
        parse_resources(&content)
    }

    /// Turn a finished analysis into a dispatch plan.
    pub async fn dispatch_plan(
        &self,
        analysis: &AnalysisResult,
        report: &EmergencyReport,
    ) -> Result<DispatchPlan, RemoteError> {
        let messages = json!([
            {"role": "user", "content": prompts::build_dispatch_prompt(analysis, report)},
        ]);

        let content = self
            .complete(messages, DISPATCH_TEMPERATURE, DISPATCH_MAX_TOKENS)
            .await?;
        parse_dispatch_plan(&content)
    }

    /// One completion round trip; returns the raw assistant message text.
    async fn complete(
        &self,
        messages: Value,
        temperature: f64,
        max_tokens: u32,
    ) -> Result<String, RemoteError> {
        let body = json!({
            "model": self.model,
            "messages": messages,
            "temperature": temperature,
            "max_tokens": max_tokens,
        });

        let mut request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(RemoteError::Status(response.status()));
        }

        let payload: Value = response.json().await?;
        let content = payload
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .ok_or_else(|| RemoteError::Malformed("no message content in completion".to_string()))?;

        debug!("Completion returned {} chars", content.len());
        Ok(content.to_string())
    }
}

/// Strip optional markdown code fences around a JSON payload.
fn extract_json(content: &str) -> &str {
    let trimmed = content.trim();
    if trimmed.starts_with("```") {
        trimmed
            .strip_prefix("```json")
            .or_else(|| trimmed.strip_prefix("```"))
            .and_then(|s| s.rsplit_once("```").map(|(inner, _)| inner))
            .map(str::trim)
            .unwrap_or(trimmed)
    } else {
        trimmed
    }
}

/// Clamp an arbitrary JSON value into a 0-100 score.
fn score_from(value: Option<&Value>, default: u8) -> u8 {
    value
        .and_then(Value::as_i64)
        .map(|v| v.clamp(0, 100) as u8)
        .unwrap_or(default)
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

fn parse_analysis(content: &str) -> Result<AnalysisResult, RemoteError> {
    let value: Value =
        serde_json::from_str(extract_json(content)).map_err(|e| RemoteError::Malformed(e.to_string()))?;

    Ok(AnalysisResult {
        risk_assessment: score_from(value.get("risk_assessment"), 50),
        immediate_actions: string_list(value.get("immediate_actions")),
        required_resources: string_list(value.get("required_resources")),
        estimated_response_time: value
            .get("estimated_response_time")
            .and_then(Value::as_u64)
            .unwrap_or(5) as u32,
        escalation_needed: value
            .get("escalation_needed")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        confidence_score: score_from(value.get("confidence_score"), 70),
    })
}

fn parse_resources(content: &str) -> Result<Vec<String>, RemoteError> {
    let value: Value =
        serde_json::from_str(extract_json(content)).map_err(|e| RemoteError::Malformed(e.to_string()))?;

    match value {
        Value::Array(items) => Ok(items
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect()),
        _ => Err(RemoteError::Malformed(
            "expected a JSON array of resource names".to_string(),
        )),
    }
}

fn dispatch_unit(value: Option<&Value>, default_unit: &str, default_eta: &str) -> DispatchUnit {
    DispatchUnit {
        unit: value
            .and_then(|v| v.get("unit"))
            .and_then(Value::as_str)
            .unwrap_or(default_unit)
            .to_string(),
        eta: value
            .and_then(|v| v.get("eta"))
            .and_then(Value::as_str)
            .unwrap_or(default_eta)
            .to_string(),
    }
}

fn parse_dispatch_plan(content: &str) -> Result<DispatchPlan, RemoteError> {
    let value: Value =
        serde_json::from_str(extract_json(content)).map_err(|e| RemoteError::Malformed(e.to_string()))?;

    Ok(DispatchPlan {
        primary_dispatch: dispatch_unit(value.get("primary_dispatch"), "Unit-1", "5 minutes"),
        backup_dispatch: dispatch_unit(value.get("backup_dispatch"), "Unit-2", "8 minutes"),
        coordination_notes: string_list(value.get("coordination_notes")),
        public_safety_alerts: string_list(value.get("public_safety_alerts")),
        traffic_management: string_list(value.get("traffic_management")),
    })
}
