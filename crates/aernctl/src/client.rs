//! HTTP client for talking to aernd.

use aern_common::{
    ActiveIncidentsResponse, EmergencyReport, EmergencyResponse, HealthResponse, Incident,
    StatusUpdateRequest, StatusUpdateResponse,
};
use anyhow::{anyhow, Result};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Client for the aernd REST API
pub struct AernClient {
    base_url: String,
    client: reqwest::Client,
}

impl AernClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Submit an emergency report
    pub async fn submit_report(&self, report: &EmergencyReport) -> Result<EmergencyResponse> {
        let response = self
            .client
            .post(format!("{}/api/emergency/report", self.base_url))
            .json(report)
            .send()
            .await
            .map_err(connect_error)?;
        Self::decode(response).await
    }

    /// Fetch a stored incident
    pub async fn incident(&self, id: &str) -> Result<Incident> {
        let response = self
            .client
            .get(format!("{}/api/emergency/incident/{}", self.base_url, id))
            .send()
            .await
            .map_err(connect_error)?;
        Self::decode(response).await
    }

    /// List tracked incidents
    pub async fn active_incidents(&self) -> Result<ActiveIncidentsResponse> {
        let response = self
            .client
            .get(format!("{}/api/emergency/active-incidents", self.base_url))
            .send()
            .await
            .map_err(connect_error)?;
        Self::decode(response).await
    }

    /// Move an incident to a new status
    pub async fn update_status(&self, id: &str, status: &str) -> Result<StatusUpdateResponse> {
        let response = self
            .client
            .put(format!(
                "{}/api/emergency/incident/{}/status",
                self.base_url, id
            ))
            .json(&StatusUpdateRequest {
                status: status.to_string(),
            })
            .send()
            .await
            .map_err(connect_error)?;
        Self::decode(response).await
    }

    /// Merge new details into an incident and re-run its analysis
    pub async fn update_analysis(&self, id: &str, details: &Map<String, Value>) -> Result<Incident> {
        let response = self
            .client
            .post(format!(
                "{}/api/emergency/update-analysis/{}",
                self.base_url, id
            ))
            .json(details)
            .send()
            .await
            .map_err(connect_error)?;
        Self::decode(response).await
    }

    /// Daemon health
    pub async fn health(&self) -> Result<HealthResponse> {
        let response = self
            .client
            .get(format!("{}/api/health", self.base_url))
            .send()
            .await
            .map_err(connect_error)?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let detail = response.text().await.unwrap_or_default();
            Err(anyhow!("Daemon returned {}: {}", status, detail))
        }
    }
}

fn connect_error(e: reqwest::Error) -> anyhow::Error {
    anyhow!(
        "Cannot reach the AERN daemon: {}\n\n\
         Is aernd running? Start it with:\n  aernd",
        e
    )
}
