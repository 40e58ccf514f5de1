//! Shared types for AERN components.
//!
//! Domain model (reports, analyses, incidents), REST DTOs, and the error
//! taxonomy used by both the daemon and the CLI.

pub mod analysis;
pub mod api;
pub mod error;
pub mod incident;
pub mod report;

pub use analysis::{AnalysisResult, DispatchPlan, DispatchUnit};
pub use api::{
    ActiveIncidentsResponse, AiAnalysis, EmergencyResponse, HealthResponse, StatusUpdateRequest,
    StatusUpdateResponse,
};
pub use error::AernError;
pub use incident::{Incident, IncidentStatus, IncidentSummary};
pub use report::{EmergencyReport, Severity};

/// Service name reported by the health endpoint.
pub const SERVICE_NAME: &str = "AERN Emergency Response";

/// Default daemon bind address.
pub const DEFAULT_API_ADDR: &str = "127.0.0.1:8700";
