//! Error types for AERN.

use crate::incident::IncidentStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AernError {
    #[error("Incident {0} not found")]
    NotFound(String),

    #[error("Invalid status '{0}'. Must be one of ACTIVE, IN_PROGRESS, RESOLVED, CANCELLED")]
    InvalidStatus(String),

    #[error("Incident cannot move from {from} to {to}")]
    IllegalTransition {
        from: IncidentStatus,
        to: IncidentStatus,
    },

    #[error("Remote analysis unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("Malformed remote response: {0}")]
    MalformedRemoteResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AernError {
    /// HTTP status this error surfaces as. Remote failures are recovered via
    /// the fallback policy before reaching a handler, so 500 is unexpected.
    pub fn http_status(&self) -> u16 {
        match self {
            AernError::NotFound(_) => 404,
            AernError::InvalidStatus(_) => 400,
            AernError::IllegalTransition { .. } => 409,
            AernError::RemoteUnavailable(_) => 500,
            AernError::MalformedRemoteResponse(_) => 500,
            AernError::Json(_) => 500,
        }
    }
}
