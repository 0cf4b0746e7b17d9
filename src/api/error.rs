use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Server returned {status}{}", suffix(.detail))]
    Status {
        status: StatusCode,
        detail: Option<String>,
    },
    #[error("Unexpected response payload: {0}")]
    Payload(#[from] serde_json::Error),
}

fn suffix(detail: &Option<String>) -> String {
    detail
        .as_ref()
        .map(|d| format!(": {}", d))
        .unwrap_or_default()
}

/// FastAPI error envelope
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

impl ApiError {
    /// Build a status error, pulling `detail` out of the body when present
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let detail = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .map(|b| match b.detail {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            });

        ApiError::Status { status, detail }
    }

    /// Server-provided explanation, if the backend sent one
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn is_payload(&self) -> bool {
        matches!(self, ApiError::Payload(_))
    }
}

/// Log a failed action. Payload errors are logged at error level for diagnostics.
pub fn report_failure(action: &str, err: &ApiError) {
    if err.is_payload() {
        error!("✗ {} failed with unexpected payload: {}", action, err);
    } else {
        warn!("✗ {} failed: {}", action, err);
    }
}
