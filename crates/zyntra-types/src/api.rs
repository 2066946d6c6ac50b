use serde::{Deserialize, Serialize};

// -- Probes --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub environment: String,
    /// RFC 3339, UTC, nanosecond precision.
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReadinessResponse {
    pub fn ready() -> Self {
        Self {
            status: "ready".into(),
            error: None,
        }
    }

    pub fn degraded(error: &str) -> Self {
        Self {
            status: "degraded".into(),
            error: Some(error.into()),
        }
    }
}
