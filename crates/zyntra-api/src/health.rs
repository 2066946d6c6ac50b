use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::{SecondsFormat, Utc};
use tracing::{error, warn};

use zyntra_types::api::{HealthResponse, ReadinessResponse};

use crate::state::AppState;

/// GET /healthz — liveness, never touches the database.
pub async fn healthz(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".into(),
        environment: state.environment.clone(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true),
    })
}

/// GET /readyz — 503 when the database does not answer a ping in time.
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    let db = state.db.clone();
    let ping = tokio::task::spawn_blocking(move || db.ping());

    let healthy = match tokio::time::timeout(state.ready_timeout, ping).await {
        Ok(Ok(Ok(()))) => true,
        Ok(Ok(Err(e))) => {
            warn!("readiness ping failed: {:#}", e);
            false
        }
        Ok(Err(e)) => {
            error!("spawn_blocking join error: {}", e);
            false
        }
        Err(_) => {
            warn!("readiness ping timed out after {:?}", state.ready_timeout);
            false
        }
    };

    if healthy {
        (StatusCode::OK, Json(ReadinessResponse::ready()))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadinessResponse::degraded("database_unavailable")),
        )
    }
}
