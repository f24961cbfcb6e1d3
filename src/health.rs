//! Liveness of the API and reachability of the comment store behind it.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::{app_state::AppState, repositories::CommentStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Ok,
    Degraded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StoreStatus {
    Reachable,
    Unreachable,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: ServiceStatus,
    pub comment_store: StoreStatus,
    pub version: &'static str,
}

impl HealthResponse {
    fn status_code(&self) -> StatusCode {
        match self.status {
            ServiceStatus::Ok => StatusCode::OK,
            ServiceStatus::Degraded => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Pings the comment store. The moderation queue and the admin badge both
/// read from it, so an unreachable store degrades the service.
pub async fn check_comment_store(store: &dyn CommentStore) -> HealthResponse {
    let (status, comment_store) = match store.ping().await {
        Ok(()) => {
            debug!("Comment store reachable");
            (ServiceStatus::Ok, StoreStatus::Reachable)
        }
        Err(e) => {
            error!(error = %e, "Comment store unreachable");
            (ServiceStatus::Degraded, StoreStatus::Unreachable)
        }
    };

    HealthResponse {
        status,
        comment_store,
        version: env!("CARGO_PKG_VERSION"),
    }
}

#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses(
        (status = 200, description = "Comment store reachable", body = HealthResponse),
        (status = 503, description = "Comment store unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let report = check_comment_store(state.comment_store.as_ref()).await;
    (report.status_code(), Json(report))
}
