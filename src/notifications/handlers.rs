use axum::{Json, extract::State};

use crate::{
    app_state::AppState,
    auth::{AuthError, AuthenticatedUser, RoleAuthorizer},
    notifications::{NotificationCounts, get_notification_counts},
};

/// Always answers 200; callers without a moderator token just see zeros.
#[utoipa::path(
    get,
    path = "/v1/admin/notifications",
    tag = "admin",
    responses(
        (status = 200, description = "Notification badge counts", body = NotificationCounts)
    ),
    security((), ("bearer" = []))
)]
pub async fn notification_counts(
    State(state): State<AppState>,
    caller: Result<AuthenticatedUser, AuthError>,
) -> Json<NotificationCounts> {
    let authz = RoleAuthorizer::from_caller(caller.ok());
    Json(get_notification_counts(&authz, state.comment_store.as_ref()).await)
}
