use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::error;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    app_state::AppState,
    auth::{AuthenticatedUser, AuthzError, RoleAuthorizer, dtos::ErrorResponse},
    entities::{Comment, CommentStatus},
    moderation::{ModerationError, list_comments, moderate_comment},
};

const DEFAULT_QUEUE_PAGE: i64 = 50;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ModerateCommentRequest {
    pub status: CommentStatus,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListCommentsQuery {
    /// Defaults to `PENDING`.
    pub status: Option<CommentStatus>,
    pub limit: Option<i64>,
}

impl IntoResponse for ModerationError {
    fn into_response(self) -> Response {
        let status = match &self {
            ModerationError::Unauthorized(AuthzError::Unauthenticated) => StatusCode::UNAUTHORIZED,
            ModerationError::Unauthorized(AuthzError::Forbidden(_)) => StatusCode::FORBIDDEN,
            ModerationError::InvalidTransition => StatusCode::BAD_REQUEST,
            ModerationError::NotFound(_) => StatusCode::NOT_FOUND,
            ModerationError::Store(e) => {
                error!(error = %e, "Comment store failure");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new("Database error")),
                )
                    .into_response();
            }
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

#[utoipa::path(
    get,
    path = "/v1/admin/comments",
    tag = "admin",
    params(ListCommentsQuery),
    responses(
        (status = 200, description = "Comments in the requested state, oldest first", body = [Comment]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin or editor", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn list(
    auth_user: AuthenticatedUser,
    State(state): State<AppState>,
    Query(query): Query<ListCommentsQuery>,
) -> Result<Json<Vec<Comment>>, ModerationError> {
    let comments = list_comments(
        &RoleAuthorizer::for_user(&auth_user),
        state.comment_store.as_ref(),
        query.status.unwrap_or(CommentStatus::Pending),
        query.limit.unwrap_or(DEFAULT_QUEUE_PAGE),
    )
    .await?;

    Ok(Json(comments))
}

#[utoipa::path(
    patch,
    path = "/v1/admin/comments/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Comment id")),
    request_body = ModerateCommentRequest,
    responses(
        (status = 204, description = "Comment moderated"),
        (status = 400, description = "Target status not allowed", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin or editor", body = ErrorResponse),
        (status = 404, description = "Comment not found", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn moderate(
    auth_user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ModerateCommentRequest>,
) -> Result<StatusCode, ModerationError> {
    moderate_comment(
        &RoleAuthorizer::for_user(&auth_user),
        state.comment_store.as_ref(),
        id,
        payload.status,
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}
