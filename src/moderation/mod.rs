//! Write side of the comment moderation workflow.

pub mod handlers;

use thiserror::Error;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::{Authorizer, AuthzError, MODERATOR_ROLES},
    entities::{Comment, CommentStatus},
    repositories::CommentStore,
};

/// Largest page the moderation queue returns.
pub const MAX_QUEUE_PAGE: i64 = 200;

#[derive(Debug, Error)]
pub enum ModerationError {
    #[error(transparent)]
    Unauthorized(#[from] AuthzError),

    #[error("comments cannot be moved back to pending")]
    InvalidTransition,

    #[error("comment {0} not found")]
    NotFound(Uuid),

    #[error("comment store error: {0:#}")]
    Store(anyhow::Error),
}

/// Move a comment out of the moderation queue.
#[instrument(skip(authz, store))]
pub async fn moderate_comment(
    authz: &dyn Authorizer,
    store: &dyn CommentStore,
    id: Uuid,
    status: CommentStatus,
) -> Result<(), ModerationError> {
    authz.require_permission(&MODERATOR_ROLES).await?;

    if status == CommentStatus::Pending {
        return Err(ModerationError::InvalidTransition);
    }

    let updated = store
        .update_status(id, status)
        .await
        .map_err(ModerationError::Store)?;
    if !updated {
        return Err(ModerationError::NotFound(id));
    }

    info!(%id, ?status, "Comment moderated");
    Ok(())
}

/// Comments in `status`, oldest first. `limit` is clamped to `1..=MAX_QUEUE_PAGE`.
#[instrument(skip(authz, store))]
pub async fn list_comments(
    authz: &dyn Authorizer,
    store: &dyn CommentStore,
    status: CommentStatus,
    limit: i64,
) -> Result<Vec<Comment>, ModerationError> {
    authz.require_permission(&MODERATOR_ROLES).await?;

    store
        .list_by_status(status, limit.clamp(1, MAX_QUEUE_PAGE))
        .await
        .map_err(ModerationError::Store)
}
