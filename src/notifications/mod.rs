//! Admin notification badge counts.
//!
//! The badge must never break the admin shell, so every failure on this path
//! is logged and reported to the caller as zero. Denials are routine (the
//! badge is polled by every admin page) and log at debug; only store failures
//! log as errors.

pub mod handlers;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, instrument};
use utoipa::ToSchema;

use crate::{
    auth::{Authorizer, AuthzError, MODERATOR_ROLES},
    entities::CommentStatus,
    repositories::CommentStore,
};

/// `total` sums every notification kind; pending comments are the only kind
/// today, so it always equals `pending_comments`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationCounts {
    pub pending_comments: u64,
    pub total: u64,
}

#[derive(Debug, Error)]
enum NotificationError {
    #[error("authorization denied: {0}")]
    AuthorizationDenied(#[from] AuthzError),

    #[error("data access failure: {0:#}")]
    DataAccessFailure(anyhow::Error),
}

impl NotificationError {
    fn is_outage(&self) -> bool {
        matches!(self, NotificationError::DataAccessFailure(_))
    }
}

#[instrument(skip_all)]
pub async fn get_notification_counts(
    authz: &dyn Authorizer,
    store: &dyn CommentStore,
) -> NotificationCounts {
    match load_counts(authz, store).await {
        Ok(counts) => counts,
        Err(e) if e.is_outage() => {
            error!(error = %e, "Failed to load notification counts");
            NotificationCounts::default()
        }
        Err(e) => {
            debug!(reason = %e, "Notification counts withheld");
            NotificationCounts::default()
        }
    }
}

async fn load_counts(
    authz: &dyn Authorizer,
    store: &dyn CommentStore,
) -> Result<NotificationCounts, NotificationError> {
    authz.require_permission(&MODERATOR_ROLES).await?;

    let pending_comments = store
        .count_by_status(CommentStatus::Pending)
        .await
        .map_err(NotificationError::DataAccessFailure)?;

    Ok(NotificationCounts {
        pending_comments,
        total: pending_comments,
    })
}
