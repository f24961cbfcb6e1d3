use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::{
    app_state::AppState,
    auth::{AuthenticatedUser, Authorizer, MODERATOR_ROLES, RoleAuthorizer, dtos::ErrorResponse},
    links::{LinkCheckResult, extract_links},
};

/// Upper bound on URLs accepted by a single check request.
const MAX_URLS_PER_CHECK: usize = 500;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ExtractLinksRequest {
    pub html: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExtractLinksResponse {
    pub links: Vec<String>,
}

/// Either an HTML fragment to scan or an explicit URL list, not both.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckLinksRequest {
    pub html: Option<String>,
    pub urls: Option<Vec<String>>,
}

impl CheckLinksRequest {
    pub fn into_urls(self) -> Result<Vec<String>, String> {
        let urls = match (self.html, self.urls) {
            (Some(html), None) => extract_links(&html),
            (None, Some(urls)) => urls,
            (Some(_), Some(_)) => return Err("Provide either html or urls, not both".to_string()),
            (None, None) => return Err("Provide html or urls".to_string()),
        };

        if urls.len() > MAX_URLS_PER_CHECK {
            return Err(format!(
                "Too many links: {} (max {})",
                urls.len(),
                MAX_URLS_PER_CHECK
            ));
        }
        Ok(urls)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CheckLinksResponse {
    pub results: Vec<LinkCheckResult>,
}

#[utoipa::path(
    post,
    path = "/v1/links/extract",
    tag = "links",
    request_body = ExtractLinksRequest,
    responses(
        (status = 200, description = "Unique external links in first-appearance order", body = ExtractLinksResponse)
    )
)]
pub async fn extract(Json(payload): Json<ExtractLinksRequest>) -> Json<ExtractLinksResponse> {
    Json(ExtractLinksResponse {
        links: extract_links(&payload.html),
    })
}

#[utoipa::path(
    post,
    path = "/v1/links/check",
    tag = "links",
    request_body = CheckLinksRequest,
    responses(
        (status = 200, description = "Per-link reachability", body = CheckLinksResponse),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin or editor", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn check(
    auth_user: AuthenticatedUser,
    State(state): State<AppState>,
    Json(payload): Json<CheckLinksRequest>,
) -> Response {
    if let Err(e) = RoleAuthorizer::for_user(&auth_user)
        .require_permission(&MODERATOR_ROLES)
        .await
    {
        warn!(user_id = %auth_user.user_id, error = %e, "Link check refused");
        return (StatusCode::FORBIDDEN, Json(ErrorResponse::new(e.to_string()))).into_response();
    }

    let urls = match payload.into_urls() {
        Ok(urls) => urls,
        Err(error) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response();
        }
    };

    let results = state.link_checker.check_links(urls).await;
    Json(CheckLinksResponse { results }).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_request_from_html() {
        let request = CheckLinksRequest {
            html: Some(r#"<a href="https://a.example">a</a><a href="/local">l</a>"#.to_string()),
            urls: None,
        };
        assert_eq!(request.into_urls().unwrap(), vec!["https://a.example"]);
    }

    #[test]
    fn test_check_request_requires_exactly_one_source() {
        let neither = CheckLinksRequest {
            html: None,
            urls: None,
        };
        assert!(neither.into_urls().is_err());

        let both = CheckLinksRequest {
            html: Some(String::new()),
            urls: Some(vec![]),
        };
        assert!(both.into_urls().is_err());
    }

    #[test]
    fn test_check_request_caps_url_count() {
        let request = CheckLinksRequest {
            html: None,
            urls: Some(vec!["https://x.example".to_string(); MAX_URLS_PER_CHECK + 1]),
        };
        assert!(request.into_urls().unwrap_err().starts_with("Too many links"));
    }
}
