use axum::{
    Router,
    http::HeaderName,
    routing::{get, patch, post},
};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{a11y, app_state::AppState, health, links, moderation, notifications};

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        notifications::handlers::notification_counts,
        moderation::handlers::list,
        moderation::handlers::moderate,
        links::handlers::extract,
        links::handlers::check,
        a11y::skip_link_attrs,
        a11y::skip_link_css,
    ),
    components(schemas(
        health::HealthResponse,
        health::ServiceStatus,
        health::StoreStatus,
        crate::auth::dtos::ErrorResponse,
        crate::entities::Comment,
        crate::entities::CommentStatus,
        notifications::NotificationCounts,
        moderation::handlers::ModerateCommentRequest,
        links::handlers::ExtractLinksRequest,
        links::handlers::ExtractLinksResponse,
        links::handlers::CheckLinksRequest,
        links::handlers::CheckLinksResponse,
        links::LinkCheckResult,
        links::LinkStatus,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "admin", description = "Comment moderation and admin badges"),
        (name = "links", description = "Outbound link extraction and integrity checks"),
        (name = "a11y", description = "Accessibility helpers")
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Full application router with tracing and request-id layers applied.
pub fn router(state: AppState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .route("/healthz", get(health::health_check))
        .route(
            "/v1/admin/notifications",
            get(notifications::handlers::notification_counts),
        )
        .route("/v1/admin/comments", get(moderation::handlers::list))
        .route(
            "/v1/admin/comments/{id}",
            patch(moderation::handlers::moderate),
        )
        .route("/v1/links/extract", post(links::handlers::extract))
        .route("/v1/links/check", post(links::handlers::check))
        .route("/v1/a11y/skip-link", get(a11y::skip_link_attrs))
        .route("/v1/a11y/skip-link.css", get(a11y::skip_link_css))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}
