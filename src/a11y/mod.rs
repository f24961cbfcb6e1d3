//! Accessibility helpers for page templates.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::Query,
    http::header,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::IntoParams;

/// Class carried by skip links; hidden off-screen until focused.
pub const SKIP_LINK_CLASS: &str = "skip-link";

/// Stylesheet rule that gives [`SKIP_LINK_CLASS`] its behaviour. Served at
/// `/v1/a11y/skip-link.css` for templates that link it instead of inlining it.
pub const SKIP_LINK_CSS: &str = ".skip-link{position:absolute;left:-9999px;top:auto;width:1px;height:1px;overflow:hidden}\
.skip-link:focus{position:fixed;left:1rem;top:1rem;width:auto;height:auto;overflow:visible;z-index:1000}";

pub const DEFAULT_SKIP_TARGET: &str = "#main-content";
pub const DEFAULT_SKIP_LABEL: &str = "Skip to main content";

/// Attributes for a "skip to main content" anchor pointing at `target_selector`.
pub fn get_skip_link_attrs(target_selector: &str) -> BTreeMap<&'static str, String> {
    BTreeMap::from([
        ("href", target_selector.to_string()),
        ("class", SKIP_LINK_CLASS.to_string()),
    ])
}

/// Render the skip link as an `<a>` element. Attribute values and the label
/// are HTML-escaped.
pub fn render_skip_link(target_selector: &str, label: &str) -> String {
    let attrs = get_skip_link_attrs(target_selector)
        .into_iter()
        .map(|(name, value)| format!(r#" {}="{}""#, name, ammonia::clean_text(&value)))
        .collect::<String>();

    format!("<a{}>{}</a>", attrs, ammonia::clean_text(label))
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SkipLinkQuery {
    /// Defaults to `#main-content`.
    pub target: Option<String>,
}

#[utoipa::path(
    get,
    path = "/v1/a11y/skip-link",
    tag = "a11y",
    params(SkipLinkQuery),
    responses(
        (status = 200, description = "Attribute name to value map for the skip link")
    )
)]
pub async fn skip_link_attrs(
    Query(query): Query<SkipLinkQuery>,
) -> Json<BTreeMap<&'static str, String>> {
    let target = query
        .target
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_SKIP_TARGET.to_string());
    Json(get_skip_link_attrs(&target))
}

#[utoipa::path(
    get,
    path = "/v1/a11y/skip-link.css",
    tag = "a11y",
    responses(
        (status = 200, description = "Stylesheet for the skip-link class", body = String, content_type = "text/css")
    )
)]
pub async fn skip_link_css() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/css; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        SKIP_LINK_CSS,
    )
}
