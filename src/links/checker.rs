use std::time::Duration;

use futures::stream::{self, StreamExt};
use reqwest::{Client, ClientBuilder, Response, StatusCode, header::LOCATION, redirect::Policy};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use url::Url;
use utoipa::ToSchema;

use crate::{config::Config, links::extract::extract_links};

const USER_AGENT: &str = "EatSmartDailyLinkChecker/0.1 (+https://eatsmartdaily.com)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LinkStatus {
    /// 2xx
    Ok,
    /// 3xx; redirects are reported, not followed
    Redirect,
    /// 4xx or 5xx
    Broken,
    Timeout,
    /// Invalid URL, DNS, TLS, connection refused, ...
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinkCheckResult {
    pub url: String,
    pub status: LinkStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LinkCheckResult {
    fn failed(url: String, status: LinkStatus, message: String) -> Self {
        Self {
            url,
            status,
            http_status: None,
            location: None,
            message: Some(message),
        }
    }

    /// `true` for links that resolve (directly or through a redirect).
    pub fn is_ok(&self) -> bool {
        matches!(self.status, LinkStatus::Ok | LinkStatus::Redirect)
    }
}

/// Checks that outbound links on a page still resolve.
///
/// One client is shared by every check so connections are pooled.
#[derive(Clone)]
pub struct LinkChecker {
    client: Client,
    concurrency: usize,
}

impl LinkChecker {
    pub fn new(timeout: Duration, concurrency: usize) -> reqwest::Result<Self> {
        let client = ClientBuilder::new()
            .connect_timeout(timeout)
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .redirect(Policy::none())
            .build()?;

        Ok(Self {
            client,
            concurrency: concurrency.max(1),
        })
    }

    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        Self::new(config.link_check_timeout(), config.link_check_concurrency())
    }

    /// Check every URL, at most `concurrency` at a time. Results keep the
    /// order of `urls`.
    #[instrument(skip_all, fields(count = urls.len()))]
    pub async fn check_links(&self, urls: Vec<String>) -> Vec<LinkCheckResult> {
        let results: Vec<LinkCheckResult> = stream::iter(urls)
            .map(|url| self.check_link(url))
            .buffered(self.concurrency)
            .collect()
            .await;

        let broken = results.iter().filter(|r| !r.is_ok()).count();
        info!(checked = results.len(), broken, "Link check finished");
        results
    }

    /// Extract the external links from `html` and check them.
    pub async fn check_html(&self, html: &str) -> Vec<LinkCheckResult> {
        self.check_links(extract_links(html)).await
    }

    #[instrument(skip(self))]
    pub async fn check_link(&self, url: String) -> LinkCheckResult {
        let parsed = match Url::parse(&url) {
            Ok(parsed) => parsed,
            Err(e) => {
                return LinkCheckResult::failed(url, LinkStatus::Error, format!("invalid url: {e}"));
            }
        };

        let response = match self.client.head(parsed.clone()).send().await {
            // Some servers refuse HEAD outright; retry those with GET.
            Ok(resp)
                if resp.status() == StatusCode::METHOD_NOT_ALLOWED
                    || resp.status() == StatusCode::NOT_IMPLEMENTED =>
            {
                debug!(status = %resp.status(), "HEAD refused, retrying with GET");
                self.client.get(parsed).send().await
            }
            other => other,
        };

        match response {
            Ok(resp) => classify_response(url, &resp),
            Err(e) if e.is_timeout() => {
                warn!(error = %e, "Link check timed out");
                LinkCheckResult::failed(url, LinkStatus::Timeout, "request timed out".to_string())
            }
            Err(e) => {
                warn!(error = %e, "Link check failed");
                LinkCheckResult::failed(url, LinkStatus::Error, e.to_string())
            }
        }
    }
}

fn classify_response(url: String, resp: &Response) -> LinkCheckResult {
    let status = resp.status();

    let (link_status, location) = if status.is_success() {
        (LinkStatus::Ok, None)
    } else if status.is_redirection() {
        let location = resp
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        (LinkStatus::Redirect, location)
    } else {
        (LinkStatus::Broken, None)
    };

    LinkCheckResult {
        url,
        status: link_status,
        http_status: Some(status.as_u16()),
        location,
        message: None,
    }
}
