use std::time::Duration;

use eatsmartdaily::links::{LinkChecker, LinkStatus};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

fn checker() -> LinkChecker {
    LinkChecker::new(Duration::from_secs(2), 4).expect("Failed to build link checker")
}

#[tokio::test]
async fn test_live_link_is_ok() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/recipes/oats"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let url = format!("{}/recipes/oats", mock_server.uri());
    let result = checker().check_link(url.clone()).await;

    assert_eq!(result.url, url);
    assert_eq!(result.status, LinkStatus::Ok);
    assert_eq!(result.http_status, Some(200));
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_missing_page_is_broken() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let result = checker()
        .check_link(format!("{}/gone", mock_server.uri()))
        .await;

    assert_eq!(result.status, LinkStatus::Broken);
    assert_eq!(result.http_status, Some(404));
    assert!(!result.is_ok());
}

#[tokio::test]
async fn test_server_error_is_broken() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let result = checker()
        .check_link(format!("{}/flaky", mock_server.uri()))
        .await;

    assert_eq!(result.status, LinkStatus::Broken);
    assert_eq!(result.http_status, Some(503));
}

#[tokio::test]
async fn test_redirect_is_reported_not_followed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new"))
        .mount(&mock_server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let result = checker()
        .check_link(format!("{}/old", mock_server.uri()))
        .await;

    assert_eq!(result.status, LinkStatus::Redirect);
    assert_eq!(result.http_status, Some(301));
    assert_eq!(result.location.as_deref(), Some("/new"));
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_head_not_allowed_falls_back_to_get() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/no-head"))
        .respond_with(ResponseTemplate::new(405))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/no-head"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = checker()
        .check_link(format!("{}/no-head", mock_server.uri()))
        .await;

    assert_eq!(result.status, LinkStatus::Ok);
    assert_eq!(result.http_status, Some(200));
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    let checker = LinkChecker::new(Duration::from_millis(200), 1).unwrap();
    let result = checker
        .check_link(format!("{}/slow", mock_server.uri()))
        .await;

    assert_eq!(result.status, LinkStatus::Timeout);
    assert_eq!(result.http_status, None);
}

#[tokio::test]
async fn test_refused_connection_is_error() {
    // Nothing listens on port 9 (discard) in test environments.
    let result = checker()
        .check_link("http://127.0.0.1:9/".to_string())
        .await;

    assert!(matches!(result.status, LinkStatus::Error | LinkStatus::Timeout));
    assert!(result.message.is_some());
}

#[tokio::test]
async fn test_check_html_preserves_order_and_skips_internal_links() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(150)))
        .mount(&mock_server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let base = mock_server.uri();
    let html = format!(
        r#"<p><a href="{base}/a">A</a> <a href='{base}/b'>B</a> <a href="{base}/a">A again</a> <a href="/about">About</a></p>"#
    );

    let results = checker().check_html(&html).await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].url, format!("{base}/a"));
    assert_eq!(results[0].status, LinkStatus::Ok);
    assert_eq!(results[1].url, format!("{base}/b"));
    assert_eq!(results[1].status, LinkStatus::Broken);
}
