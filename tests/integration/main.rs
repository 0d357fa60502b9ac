//! Integration tests for the syllabus scraper
//!
//! These tests use wiremock to serve the fixture syllabus pages over HTTP
//! and exercise the pipeline and the full run end-to-end.

mod pipeline_tests;
mod run_tests;

use naist_syllabus::config::FetcherConfig;
use naist_syllabus::syllabus::HttpFetcher;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const LISTING: &str = include_str!("../fixtures/syllabus.html");
pub const DETAIL: &str = include_str!("../fixtures/detail_1.html");

/// Builds an HTTP response carrying an HTML body
pub fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "text/html; charset=utf-8")
}

/// Fetcher without the politeness delay
pub fn fast_fetcher() -> HttpFetcher {
    HttpFetcher::new(&FetcherConfig {
        request_delay_ms: 0,
        ..FetcherConfig::default()
    })
    .expect("Failed to build fetcher")
}

/// Starts a mock syllabus site
///
/// Serves the listing at `/syllabus.html`, the detail fixture at
/// `/detail_1.html` and at every `/subjects/preview_detail/<id>` path.
pub async fn syllabus_server() -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/syllabus.html"))
        .respond_with(html(LISTING))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/detail_1.html"))
        .respond_with(html(DETAIL))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/subjects/preview_detail/\d+$"))
        .respond_with(html(DETAIL))
        .mount(&mock_server)
        .await;

    mock_server
}
