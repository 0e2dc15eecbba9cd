//! Crawl-stage integration tests

use doc_outline::config::CrawlerConfig;
use doc_outline::crawler::{Crawler, MAX_PAGE_BYTES};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a crawler configuration suitable for a local mock server
fn create_test_config(max_pages: usize, max_depth: u32) -> CrawlerConfig {
    CrawlerConfig {
        max_pages,
        timeout_secs: 5,
        max_depth,
        workers: 4,
        ..Default::default()
    }
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html")
}

async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html_page(body))
        .mount(server)
        .await;
}

fn page_urls(pages: &[doc_outline::crawler::Page]) -> Vec<String> {
    let mut urls: Vec<String> = pages.iter().map(|p| p.url.clone()).collect();
    urls.sort();
    urls
}

#[tokio::test]
async fn test_max_pages_one_fetches_only_start_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let links: String = (0..10)
        .map(|i| format!(r#"<a href="/page{}">Page {}</a>"#, i, i))
        .collect();
    mount_page(&mock_server, "/", &links).await;

    for i in 0..10 {
        Mock::given(method("GET"))
            .and(path(format!("/page{}", i)))
            .respond_with(html_page("never"))
            .expect(0)
            .mount(&mock_server)
            .await;
    }

    let crawler = Crawler::new(create_test_config(1, 1)).unwrap();
    let output = crawler.crawl(&format!("{}/", base_url)).await;

    assert_eq!(output.pages.len(), 1);
    assert_eq!(output.pages[0].url, format!("{}/", base_url));
}

#[tokio::test]
async fn test_follows_links_one_level_deep() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/a">A</a><a href="/b#section">B</a><a href="/a">A again</a>"#,
    )
    .await;
    mount_page(&mock_server, "/a", r#"<p>A</p><a href="/c">C</a>"#).await;
    mount_page(&mock_server, "/b", "<p>B</p>").await;

    // Depth 2 is never fetched
    Mock::given(method("GET"))
        .and(path("/c"))
        .respond_with(html_page("C"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let crawler = Crawler::new(create_test_config(20, 1)).unwrap();
    let output = crawler.crawl(&format!("{}/", base_url)).await;

    assert_eq!(
        page_urls(&output.pages),
        vec![
            format!("{}/", base_url),
            format!("{}/a", base_url),
            format!("{}/b", base_url),
        ]
    );
    assert_eq!(output.failed, 0);
}

#[tokio::test]
async fn test_start_page_is_always_first() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", r#"<a href="/x">X</a><a href="/y">Y</a>"#).await;
    mount_page(&mock_server, "/x", "x").await;
    mount_page(&mock_server, "/y", "y").await;

    let crawler = Crawler::new(create_test_config(20, 1)).unwrap();
    let output = crawler.crawl(&format!("{}/", base_url)).await;

    assert_eq!(output.pages.len(), 3);
    assert_eq!(output.pages[0].url, format!("{}/", base_url));
}

#[tokio::test]
async fn test_depth_zero_fetches_only_start_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", r#"<a href="/docs">Docs</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/docs"))
        .respond_with(html_page("docs"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let crawler = Crawler::new(create_test_config(20, 0)).unwrap();
    let output = crawler.crawl(&format!("{}/", base_url)).await;

    assert_eq!(output.pages.len(), 1);
}

#[tokio::test]
async fn test_failed_pages_are_absent() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/missing">Missing</a><a href="/broken">Broken</a><a href="/ok">Ok</a>"#,
    )
    .await;
    mount_page(&mock_server, "/ok", "fine").await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let crawler = Crawler::new(create_test_config(20, 1)).unwrap();
    let output = crawler.crawl(&format!("{}/", base_url)).await;

    assert_eq!(
        page_urls(&output.pages),
        vec![format!("{}/", base_url), format!("{}/ok", base_url)]
    );
    assert_eq!(output.failed, 2);
    assert_eq!(output.claimed, 4);
}

#[tokio::test]
async fn test_empty_body_counts_as_failure() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/blank">Blank</a><a href="/ok">Ok</a>"#,
    )
    .await;
    mount_page(&mock_server, "/ok", "fine").await;

    Mock::given(method("GET"))
        .and(path("/blank"))
        .respond_with(ResponseTemplate::new(200).set_body_string("  \n "))
        .mount(&mock_server)
        .await;

    let crawler = Crawler::new(create_test_config(20, 1)).unwrap();
    let output = crawler.crawl(&format!("{}/", base_url)).await;

    assert_eq!(
        page_urls(&output.pages),
        vec![format!("{}/", base_url), format!("{}/ok", base_url)]
    );
    assert_eq!(output.failed, 1);
}

#[tokio::test]
async fn test_empty_start_page_yields_no_pages() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let crawler = Crawler::new(create_test_config(20, 1)).unwrap();
    let output = crawler.crawl(&format!("{}/", mock_server.uri())).await;

    assert!(output.pages.is_empty());
    assert_eq!(output.failed, 1);
}

#[tokio::test]
async fn test_other_domains_not_followed() {
    let mock_server = MockServer::start().await;
    let other_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        &format!(r#"<a href="{}/elsewhere">Elsewhere</a>"#, other_server.uri()),
    )
    .await;

    Mock::given(method("GET"))
        .respond_with(html_page("other"))
        .expect(0)
        .mount(&other_server)
        .await;

    let crawler = Crawler::new(create_test_config(20, 1)).unwrap();
    let output = crawler.crawl(&format!("{}/", base_url)).await;

    assert_eq!(output.pages.len(), 1);
}

#[tokio::test]
async fn test_large_body_truncated() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("a".repeat(MAX_PAGE_BYTES * 2)))
        .mount(&mock_server)
        .await;

    let crawler = Crawler::new(create_test_config(1, 0)).unwrap();
    let output = crawler.crawl(&format!("{}/", base_url)).await;

    assert_eq!(output.pages[0].html.len(), MAX_PAGE_BYTES);
}

#[tokio::test]
async fn test_unreachable_start_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let crawler = Crawler::new(create_test_config(20, 1)).unwrap();
    let output = crawler.crawl(&format!("{}/", base_url)).await;

    assert!(output.pages.is_empty());
    assert_eq!(output.failed, 1);
}
