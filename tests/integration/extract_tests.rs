//! End-to-end extraction tests

use doc_outline::config::{Config, CrawlerConfig, ExtractorConfig};
use doc_outline::output::{parse_modules, to_json};
use doc_outline::{run, Module, OutlineError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_config(max_depth: u32, aggressive: bool) -> Config {
    Config {
        crawler: CrawlerConfig {
            max_pages: 20,
            timeout_secs: 5,
            max_depth,
            workers: 4,
            ..Default::default()
        },
        extractor: ExtractorConfig {
            workers: 2,
            aggressive,
            quick_mode: false,
        },
    }
}

async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(format!("<html><body>{}</body></html>", body))
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_heading_page_end_to_end() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        "<h1>Widgets</h1><p>Desc.</p><h3>Gadget</h3><p>Sub.</p>",
    )
    .await;

    let output = run(&format!("{}/", mock_server.uri()), &create_test_config(0, true))
        .await
        .unwrap();

    let mut expected = Module::new("Widgets", "Desc.");
    expected.set_submodule("Gadget", "Sub.");
    assert_eq!(output.modules, vec![expected]);

    let json = to_json(&output.modules).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(
        value,
        serde_json::json!([
            {"module": "Widgets", "Description": "Desc.", "Submodules": {"Gadget": "Sub."}}
        ])
    );
}

#[tokio::test]
async fn test_list_page_end_to_end() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        r#"<ul><li><a title="X desc">X</a></li><li><a>Y</a>: does stuff</li></ul>"#,
    )
    .await;

    let output = run(&format!("{}/", mock_server.uri()), &create_test_config(0, false))
        .await
        .unwrap();

    assert_eq!(
        output.modules,
        vec![Module::new("X", "X desc"), Module::new("Y", "does stuff")]
    );
}

#[tokio::test]
async fn test_modules_from_linked_pages_deduplicated() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        r#"<main><h1>Overview</h1><p>Start here.</p><a href="/api">API reference</a></main>"#,
    )
    .await;
    mount_page(
        &mock_server,
        "/api",
        "<h1>Overview</h1><p>Duplicate.</p><h2>Client</h2><p>Talks to servers.</p>",
    )
    .await;

    let output = run(&format!("{}/", mock_server.uri()), &create_test_config(1, false))
        .await
        .unwrap();

    let names: Vec<&str> = output.modules.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Overview", "Client"]);
    assert_eq!(output.modules[0].description, "Start here.");

    assert_eq!(output.summary.pages_crawled, 2);
    assert_eq!(output.summary.pages_parsed, 2);
    assert_eq!(output.summary.modules, 2);
}

#[tokio::test]
async fn test_summary_reports_phases_separately() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        r#"<h1>Home</h1><p>Start.</p><a href="/guide">Guide</a><a href="/gone">Gone</a>"#,
    )
    .await;
    mount_page(&mock_server, "/guide", "<h1>Guide</h1><p>Read me.</p>").await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let output = run(&format!("{}/", mock_server.uri()), &create_test_config(1, false))
        .await
        .unwrap();
    let summary = &output.summary;

    assert_eq!(summary.pages_claimed, 3);
    assert_eq!(summary.pages_crawled, 2);
    assert_eq!(summary.pages_failed, 1);
    assert_eq!(summary.pages_parsed, 2);
    assert_eq!(summary.modules, 2);
    assert!(summary.crawl_time > std::time::Duration::ZERO);
    assert!(summary.format().contains("Parse time:"));
}

#[tokio::test]
async fn test_aggressive_mining_end_to_end() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        r#"<h1>Settings</h1><p>Tune the client.</p>
           <table>
             <tr><th>Option</th><th>Meaning</th></tr>
             <tr><td>timeout</td><td>Seconds to wait</td></tr>
           </table>"#,
    )
    .await;

    let url = format!("{}/", mock_server.uri());

    let plain = run(&url, &create_test_config(0, false)).await.unwrap();
    assert!(plain.modules[0].submodules.is_empty());

    let mined = run(&url, &create_test_config(0, true)).await.unwrap();
    assert_eq!(mined.modules[0].submodules["timeout"], "Seconds to wait");
}

#[tokio::test]
async fn test_no_pages_is_an_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let result = run(&format!("{}/", mock_server.uri()), &create_test_config(1, true)).await;
    assert!(matches!(result, Err(OutlineError::NoPages { .. })));
}

#[tokio::test]
async fn test_invalid_start_url_fetches_nothing() {
    let result = run("definitely not a url", &Config::default()).await;
    assert!(matches!(result, Err(OutlineError::Url(_))));
}

#[tokio::test]
async fn test_output_reads_back() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", "<h2>Bare</h2><h3>Child</h3>").await;

    let output = run(&format!("{}/", mock_server.uri()), &create_test_config(0, true))
        .await
        .unwrap();

    let json = to_json(&output.modules).unwrap();
    let modules = parse_modules(&json).unwrap();

    assert_eq!(modules.len(), 1);
    assert_eq!(modules[0].description, "No description available");
    assert_eq!(modules[0].submodules["Child"], "No description available");
}
