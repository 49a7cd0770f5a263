//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full discovery, resolution and extraction cycle end-to-end.

use sitemap_harvest::crawler::Fetcher;
use sitemap_harvest::{Config, Coordinator, CrawlEntry, CrawlResponse, ExtractedRecord};
use std::collections::HashSet;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration that talks plain HTTP to the mock server
fn create_test_config() -> Config {
    let mut config = Config::default();
    config.discovery.scheme = "http".to_string();
    config.http.max_retries = 0;
    config.http.timeout_secs = 5;
    config.http.connect_timeout_secs = 2;
    config.crawler.max_workers = 4;
    config
}

/// The crawl domain of a mock server, e.g. "127.0.0.1:12345"
fn domain_of(server: &MockServer) -> String {
    server.address().to_string()
}

async fn mount_xml(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/xml"))
        .mount(server)
        .await;
}

async fn mount_html(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html"))
        .mount(server)
        .await;
}

async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

fn urlset(base: &str, paths: &[&str]) -> String {
    let entries: String = paths
        .iter()
        .map(|p| format!("<url><loc>{}{}</loc></url>", base, p))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</urlset>"#,
        entries
    )
}

fn sitemap_index(base: &str, paths: &[&str]) -> String {
    let entries: String = paths
        .iter()
        .map(|p| format!("<sitemap><loc>{}{}</loc></sitemap>", base, p))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</sitemapindex>"#,
        entries
    )
}

fn plain_page(title: &str) -> String {
    format!(
        "<html><head><title>{}</title></head><body><main>About {}</main></body></html>",
        title, title
    )
}

async fn crawl(server: &MockServer) -> CrawlResponse {
    let coordinator = Coordinator::new(create_test_config()).expect("Failed to create coordinator");
    coordinator.run(&domain_of(server)).await
}

fn entries(response: &CrawlResponse) -> &[CrawlEntry] {
    response
        .entries()
        .unwrap_or_else(|| panic!("expected page entries, got {:?}", response))
}

fn urls_of(response: &CrawlResponse) -> HashSet<String> {
    entries(response).iter().map(|e| e.url().to_string()).collect()
}

fn entry_for<'a>(response: &'a CrawlResponse, url: &str) -> &'a CrawlEntry {
    entries(response)
        .iter()
        .find(|e| e.url() == url)
        .unwrap_or_else(|| panic!("no entry for {}", url))
}

#[tokio::test]
async fn test_no_sitemap_anywhere() {
    let mock_server = MockServer::start().await;
    mount_status(&mock_server, "/robots.txt", 404).await;

    let response = crawl(&mock_server).await;
    assert_eq!(response, CrawlResponse::failed("Sitemap not found. Exiting."));
}

#[tokio::test]
async fn test_robots_without_sitemap_line() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /admin"))
        .mount(&mock_server)
        .await;

    let response = crawl(&mock_server).await;
    assert_eq!(response.error(), Some("Sitemap not found. Exiting."));
}

#[tokio::test]
async fn test_non_xml_sitemap_is_rejected() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    // Soft 404 pages served as HTML must not count as sitemaps
    mount_html(&mock_server, "/sitemap.xml", "<html><body>Not here</body></html>").await;
    mount_html(&mock_server, "/sitemap_index.xml", "<html><body>Not here</body></html>").await;
    mount_html(&mock_server, "/sitemap-index.xml", &urlset(&base, &["/p/1"])).await;

    let response = crawl(&mock_server).await;
    assert_eq!(response.error(), Some("Sitemap not found. Exiting."));
}

#[tokio::test]
async fn test_commerce_site_with_blog() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_xml(&mock_server, "/sitemap.xml", urlset(&base, &["/p/1", "/p/2", "/blog/a"])).await;
    mount_html(
        &mock_server,
        "/p/1",
        r#"<html><head>
            <meta property="product:price:amount" content="19.99">
            <meta name="description" content="A sturdy mug">
        </head><body>
            <h1>Mug</h1>
            <img class="product main" src="/img/mug.jpg">
            <img class="product" alt="no source">
            <img class="logo" src="/img/logo.png">
            <button>Add to Cart</button>
        </body></html>"#,
    )
    .await;
    mount_html(&mock_server, "/p/2", "<html><body><h1>Teapot</h1></body></html>").await;
    mount_html(
        &mock_server,
        "/blog/a",
        r#"<html><body><h1>Launch</h1><time datetime="2024-03-01">March 1</time>
            <article><p>We shipped.</p><script>track()</script></article></body></html>"#,
    )
    .await;

    let response = crawl(&mock_server).await;
    assert_eq!(entries(&response).len(), 3);

    match entry_for(&response, &format!("{}/p/1", base)) {
        CrawlEntry::Record(ExtractedRecord::Commerce(product)) => {
            assert_eq!(product.name, "Mug");
            assert_eq!(product.price, "19.99");
            assert_eq!(product.description, "A sturdy mug");
            assert_eq!(product.images, vec![format!("{}/img/mug.jpg", base)]);
        }
        other => panic!("expected commerce record, got {:?}", other),
    }

    match entry_for(&response, &format!("{}/p/2", base)) {
        CrawlEntry::Record(ExtractedRecord::Commerce(product)) => {
            assert_eq!(product.name, "Teapot");
            assert_eq!(product.price, "");
            assert!(product.images.is_empty());
        }
        other => panic!("expected commerce record, got {:?}", other),
    }

    match entry_for(&response, &format!("{}/blog/a", base)) {
        CrawlEntry::Record(ExtractedRecord::Blog(post)) => {
            assert_eq!(post.title, "Launch");
            assert_eq!(post.date, "2024-03-01");
            assert_eq!(post.content, "We shipped.");
        }
        other => panic!("expected blog record, got {:?}", other),
    }
}

#[tokio::test]
async fn test_general_site_uses_generic_records() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_xml(&mock_server, "/sitemap.xml", urlset(&base, &["/about", "/team"])).await;
    mount_html(&mock_server, "/about", &plain_page("About")).await;
    mount_html(&mock_server, "/team", &plain_page("Team")).await;

    let response = crawl(&mock_server).await;

    match entry_for(&response, &format!("{}/team", base)) {
        CrawlEntry::Record(ExtractedRecord::Generic(page)) => {
            assert_eq!(page.title, "Team");
            assert_eq!(page.description, "");
            assert_eq!(page.main_content, "About Team");
        }
        other => panic!("expected generic record, got {:?}", other),
    }
}

#[tokio::test]
async fn test_sitemap_found_via_robots() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "User-agent: *\nDisallow: /cart\n\
             Sitemap: {}/maps/site.xml\nSitemap: {}/maps/other.xml\n",
            base, base
        )))
        .mount(&mock_server)
        .await;
    mount_xml(&mock_server, "/maps/site.xml", urlset(&base, &["/about"])).await;
    mount_html(&mock_server, "/about", &plain_page("About")).await;

    let response = crawl(&mock_server).await;
    assert_eq!(urls_of(&response), HashSet::from([format!("{}/about", base)]));
}

#[tokio::test]
async fn test_nested_sitemap_failure_keeps_siblings() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_xml(
        &mock_server,
        "/sitemap.xml",
        sitemap_index(&base, &["/maps/pages.xml", "/maps/gone.xml", "/maps/more.xml"]),
    )
    .await;
    mount_xml(&mock_server, "/maps/pages.xml", urlset(&base, &["/a"])).await;
    mount_status(&mock_server, "/maps/gone.xml", 404).await;
    mount_xml(&mock_server, "/maps/more.xml", urlset(&base, &["/b"])).await;
    mount_html(&mock_server, "/a", &plain_page("A")).await;
    mount_html(&mock_server, "/b", &plain_page("B")).await;

    let response = crawl(&mock_server).await;
    assert_eq!(
        urls_of(&response),
        HashSet::from([format!("{}/a", base), format!("{}/b", base)])
    );
    assert!(entries(&response).iter().all(|e| !e.is_error()));
}

#[tokio::test]
async fn test_cyclic_sitemap_index_terminates() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_xml(&mock_server, "/sitemap.xml", sitemap_index(&base, &["/maps/a.xml"])).await;
    mount_xml(
        &mock_server,
        "/maps/a.xml",
        sitemap_index(&base, &["/sitemap.xml", "/maps/a.xml", "/maps/b.xml"]),
    )
    .await;
    mount_xml(&mock_server, "/maps/b.xml", urlset(&base, &["/p/1", "/p/2"])).await;
    mount_html(&mock_server, "/p/1", &plain_page("One")).await;
    mount_html(&mock_server, "/p/2", &plain_page("Two")).await;

    let response = crawl(&mock_server).await;
    assert_eq!(
        urls_of(&response),
        HashSet::from([format!("{}/p/1", base), format!("{}/p/2", base)])
    );
}

#[tokio::test]
async fn test_duplicate_urls_are_crawled_once() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_xml(
        &mock_server,
        "/sitemap.xml",
        sitemap_index(&base, &["/maps/one.xml", "/maps/two.xml"]),
    )
    .await;
    mount_xml(&mock_server, "/maps/one.xml", urlset(&base, &["/p/1", "/p/1", "/p/2"])).await;
    mount_xml(&mock_server, "/maps/two.xml", urlset(&base, &["/p/2", "/p/3"])).await;
    for route in ["/p/1", "/p/2", "/p/3"] {
        mount_html(&mock_server, route, &plain_page(route)).await;
    }

    let response = crawl(&mock_server).await;

    // One outcome per unique URL
    assert_eq!(entries(&response).len(), 3);
    assert_eq!(urls_of(&response).len(), 3);
}

#[tokio::test]
async fn test_root_sitemap_failure_is_a_run_error() {
    let mock_server = MockServer::start().await;

    mount_xml(
        &mock_server,
        "/sitemap.xml",
        "<urlset><url><loc>broken</url></urlset>".to_string(),
    )
    .await;

    let response = crawl(&mock_server).await;
    let error = response.error().expect("expected a whole-run error");
    assert!(error.contains("sitemap.xml"), "unexpected error: {}", error);
}

#[tokio::test]
async fn test_truncated_root_sitemap_is_a_run_error() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    // Transfer cut off inside the second entry
    mount_xml(
        &mock_server,
        "/sitemap.xml",
        format!(
            "<urlset><url><loc>{}/p/1</loc></url><url><loc>{}/p/2",
            base, base
        ),
    )
    .await;
    mount_html(&mock_server, "/p/1", &plain_page("One")).await;

    let response = crawl(&mock_server).await;
    let error = response.error().expect("expected a whole-run error");
    assert!(error.contains("sitemap.xml"), "unexpected error: {}", error);
}

#[tokio::test]
async fn test_records_keep_sitemap_url_verbatim() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    // No trailing slash, the way many sitemaps list the home page
    mount_xml(&mock_server, "/sitemap.xml", urlset(&base, &[""])).await;
    mount_html(&mock_server, "/", &plain_page("Home")).await;

    let response = crawl(&mock_server).await;

    assert_eq!(entries(&response).len(), 1);
    match entry_for(&response, &base) {
        CrawlEntry::Record(record) => assert_eq!(record.url(), base),
        other => panic!("expected a record, got {:?}", other),
    }
}

#[tokio::test]
async fn test_root_sitemap_fetched_once_when_referenced_back() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(format!("User-agent: *\nSitemap: {}/maps/./root.xml\n", base)),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/maps/root.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            sitemap_index(&base, &["/maps/root.xml", "/maps/pages.xml"]),
            "application/xml",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_xml(&mock_server, "/maps/pages.xml", urlset(&base, &["/about"])).await;
    mount_html(&mock_server, "/about", &plain_page("About")).await;

    let response = crawl(&mock_server).await;
    assert_eq!(urls_of(&response), HashSet::from([format!("{}/about", base)]));
}

#[tokio::test]
async fn test_empty_sitemap_yields_no_entries() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_xml(&mock_server, "/sitemap.xml", urlset(&base, &[])).await;

    let response = crawl(&mock_server).await;
    assert_eq!(response, CrawlResponse::Pages(Vec::new()));
}

#[tokio::test]
async fn test_page_failure_is_isolated() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_xml(
        &mock_server,
        "/sitemap.xml",
        urlset(&base, &["/p/1", "/p/missing", "/p/broken"]),
    )
    .await;
    mount_html(&mock_server, "/p/1", &plain_page("One")).await;
    mount_status(&mock_server, "/p/broken", 500).await;

    let response = crawl(&mock_server).await;
    assert_eq!(entries(&response).len(), 3);

    for failed in ["/p/missing", "/p/broken"] {
        match entry_for(&response, &format!("{}{}", base, failed)) {
            CrawlEntry::Failed { error, .. } => assert!(!error.is_empty()),
            other => panic!("expected error entry, got {:?}", other),
        }
    }
    assert!(!entry_for(&response, &format!("{}/p/1", base)).is_error());
}

#[tokio::test]
async fn test_unreachable_sample_falls_back_to_general() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    // The first URL is the sample; it fails, so /p/2 is generic even though
    // it reads like a product page
    mount_xml(&mock_server, "/sitemap.xml", urlset(&base, &["/p/1", "/p/2"])).await;
    mount_status(&mock_server, "/p/1", 404).await;
    mount_html(&mock_server, "/p/2", "<html><body><h1>Mug</h1>Add to Cart</body></html>").await;

    let response = crawl(&mock_server).await;
    assert!(matches!(
        entry_for(&response, &format!("{}/p/2", base)),
        CrawlEntry::Record(ExtractedRecord::Generic(_))
    ));
}

#[tokio::test]
async fn test_repeated_runs_are_equal_as_sets() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    let routes = ["/p/1", "/p/2", "/p/3", "/blog/x", "/blog/y"];
    mount_xml(&mock_server, "/sitemap.xml", urlset(&base, &routes)).await;
    for route in routes {
        mount_html(&mock_server, route, &plain_page(route)).await;
    }

    let as_set = |response: &CrawlResponse| -> HashSet<String> {
        entries(response)
            .iter()
            .map(|e| serde_json::to_string(e).unwrap())
            .collect()
    };

    let first = crawl(&mock_server).await;
    let second = crawl(&mock_server).await;
    assert_eq!(entries(&first).len(), routes.len());
    assert_eq!(as_set(&first), as_set(&second));
}

#[tokio::test]
async fn test_fetcher_retries_server_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    mount_html(&mock_server, "/flaky", "<html>ok</html>").await;

    let mut config = create_test_config();
    config.http.max_retries = 1;
    config.http.retry_delay_ms = 10;
    let fetcher = Fetcher::new(&config.http).unwrap();

    let result = fetcher.fetch(&format!("{}/flaky", mock_server.uri())).await.unwrap();
    assert_eq!(result.status.as_u16(), 200);
    assert!(result.content_type.starts_with("text/html"));
}

#[tokio::test]
async fn test_fetch_text_rejects_non_success() {
    let mock_server = MockServer::start().await;
    mount_status(&mock_server, "/gone", 410).await;

    let fetcher = Fetcher::new(&create_test_config().http).unwrap();
    let result = fetcher.fetch_text(&format!("{}/gone", mock_server.uri())).await;
    assert!(matches!(
        result,
        Err(sitemap_harvest::HarvestError::HttpStatus { status: 410, .. })
    ));
}
