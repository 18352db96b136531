//! Integration tests for the harvester
//!
//! These tests use wiremock to serve catalog listing and detail pages and
//! run the full discovery, extraction and output cycle end-to-end.

use catalog_sieve::config::{Config, CrawlerConfig, FilterConfig, OutputConfig, SiteConfig};
use catalog_sieve::crawler::{run_harvest, Coordinator};
use catalog_sieve::output::read_records;
use catalog_sieve::record::UNSPECIFIED;
use std::path::Path;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, max_pages: u32, output_path: &Path) -> Config {
    Config {
        site: SiteConfig {
            base_url: base_url.to_string(),
            ..SiteConfig::default()
        },
        crawler: CrawlerConfig {
            max_pages,
            request_delay_ms: 0, // No pacing in tests
            listing_timeout_secs: 2,
            detail_timeout_secs: 2,
            progress_interval: 1,
        },
        filter: FilterConfig {
            target_categories: vec!["Шутеры".to_string(), "Инди".to_string()],
        },
        output: OutputConfig {
            path: output_path.display().to_string(),
            ..OutputConfig::default()
        },
        ..Config::default()
    }
}

fn listing_page(app_ids: &[&str]) -> String {
    let cards: String = app_ids
        .iter()
        .map(|id| format!(r#"<a data-testid="app-card" href="/catalog/app/{}">{}</a>"#, id, id))
        .collect();
    format!("<html><body><nav><a href=\"/\">Home</a></nav>{}</body></html>", cards)
}

fn detail_page(name: &str, categories: &[&str]) -> String {
    let categories = serde_json::to_string(categories).unwrap();
    format!(
        r#"<html><head>
        <script type="application/ld+json">
        {{"@context":"https://schema.org","@graph":[
          {{"@type":"BreadcrumbList","name":"Игры"}},
          {{"@type":"SoftwareApplication",
            "name":"{name}","description":"About {name}",
            "aggregateRating":{{"@type":"AggregateRating","ratingValue":4.2,"ratingCount":"37"}},
            "applicationSubCategory":{categories}}}
        ]}}
        </script>
        </head><body>
        <div data-testid="description"><p class="Pg0h2jm_x">Full text of {name}</p></div>
        </body></html>"#
    )
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_harvest_keeps_only_target_categories() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("filtered_apps.json");

    mount_page(
        &mock_server,
        "/catalog/games/all",
        listing_page(&["com.shooter", "com.puzzle"]),
    )
    .await;

    // Detail requests must carry the site referer
    let referer = format!("{}/", mock_server.uri());
    Mock::given(method("GET"))
        .and(path("/catalog/app/com.shooter"))
        .and(header("referer", referer.as_str()))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(detail_page("Shooter", &["Шутеры", "Экшен"])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(
        &mock_server,
        "/catalog/app/com.puzzle",
        detail_page("Puzzle", &["Головоломки"]),
    )
    .await;

    let config = create_test_config(&mock_server.uri(), 1, &output);
    let result = run_harvest(config).await.expect("Harvest failed");

    assert_eq!(result.pages_fetched, 1);
    assert_eq!(result.discovered, 2);
    assert_eq!(result.apps_filtered_out, 1);
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.category_counts.get("Шутеры"), Some(&1));
    assert_eq!(result.category_counts.get("Инди"), None);
    assert_eq!(result.output_path.as_deref(), Some(output.as_path()));

    let saved = read_records(&output).expect("Failed to read output");
    assert_eq!(saved.len(), 1);
    let record = &saved[0];
    assert_eq!(record.app_id, "com.shooter");
    assert_eq!(record.name, "Shooter");
    assert_eq!(record.short_description, "About Shooter");
    assert_eq!(record.full_description, "Full text of Shooter");
    assert_eq!(record.rating, 4.2);
    assert_eq!(record.rating_count, 37);
    assert_eq!(record.categories, vec!["Шутеры", "Экшен"]);
    assert_eq!(record.developer.name, UNSPECIFIED);
    assert_eq!(record.age_rating, UNSPECIFIED);
}

#[tokio::test]
async fn test_failed_detail_page_is_skipped() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("apps.json");

    mount_page(
        &mock_server,
        "/catalog/games/all",
        listing_page(&["com.broken", "com.indie", "com.nodata"]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/catalog/app/com.broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    mount_page(
        &mock_server,
        "/catalog/app/com.indie",
        detail_page("Indie", &["инди"]),
    )
    .await;
    mount_page(
        &mock_server,
        "/catalog/app/com.nodata",
        "<html><body>No linked data</body></html>".to_string(),
    )
    .await;

    let config = create_test_config(&mock_server.uri(), 1, &output);
    let result = run_harvest(config).await.expect("Harvest failed");

    assert_eq!(result.apps_skipped, 2);
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].app_id, "com.indie");
    // Counted under the configured spelling
    assert_eq!(result.category_counts.get("Инди"), Some(&1));
    assert_eq!(read_records(&output).unwrap().len(), 1);
}

#[tokio::test]
async fn test_failed_listing_pages_produce_no_output() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("apps.json");

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), 3, &output);
    let result = run_harvest(config).await.expect("Harvest failed");

    assert_eq!(result.pages_fetched, 0);
    assert_eq!(result.pages_failed, 3);
    assert_eq!(result.discovered, 0);
    assert!(result.records.is_empty());
    assert!(result.category_counts.is_empty());
    assert!(result.output_path.is_none());
    assert!(!output.exists());
}

#[tokio::test]
async fn test_listing_failure_does_not_stop_later_pages() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("apps.json");

    Mock::given(method("GET"))
        .and(path("/catalog/games/all"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;
    mount_page(
        &mock_server,
        "/catalog/games/all/page-2",
        listing_page(&["com.late"]),
    )
    .await;
    mount_page(
        &mock_server,
        "/catalog/app/com.late",
        detail_page("Late", &["Шутеры"]),
    )
    .await;

    let config = create_test_config(&mock_server.uri(), 2, &output);
    let coordinator = Coordinator::new(config).unwrap();
    let result = coordinator.run().await.expect("Harvest failed");

    assert_eq!(result.pages_failed, 1);
    assert_eq!(result.pages_fetched, 1);
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].app_id, "com.late");
}

#[tokio::test]
async fn test_duplicate_ids_across_pages_are_kept() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("apps.json");

    mount_page(
        &mock_server,
        "/catalog/games/all",
        listing_page(&["com.repeat"]),
    )
    .await;
    mount_page(
        &mock_server,
        "/catalog/games/all/page-2",
        listing_page(&["com.repeat"]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/catalog/app/com.repeat"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(detail_page("Repeat", &["Шутеры"])),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), 2, &output);
    let result = run_harvest(config).await.expect("Harvest failed");

    assert_eq!(result.discovered, 2);
    assert_eq!(result.records.len(), 2);
    assert_eq!(result.category_counts.get("Шутеры"), Some(&2));

    let saved = read_records(&output).unwrap();
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[0], saved[1]);
}
