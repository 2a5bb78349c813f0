//! Integration tests for the session controller
//!
//! These tests use wiremock to stand in for the crawl service and drive the
//! controller end-to-end over HTTP.

use crawl_console::config::{Config, ExportConfig, HistoryConfig, ServiceConfig, SessionConfig};
use crawl_console::history::{HistoryStore, KeyValueStore, MemoryStore, SqliteStore, HISTORY_LIMIT};
use crawl_console::{HttpCrawlService, SessionController, SessionError, TransportError};
use serde_json::json;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock service
fn create_test_config(base_url: &str, db_path: &str) -> Config {
    Config {
        service: ServiceConfig {
            base_url: base_url.to_string(),
            user_agent: "TestConsole/1.0".to_string(),
        },
        session: SessionConfig { default_depth: 2 },
        history: HistoryConfig {
            database_path: db_path.to_string(),
            namespace: "crawlHistory".to_string(),
        },
        export: ExportConfig {
            output_dir: ".".to_string(),
        },
    }
}

fn memory_controller(server: &MockServer) -> SessionController<HttpCrawlService, MemoryStore> {
    let config = create_test_config(&server.uri(), "unused.db");
    SessionController::from_config(&config, MemoryStore::new()).expect("controller")
}

fn example_pages() -> serde_json::Value {
    json!([
        {"url": "https://example.com", "title": "Example", "depth": 0},
        {"url": "https://example.com/about", "depth": 1}
    ])
}

#[tokio::test]
async fn test_successful_crawl() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/crawl"))
        .and(body_json(json!({"url": "https://example.com", "depth": 2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(example_pages()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let controller = memory_controller(&mock_server);
    let before = chrono::Utc::now() - chrono::Duration::seconds(1);

    let count = controller
        .submit("https://example.com", 2)
        .await
        .expect("crawl should succeed");

    assert_eq!(count, 2);
    assert_eq!(controller.results().len(), 2);
    assert_eq!(
        controller.progress_messages(),
        vec![
            "Starting crawl: https://example.com at depth 2",
            "Crawl complete: 2 pages found",
        ]
    );
    assert!(controller.error().is_none());

    let history = controller.history();
    assert_eq!(history[0].url, "https://example.com");
    assert_eq!(history[0].count, 2);
    assert!(history[0].timestamp >= before);
    assert!(history[0].timestamp <= chrono::Utc::now());
}

#[tokio::test]
async fn test_empty_url_issues_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let controller = memory_controller(&mock_server);
    let result = controller.submit("", 2).await;

    assert_eq!(result, Err(SessionError::Validation));
    assert!(controller.progress_log().is_empty());
    assert_eq!(
        controller.error().map(|e| e.to_string()).as_deref(),
        Some("Please enter a URL")
    );
}

#[tokio::test]
async fn test_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/crawl"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let controller = memory_controller(&mock_server);
    let result = controller.submit("https://example.com", 2).await;

    assert_eq!(
        result,
        Err(SessionError::Transport(TransportError::Status(500)))
    );
    assert!(controller.results().is_empty());
    assert!(controller.progress_messages()[1].contains("status: 500"));
    assert!(controller.history().is_empty());
}

#[tokio::test]
async fn test_service_reported_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/crawl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "robots.txt unreachable"})))
        .mount(&mock_server)
        .await;

    let controller = memory_controller(&mock_server);
    let result = controller.submit("https://example.com", 2).await;

    assert_eq!(
        result,
        Err(SessionError::Service("robots.txt unreachable".to_string()))
    );
    assert!(controller.results().is_empty());
    assert_eq!(
        controller.progress_messages()[1],
        "Error: robots.txt unreachable"
    );
    assert!(controller.history().is_empty());
}

#[tokio::test]
async fn test_connection_failure() {
    // Port 1 is reserved and refuses connections
    let config = create_test_config("http://127.0.0.1:1", "unused.db");
    let controller = SessionController::from_config(&config, MemoryStore::new()).unwrap();

    let result = controller.submit("https://example.com", 2).await;

    assert!(matches!(
        result,
        Err(SessionError::Transport(TransportError::Connection(_)))
    ));
    assert!(controller.progress_messages()[1].starts_with("Error: "));
    assert!(!controller.is_in_flight());
}

#[tokio::test]
async fn test_no_pages_found_is_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/crawl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let controller = memory_controller(&mock_server);

    assert_eq!(controller.submit("https://example.com", 1).await, Ok(0));
    assert_eq!(
        controller.progress_messages()[1],
        "Crawl complete: 0 pages found"
    );
    assert_eq!(controller.history()[0].count, 0);
}

#[tokio::test]
async fn test_single_flight() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/crawl"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(example_pages())
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let controller = memory_controller(&mock_server);

    let (first, second) = tokio::join!(
        controller.submit("https://example.com", 2),
        async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            assert!(controller.is_in_flight());
            let log_before = controller.progress_messages();
            let result = controller.replay("https://other.example").await;
            assert_eq!(controller.progress_messages(), log_before);
            result
        },
    );

    assert_eq!(first, Ok(2));
    assert_eq!(second, Err(SessionError::InFlight));
    assert_eq!(controller.history().len(), 1);
}

#[tokio::test]
async fn test_failure_reported_over_empty_url_sent_in_flight() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/crawl"))
        .respond_with(ResponseTemplate::new(500).set_delay(Duration::from_millis(200)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let controller = memory_controller(&mock_server);

    let (first, second) = tokio::join!(
        controller.submit("https://example.com", 2),
        async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            controller.submit("", 2).await
        },
    );

    let status = SessionError::Transport(TransportError::Status(500));
    assert_eq!(first, Err(status.clone()));
    assert_eq!(second, Err(SessionError::Validation));
    assert_eq!(controller.error(), Some(status));
}

#[tokio::test]
async fn test_history_is_bounded_and_newest_first() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/crawl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(12)
        .mount(&mock_server)
        .await;

    let controller = memory_controller(&mock_server);

    for i in 0..12 {
        controller
            .submit(&format!("https://example.com/{}", i), 1)
            .await
            .unwrap();
        assert!(controller.history().len() <= HISTORY_LIMIT);
    }

    let history = controller.history();
    assert_eq!(history.len(), HISTORY_LIMIT);
    assert_eq!(history[0].url, "https://example.com/11");
    assert_eq!(history[9].url, "https://example.com/2");
    assert!(history
        .windows(2)
        .all(|pair| pair[0].timestamp >= pair[1].timestamp));
}

#[tokio::test]
async fn test_replay_resubmits_with_current_depth() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/crawl"))
        .and(body_json(json!({"url": "https://example.com", "depth": 3})))
        .respond_with(ResponseTemplate::new(200).set_body_json(example_pages()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let controller = memory_controller(&mock_server);
    controller.set_depth(3);

    assert_eq!(controller.replay("https://example.com").await, Ok(2));
    assert_eq!(controller.url(), "https://example.com");
}

#[tokio::test]
async fn test_history_survives_restart() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/crawl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(example_pages()))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("history.db");
    let config = create_test_config(&mock_server.uri(), db_path.to_str().unwrap());

    {
        let store = SqliteStore::new(&db_path).unwrap();
        let controller = SessionController::from_config(&config, store).unwrap();
        controller.submit("https://example.com", 2).await.unwrap();
    }

    let store = SqliteStore::new(&db_path).unwrap();
    let controller = SessionController::from_config(&config, store).unwrap();
    let history = controller.history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].url, "https://example.com");
    assert_eq!(history[0].count, 2);

    controller.clear_history().unwrap();

    let store = SqliteStore::new(&db_path).unwrap();
    assert_eq!(store.load("crawlHistory").unwrap(), None);
    let mut reopened = HistoryStore::open(store, "crawlHistory");
    assert!(reopened.load().is_empty());
}
