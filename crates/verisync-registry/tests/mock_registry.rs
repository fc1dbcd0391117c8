//! Registry client behaviour against a local stand-in HTTP server.
//!
//! The server speaks just enough HTTP/1.1 to answer one `GET` per connection
//! and records every request path it sees.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use verisync_config::RegistryConfig;
use verisync_registry::{RegistryClient, matcher};

type Handler = fn(&str) -> Option<(u16, String)>;

struct MockServer {
    base: String,
    paths: Arc<Mutex<Vec<String>>>,
}

impl MockServer {
    /// Start a server; a handler returning `None` leaves the request hanging.
    async fn start(handler: Handler) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let paths = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&paths);

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let seen = Arc::clone(&seen);
                tokio::spawn(async move {
                    let mut buf = Vec::new();
                    let mut chunk = [0u8; 1024];
                    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut chunk).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => buf.extend_from_slice(&chunk[..n]),
                        }
                    }
                    let request = String::from_utf8_lossy(&buf).to_string();
                    let path = request
                        .lines()
                        .next()
                        .and_then(|line| line.split_whitespace().nth(1))
                        .unwrap_or_default()
                        .to_string();
                    seen.lock().unwrap().push(path.clone());

                    let Some((status, body)) = handler(&path) else {
                        tokio::time::sleep(Duration::from_secs(30)).await;
                        return;
                    };
                    let response = format!(
                        "HTTP/1.1 {status} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        Self { base, paths }
    }

    fn client(&self, timeout_secs: u64) -> RegistryClient {
        let config = RegistryConfig {
            verification_url: format!("{}/vri/select", self.base),
            type_registry_url: format!("{}/mit", self.base),
            timeout_secs,
            ..Default::default()
        };
        RegistryClient::new(&config).unwrap()
    }

    fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

fn start_param(path: &str) -> u32 {
    path.split('&')
        .find_map(|pair| pair.strip_prefix("start="))
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

/// 250 organization records served 100 per page.
fn org_pages(path: &str) -> Option<(u16, String)> {
    let start = start_param(path);
    let total = 250u32;
    let docs: Vec<Value> = (start..total.min(start + 100))
        .map(|i| json!({ "vri_id": format!("1-{i}"), "mi.number": format!("SN-{i}") }))
        .collect();
    Some((200, json!({ "response": { "numFound": total, "docs": docs } }).to_string()))
}

fn org_pages_with_broken_second(path: &str) -> Option<(u16, String)> {
    if start_param(path) == 100 {
        return Some((500, "solr exploded".into()));
    }
    org_pages(path)
}

#[tokio::test]
async fn org_walk_fetches_three_pages_for_250_hits() {
    let server = MockServer::start(org_pages).await;
    let client = server.client(5);

    let docs = client.fetch_all_pages_for_org("Metrology Center", 500).await;

    let mut starts: Vec<u32> = server.paths().iter().map(|p| start_param(p)).collect();
    starts.sort_unstable();
    assert_eq!(starts, vec![0, 100, 200]);
    assert!(
        server.paths().iter().all(|p| p.contains("&rows=100&")),
        "every page is requested at the fixed organization page size"
    );

    assert_eq!(docs.len(), 250);
    let mut ids: Vec<String> = matcher::match_verifications(&docs)
        .into_iter()
        .map(|r| r.source_record_id)
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 250);
}

#[tokio::test]
async fn org_walk_respects_max_total() {
    let server = MockServer::start(org_pages).await;
    let client = server.client(5);

    let docs = client.fetch_all_pages_for_org("Metrology Center", 150).await;

    assert_eq!(server.paths().len(), 2);
    assert_eq!(docs.len(), 150);
}

#[tokio::test]
async fn org_walk_tolerates_failed_page() {
    let server = MockServer::start(org_pages_with_broken_second).await;
    let client = server.client(5);

    let docs = client.fetch_all_pages_for_org("Metrology Center", 500).await;

    assert_eq!(server.paths().len(), 3);
    assert_eq!(docs.len(), 150);
    assert_eq!(docs[0]["vri_id"], "1-0");
    assert_eq!(docs[100]["vri_id"], "1-200");
}

#[tokio::test]
async fn org_query_keeps_literal_wildcard_and_escapes_quotes() {
    let server = MockServer::start(org_pages).await;
    let client = server.client(5);

    client
        .search_verification_records_by_exact_org(r#"OOO "Etalon""#, 100, 0)
        .await;

    let path = &server.paths()[0];
    assert!(path.contains("q=*&"), "path: {path}");
    assert!(!path.contains("%2A"), "path: {path}");
    assert!(path.contains("org_title%3A%22OOO%20%5C%22Etalon%5C%22%22"), "path: {path}");
}

#[tokio::test]
async fn non_success_status_degrades_to_empty() {
    let server = MockServer::start(|_| Some((503, "maintenance".into()))).await;
    let client = server.client(5);

    let page = client.search_verification_records("SN-1", 10, 0).await;
    assert!(page.is_empty());
    assert_eq!(page.total_found, 0);
    assert!(client.search_type_registry("48316-11").await.is_none());
}

#[tokio::test]
async fn malformed_payload_degrades_to_empty() {
    let server = MockServer::start(|_| Some((200, "<html>not json</html>".into()))).await;
    let client = server.client(5);

    assert!(client.search_verification_records("SN-1", 10, 0).await.is_empty());
}

#[tokio::test]
async fn timeout_degrades_to_empty() {
    let server = MockServer::start(|_| None).await;
    let client = server.client(1);

    let started = Instant::now();
    let page = client.search_verification_records("SN-1", 10, 0).await;

    assert!(page.is_empty());
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[tokio::test]
async fn unreachable_service_degrades_to_empty() {
    let config = RegistryConfig {
        verification_url: "http://127.0.0.1:9/vri/select".into(),
        type_registry_url: "http://127.0.0.1:9/mit".into(),
        timeout_secs: 2,
        ..Default::default()
    };
    let client = RegistryClient::new(&config).unwrap();

    assert!(client.search_verification_records("SN-1", 10, 0).await.is_empty());
    assert!(client.fetch_all_pages_for_org("Metrology Center", 500).await.is_empty());
}

#[tokio::test]
async fn type_registry_returns_first_item() {
    let server = MockServer::start(|_| {
        Some((
            200,
            json!({ "result": { "count": 2, "items": [
                { "mit_uuid": "u-1", "number": "48316-11", "title": "Manometers" },
                { "mit_uuid": "u-2", "number": "48316-16", "title": "Manometers" }
            ] } })
            .to_string(),
        ))
    })
    .await;
    let client = server.client(5);

    let item = client.search_type_registry("48316-11").await.unwrap();
    let record = matcher::match_type_approval(&item).unwrap();
    assert_eq!(record.source_record_id, "u-1");

    let path = &server.paths()[0];
    assert!(path.starts_with("/mit?search=48316-11&rows=1&start=0"), "path: {path}");
}

#[tokio::test]
async fn wildcard_search_sends_escaped_term() {
    let server = MockServer::start(|_| {
        Some((200, json!({ "response": { "numFound": 0, "docs": [] } }).to_string()))
    })
    .await;
    let client = server.client(5);

    client.search_verification_records("SN-1", 10, 0).await;

    let path = &server.paths()[0];
    assert!(path.starts_with("/vri/select?q=*&fq="), "path: {path}");
    assert!(path.contains("mi.number%3A*SN%5C-1*"), "path: {path}");
}
