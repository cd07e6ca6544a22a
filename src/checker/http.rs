// src/checker/http.rs
// =============================================================================
// This module checks if external URLs are alive by making HTTP requests.
//
// Key functionality:
// - Makes HTTP HEAD requests first (lightweight, no body download)
// - Falls back to GET once, but ONLY if HEAD failed at the transport level
//   (a 404 or 500 answer to HEAD is already a real answer)
// - Runs checks on a fixed-size pool of workers fed from a shared queue
//
// Pool layout:
//
//   queue (VecDeque<String>) --pop--> worker 0..N --send--> result channel
//                                       (own Client)              |
//                                                           coordinator
//
// Every URL is popped exactly once, so nothing is probed twice and nothing
// is dropped. Results are only merged by the coordinator.
// =============================================================================

use crate::error::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tracing::debug;

pub const DEFAULT_WORKERS: usize = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

// Represents the outcome of verifying a link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LinkStatus {
    /// Server answered with a status below 400
    Ok { code: u16 },
    /// Server answered with 400 or above
    HttpError { code: u16 },
    /// No usable answer from either HEAD or GET
    NetworkError { reason: String },
}

// Represents the result of checking a single link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkCheckResult {
    /// The URL that was checked
    pub url: String,
    /// The status of the link
    #[serde(flatten)]
    pub status: LinkStatus,
}

impl LinkCheckResult {
    pub fn is_ok(&self) -> bool {
        matches!(self.status, LinkStatus::Ok { .. })
    }
}

#[derive(Debug, Clone)]
pub struct VerifierOptions {
    /// Width of the worker pool
    pub workers: usize,
    /// Per-attempt timeout (HEAD and GET each get the full budget)
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for VerifierOptions {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("seo-guardian/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

// Checks a set of distinct URLs with a bounded pool
//
// The input is deduplicated again here so a caller can't accidentally
// get the same URL probed twice.
//
// Returns: one LinkCheckResult per distinct URL, in completion order
pub async fn verify_links(urls: Vec<String>, options: &VerifierOptions) -> Result<Vec<LinkCheckResult>> {
    let unique: BTreeSet<String> = urls.into_iter().collect();
    let total = unique.len();
    if total == 0 {
        return Ok(Vec::new());
    }

    let width = options.workers.clamp(1, total);
    debug!("Verifying {} URL(s) with {} worker(s)", total, width);

    let queue = Arc::new(Mutex::new(unique.into_iter().collect::<VecDeque<_>>()));
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut handles = Vec::with_capacity(width);
    for worker_id in 0..width {
        // Each worker owns its client (and so its connection pool)
        let client = build_client(options)?;
        let queue = queue.clone();
        let tx = tx.clone();

        handles.push(tokio::spawn(async move {
            loop {
                // The lock is released before the request is made
                let next = queue.lock().await.pop_front();
                let Some(url) = next else { break };

                let result = check_single_link(&client, url).await;
                debug!("Worker {} checked {} -> {:?}", worker_id, result.url, result.status);
                if tx.send(result).is_err() {
                    break;
                }
            }
        }));
    }

    // Drop our sender so the channel closes once every worker is done
    drop(tx);

    let mut results = Vec::with_capacity(total);
    while let Some(result) = rx.recv().await {
        results.push(result);
    }

    for joined in futures::future::join_all(handles).await {
        joined?;
    }

    Ok(results)
}

fn build_client(options: &VerifierOptions) -> Result<Client> {
    Ok(Client::builder()
        .user_agent(options.user_agent.as_str())
        .timeout(options.timeout)
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()?)
}

// Checks a single link: HEAD first, then GET if HEAD never got an answer
async fn check_single_link(client: &Client, url: String) -> LinkCheckResult {
    let status = match client.head(&url).send().await {
        Ok(response) => classify_status(response.status().as_u16()),
        Err(head_error) => {
            debug!("HEAD {} failed ({}), retrying with GET", url, head_error);
            // `send` resolves once headers arrive; the body is never read
            match client.get(&url).send().await {
                Ok(response) => classify_status(response.status().as_u16()),
                Err(e) => LinkStatus::NetworkError {
                    reason: categorize_error(&e),
                },
            }
        }
    };

    LinkCheckResult { url, status }
}

fn classify_status(code: u16) -> LinkStatus {
    if code < 400 {
        LinkStatus::Ok { code }
    } else {
        LinkStatus::HttpError { code }
    }
}

// Turns a reqwest transport error into a short human reason
fn categorize_error(error: &reqwest::Error) -> String {
    let error_string = error.to_string();

    if error.is_timeout() {
        "Request timed out".to_string()
    } else if error.is_redirect() {
        "Too many redirects".to_string()
    } else if error.is_connect() {
        if error_string.contains("dns") {
            "Could not resolve hostname".to_string()
        } else {
            "Connection failed".to_string()
        }
    } else if error_string.contains("certificate") || error_string.contains("ssl") {
        "SSL certificate error".to_string()
    } else {
        error_string
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a worker pool instead of one task per URL?
//    - The pool width caps how many requests are in flight, no matter how
//      many URLs a site links to
//    - Each worker loops: pop a URL, check it, send the result, repeat
//
// 2. Why tokio::sync::Mutex around the queue?
//    - Many tasks pop from the same VecDeque
//    - The guard is a temporary, so the lock is held only for pop_front()
//
// 3. What is mpsc?
//    - "multi-producer, single-consumer" channel
//    - Every worker holds a Sender clone; the coordinator owns the Receiver
//    - recv() returns None once every Sender is dropped, i.e. all workers are done
//
// 4. Why is a 404 on HEAD not retried with GET?
//    - A status code is a real answer from the server
//    - Only transport failures (timeout, refused, TLS) hint that the server
//      dislikes HEAD, so only those fall back
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fast_options() -> VerifierOptions {
        VerifierOptions {
            timeout: Duration::from_millis(300),
            ..VerifierOptions::default()
        }
    }

    #[tokio::test]
    async fn test_ok_link() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let results = verify_links(vec![format!("{}/ok", server.uri())], &fast_options())
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status, LinkStatus::Ok { code: 200 });
    }

    #[tokio::test]
    async fn test_head_404_does_not_fall_back() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let results = verify_links(vec![format!("{}/gone", server.uri())], &fast_options())
            .await
            .unwrap();
        assert_eq!(results[0].status, LinkStatus::HttpError { code: 404 });
    }

    #[tokio::test]
    async fn test_head_timeout_falls_back_to_get() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let results = verify_links(vec![format!("{}/slow-head", server.uri())], &fast_options())
            .await
            .unwrap();
        assert!(results[0].is_ok());
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Grab a free port, then close it so nothing is listening there
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let results = verify_links(vec![format!("http://127.0.0.1:{}/", port)], &fast_options())
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert!(matches!(results[0].status, LinkStatus::NetworkError { .. }));
    }

    #[tokio::test]
    async fn test_duplicates_probed_once() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/same", server.uri());
        let results = verify_links(vec![url.clone(), url.clone(), url], &fast_options())
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_hundred_urls_ten_workers() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(204))
            .expect(100)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let urls: Vec<String> = (0..100).map(|i| format!("{}/page/{}", server.uri(), i)).collect();
        let options = VerifierOptions {
            workers: 10,
            ..fast_options()
        };
        let results = verify_links(urls.clone(), &options).await.unwrap();

        assert_eq!(results.len(), 100);
        let seen: HashSet<_> = results.iter().map(|r| r.url.clone()).collect();
        assert_eq!(seen, urls.into_iter().collect::<HashSet<_>>());
        assert!(results.iter().all(LinkCheckResult::is_ok));
    }

    #[tokio::test]
    async fn test_empty_input() {
        let results = verify_links(Vec::new(), &fast_options()).await.unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_classify_status() {
        assert_eq!(classify_status(301), LinkStatus::Ok { code: 301 });
        assert_eq!(classify_status(400), LinkStatus::HttpError { code: 400 });
        assert_eq!(classify_status(503), LinkStatus::HttpError { code: 503 });
    }

    #[test]
    fn test_status_serializes_with_tag() {
        let result = LinkCheckResult {
            url: "https://example.com/".to_string(),
            status: LinkStatus::HttpError { code: 404 },
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "http_error");
        assert_eq!(json["code"], 404);
        assert_eq!(json["url"], "https://example.com/");
    }
}
