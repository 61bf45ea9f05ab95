// src/fetch/http.rs
// =============================================================================
// This module fetches pages over HTTP.
//
// Key functionality:
// - One shared reqwest Client (connection pooling across all workers)
// - Per-request timeout, so the caller decides how long a fetch may take
// - Sorts reqwest failures into Timeout / Status / Network
//
// Rust concepts:
// - async/await: For non-blocking network I/O
// - Traits: HttpFetcher implements the Fetcher trait from fetch/mod.rs
// =============================================================================

use super::{FetchError, Fetcher};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("wiki-crawler/", env!("CARGO_PKG_VERSION"));

// Fetches pages with a reqwest Client
//
// Cloning the Client is cheap (it's an Arc inside), but we keep one per
// fetcher and share the fetcher itself between workers.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Builds the HTTP client
    //
    // No client-wide timeout here: each request gets the timeout the
    // crawler passes to fetch().
    pub fn new() -> reqwest::Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5)) // Follow up to 5 redirects
            .build()?;

        Ok(Self::from_client(client))
    }

    // Wraps a client built elsewhere (custom proxy or TLS settings)
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
        debug!(url, "sending request");

        // The timeout covers connecting, sending and reading the whole body
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(categorize_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response.text().await.map_err(categorize_error)
    }
}

// Sorts reqwest errors into the cases the crawler cares about
//
// Timeouts get retried, everything else is reported as a network error
// with the original message kept for the log.
fn categorize_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if let Some(status) = error.status() {
        FetchError::Status(status.as_u16())
    } else {
        FetchError::Network(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    // Serves exactly one connection with a canned HTTP response
    async fn serve_once(response: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });

        format!("http://{}/wiki/Page", addr)
    }

    // Local servers only: ignore any HTTP_PROXY set in the environment
    fn local_fetcher() -> HttpFetcher {
        HttpFetcher::from_client(Client::builder().no_proxy().build().unwrap())
    }

    #[test]
    fn test_new_builds_client() {
        assert!(HttpFetcher::new().is_ok());
    }

    fn http_response(status_line: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        )
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let url = serve_once(http_response("200 OK", "<html>hello</html>")).await;
        let fetcher = local_fetcher();

        let body = fetcher.fetch(&url, Duration::from_secs(5)).await.unwrap();
        assert_eq!(body, "<html>hello</html>");
    }

    #[tokio::test]
    async fn test_fetch_reports_error_status() {
        let url = serve_once(http_response("404 Not Found", "missing")).await;
        let fetcher = local_fetcher();

        let result = fetcher.fetch(&url, Duration::from_secs(5)).await;
        assert_eq!(result, Err(FetchError::Status(404)));
    }

    #[tokio::test]
    async fn test_fetch_times_out() {
        // Accepts the connection but never answers
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let fetcher = local_fetcher();
        let url = format!("http://{}/wiki/Slow", addr);

        let result = fetcher.fetch(&url, Duration::from_millis(200)).await;
        assert_eq!(result, Err(FetchError::Timeout));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_network_error() {
        // Bind then drop, so nothing is listening on the port
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let fetcher = local_fetcher();
        let url = format!("http://{}/wiki/Gone", addr);

        let result = fetcher.fetch(&url, Duration::from_secs(5)).await;
        assert!(matches!(result, Err(FetchError::Network(_))));
    }
}
