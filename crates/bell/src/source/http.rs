//! HTTP summary source
//!
//! Uses synchronous HTTP (ureq) on tokio's blocking pool so the widget's
//! event loop is never stalled by a slow backend.

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use url::Url;

use super::{SummarySource, parse_summary};
use crate::config::WidgetConfig;
use crate::error::FetchError;
use crate::models::NotificationSnapshot;

/// Marks the call as programmatic so the backend answers with JSON
/// instead of redirecting to a login page.
const REQUESTED_WITH: &str = "XMLHttpRequest";

/// Reads the admin summary endpoint over HTTP
pub struct HttpSummarySource {
    agent: ureq::Agent,
    url: Url,
    session_cookie: Option<String>,
}

impl HttpSummarySource {
    pub fn new(url: Url) -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
            url,
            session_cookie: None,
        }
    }

    /// Send this `Cookie` header value with every request, standing in for
    /// the browser's same-origin session credentials.
    pub fn with_session_cookie(mut self, cookie: Option<String>) -> Self {
        self.session_cookie = cookie.filter(|c| !c.is_empty());
        self
    }

    /// Build a source for the endpoint described by `config`
    pub fn from_config(config: &WidgetConfig) -> Result<Self> {
        Ok(Self::new(config.endpoint()?).with_session_cookie(config.session_cookie.clone()))
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl SummarySource for HttpSummarySource {
    async fn fetch_summary(&self) -> Result<NotificationSnapshot, FetchError> {
        let agent = self.agent.clone();
        let url = self.url.to_string();
        let cookie = self.session_cookie.clone();

        tokio::task::spawn_blocking(move || fetch_blocking(&agent, &url, cookie.as_deref()))
            .await
            .map_err(|e| FetchError::Transport(format!("Fetch task failed: {}", e)))?
    }
}

fn fetch_blocking(
    agent: &ureq::Agent,
    url: &str,
    cookie: Option<&str>,
) -> Result<NotificationSnapshot, FetchError> {
    debug!("GET {}", url);

    let mut request = agent
        .get(url)
        .header("Accept", "application/json")
        .header("X-Requested-With", REQUESTED_WITH);
    if let Some(cookie) = cookie {
        request = request.header("Cookie", cookie);
    }

    let mut response = match request.call() {
        Ok(response) => response,
        Err(ureq::Error::StatusCode(code)) => return Err(FetchError::Status(code)),
        Err(e) => return Err(FetchError::Transport(e.to_string())),
    };

    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| FetchError::Transport(e.to_string()))?;

    parse_summary(&body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::JoinHandle;

    /// Serve a single canned response, returning the raw request text
    fn serve_once(status: &'static str, body: &'static str) -> (Url, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&request).to_lowercase()
        });

        let url = Url::parse(&format!("http://{}/api/v1/notifications/admin-summary/", addr)).unwrap();
        (url, handle)
    }

    #[tokio::test]
    async fn test_fetch_success_sends_marker_headers() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"summary": {"total_unreplied": 4}, "recent_messages": []}"#,
        );
        let source = HttpSummarySource::new(url).with_session_cookie(Some("sessionid=abc".into()));

        let snapshot = source.fetch_summary().await.unwrap();
        assert_eq!(snapshot.total_unreplied(), 4);

        let request = server.join().unwrap();
        assert!(request.starts_with("get /api/v1/notifications/admin-summary/"));
        assert!(request.contains("accept: application/json"));
        assert!(request.contains("x-requested-with: xmlhttprequest"));
        assert!(request.contains("cookie: sessionid=abc"));
    }

    #[tokio::test]
    async fn test_fetch_server_error_is_status() {
        let (url, server) = serve_once("500 Internal Server Error", "{}");
        let source = HttpSummarySource::new(url);

        let err = source.fetch_summary().await.unwrap_err();
        assert_eq!(err, FetchError::Status(500));
        server.join().unwrap();
    }

    #[tokio::test]
    async fn test_fetch_bad_body_is_parse_error() {
        let (url, server) = serve_once("200 OK", "not json");
        let source = HttpSummarySource::new(url);

        let err = source.fetch_summary().await.unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
        server.join().unwrap();
    }

    #[tokio::test]
    async fn test_fetch_unreachable_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = Url::parse(&format!("http://{}/summary/", addr)).unwrap();
        let err = HttpSummarySource::new(url).fetch_summary().await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }
}
