//! Transport used to reach the identity service.
//!
//! The resolver only needs "GET this URL, give me status + body". Keeping that behind a
//! trait lets tests swap the network out and keeps timeout/retry policy out of the
//! resolver.
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http client build error: {0}")]
    Build(String),
    #[error("request error: {0}")]
    Request(String),
    #[error("response body error: {0}")]
    Body(String),
}

/// Raw response from the identity service. The body is not interpreted here.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait IdentityTransport: Send + Sync + 'static {
    // Short name for logs.
    fn name(&self) -> &'static str;

    async fn get(&self, url: Url) -> Result<TransportResponse, TransportError>;
}

/// reqwest-backed transport with a per-request timeout.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl IdentityTransport for ReqwestTransport {
    fn name(&self) -> &'static str {
        "reqwest"
    }

    async fn get(&self, url: Url) -> Result<TransportResponse, TransportError> {
        let resp = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        Ok(TransportResponse {
            status,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn passes_status_and_body_through() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/oauth/access_token/AbC123"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not json"))
            .expect(1)
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new(Duration::from_secs(2)).unwrap();
        let url = Url::parse(&format!("{}/oauth/access_token/AbC123", server.uri())).unwrap();

        let resp = transport.get(url).await.unwrap();
        assert_eq!(resp.status, 404);
        assert!(!resp.is_success());
        assert_eq!(resp.body, b"not json");
    }

    #[tokio::test]
    async fn connection_refused_is_a_request_error() {
        // Bind then drop to get a port nobody listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = ReqwestTransport::new(Duration::from_secs(2)).unwrap();
        let url = Url::parse(&format!("http://{addr}/oauth/access_token/x")).unwrap();

        let err = transport.get(url).await.unwrap_err();
        assert!(matches!(err, TransportError::Request(_)));
    }

    #[tokio::test]
    async fn slow_upstream_times_out() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new(Duration::from_millis(50)).unwrap();
        let url = Url::parse(&format!("{}/oauth/access_token/x", server.uri())).unwrap();

        assert!(transport.get(url).await.is_err());
    }

    #[test]
    fn success_range() {
        let ok = TransportResponse {
            status: 204,
            body: Vec::new(),
        };
        assert!(ok.is_success());

        let redirect = TransportResponse {
            status: 302,
            body: Vec::new(),
        };
        assert!(!redirect.is_success());
    }
}
