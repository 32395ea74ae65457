//! Upstream fetcher for the GND registry.
//!
//! One blocking-style GET per identifier against the registry's per-id
//! "about" resource. Transport failures (DNS, connect, timeout, body read)
//! are errors; any HTTP status, 200 or not, is a successful call whose
//! interpretation belongs to the resolver. No retries.

use bytes::Bytes;
use reqwest::Client;
use std::time::{Duration, Instant};
use url::Url;

use gndcache_core::Error;

/// Configuration for the upstream client.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL of the registry (default: "http://d-nb.info")
    pub base_url: String,

    /// User agent string
    pub user_agent: String,

    /// Request timeout (default: 20s)
    pub timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "http://d-nb.info".to_string(),
            user_agent: concat!("gndcache/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_millis(20_000),
        }
    }
}

/// Response from an upstream fetch.
///
/// Carries the status code even when it is not 200; the resolver decides
/// whether that is a pass-through error response.
#[derive(Debug, Clone)]
pub struct UpstreamDocument {
    /// HTTP status code of the upstream response
    pub status: u16,
    /// Response body bytes
    pub body: Bytes,
}

impl UpstreamDocument {
    /// Whether upstream answered with 200 OK.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// HTTP client for the GND registry.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: Client,
    base_url: String,
}

impl UpstreamClient {
    /// Create a new upstream client with the given configuration.
    pub fn new(config: UpstreamConfig) -> Result<Self, Error> {
        Url::parse(&config.base_url)
            .map_err(|e| Error::UpstreamUnreachable(format!("invalid base URL: {e}")))?;

        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .build()
            .map_err(|e| Error::UpstreamUnreachable(format!("failed to build HTTP client: {e}")))?;

        let base_url = config.base_url.trim_end_matches('/').to_string();

        Ok(Self { http, base_url })
    }

    /// URL of the registry's "about" resource for an identifier.
    pub fn about_url(&self, id: &str) -> String {
        format!("{}/gnd/{}/about/rdf", self.base_url, id)
    }

    /// Fetch the raw fragment for an identifier.
    ///
    /// Returns the status code and full body for any HTTP response;
    /// only transport-level failures are errors.
    pub async fn fetch(&self, id: &str) -> Result<UpstreamDocument, Error> {
        let start = Instant::now();
        let url = self.about_url(id);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::UpstreamUnreachable(format!("GET {url}: {e}")))?;

        let status = response.status().as_u16();

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::UpstreamUnreachable(format!("reading body of {url}: {e}")))?;

        tracing::debug!(
            "fetched {} -> {} in {}ms ({} bytes)",
            url,
            status,
            start.elapsed().as_millis(),
            body.len()
        );

        Ok(UpstreamDocument { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(base_url: &str) -> UpstreamClient {
        UpstreamClient::new(UpstreamConfig { base_url: base_url.to_string(), ..Default::default() }).unwrap()
    }

    #[test]
    fn test_about_url() {
        let client = client_for("http://d-nb.info");
        assert_eq!(client.about_url("118514768"), "http://d-nb.info/gnd/118514768/about/rdf");
    }

    #[test]
    fn test_about_url_trailing_slash() {
        let client = client_for("http://d-nb.info/");
        assert_eq!(client.about_url("118514768"), "http://d-nb.info/gnd/118514768/about/rdf");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = UpstreamClient::new(UpstreamConfig { base_url: "not a url".into(), ..Default::default() });
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fetch_ok() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/gnd/118514768/about/rdf"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<gndo:DifferentiatedPerson/>"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        let doc = client.fetch("118514768").await.unwrap();

        assert_eq!(doc.status, 200);
        assert!(doc.is_ok());
        assert_eq!(&doc.body[..], b"<gndo:DifferentiatedPerson/>");
    }

    #[tokio::test]
    async fn test_fetch_non_200_is_not_an_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/gnd/000000000/about/rdf"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such entity"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        let doc = client.fetch("000000000").await.unwrap();

        assert_eq!(doc.status, 404);
        assert!(!doc.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_unreachable() {
        // Nothing listens on port 1.
        let client = client_for("http://127.0.0.1:1");
        let result = client.fetch("118514768").await;
        assert!(matches!(result, Err(Error::UpstreamUnreachable(_))));
    }
}
