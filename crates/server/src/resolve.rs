//! The cache-aside resolver.
//!
//! Lookup in the store, fall back to an upstream fetch on miss, persist
//! the fetched fragment, serve it either way. A storage fault during
//! lookup degrades to a fetch; a fault during persist is swallowed after
//! logging, since a usable body is already in hand.

use gndcache_client::UpstreamClient;
use gndcache_core::{Error, StoreDb};

/// Outcome of resolving an identifier.
///
/// Distinguishes "served, cached" from "served, not cached" rather than
/// discarding persistence errors silently.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// Served from the store; no outbound call was made.
    Hit { content: Vec<u8> },
    /// Served from a fresh fetch. `persisted` is false when the write-back
    /// failed and a future request for this id will fetch again.
    Fetched { content: Vec<u8>, persisted: bool },
    /// Upstream answered with a non-200 status; relayed to the caller,
    /// never cached.
    UpstreamStatus { status: u16 },
}

/// Resolve an identifier to its raw fragment.
///
/// Errors only when the upstream call itself cannot be made; every HTTP
/// answer from upstream, 200 or not, produces a `Resolution`.
pub async fn resolve(store: &StoreDb, upstream: &UpstreamClient, id: &str) -> Result<Resolution, Error> {
    match store.get_document(id).await {
        Ok(Some(content)) => {
            tracing::debug!(id, "cache hit");
            return Ok(Resolution::Hit { content });
        }
        Ok(None) => {}
        Err(e) => {
            // A degraded cache is not a reason to fail the request.
            tracing::warn!(id, error = %e, "cache lookup failed, falling back to upstream");
        }
    }

    let doc = upstream.fetch(id).await?;

    if !doc.is_ok() {
        tracing::debug!(id, status = doc.status, "upstream answered non-200, passing through");
        return Ok(Resolution::UpstreamStatus { status: doc.status });
    }

    let content = doc.body.to_vec();

    let persisted = match store.insert_document(id, &content).await {
        Ok(()) => true,
        Err(Error::DuplicateDocument(_)) => {
            tracing::debug!(id, "already cached by a concurrent request");
            true
        }
        Err(e) => {
            tracing::warn!(id, error = %e, "failed to persist fetched document, serving uncached");
            false
        }
    };

    Ok(Resolution::Fetched { content, persisted })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gndcache_client::UpstreamConfig;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FRAGMENT: &[u8] = b"<gndo:DifferentiatedPerson rdf:about=\"http://d-nb.info/gnd/118514768\"/>";

    fn upstream_for(base_url: &str) -> UpstreamClient {
        UpstreamClient::new(UpstreamConfig { base_url: base_url.to_string(), ..Default::default() }).unwrap()
    }

    #[tokio::test]
    async fn test_read_through_is_idempotent() {
        let mock_server = MockServer::start().await;

        // The second resolve must be answered from the store.
        Mock::given(method("GET"))
            .and(path("/gnd/118514768/about/rdf"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(FRAGMENT))
            .expect(1)
            .mount(&mock_server)
            .await;

        let store = StoreDb::open_in_memory().await.unwrap();
        let upstream = upstream_for(&mock_server.uri());

        let first = resolve(&store, &upstream, "118514768").await.unwrap();
        let Resolution::Fetched { content: first_content, persisted } = first else {
            panic!("expected a fresh fetch");
        };
        assert!(persisted);
        assert_eq!(first_content, FRAGMENT);

        let second = resolve(&store, &upstream, "118514768").await.unwrap();
        let Resolution::Hit { content: second_content } = second else {
            panic!("expected a cache hit");
        };
        assert_eq!(second_content, FRAGMENT);

        assert_eq!(store.document_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_non_200_passes_through_and_is_not_cached() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/gnd/000000000/about/rdf"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let store = StoreDb::open_in_memory().await.unwrap();
        let upstream = upstream_for(&mock_server.uri());

        let resolution = resolve(&store, &upstream, "000000000").await.unwrap();
        assert!(matches!(resolution, Resolution::UpstreamStatus { status: 404 }));
        assert_eq!(store.document_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unreachable_upstream_leaves_store_unchanged() {
        let store = StoreDb::open_in_memory().await.unwrap();
        let upstream = upstream_for("http://127.0.0.1:1");

        let result = resolve(&store, &upstream, "118514768").await;
        assert!(matches!(result, Err(Error::UpstreamUnreachable(_))));
        assert_eq!(store.document_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_cached_content_wins_over_upstream() {
        // Upstream would answer differently; the stored fragment is served.
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/gnd/118514768/about/rdf"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<gndo:Changed/>"))
            .expect(0)
            .mount(&mock_server)
            .await;

        let store = StoreDb::open_in_memory().await.unwrap();
        store.insert_document("118514768", FRAGMENT).await.unwrap();
        let upstream = upstream_for(&mock_server.uri());

        let resolution = resolve(&store, &upstream, "118514768").await.unwrap();
        let Resolution::Hit { content } = resolution else {
            panic!("expected a cache hit");
        };
        assert_eq!(content, FRAGMENT);
    }

    #[tokio::test]
    async fn test_concurrent_first_requests_agree() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/gnd/118514768/about/rdf"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(FRAGMENT))
            .mount(&mock_server)
            .await;

        let store = StoreDb::open_in_memory().await.unwrap();
        let upstream = upstream_for(&mock_server.uri());

        let (a, b) = tokio::join!(
            resolve(&store, &upstream, "118514768"),
            resolve(&store, &upstream, "118514768"),
        );

        for resolution in [a.unwrap(), b.unwrap()] {
            match resolution {
                Resolution::Hit { content } | Resolution::Fetched { content, .. } => {
                    assert_eq!(content, FRAGMENT);
                }
                other => panic!("unexpected resolution: {other:?}"),
            }
        }

        // Exactly one row regardless of which request won the insert.
        assert_eq!(store.document_count().await.unwrap(), 1);
    }
}
