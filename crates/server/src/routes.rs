//! HTTP surface.
//!
//! # Routes
//!
//! - `GET /gnd/{id}` - 303 redirect to the canonical cache resource
//! - `GET /cache/{id}` - namespace-wrapped RDF/XML document for `id`
//! - `GET /` - service description and version

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Serialize;

use gndcache_client::UpstreamClient;
use gndcache_core::{StoreDb, wrap_fragment};

use crate::resolve::{Resolution, resolve};

/// Shared server state, constructed once at startup.
pub struct AppState {
    pub store: StoreDb,
    pub upstream: UpstreamClient,
}

/// Build the router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/gnd/{id}", get(redirect_to_cache))
        .route("/cache/{id}", get(serve_document))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct IndexResponse {
    msg: String,
    version: String,
}

async fn index(headers: HeaderMap) -> Json<IndexResponse> {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost:5000");

    Json(IndexResponse {
        msg: format!("Cached RDF/XML documents from GND. Example: http://{host}/cache/118514768"),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Alias route: the bare identifier path redirects to the cache resource.
async fn redirect_to_cache(Path(id): Path<String>) -> Redirect {
    Redirect::to(&format!("/cache/{id}"))
}

async fn serve_document(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    match resolve(&state.store, &state.upstream, &id).await {
        Ok(Resolution::Hit { content } | Resolution::Fetched { content, .. }) => {
            let fragment = String::from_utf8_lossy(&content);
            (
                [(header::CONTENT_TYPE, "application/rdf+xml; charset=utf-8")],
                wrap_fragment(&fragment),
            )
                .into_response()
        }
        Ok(Resolution::UpstreamStatus { status }) => {
            let code = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            let reason = code.canonical_reason().unwrap_or("");
            (code, format!("{status} {reason}\n")).into_response()
        }
        Err(e) => {
            tracing::error!(id = %id, error = %e, "upstream fetch failed");
            (StatusCode::BAD_GATEWAY, format!("{e}\n")).into_response()
        }
    }
}
