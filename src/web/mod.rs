// Web server — Axum JSON API over the trending pipeline.
//
// One data route plus a health check. Errors map to the uniform
// `{success: false, message}` failure shape: an empty result is a 404,
// an upstream transport failure is a 502 — distinct on purpose so the
// dashboard can tell "nothing matched" from "Reddit is down".

use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::error::TrendError;
use crate::pipeline::TrendingPipeline;
use crate::reddit;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<TrendingPipeline>,
}

/// Start the Axum server and block until it exits.
pub async fn run_server(pipeline: Arc<TrendingPipeline>, port: u16, bind: &str) -> Result<()> {
    let state = AppState { pipeline };
    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("Smolder trend API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/trending", get(get_trending))
        .route("/health", get(health))
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([axum::http::Method::GET, axum::http::Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Deserialize, Default)]
pub struct TrendingQuery {
    /// Free-text search; absent means the hot/global feed.
    pub query: Option<String>,
    /// Max posts to fetch (default 50, max 100).
    pub limit: Option<usize>,
}

/// GET /api/trending — run the pipeline and return ranked topics.
async fn get_trending(
    State(state): State<AppState>,
    Query(params): Query<TrendingQuery>,
) -> Response {
    let query = params
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty());
    let limit = params.limit.unwrap_or(reddit::DEFAULT_LIMIT).clamp(1, 100);

    let mut rng = StdRng::from_os_rng();
    match state.pipeline.run(query, limit, &mut rng).await {
        Ok(report) => Json(report).into_response(),
        Err(TrendError::EmptyResult) => {
            api_error(StatusCode::NOT_FOUND, "No reddit posts found.")
        }
        Err(e @ TrendError::UpstreamFetch(_)) => {
            error!(error = %e, "upstream fetch failed");
            api_error(StatusCode::BAD_GATEWAY, "Failed to fetch Reddit data.")
        }
        Err(e) => {
            // Oracle errors degrade inside the categorizer; reaching here
            // would be a bug, but the caller still gets the uniform shape.
            error!(error = %e, "unexpected pipeline error");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal error.")
        }
    }
}

/// Health check — always returns 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Uniform JSON failure shape.
fn api_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(serde_json::json!({ "success": false, "message": message })),
    )
        .into_response()
}
