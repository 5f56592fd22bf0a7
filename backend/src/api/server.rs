//! HTTP server for the evidence map.
//!
//! The dataset is loaded before the server starts and shared read-only with
//! every handler. Each request filters and renders from scratch.
//!
//! # API Endpoints
//!
//! | Method | Path              | Description                          |
//! |--------|-------------------|--------------------------------------|
//! | GET    | `/health`         | Health check                         |
//! | GET    | `/api/options`    | Dropdown values and categories found |
//! | GET    | `/api/map`        | Filtered map with rendered chart     |
//! | GET    | `/api/chart.svg`  | Rendered chart only                  |
//! | GET    | `/api/logs`       | SSE stream for logs                  |

use axum::{
    extract::{Query, State},
    http::{header, Method, StatusCode},
    response::{sse::Event, IntoResponse, Json, Sse},
    routing::get,
    Router,
};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::{convert::Infallible, net::SocketAddr, sync::Arc, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;

use super::logs::{log_error, log_info, LogEntry, LOG_BROADCASTER};
use super::types::{error_response, MapQuery, MapResponse, OptionsResponse};
use crate::chart::{render, ChartOptions, RenderedChart};
use crate::error::{RenderError, ServerResult};
use crate::models::FilterSelection;
use crate::transform::{EvidenceDataset, EvidenceMap};

/// Immutable state shared by all handlers.
#[derive(Debug)]
pub struct AppState {
    pub dataset: EvidenceDataset,
    pub chart: ChartOptions,
}

pub type SharedState = Arc<AppState>;

type ApiError = (StatusCode, Json<Value>);

/// Build the router over a loaded dataset.
pub fn router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/options", get(options))
        .route("/api/map", get(evidence_map))
        .route("/api/chart.svg", get(chart_svg))
        .route("/api/logs", get(sse_logs))
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(state: AppState, port: u16) -> ServerResult<()> {
    let app = router(Arc::new(state));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    log_info(format!("Evidence map server running on http://localhost:{}", port));
    log_info("GET /api/options   - Filter values");
    log_info("GET /api/map       - Filtered map (JSON + SVG)");
    log_info("GET /api/chart.svg - Chart only");
    log_info("GET /api/logs      - SSE log stream");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "evidence-map",
        "version": env!("CARGO_PKG_VERSION"),
        "dataset": {
            "source": state.dataset.source().display().to_string(),
            "rows": state.dataset.len(),
            "loadedAt": state.dataset.loaded_at(),
        }
    }))
}

async fn options(State(state): State<SharedState>) -> Json<OptionsResponse> {
    Json(OptionsResponse::new(
        state.dataset.filter_options(),
        state.dataset.confidence_categories(),
        state.dataset.len(),
    ))
}

async fn evidence_map(
    State(state): State<SharedState>,
    Query(query): Query<MapQuery>,
) -> Result<Json<MapResponse>, ApiError> {
    let (map, chart) = build_and_render(&state, query.into()).map_err(internal_error)?;
    Ok(Json(MapResponse::new(map, chart)))
}

async fn chart_svg(
    State(state): State<SharedState>,
    Query(query): Query<MapQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (_, chart) = build_and_render(&state, query.into()).map_err(internal_error)?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], chart.svg))
}

fn build_and_render(
    state: &AppState,
    selection: FilterSelection,
) -> Result<(EvidenceMap, RenderedChart), RenderError> {
    let map = state.dataset.build_map(&selection);
    let chart = render(&map, &state.chart)?;
    Ok((map, chart))
}

fn internal_error(e: RenderError) -> ApiError {
    log_error(format!("Render error: {}", e));
    (StatusCode::INTERNAL_SERVER_ERROR, Json(error_response(&e.to_string())))
}

/// SSE endpoint: replays recent history, then streams live entries.
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    // subscribe first so nothing falls between replay and live
    let rx = LOG_BROADCASTER.subscribe();
    let replay = tokio_stream::iter(LOG_BROADCASTER.history()).filter_map(|entry| to_event(&entry));
    let live = BroadcastStream::new(rx).filter_map(|result| result.ok().and_then(|entry| to_event(&entry)));

    Sse::new(replay.chain(live)).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

fn to_event(entry: &LogEntry) -> Option<Result<Event, Infallible>> {
    let json = serde_json::to_string(entry).ok()?;
    Some(Ok(Event::default().data(json)))
}
