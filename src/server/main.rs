//! HTTP service for event spacing.
//!
//! Accepts document change notifications for events, fills them with spaced
//! points and stores the result. Also exposes point generation directly.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use eventspacer::config::Config;
use eventspacer::spacer::{generate_blocking, validate_request};
use eventspacer::store::{EventStore, MemoryEventStore};
use eventspacer::trigger::DocumentEventPayload;
use eventspacer::{Coordinate, Event, EventSpacer, Rectangle, SpacerError};

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Event spacing server")]
struct Args {
    /// Config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overrides the config file
    #[arg(short, long)]
    listen: Option<String>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

/// Application state shared across handlers
struct AppState {
    spacer: EventSpacer,
}

type ApiError = (StatusCode, String);

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match &args.config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            Config::load_from_file(path)?
        }
        None => Config::default(),
    };
    let listen = args.listen.unwrap_or(config.server.listen);

    info!("Eventspacer Server");
    info!("Point cap: {}", config.spacer.max_points);

    let store: Arc<dyn EventStore> = Arc::new(MemoryEventStore::new());
    let state = Arc::new(AppState {
        spacer: EventSpacer::new(store, config.spacer.max_points),
    });

    // Build router
    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/v1/points", post(points_handler))
        .route("/v1/events", post(trigger_handler))
        .route("/v1/events/{id}", get(event_handler))
        .route("/v1/events/{id}/respace", post(respace_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!("Starting server on {}", listen);

    let listener = tokio::net::TcpListener::bind(&listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Deserialize)]
struct PointsRequest {
    nw: Coordinate,
    se: Coordinate,
    spacing_meters: f64,
    /// Clamped to the configured cap
    max_points: Option<usize>,
}

#[derive(Serialize)]
struct PointsResponse {
    count: usize,
    points: Vec<Coordinate>,
}

/// Generate points for an ad-hoc rectangle
async fn points_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PointsRequest>,
) -> Result<Json<PointsResponse>, ApiError> {
    let cap = state.spacer.max_points();
    let max_points = request.max_points.unwrap_or(cap).min(cap);
    let rectangle = Rectangle::new(request.nw, request.se);

    validate_request(&rectangle, request.spacing_meters, max_points)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let points = generate_blocking(request.nw, request.se, request.spacing_meters, max_points)
        .await
        .map_err(|e| api_error("Point generation failed", e))?;

    Ok(Json(PointsResponse {
        count: points.len(),
        points,
    }))
}

/// Space the event carried by a document change notification
async fn trigger_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DocumentEventPayload>,
) -> Result<Json<Event>, ApiError> {
    let event = state
        .spacer
        .handle_trigger(payload)
        .await
        .map_err(|e| api_error("Trigger handling failed", e))?;

    Ok(Json(event))
}

/// Fetch a stored event
async fn event_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Event>, ApiError> {
    let event = state
        .spacer
        .store()
        .fetch_event(&id)
        .await
        .map_err(|e| api_error("Event fetch failed", e))?
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("event {} not found", id)))?;

    Ok(Json(event))
}

/// Regenerate points for a stored event
async fn respace_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Event>, ApiError> {
    let event = state
        .spacer
        .respace(&id)
        .await
        .map_err(|e| api_error("Respacing failed", e))?;

    Ok(Json(event))
}

/// Map service errors onto HTTP status codes
fn api_error(what: &str, err: anyhow::Error) -> ApiError {
    match err.downcast_ref::<SpacerError>() {
        Some(SpacerError::EventNotFound(_)) => (StatusCode::NOT_FOUND, err.to_string()),
        Some(e) if e.is_invalid_input() => (StatusCode::BAD_REQUEST, err.to_string()),
        _ => {
            tracing::error!("{}: {:#}", what, err);
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}
