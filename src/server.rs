//! HTTP surface: `/suggestions`, `/analyze` and `/health`.

use anyhow::Result;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::analyzers::aggregate::MetricsAggregator;
use crate::analyzers::analyzer::analyze_place;
use crate::analyzers::time_segment::TimeSegment;
use crate::analyzers::types::SafetyAssessment;
use crate::error::AnalysisError;
use crate::services::place_data::{PlaceDataProvider, Suggestion};

pub const NO_DATA: &str = "No data";

#[derive(Debug, Deserialize)]
pub struct SuggestionsParams {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeParams {
    pub place_id: String,
    /// Time segment label; the current local window is used when absent.
    #[serde(default)]
    pub time: Option<String>,
}

/// Either the assessment or `{"error": "No data"}`. Both are served with 200,
/// so callers inspect the payload shape.
#[derive(Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum AnalyzeResponse {
    Assessment(SafetyAssessment),
    Error { error: String },
}

impl AnalyzeResponse {
    pub fn no_data() -> Self {
        AnalyzeResponse::Error {
            error: NO_DATA.to_string(),
        }
    }
}

pub fn router<P>(aggregator: Arc<MetricsAggregator<P>>) -> Router
where
    P: PlaceDataProvider + 'static,
{
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(healthcheck))
        .route("/suggestions", get(suggestions::<P>))
        .route("/analyze", get(analyze::<P>))
        .layer(cors)
        .with_state(aggregator)
}

/// Binds `addr` and serves until Ctrl+C.
pub async fn serve<P>(aggregator: Arc<MetricsAggregator<P>>, addr: SocketAddr) -> Result<()>
where
    P: PlaceDataProvider + 'static,
{
    let app = router(aggregator);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(%addr, "Place safety API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

pub async fn healthcheck() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `GET /suggestions?query=<text>`
pub async fn suggestions<P: PlaceDataProvider>(
    State(aggregator): State<Arc<MetricsAggregator<P>>>,
    Query(params): Query<SuggestionsParams>,
) -> Json<Vec<Suggestion>> {
    let text = params.query.trim();
    if text.is_empty() {
        return Json(Vec::new());
    }

    match aggregator.provider().autocomplete(text).await {
        Ok(found) => Json(found),
        Err(e) => {
            warn!(error = %e, "Autocomplete failed, returning no suggestions");
            Json(Vec::new())
        }
    }
}

/// `GET /analyze?place_id=<id>&time=<segment-label>`
pub async fn analyze<P: PlaceDataProvider>(
    State(aggregator): State<Arc<MetricsAggregator<P>>>,
    Query(params): Query<AnalyzeParams>,
) -> Json<AnalyzeResponse> {
    let segment = params
        .time
        .as_deref()
        .map(TimeSegment::from_label)
        .unwrap_or_else(TimeSegment::now);

    match analyze_place(&aggregator, &params.place_id, segment).await {
        Ok(analysis) => Json(AnalyzeResponse::Assessment(analysis.assessment)),
        Err(AnalysisError::NotFound(place_id)) => {
            info!(place_id = %place_id, "No coordinate for place");
            Json(AnalyzeResponse::no_data())
        }
        Err(e) => {
            warn!(error = %e, "Analysis failed");
            Json(AnalyzeResponse::no_data())
        }
    }
}
