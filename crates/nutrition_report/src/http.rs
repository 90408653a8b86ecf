//! Read-only HTTP surface over [`ReportService`].

use std::sync::Arc;
use std::time::Duration;

use axum::debug_handler;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use metrics_exporter_prometheus::PrometheusHandle;
use nutrition_sheet_client::RawRecord;
use serde::Deserialize;
use tower_http::timeout::TimeoutLayer;

use crate::domains::{Dashboard, MeasurementSeries};
use crate::error::ReportError;
use crate::report::Report;
use crate::service::ReportService;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct AppState {
    pub service: ReportService,
    pub metrics: PrometheusHandle,
}

#[derive(Debug, Default, Deserialize)]
struct RangeParams {
    start: Option<String>,
    end: Option<String>,
}

#[debug_handler]
async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

#[debug_handler]
async fn metrics_endpoint(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let body = state.metrics.render();
    ([("content-type", "text/plain; version=0.0.4")], body)
}

#[debug_handler]
async fn get_records(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RawRecord>>, (StatusCode, String)> {
    state.service.load_records().await.map(Json).map_err(map_err)
}

#[debug_handler]
async fn get_report(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RangeParams>,
) -> Result<Json<Report>, (StatusCode, String)> {
    state
        .service
        .weekly_report(params.start.as_deref(), params.end.as_deref())
        .await
        .map(Json)
        .map_err(map_err)
}

#[debug_handler]
async fn get_dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Dashboard>, (StatusCode, String)> {
    state.service.dashboard().await.map(Json).map_err(map_err)
}

#[debug_handler]
async fn get_measurements(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MeasurementSeries>, (StatusCode, String)> {
    state.service.measurements().await.map(Json).map_err(map_err)
}

fn map_err(e: ReportError) -> (StatusCode, String) {
    match e {
        ReportError::InvalidRange(_) => (StatusCode::BAD_REQUEST, e.to_string()),
        ReportError::EmptyResult => (StatusCode::NOT_FOUND, e.to_string()),
        ReportError::Sheet(_) => (StatusCode::BAD_GATEWAY, e.to_string()),
        ReportError::Serialization(_) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

pub fn router(state: Arc<AppState>, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_endpoint))
        .route("/records", get(get_records))
        .route("/report", get(get_report))
        .route("/dashboard", get(get_dashboard))
        .route("/measurements", get(get_measurements))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .with_state(state)
}
