// HTTP request handlers for planning data
use crate::domain::planning::ForecastRequest;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

/// Encode `data` as JSON, Brotli-compressed when the request allows it
pub(crate) async fn respond<T: Serialize>(headers: &HeaderMap, data: &T) -> Response {
    match json_response(StatusCode::OK, data, accepts_brotli(headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List tasks, or the fixed fallback list when upstream is unavailable
pub async fn list_tasks(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let tasks = state.planning_service.tasks().await;
    respond(&headers, &tasks).await
}

/// List orders, or the fixed fallback list when upstream is unavailable
pub async fn list_orders(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let orders = state.planning_service.orders().await;
    respond(&headers, &orders).await
}

pub async fn dashboard(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let snapshot = state.planning_service.dashboard().await;
    respond(&headers, &snapshot).await
}

pub async fn predict(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(request): Json<ForecastRequest>,
) -> Response {
    let forecast = state.planning_service.forecast(&request).await;
    respond(&headers, &forecast).await
}

pub async fn weather(
    Path(plz): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let readings = state.planning_service.weather(&plz).await;
    respond(&headers, &readings).await
}
