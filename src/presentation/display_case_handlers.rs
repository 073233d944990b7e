// HTTP request handlers for the display case
use crate::application::display_case_service::DisplayCaseError;
use crate::domain::display_case::DragDrop;
use crate::infrastructure::chunked_json::stream_from_receiver;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::respond;
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct SelectTimeBody {
    pub time: String,
}

#[derive(Deserialize)]
pub struct PlaceProductBody {
    pub product_id: u32,
}

#[derive(Deserialize)]
pub struct SlotPath {
    pub time: String,
    pub row: usize,
    pub col: usize,
}

pub async fn overview(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let view = state.display_case_service.overview().await;
    respond(&headers, &view).await
}

pub async fn list_products(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    respond(&headers, &state.display_case_service.catalog()).await
}

pub async fn list_grids(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let grids = state.display_case_service.grids().await;
    respond(&headers, &grids).await
}

pub async fn select_time(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(body): Json<SelectTimeBody>,
) -> Response {
    let update = state.display_case_service.select_time(&body.time).await;
    respond(&headers, &update).await
}

pub async fn place_product(
    Path(slot): Path<SlotPath>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(body): Json<PlaceProductBody>,
) -> Result<Response, DisplayCaseError> {
    let update = state
        .display_case_service
        .place_product(&slot.time, slot.row, slot.col, body.product_id)
        .await?;
    Ok(respond(&headers, &update).await)
}

pub async fn remove_product(
    Path(slot): Path<SlotPath>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, DisplayCaseError> {
    let update = state
        .display_case_service
        .remove_product(&slot.time, slot.row, slot.col)
        .await?;
    Ok(respond(&headers, &update).await)
}

pub async fn reset_grid(
    Path(time): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, DisplayCaseError> {
    let update = state.display_case_service.reset(&time).await?;
    Ok(respond(&headers, &update).await)
}

/// Apply a drag-and-drop gesture from the display case page
pub async fn drop_product(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(drop): Json<DragDrop>,
) -> Result<Response, DisplayCaseError> {
    let update = state.display_case_service.apply_drop(&drop).await?;
    Ok(respond(&headers, &update).await)
}

/// Stream the day progression, one frame per configured time
pub async fn animate(State(state): State<Arc<AppState>>) -> Result<Response, DisplayCaseError> {
    let rx = state.display_case_service.animate()?;
    Ok(stream_from_receiver(rx).into_response())
}
