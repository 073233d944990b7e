// Mapping of display case errors onto HTTP responses
use crate::application::display_case_service::DisplayCaseError;
use crate::domain::display_case::GridError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

impl DisplayCaseError {
    pub fn status(&self) -> StatusCode {
        match self {
            DisplayCaseError::Grid(GridError::UnknownTime(_))
            | DisplayCaseError::Grid(GridError::UnknownProduct(_))
            | DisplayCaseError::Grid(GridError::UnknownCatalogIndex(_)) => StatusCode::NOT_FOUND,
            DisplayCaseError::Grid(GridError::OutOfBounds { .. }) => StatusCode::BAD_REQUEST,
            DisplayCaseError::AnimationAlreadyRunning => StatusCode::CONFLICT,
            DisplayCaseError::Grid(GridError::IncompatibleSnapshot(_))
            | DisplayCaseError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DisplayCaseError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Display case request failed: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
