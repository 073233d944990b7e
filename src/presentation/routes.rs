// Router assembly
use crate::presentation::app_state::AppState;
use crate::presentation::display_case_handlers as display_case;
use crate::presentation::handlers::{dashboard, health_check, list_orders, list_tasks, predict, weather};
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    // Note: responses are compressed manually in the handlers,
    // so there is no CompressionLayer here.
    Router::new()
        .route("/healthz", get(health_check))
        .route("/tasks", get(list_tasks))
        .route("/orders", get(list_orders))
        .route("/dashboard", get(dashboard))
        .route("/predict", post(predict))
        .route("/weather/:plz", get(weather))
        .route("/display-case", get(display_case::overview))
        .route("/display-case/products", get(display_case::list_products))
        .route("/display-case/grids", get(display_case::list_grids))
        .route("/display-case/active-time", put(display_case::select_time))
        .route(
            "/display-case/grids/:time/slots/:row/:col",
            put(display_case::place_product).delete(display_case::remove_product),
        )
        .route("/display-case/grids/:time/reset", post(display_case::reset_grid))
        .route("/display-case/drop", post(display_case::drop_product))
        .route("/display-case/animation", post(display_case::animate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
