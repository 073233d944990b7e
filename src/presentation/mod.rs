// Presentation layer - HTTP routes and handlers
pub mod app_state;
pub mod display_case_handlers;
pub mod error;
pub mod handlers;
pub mod routes;
