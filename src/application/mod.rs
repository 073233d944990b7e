// Application layer - Use cases and the ports they depend on
pub mod display_case_service;
pub mod grid_store;
pub mod planning_repository;
pub mod planning_service;
