// Domain layer - Display case grids and planning data
pub mod display_case;
pub mod planning;
pub mod product;
