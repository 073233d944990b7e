// Application state for HTTP handlers
use crate::application::display_case_service::DisplayCaseService;
use crate::application::planning_service::PlanningService;

#[derive(Clone)]
pub struct AppState {
    pub planning_service: PlanningService,
    pub display_case_service: DisplayCaseService,
}
