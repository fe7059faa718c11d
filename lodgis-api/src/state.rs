use std::sync::Arc;

use lodgis_core::DateRangeValidator;
use lodgis_offer::{AvailabilityService, SearchOrchestrator};

#[derive(Clone)]
pub struct AppState {
    pub search: Arc<SearchOrchestrator>,
    pub availability: Arc<AvailabilityService>,
    /// Shared with the orchestrator so mutation endpoints normalize windows
    /// under the same limits searches do.
    pub validator: DateRangeValidator,
}
