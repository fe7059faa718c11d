pub mod aggregate;
pub mod availability;
pub mod search;
pub mod selector;

pub use aggregate::{InventoryAggregator, RoomQuote};
pub use availability::AvailabilityService;
pub use search::SearchOrchestrator;
pub use selector::BestOfferSelector;
