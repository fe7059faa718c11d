pub mod dates;
pub mod error;
pub mod models;
pub mod occupancy;
pub mod policy;
pub mod repository;

pub use dates::{DateRangeValidator, StayKind, StayWindow};
pub use error::{EngineError, EngineResult};
pub use models::{
    AvailabilityReport, CatalogQuery, HotelOffer, HotelSummary, MutationReceipt, NightAvailability,
    NightlyRate, OfferFilters, Page, RoomOffer, RoomType, SearchCriteria, SearchResults, SortKey,
};
pub use occupancy::{OccupancyCalculator, OccupancyMode};
pub use policy::{ChildrenCharge, ChildrenPolicyEvaluator, ChildrenVerdict, RoomPolicy};
pub use repository::{CatalogRepository, InventoryRepository};
