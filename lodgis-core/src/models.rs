use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::occupancy::OccupancyMode;
use crate::policy::{ChildrenCharge, RoomPolicy};

/// Most child ages accepted on a single search.
pub const MAX_CHILDREN: usize = 16;
/// Ages at/above this are adults, not children.
pub const MAX_CHILD_AGE: u8 = 17;

/// One (room, night) inventory/price row, published by the external
/// pricing/inventory process. This engine only ever mutates
/// `available_rooms`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NightlyRate {
    pub room_id: Uuid,
    pub night: NaiveDate,
    pub base_price: f64,
    /// Percentage in [0, 100].
    pub discount_percent: f64,
    pub available_rooms: i32,
    pub refundable: bool,
    pub pay_later: bool,
}

impl NightlyRate {
    /// Nightly price after the discount, never negative.
    pub fn effective_price(&self) -> f64 {
        let discount = self.discount_percent.clamp(0.0, 100.0);
        (self.base_price * (1.0 - discount / 100.0)).max(0.0)
    }
}

/// A bookable room type from the hotel catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomType {
    pub id: Uuid,
    pub hotel_id: Uuid,
    pub name: String,
    /// Adult-equivalent guests one room holds.
    pub capacity: u32,
    /// Physical unit count; the ceiling for the availability counter.
    pub total_rooms: i32,
    /// Absent policy rows fall back to `RoomPolicy::default()`.
    pub policy: Option<RoomPolicy>,
}

impl RoomType {
    pub fn policy(&self) -> RoomPolicy {
        self.policy.clone().unwrap_or_default()
    }
}

/// Hotel metadata used for display filtering only, never for availability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelSummary {
    pub id: Uuid,
    pub name: String,
    pub stars: u8,
    pub facilities: Vec<String>,
    pub distance_km: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortKey {
    #[default]
    PriceAsc,
    PriceDesc,
    StarsDesc,
    DistanceAsc,
}

/// Post-filters applied after eligibility. The price bounds apply to the
/// average per-night price, never the room-multiplied stay total.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OfferFilters {
    pub min_night_price: Option<f64>,
    pub max_night_price: Option<f64>,
    pub min_stars: Option<u8>,
    #[serde(default)]
    pub facilities: Vec<String>,
    pub max_distance_km: Option<f64>,
}

fn default_per_page() -> u32 {
    20
}

fn default_page() -> u32 {
    1
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Page {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 20,
        }
    }
}

impl Page {
    pub fn normalized(&self) -> Page {
        Page {
            page: self.page.max(1),
            per_page: self.per_page.clamp(1, 100),
        }
    }
}

/// A stay search as received from the caller; dates stay raw strings until
/// the validator normalizes them.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchCriteria {
    /// Check-in for overnight searches; the stay date for day-use.
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub rooms: u32,
    pub adults: u32,
    #[serde(default)]
    pub children_ages: Vec<u8>,
    #[serde(default)]
    pub occupancy_mode: OccupancyMode,
    pub destination: Option<String>,
    #[serde(default)]
    pub filters: OfferFilters,
    #[serde(default)]
    pub sort: SortKey,
    #[serde(default)]
    pub page: Page,
}

impl SearchCriteria {
    /// Count and age checks; date checks belong to the DateRangeValidator.
    pub fn validate_party(&self) -> EngineResult<()> {
        if self.rooms < 1 {
            return Err(EngineError::validation("rooms must be at least 1"));
        }
        if self.adults < 1 {
            return Err(EngineError::validation("adults must be at least 1"));
        }
        if self.children_ages.len() > MAX_CHILDREN {
            return Err(EngineError::Validation(format!(
                "at most {} children per search",
                MAX_CHILDREN
            )));
        }
        if let Some(age) = self.children_ages.iter().find(|&&a| a > MAX_CHILD_AGE) {
            return Err(EngineError::Validation(format!(
                "child age {} is out of range 0..={}",
                age, MAX_CHILD_AGE
            )));
        }
        Ok(())
    }
}

/// Derived, never persisted: one room type priced over the whole window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomOffer {
    pub room_id: Uuid,
    pub room_name: String,
    pub capacity: u32,
    /// Minimum `available_rooms` across every night of the window.
    pub available_rooms: i32,
    pub nights: u32,
    /// One room, whole stay, before surcharges.
    pub sum_price: f64,
    pub avg_night_price: f64,
    /// True only when every night in the window carries the flag.
    pub refundable: bool,
    pub pay_later: bool,
    pub children: ChildrenCharge,
    /// `sum_price * rooms_requested + children.extra_fee_total`.
    pub total_price: f64,
}

/// The winning (lowest `sum_price`) room offer of one hotel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelOffer {
    pub hotel: HotelSummary,
    pub best_offer: RoomOffer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    pub results: Vec<HotelOffer>,
    /// Matching hotels before pagination.
    pub total: usize,
    pub page: u32,
    pub per_page: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NightAvailability {
    pub night: NaiveDate,
    pub available_rooms: i32,
    pub effective_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityReport {
    pub room_id: Uuid,
    pub has_enough_rooms: bool,
    pub min_available: i32,
    pub nights: Vec<NightAvailability>,
}

/// Outcome of a successful reduce/increase call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MutationReceipt {
    pub affected_nights: u32,
}

/// Typed predicates for catalog lookups; the store renders these into SQL,
/// the engine never assembles query fragments by hand.
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    pub destination: Option<String>,
    pub min_stars: Option<u8>,
    pub facilities: Vec<String>,
}
