use async_trait::async_trait;
use uuid::Uuid;

use crate::dates::StayWindow;
use crate::error::EngineResult;
use crate::models::{CatalogQuery, HotelSummary, MutationReceipt, NightlyRate, RoomType};

/// Access to the nightly inventory table. Reads are plain snapshots;
/// `reduce` and `increase` must each be a single atomic conditional update —
/// never a read followed by a separate write.
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// All published rows for the room within `[start, end)`, ordered by
    /// night. Gaps are the caller's problem to detect (row count vs nights).
    async fn nightly_rates(
        &self,
        room_id: Uuid,
        window: &StayWindow,
    ) -> EngineResult<Vec<NightlyRate>>;

    /// Decrement every night in the window by `count`, or fail with
    /// `InsufficientInventory` leaving nothing changed.
    async fn reduce(
        &self,
        room_id: Uuid,
        window: &StayWindow,
        count: i32,
    ) -> EngineResult<MutationReceipt>;

    /// Increment every night in the window by `count`, capped at the room's
    /// physical capacity; fails with `CapacityExceeded` leaving nothing
    /// changed.
    async fn increase(
        &self,
        room_id: Uuid,
        window: &StayWindow,
        count: i32,
    ) -> EngineResult<MutationReceipt>;
}

/// Access to the hotel/room catalog collaborator.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn search_hotels(&self, query: &CatalogQuery) -> EngineResult<Vec<HotelSummary>>;

    async fn rooms_of_hotel(&self, hotel_id: Uuid) -> EngineResult<Vec<RoomType>>;
}
