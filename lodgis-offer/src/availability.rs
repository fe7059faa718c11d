use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use lodgis_core::{
    AvailabilityReport, EngineError, EngineResult, InventoryRepository, MutationReceipt,
    NightAvailability, StayWindow,
};

/// Booking-time entry points over the nightly counters. Search never goes
/// through here; bookings and cancellations always do.
pub struct AvailabilityService {
    inventory: Arc<dyn InventoryRepository>,
}

impl AvailabilityService {
    pub fn new(inventory: Arc<dyn InventoryRepository>) -> Self {
        Self { inventory }
    }

    /// Snapshot check: min availability plus the per-night breakdown. May be
    /// briefly stale relative to concurrent mutations; bookings rely on
    /// `reduce`, not on this.
    pub async fn check(
        &self,
        room_id: Uuid,
        window: &StayWindow,
        requested_rooms: u32,
    ) -> EngineResult<AvailabilityReport> {
        if requested_rooms < 1 {
            return Err(EngineError::validation("requested_rooms must be at least 1"));
        }

        let rates = self.inventory.nightly_rates(room_id, window).await?;
        if rates.len() != window.nights as usize {
            return Err(EngineError::NotFound(format!(
                "room {} has no published inventory for every night of {}..{}",
                room_id, window.start, window.end
            )));
        }

        let min_available = rates.iter().map(|r| r.available_rooms).min().unwrap_or(0);
        let nights = rates
            .iter()
            .map(|r| NightAvailability {
                night: r.night,
                available_rooms: r.available_rooms,
                effective_price: r.effective_price(),
            })
            .collect();

        Ok(AvailabilityReport {
            room_id,
            has_enough_rooms: min_available >= requested_rooms as i32,
            min_available,
            nights,
        })
    }

    /// Book: take `count` rooms out of every night of the window, atomically.
    /// The loser of a race over the last room gets `InsufficientInventory`;
    /// no internal retry, the caller owns retry/backoff.
    pub async fn reduce(
        &self,
        room_id: Uuid,
        window: &StayWindow,
        count: i32,
    ) -> EngineResult<MutationReceipt> {
        validate_count(count)?;
        let receipt = self.inventory.reduce(room_id, window, count).await?;
        info!(
            %room_id,
            start = %window.start,
            end = %window.end,
            count,
            affected = receipt.affected_nights,
            "reduced availability"
        );
        Ok(receipt)
    }

    /// Cancel/release: give `count` rooms back on every night of the window.
    pub async fn increase(
        &self,
        room_id: Uuid,
        window: &StayWindow,
        count: i32,
    ) -> EngineResult<MutationReceipt> {
        validate_count(count)?;
        match self.inventory.increase(room_id, window, count).await {
            Ok(receipt) => {
                info!(
                    %room_id,
                    start = %window.start,
                    end = %window.end,
                    count,
                    affected = receipt.affected_nights,
                    "released availability"
                );
                Ok(receipt)
            }
            // Releasing past capacity means an upstream double-release; keep
            // the counter intact and make noise.
            Err(err @ EngineError::CapacityExceeded { .. }) => {
                warn!(%room_id, count, "release would exceed capacity: {}", err);
                Err(err)
            }
            Err(err) => Err(err),
        }
    }
}

fn validate_count(count: i32) -> EngineResult<()> {
    if count < 1 {
        return Err(EngineError::validation("count must be at least 1"));
    }
    Ok(())
}
