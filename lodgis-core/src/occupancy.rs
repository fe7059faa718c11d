use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::policy::RoomPolicy;

/// How children count toward room occupancy.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OccupancyMode {
    /// Only adults occupy capacity; children ride along.
    #[default]
    AdultsOnly,
    /// Children past the free-age limit occupy capacity like adults.
    AdultsPlusChildren,
}

pub struct OccupancyCalculator;

impl OccupancyCalculator {
    /// Minimum adult-equivalent guests a single room of the booking must
    /// hold: `ceil(effective_guests / rooms)`.
    ///
    /// This is a capacity filter, not a guest-to-room assignment; the result
    /// is independent of how children are split across rooms.
    pub fn required_per_room(
        rooms: u32,
        adults: u32,
        child_ages: &[u8],
        mode: OccupancyMode,
        policy: &RoomPolicy,
    ) -> EngineResult<u32> {
        if rooms < 1 {
            return Err(EngineError::validation("rooms must be at least 1"));
        }
        if adults < 1 {
            return Err(EngineError::validation("adults must be at least 1"));
        }

        let mut effective = adults;
        if mode == OccupancyMode::AdultsPlusChildren {
            effective += child_ages
                .iter()
                .filter(|&&age| {
                    age >= policy.free_child_age_limit || age >= policy.adult_age_threshold
                })
                .count() as u32;
        }

        Ok(effective.div_ceil(rooms))
    }
}
