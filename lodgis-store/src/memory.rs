use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Mutex;
use uuid::Uuid;

use lodgis_core::{
    CatalogQuery, CatalogRepository, EngineError, EngineResult, HotelSummary, InventoryRepository,
    MutationReceipt, NightlyRate, RoomType, StayWindow,
};

struct RoomCounters {
    capacity: i32,
    nights: BTreeMap<NaiveDate, NightlyRate>,
}

/// In-memory inventory store. The single mutex makes every reduce/increase
/// an atomic all-nights-or-nothing step, mirroring the transactional
/// Postgres implementation. Used by tests and local development.
#[derive(Default)]
pub struct InMemoryInventory {
    state: Mutex<HashMap<Uuid, RoomCounters>>,
}

impl InMemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a room and its physical unit count (the counter ceiling).
    pub async fn seed_room(&self, room_id: Uuid, capacity: i32) {
        self.state.lock().await.insert(
            room_id,
            RoomCounters {
                capacity,
                nights: BTreeMap::new(),
            },
        );
    }

    /// Publish (or overwrite) one nightly row, as the external pricing
    /// process would.
    pub async fn publish(&self, rate: NightlyRate) {
        let mut state = self.state.lock().await;
        let room = state.entry(rate.room_id).or_insert_with(|| RoomCounters {
            capacity: rate.available_rooms,
            nights: BTreeMap::new(),
        });
        room.nights.insert(rate.night, rate);
    }

    pub async fn available_on(&self, room_id: Uuid, night: NaiveDate) -> Option<i32> {
        self.state
            .lock()
            .await
            .get(&room_id)
            .and_then(|room| room.nights.get(&night))
            .map(|rate| rate.available_rooms)
    }
}

#[async_trait]
impl InventoryRepository for InMemoryInventory {
    async fn nightly_rates(
        &self,
        room_id: Uuid,
        window: &StayWindow,
    ) -> EngineResult<Vec<NightlyRate>> {
        let state = self.state.lock().await;
        let Some(room) = state.get(&room_id) else {
            return Ok(Vec::new());
        };
        Ok(room
            .nights
            .range(window.start..window.end)
            .map(|(_, rate)| rate.clone())
            .collect())
    }

    async fn reduce(
        &self,
        room_id: Uuid,
        window: &StayWindow,
        count: i32,
    ) -> EngineResult<MutationReceipt> {
        let mut state = self.state.lock().await;
        let insufficient = || EngineError::InsufficientInventory {
            room_id,
            requested: count,
            start: window.start,
            end: window.end,
        };

        let room = state.get_mut(&room_id).ok_or_else(insufficient)?;

        // Check every night before touching any; the held lock is what makes
        // this equivalent to the database's conditional update.
        let eligible = window
            .iter_nights()
            .filter(|night| {
                room.nights
                    .get(night)
                    .is_some_and(|rate| rate.available_rooms >= count)
            })
            .count();
        if eligible != window.nights as usize {
            return Err(insufficient());
        }

        for night in window.iter_nights() {
            if let Some(rate) = room.nights.get_mut(&night) {
                rate.available_rooms -= count;
            }
        }
        Ok(MutationReceipt {
            affected_nights: window.nights,
        })
    }

    async fn increase(
        &self,
        room_id: Uuid,
        window: &StayWindow,
        count: i32,
    ) -> EngineResult<MutationReceipt> {
        let mut state = self.state.lock().await;
        let exceeded = || EngineError::CapacityExceeded {
            room_id,
            requested: count,
            start: window.start,
            end: window.end,
        };

        let room = state.get_mut(&room_id).ok_or_else(exceeded)?;
        let capacity = room.capacity;

        let eligible = window
            .iter_nights()
            .filter(|night| {
                room.nights
                    .get(night)
                    .is_some_and(|rate| rate.available_rooms + count <= capacity)
            })
            .count();
        if eligible != window.nights as usize {
            return Err(exceeded());
        }

        for night in window.iter_nights() {
            if let Some(rate) = room.nights.get_mut(&night) {
                rate.available_rooms += count;
            }
        }
        Ok(MutationReceipt {
            affected_nights: window.nights,
        })
    }
}

struct CatalogState {
    hotels: Vec<(HotelSummary, Option<String>)>,
    rooms: HashMap<Uuid, Vec<RoomType>>,
}

/// In-memory hotel/room catalog for tests and local development.
pub struct InMemoryCatalog {
    state: Mutex<CatalogState>,
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self {
            state: Mutex::new(CatalogState {
                hotels: Vec::new(),
                rooms: HashMap::new(),
            }),
        }
    }
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_hotel(&self, hotel: HotelSummary, city: Option<&str>) {
        let mut state = self.state.lock().await;
        state.hotels.push((hotel, city.map(str::to_string)));
        state.hotels.sort_by_key(|(h, _)| h.id);
    }

    pub async fn add_room(&self, room: RoomType) {
        let mut state = self.state.lock().await;
        let rooms = state.rooms.entry(room.hotel_id).or_default();
        rooms.push(room);
        rooms.sort_by_key(|r| r.id);
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalog {
    async fn search_hotels(&self, query: &CatalogQuery) -> EngineResult<Vec<HotelSummary>> {
        let state = self.state.lock().await;
        Ok(state
            .hotels
            .iter()
            .filter(|(hotel, city)| {
                if let Some(wanted) = query.destination.as_ref().filter(|d| !d.trim().is_empty()) {
                    let matches = city
                        .as_deref()
                        .is_some_and(|c| c.eq_ignore_ascii_case(wanted.trim()));
                    if !matches {
                        return false;
                    }
                }
                if query.min_stars.is_some_and(|min| hotel.stars < min) {
                    return false;
                }
                query
                    .facilities
                    .iter()
                    .all(|f| hotel.facilities.iter().any(|have| have == f))
            })
            .map(|(hotel, _)| hotel.clone())
            .collect())
    }

    async fn rooms_of_hotel(&self, hotel_id: Uuid) -> EngineResult<Vec<RoomType>> {
        let state = self.state.lock().await;
        Ok(state.rooms.get(&hotel_id).cloned().unwrap_or_default())
    }
}
