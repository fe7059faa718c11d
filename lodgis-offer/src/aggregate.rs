use lodgis_core::{NightlyRate, StayWindow};

/// A room type reduced to a single stay-level quote.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomQuote {
    /// Worst night of the window; offering more would overbook that night.
    pub min_available: i32,
    /// One room across every night of the window.
    pub sum_price: f64,
    pub avg_night_price: f64,
    pub refundable: bool,
    pub pay_later: bool,
}

pub struct InventoryAggregator;

impl InventoryAggregator {
    /// Reduce the nightly rows of `[start, end)` to one quote. Returns `None`
    /// when the row count does not match the night count: a gap means
    /// inventory is not published for every night and the room must not be
    /// offered.
    pub fn aggregate(rates: &[NightlyRate], window: &StayWindow) -> Option<RoomQuote> {
        if window.nights == 0 || rates.len() != window.nights as usize {
            return None;
        }

        let min_available = rates.iter().map(|r| r.available_rooms).min()?;
        let sum_price: f64 = rates.iter().map(NightlyRate::effective_price).sum();

        Some(RoomQuote {
            min_available,
            sum_price,
            avg_night_price: sum_price / window.nights as f64,
            refundable: rates.iter().all(|r| r.refundable),
            pay_later: rates.iter().all(|r| r.pay_later),
        })
    }
}
