use chrono::NaiveDate;
use uuid::Uuid;

/// Typed outcomes for the engine. Callers branch on the variant, never on the
/// message text.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("No published inventory: {0}")]
    NotFound(String),

    #[error("Insufficient inventory for room {room_id}: requested {requested} over {start}..{end}")]
    InsufficientInventory {
        room_id: Uuid,
        requested: i32,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("Capacity exceeded for room {room_id}: releasing {requested} over {start}..{end}")]
    CapacityExceeded {
        room_id: Uuid,
        requested: i32,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("Storage failure: {0}")]
    Storage(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}
