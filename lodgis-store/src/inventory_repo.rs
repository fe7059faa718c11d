use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use lodgis_core::{
    EngineError, EngineResult, InventoryRepository, MutationReceipt, NightlyRate, StayWindow,
};

pub struct PostgresInventoryRepository {
    pub pool: PgPool,
}

impl PostgresInventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct NightlyRateRow {
    room_id: Uuid,
    night: NaiveDate,
    base_price: f64,
    discount_percent: f64,
    available_rooms: i32,
    refundable: bool,
    pay_later: bool,
}

impl From<NightlyRateRow> for NightlyRate {
    fn from(row: NightlyRateRow) -> Self {
        NightlyRate {
            room_id: row.room_id,
            night: row.night,
            base_price: row.base_price,
            discount_percent: row.discount_percent,
            available_rooms: row.available_rooms,
            refundable: row.refundable,
            pay_later: row.pay_later,
        }
    }
}

fn storage_err(err: sqlx::Error) -> EngineError {
    EngineError::Storage(err.to_string())
}

#[async_trait]
impl InventoryRepository for PostgresInventoryRepository {
    async fn nightly_rates(
        &self,
        room_id: Uuid,
        window: &StayWindow,
    ) -> EngineResult<Vec<NightlyRate>> {
        let rows = sqlx::query_as::<_, NightlyRateRow>(
            r#"
            SELECT room_id, night, base_price, discount_percent, available_rooms, refundable, pay_later
            FROM room_inventory
            WHERE room_id = $1 AND night >= $2 AND night < $3
            ORDER BY night
            "#,
        )
        .bind(room_id)
        .bind(window.start)
        .bind(window.end)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// One conditional UPDATE inside one transaction. The per-row guard is
    /// re-evaluated under the row lock, so two concurrent reducers of the
    /// last room cannot both pass; a shortfall in affected rows rolls the
    /// whole window back.
    async fn reduce(
        &self,
        room_id: Uuid,
        window: &StayWindow,
        count: i32,
    ) -> EngineResult<MutationReceipt> {
        let mut tx = self.pool.begin().await.map_err(storage_err)?;

        let result = sqlx::query(
            r#"
            UPDATE room_inventory
            SET available_rooms = available_rooms - $4
            WHERE room_id = $1 AND night >= $2 AND night < $3 AND available_rooms >= $4
            "#,
        )
        .bind(room_id)
        .bind(window.start)
        .bind(window.end)
        .bind(count)
        .execute(&mut *tx)
        .await
        .map_err(storage_err)?;

        if result.rows_affected() != window.nights as u64 {
            tx.rollback().await.map_err(storage_err)?;
            return Err(EngineError::InsufficientInventory {
                room_id,
                requested: count,
                start: window.start,
                end: window.end,
            });
        }

        tx.commit().await.map_err(storage_err)?;
        Ok(MutationReceipt {
            affected_nights: window.nights,
        })
    }

    /// Mirror of `reduce` for cancellation/release, guarded by the room's
    /// physical unit count so a double-release never inflates the counter.
    async fn increase(
        &self,
        room_id: Uuid,
        window: &StayWindow,
        count: i32,
    ) -> EngineResult<MutationReceipt> {
        let mut tx = self.pool.begin().await.map_err(storage_err)?;

        let result = sqlx::query(
            r#"
            UPDATE room_inventory ri
            SET available_rooms = ri.available_rooms + $4
            FROM rooms r
            WHERE r.id = ri.room_id
              AND ri.room_id = $1 AND ri.night >= $2 AND ri.night < $3
              AND ri.available_rooms + $4 <= r.total_rooms
            "#,
        )
        .bind(room_id)
        .bind(window.start)
        .bind(window.end)
        .bind(count)
        .execute(&mut *tx)
        .await
        .map_err(storage_err)?;

        if result.rows_affected() != window.nights as u64 {
            tx.rollback().await.map_err(storage_err)?;
            return Err(EngineError::CapacityExceeded {
                room_id,
                requested: count,
                start: window.start,
                end: window.end,
            });
        }

        tx.commit().await.map_err(storage_err)?;
        Ok(MutationReceipt {
            affected_nights: window.nights,
        })
    }
}
