use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use lodgis_core::{
    CatalogQuery, CatalogRepository, EngineError, EngineResult, HotelSummary, RoomPolicy, RoomType,
};

pub struct PostgresCatalogRepository {
    pub pool: PgPool,
}

impl PostgresCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Typed predicates rendered into SQL by `apply_predicates`; validation and
/// rendering stay decoupled from the query text.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum HotelPredicate {
    City(String),
    MinStars(i16),
    HasFacilities(Vec<String>),
}

pub(crate) fn hotel_predicates(query: &CatalogQuery) -> Vec<HotelPredicate> {
    let mut predicates = Vec::new();
    if let Some(city) = query.destination.as_ref().filter(|c| !c.trim().is_empty()) {
        predicates.push(HotelPredicate::City(city.trim().to_string()));
    }
    if let Some(min) = query.min_stars {
        predicates.push(HotelPredicate::MinStars(min as i16));
    }
    if !query.facilities.is_empty() {
        predicates.push(HotelPredicate::HasFacilities(query.facilities.clone()));
    }
    predicates
}

fn apply_predicates(builder: &mut QueryBuilder<'_, Postgres>, predicates: Vec<HotelPredicate>) {
    for (i, predicate) in predicates.into_iter().enumerate() {
        builder.push(if i == 0 { " WHERE " } else { " AND " });
        match predicate {
            HotelPredicate::City(city) => {
                builder.push("city = ").push_bind(city);
            }
            HotelPredicate::MinStars(min) => {
                builder.push("stars >= ").push_bind(min);
            }
            HotelPredicate::HasFacilities(facilities) => {
                builder.push("facilities @> ").push_bind(facilities);
            }
        }
    }
}

#[derive(sqlx::FromRow)]
struct HotelRow {
    id: Uuid,
    name: String,
    stars: i16,
    facilities: Vec<String>,
    distance_km: Option<f64>,
}

#[derive(sqlx::FromRow)]
struct RoomRow {
    id: Uuid,
    hotel_id: Uuid,
    name: String,
    capacity: i32,
    total_rooms: i32,
    children_allowed: Option<bool>,
    free_child_age_limit: Option<i16>,
    adult_age_threshold: Option<i16>,
    extra_bed_fee_per_night: Option<f64>,
}

fn storage_err(err: sqlx::Error) -> EngineError {
    EngineError::Storage(err.to_string())
}

/// SMALLINT columns can hold values a u8 cannot; clamp instead of letting an
/// `as` cast truncate bits (300 stars must not become 44).
fn clamp_u8(value: i16) -> u8 {
    value.clamp(0, u8::MAX as i16) as u8
}

#[async_trait]
impl CatalogRepository for PostgresCatalogRepository {
    async fn search_hotels(&self, query: &CatalogQuery) -> EngineResult<Vec<HotelSummary>> {
        let mut builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT id, name, stars, facilities, distance_km FROM hotels");
        apply_predicates(&mut builder, hotel_predicates(query));
        builder.push(" ORDER BY id");

        let rows = builder
            .build_query_as::<HotelRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(storage_err)?;

        Ok(rows
            .into_iter()
            .map(|row| HotelSummary {
                id: row.id,
                name: row.name,
                stars: clamp_u8(row.stars),
                facilities: row.facilities,
                distance_km: row.distance_km,
            })
            .collect())
    }

    async fn rooms_of_hotel(&self, hotel_id: Uuid) -> EngineResult<Vec<RoomType>> {
        let rows = sqlx::query_as::<_, RoomRow>(
            r#"
            SELECT r.id, r.hotel_id, r.name, r.capacity, r.total_rooms,
                   p.children_allowed, p.free_child_age_limit,
                   p.adult_age_threshold, p.extra_bed_fee_per_night
            FROM rooms r
            LEFT JOIN room_policies p ON p.room_id = r.id
            WHERE r.hotel_id = $1
            ORDER BY r.id
            "#,
        )
        .bind(hotel_id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let policy = row.children_allowed.map(|children_allowed| RoomPolicy {
                    children_allowed,
                    free_child_age_limit: clamp_u8(row.free_child_age_limit.unwrap_or(6)),
                    adult_age_threshold: clamp_u8(row.adult_age_threshold.unwrap_or(12)),
                    extra_bed_fee_per_night: row.extra_bed_fee_per_night.unwrap_or(0.0),
                });
                RoomType {
                    id: row.id,
                    hotel_id: row.hotel_id,
                    name: row.name,
                    capacity: row.capacity.max(0) as u32,
                    total_rooms: row.total_rooms,
                    policy,
                }
            })
            .collect())
    }
}
