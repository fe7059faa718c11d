use std::sync::Arc;

use chrono::{Days, NaiveDate};
use uuid::Uuid;

use lodgis_core::{
    HotelSummary, NightlyRate, OccupancyMode, OfferFilters, Page, RoomPolicy, RoomType,
    SearchCriteria, SortKey, StayWindow,
};
use lodgis_offer::{AvailabilityService, SearchOrchestrator};
use lodgis_store::{InMemoryCatalog, InMemoryInventory};

struct Fixture {
    inventory: Arc<InMemoryInventory>,
    catalog: Arc<InMemoryCatalog>,
    riverside: Uuid,
    riverside_double: Uuid,
    riverside_suite: Uuid,
    budget_inn: Uuid,
    budget_double: Uuid,
}

const CHECK_IN: &str = "2025-09-10";
const CHECK_OUT: &str = "2025-09-12";

fn night(offset: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 10).unwrap() + Days::new(offset)
}

async fn publish_nights(
    inventory: &InMemoryInventory,
    room_id: Uuid,
    nights: u64,
    price: f64,
    available: i32,
) {
    for offset in 0..nights {
        inventory
            .publish(NightlyRate {
                room_id,
                night: night(offset),
                base_price: price,
                discount_percent: 0.0,
                available_rooms: available,
                refundable: true,
                pay_later: false,
            })
            .await;
    }
}

/// Two Lisbon hotels: Riverside (4*) with a family-friendly double and a
/// pricier suite, Budget Inn (2*) cheaper but children not allowed.
async fn fixture() -> Fixture {
    let inventory = Arc::new(InMemoryInventory::new());
    let catalog = Arc::new(InMemoryCatalog::new());

    let riverside = Uuid::from_u128(0xA1);
    let budget_inn = Uuid::from_u128(0xB1);
    let riverside_double = Uuid::from_u128(0x10);
    let riverside_suite = Uuid::from_u128(0x11);
    let budget_double = Uuid::from_u128(0x20);

    catalog
        .add_hotel(
            HotelSummary {
                id: riverside,
                name: "Riverside".to_string(),
                stars: 4,
                facilities: vec!["wifi".to_string(), "pool".to_string()],
                distance_km: Some(1.0),
            },
            Some("Lisbon"),
        )
        .await;
    catalog
        .add_hotel(
            HotelSummary {
                id: budget_inn,
                name: "Budget Inn".to_string(),
                stars: 2,
                facilities: vec!["wifi".to_string()],
                distance_km: Some(3.0),
            },
            Some("Lisbon"),
        )
        .await;

    catalog
        .add_room(RoomType {
            id: riverside_double,
            hotel_id: riverside,
            name: "Double".to_string(),
            capacity: 2,
            total_rooms: 5,
            policy: Some(RoomPolicy {
                children_allowed: true,
                free_child_age_limit: 6,
                adult_age_threshold: 12,
                extra_bed_fee_per_night: 100.0,
            }),
        })
        .await;
    catalog
        .add_room(RoomType {
            id: riverside_suite,
            hotel_id: riverside,
            name: "Suite".to_string(),
            capacity: 4,
            total_rooms: 2,
            policy: None,
        })
        .await;
    catalog
        .add_room(RoomType {
            id: budget_double,
            hotel_id: budget_inn,
            name: "Double".to_string(),
            capacity: 2,
            total_rooms: 8,
            policy: Some(RoomPolicy {
                children_allowed: false,
                free_child_age_limit: 6,
                adult_age_threshold: 12,
                extra_bed_fee_per_night: 0.0,
            }),
        })
        .await;

    inventory.seed_room(riverside_double, 5).await;
    inventory.seed_room(riverside_suite, 2).await;
    inventory.seed_room(budget_double, 8).await;
    publish_nights(&inventory, riverside_double, 2, 100.0, 5).await;
    publish_nights(&inventory, riverside_suite, 2, 150.0, 2).await;
    publish_nights(&inventory, budget_double, 2, 60.0, 8).await;

    Fixture {
        inventory,
        catalog,
        riverside,
        riverside_double,
        riverside_suite,
        budget_inn,
        budget_double,
    }
}

fn family_criteria() -> SearchCriteria {
    SearchCriteria {
        check_in: Some(CHECK_IN.to_string()),
        check_out: Some(CHECK_OUT.to_string()),
        rooms: 2,
        adults: 2,
        children_ages: vec![4, 8, 13],
        occupancy_mode: OccupancyMode::AdultsPlusChildren,
        destination: Some("Lisbon".to_string()),
        filters: OfferFilters::default(),
        sort: SortKey::default(),
        page: Page::default(),
    }
}

#[tokio::test]
async fn test_family_search_picks_cheapest_child_friendly_room() {
    let f = fixture().await;
    let orchestrator = SearchOrchestrator::new(f.inventory.clone(), f.catalog.clone());

    let results = orchestrator.search_overnight(&family_criteria()).await.unwrap();

    // Budget Inn disallows children, so only Riverside survives, and its
    // double beats the suite on stay price.
    assert_eq!(results.total, 1);
    assert_eq!(results.results[0].hotel.id, f.riverside);
    let offer = &results.results[0].best_offer;
    assert_eq!(offer.room_id, f.riverside_double);
    assert_eq!(offer.nights, 2);
    assert_eq!(offer.available_rooms, 5);
    assert_eq!(offer.sum_price, 200.0);
    assert_eq!(offer.avg_night_price, 100.0);

    // Ages 4 (free), 8 and 13 (extra bed): 2 * 100/night * 2 nights.
    assert_eq!(offer.children.free_children, 1);
    assert_eq!(offer.children.chargeable_children, 2);
    assert_eq!(offer.children.extra_fee_total, 400.0);

    // Two rooms of base stay plus the surcharge.
    assert_eq!(offer.total_price, 2.0 * 200.0 + 400.0);
}

#[tokio::test]
async fn test_adults_only_search_ranks_by_price() {
    let f = fixture().await;
    let orchestrator = SearchOrchestrator::new(f.inventory.clone(), f.catalog.clone());

    let mut criteria = family_criteria();
    criteria.rooms = 1;
    criteria.children_ages.clear();

    let results = orchestrator.search_overnight(&criteria).await.unwrap();

    // Both hotels qualify now; Budget Inn is cheaper and ranks first.
    assert_eq!(results.total, 2);
    assert_eq!(results.results[0].hotel.id, f.budget_inn);
    assert_eq!(results.results[0].best_offer.room_id, f.budget_double);
    assert_eq!(results.results[1].hotel.id, f.riverside);

    criteria.sort = SortKey::StarsDesc;
    let by_stars = orchestrator.search_overnight(&criteria).await.unwrap();
    assert_eq!(by_stars.results[0].hotel.id, f.riverside);
}

#[tokio::test]
async fn test_price_filter_applies_to_average_night_price() {
    let f = fixture().await;
    let orchestrator = SearchOrchestrator::new(f.inventory.clone(), f.catalog.clone());

    let mut criteria = family_criteria();
    criteria.rooms = 1;
    criteria.children_ages.clear();
    // The double's stay total (200) is above this cap; its nightly average
    // (100) is not. The filter must use the average.
    criteria.filters.max_night_price = Some(100.0);

    let results = orchestrator.search_overnight(&criteria).await.unwrap();
    assert_eq!(results.total, 2);

    criteria.filters.max_night_price = Some(80.0);
    let only_budget = orchestrator.search_overnight(&criteria).await.unwrap();
    assert_eq!(only_budget.total, 1);
    assert_eq!(only_budget.results[0].hotel.id, f.budget_inn);
}

#[tokio::test]
async fn test_unpublished_night_excludes_the_room() {
    let f = fixture().await;
    let orchestrator = SearchOrchestrator::new(f.inventory.clone(), f.catalog.clone());

    let mut criteria = family_criteria();
    criteria.rooms = 1;
    criteria.children_ages.clear();
    // Third night exists for no room; the whole search window has a gap.
    criteria.check_out = Some("2025-09-13".to_string());

    let results = orchestrator.search_overnight(&criteria).await.unwrap();
    assert_eq!(results.total, 0);
}

#[tokio::test]
async fn test_day_use_uses_a_single_night_window() {
    let f = fixture().await;
    let orchestrator = SearchOrchestrator::new(f.inventory.clone(), f.catalog.clone());

    let mut criteria = family_criteria();
    criteria.rooms = 1;
    criteria.children_ages.clear();
    criteria.check_out = None;

    let results = orchestrator.search_day_use(&criteria).await.unwrap();
    assert_eq!(results.total, 2);
    let offer = &results.results[0].best_offer;
    assert_eq!(offer.nights, 1);
    assert_eq!(offer.sum_price, 60.0);
    assert_eq!(offer.sum_price, offer.avg_night_price);
}

#[tokio::test]
async fn test_pagination_slices_after_ranking() {
    let f = fixture().await;
    let orchestrator = SearchOrchestrator::new(f.inventory.clone(), f.catalog.clone());

    let mut criteria = family_criteria();
    criteria.rooms = 1;
    criteria.children_ages.clear();
    criteria.page = Page {
        page: 2,
        per_page: 1,
    };

    let results = orchestrator.search_overnight(&criteria).await.unwrap();
    assert_eq!(results.total, 2);
    assert_eq!(results.results.len(), 1);
    // Page 2 of the price ranking holds the pricier hotel.
    assert_eq!(results.results[0].hotel.id, f.riverside);
}

#[tokio::test]
async fn test_page_far_past_the_results_is_empty_not_a_panic() {
    let f = fixture().await;
    let orchestrator = SearchOrchestrator::new(f.inventory.clone(), f.catalog.clone());

    let mut criteria = family_criteria();
    criteria.rooms = 1;
    criteria.children_ages.clear();
    criteria.page = Page {
        page: u32::MAX,
        per_page: 100,
    };

    let results = orchestrator.search_overnight(&criteria).await.unwrap();
    assert_eq!(results.total, 2);
    assert!(results.results.is_empty());
}

#[tokio::test]
async fn test_check_reduce_release_round_trip() {
    let f = fixture().await;
    let service = AvailabilityService::new(f.inventory.clone());
    let start = night(0);
    let w = StayWindow {
        start,
        end: start + Days::new(2),
        nights: 2,
    };

    let before = service.check(f.riverside_suite, &w, 2).await.unwrap();
    assert!(before.has_enough_rooms);
    assert_eq!(before.min_available, 2);
    assert_eq!(before.nights.len(), 2);
    assert_eq!(before.nights[0].effective_price, 150.0);

    service.reduce(f.riverside_suite, &w, 2).await.unwrap();
    let drained = service.check(f.riverside_suite, &w, 1).await.unwrap();
    assert!(!drained.has_enough_rooms);
    assert_eq!(drained.min_available, 0);

    // A third concurrent-style booking attempt loses outright.
    assert!(service.reduce(f.riverside_suite, &w, 1).await.is_err());

    service.increase(f.riverside_suite, &w, 2).await.unwrap();
    let restored = service.check(f.riverside_suite, &w, 2).await.unwrap();
    assert_eq!(restored.min_available, before.min_available);
}
