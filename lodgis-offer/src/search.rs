use std::cmp::Ordering;
use std::sync::Arc;

use tracing::debug;

use lodgis_core::{
    CatalogQuery, CatalogRepository, ChildrenPolicyEvaluator, ChildrenVerdict, DateRangeValidator,
    EngineResult, HotelOffer, HotelSummary, InventoryRepository, OccupancyCalculator, OfferFilters,
    RoomOffer, SearchCriteria, SearchResults, SortKey, StayKind, StayWindow,
};

use crate::aggregate::InventoryAggregator;
use crate::selector::BestOfferSelector;

/// Composes the whole pipeline: validate → occupancy → aggregate → children
/// policy → best offer per hotel → post-filter → rank → paginate.
pub struct SearchOrchestrator {
    inventory: Arc<dyn InventoryRepository>,
    catalog: Arc<dyn CatalogRepository>,
    validator: DateRangeValidator,
}

impl SearchOrchestrator {
    pub fn new(inventory: Arc<dyn InventoryRepository>, catalog: Arc<dyn CatalogRepository>) -> Self {
        Self::with_validator(inventory, catalog, DateRangeValidator::default())
    }

    pub fn with_validator(
        inventory: Arc<dyn InventoryRepository>,
        catalog: Arc<dyn CatalogRepository>,
        validator: DateRangeValidator,
    ) -> Self {
        Self {
            inventory,
            catalog,
            validator,
        }
    }

    pub async fn search_overnight(&self, criteria: &SearchCriteria) -> EngineResult<SearchResults> {
        self.run(StayKind::Overnight, criteria).await
    }

    /// Day-use shares the pipeline over a fixed single-night window; the
    /// stay date travels in `check_in`.
    pub async fn search_day_use(&self, criteria: &SearchCriteria) -> EngineResult<SearchResults> {
        self.run(StayKind::DayUse, criteria).await
    }

    async fn run(&self, kind: StayKind, criteria: &SearchCriteria) -> EngineResult<SearchResults> {
        criteria.validate_party()?;
        let window = match kind {
            StayKind::Overnight => self
                .validator
                .validate_overnight(criteria.check_in.as_deref(), criteria.check_out.as_deref())?,
            StayKind::DayUse => self.validator.validate_day_use(criteria.check_in.as_deref())?,
        };

        let query = CatalogQuery {
            destination: criteria.destination.clone(),
            min_stars: criteria.filters.min_stars,
            facilities: criteria.filters.facilities.clone(),
        };
        let hotels = self.catalog.search_hotels(&query).await?;
        debug!(candidates = hotels.len(), nights = window.nights, "catalog candidates");

        // Eligibility first: hotels without a qualifying room drop out here.
        let mut matches = Vec::new();
        for hotel in hotels {
            if let Some(best_offer) = self.best_offer_for_hotel(&hotel, criteria, &window).await? {
                matches.push(HotelOffer { hotel, best_offer });
            }
        }

        // Post-filters before ranking, ranking before pagination.
        matches.retain(|m| passes_filters(m, &criteria.filters));
        rank(&mut matches, criteria.sort);

        let page = criteria.page.normalized();
        let total = matches.len();
        // Widen before multiplying: page comes straight from the caller and
        // a u32 product overflows around page 43M.
        let results = matches
            .into_iter()
            .skip((page.page as usize - 1) * page.per_page as usize)
            .take(page.per_page as usize)
            .collect();

        Ok(SearchResults {
            results,
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }

    async fn best_offer_for_hotel(
        &self,
        hotel: &HotelSummary,
        criteria: &SearchCriteria,
        window: &StayWindow,
    ) -> EngineResult<Option<RoomOffer>> {
        let rooms = self.catalog.rooms_of_hotel(hotel.id).await?;

        let mut candidates = Vec::new();
        for room in rooms {
            let policy = room.policy();

            let required = OccupancyCalculator::required_per_room(
                criteria.rooms,
                criteria.adults,
                &criteria.children_ages,
                criteria.occupancy_mode,
                &policy,
            )?;
            if room.capacity < required {
                continue;
            }

            let charge = match ChildrenPolicyEvaluator::evaluate(
                &policy,
                &criteria.children_ages,
                window.nights,
            ) {
                ChildrenVerdict::NotAllowed => continue,
                ChildrenVerdict::Allowed(charge) => charge,
            };

            let rates = self.inventory.nightly_rates(room.id, window).await?;
            let Some(quote) = InventoryAggregator::aggregate(&rates, window) else {
                continue;
            };
            if quote.min_available < required as i32
                || quote.min_available < criteria.rooms as i32
            {
                continue;
            }

            candidates.push(RoomOffer {
                room_id: room.id,
                room_name: room.name,
                capacity: room.capacity,
                available_rooms: quote.min_available,
                nights: window.nights,
                sum_price: quote.sum_price,
                avg_night_price: quote.avg_night_price,
                refundable: quote.refundable,
                pay_later: quote.pay_later,
                total_price: quote.sum_price * criteria.rooms as f64 + charge.extra_fee_total,
                children: charge,
            });
        }

        Ok(BestOfferSelector::select(candidates))
    }
}

fn passes_filters(m: &HotelOffer, filters: &OfferFilters) -> bool {
    // Price bounds apply to the per-night average, never the stay total.
    let avg = m.best_offer.avg_night_price;
    if filters.min_night_price.is_some_and(|min| avg < min) {
        return false;
    }
    if filters.max_night_price.is_some_and(|max| avg > max) {
        return false;
    }
    if filters.min_stars.is_some_and(|min| m.hotel.stars < min) {
        return false;
    }
    if !filters
        .facilities
        .iter()
        .all(|f| m.hotel.facilities.iter().any(|have| have == f))
    {
        return false;
    }
    if let Some(max_km) = filters.max_distance_km {
        match m.hotel.distance_km {
            Some(km) if km <= max_km => {}
            _ => return false,
        }
    }
    true
}

fn rank(matches: &mut [HotelOffer], sort: SortKey) {
    let by_price = |a: &HotelOffer, b: &HotelOffer| {
        a.best_offer
            .total_price
            .partial_cmp(&b.best_offer.total_price)
            .unwrap_or(Ordering::Equal)
    };

    matches.sort_by(|a, b| {
        let primary = match sort {
            SortKey::PriceAsc => by_price(a, b),
            SortKey::PriceDesc => by_price(b, a),
            SortKey::StarsDesc => b.hotel.stars.cmp(&a.hotel.stars),
            SortKey::DistanceAsc => match (a.hotel.distance_km, b.hotel.distance_km) {
                (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        };
        // Stable tie-break keeps identical queries returning identical pages.
        primary.then_with(|| a.hotel.id.cmp(&b.hotel.id))
    });
}
