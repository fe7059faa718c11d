use std::cmp::Ordering;

use lodgis_core::RoomOffer;

pub struct BestOfferSelector;

impl BestOfferSelector {
    /// Lowest stay price wins; ties fall back to room id ordering so repeated
    /// identical queries promote the same room.
    pub fn select(offers: Vec<RoomOffer>) -> Option<RoomOffer> {
        offers.into_iter().min_by(|a, b| {
            a.sum_price
                .partial_cmp(&b.sum_price)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.room_id.cmp(&b.room_id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lodgis_core::ChildrenCharge;
    use uuid::Uuid;

    fn offer(room_id: Uuid, sum_price: f64) -> RoomOffer {
        RoomOffer {
            room_id,
            room_name: "Double".to_string(),
            capacity: 2,
            available_rooms: 3,
            nights: 2,
            sum_price,
            avg_night_price: sum_price / 2.0,
            refundable: true,
            pay_later: false,
            children: ChildrenCharge::default(),
            total_price: sum_price,
        }
    }

    #[test]
    fn test_lowest_price_wins() {
        let cheap = Uuid::new_v4();
        let picked = BestOfferSelector::select(vec![
            offer(Uuid::new_v4(), 300.0),
            offer(cheap, 180.0),
            offer(Uuid::new_v4(), 220.0),
        ])
        .unwrap();
        assert_eq!(picked.room_id, cheap);
    }

    #[test]
    fn test_tie_break_is_deterministic() {
        let a = Uuid::from_u128(1);
        let b = Uuid::from_u128(2);

        for offers in [
            vec![offer(a, 200.0), offer(b, 200.0)],
            vec![offer(b, 200.0), offer(a, 200.0)],
        ] {
            let picked = BestOfferSelector::select(offers).unwrap();
            assert_eq!(picked.room_id, a);
        }
    }

    #[test]
    fn test_no_candidates() {
        assert!(BestOfferSelector::select(vec![]).is_none());
    }
}
