use serde::{Deserialize, Serialize};

/// Per-room children policy. Rooms without a stored policy row fall back to
/// the permissive defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomPolicy {
    pub children_allowed: bool,
    /// Exclusive upper bound: children strictly younger stay free.
    pub free_child_age_limit: u8,
    /// Age at/above which a child counts as an adult for occupancy.
    pub adult_age_threshold: u8,
    pub extra_bed_fee_per_night: f64,
}

impl Default for RoomPolicy {
    fn default() -> Self {
        Self {
            children_allowed: true,
            free_child_age_limit: 6,
            adult_age_threshold: 12,
            extra_bed_fee_per_night: 0.0,
        }
    }
}

/// Surcharge breakdown attached to an offer so callers can render the base
/// price and the extra-bed fee separately.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChildrenCharge {
    pub free_children: u32,
    pub chargeable_children: u32,
    pub extra_fee_per_night: f64,
    pub extra_fee_total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChildrenVerdict {
    /// The room disallows children and the party brings some; the caller
    /// excludes the room from results entirely.
    NotAllowed,
    Allowed(ChildrenCharge),
}

pub struct ChildrenPolicyEvaluator;

impl ChildrenPolicyEvaluator {
    /// Partition the party's children into free and chargeable and price the
    /// extra-bed surcharge for the whole stay.
    ///
    /// Children at/above the adult age threshold are still billed as
    /// extra-bed children, not as adult room-rate occupants.
    pub fn evaluate(policy: &RoomPolicy, child_ages: &[u8], nights: u32) -> ChildrenVerdict {
        if child_ages.is_empty() {
            return ChildrenVerdict::Allowed(ChildrenCharge::default());
        }
        if !policy.children_allowed {
            return ChildrenVerdict::NotAllowed;
        }

        let free = child_ages
            .iter()
            .filter(|&&age| age < policy.free_child_age_limit)
            .count() as u32;
        let chargeable = child_ages.len() as u32 - free;

        let extra_fee_per_night = chargeable as f64 * policy.extra_bed_fee_per_night;
        ChildrenVerdict::Allowed(ChildrenCharge {
            free_children: free,
            chargeable_children: chargeable,
            extra_fee_per_night,
            extra_fee_total: extra_fee_per_night * nights as f64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(fee: f64) -> RoomPolicy {
        RoomPolicy {
            children_allowed: true,
            free_child_age_limit: 6,
            adult_age_threshold: 12,
            extra_bed_fee_per_night: fee,
        }
    }

    #[test]
    fn test_partition_and_surcharge() {
        // One free (4), two chargeable (8 and 13), two nights at 100.
        let verdict = ChildrenPolicyEvaluator::evaluate(&policy(100.0), &[4, 8, 13], 2);

        assert_eq!(
            verdict,
            ChildrenVerdict::Allowed(ChildrenCharge {
                free_children: 1,
                chargeable_children: 2,
                extra_fee_per_night: 200.0,
                extra_fee_total: 400.0,
            })
        );
    }

    #[test]
    fn test_children_disallowed() {
        let mut p = policy(50.0);
        p.children_allowed = false;

        assert_eq!(
            ChildrenPolicyEvaluator::evaluate(&p, &[10], 3),
            ChildrenVerdict::NotAllowed
        );
        // An adults-only party is fine in a no-children room.
        assert_eq!(
            ChildrenPolicyEvaluator::evaluate(&p, &[], 3),
            ChildrenVerdict::Allowed(ChildrenCharge::default())
        );
    }

    #[test]
    fn test_boundary_ages() {
        // Exactly at the free limit is chargeable; just below is free.
        let verdict = ChildrenPolicyEvaluator::evaluate(&policy(10.0), &[5, 6], 1);
        assert_eq!(
            verdict,
            ChildrenVerdict::Allowed(ChildrenCharge {
                free_children: 1,
                chargeable_children: 1,
                extra_fee_per_night: 10.0,
                extra_fee_total: 10.0,
            })
        );
    }

    #[test]
    fn test_zero_fee_policy_charges_nothing() {
        let verdict = ChildrenPolicyEvaluator::evaluate(&RoomPolicy::default(), &[9, 15], 4);
        match verdict {
            ChildrenVerdict::Allowed(charge) => {
                assert_eq!(charge.chargeable_children, 2);
                assert_eq!(charge.extra_fee_total, 0.0);
            }
            other => panic!("unexpected verdict: {:?}", other),
        }
    }
}
