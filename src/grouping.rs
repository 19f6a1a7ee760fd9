//! Location grouping.
//!
//! Snaps raw merchant coordinates into stable location groups so that
//! merchants in the same building share one marker. Groups are rebuilt from
//! scratch whenever the underlying merchant set changes; filter and search
//! changes never re-run grouping.

use log::debug;

use crate::geo_utils::{equirectangular_distance, location_key};
use crate::{GeoPoint, LocationGroup, Merchant};

/// Accumulator for a group under construction. Keeps running coordinate sums
/// so the centroid is always the exact mean of all members.
struct GroupAccumulator {
    lat_sum: f64,
    lng_sum: f64,
    members: Vec<Merchant>,
}

impl GroupAccumulator {
    fn seed(merchant: Merchant, coords: GeoPoint) -> Self {
        Self {
            lat_sum: coords.lat,
            lng_sum: coords.lng,
            members: vec![merchant],
        }
    }

    fn centroid(&self) -> GeoPoint {
        let n = self.members.len() as f64;
        GeoPoint::new(self.lat_sum / n, self.lng_sum / n)
    }

    fn join(&mut self, merchant: Merchant, coords: GeoPoint) {
        self.lat_sum += coords.lat;
        self.lng_sum += coords.lng;
        self.members.push(merchant);
    }
}

/// Group merchants whose coordinates lie within `snap_radius_m` of each
/// other into location groups.
///
/// Greedy first-match-wins: each merchant is tested against existing group
/// centroids in creation order and joins the first one within the snap
/// radius; otherwise it seeds a new group at its exact coordinate. Joining
/// shifts the centroid (mean of all members), so membership is an
/// order-dependent, non-optimal partition: a later merchant may join a group
/// that an earlier one, tested against the pre-drift centroid, would not
/// have. Members are therefore only guaranteed pairwise within 2x the snap
/// radius via the chain of joins, not within the radius itself.
///
/// O(n*g) with a linear scan over groups; acceptable for result sets in the
/// low thousands, which is why no spatial index is used here.
///
/// Merchants without coordinates are skipped; this is not an error.
pub fn group_merchants(merchants: &[Merchant], snap_radius_m: f64) -> Vec<LocationGroup> {
    let mut accumulators: Vec<GroupAccumulator> = Vec::new();
    let mut skipped = 0usize;

    for merchant in merchants {
        let coords = match merchant.coords {
            Some(c) if c.is_valid() => c,
            _ => {
                skipped += 1;
                continue;
            }
        };

        let joined = accumulators.iter_mut().find(|acc| {
            equirectangular_distance(&acc.centroid(), &coords) <= snap_radius_m
        });

        match joined {
            Some(acc) => acc.join(merchant.clone(), coords),
            None => accumulators.push(GroupAccumulator::seed(merchant.clone(), coords)),
        }
    }

    if skipped > 0 {
        debug!("grouping skipped {skipped} merchants without usable coordinates");
    }

    accumulators
        .into_iter()
        .map(|acc| {
            let centroid = acc.centroid();
            LocationGroup {
                key: location_key(&centroid),
                centroid,
                members: acc.members,
            }
        })
        .collect()
}
