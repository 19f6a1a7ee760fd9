//! Synthetic merchant datasets.
//!
//! Deterministic, seeded generation for tests, benchmarks, and the CLI.
//! Produces the pathologies the pipeline has to handle: co-located
//! merchants (shared buildings), merchants without coordinates, and a
//! realistic category mix.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::categories::BUSINESS_TYPE_STYLES;
use crate::{GeoPoint, Merchant};

/// Generation parameters.
#[derive(Debug, Clone)]
pub struct SyntheticConfig {
    pub count: usize,
    pub seed: u64,
    /// Center of the generated area.
    pub center: GeoPoint,
    /// Half-width of the uniform coordinate spread, in degrees.
    pub spread_deg: f64,
    /// Every n-th merchant reuses the previous coordinate, forming a
    /// multi-merchant location. 0 disables co-location.
    pub colocate_every: usize,
    /// Every n-th merchant is generated without coordinates.
    /// 0 disables.
    pub missing_coords_every: usize,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            count: 1000,
            seed: 42,
            center: GeoPoint::new(37.38, 127.12),
            spread_deg: 0.05,
            colocate_every: 10,
            missing_coords_every: 50,
        }
    }
}

/// Generate a deterministic merchant list.
pub fn generate_merchants(config: &SyntheticConfig) -> Vec<Merchant> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut merchants = Vec::with_capacity(config.count);
    let mut previous_coords: Option<GeoPoint> = None;

    for i in 0..config.count {
        let style = &BUSINESS_TYPE_STYLES[i % BUSINESS_TYPE_STYLES.len()];
        let mut merchant = Merchant::new(
            &format!("매장 {i}"),
            style.label,
            style.key,
            &format!("성남대로 {}", i + 1),
        );

        let missing = config.missing_coords_every > 0
            && i % config.missing_coords_every == config.missing_coords_every - 1;

        if !missing {
            let colocate = config.colocate_every > 0
                && i % config.colocate_every == config.colocate_every - 1;

            let coords = match (colocate, previous_coords) {
                (true, Some(prev)) => prev,
                _ => GeoPoint::new(
                    config.center.lat + rng.gen_range(-config.spread_deg..config.spread_deg),
                    config.center.lng + rng.gen_range(-config.spread_deg..config.spread_deg),
                ),
            };
            previous_coords = Some(coords);
            merchant = merchant.with_coords(coords);
        }

        merchants.push(merchant);
    }

    merchants
}
