//! Geographic utilities: distances and location keys.

use crate::GeoPoint;

/// Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance between two points in meters.
pub fn haversine_distance(p1: &GeoPoint, p2: &GeoPoint) -> f64 {
    let lat1 = p1.lat.to_radians();
    let lat2 = p2.lat.to_radians();
    let dlat = (p2.lat - p1.lat).to_radians();
    let dlng = (p2.lng - p1.lng).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Equirectangular approximation of the distance between two points in
/// meters.
///
/// Accurate to well under a percent at snap-radius scale (meters); used in
/// the grouping hot loop where haversine precision buys nothing.
pub fn equirectangular_distance(p1: &GeoPoint, p2: &GeoPoint) -> f64 {
    let mean_lat = ((p1.lat + p2.lat) / 2.0).to_radians();
    let x = (p2.lng - p1.lng).to_radians() * mean_lat.cos();
    let y = (p2.lat - p1.lat).to_radians();

    EARTH_RADIUS_M * (x * x + y * y).sqrt()
}

/// Serialize a centroid into the location key format `"{lat},{lng}"`.
///
/// The key is used verbatim as marker identity across rebuilds, so it must
/// be byte-identical between runs for the same centroid. Rust's shortest
/// round-trip float formatting guarantees that for identical f64 values, but
/// a different summation order over the same members yields a different
/// centroid bit pattern and therefore a different key.
pub fn location_key(centroid: &GeoPoint) -> String {
    format!("{},{}", centroid.lat, centroid.lng)
}
