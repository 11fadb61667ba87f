//! Great-circle distance between latitude/longitude points.
//!
//! Haversine formula over a spherical Earth model. Good enough for campaign
//! work like "closest field office" sorting; not survey-grade.

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers between two points given in decimal
/// degrees.
///
/// ```
/// let km = ck_geo::distance_km(51.5074, -0.1278, 48.8566, 2.3522);
/// assert!((km - 343.5).abs() < 1.0); // London to Paris
/// ```
#[must_use]
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}
