//! Distance helpers over [`LatLng`] sequences.
//!
//! Two metrics are in play. Endpoint matching and noise filtering work on
//! raw planar degrees, which is cheap and good enough at city scale. Reported
//! route lengths use the haversine great-circle distance in kilometres.

use geo::{Distance, Euclidean, Point};

use crate::LatLng;

/// Earth radius used for great-circle distances, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two positions in kilometres.
///
/// # Examples
/// ```
/// use bikeway_core::{LatLng, geometry::haversine_km};
///
/// let calgary = LatLng::new(51.0447, -114.0719);
/// assert_eq!(haversine_km(calgary, calgary), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the haversine formula is floating-point trigonometry"
)]
pub fn haversine_km(from: LatLng, to: LatLng) -> f64 {
    let lat_from = from.lat.to_radians();
    let lat_to = to.lat.to_radians();
    let delta_lat = lat_to - lat_from;
    let delta_lng = (to.lng - from.lng).to_radians();

    let half_chord = (delta_lat / 2.0).sin().powi(2)
        + lat_from.cos() * lat_to.cos() * (delta_lng / 2.0).sin().powi(2);
    let angle = 2.0 * half_chord.sqrt().atan2((1.0 - half_chord).sqrt());
    EARTH_RADIUS_KM * angle
}

/// Planar distance between two positions measured in raw degrees.
#[must_use]
pub fn planar_distance(from: LatLng, to: LatLng) -> f64 {
    Euclidean.distance(Point::from(from), Point::from(to))
}

/// Total planar length of a polyline, in degrees.
#[must_use]
pub fn polyline_length(coordinates: &[LatLng]) -> f64 {
    coordinates
        .windows(2)
        .filter_map(|pair| match pair {
            [from, to] => Some(planar_distance(*from, *to)),
            _ => None,
        })
        .sum()
}

/// Total great-circle length of a polyline, in kilometres.
#[must_use]
pub fn path_length_km(coordinates: &[LatLng]) -> f64 {
    coordinates
        .windows(2)
        .filter_map(|pair| match pair {
            [from, to] => Some(haversine_km(*from, *to)),
            _ => None,
        })
        .sum()
}
