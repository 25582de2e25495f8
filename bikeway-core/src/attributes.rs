//! Metrics and ratings attached to each finished route.
//!
//! Distance, steepness and windiness are measured from the geometry.
//! Elevation, traffic and amenity data are not available, so the remaining
//! ratings come from a stable fingerprint of the coordinates: identical
//! geometry always yields identical ratings, with no stored randomness.

use std::fmt;

use crate::LatLng;
use crate::geometry::{haversine_km, path_length_km};

/// Routes longer than this many kilometres are classed as rural.
pub const RURAL_DISTANCE_KM: f64 = 5.0;

/// Upper bound of every rating.
pub const MAX_RATING: f64 = 10.0;

const STEEPNESS_SCALE: f64 = 50.0;
const WINDINESS_SCALE: f64 = 5.0;
const FINGERPRINT_SCALE: f64 = 10_000.0;

// Offsets into the fingerprint, one per rating.
const SCENERY_OFFSET: f64 = 0.0;
const CAR_TRAFFIC_OFFSET: f64 = 3.0;
const FOOT_TRAFFIC_OFFSET: f64 = 6.0;
const SAFETY_OFFSET: f64 = 9.0;
const CROWD_DENSITY_OFFSET: f64 = 12.0;
const CLEANLINESS_OFFSET: f64 = 15.0;

/// Setting of a route, derived from its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UrbanRural {
    /// Short routes inside the city fabric.
    Urban,
    /// Long routes reaching beyond it.
    Rural,
}

impl UrbanRural {
    /// Classify a route by its length in kilometres.
    #[must_use]
    pub fn from_distance_km(distance_km: f64) -> Self {
        if distance_km > RURAL_DISTANCE_KM {
            Self::Rural
        } else {
            Self::Urban
        }
    }
}

impl fmt::Display for UrbanRural {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Urban => "Urban",
            Self::Rural => "Rural",
        })
    }
}

/// Scalar attributes of a route. Ratings use a `0..=10` scale.
///
/// # Examples
/// ```
/// use bikeway_core::{LatLng, RouteAttributes, UrbanRural};
///
/// let path = [LatLng::new(51.00, -114.00), LatLng::new(51.01, -114.00)];
/// let attributes = RouteAttributes::synthesize(&path);
/// assert_eq!(attributes.distance_km, 1.11);
/// assert_eq!(attributes.urban_rural, UrbanRural::Urban);
/// assert_eq!(attributes, RouteAttributes::synthesize(&path));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct RouteAttributes {
    /// Great-circle length in kilometres, two decimals.
    pub distance_km: f64,
    /// Latitude-change proxy for elevation change, one decimal.
    pub steepness: f64,
    /// Path length over straight-line length, scaled, one decimal.
    pub windiness: f64,
    /// Scenery rating.
    pub scenery: u8,
    /// Motor traffic rating.
    pub car_traffic: u8,
    /// Pedestrian traffic rating.
    pub foot_traffic: u8,
    /// Safety rating.
    pub safety: u8,
    /// Crowding rating.
    pub crowd_density: u8,
    /// Cleanliness rating.
    pub cleanliness: u8,
    /// Urban or rural setting.
    pub urban_rural: UrbanRural,
}

impl RouteAttributes {
    /// Compute every attribute for the given path.
    #[must_use]
    pub fn synthesize(coordinates: &[LatLng]) -> Self {
        let distance_km = path_length_km(coordinates);
        let fingerprint = fingerprint(coordinates);
        Self {
            distance_km: round_to(distance_km, 2),
            steepness: round_to(steepness(coordinates), 1),
            windiness: round_to(windiness(coordinates, distance_km), 1),
            scenery: rating(fingerprint, SCENERY_OFFSET),
            car_traffic: rating(fingerprint, CAR_TRAFFIC_OFFSET),
            foot_traffic: rating(fingerprint, FOOT_TRAFFIC_OFFSET),
            safety: rating(fingerprint, SAFETY_OFFSET),
            crowd_density: rating(fingerprint, CROWD_DENSITY_OFFSET),
            cleanliness: rating(fingerprint, CLEANLINESS_OFFSET),
            urban_rural: UrbanRural::from_distance_km(distance_km),
        }
    }
}

/// Largest latitude change between consecutive points, scaled and capped.
#[expect(
    clippy::float_arithmetic,
    reason = "steepness scales a latitude delta"
)]
fn steepness(coordinates: &[LatLng]) -> f64 {
    let max_change = coordinates
        .windows(2)
        .filter_map(|pair| match pair {
            [from, to] => Some((to.lat - from.lat).abs()),
            _ => None,
        })
        .fold(0.0_f64, f64::max);
    (max_change * STEEPNESS_SCALE).min(MAX_RATING)
}

/// Path length relative to the straight line between the endpoints.
///
/// Returns `0.0` when the endpoints coincide, so closed loops and degenerate
/// paths do not divide by zero.
#[expect(
    clippy::float_arithmetic,
    reason = "windiness is a ratio of two distances"
)]
fn windiness(coordinates: &[LatLng], distance_km: f64) -> f64 {
    let (Some(first), Some(last)) = (coordinates.first(), coordinates.last()) else {
        return 0.0;
    };
    let straight_km = haversine_km(*first, *last);
    if straight_km == 0.0 {
        return 0.0;
    }
    (distance_km / straight_km * WINDINESS_SCALE).min(MAX_RATING)
}

/// `|sin(sum of lat + lng)| * 10000`, deliberately non-cryptographic.
#[expect(
    clippy::float_arithmetic,
    reason = "the fingerprint is defined over floating-point sums"
)]
fn fingerprint(coordinates: &[LatLng]) -> f64 {
    let sum = coordinates
        .iter()
        .fold(0.0_f64, |total, point| total + (point.lat + point.lng));
    (sum.sin() * FINGERPRINT_SCALE).abs()
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "ratings fold the fingerprint into 0..=10 before the cast"
)]
fn rating(fingerprint: f64, offset: f64) -> u8 {
    let value = ((fingerprint + offset) % 100.0 / 10.0).round();
    value.clamp(0.0, MAX_RATING) as u8
}

#[expect(
    clippy::float_arithmetic,
    reason = "decimal rounding scales by a power of ten"
)]
fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10_f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn path(points: &[(f64, f64)]) -> Vec<LatLng> {
        points
            .iter()
            .map(|&(lat, lng)| LatLng::new(lat, lng))
            .collect()
    }

    #[rstest]
    fn synthesis_is_deterministic() {
        let coordinates = path(&[(51.03, -114.05), (51.04, -114.06), (51.05, -114.04)]);
        let first = RouteAttributes::synthesize(&coordinates);
        let second = RouteAttributes::synthesize(&coordinates);
        assert_eq!(first, second);
    }

    #[rstest]
    fn ratings_follow_the_fingerprint() {
        // sum = 0.5 + 0.25 = 0.75; |sin(0.75)| * 10000 = 6816.387600233341
        let coordinates = path(&[(0.5, 0.0), (0.0, 0.25)]);
        let attributes = RouteAttributes::synthesize(&coordinates);
        assert_eq!(attributes.scenery, 2); // 16.39 / 10
        assert_eq!(attributes.car_traffic, 2); // 19.39 / 10
        assert_eq!(attributes.foot_traffic, 2); // 22.39 / 10
        assert_eq!(attributes.safety, 3); // 25.39 / 10
        assert_eq!(attributes.crowd_density, 3); // 28.39 / 10
        assert_eq!(attributes.cleanliness, 3); // 31.39 / 10
    }

    #[rstest]
    #[case(0.0, 0.0, 0)]
    #[case(95.0, 0.0, 10)]
    #[case(97.0, 3.0, 0)]
    #[case(1234.0, 15.0, 5)]
    fn rating_wraps_into_range(#[case] fingerprint: f64, #[case] offset: f64, #[case] expected: u8) {
        assert_eq!(rating(fingerprint, offset), expected);
    }

    #[rstest]
    fn straight_route_has_baseline_windiness() {
        let coordinates = path(&[(51.0, -114.0), (51.01, -114.0)]);
        let attributes = RouteAttributes::synthesize(&coordinates);
        assert_eq!(attributes.windiness, 5.0);
    }

    #[rstest]
    fn closed_loop_has_zero_windiness() {
        let coordinates = path(&[(51.0, -114.0), (51.01, -114.0), (51.0, -114.0)]);
        let attributes = RouteAttributes::synthesize(&coordinates);
        assert_eq!(attributes.windiness, 0.0);
        assert!(attributes.distance_km > 0.0);
    }

    #[rstest]
    fn winding_route_is_capped() {
        let coordinates = path(&[(0.0, 0.0), (0.0, 1.0), (0.0, 0.0), (0.0, 1.0), (0.0, 0.001)]);
        let attributes = RouteAttributes::synthesize(&coordinates);
        assert_eq!(attributes.windiness, MAX_RATING);
    }

    #[rstest]
    #[case(&[(51.0, -114.0), (51.01, -114.0)], 0.5)]
    #[case(&[(51.0, -114.0), (51.002, -114.0), (51.003, -114.0)], 0.1)]
    #[case(&[(0.0, 0.0), (1.0, 0.0)], 10.0)]
    #[case(&[(0.0, 0.0), (0.0, 1.0)], 0.0)]
    fn steepness_tracks_largest_latitude_step(
        #[case] points: &[(f64, f64)],
        #[case] expected: f64,
    ) {
        let attributes = RouteAttributes::synthesize(&path(points));
        assert_eq!(attributes.steepness, expected);
    }

    #[rstest]
    #[case(5.0, UrbanRural::Urban)]
    #[case(5.01, UrbanRural::Rural)]
    #[case(0.0, UrbanRural::Urban)]
    fn rural_threshold_is_exclusive(#[case] distance_km: f64, #[case] expected: UrbanRural) {
        assert_eq!(UrbanRural::from_distance_km(distance_km), expected);
    }

    #[rstest]
    fn distance_is_rounded_to_two_decimals() {
        let coordinates = path(&[(51.0, -114.0), (51.0, -114.1)]);
        let attributes = RouteAttributes::synthesize(&coordinates);
        assert_eq!(attributes.distance_km, 7.0);
        assert_eq!(attributes.urban_rural, UrbanRural::Rural);
    }
}
