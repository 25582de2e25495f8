//! Geographic positions in latitude/longitude order.

use geo::{Coord, Point};

/// A WGS84 position.
///
/// The municipal export stores positions as `lng lat`; the parser swaps them
/// so everything downstream reads `lat` and `lng` by name. Conversions to
/// [`geo`] types follow the usual `x = longitude`, `y = latitude` convention.
///
/// # Examples
/// ```
/// use bikeway_core::LatLng;
/// use geo::Coord;
///
/// let position = LatLng::new(51.04, -114.07);
/// let coord: Coord<f64> = position.into();
/// assert_eq!(coord.x, -114.07);
/// assert_eq!(coord.y, 51.04);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl LatLng {
    /// Construct a position from latitude and longitude.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<LatLng> for Coord<f64> {
    fn from(value: LatLng) -> Self {
        Self {
            x: value.lng,
            y: value.lat,
        }
    }
}

impl From<LatLng> for Point<f64> {
    fn from(value: LatLng) -> Self {
        Self::new(value.lng, value.lat)
    }
}

impl From<Coord<f64>> for LatLng {
    fn from(value: Coord<f64>) -> Self {
        Self::new(value.y, value.x)
    }
}
