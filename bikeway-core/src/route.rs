//! Finished, attributed routes.
//!
//! A route is built once from a [`MergedPath`] and then shared read-only by
//! every consumer.

use std::fmt;
use std::str::FromStr;

use crate::segment::{ParseIdError, parse_prefixed};
use crate::{BikewayCategory, LatLng, MergedPath, RouteAttributes, SegmentId};

/// Position of a route in the reconstructed network.
///
/// Serialised as its display form, `route-{n}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "String", try_from = "String")
)]
pub struct RouteId(pub usize);

impl RouteId {
    const PREFIX: &'static str = "route-";
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

impl FromStr for RouteId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_prefixed(s, Self::PREFIX).map(Self)
    }
}

impl From<RouteId> for String {
    fn from(id: RouteId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for RouteId {
    type Error = ParseIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A continuous bike route with its attributes.
///
/// # Examples
/// ```
/// use bikeway_core::{BikewayCategory, LatLng, MergedPath, Route, RouteId, SegmentId};
///
/// let path = MergedPath {
///     category: BikewayCategory::BicycleLane,
///     coordinates: vec![LatLng::new(51.0, -114.0), LatLng::new(51.0, -114.02)],
///     segment_ids: vec![SegmentId(3)],
/// };
/// let route = Route::from_path(RouteId(0), path);
/// assert_eq!(route.id.to_string(), "route-0");
/// assert_eq!(route.attributes.distance_km, 1.4);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Route {
    /// Position in the network.
    pub id: RouteId,
    /// Ordered positions along the route.
    pub coordinates: Vec<LatLng>,
    /// Bikeway class carried over from the leading segment.
    pub category: BikewayCategory,
    /// Raw segments folded into the route.
    pub segment_ids: Vec<SegmentId>,
    /// Measured and synthesised attributes.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub attributes: RouteAttributes,
}

impl Route {
    /// Attribute a merged path and turn it into a route.
    #[must_use]
    pub fn from_path(id: RouteId, path: MergedPath) -> Self {
        let attributes = RouteAttributes::synthesize(&path.coordinates);
        Self {
            id,
            coordinates: path.coordinates,
            category: path.category,
            segment_ids: path.segment_ids,
            attributes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_keeps_path_data() {
        let coordinates = vec![LatLng::new(51.0, -114.0), LatLng::new(51.01, -114.0)];
        let path = MergedPath {
            category: BikewayCategory::CycleTrack,
            coordinates: coordinates.clone(),
            segment_ids: vec![SegmentId(2), SegmentId(9)],
        };
        let route = Route::from_path(RouteId(4), path);
        assert_eq!(route.coordinates, coordinates);
        assert_eq!(route.category, BikewayCategory::CycleTrack);
        assert_eq!(route.segment_ids, vec![SegmentId(2), SegmentId(9)]);
        assert_eq!(route.attributes, RouteAttributes::synthesize(&coordinates));
    }

    #[test]
    fn route_id_displays_with_prefix() {
        assert_eq!(RouteId(7).to_string(), "route-7");
        assert_eq!("route-7".parse::<RouteId>(), Ok(RouteId(7)));
        assert!("segment-7".parse::<RouteId>().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn route_serialises_prefixed_ids() {
        let coordinates = vec![LatLng::new(51.0, -114.0), LatLng::new(51.01, -114.0)];
        let path = MergedPath {
            category: BikewayCategory::CycleTrack,
            coordinates,
            segment_ids: vec![SegmentId(2), SegmentId(9)],
        };
        let route = Route::from_path(RouteId(4), path);
        let json = serde_json::to_value(&route).expect("serialise route");
        assert_eq!(json["id"], "route-4");
        assert_eq!(
            json["segmentIds"],
            serde_json::json!(["segment-2", "segment-9"])
        );
        let back: Route = serde_json::from_value(json).expect("deserialise route");
        assert_eq!(back, route);
    }
}
