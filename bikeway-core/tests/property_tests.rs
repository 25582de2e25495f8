//! Property-based tests for the merge engine and attribute synthesis.
//!
//! # Invariants tested
//!
//! - **No fragment lost twice:** every input segment appears in at most one
//!   surviving route.
//! - **Shape:** every route has at least two points and meets the minimum
//!   planar length.
//! - **Determinism:** merging and synthesis are pure functions of the input.

use std::collections::HashSet;

use bikeway_core::geometry::polyline_length;
use bikeway_core::{
    BikewayCategory, LatLng, MergeConfig, RawSegment, RouteAttributes, SegmentId, merge_segments,
};
use proptest::prelude::*;

/// Points on a coarse grid so that shared endpoints occur often.
fn grid_point() -> impl Strategy<Value = LatLng> {
    (0_u8..6, 0_u8..6).prop_map(|(row, col)| {
        LatLng::new(
            51.0 + f64::from(row) * 0.002,
            -114.0 + f64::from(col) * 0.002,
        )
    })
}

fn segments_strategy() -> impl Strategy<Value = Vec<RawSegment>> {
    prop::collection::vec(prop::collection::vec(grid_point(), 1..5), 0..24).prop_map(|paths| {
        paths
            .into_iter()
            .enumerate()
            .filter_map(|(index, coordinates)| {
                RawSegment::new(SegmentId(index + 1), BikewayCategory::CycleTrack, coordinates)
                    .ok()
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: no input segment is folded into two surviving routes.
    #[test]
    fn segments_are_used_at_most_once(segments in segments_strategy()) {
        let inputs: HashSet<SegmentId> = segments.iter().map(|segment| segment.id).collect();
        let outcome = merge_segments(segments, &MergeConfig::default());

        let mut seen = HashSet::new();
        for path in &outcome.paths {
            for id in &path.segment_ids {
                prop_assert!(inputs.contains(id), "unknown segment {id}");
                prop_assert!(seen.insert(*id), "segment {id} used twice");
            }
        }
    }

    /// Property: surviving routes satisfy the shape invariants.
    #[test]
    fn routes_meet_minimum_shape(segments in segments_strategy()) {
        let config = MergeConfig::default();
        let outcome = merge_segments(segments, &config);
        for path in &outcome.paths {
            prop_assert!(path.coordinates.len() >= 2);
            prop_assert!(polyline_length(&path.coordinates) >= config.min_length());
        }
        prop_assert!(outcome.passes <= config.max_passes());
    }

    /// Property: the same input always merges to the same output.
    #[test]
    fn merging_is_deterministic(segments in segments_strategy()) {
        let config = MergeConfig::default();
        let first = merge_segments(segments.clone(), &config);
        let second = merge_segments(segments, &config);
        prop_assert_eq!(first, second);
    }

    /// Property: ratings stay on the 0..=10 scale.
    #[test]
    fn ratings_stay_in_range(path in prop::collection::vec(grid_point(), 2..12)) {
        let attributes = RouteAttributes::synthesize(&path);
        for rating in [
            attributes.scenery,
            attributes.car_traffic,
            attributes.foot_traffic,
            attributes.safety,
            attributes.crowd_density,
            attributes.cleanliness,
        ] {
            prop_assert!(rating <= 10);
        }
        prop_assert!((0.0..=10.0).contains(&attributes.steepness));
        prop_assert!((0.0..=10.0).contains(&attributes.windiness));
        prop_assert!(attributes.distance_km >= 0.0);
    }
}
