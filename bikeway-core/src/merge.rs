//! Greedy stitching of fragmented segments into continuous routes.
//!
//! Municipal bikeway data is cut at every intersection. The merge engine
//! rebuilds rideable routes by repeatedly joining any two working paths whose
//! endpoints lie within the proximity threshold, until a full pass finds
//! nothing left to join or the pass ceiling is reached.
//!
//! Working paths live in an index-ordered arena. Joined inputs leave the
//! active set for good and their union is appended to the arena, so each pass
//! only ever pairs paths that are still active.
//!
//! # Examples
//! ```
//! use bikeway_core::{BikewayCategory, LatLng, MergeConfig, RawSegment, SegmentId, merge_segments};
//!
//! # fn main() -> Result<(), bikeway_core::SegmentError> {
//! let segments = vec![
//!     RawSegment::new(
//!         SegmentId(1),
//!         BikewayCategory::BicycleLane,
//!         vec![LatLng::new(0.0, 0.0), LatLng::new(0.0, 1.0)],
//!     )?,
//!     RawSegment::new(
//!         SegmentId(2),
//!         BikewayCategory::BicycleLane,
//!         vec![LatLng::new(0.0, 1.0), LatLng::new(0.0, 2.0)],
//!     )?,
//! ];
//! let outcome = merge_segments(segments, &MergeConfig::default());
//! assert_eq!(outcome.paths.len(), 1);
//! assert_eq!(outcome.merges, 1);
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeSet;

use log::{debug, warn};
use thiserror::Error;

use crate::geometry::{planar_distance, polyline_length};
use crate::{BikewayCategory, LatLng, RawSegment, SegmentId};

/// Default endpoint proximity, in degrees (about 30 m at Calgary's latitude).
pub const DEFAULT_PROXIMITY_THRESHOLD: f64 = 0.0003;
/// Default minimum planar length of a finished route, in degrees.
pub const DEFAULT_MIN_LENGTH: f64 = 0.001;
/// Default ceiling on merge passes.
pub const DEFAULT_MAX_PASSES: usize = 50;

/// Tuning knobs for [`merge_segments`].
///
/// # Examples
/// ```
/// use bikeway_core::MergeConfig;
///
/// let config = MergeConfig::new(0.0005, 0.002, 10).unwrap();
/// assert_eq!(config.max_passes(), 10);
/// assert!(MergeConfig::new(-1.0, 0.002, 10).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeConfig {
    proximity_threshold: f64,
    min_length: f64,
    max_passes: usize,
}

/// Errors returned by [`MergeConfig::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MergeConfigError {
    /// The proximity threshold was negative or not finite.
    #[error("proximity threshold must be a finite, non-negative number of degrees, got {0}")]
    InvalidThreshold(f64),
    /// The minimum route length was negative or not finite.
    #[error("minimum route length must be a finite, non-negative number of degrees, got {0}")]
    InvalidMinLength(f64),
    /// The pass ceiling was zero.
    #[error("at least one merge pass is required")]
    NoPasses,
}

impl MergeConfig {
    /// Validates and constructs a [`MergeConfig`].
    ///
    /// # Errors
    /// Returns [`MergeConfigError`] when a threshold is negative or not
    /// finite, or when `max_passes` is zero.
    pub fn new(
        proximity_threshold: f64,
        min_length: f64,
        max_passes: usize,
    ) -> Result<Self, MergeConfigError> {
        if !proximity_threshold.is_finite() || proximity_threshold < 0.0 {
            return Err(MergeConfigError::InvalidThreshold(proximity_threshold));
        }
        if !min_length.is_finite() || min_length < 0.0 {
            return Err(MergeConfigError::InvalidMinLength(min_length));
        }
        if max_passes == 0 {
            return Err(MergeConfigError::NoPasses);
        }
        Ok(Self {
            proximity_threshold,
            min_length,
            max_passes,
        })
    }

    /// Endpoints strictly closer than this, in degrees, are joined.
    #[must_use]
    pub const fn proximity_threshold(&self) -> f64 {
        self.proximity_threshold
    }

    /// Finished routes shorter than this, in degrees, are dropped as noise.
    #[must_use]
    pub const fn min_length(&self) -> f64 {
        self.min_length
    }

    /// Upper bound on merge passes.
    #[must_use]
    pub const fn max_passes(&self) -> usize {
        self.max_passes
    }
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            proximity_threshold: DEFAULT_PROXIMITY_THRESHOLD,
            min_length: DEFAULT_MIN_LENGTH,
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

/// A continuous path assembled from one or more raw segments.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedPath {
    /// Category of the segment that led the first join.
    pub category: BikewayCategory,
    /// Ordered positions along the path.
    pub coordinates: Vec<LatLng>,
    /// Raw segments folded into this path, in path order.
    pub segment_ids: Vec<SegmentId>,
}

impl From<RawSegment> for MergedPath {
    fn from(segment: RawSegment) -> Self {
        Self {
            category: segment.category,
            coordinates: segment.coordinates,
            segment_ids: vec![segment.id],
        }
    }
}

impl MergedPath {
    fn endpoints(&self) -> Option<(LatLng, LatLng)> {
        Some((*self.coordinates.first()?, *self.coordinates.last()?))
    }

    fn reversed(&self) -> Self {
        Self {
            category: self.category,
            coordinates: self.coordinates.iter().rev().copied().collect(),
            segment_ids: self.segment_ids.iter().rev().copied().collect(),
        }
    }

    /// Append `tail` after `self`, emitting a shared junction point once.
    fn chain(mut self, tail: &Self) -> Self {
        let skip = usize::from(self.coordinates.last() == tail.coordinates.first());
        self.coordinates
            .extend(tail.coordinates.iter().skip(skip).copied());
        self.segment_ids.extend(tail.segment_ids.iter().copied());
        self
    }

    fn planar_length(&self) -> f64 {
        polyline_length(&self.coordinates)
    }
}

/// Result of a merge run.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    /// Surviving paths in arena order.
    pub paths: Vec<MergedPath>,
    /// Number of passes performed.
    pub passes: usize,
    /// Number of joins performed.
    pub merges: usize,
    /// Number of unmerged leftovers dropped for being too short.
    pub discarded: usize,
}

/// Stitch `segments` into maximal continuous paths.
///
/// Each pass sweeps the active paths in index order. An active path is
/// joined with the first later active path one of whose endpoints lies
/// within the proximity threshold of one of its own; adjacencies are tried as
/// end-to-start, end-to-end, start-to-start and start-to-end. The joined path
/// is appended to the arena and is reached later in the same sweep. Passes
/// stop once a sweep joins nothing or [`MergeConfig::max_passes`] is hit.
///
/// Paths shorter than [`MergeConfig::min_length`] or with fewer than two
/// points are discarded from the result.
#[must_use]
pub fn merge_segments(segments: Vec<RawSegment>, config: &MergeConfig) -> MergeOutcome {
    let mut arena: Vec<MergedPath> = segments.into_iter().map(MergedPath::from).collect();
    let mut active: BTreeSet<usize> = (0..arena.len()).collect();
    let mut passes = 0;
    let mut merges = 0;

    while passes < config.max_passes {
        passes += 1;
        let joined = run_pass(&mut arena, &mut active, config.proximity_threshold);
        merges += joined;
        debug!("merge pass {passes} joined {joined} pairs");
        if joined == 0 {
            break;
        }
        if passes == config.max_passes {
            warn!(
                "merge reached the {} pass ceiling before confirming a fixed point",
                config.max_passes
            );
        }
    }

    let total_active = active.len();
    let paths: Vec<MergedPath> = active
        .into_iter()
        .filter_map(|index| arena.get(index))
        .filter(|path| path.coordinates.len() >= 2 && path.planar_length() >= config.min_length)
        .cloned()
        .collect();

    MergeOutcome {
        discarded: total_active - paths.len(),
        paths,
        passes,
        merges,
    }
}

fn run_pass(arena: &mut Vec<MergedPath>, active: &mut BTreeSet<usize>, threshold: f64) -> usize {
    let mut joined = 0;
    let mut cursor = 0;

    while let Some(&lead) = active.range(cursor..).next() {
        cursor = lead + 1;
        let Some(lead_path) = arena.get(lead) else {
            continue;
        };
        let partner = active.range(cursor..).find_map(|&candidate| {
            arena
                .get(candidate)
                .and_then(|other| join(lead_path, other, threshold))
                .map(|path| (candidate, path))
        });

        if let Some((candidate, path)) = partner {
            active.remove(&lead);
            active.remove(&candidate);
            active.insert(arena.len());
            arena.push(path);
            joined += 1;
        }
    }
    joined
}

/// Join two paths if any endpoint pair touches, in priority order.
fn join(lead: &MergedPath, other: &MergedPath, threshold: f64) -> Option<MergedPath> {
    let (lead_start, lead_end) = lead.endpoints()?;
    let (other_start, other_end) = other.endpoints()?;
    let touches = |a: LatLng, b: LatLng| planar_distance(a, b) < threshold;

    if touches(lead_end, other_start) {
        Some(lead.clone().chain(other))
    } else if touches(lead_end, other_end) {
        Some(lead.clone().chain(&other.reversed()))
    } else if touches(lead_start, other_start) {
        Some(lead.reversed().chain(other))
    } else if touches(lead_start, other_end) {
        let mut path = other.clone().chain(lead);
        path.category = lead.category;
        Some(path)
    } else {
        None
    }
}
